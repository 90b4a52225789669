use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two players of a game of Go.
///
/// Being a closed enum, no invalid player tag is representable: score-sign
/// arithmetic is total and upstream data corruption surfaces at payload
/// decoding instead of inside the scoring math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "W")]
    White,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Sign convention for score arithmetic: positive scores favor Black.
    pub fn sign(self) -> f64 {
        match self {
            Player::Black => 1.0,
            Player::White => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Player::Black => "B",
            Player::White => "W",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Player::White.opponent(), Player::Black);
    }

    #[test]
    fn test_sign_convention() {
        assert_eq!(Player::Black.sign(), 1.0);
        assert_eq!(Player::White.sign(), -1.0);
    }

    #[test]
    fn test_wire_encoding() {
        assert_eq!(serde_json::to_string(&Player::Black).unwrap(), "\"B\"");
        let w: Player = serde_json::from_str("\"W\"").unwrap();
        assert_eq!(w, Player::White);
        assert!(serde_json::from_str::<Player>("\"X\"").is_err());
    }
}
