//! Board coordinates in the two encodings the crate speaks: GTP ("D4",
//! "pass") on the engine side and SGF ("dd") on the persistence side.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::game::player::Player;
use crate::ReviewError;

/// GTP column letters; the letter I is skipped by convention.
const GTP_COLUMNS: &[u8] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// A point on the board, or a pass.
///
/// `x` counts columns from the left, `y` counts rows from the bottom, both
/// zero-based (the GTP view of the board).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertex {
    Pass,
    Point { x: u8, y: u8 },
}

impl Vertex {
    pub fn point(x: u8, y: u8) -> Vertex {
        Vertex::Point { x, y }
    }

    pub fn is_pass(self) -> bool {
        matches!(self, Vertex::Pass)
    }

    /// GTP encoding, e.g. "D4" or "pass".
    pub fn gtp(self) -> String {
        match self {
            Vertex::Pass => "pass".to_string(),
            Vertex::Point { x, y } => {
                let column = GTP_COLUMNS
                    .get(x as usize)
                    .copied()
                    .unwrap_or(b'?') as char;
                format!("{}{}", column, y as u32 + 1)
            }
        }
    }

    /// Parses a GTP coordinate ("D4", "pass", case-insensitive).
    pub fn from_gtp(text: &str) -> crate::Result<Vertex> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("pass") {
            return Ok(Vertex::Pass);
        }
        let mut chars = trimmed.chars();
        let column = chars
            .next()
            .ok_or_else(|| ReviewError::InvalidCoordinate(text.to_string()))?
            .to_ascii_uppercase();
        let x = GTP_COLUMNS
            .iter()
            .position(|&c| c as char == column)
            .ok_or_else(|| ReviewError::InvalidCoordinate(text.to_string()))?;
        let row: u32 = chars
            .as_str()
            .parse()
            .map_err(|_| ReviewError::InvalidCoordinate(text.to_string()))?;
        if row == 0 || row > u8::MAX as u32 {
            return Err(ReviewError::InvalidCoordinate(text.to_string()));
        }
        Ok(Vertex::Point {
            x: x as u8,
            y: (row - 1) as u8,
        })
    }

    /// SGF encoding for the given board size; a pass is the empty string.
    /// SGF rows count from the top of the board.
    pub fn sgf(self, board_size: (u8, u8)) -> String {
        match self {
            Vertex::Pass => String::new(),
            Vertex::Point { x, y } => {
                let (_, size_y) = board_size;
                let row = size_y.saturating_sub(1).saturating_sub(y);
                format!("{}{}", (b'a' + x) as char, (b'a' + row) as char)
            }
        }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.gtp())
    }
}

// The engine wire format carries vertices as GTP strings.
impl Serialize for Vertex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.gtp())
    }
}

impl<'de> Deserialize<'de> for Vertex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Vertex::from_gtp(&text).map_err(D::Error::custom)
    }
}

/// A move: which player placed a stone where (or passed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub player: Player,
    pub vertex: Vertex,
}

impl Move {
    pub fn new(player: Player, vertex: Vertex) -> Move {
        Move { player, vertex }
    }

    pub fn pass(player: Player) -> Move {
        Move {
            player,
            vertex: Vertex::Pass,
        }
    }

    pub fn gtp(self) -> String {
        self.vertex.gtp()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.player, self.vertex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gtp_round_trip() {
        let d4 = Vertex::from_gtp("D4").unwrap();
        assert_eq!(d4, Vertex::point(3, 3));
        assert_eq!(d4.gtp(), "D4");

        // The column I is skipped: J is the 9th column.
        let j10 = Vertex::from_gtp("J10").unwrap();
        assert_eq!(j10, Vertex::point(8, 9));
        assert_eq!(j10.gtp(), "J10");

        assert_eq!(Vertex::from_gtp("pass").unwrap(), Vertex::Pass);
        assert_eq!(Vertex::from_gtp("PASS").unwrap(), Vertex::Pass);
        assert_eq!(Vertex::Pass.gtp(), "pass");
    }

    #[test]
    fn test_gtp_rejects_garbage() {
        assert!(Vertex::from_gtp("").is_err());
        assert!(Vertex::from_gtp("I5").is_err());
        assert!(Vertex::from_gtp("D0").is_err());
        assert!(Vertex::from_gtp("D").is_err());
        assert!(Vertex::from_gtp("44").is_err());
    }

    #[test]
    fn test_sgf_encoding() {
        // On 19x19, D4 (x=3, y=3 from the bottom) is column d, row p from the top.
        assert_eq!(Vertex::point(3, 3).sgf((19, 19)), "dp");
        assert_eq!(Vertex::point(0, 18).sgf((19, 19)), "aa");
        assert_eq!(Vertex::Pass.sgf((19, 19)), "");
    }

    #[test]
    fn test_vertex_serde_is_gtp() {
        let v: Vertex = serde_json::from_str("\"Q16\"").unwrap();
        assert_eq!(v, Vertex::point(15, 15));
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"Q16\"");
    }
}
