//! Localization seam for exported annotations. The core never hardcodes
//! user-facing text; presentation layers supply their own `Messages`.

use crate::game::player::Player;

/// Message templates used by the annotation export.
pub trait Messages {
    fn sgf_start(&self) -> String;
    fn generated_by(&self) -> String;
    fn komi(&self, komi: f64) -> String;
    fn ruleset(&self, ruleset: &str) -> String;
    fn move_header(&self, number: u32, player: Player, gtp: &str) -> String;
    fn score(&self, score: &str) -> String;
    fn winrate(&self, winrate: &str) -> String;
    fn point_loss(&self, points_lost: f64) -> String;
    fn top_move(&self, top_move: &str, score: &str) -> String;
    fn best_move(&self) -> String;
    fn pv(&self, player: Player, pv: &str) -> String;
    fn policy_rank(&self, rank: usize, probability: f32) -> String;
    fn policy_best(&self, best_move: &str, probability: f32) -> String;
    fn teaching_undo(&self) -> String;
    fn undo_predicted_pv(&self, player: Player, pv: &str) -> String;
    fn ai_thoughts(&self, thoughts: &str) -> String;
    fn no_analysis(&self) -> String;
    fn analyzing(&self) -> String;
    fn sgf_comments_header(&self) -> String;
    fn note(&self, note: &str) -> String;
}

/// Built-in English messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishMessages;

impl Messages for EnglishMessages {
    fn sgf_start(&self) -> String {
        "Game reviewed move by move. Comments and marks show the engine's \
         preferred alternatives."
            .to_string()
    }

    fn generated_by(&self) -> String {
        format!("SGF with review generated by {}.", crate::NAME)
    }

    fn komi(&self, komi: f64) -> String {
        format!("Komi: {komi:.1}")
    }

    fn ruleset(&self, ruleset: &str) -> String {
        format!("Ruleset: {ruleset}")
    }

    fn move_header(&self, number: u32, player: Player, gtp: &str) -> String {
        format!("Move {number}: {player} {gtp}")
    }

    fn score(&self, score: &str) -> String {
        format!("Score: {score}")
    }

    fn winrate(&self, winrate: &str) -> String {
        format!("Win rate: {winrate}")
    }

    fn point_loss(&self, points_lost: f64) -> String {
        format!("Estimated point loss: {points_lost:.1}")
    }

    fn top_move(&self, top_move: &str, score: &str) -> String {
        format!("Predicted top move was {top_move} ({score}).")
    }

    fn best_move(&self) -> String {
        "Move was predicted best move.".to_string()
    }

    fn pv(&self, player: Player, pv: &str) -> String {
        format!("PV: {player}{pv}")
    }

    fn policy_rank(&self, rank: usize, probability: f32) -> String {
        format!(
            "Move was #{rank} according to policy ({:.2}%).",
            probability * 100.0
        )
    }

    fn policy_best(&self, best_move: &str, probability: f32) -> String {
        format!(
            "Top policy move was {best_move} ({:.2}%).",
            probability * 100.0
        )
    }

    fn teaching_undo(&self) -> String {
        "Move was automatically undone in teaching mode.".to_string()
    }

    fn undo_predicted_pv(&self, player: Player, pv: &str) -> String {
        format!("Predicted continuation: {player}{pv}")
    }

    fn ai_thoughts(&self, thoughts: &str) -> String {
        format!("AI thought process: {thoughts}")
    }

    fn no_analysis(&self) -> String {
        "No analysis available.".to_string()
    }

    fn analyzing(&self) -> String {
        "Analyzing move...".to_string()
    }

    fn sgf_comments_header(&self) -> String {
        "SGF Comments:".to_string()
    }

    fn note(&self, note: &str) -> String {
        format!("Note: {note}")
    }
}
