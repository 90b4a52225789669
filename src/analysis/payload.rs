//! Wire types for results delivered by the analysis engine.
//!
//! Field names follow the engine's JSON (camelCase); vertices travel as GTP
//! strings. A delivery may be partial: `moveInfos` can be empty and
//! `ownership`/`policy` absent, and the merge layer must cope.

use serde::{Deserialize, Serialize};

use crate::game::vertex::Vertex;
use crate::Result;

/// Aggregate statistics for the analyzed position itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootInfo {
    pub visits: u32,
    pub winrate: f64,
    pub score_lead: f64,
    #[serde(default)]
    pub pv: Vec<Vertex>,
}

/// Statistics for one candidate move at the analyzed position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveInfo {
    #[serde(rename = "move")]
    pub vertex: Vertex,
    pub order: u32,
    pub visits: u32,
    pub winrate: f64,
    pub score_lead: f64,
    #[serde(default)]
    pub pv: Vec<Vertex>,
}

/// One full engine delivery for a position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    pub root_info: RootInfo,
    #[serde(default)]
    pub move_infos: Vec<MoveInfo>,
    /// Per-point ownership estimate, board-sized, Black-positive.
    #[serde(default)]
    pub ownership: Option<Vec<f32>>,
    /// Flat move-probability distribution over all points plus one pass slot.
    #[serde(default)]
    pub policy: Option<Vec<f32>>,
}

impl AnalysisPayload {
    /// Decodes a raw engine response line.
    pub fn from_json(text: &str) -> Result<AnalysisPayload> {
        Ok(serde_json::from_str(text)?)
    }
}
