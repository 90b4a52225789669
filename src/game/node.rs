//! A single node of the review tree: one move (or the empty root), its
//! persisted SGF properties and its merged engine analysis.

use std::collections::HashMap;

use crate::analysis::store::AnalysisStore;
use crate::game::player::Player;
use crate::game::tree::NodeId;
use crate::game::vertex::Move;

/// Tri-state teaching marker: was this move flagged as a mistake and
/// retracted by teaching logic?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoUndo {
    /// Not judged yet (analysis pending or teaching disabled).
    #[default]
    Unknown,
    /// Judged and kept: not a mistake.
    Kept,
    /// Judged a mistake and retracted.
    Undone,
}

impl AutoUndo {
    /// Display/traversal weight: kept branches first, undecided in the
    /// middle, confirmed mistakes last.
    pub fn ordering_weight(self) -> f64 {
        match self {
            AutoUndo::Kept => 0.0,
            AutoUndo::Unknown => 0.5,
            AutoUndo::Undone => 1.0,
        }
    }
}

/// One game-tree node.
///
/// The node exclusively owns its properties, analysis, ownership map and
/// policy; parent/child links are navigational ids held by the tree arena.
#[derive(Debug, Clone)]
pub struct GameNode {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// The move that created this node; `None` for the root.
    pub mv: Option<Move>,
    /// Persisted SGF properties, key to ordered value sequence.
    pub properties: HashMap<String, Vec<String>>,
    /// Merged engine analysis; mutated only through the tree's merge.
    pub analysis: AnalysisStore,
    /// Per-point ownership estimate from the latest full analysis.
    pub ownership: Option<Vec<f32>>,
    /// Flat move-probability distribution (all points plus one pass slot).
    pub policy: Option<Vec<f32>>,
    pub auto_undo: AutoUndo,
    pub ai_thoughts: String,
    pub note: String,
    pub move_number: u32,
    pub time_used: f64,
    /// Hint counter of visits asked from the engine; not a cancellation
    /// token.
    pub analysis_visits_requested: u32,
    undo_threshold: f64,
}

impl GameNode {
    pub(crate) fn new(parent: Option<NodeId>, mv: Option<Move>, move_number: u32) -> GameNode {
        GameNode {
            parent,
            children: Vec::new(),
            mv,
            properties: HashMap::new(),
            analysis: AnalysisStore::new(),
            ownership: None,
            policy: None,
            auto_undo: AutoUndo::Unknown,
            ai_thoughts: String::new(),
            note: String::new(),
            move_number,
            time_used: 0.0,
            analysis_visits_requested: 0,
            undo_threshold: rand::random::<f64>(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// The player who made this node's move, if any.
    pub fn player(&self) -> Option<Player> {
        self.mv.map(|m| m.player)
    }

    /// The player to move at this position.
    pub fn next_player(&self) -> Player {
        match self.mv {
            Some(m) => m.player.opponent(),
            None => Player::Black,
        }
    }

    /// Drawn once per node, uniform in [0, 1); used by teaching logic for
    /// fractional undo decisions. Immutable for the node's lifetime.
    pub fn undo_threshold(&self) -> f64 {
        self.undo_threshold
    }

    /// A node is analysis-ready once the first engine delivery arrived.
    pub fn analysis_ready(&self) -> bool {
        self.analysis.ready()
    }

    /// Signed score lead (positive favors Black), if analysis-ready.
    pub fn score(&self) -> Option<f64> {
        self.analysis.root.as_ref().map(|root| root.score_lead)
    }

    /// Black's win probability, if analysis-ready.
    pub fn winrate(&self) -> Option<f64> {
        self.analysis.root.as_ref().map(|root| root.winrate)
    }

    /// Renders a score as "B+3.5" / "W+0.5".
    pub fn format_score(score: f64) -> String {
        let leader = if score >= 0.0 { "B" } else { "W" };
        format!("{}+{:.1}", leader, score.abs())
    }

    /// Renders a win probability as "B 54.0%" / "W 61.2%".
    pub fn format_winrate(winrate: f64) -> String {
        let leader = if winrate > 0.5 { "B" } else { "W" };
        format!("{} {:.1}%", leader, winrate.max(1.0 - winrate) * 100.0)
    }

    pub fn get_property(&self, key: &str) -> Option<&[String]> {
        self.properties.get(key).map(Vec::as_slice)
    }

    pub fn set_property(&mut self, key: &str, values: Vec<String>) {
        self.properties.insert(key.to_string(), values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::vertex::Vertex;

    #[test]
    fn test_fresh_node_is_not_ready() {
        let node = GameNode::new(None, None, 0);
        assert!(!node.analysis_ready());
        assert!(node.score().is_none());
        assert!(node.winrate().is_none());
        assert!(node.is_root());
        assert_eq!(node.auto_undo, AutoUndo::Unknown);
    }

    #[test]
    fn test_undo_threshold_in_unit_interval() {
        for _ in 0..100 {
            let node = GameNode::new(None, None, 0);
            let t = node.undo_threshold();
            assert!((0.0..1.0).contains(&t));
        }
    }

    #[test]
    fn test_next_player_alternates() {
        let root = GameNode::new(None, None, 0);
        assert_eq!(root.next_player(), Player::Black);

        let mv = Move::new(Player::Black, Vertex::point(3, 3));
        let child = GameNode::new(Some(NodeId(0)), Some(mv), 1);
        assert_eq!(child.next_player(), Player::White);
        assert_eq!(child.player(), Some(Player::Black));
    }

    #[test]
    fn test_score_formatting() {
        assert_eq!(GameNode::format_score(3.45), "B+3.5");
        assert_eq!(GameNode::format_score(-0.51), "W+0.5");
        assert_eq!(GameNode::format_score(0.0), "B+0.0");
        assert_eq!(GameNode::format_winrate(0.54), "B 54.0%");
        assert_eq!(GameNode::format_winrate(0.388), "W 61.2%");
    }

    #[test]
    fn test_auto_undo_weights() {
        assert_eq!(AutoUndo::Kept.ordering_weight(), 0.0);
        assert_eq!(AutoUndo::Unknown.ordering_weight(), 0.5);
        assert_eq!(AutoUndo::Undone.ordering_weight(), 1.0);
    }
}
