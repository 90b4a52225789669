//! The game-tree arena and the analysis-merge entry point.
//!
//! Nodes live in a map keyed by stable ids; parent links are plain ids, so
//! cross-node updates (the parent back-propagation after a merge) never
//! fight the borrow checker or create ownership cycles.

use std::collections::HashMap;
use std::fmt;

use crate::analysis::metrics::{self, Candidate};
use crate::analysis::payload::AnalysisPayload;
use crate::analysis::store::{MoveAnalysis, ALTERNATIVES_RANK_OFFSET};
use crate::game::node::GameNode;
use crate::game::vertex::{Move, Vertex};
use crate::{ReviewError, Result};

/// Stable identifier of a node in the tree arena.
///
/// Ids are never reused, so a stale id held across a prune resolves to
/// "unknown node" instead of aliasing a different node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The authoritative game tree: moves, branches and per-node analysis.
#[derive(Debug)]
pub struct GameTree {
    nodes: HashMap<NodeId, GameNode>,
    root: NodeId,
    next_id: u64,
    board_size: (u8, u8),
    komi: f64,
}

impl GameTree {
    pub fn new(board_size: (u8, u8), komi: f64) -> GameTree {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, GameNode::new(None, None, 0));
        GameTree {
            nodes,
            root,
            next_id: 1,
            board_size,
            komi,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn board_size(&self) -> (u8, u8) {
        self.board_size
    }

    pub fn komi(&self) -> f64 {
        self.komi
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&GameNode> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut GameNode> {
        self.nodes.get_mut(&id)
    }

    fn require(&self, id: NodeId) -> Result<&GameNode> {
        self.nodes.get(&id).ok_or(ReviewError::UnknownNode(id))
    }

    fn require_mut(&mut self, id: NodeId) -> Result<&mut GameNode> {
        self.nodes.get_mut(&id).ok_or(ReviewError::UnknownNode(id))
    }

    /// Plays a move from `parent`. Returns the existing child when the same
    /// move was already played there (re-entering a known variation), else
    /// creates a new branch.
    pub fn play(&mut self, parent: NodeId, mv: Move) -> Result<NodeId> {
        let parent_node = self.require(parent)?;
        for &child_id in &parent_node.children {
            if let Some(child) = self.nodes.get(&child_id) {
                if child.mv == Some(mv) {
                    return Ok(child_id);
                }
            }
        }
        let move_number = parent_node.move_number + 1;
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, GameNode::new(Some(parent), Some(mv), move_number));
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }
        Ok(id)
    }

    /// Removes a node and its whole subtree. Siblings are untouched; the
    /// root cannot be pruned.
    pub fn prune(&mut self, id: NodeId) -> Result<()> {
        let node = self.require(id)?;
        let Some(parent) = node.parent else {
            return Err(ReviewError::PruneRoot);
        };
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.retain(|&child| child != id);
        }
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(removed) = self.nodes.remove(&current) {
                pending.extend(removed.children);
            }
        }
        Ok(())
    }

    /// Sibling ids ordered for display: kept branches first, undecided in
    /// the middle, undone (confirmed-mistake) branches last. Stable within
    /// each class.
    pub fn order_children(&self, children: &[NodeId]) -> Vec<NodeId> {
        let mut ordered = children.to_vec();
        ordered.sort_by(|&a, &b| {
            let weight = |id: NodeId| {
                self.nodes
                    .get(&id)
                    .map(|n| n.auto_undo.ordering_weight())
                    .unwrap_or(0.5)
            };
            weight(a)
                .partial_cmp(&weight(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ordered
    }

    // ------------------------------------------------------------------
    // Analysis merging
    // ------------------------------------------------------------------

    /// Merges one engine delivery into the node's analysis.
    ///
    /// - `refine_move` present: the delivered root stats stand for that
    ///   single move (refining one branch); only that entry is touched.
    /// - `alternatives_mode`: supplementary candidates, rank-penalized so
    ///   they never outrank a primary analysis; aggregate stats untouched.
    /// - otherwise: a primary full analysis, authoritative for aggregate
    ///   stats, ownership and policy; all pre-existing entries go stale.
    ///
    /// After a primary or alternatives merge on a non-root node, the node's
    /// aggregate stats are propagated into the parent's entry for this
    /// node's move, so the parent's candidate list reflects the deepest
    /// available read on each line.
    ///
    /// Safe under any interleaving of deliveries; see
    /// [`AnalysisStore::update_move`](crate::analysis::store::AnalysisStore::update_move).
    pub fn merge_analysis(
        &mut self,
        id: NodeId,
        payload: &AnalysisPayload,
        refine_move: Option<Vertex>,
        alternatives_mode: bool,
    ) -> Result<()> {
        let node = self.require_mut(id)?;

        if let Some(refine) = refine_move {
            let mut pv = vec![refine];
            if let Some(first) = payload.move_infos.first() {
                pv.extend(first.pv.iter().copied());
            }
            node.analysis
                .update_move(MoveAnalysis::from_root(&payload.root_info, refine, pv));
            log::debug!(
                "node {}: refined move {} at {} visits",
                id,
                refine,
                payload.root_info.visits
            );
            return Ok(());
        }

        if !alternatives_mode {
            // Old entries to the end; only this delivery carries real ranks.
            node.analysis.mark_all_stale();
        }
        for info in &payload.move_infos {
            let mut record = MoveAnalysis::from(info);
            if alternatives_mode {
                record.rank = record.rank.offset(ALTERNATIVES_RANK_OFFSET);
            }
            node.analysis.update_move(record);
        }
        node.ownership = payload.ownership.clone();
        node.policy = payload.policy.clone();
        if !alternatives_mode {
            node.analysis.root = Some((&payload.root_info).into());
        }
        log::debug!(
            "node {}: merged {} delivery ({} moves, {} visits)",
            id,
            if alternatives_mode { "alternatives" } else { "primary" },
            payload.move_infos.len(),
            payload.root_info.visits
        );

        // Update the entry for this node's move in the parent, so the
        // parent's candidate list carries the deeper read of this line.
        let back_link = match (node.parent, node.mv) {
            (Some(parent), Some(mv)) => Some((parent, mv)),
            _ => None,
        };
        if let Some((parent, mv)) = back_link {
            let mut pv = vec![mv.vertex];
            if let Some(first) = payload.move_infos.first() {
                pv.extend(first.pv.iter().copied());
            }
            let record = MoveAnalysis::from_root(&payload.root_info, mv.vertex, pv);
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.analysis.update_move(record);
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Derived metrics needing tree context
    // ------------------------------------------------------------------

    /// Points the mover gave up relative to the parent's evaluation.
    /// Needs the node's move and both evaluations; `None` otherwise.
    pub fn points_lost(&self, id: NodeId) -> Option<f64> {
        let node = self.nodes.get(&id)?;
        let mv = node.mv?;
        let parent = self.nodes.get(&node.parent?)?;
        Some(metrics::point_loss(mv.player, parent.score()?, node.score()?))
    }

    /// Two-ply drift: how much of the position change since the mover's
    /// previous turn was realized by this move. Defined only when the node,
    /// its parent and its grandparent are all analysis-ready.
    pub fn parent_realized_points_lost(&self, id: NodeId) -> Option<f64> {
        let node = self.nodes.get(&id)?;
        let mv = node.mv?;
        let parent = self.nodes.get(&node.parent?)?;
        let grandparent = self.nodes.get(&parent.parent?)?;
        if !parent.analysis_ready() {
            return None;
        }
        Some(mv.player.sign() * (node.score()? - grandparent.score()?))
    }

    /// Candidate moves at this node, best first; see
    /// [`metrics::candidates`].
    pub fn candidate_moves(&self, id: NodeId) -> Vec<Candidate> {
        let Some(node) = self.nodes.get(&id) else {
            return Vec::new();
        };
        metrics::candidates(
            &node.analysis,
            node.next_player(),
            node.policy.as_deref(),
            self.board_size,
        )
    }

    /// Policy ranking at this node, best first, when policy data exists.
    pub fn policy_ranking(&self, id: NodeId) -> Option<Vec<(f32, Vertex)>> {
        let node = self.nodes.get(&id)?;
        let policy = node.policy.as_deref()?;
        Some(metrics::policy_ranking(policy, self.board_size))
    }

    /// 1-based policy rank and probability of this node's move in the
    /// parent's ranking; `None` when the parent has no policy data or the
    /// move is not found.
    pub fn move_policy_stats(&self, id: NodeId) -> Option<(usize, f32)> {
        let node = self.nodes.get(&id)?;
        let mv = node.mv?;
        let ranking = self.policy_ranking(node.parent?)?;
        ranking
            .iter()
            .position(|&(_, vertex)| vertex == mv.vertex)
            .map(|ix| (ix + 1, ranking[ix].0))
    }
}
