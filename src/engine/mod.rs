//! Boundary to the external analysis engine.
//!
//! Requests are fire-and-forget: the engine answers with zero or more
//! deliveries per request (e.g. growing-visit-count partials followed by a
//! final result), pushed as [`AnalysisUpdate`] messages into an unbounded
//! channel. No ordering is assumed; the merge rules keep the tree
//! consistent under any interleaving, so the receiver side simply drains
//! the channel and applies each update.

use tokio::sync::mpsc;

use crate::analysis::payload::AnalysisPayload;
use crate::game::tree::{GameTree, NodeId};
use crate::game::vertex::Vertex;
use crate::Result;

/// One analysis request against the engine.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub node: NodeId,
    /// Scheduling hint; higher runs earlier.
    pub priority: i32,
    /// Visit budget hint; `None` leaves it to the engine's default.
    pub visits: Option<u32>,
    /// Prefer a quick low-visit answer over a deep one.
    pub analyze_fast: bool,
    /// Whether the engine may stop on its own time limit.
    pub time_limit: bool,
    /// Restrict the search to refining this single follow-up move.
    pub next_move: Option<Vertex>,
    /// Ask for supplementary candidates beside an existing full analysis.
    pub find_alternatives: bool,
}

impl AnalysisRequest {
    pub fn new(node: NodeId) -> AnalysisRequest {
        AnalysisRequest {
            node,
            priority: 0,
            visits: None,
            analyze_fast: false,
            time_limit: true,
            next_move: None,
            find_alternatives: false,
        }
    }
}

/// One asynchronous delivery from the engine, ready to merge.
#[derive(Debug, Clone)]
pub struct AnalysisUpdate {
    pub node: NodeId,
    pub payload: AnalysisPayload,
    pub refine_move: Option<Vertex>,
    pub alternatives_mode: bool,
}

pub type UpdateSender = mpsc::UnboundedSender<AnalysisUpdate>;
pub type UpdateReceiver = mpsc::UnboundedReceiver<AnalysisUpdate>;

/// Channel carrying engine deliveries back to the tree owner.
pub fn update_channel() -> (UpdateSender, UpdateReceiver) {
    mpsc::unbounded_channel()
}

/// The consumed search-engine contract. Implementations deliver results by
/// sending updates into `sink`, from any task, at any later time.
pub trait AnalysisEngine {
    fn request_analysis(&self, request: AnalysisRequest, sink: UpdateSender);
}

impl GameTree {
    /// Issues an analysis request for a node. The node only records the
    /// visit budget as a hint; deliveries arrive later through the sink's
    /// channel and are applied with [`GameTree::apply_update`].
    pub fn analyze(
        &mut self,
        engine: &dyn AnalysisEngine,
        request: AnalysisRequest,
        sink: UpdateSender,
    ) -> Result<()> {
        let node = self
            .node_mut(request.node)
            .ok_or(crate::ReviewError::UnknownNode(request.node))?;
        if let Some(visits) = request.visits {
            node.analysis_visits_requested = node.analysis_visits_requested.max(visits);
        }
        log::debug!(
            "requesting analysis for node {} (visits {:?}, fast {}, alternatives {})",
            request.node,
            request.visits,
            request.analyze_fast,
            request.find_alternatives
        );
        engine.request_analysis(request, sink);
        Ok(())
    }

    /// Applies one delivered update. Total and re-entrant-safe; each
    /// delivery is an independent merge.
    pub fn apply_update(&mut self, update: AnalysisUpdate) -> Result<()> {
        self.merge_analysis(
            update.node,
            &update.payload,
            update.refine_move,
            update.alternatives_mode,
        )
    }
}
