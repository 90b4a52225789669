//! Per-node analysis state and the merge rules that keep it consistent
//! under out-of-order, duplicate or partial engine deliveries.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::analysis::payload::{MoveInfo, RootInfo};
use crate::game::vertex::Vertex;

/// Rank offset applied to alternatives-mode candidates so that supplementary
/// suggestions never outrank a primary full analysis.
pub const ALTERNATIVES_RANK_OFFSET: u32 = 10;

/// Rank of a candidate move; lower is better.
///
/// `Stale` marks entries left over from an earlier analysis pass or
/// synthesized from aggregate stats. The engine wire encodes it as 999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Ranked(u32),
    Stale,
}

impl Rank {
    const STALE_WIRE: u32 = 999;

    pub fn from_wire(order: u32) -> Rank {
        if order >= Self::STALE_WIRE {
            Rank::Stale
        } else {
            Rank::Ranked(order)
        }
    }

    pub fn as_wire(self) -> u32 {
        match self {
            Rank::Ranked(order) => order,
            Rank::Stale => Self::STALE_WIRE,
        }
    }

    /// Demotes a ranked entry by a fixed penalty; stale stays stale.
    pub fn offset(self, penalty: u32) -> Rank {
        match self {
            Rank::Ranked(order) => Rank::from_wire(order.saturating_add(penalty)),
            Rank::Stale => Rank::Stale,
        }
    }
}

/// Aggregate engine statistics for a position.
#[derive(Debug, Clone, PartialEq)]
pub struct RootAnalysis {
    pub visits: u32,
    pub winrate: f64,
    pub score_lead: f64,
    pub pv: Vec<Vertex>,
}

impl From<&RootInfo> for RootAnalysis {
    fn from(info: &RootInfo) -> RootAnalysis {
        RootAnalysis {
            visits: info.visits,
            winrate: info.winrate,
            score_lead: info.score_lead,
            pv: info.pv.clone(),
        }
    }
}

/// Merged statistics for one candidate move.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveAnalysis {
    pub vertex: Vertex,
    pub rank: Rank,
    pub visits: u32,
    pub winrate: f64,
    pub score_lead: f64,
    pub pv: Vec<Vertex>,
}

impl MoveAnalysis {
    /// A record synthesized from aggregate stats (used for single-branch
    /// refinement and parent back-propagation). Carries no rank of its own.
    pub fn from_root(info: &RootInfo, vertex: Vertex, pv: Vec<Vertex>) -> MoveAnalysis {
        MoveAnalysis {
            vertex,
            rank: Rank::Stale,
            visits: info.visits,
            winrate: info.winrate,
            score_lead: info.score_lead,
            pv,
        }
    }
}

impl From<&MoveInfo> for MoveAnalysis {
    fn from(info: &MoveInfo) -> MoveAnalysis {
        MoveAnalysis {
            vertex: info.vertex,
            rank: Rank::from_wire(info.order),
            visits: info.visits,
            winrate: info.winrate,
            score_lead: info.score_lead,
            pv: info.pv.clone(),
        }
    }
}

/// Per-node analysis record: aggregate stats plus one entry per candidate
/// move, keyed by vertex. Mutated only through the merge operations.
#[derive(Debug, Clone, Default)]
pub struct AnalysisStore {
    pub root: Option<RootAnalysis>,
    pub moves: HashMap<Vertex, MoveAnalysis>,
}

impl AnalysisStore {
    pub fn new() -> AnalysisStore {
        AnalysisStore::default()
    }

    /// A node is analysis-ready once the first aggregate stats arrived.
    pub fn ready(&self) -> bool {
        self.root.is_some()
    }

    /// The per-move merge rule. Idempotent under duplicate delivery and
    /// safe under re-ordered delivery:
    /// - a new vertex is inserted as delivered,
    /// - an existing entry keeps the better (minimum) rank,
    /// - its remaining fields are replaced only by a strictly
    ///   higher-visit-count delivery.
    pub fn update_move(&mut self, incoming: MoveAnalysis) {
        match self.moves.entry(incoming.vertex) {
            Entry::Vacant(slot) => {
                slot.insert(incoming);
            }
            Entry::Occupied(mut slot) => {
                let current = slot.get_mut();
                current.rank = current.rank.min(incoming.rank);
                if incoming.visits > current.visits {
                    current.visits = incoming.visits;
                    current.winrate = incoming.winrate;
                    current.score_lead = incoming.score_lead;
                    current.pv = incoming.pv;
                }
            }
        }
    }

    /// Demotes every stored entry to `Stale` ahead of a primary full
    /// analysis, so only freshly delivered candidates carry a real rank.
    pub fn mark_all_stale(&mut self) {
        for entry in self.moves.values_mut() {
            entry.rank = Rank::Stale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(vertex: Vertex, rank: Rank, visits: u32, score_lead: f64) -> MoveAnalysis {
        MoveAnalysis {
            vertex,
            rank,
            visits,
            winrate: 0.5,
            score_lead,
            pv: vec![vertex],
        }
    }

    #[test]
    fn test_rank_ordering() {
        assert!(Rank::Ranked(0) < Rank::Ranked(5));
        assert!(Rank::Ranked(998) < Rank::Stale);
        assert_eq!(Rank::from_wire(999), Rank::Stale);
        assert_eq!(Rank::from_wire(1200), Rank::Stale);
        assert_eq!(Rank::Stale.as_wire(), 999);
    }

    #[test]
    fn test_monotonic_visits_both_arrival_orders() {
        let d4 = Vertex::point(3, 3);
        let low = record(d4, Rank::Ranked(2), 100, 1.0);
        let high = record(d4, Rank::Ranked(5), 400, 2.5);

        let mut store = AnalysisStore::new();
        store.update_move(low.clone());
        store.update_move(high.clone());
        let merged = &store.moves[&d4];
        assert_eq!(merged.visits, 400);
        assert_eq!(merged.score_lead, 2.5);
        assert_eq!(merged.rank, Rank::Ranked(2)); // min of the two

        let mut store = AnalysisStore::new();
        store.update_move(high);
        store.update_move(low);
        let merged = &store.moves[&d4];
        assert_eq!(merged.visits, 400);
        assert_eq!(merged.score_lead, 2.5);
        assert_eq!(merged.rank, Rank::Ranked(2));
    }

    #[test]
    fn test_duplicate_delivery_is_idempotent() {
        let d4 = Vertex::point(3, 3);
        let mut store = AnalysisStore::new();
        store.update_move(record(d4, Rank::Ranked(0), 100, 1.0));
        let before = store.moves[&d4].clone();
        store.update_move(record(d4, Rank::Ranked(0), 100, 1.0));
        assert_eq!(store.moves[&d4], before);
    }

    #[test]
    fn test_rank_never_regresses() {
        let d4 = Vertex::point(3, 3);
        let mut store = AnalysisStore::new();
        store.update_move(record(d4, Rank::Ranked(1), 100, 1.0));
        // Later, worse-ranked (and even higher-visit) deliveries must not
        // demote the stored rank.
        store.update_move(record(d4, Rank::Ranked(7), 500, 1.2));
        assert_eq!(store.moves[&d4].rank, Rank::Ranked(1));
        assert_eq!(store.moves[&d4].visits, 500);
        store.update_move(record(d4, Rank::Stale, 600, 1.3));
        assert_eq!(store.moves[&d4].rank, Rank::Ranked(1));
    }

    #[test]
    fn test_mark_all_stale() {
        let mut store = AnalysisStore::new();
        store.update_move(record(Vertex::point(3, 3), Rank::Ranked(0), 10, 0.0));
        store.update_move(record(Vertex::point(15, 15), Rank::Ranked(1), 8, 0.0));
        store.mark_all_stale();
        assert!(store.moves.values().all(|m| m.rank == Rank::Stale));
    }

    #[test]
    fn test_alternatives_offset_keeps_stale() {
        assert_eq!(
            Rank::Ranked(2).offset(ALTERNATIVES_RANK_OFFSET),
            Rank::Ranked(12)
        );
        assert_eq!(Rank::Stale.offset(ALTERNATIVES_RANK_OFFSET), Rank::Stale);
        assert_eq!(Rank::Ranked(995).offset(ALTERNATIVES_RANK_OFFSET), Rank::Stale);
    }
}
