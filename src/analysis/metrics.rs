//! Stateless computations over merged analysis: candidate-move ranking,
//! point-loss arithmetic and policy rankings.

use std::cmp::Ordering;

use crate::analysis::store::{AnalysisStore, Rank};
use crate::game::player::Player;
use crate::game::vertex::Vertex;

/// A candidate move with its derived point loss.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub vertex: Vertex,
    pub rank: Rank,
    pub visits: u32,
    pub winrate: f64,
    pub score_lead: f64,
    /// Points the mover gives up by playing this instead of the best move,
    /// under the Black-positive score convention. May be negative when the
    /// engine disagrees with itself across ply depth.
    pub points_lost: f64,
    pub pv: Vec<Vertex>,
}

/// Score difference attributable to a move, sign-adjusted per mover.
pub fn point_loss(mover: Player, reference_score: f64, own_score: f64) -> f64 {
    mover.sign() * (reference_score - own_score)
}

/// Maps the flat policy sequence to `(probability, vertex)` pairs over every
/// board point plus one pass entry, best first. Ties keep the board scan
/// order (stable sort).
pub fn policy_ranking(policy: &[f32], board_size: (u8, u8)) -> Vec<(f32, Vertex)> {
    let (size_x, size_y) = (board_size.0 as usize, board_size.1 as usize);
    let mut ranking = Vec::with_capacity(size_x * size_y + 1);
    for x in 0..size_x {
        for y in 0..size_y {
            let probability = policy.get(y * size_x + x).copied().unwrap_or(0.0);
            ranking.push((probability, Vertex::point(x as u8, y as u8)));
        }
    }
    let pass_probability = policy.last().copied().unwrap_or(0.0);
    ranking.push((pass_probability, Vertex::Pass));
    ranking.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    ranking
}

/// Candidate moves for a position, best first.
///
/// Not analysis-ready: empty. Ready with no per-move entries yet (e.g. a
/// minimal-visit search): exactly one candidate synthesized from the top
/// policy entry (a pass when no policy is known), so callers always have a
/// best guess once aggregate stats exist. Otherwise every merged entry,
/// sorted by rank with point loss as the tie-break.
pub fn candidates(
    store: &AnalysisStore,
    next_player: Player,
    policy: Option<&[f32]>,
    board_size: (u8, u8),
) -> Vec<Candidate> {
    let Some(root) = &store.root else {
        return Vec::new();
    };

    if store.moves.is_empty() {
        let top_policy_vertex = policy
            .map(|p| policy_ranking(p, board_size))
            .and_then(|ranking| ranking.first().map(|&(_, vertex)| vertex))
            .unwrap_or(Vertex::Pass);
        return vec![Candidate {
            vertex: top_policy_vertex,
            rank: Rank::Ranked(0),
            visits: root.visits,
            winrate: root.winrate,
            score_lead: root.score_lead,
            points_lost: 0.0,
            pv: vec![top_policy_vertex],
        }];
    }

    let root_score = root.score_lead;
    let mut ranked: Vec<Candidate> = store
        .moves
        .values()
        .map(|entry| Candidate {
            vertex: entry.vertex,
            rank: entry.rank,
            visits: entry.visits,
            winrate: entry.winrate,
            score_lead: entry.score_lead,
            points_lost: point_loss(next_player, root_score, entry.score_lead),
            pv: entry.pv.clone(),
        })
        .collect();
    ranked.sort_by(|a, b| {
        (a.rank, a.points_lost)
            .partial_cmp(&(b.rank, b.points_lost))
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::store::{MoveAnalysis, RootAnalysis};

    fn ready_store(score_lead: f64) -> AnalysisStore {
        AnalysisStore {
            root: Some(RootAnalysis {
                visits: 100,
                winrate: 0.55,
                score_lead,
                pv: vec![],
            }),
            moves: Default::default(),
        }
    }

    fn entry(vertex: Vertex, rank: Rank, score_lead: f64) -> MoveAnalysis {
        MoveAnalysis {
            vertex,
            rank,
            visits: 50,
            winrate: 0.5,
            score_lead,
            pv: vec![vertex],
        }
    }

    #[test]
    fn test_point_loss_signs() {
        // Black to move: parent +3.0, child +1.0 -> Black gave up 2 points.
        assert_eq!(point_loss(Player::Black, 3.0, 1.0), 2.0);
        // White to move: parent W+5, child only W+2 -> White gave up 3 points.
        assert_eq!(point_loss(Player::White, -5.0, -2.0), 3.0);
        // A move scored better than the parent eval comes out negative.
        assert_eq!(point_loss(Player::White, -2.0, -5.0), -3.0);
        assert_eq!(point_loss(Player::Black, 1.0, 2.5), -1.5);
    }

    #[test]
    fn test_not_ready_is_empty() {
        let store = AnalysisStore::new();
        assert!(candidates(&store, Player::Black, None, (19, 19)).is_empty());
    }

    #[test]
    fn test_fallback_candidate_from_policy() {
        let store = ready_store(1.5);
        // 2x2 board: policy index y * size_x + x, plus trailing pass slot.
        let policy = [0.1, 0.6, 0.2, 0.05, 0.05];
        let result = candidates(&store, Player::Black, Some(&policy), (2, 2));
        assert_eq!(result.len(), 1);
        let top = &result[0];
        assert_eq!(top.vertex, Vertex::point(1, 0)); // highest policy point
        assert_eq!(top.points_lost, 0.0);
        assert_eq!(top.rank, Rank::Ranked(0));
        assert_eq!(top.pv, vec![Vertex::point(1, 0)]);
        assert_eq!(top.visits, 100);
    }

    #[test]
    fn test_fallback_candidate_without_policy_is_pass() {
        let store = ready_store(0.0);
        let result = candidates(&store, Player::White, None, (19, 19));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].vertex, Vertex::Pass);
    }

    #[test]
    fn test_candidates_sorted_by_rank_then_loss() {
        let mut store = ready_store(2.0);
        let a = Vertex::point(0, 0);
        let b = Vertex::point(1, 1);
        let c = Vertex::point(2, 2);
        store.moves.insert(a, entry(a, Rank::Ranked(1), 1.0));
        store.moves.insert(b, entry(b, Rank::Ranked(0), 2.0));
        // Same rank as `a` but bigger loss for Black.
        store.moves.insert(c, entry(c, Rank::Ranked(1), 0.0));

        let result = candidates(&store, Player::Black, None, (19, 19));
        let order: Vec<Vertex> = result.iter().map(|c| c.vertex).collect();
        assert_eq!(order, vec![b, a, c]);
        assert_eq!(result[0].points_lost, 0.0);
        assert_eq!(result[1].points_lost, 1.0);
        assert_eq!(result[2].points_lost, 2.0);
    }

    #[test]
    fn test_policy_ranking_includes_pass_and_is_descending() {
        let policy = [0.1, 0.6, 0.2, 0.05, 0.05];
        let ranking = policy_ranking(&policy, (2, 2));
        assert_eq!(ranking.len(), 5);
        assert_eq!(ranking[0].1, Vertex::point(1, 0));
        assert!(ranking.windows(2).all(|w| w[0].0 >= w[1].0));
        assert!(ranking.iter().any(|&(p, v)| v == Vertex::Pass && p == 0.05));
    }
}
