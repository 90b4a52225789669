//! Annotation export: turns merged analysis plus free-text notes into
//! persisted SGF properties — square marks for good alternatives, a
//! triangle mark for the predicted best move, and a review comment.
//!
//! Existing persisted marks and comments are preserved; new content is
//! appended, never replacing prior text.

pub mod messages;

use std::collections::HashMap;

use crate::game::node::{AutoUndo, GameNode};
use crate::game::player::Player;
use crate::game::tree::{GameTree, NodeId};

pub use messages::{EnglishMessages, Messages};

/// Maximum point loss for a parent candidate to count as a "good
/// alternative" worth marking.
const GOOD_ALTERNATIVE_MAX_LOSS: f64 = 0.5;

/// Controls which moves receive evaluation comments on export.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Players whose moves are eligible for evaluation comments.
    pub save_comments_for: Vec<Player>,
    /// Point-loss class thresholds, descending (e.g. 4.0, 2.0, 1.0, 0.5).
    pub eval_thresholds: Vec<f64>,
    /// Per-class opt-in, indexed like `eval_thresholds`.
    pub save_comments_class: Vec<bool>,
}

/// Which flavor of comment to build.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentOptions {
    /// Export-grade comment (full detail, for persisted SGF).
    pub sgf: bool,
    /// Teaching context: include policy-rank feedback.
    pub teach: bool,
    /// On-screen detail view.
    pub details: bool,
}

impl CommentOptions {
    pub fn sgf() -> CommentOptions {
        CommentOptions {
            sgf: true,
            ..Default::default()
        }
    }
}

/// Maps a point loss to its evaluation class given descending thresholds:
/// the first class whose threshold the loss reaches, else the mildest one.
pub fn evaluation_class(points_lost: f64, thresholds: &[f64]) -> usize {
    let mut class = 0;
    while class + 1 < thresholds.len() && points_lost < thresholds[class] {
        class += 1;
    }
    class
}

/// Builds the human-readable review comment for a node.
pub fn comment(
    tree: &GameTree,
    id: NodeId,
    messages: &dyn Messages,
    opts: CommentOptions,
) -> String {
    let Some(node) = tree.node(id) else {
        return String::new();
    };
    let Some(mv) = node.mv else {
        // Root node: game header only.
        let ruleset = node
            .get_property("RU")
            .and_then(|values| values.first().cloned())
            .unwrap_or_else(|| "Japanese".to_string());
        return format!(
            "{}\n{}\n",
            messages.komi(tree.komi()),
            messages.ruleset(&ruleset)
        );
    };

    let mut text = format!(
        "{}\n",
        messages.move_header(node.move_number, mv.player, &mv.gtp())
    );
    if node.analysis_ready() {
        if opts.sgf {
            if let Some(score) = node.score() {
                text += &format!("{}\n", messages.score(&GameNode::format_score(score)));
            }
            if let Some(winrate) = node.winrate() {
                text += &format!("{}\n", messages.winrate(&GameNode::format_winrate(winrate)));
            }
        }
        let parent_id = node.parent();
        let parent_ready = parent_id
            .and_then(|p| tree.node(p))
            .is_some_and(|p| p.analysis_ready());
        if let (Some(parent_id), true) = (parent_id, parent_ready) {
            let parent_candidates = tree.candidate_moves(parent_id);
            if let Some(previous_top) = parent_candidates.first() {
                if opts.sgf || opts.details {
                    if previous_top.vertex != mv.vertex {
                        if opts.sgf {
                            if let Some(points_lost) = tree.points_lost(id) {
                                if points_lost > 0.5 {
                                    text += &format!("{}\n", messages.point_loss(points_lost));
                                }
                            }
                        }
                        text += &format!(
                            "{}\n",
                            messages.top_move(
                                &previous_top.vertex.gtp(),
                                &GameNode::format_score(previous_top.score_lead),
                            )
                        );
                    } else {
                        text += &format!("{}\n", messages.best_move());
                    }
                    if !previous_top.pv.is_empty() {
                        text += &format!(
                            "{}\n",
                            messages.pv(mv.player, &join_pv(&previous_top.pv))
                        );
                    }
                }
                if opts.sgf || opts.details || opts.teach {
                    let stats = tree.move_policy_stats(id);
                    if let Some((rank, probability)) = stats {
                        text += &format!("{}\n", messages.policy_rank(rank, probability));
                    }
                    let show_best = match stats {
                        None => opts.sgf || opts.details,
                        Some((rank, _)) => rank != 1 && (opts.sgf || opts.details),
                    };
                    if show_best {
                        if let Some(ranking) = tree.policy_ranking(parent_id) {
                            if let Some(&(probability, vertex)) = ranking.first() {
                                text += &format!(
                                    "{}\n",
                                    messages.policy_best(&vertex.gtp(), probability)
                                );
                            }
                        }
                    }
                }
            }
        }
        if node.auto_undo == AutoUndo::Undone && opts.sgf {
            text += &format!("{}\n", messages.teaching_undo());
            if let Some(own_top) = tree.candidate_moves(id).first() {
                if !own_top.pv.is_empty() {
                    text += &format!(
                        "{}\n",
                        messages.undo_predicted_pv(node.next_player(), &join_pv(&own_top.pv))
                    );
                }
            }
        }
        if !node.ai_thoughts.is_empty() && (opts.sgf || opts.details) {
            text += &format!("\n{}", messages.ai_thoughts(&node.ai_thoughts));
        }
    } else {
        text = if opts.sgf {
            messages.no_analysis()
        } else {
            messages.analyzing()
        };
    }

    if let Some(comments) = node.get_property("C") {
        text += &format!(
            "\n{}\n{}",
            messages.sgf_comments_header(),
            comments.join("\n")
        );
    }
    text
}

/// Produces the persisted SGF properties for a node: prior properties plus
/// review marks and the appended comment, per the export options.
pub fn sgf_properties(
    tree: &GameTree,
    id: NodeId,
    messages: &dyn Messages,
    options: &ExportOptions,
) -> HashMap<String, Vec<String>> {
    let Some(node) = tree.node(id) else {
        return HashMap::new();
    };
    let mut properties = node.properties.clone();
    let note = node.note.trim().to_string();

    let show_class = match tree.points_lost(id) {
        Some(points_lost) if !options.eval_thresholds.is_empty() => options
            .save_comments_class
            .get(evaluation_class(points_lost, &options.eval_thresholds))
            .copied()
            .unwrap_or(false),
        _ => false,
    };
    let parent_id = node.parent();
    let parent_ready = parent_id
        .and_then(|p| tree.node(p))
        .is_some_and(|p| p.analysis_ready());
    let player_opted = node
        .player()
        .is_some_and(|p| options.save_comments_for.contains(&p));

    if let Some(parent_id) = parent_id {
        if parent_ready && node.analysis_ready() && (!note.is_empty() || (player_opted && show_class))
        {
            let candidates = tree.candidate_moves(parent_id);
            if let Some(top) = candidates.first() {
                let good_alternatives: Vec<String> = candidates[1..]
                    .iter()
                    .filter(|c| c.points_lost <= GOOD_ALTERNATIVE_MAX_LOSS)
                    .map(|c| c.vertex.sgf(tree.board_size()))
                    .filter(|sgf| !sgf.is_empty())
                    .collect();
                if !good_alternatives.is_empty() && !properties.contains_key("SQ") {
                    properties.insert("SQ".to_string(), good_alternatives);
                }
                let top_sgf = top.vertex.sgf(tree.board_size());
                if !top_sgf.is_empty() && !properties.contains_key("MA") {
                    properties.insert("MA".to_string(), vec![top_sgf]);
                }
            }
            let comment_text = comment(tree, id, messages, CommentOptions::sgf());
            if !comment_text.is_empty() {
                let previous = joined_comment(&properties);
                properties.insert("C".to_string(), vec![previous + &comment_text]);
            }
        }
    }

    if node.is_root() {
        let previous = joined_comment(&properties);
        properties.insert(
            "C".to_string(),
            vec![format!(
                "{}\n{}\n{}",
                messages.sgf_start(),
                previous,
                messages.generated_by()
            )],
        );
    }
    if !note.is_empty() {
        let previous = joined_comment(&properties);
        properties.insert(
            "C".to_string(),
            vec![format!("{}\n{}", previous, messages.note(&note))],
        );
    }
    properties
}

fn join_pv(pv: &[crate::game::vertex::Vertex]) -> String {
    pv.iter()
        .map(|v| v.gtp())
        .collect::<Vec<_>>()
        .join(" ")
}

fn joined_comment(properties: &HashMap<String, Vec<String>>) -> String {
    properties
        .get("C")
        .map(|values| values.join("\n"))
        .unwrap_or_default()
}
