//! # Go Review Library
//!
//! A game-tree core for reviewing and teaching two-player Go, driven by an
//! external analysis engine (KataGo-style JSON results).
//!
//! ## Features
//!
//! - **Game Tree**: Arena-based tree of moves and variations with per-node
//!   SGF properties
//! - **Analysis Merging**: Out-of-order, duplicate and partial engine
//!   deliveries merged without ever regressing to lower-quality data
//! - **Derived Metrics**: Score, win probability, per-move point loss and
//!   policy-based move ranking for teaching logic
//! - **Annotation Export**: Review marks and comments as SGF properties
//!
//! ## Usage
//!
//! ```rust
//! use go_review::game::{GameTree, Move, Player, Vertex};
//!
//! let mut tree = GameTree::new((19, 19), 6.5);
//! let root = tree.root();
//! let d4 = Vertex::from_gtp("D4").unwrap();
//! let node = tree.play(root, Move::new(Player::Black, d4)).unwrap();
//! assert!(tree.node(node).unwrap().parent() == Some(root));
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Game tree, nodes, players and board coordinates
pub mod game;

/// Engine analysis payloads, the merge store and derived metrics
pub mod analysis;

/// Boundary to the external analysis engine
pub mod engine;

/// SGF annotation export (marks and review comments)
pub mod export;

/// Logging setup
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

/// Game tree and coordinate types
pub use game::{AutoUndo, GameNode, GameTree, Move, NodeId, Player, Vertex};

/// Analysis store and payload types
pub use analysis::{AnalysisPayload, AnalysisStore, Candidate, MoveAnalysis, Rank, RootAnalysis};

/// Engine boundary types
pub use engine::{AnalysisEngine, AnalysisRequest, AnalysisUpdate};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the Go review library
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("cannot prune the root node")]
    PruneRoot,

    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("analysis payload error: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("engine error: {0}")]
    Engine(String),

    #[error("logging setup error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ReviewError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
