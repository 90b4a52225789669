pub mod metrics;
pub mod payload;
pub mod store;

pub use metrics::Candidate;
pub use payload::{AnalysisPayload, MoveInfo, RootInfo};
pub use store::{AnalysisStore, MoveAnalysis, Rank, RootAnalysis};
