pub mod node;
pub mod player;
pub mod tree;
pub mod vertex;

pub use node::{AutoUndo, GameNode};
pub use player::Player;
pub use tree::{GameTree, NodeId};
pub use vertex::{Move, Vertex};
