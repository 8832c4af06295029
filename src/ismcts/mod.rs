//! # Interval ISMCTS
//!
//! Information-set Monte Carlo tree search with interval-valued estimates.
//! A [`Tree`] is grown one visit at a time. Each visit walks a single path,
//! expanding lazily, and on the way back every node rebuilds its value interval
//! from its children so that it stays valid under small errors in the model's
//! probabilities.

pub mod node;
pub mod action;
pub mod sampling;
pub mod tree;

pub use action::{ActionNode, Puct};
pub use node::{Edge, Node, NodeCore};
pub use sampling::SamplingNode;
pub use tree::Tree;
