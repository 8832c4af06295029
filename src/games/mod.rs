//! # Game Implementations
//!
//! Information sets the engine can be run against:
//! - **Kuhn poker**: three cards, one private card per player, a single betting round

pub mod kuhn;
