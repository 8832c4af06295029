use rand::distr::weighted::WeightedIndex;
use rand::prelude::Distribution;
use rand::Rng;

use crate::error::SearchError;

// ---------- Tune-ables ---------- //
pub const EPS: f64 = 0.05;  // How far the oracle's probabilities may be off (per component)
pub const C_PUCT: f64 = 1.0;  // Exploration weight in the PUCT bonus
pub const TIE_TOLERANCE: f64 = 1e-8;  // Slack when comparing score intervals for ties
pub const MASS_FLOOR: f64 = 1e-6;  // Below this the masked hidden distribution is replaced by uniform
pub const PROBABILITY_TOLERANCE: f64 = 1e-3;  // How far from 1.0 an oracle distribution may sum
pub const EAGER_EVAL: bool = true;  // Evaluate children with the model as soon as they are created

// ---------- Basic types (renamed for pretty) ---------- //
pub type Reward = f64;
pub type Probability = f64;
pub type PlayerId = usize;
/// Position of an action in the legal action list, or index of a hidden state
pub type ChildKey = usize;
pub type TreeId = usize;

/// Draw an index proportionally to `weights`
pub fn sample_index<R: Rng>(weights: &[Probability], rng: &mut R) -> Result<usize, SearchError> {
    let dist = WeightedIndex::new(weights)?;
    Ok(dist.sample(rng))
}
