//! Error types for the search engine.
//!
//! Only recoverable boundary failures live here. Broken internal invariants
//! (an empty hidden mask, a tie candidate with no prior mass) panic instead.

use thiserror::Error;

/// Failures reported by a [`crate::model::Model`] implementation.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors surfaced by a search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid oracle output: {0}")]
    InvalidOracleOutput(String),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Sampling failed: {0}")]
    Sampling(#[from] rand::distr::weighted::Error),
}
