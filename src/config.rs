//! Search configuration parameters.

use crate::utils::*;

/// Configuration shared by every tree in a [`crate::session::Session`].
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// How far each oracle probability may be off when bounding mixture values.
    /// 0.0 collapses every value interval to a point.
    pub eps: Probability,

    /// Exploration constant in the PUCT bonus.
    pub c_puct: f64,

    /// Slack when deciding whether a child's score interval still overlaps the best one.
    pub tie_tolerance: f64,

    /// Masked hidden mass below this falls back to the uniform distribution over the mask.
    pub mass_floor: Probability,

    /// Evaluate freshly created children immediately instead of on their first visit.
    /// More model calls, less noisy early bootstrap values.
    pub eager_eval: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            eps: EPS,
            c_puct: C_PUCT,
            tie_tolerance: TIE_TOLERANCE,
            mass_floor: MASS_FLOOR,
            eager_eval: EAGER_EVAL,
        }
    }
}

impl SearchConfig {
    /// Lazy child evaluation, so tests can count model calls per visit.
    pub fn for_testing() -> Self {
        Self::default().with_eager_eval(false)
    }

    pub fn with_eps(mut self, eps: Probability) -> Self {
        self.eps = eps;
        self
    }

    pub fn with_c_puct(mut self, c: f64) -> Self {
        self.c_puct = c;
        self
    }

    pub fn with_eager_eval(mut self, eager: bool) -> Self {
        self.eager_eval = eager;
        self
    }
}
