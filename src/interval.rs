use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::ops::{Add, Div, Mul, Sub};
use crate::utils::*;

// ---------- Interval ----------
/// Bound on an unknown value. A known value `v` is the degenerate interval `(v, v)`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Interval {
    pub lower: Reward,
    pub upper: Reward,
}

impl Interval {
    pub fn new(lower: Reward, upper: Reward) -> Self {
        debug_assert!(lower <= upper, "interval bounds out of order: ({}, {})", lower, upper);
        Interval { lower, upper }
    }
    pub fn point(v: Reward) -> Self {
        Interval { lower: v, upper: v }
    }
    pub fn width(&self) -> Reward {
        self.upper - self.lower
    }
    pub fn contains(&self, v: Reward) -> bool {
        self.lower <= v && v <= self.upper
    }
}

impl Add for Interval {
    type Output = Interval;
    fn add(self, rhs: Interval) -> Interval {
        Interval { lower: self.lower + rhs.lower, upper: self.upper + rhs.upper }
    }
}

impl Add<Reward> for Interval {
    type Output = Interval;
    fn add(self, rhs: Reward) -> Interval {
        Interval { lower: self.lower + rhs, upper: self.upper + rhs }
    }
}

impl Sub<Reward> for Interval {
    type Output = Interval;
    fn sub(self, rhs: Reward) -> Interval {
        Interval { lower: self.lower - rhs, upper: self.upper - rhs }
    }
}

/// Scaling keeps the bounds ordered only for non-negative factors
impl Mul<Reward> for Interval {
    type Output = Interval;
    fn mul(self, rhs: Reward) -> Interval {
        debug_assert!(rhs >= 0.0);
        Interval { lower: self.lower * rhs, upper: self.upper * rhs }
    }
}

impl Div<Reward> for Interval {
    type Output = Interval;
    fn div(self, rhs: Reward) -> Interval {
        debug_assert!(rhs > 0.0);
        Interval { lower: self.lower / rhs, upper: self.upper / rhs }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.3}, {:.3}]", self.lower, self.upper)
    }
}

// ---------- Simplex perturbation ----------
/// Bound the mixture `sum(probs[i] * values[i])` over every distribution that stays on the
/// probability simplex and is within `eps` of `probs` in each component.
///
/// Each weight may move inside `[max(0, p - eps), min(1, p + eps)]`. Starting every weight at
/// its floor leaves some free mass; the lower bound hands it to the lowest valued children
/// first and the upper bound to the highest valued ones. On a box intersected with the
/// simplex this greedy fill is exact.
pub fn perturb_prob_simplex(values: &[Interval], probs: &[Probability], eps: Probability) -> Interval {
    debug_assert_eq!(values.len(), probs.len());
    debug_assert!(eps >= 0.0);
    let floors: Vec<Probability> = probs.iter().map(|p| (p - eps).max(0.0)).collect();
    let ceilings: Vec<Probability> = probs.iter().map(|p| (p + eps).min(1.0)).collect();
    let free = 1.0 - floors.iter().sum::<Probability>();

    let lower_values: Vec<Reward> = values.iter().map(|v| v.lower).collect();
    let upper_values: Vec<Reward> = values.iter().map(|v| v.upper).collect();
    let lower = greedy_fill(&lower_values, &floors, &ceilings, free, |a, b| a.partial_cmp(b));
    let upper = greedy_fill(&upper_values, &floors, &ceilings, free, |a, b| b.partial_cmp(a));
    // Rounding can cross the bounds by an ulp when eps = 0
    Interval { lower: lower.min(upper), upper: upper.max(lower) }
}

/// Weighted sum with weights at their floors plus `free` mass poured in `order` up to each ceiling
fn greedy_fill<F>(values: &[Reward], floors: &[Probability], ceilings: &[Probability], mut free: Probability, order: F) -> Reward
where F: Fn(&Reward, &Reward) -> Option<Ordering> {
    let mut total: Reward = values.iter().zip(floors.iter()).map(|(v, w)| v * w).sum();
    let mut idxs: Vec<usize> = (0..values.len()).collect();
    idxs.sort_by(|&i, &j| order(&values[i], &values[j]).unwrap_or(Ordering::Equal));
    for i in idxs {
        if free <= 0.0 { break; }
        let add = (ceilings[i] - floors[i]).min(free);
        total += add * values[i];
        free -= add;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(vs: &[Reward]) -> Vec<Interval> {
        vs.iter().map(|v| Interval::point(*v)).collect()
    }

    #[test]
    fn test_zero_eps_is_point_mixture() {
        let values = points(&[1.0, -0.5, 0.25]);
        let probs = [0.2, 0.5, 0.3];
        let bound = perturb_prob_simplex(&values, &probs, 0.0);
        let mix = 0.2 * 1.0 + 0.5 * -0.5 + 0.3 * 0.25;
        assert!((bound.lower - mix).abs() < 1e-9);
        assert!((bound.upper - mix).abs() < 1e-9);
    }

    #[test]
    fn test_shifts_mass_toward_extremes() {
        let values = points(&[1.0, 0.0]);
        let bound = perturb_prob_simplex(&values, &[0.5, 0.5], 0.05);
        assert!((bound.lower - 0.45).abs() < 1e-9, "{}", bound);
        assert!((bound.upper - 0.55).abs() < 1e-9, "{}", bound);
    }

    #[test]
    fn test_weights_stay_inside_unit_range() {
        // The second child cannot lose more than the 0.02 it has
        let values = points(&[1.0, 0.0, 0.5]);
        let bound = perturb_prob_simplex(&values, &[0.9, 0.02, 0.08], 0.05);
        // lower: 0.85 * 1 + 0.07 * 0 + 0.08 * 0.5  (only 0.05 may go to the worst child)
        assert!((bound.lower - (0.85 + 0.04)).abs() < 1e-9, "{}", bound);
        // upper: 0.95 * 1 + 0 * 0 + 0.05 * 0.5
        assert!((bound.upper - (0.95 + 0.025)).abs() < 1e-9, "{}", bound);
    }

    #[test]
    fn test_wider_eps_never_shrinks() {
        let values = points(&[0.3, -1.0, 0.8, 0.1]);
        let probs = [0.1, 0.4, 0.25, 0.25];
        let mut last = perturb_prob_simplex(&values, &probs, 0.0);
        for step in 1..=20 {
            let bound = perturb_prob_simplex(&values, &probs, step as f64 * 0.05);
            assert!(bound.lower <= last.lower + 1e-12);
            assert!(bound.upper >= last.upper - 1e-12);
            last = bound;
        }
        // eps = 1 lets all mass reach either extreme
        assert!((last.lower + 1.0).abs() < 1e-9);
        assert!((last.upper - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_interval_values_use_matching_bounds() {
        let values = vec![Interval::new(-1.0, 1.0), Interval::new(0.0, 0.5)];
        let bound = perturb_prob_simplex(&values, &[0.5, 0.5], 0.0);
        assert!((bound.lower + 0.5).abs() < 1e-9);
        assert!((bound.upper - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_arithmetic() {
        let i = Interval::new(-1.0, 2.0) + Interval::new(0.5, 0.5);
        assert_eq!(i, Interval::new(-0.5, 2.5));
        assert_eq!((i - 0.5) / 2.0, Interval::new(-0.5, 1.0));
        assert_eq!(Interval::point(1.0) * 3.0, Interval::point(3.0));
        assert!(i.contains(0.0) && !i.contains(3.0));
        assert!((i.width() - 3.0).abs() < 1e-12);
    }
}
