//! The evaluation oracle.
//!
//! A [`Model`] supplies action priors, hidden-state distributions and bootstrap values for
//! an information set, always from the perspective of the tree owner. Its outputs are
//! checked here, at the boundary, so malformed numbers never reach the tree.

use crate::error::{ModelError, SearchError};
use crate::info::InformationSet;
use crate::utils::*;

/// Oracle output at a decision point: (P, V, Vc)
#[derive(Debug, Clone)]
pub struct ActionEval {
    /// Probability of each legal action, in `legal_actions` order
    pub prior: Vec<Probability>,
    pub value: Reward,
    /// Value after taking each legal action
    pub counterfactuals: Vec<Reward>,
}

/// Oracle output at a hidden-information draw: (H, V, Vc)
#[derive(Debug, Clone)]
pub struct HiddenEval {
    /// Probability of each hidden state, indexed like `hidden_state_mask`
    pub distribution: Vec<Probability>,
    pub value: Reward,
    /// Value once each hidden state is known
    pub counterfactuals: Vec<Reward>,
}

pub trait Model<I: InformationSet> {
    fn action_eval(&self, owner: PlayerId, info_set: &I) -> Result<ActionEval, ModelError>;
    fn hidden_eval(&self, owner: PlayerId, info_set: &I) -> Result<HiddenEval, ModelError>;
}

impl ActionEval {
    pub fn validate(&self, num_actions: usize) -> Result<(), SearchError> {
        check_distribution("prior", &self.prior, num_actions)?;
        check_values(self.value, &self.counterfactuals, num_actions)
    }
}

impl HiddenEval {
    pub fn validate(&self, num_states: usize) -> Result<(), SearchError> {
        check_distribution("hidden distribution", &self.distribution, num_states)?;
        check_values(self.value, &self.counterfactuals, num_states)
    }
}

fn check_distribution(name: &str, probs: &[Probability], expected: usize) -> Result<(), SearchError> {
    if probs.len() != expected {
        return Err(SearchError::InvalidOracleOutput(format!("{} has {} entries, expected {}", name, probs.len(), expected)));
    }
    if let Some(p) = probs.iter().find(|p| !p.is_finite() || **p < 0.0) {
        return Err(SearchError::InvalidOracleOutput(format!("{} contains {}", name, p)));
    }
    let total: Probability = probs.iter().sum();
    if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(SearchError::InvalidOracleOutput(format!("{} sums to {}", name, total)));
    }
    Ok(())
}

fn check_values(value: Reward, counterfactuals: &[Reward], expected: usize) -> Result<(), SearchError> {
    if !value.is_finite() {
        return Err(SearchError::InvalidOracleOutput(format!("value is {}", value)));
    }
    if counterfactuals.len() != expected {
        return Err(SearchError::InvalidOracleOutput(format!("{} counterfactual values, expected {}", counterfactuals.len(), expected)));
    }
    if let Some(v) = counterfactuals.iter().find(|v| !v.is_finite()) {
        return Err(SearchError::InvalidOracleOutput(format!("counterfactual value {}", v)));
    }
    Ok(())
}

/// Model that knows nothing: uniform priors, uniform over possible hidden states, neutral values.
/// Useful for testing the search without a trained oracle
#[derive(Debug, Clone, Default)]
pub struct UniformModel;

impl<I: InformationSet> Model<I> for UniformModel {
    fn action_eval(&self, _owner: PlayerId, info_set: &I) -> Result<ActionEval, ModelError> {
        let n = info_set.legal_actions().len();
        if n == 0 {
            return Err(ModelError::InvalidState(format!("no legal actions in {:?}", info_set)));
        }
        Ok(ActionEval { prior: vec![1.0 / n as Probability; n], value: 0.0, counterfactuals: vec![0.0; n] })
    }

    fn hidden_eval(&self, _owner: PlayerId, info_set: &I) -> Result<HiddenEval, ModelError> {
        let mask = info_set.hidden_state_mask();
        let legal = mask.iter().filter(|m| **m).count();
        if legal == 0 {
            return Err(ModelError::InvalidState(format!("no possible hidden states in {:?}", info_set)));
        }
        let distribution = mask.iter().map(|&m| if m { 1.0 / legal as Probability } else { 0.0 }).collect();
        Ok(HiddenEval { distribution, value: 0.0, counterfactuals: vec![0.0; mask.len()] })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_action_eval() {
        let eval = ActionEval { prior: vec![0.25, 0.75], value: 0.1, counterfactuals: vec![0.0, 0.2] };
        assert!(eval.validate(2).is_ok());
    }

    #[test]
    fn test_rejects_wrong_length() {
        let eval = ActionEval { prior: vec![0.5, 0.5], value: 0.0, counterfactuals: vec![0.0, 0.0] };
        assert!(matches!(eval.validate(3), Err(SearchError::InvalidOracleOutput(_))));
        let eval = ActionEval { prior: vec![0.5, 0.5], value: 0.0, counterfactuals: vec![0.0] };
        assert!(matches!(eval.validate(2), Err(SearchError::InvalidOracleOutput(_))));
    }

    #[test]
    fn test_rejects_bad_probabilities() {
        let negative = HiddenEval { distribution: vec![1.2, -0.2], value: 0.0, counterfactuals: vec![0.0, 0.0] };
        assert!(matches!(negative.validate(2), Err(SearchError::InvalidOracleOutput(_))));
        let unnormalised = HiddenEval { distribution: vec![0.2, 0.2], value: 0.0, counterfactuals: vec![0.0, 0.0] };
        assert!(matches!(unnormalised.validate(2), Err(SearchError::InvalidOracleOutput(_))));
        let nan = HiddenEval { distribution: vec![f64::NAN, 1.0], value: 0.0, counterfactuals: vec![0.0, 0.0] };
        assert!(matches!(nan.validate(2), Err(SearchError::InvalidOracleOutput(_))));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let eval = ActionEval { prior: vec![1.0], value: f64::INFINITY, counterfactuals: vec![0.0] };
        assert!(matches!(eval.validate(1), Err(SearchError::InvalidOracleOutput(_))));
        let eval = ActionEval { prior: vec![1.0], value: 0.0, counterfactuals: vec![f64::NAN] };
        assert!(matches!(eval.validate(1), Err(SearchError::InvalidOracleOutput(_))));
    }
}
