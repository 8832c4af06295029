use std::fmt::{Display, Formatter};
use std::rc::Rc;
use log::{debug, trace};
use rand::Rng;

use super::node::{Node, NodeCore};
use super::tree::Tree;
use crate::error::SearchError;
use crate::info::InformationSet;
use crate::interval::Interval;
use crate::model::Model;
use crate::session::Session;
use crate::utils::*;

// ---------- Action Node ----------
/// A decision point: the current player picks one of the legal actions
pub struct ActionNode<I: InformationSet, M> {
    pub core: NodeCore<I, M>,
    pub actions: Vec<I::Action>,
    /// P, aligned with `actions`. Empty until the model is queried
    pub prior: Vec<Probability>,
    /// Vc, the model's value after each action
    pub counterfactuals: Vec<Reward>,
    expanded: bool,
    /// Independent search over this continuation, seen only by its acting player
    pub spawned_tree: Option<Box<Tree<I, M>>>,
}

/// Score intervals (edge order) and the children whose scores overlap the best one
#[derive(Debug, Clone)]
pub struct Puct {
    pub scores: Vec<Interval>,
    pub candidates: Vec<ChildKey>,
}

impl Puct {
    /// A single candidate means a pure best action
    pub fn is_pure(&self) -> bool {
        self.candidates.len() == 1
    }
}

impl<I: InformationSet, M> ActionNode<I, M> {
    pub fn new(info_set: I, owner: PlayerId, init_q: Reward) -> Self {
        let mut core = NodeCore::new(info_set, owner, init_q);
        if let Some(outcome) = &core.outcome {
            let v = outcome[owner];
            core.value = Some(v);
            core.q = Interval::point(v);
        }
        let actions = core.info_set.legal_actions();
        ActionNode {
            core,
            actions,
            prior: vec![],
            counterfactuals: vec![],
            expanded: false,
            spawned_tree: None,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Score every child by its value interval plus the exploration bonus, then keep each child
    /// whose upper score reaches the best lower score
    pub fn compute_puct(&self, c_puct: f64, tie_tolerance: f64) -> Puct {
        let kids = self.core.ordered_children();
        let total_visits: usize = kids.iter().map(|(_, n)| n.core().visits).sum();
        let sqrt_total = (total_visits as f64).sqrt();

        let scores: Vec<Interval> = kids.iter()
            .map(|(k, n)| {
                let core = n.core();
                let bonus = c_puct * self.prior[*k] * sqrt_total / (core.visits as f64 + 1.0);
                core.q + bonus
            })
            .collect();
        let best_lower = scores.iter().map(|s| s.lower).fold(f64::NEG_INFINITY, f64::max);

        debug!("-- PUCT:");
        for ((_, n), score) in kids.iter().zip(scores.iter()) {
            trace!("Q: {}, N: {}, PUCT: {}", n.core().q, n.core().visits, score);
        }

        let candidates = kids.iter()
            .zip(scores.iter())
            .filter(|(_, s)| s.upper >= best_lower - tie_tolerance)
            .map(|((k, _), _)| *k)
            .collect();
        Puct { scores, candidates }
    }

    /// The prior restricted to `candidates` and renormalised
    pub fn mixing_distribution(&self, candidates: &[ChildKey]) -> Vec<Probability> {
        let mut mixed = vec![0.0; self.prior.len()];
        for &k in candidates {
            mixed[k] = self.prior[k];
        }
        let total: Probability = mixed.iter().sum();
        assert!(total > 1e-12, "tie candidates {:?} carry no prior mass ({:?}) at {}", candidates, self.prior, self);
        mixed.iter().map(|p| p / total).collect()
    }
}

impl<I: InformationSet, M: Model<I>> ActionNode<I, M> {
    pub fn eval_model(&mut self, model: &M) -> Result<(), SearchError> {
        if self.core.value.is_some() || self.core.is_terminal() {
            // already evaluated
            return Ok(());
        }
        let eval = model.action_eval(self.core.owner, &self.core.info_set)?;
        eval.validate(self.actions.len())?;
        self.prior = eval.prior;
        self.counterfactuals = eval.counterfactuals;
        self.core.value = Some(eval.value);
        self.core.q = Interval::point(eval.value);
        Ok(())
    }

    /// Create one child per legal action, each bootstrapped with its counterfactual value.
    /// Children are committed only once every one of them is built, so a failed expansion can be retried
    pub fn expand<R: Rng>(&mut self, model: &Rc<M>, session: &mut Session<R>) -> Result<(), SearchError> {
        debug!("- expanding {}", self);
        if self.core.is_terminal() {
            self.expanded = true;
            return Ok(());
        }
        self.eval_model(model)?;
        let config = session.config().clone();
        let mut children = Vec::with_capacity(self.actions.len());
        for (i, a) in self.actions.iter().enumerate() {
            let info_set = self.core.info_set.apply(a);
            let mut node: Node<I, M> = Node::after_action(info_set, self.core.player, self.core.owner, self.counterfactuals[i]);
            if config.eager_eval {
                node.eval_model(model, &config)?;
            }
            children.push(node);
        }
        for (i, node) in children.into_iter().enumerate() {
            self.core.add_child(i, node);
        }
        self.expanded = true;
        self.core.q = Interval::point(self.core.point_value());
        Ok(())
    }

    /// A visit that fails is not counted
    pub fn visit<R: Rng>(&mut self, model: &Rc<M>, session: &mut Session<R>) -> Result<Option<ChildKey>, SearchError> {
        debug!("= Visiting {}:", self);
        self.core.visits += 1;
        let result = self.step(model, session);
        if result.is_err() {
            self.core.visits -= 1;
        }
        result
    }

    fn step<R: Rng>(&mut self, model: &Rc<M>, session: &mut Session<R>) -> Result<Option<ChildKey>, SearchError> {
        if self.core.is_terminal() {
            debug!("= end visit {} hit terminal, return Q: {}", self, self.core.q);
            return Ok(None);
        }
        if !self.expanded {
            self.expand(model, session)?;
            debug!("= end visit {} expand, return Q: {}", self, self.core.q);
            return Ok(None);
        }

        let key = if self.spawned_tree.is_some() {
            self.spawned_visit(model, session)?
        } else {
            self.unspawned_visit(model, session)?
        };
        debug!("= end visit {}", self);
        Ok(Some(key))
    }

    /// Let the spawned tree pick the action, then visit our own child for it
    fn spawned_visit<R: Rng>(&mut self, model: &Rc<M>, session: &mut Session<R>) -> Result<ChildKey, SearchError> {
        let action = match self.spawned_tree.as_mut() {
            Some(tree) => tree.choose_action(session)?,
            None => unreachable!("spawned visit without a spawned tree"),
        };
        let key = self.actions.iter().position(|a| *a == action)
            .unwrap_or_else(|| panic!("spawned tree chose {:?}, not legal at {}", action, self));
        self.visit_child(key, model, session)?;
        Ok(key)
    }

    fn unspawned_visit<R: Rng>(&mut self, model: &Rc<M>, session: &mut Session<R>) -> Result<ChildKey, SearchError> {
        let config = session.config();
        let puct = self.compute_puct(config.c_puct, config.tie_tolerance);
        let key = if puct.is_pure() {
            puct.candidates[0]
        } else {
            let mixing = self.mixing_distribution(&puct.candidates);
            sample_index(&mixing, session.rng())?
        };
        self.visit_child(key, model, session)?;
        Ok(key)
    }

    fn visit_child<R: Rng>(&mut self, key: ChildKey, model: &Rc<M>, session: &mut Session<R>) -> Result<(), SearchError> {
        let residual = self.core.visit_child(key, model, session)?;
        self.core.absorb(&self.prior, session.config().eps, residual);
        Ok(())
    }
}

impl<I: InformationSet, M> Display for ActionNode<I, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Action({:?}, owner={}, N={}, Q={}, V={:?})",
               self.core.info_set, self.core.owner, self.core.visits, self.core.q, self.core.value)
    }
}
