use std::fmt::{Display, Formatter};
use std::rc::Rc;
use log::debug;
use rand::Rng;

use super::action::ActionNode;
use super::node::{Node, NodeCore};
use super::tree::Tree;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::info::InformationSet;
use crate::interval::Interval;
use crate::model::Model;
use crate::session::Session;
use crate::utils::*;

// ---------- Sampling Node ----------
/// A point where the tree owner cannot tell which of several hidden states is real.
/// Has one child per hidden state that is still possible
pub struct SamplingNode<I: InformationSet, M> {
    pub core: NodeCore<I, M>,
    /// H, indexed like `mask`. Empty until the model is queried
    pub distribution: Vec<Probability>,
    pub mask: Vec<bool>,
    /// Vc, the model's value once each hidden state is known
    pub counterfactuals: Vec<Reward>,
    expanded: bool,
}

impl<I: InformationSet, M> SamplingNode<I, M> {
    pub fn new(info_set: I, owner: PlayerId, init_q: Reward) -> Self {
        let mask = info_set.hidden_state_mask();
        assert!(mask.iter().any(|m| *m), "hidden state mask of {:?} has no legal entry", info_set);
        SamplingNode {
            core: NodeCore::new(info_set, owner, init_q),
            distribution: vec![],
            mask,
            counterfactuals: vec![],
            expanded: false,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Zero out impossible hidden states and renormalise. If (almost) nothing is left,
    /// fall back to uniform over the possible ones
    pub fn apply_hidden_mask(&mut self, mass_floor: Probability) {
        for (h, legal) in self.distribution.iter_mut().zip(self.mask.iter()) {
            if !legal { *h = 0.0; }
        }
        let total: Probability = self.distribution.iter().sum();
        if total < mass_floor {
            let legal = self.mask.iter().filter(|m| **m).count() as Probability;
            self.distribution = self.mask.iter().map(|&m| if m { 1.0 / legal } else { 0.0 }).collect();
        } else {
            for h in self.distribution.iter_mut() { *h /= total; }
        }
    }

    fn legal_states(&self) -> Vec<usize> {
        self.mask.iter().enumerate().filter(|(_, m)| **m).map(|(h, _)| h).collect()
    }
}

impl<I: InformationSet, M: Model<I>> SamplingNode<I, M> {
    pub fn eval_model(&mut self, model: &M, config: &SearchConfig) -> Result<(), SearchError> {
        if self.core.value.is_some() {
            // already evaluated
            return Ok(());
        }
        let eval = model.hidden_eval(self.core.owner, &self.core.info_set)?;
        eval.validate(self.mask.len())?;
        self.distribution = eval.distribution;
        self.counterfactuals = eval.counterfactuals;
        self.apply_hidden_mask(config.mass_floor);
        self.core.value = Some(eval.value);
        self.core.q = Interval::point(eval.value);
        Ok(())
    }

    /// One child per possible hidden state. A state that still hides something stays a draw;
    /// a fully resolved one becomes a decision with its own spawned tree.
    /// Nothing is attached until every child is built
    pub fn expand<R: Rng>(&mut self, model: &Rc<M>, session: &mut Session<R>) -> Result<(), SearchError> {
        debug!("- expanding {}", self);
        let config = session.config().clone();
        self.eval_model(model, &config)?;

        let mut children = vec![];
        for h in self.legal_states() {
            let info_set = self.core.info_set.instantiate_hidden_state(h);
            let init_q = self.counterfactuals[h];
            let mut node: Node<I, M> = if info_set.has_hidden_info() {
                debug_assert_eq!(self.core.player, info_set.current_player());
                Node::Sampling(SamplingNode::new(info_set, self.core.owner, init_q))
            } else {
                let mut node = ActionNode::new(info_set, self.core.owner, init_q);
                if !node.core.is_terminal() {
                    node.spawned_tree = Some(Box::new(Self::spawn_tree(&node.core.info_set, model, session)));
                }
                Node::Action(node)
            };
            if config.eager_eval {
                node.eval_model(model, &config)?;
            }
            if let Node::Action(ActionNode { spawned_tree: Some(tree), .. }) = &node {
                debug!("  - spawned tree: {}", tree);
            }
            children.push((h, node));
        }
        for (h, node) in children {
            self.core.add_child(h, node);
        }
        self.expanded = true;
        Ok(())
    }

    /// Independent tree for the acting player, who sees only their own private data
    pub fn spawn_tree<R: Rng>(info_set: &I, model: &Rc<M>, session: &mut Session<R>) -> Tree<I, M> {
        let acting = info_set.current_player();
        Tree::new(Rc::clone(model), info_set.redacted_for(acting), session)
    }

    /// A visit that fails is not counted
    pub fn visit<R: Rng>(&mut self, model: &Rc<M>, session: &mut Session<R>) -> Result<(), SearchError> {
        debug!("= Visiting {}:", self);
        self.core.visits += 1;
        let result = self.step(model, session);
        if result.is_err() {
            self.core.visits -= 1;
        }
        result
    }

    fn step<R: Rng>(&mut self, model: &Rc<M>, session: &mut Session<R>) -> Result<(), SearchError> {
        if !self.expanded {
            self.expand(model, session)?;
        }

        let h = sample_index(&self.distribution, session.rng())?;
        debug!("- sampling hidden state {} from {:?}", h, self.distribution);
        let residual = self.core.visit_child(h, model, session)?;
        self.core.absorb(&self.distribution, session.config().eps, residual);
        debug!("= end visit {}", self);
        Ok(())
    }
}

impl<I: InformationSet, M> Display for SamplingNode<I, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hidden({:?}, owner={}, N={}, Q={}, V={:?})",
               self.core.info_set, self.core.owner, self.core.visits, self.core.q, self.core.value)
    }
}
