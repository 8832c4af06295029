use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use log::debug;
use rand::Rng;

use super::action::ActionNode;
use super::sampling::SamplingNode;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::info::InformationSet;
use crate::interval::{perturb_prob_simplex, Interval};
use crate::model::Model;
use crate::session::Session;
use crate::utils::*;

// ---------- Edge ----------
/// Owned link to a child. `index` is the insertion position, used to align per-child arrays
pub struct Edge<I: InformationSet, M> {
    pub index: usize,
    pub node: Box<Node<I, M>>,
}

// ---------- Node ----------
/// The two kinds of search node: a player choosing an action, or a draw over hidden states
pub enum Node<I: InformationSet, M> {
    Action(ActionNode<I, M>),
    Sampling(SamplingNode<I, M>),
}

/// State shared by both node kinds
pub struct NodeCore<I: InformationSet, M> {
    pub info_set: I,
    /// The player deciding here
    pub player: PlayerId,
    pub outcome: Option<Vec<Reward>>,
    /// Whose perspective every value in this tree is computed from
    pub owner: PlayerId,
    pub q: Interval,
    pub visits: usize,
    pub children: HashMap<ChildKey, Edge<I, M>>,
    /// Running mean of `q - value`, handed to the parent to correct its interval
    pub residual: Interval,
    /// Point estimate from the model (or the outcome at terminals)
    pub value: Option<Reward>,
    /// One-step estimate the parent gave before this node was evaluated
    bootstrap: Reward,
}

impl<I: InformationSet, M> NodeCore<I, M> {
    pub fn new(info_set: I, owner: PlayerId, init_q: Reward) -> Self {
        NodeCore {
            player: info_set.current_player(),
            outcome: info_set.game_outcome(),
            info_set,
            owner,
            q: Interval::point(init_q),
            visits: 0,
            children: HashMap::new(),
            residual: Interval::point(0.0),
            value: None,
            bootstrap: init_q,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Model value once evaluated, the parent's bootstrap before that
    pub fn point_value(&self) -> Reward {
        self.value.unwrap_or(self.bootstrap)
    }

    pub fn add_child(&mut self, key: ChildKey, node: Node<I, M>) {
        debug_assert!(!self.children.contains_key(&key), "duplicate child key {}", key);
        debug!("  - {}: {}", key, node);
        let index = self.children.len();
        self.children.insert(key, Edge { index, node: Box::new(node) });
    }

    pub fn child(&self, key: ChildKey) -> Option<&Node<I, M>> {
        self.children.get(&key).map(|e| e.node.as_ref())
    }

    /// Children by insertion index
    pub fn ordered_children(&self) -> Vec<(ChildKey, &Node<I, M>)> {
        let mut kids: Vec<(usize, ChildKey, &Node<I, M>)> = self.children.iter()
            .map(|(k, e)| (e.index, *k, e.node.as_ref()))
            .collect();
        kids.sort_by_key(|(i, _, _)| *i);
        kids.into_iter().map(|(_, k, n)| (k, n)).collect()
    }

    pub fn child_qs(&self) -> Vec<Interval> {
        self.ordered_children().iter().map(|(_, n)| n.core().q).collect()
    }

    pub fn child_values(&self) -> Vec<Reward> {
        self.ordered_children().iter().map(|(_, n)| n.core().point_value()).collect()
    }

    pub fn child_visits(&self) -> Vec<usize> {
        self.ordered_children().iter().map(|(_, n)| n.core().visits).collect()
    }

    /// Interval holding the `weights`-mixture of child values for any weights within `eps` of them.
    /// `weights` is indexed by child key
    pub fn union_interval(&self, weights: &[Probability], eps: Probability) -> Interval {
        let kids = self.ordered_children();
        let values: Vec<Interval> = kids.iter().map(|(_, n)| Interval::point(n.core().point_value())).collect();
        let probs: Vec<Probability> = kids.iter().map(|(k, _)| weights[*k]).collect();
        perturb_prob_simplex(&values, &probs, eps)
    }

    /// After a child visit: recompute `q` from the children and fold the new gap into `residual`
    pub fn absorb(&mut self, weights: &[Probability], eps: Probability, child_residual: Interval) {
        debug_assert!(self.visits > 0);
        self.q = self.union_interval(weights, eps) + child_residual;
        let n = self.visits as f64;
        let gap = self.q - self.point_value();
        self.residual = (self.residual * (n - 1.0) + gap) / n;
    }

    /// Visit the child under `key` and return its residual
    pub fn visit_child<R: Rng>(&mut self, key: ChildKey, model: &Rc<M>, session: &mut Session<R>) -> Result<Interval, SearchError>
    where M: Model<I> {
        let player = self.player;
        let edge = self.children.get_mut(&key)
            .unwrap_or_else(|| panic!("no child {} under node of player {}", key, player));
        edge.node.visit(model, session)?;
        Ok(edge.node.core().residual)
    }

    /// Recursively find the size of the subtree (spawned trees not included)
    pub fn size(&self) -> usize {
        1 + self.children.values().map(|e| e.node.core().size()).sum::<usize>()
    }
}

// ---------- Factory ----------
impl<I: InformationSet, M> Node<I, M> {
    /// Child reached by an action. A hand-off to another player who holds private data the
    /// owner cannot see becomes a draw over that data; anything else is a decision
    pub fn after_action(info_set: I, acting: PlayerId, owner: PlayerId, init_q: Reward) -> Self {
        if info_set.current_player() != acting && info_set.has_hidden_info() {
            Node::Sampling(SamplingNode::new(info_set, owner, init_q))
        } else {
            Node::Action(ActionNode::new(info_set, owner, init_q))
        }
    }

    pub fn core(&self) -> &NodeCore<I, M> {
        match self {
            Node::Action(node) => &node.core,
            Node::Sampling(node) => &node.core,
        }
    }

    pub fn core_mut(&mut self) -> &mut NodeCore<I, M> {
        match self {
            Node::Action(node) => &mut node.core,
            Node::Sampling(node) => &mut node.core,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.core().is_terminal()
    }
}

impl<I: InformationSet, M: Model<I>> Node<I, M> {
    /// Fetch model outputs if not done yet
    pub fn eval_model(&mut self, model: &M, config: &SearchConfig) -> Result<(), SearchError> {
        match self {
            Node::Action(node) => node.eval_model(model),
            Node::Sampling(node) => node.eval_model(model, config),
        }
    }

    /// One simulated step through this subtree. Action nodes report the action they chose
    pub fn visit<R: Rng>(&mut self, model: &Rc<M>, session: &mut Session<R>) -> Result<Option<ChildKey>, SearchError> {
        match self {
            Node::Action(node) => node.visit(model, session),
            Node::Sampling(node) => node.visit(model, session).map(|_| None),
        }
    }
}

impl<I: InformationSet, M> Display for Node<I, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Action(node) => write!(f, "{}", node),
            Node::Sampling(node) => write!(f, "{}", node),
        }
    }
}
