use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use log::debug;
use rand::Rng;

use super::action::ActionNode;
use crate::error::SearchError;
use crate::info::InformationSet;
use crate::model::Model;
use crate::session::Session;
use crate::utils::*;

// ---------- Tree ----------
/// A search rooted at one player's information set. All values are from that player's view
pub struct Tree<I: InformationSet, M> {
    id: TreeId,
    owner: PlayerId,
    model: Rc<M>,
    root: ActionNode<I, M>,
}

impl<I: InformationSet, M> Tree<I, M> {
    pub fn new<R: Rng>(model: Rc<M>, info_set: I, session: &mut Session<R>) -> Self {
        let owner = info_set.current_player();
        let root = ActionNode::new(info_set, owner, 0.0);
        let id = session.next_tree_id();
        Tree { id, owner, model, root }
    }

    pub fn id(&self) -> TreeId {
        self.id
    }
    pub fn owner(&self) -> PlayerId {
        self.owner
    }
    pub fn root(&self) -> &ActionNode<I, M> {
        &self.root
    }
    /// Node count, not including spawned trees
    pub fn size(&self) -> usize {
        self.root.core.size()
    }
}

impl<I: InformationSet, M: Model<I>> Tree<I, M> {
    /// Visit the root until it has been visited more than `n` times, then report each root
    /// action's share of the visits. The first visit only expands, so it is left out of the
    /// denominator. With nothing but that visit (n = 0) the model's prior is reported instead.
    /// A terminal root has no actions, so its map is empty rather than summing to one
    pub fn get_visit_distribution<R: Rng>(&mut self, n: usize, session: &mut Session<R>) -> Result<HashMap<I::Action, Probability>, SearchError> {
        while self.root.core.visits <= n {
            debug!("======= visit tree: {}", self);
            self.root.visit(&self.model, session)?;
        }

        let n_total = self.root.core.visits - 1;
        if n_total == 0 {
            return Ok(self.root.actions.iter().cloned().zip(self.root.prior.iter().cloned()).collect());
        }
        Ok(self.root.core.children.iter()
            .map(|(k, edge)| (self.root.actions[*k].clone(), edge.node.core().visits as Probability / n_total as Probability))
            .collect())
    }

    /// Advance the search by one visit and return the action it explored. Used by an action node
    /// whose continuation this tree models; the very first call also pays for the root expansion
    pub(crate) fn choose_action<R: Rng>(&mut self, session: &mut Session<R>) -> Result<I::Action, SearchError> {
        debug!("======= get action distr from spawn tree: {}", self);
        if self.root.core.visits == 0 {
            self.root.visit(&self.model, session)?;
        }
        match self.root.visit(&self.model, session)? {
            Some(k) => Ok(self.root.actions[k].clone()),
            None => panic!("spawned tree {} made no choice", self),
        }
    }
}

impl<I: InformationSet, M> Display for Tree<I, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tree(id={}, owner={}, root={})", self.id, self.owner, self.root)
    }
}
