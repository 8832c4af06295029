use std::fmt::Debug;
use std::hash::Hash;
use crate::utils::*;

// ---------- Information Set ----------
/// Properties we want all game actions to have
pub trait ActionI: Clone + Eq + Hash + Debug {}
impl<T: Clone + Eq + Hash + Debug> ActionI for T {}

/// A game state as one player sees it. Other players' private data may be missing
pub trait InformationSet: Clone + Debug {
    /// The actions that could possibly be taken
    type Action: ActionI;

    /// The player whose turn it is
    fn current_player(&self) -> PlayerId;
    /// How many seats the game has
    fn num_players(&self) -> usize;
    /// Payoff per player (indexed by PlayerId). Some iff the game is over
    fn game_outcome(&self) -> Option<Vec<Reward>>;
    /// What actions the current player can take, in a fixed order
    fn legal_actions(&self) -> Vec<Self::Action>;
    /// Create a new copy of the information set after this action is taken
    fn apply(&self, action: &Self::Action) -> Self;
    /// Whether some private data needed to resolve the game is unknown here
    fn has_hidden_info(&self) -> bool;
    /// Which hidden states are still possible (indexed by hidden-state index)
    fn hidden_state_mask(&self) -> Vec<bool>;
    /// Resolve the next unknown piece of private data to hidden state `index`
    fn instantiate_hidden_state(&self, index: usize) -> Self;
    /// Forget the private data of `player`
    fn redact(&mut self, player: PlayerId);

    /// Copy of this information set that only keeps `acting`'s private data
    fn redacted_for(&self, acting: PlayerId) -> Self {
        let mut info = self.clone();
        for p in (0..self.num_players()).filter(|&p| p != acting) {
            info.redact(p);
        }
        info
    }
}
