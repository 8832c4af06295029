//! # Kuhn Poker
//!
//! Three cards (0 < 1 < 2), two players, one card each, ante of 1. Player 0 acts first.
//! An information set keeps each seat's card as `Option`: `None` means the viewer does not
//! know it. Hidden state `h` is "the next unknown card is `h`".

use std::fmt::{Debug, Formatter};
use crate::info::InformationSet;
use crate::utils::*;

pub const DECK: usize = 3;

#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub enum KuhnAction { Check, Bet, Call, Fold }

impl Debug for KuhnAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KuhnAction::Check => write!(f, "Check"),
            KuhnAction::Bet => write!(f, "Bet"),
            KuhnAction::Call => write!(f, "Call"),
            KuhnAction::Fold => write!(f, "Fold"),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Kuhn {
    cards: [Option<u8>; 2],
    history: Vec<KuhnAction>,
}

impl Kuhn {
    /// Start of a hand as seen by `viewer`, who holds `card`
    pub fn deal(viewer: PlayerId, card: u8) -> Self {
        debug_assert!(viewer < 2 && (card as usize) < DECK);
        let mut cards = [None, None];
        cards[viewer] = Some(card);
        Kuhn { cards, history: vec![] }
    }
    /// Start of a hand with both cards known
    pub fn with_cards(cards: [u8; 2]) -> Self {
        debug_assert!(cards[0] != cards[1]);
        Kuhn { cards: [Some(cards[0]), Some(cards[1])], history: vec![] }
    }
    pub fn cards(&self) -> [Option<u8>; 2] {
        self.cards
    }
    pub fn history(&self) -> &[KuhnAction] {
        &self.history
    }

    fn is_over(&self) -> bool {
        use KuhnAction::*;
        matches!(self.history.as_slice(),
            [Check, Check] | [Bet, Call] | [Bet, Fold] | [Check, Bet, Call] | [Check, Bet, Fold])
    }
    /// Chips each player put in
    fn pot_share(&self) -> Reward {
        if self.history.contains(&KuhnAction::Call) { 2.0 } else { 1.0 }
    }
}

impl InformationSet for Kuhn {
    type Action = KuhnAction;

    fn current_player(&self) -> PlayerId {
        self.history.len() % 2
    }

    fn num_players(&self) -> usize {
        2
    }

    /// Zero-sum chip result. A showdown cannot be scored while a card is unknown
    fn game_outcome(&self) -> Option<Vec<Reward>> {
        if !self.is_over() {
            return None;
        }
        if self.history.last() == Some(&KuhnAction::Fold) {
            let folder = (self.history.len() - 1) % 2;
            let mut outcome = vec![1.0, 1.0];
            outcome[folder] = -1.0;
            return Some(outcome);
        }
        let (c0, c1) = (self.cards[0]?, self.cards[1]?);
        let stake = self.pot_share();
        Some(if c0 > c1 { vec![stake, -stake] } else { vec![-stake, stake] })
    }

    fn legal_actions(&self) -> Vec<Self::Action> {
        use KuhnAction::*;
        if self.is_over() {
            return vec![];
        }
        match self.history.last() {
            Some(Bet) => vec![Call, Fold],
            _ => vec![Check, Bet],
        }
    }

    fn apply(&self, action: &Self::Action) -> Self {
        debug_assert!(self.legal_actions().contains(action), "{:?} not legal in {:?}", action, self);
        let mut next = self.clone();
        next.history.push(*action);
        next
    }

    fn has_hidden_info(&self) -> bool {
        self.cards.iter().any(|c| c.is_none())
    }

    fn hidden_state_mask(&self) -> Vec<bool> {
        if !self.has_hidden_info() {
            return vec![false; DECK];
        }
        (0..DECK as u8).map(|c| !self.cards.contains(&Some(c))).collect()
    }

    fn instantiate_hidden_state(&self, index: usize) -> Self {
        debug_assert!(self.hidden_state_mask()[index]);
        let mut next = self.clone();
        if let Some(seat) = next.cards.iter_mut().find(|c| c.is_none()) {
            *seat = Some(index as u8);
        }
        next
    }

    fn redact(&mut self, player: PlayerId) {
        self.cards[player] = None;
    }
}

impl Debug for Kuhn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let card = |c: Option<u8>| c.map(|c| c.to_string()).unwrap_or_else(|| "?".to_string());
        write!(f, "Kuhn({}{} {:?})", card(self.cards[0]), card(self.cards[1]), self.history)
    }
}
