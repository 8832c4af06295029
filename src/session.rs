use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::config::SearchConfig;
use crate::utils::*;

// ---------- Session ----------
/// Everything a group of trees shares: the config, the single random source used for tie
/// breaking and hidden-state sampling, and the counter handing out tree ids.
/// Trees spawned during a search draw from the same session as their parent.
#[derive(Debug)]
pub struct Session<R: Rng> {
    config: SearchConfig,
    rng: R,
    next_tree_id: TreeId,
}

impl<R: Rng> Session<R> {
    pub fn new(config: SearchConfig, rng: R) -> Self {
        Session { config, rng, next_tree_id: 0 }
    }
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }
    /// Hand out a fresh tree id
    pub fn next_tree_id(&mut self) -> TreeId {
        let id = self.next_tree_id;
        self.next_tree_id += 1;
        id
    }
    /// How many trees this session has created
    pub fn trees_created(&self) -> usize {
        self.next_tree_id
    }
}

impl Session<StdRng> {
    /// Reproducible session: the same seed replays the same search
    pub fn seeded(config: SearchConfig, seed: u64) -> Self {
        Session::new(config, StdRng::seed_from_u64(seed))
    }
    pub fn from_entropy(config: SearchConfig) -> Self {
        Session::new(config, StdRng::from_os_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_ids_are_sequential() {
        let mut session = Session::seeded(SearchConfig::default(), 0);
        assert_eq!(session.next_tree_id(), 0);
        assert_eq!(session.next_tree_id(), 1);
        assert_eq!(session.trees_created(), 2);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = Session::seeded(SearchConfig::default(), 42);
        let mut b = Session::seeded(SearchConfig::default(), 42);
        let xs: Vec<u64> = (0..5).map(|_| a.rng().random()).collect();
        let ys: Vec<u64> = (0..5).map(|_| b.rng().random()).collect();
        assert_eq!(xs, ys);
    }
}
