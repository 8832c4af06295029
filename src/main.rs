use std::rc::Rc;
use interval_ismcts::config::SearchConfig;
use interval_ismcts::error::SearchError;
use interval_ismcts::games::kuhn::{Kuhn, DECK};
use interval_ismcts::ismcts::Tree;
use interval_ismcts::model::UniformModel;
use interval_ismcts::session::Session;

const VISITS: usize = 200;

fn main() -> Result<(), SearchError> {
    env_logger::init();
    let model = Rc::new(UniformModel);
    let mut session = Session::from_entropy(SearchConfig::default());

    for card in 0..DECK as u8 {
        let mut tree = Tree::new(Rc::clone(&model), Kuhn::deal(0, card), &mut session);
        let distribution = tree.get_visit_distribution(VISITS, &mut session)?;
        let shares: Vec<_> = tree.root().actions.iter()
            .map(|a| (a, distribution.get(a).copied().unwrap_or(0.0)))
            .collect();
        println!("Card {}: Q={} size={} {:?}", card, tree.root().core.q, tree.size(), shares);
    }
    println!("Trees created: {}", session.trees_created());
    Ok(())
}
