pub mod policy;

pub use policy::{HeuristicPolicy, RequestReason};

use gofish_core::GameError;
use gofish_core::game::engine::{GameConfig, GameEngine};
use gofish_core::model::player::PlayerId;
use gofish_core::policy::RequestPolicy;

/// Seats every computer opponent with the fixed heuristic.
pub fn heuristic_seat(_: PlayerId) -> Box<dyn RequestPolicy> {
    Box::new(HeuristicPolicy::new())
}

/// Builds, shuffles and deals a game whose opponents all play
/// [`HeuristicPolicy`].
pub fn new_game(config: GameConfig) -> Result<GameEngine, GameError> {
    GameEngine::new(config, &heuristic_seat)
}

#[cfg(test)]
mod tests {
    use super::new_game;
    use gofish_core::GameError;
    use gofish_core::game::engine::GameConfig;

    #[test]
    fn new_game_seats_heuristic_opponents() {
        let game = new_game(GameConfig::with_opponents(2).seed(3)).unwrap();
        assert!(game.players()[1..].iter().all(|p| p.policy().is_some()));
        assert!(game.players()[0].policy().is_none());
    }

    #[test]
    fn new_game_validates_opponent_count() {
        assert_eq!(
            new_game(GameConfig::with_opponents(0)).unwrap_err(),
            GameError::InvalidOpponentCount(0)
        );
    }
}
