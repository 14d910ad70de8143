use super::engine::{GameEngine, Standing, TurnState};
use crate::model::player::PlayerId;
use crate::model::rank::Rank;
use serde::{Deserialize, Serialize};

/// Table-visible state of one seat. Hands are reported by size only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub hand_size: usize,
    pub books: Vec<Rank>,
    pub is_human: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub seed: Option<u64>,
    pub turns_played: u32,
    pub deck_remaining: usize,
    pub current: PlayerId,
    pub state: TurnState,
    pub seats: Vec<SeatSnapshot>,
    pub standings: Vec<Standing>,
    pub winners: Option<Vec<String>>,
}

impl GameSnapshot {
    pub fn capture(engine: &GameEngine) -> Self {
        let seats = engine
            .players()
            .iter()
            .map(|p| SeatSnapshot {
                id: p.id(),
                name: p.name().to_string(),
                hand_size: p.hand().len(),
                books: p.books().to_vec(),
                is_human: p.is_human(),
            })
            .collect();
        GameSnapshot {
            seed: engine.seed(),
            turns_played: engine.turns_played(),
            deck_remaining: engine.deck_len(),
            current: engine.current_id(),
            state: engine.state(),
            seats,
            standings: engine.standings(),
            winners: engine.is_game_over().then(|| engine.winners()),
        }
    }

    pub fn to_json(engine: &GameEngine) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(engine))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
