use crate::model::player::PlayerId;
use crate::model::rank::Rank;
use std::collections::BTreeMap;

/// Cumulative request count at which a rank is treated as exhausted.
pub const FAILED_RANK_THRESHOLD: u32 = 4;
pub const SUCCESS_DELTA: f32 = 0.3;
pub const FAILURE_DELTA: f32 = 0.2;

/// What a computer opponent has observed over the game.
///
/// Mutated only through [`OpponentMemory::record_outcome`] and
/// [`OpponentMemory::note_received`]. The belief scores are tracked but the
/// current heuristic never reads them when choosing a target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpponentMemory {
    request_history: BTreeMap<Rank, u32>,
    beliefs: BTreeMap<(PlayerId, Rank), f32>,
    last_received: Option<Rank>,
}

impl OpponentMemory {
    pub const fn new() -> Self {
        Self {
            request_history: BTreeMap::new(),
            beliefs: BTreeMap::new(),
            last_received: None,
        }
    }

    pub fn record_outcome(&mut self, rank: Rank, observed: PlayerId, success: bool) {
        *self.request_history.entry(rank).or_insert(0) += 1;

        let score = self.beliefs.entry((observed, rank)).or_insert(0.0);
        let delta = if success { SUCCESS_DELTA } else { -FAILURE_DELTA };
        *score = (*score + delta).clamp(0.0, 1.0);
    }

    pub fn note_received(&mut self, rank: Rank) {
        self.last_received = Some(rank);
    }

    pub fn last_received(&self) -> Option<Rank> {
        self.last_received
    }

    pub fn request_count(&self, rank: Rank) -> u32 {
        self.request_history.get(&rank).copied().unwrap_or(0)
    }

    /// Ranks asked for often enough that they are probably gone.
    pub fn failed_ranks(&self) -> Vec<Rank> {
        self.request_history
            .iter()
            .filter(|&(_, &count)| count >= FAILED_RANK_THRESHOLD)
            .map(|(&rank, _)| rank)
            .collect()
    }

    pub fn belief(&self, observed: PlayerId, rank: Rank) -> f32 {
        self.beliefs.get(&(observed, rank)).copied().unwrap_or(0.0)
    }

    pub fn request_history(&self) -> &BTreeMap<Rank, u32> {
        &self.request_history
    }
}
