use crate::model::player::PlayerId;
use crate::model::rank::Rank;
use thiserror::Error;

/// Failures surfaced by the engine.
///
/// `InvalidRank` and `InvalidTarget` are recoverable input errors: the shell
/// re-prompts and the engine state is untouched. `Invariant` means the engine
/// itself is broken and the game must not continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("you can only ask for a rank you hold (no {0}s in hand)")]
    InvalidRank(Rank),
    #[error("'{0}' is not an opponent in this game")]
    InvalidTarget(String),
    #[error("opponent count must be between 1 and 9, got {0}")]
    InvalidOpponentCount(usize),
    #[error("it is {current}'s turn, not the human's")]
    NotHumanTurn { current: String },
    #[error("it is the human's turn; waiting for a request")]
    NotOpponentTurn,
    #[error("{0} is not a seat in this game")]
    UnknownSeat(PlayerId),
    #[error("the game is over")]
    GameOver,
    #[error("engine invariant violated: {0}")]
    Invariant(String),
}

impl GameError {
    /// Input errors the shell should answer by asking again.
    pub fn is_input_error(&self) -> bool {
        matches!(self, GameError::InvalidRank(_) | GameError::InvalidTarget(_))
    }
}

#[cfg(test)]
mod tests {
    use super::GameError;
    use crate::model::rank::Rank;

    #[test]
    fn input_errors_are_flagged_recoverable() {
        assert!(GameError::InvalidRank(Rank::Two).is_input_error());
        assert!(GameError::InvalidTarget("AI 7".into()).is_input_error());
        assert!(!GameError::Invariant("boom".into()).is_input_error());
        assert!(!GameError::GameOver.is_input_error());
    }

    #[test]
    fn messages_name_the_offending_value() {
        let msg = GameError::InvalidTarget("AI 7".into()).to_string();
        assert!(msg.contains("AI 7"));
        let msg = GameError::InvalidRank(Rank::Queen).to_string();
        assert!(msg.contains("Qs"));
    }
}
