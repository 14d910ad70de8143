use crate::layout::Action;
use gofish_core::model::player::PlayerId;
use gofish_core::model::rank::Rank;

/// Pending rank and target picked by clicks; submit is allowed only once
/// both are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    rank: Option<Rank>,
    target: Option<PlayerId>,
}

impl Selection {
    pub fn select_rank(&mut self, rank: Rank) {
        self.rank = Some(rank);
    }

    pub fn select_target(&mut self, target: PlayerId) {
        self.target = Some(target);
    }

    pub fn rank(&self) -> Option<Rank> {
        self.rank
    }

    pub fn target(&self) -> Option<PlayerId> {
        self.target
    }

    pub fn can_submit(&self) -> bool {
        self.rank.is_some() && self.target.is_some()
    }

    /// Returns the pair and clears the selection, or `None` (keeping any
    /// partial selection) when incomplete.
    pub fn take(&mut self) -> Option<(Rank, PlayerId)> {
        let pair = (self.rank?, self.target?);
        *self = Self::default();
        Some(pair)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Applies a widget action; yields the request when a complete selection
    /// is submitted.
    pub fn apply(&mut self, action: Action) -> Option<(Rank, PlayerId)> {
        match action {
            Action::SelectRank(rank) => {
                self.select_rank(rank);
                None
            }
            Action::SelectTarget(target) => {
                self.select_target(target);
                None
            }
            Action::Submit => self.take(),
        }
    }
}
