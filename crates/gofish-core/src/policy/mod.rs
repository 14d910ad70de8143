use crate::belief::OpponentMemory;
use crate::model::hand::Hand;
use crate::model::player::PlayerId;
use crate::model::rank::Rank;
use core::fmt;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// A request for every card of `rank` held by `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub rank: Rank,
    pub target: PlayerId,
}

impl Request {
    pub const fn new(rank: Rank, target: PlayerId) -> Self {
        Self { rank, target }
    }
}

/// Everything a policy may look at when picking a request.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub seat: PlayerId,
    pub hand: &'a Hand,
    pub books: &'a [Rank],
    pub memory: &'a OpponentMemory,
    pub roster: &'a [PlayerId],
}

impl<'a> RequestContext<'a> {
    /// Seats that may be asked: the whole roster minus the requester.
    pub fn opponents(&self) -> Vec<PlayerId> {
        self.roster
            .iter()
            .copied()
            .filter(|&seat| seat != self.seat)
            .collect()
    }
}

/// Decision seam for computer-controlled seats.
///
/// Implementations are pure reads of the context; the engine applies the
/// request and feeds the outcome back through [`OpponentMemory`].
pub trait RequestPolicy: fmt::Debug + Send + Sync {
    fn choose_request(&self, ctx: &RequestContext<'_>, rng: &mut dyn RngCore) -> Option<Request>;
}

/// Builds the policy for an opponent seat during setup.
pub type PolicyFactory<'f> = dyn Fn(PlayerId) -> Box<dyn RequestPolicy> + 'f;
