use gofish_core::model::player::PlayerId;
use gofish_core::model::rank::Rank;
use gofish_core::policy::{Request, RequestContext, RequestPolicy};
use rand::RngCore;
use rand::seq::SliceRandom;
use tracing::{Level, event};

/// Which rule produced a rank choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestReason {
    /// Re-asking for the rank most recently received.
    Momentum,
    /// First rank held at least twice.
    Pair,
    Random,
    /// Random pick after every held rank was filtered out as exhausted.
    FallbackRandom,
}

impl RequestReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            RequestReason::Momentum => "momentum",
            RequestReason::Pair => "pair",
            RequestReason::Random => "random",
            RequestReason::FallbackRandom => "fallback_random",
        }
    }
}

/// The fixed opponent heuristic.
///
/// Rank priority: momentum, then pairs, then a random candidate, skipping
/// ranks that have been requested often enough to be presumed gone. The
/// target is drawn uniformly from the other seats; the belief scores in
/// [`OpponentMemory`](gofish_core::belief::OpponentMemory) are not consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    pub const fn new() -> Self {
        Self
    }

    pub fn choose_rank(
        &self,
        ctx: &RequestContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<(Rank, RequestReason)> {
        let available: Vec<Rank> = ctx
            .hand
            .ranks()
            .into_iter()
            .filter(|rank| !ctx.books.contains(rank))
            .collect();
        if available.is_empty() {
            return None;
        }

        let failed = ctx.memory.failed_ranks();
        let filtered: Vec<Rank> = available
            .iter()
            .copied()
            .filter(|rank| !failed.contains(rank))
            .collect();
        let fallback = filtered.is_empty();
        let candidates = if fallback { available } else { filtered };

        if let Some(last) = ctx.memory.last_received() {
            if candidates.contains(&last) {
                return Some((last, RequestReason::Momentum));
            }
        }

        if let Some(&rank) = candidates
            .iter()
            .find(|&&rank| ctx.hand.count_of(rank) >= 2)
        {
            return Some((rank, RequestReason::Pair));
        }

        let rank = *candidates.choose(rng)?;
        let reason = if fallback {
            RequestReason::FallbackRandom
        } else {
            RequestReason::Random
        };
        Some((rank, reason))
    }
}

impl RequestPolicy for HeuristicPolicy {
    fn choose_request(&self, ctx: &RequestContext<'_>, rng: &mut dyn RngCore) -> Option<Request> {
        let Some((rank, reason)) = self.choose_rank(ctx, rng) else {
            event!(
                target: "gofish_bot::request",
                Level::DEBUG,
                seat = %ctx.seat,
                hand = ctx.hand.len(),
                "no request available"
            );
            return None;
        };
        let target = *ctx.opponents().choose(rng)?;
        log_request_decision(ctx, rank, target, reason);
        Some(Request::new(rank, target))
    }
}

fn log_request_decision(
    ctx: &RequestContext<'_>,
    rank: Rank,
    target: PlayerId,
    reason: RequestReason,
) {
    event!(
        target: "gofish_bot::request",
        Level::DEBUG,
        seat = %ctx.seat,
        rank = %rank,
        target = %target,
        reason = reason.as_str(),
        held = ctx.hand.count_of(rank),
        history = ctx.memory.request_count(rank),
        last_received = ?ctx.memory.last_received(),
        "request chosen"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use gofish_core::belief::OpponentMemory;
    use gofish_core::model::card::Card;
    use gofish_core::model::hand::Hand;
    use gofish_core::model::suit::Suit;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const ROSTER: [PlayerId; 3] = [PlayerId(0), PlayerId(1), PlayerId(2)];

    fn hand(ranks: &[Rank]) -> Hand {
        let cards = ranks
            .iter()
            .zip(Suit::ALL.iter().cycle())
            .map(|(&rank, &suit)| Card::new(rank, suit))
            .collect();
        Hand::with_cards(cards)
    }

    fn ctx<'a>(hand: &'a Hand, books: &'a [Rank], memory: &'a OpponentMemory) -> RequestContext<'a> {
        RequestContext {
            seat: PlayerId(1),
            hand,
            books,
            memory,
            roster: &ROSTER,
        }
    }

    fn exhaust(memory: &mut OpponentMemory, rank: Rank) {
        for _ in 0..4 {
            memory.record_outcome(rank, PlayerId(2), false);
        }
    }

    #[test]
    fn pair_rule_prefers_the_doubled_rank() {
        let hand = hand(&[Rank::Seven, Rank::Seven, Rank::Nine]);
        let memory = OpponentMemory::new();
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let choice = HeuristicPolicy::new().choose_rank(&ctx(&hand, &[], &memory), &mut rng);
            assert_eq!(choice, Some((Rank::Seven, RequestReason::Pair)));
        }
    }

    #[test]
    fn momentum_beats_pairs() {
        let hand = hand(&[Rank::Seven, Rank::Seven, Rank::Nine]);
        let mut memory = OpponentMemory::new();
        memory.note_received(Rank::Nine);
        let mut rng = StdRng::seed_from_u64(5);
        let choice = HeuristicPolicy::new().choose_rank(&ctx(&hand, &[], &memory), &mut rng);
        assert_eq!(choice, Some((Rank::Nine, RequestReason::Momentum)));
    }

    #[test]
    fn momentum_ignored_once_rank_is_gone() {
        let hand = hand(&[Rank::Seven, Rank::Seven, Rank::Nine]);
        let mut memory = OpponentMemory::new();
        memory.note_received(Rank::Queen);
        let mut rng = StdRng::seed_from_u64(5);
        let choice = HeuristicPolicy::new().choose_rank(&ctx(&hand, &[], &memory), &mut rng);
        assert_eq!(choice, Some((Rank::Seven, RequestReason::Pair)));
    }

    #[test]
    fn exhausted_ranks_are_skipped() {
        let hand = hand(&[Rank::Seven, Rank::Seven, Rank::Nine]);
        let mut memory = OpponentMemory::new();
        exhaust(&mut memory, Rank::Seven);
        let mut rng = StdRng::seed_from_u64(1);
        let choice = HeuristicPolicy::new().choose_rank(&ctx(&hand, &[], &memory), &mut rng);
        assert_eq!(choice, Some((Rank::Nine, RequestReason::Random)));
    }

    #[test]
    fn falls_back_when_every_rank_is_exhausted() {
        let hand = hand(&[Rank::Four, Rank::Jack]);
        let mut memory = OpponentMemory::new();
        exhaust(&mut memory, Rank::Four);
        exhaust(&mut memory, Rank::Jack);
        let mut rng = StdRng::seed_from_u64(9);
        let (rank, reason) = HeuristicPolicy::new()
            .choose_rank(&ctx(&hand, &[], &memory), &mut rng)
            .unwrap();
        assert!(rank == Rank::Four || rank == Rank::Jack);
        assert_eq!(reason, RequestReason::FallbackRandom);
    }

    #[test]
    fn no_request_without_playable_ranks() {
        let memory = OpponentMemory::new();
        let mut rng = StdRng::seed_from_u64(0);
        let empty = Hand::new();
        assert!(
            HeuristicPolicy::new()
                .choose_request(&ctx(&empty, &[], &memory), &mut rng)
                .is_none()
        );

        let held = hand(&[Rank::Two]);
        let books = [Rank::Two];
        assert!(
            HeuristicPolicy::new()
                .choose_request(&ctx(&held, &books, &memory), &mut rng)
                .is_none()
        );
    }

    #[test]
    fn target_is_always_another_seat() {
        let hand = hand(&[Rank::Three, Rank::Eight]);
        let memory = OpponentMemory::new();
        let mut seen = [false; 3];
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let request = HeuristicPolicy::new()
                .choose_request(&ctx(&hand, &[], &memory), &mut rng)
                .unwrap();
            assert_ne!(request.target, PlayerId(1));
            seen[request.target.index()] = true;
        }
        assert_eq!(seen, [true, false, true]);
    }

    #[test]
    fn reasons_have_stable_labels() {
        assert_eq!(RequestReason::Momentum.as_str(), "momentum");
        assert_eq!(RequestReason::FallbackRandom.as_str(), "fallback_random");
    }
}
