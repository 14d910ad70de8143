use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gofish_bot::HeuristicPolicy;
use gofish_core::belief::OpponentMemory;
use gofish_core::model::card::Card;
use gofish_core::model::hand::Hand;
use gofish_core::model::player::PlayerId;
use gofish_core::model::rank::Rank;
use gofish_core::model::suit::Suit;
use gofish_core::policy::{RequestContext, RequestPolicy};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn fixture_hand(seed: u64) -> Hand {
    let mut cards = Vec::new();
    for (i, rank) in Rank::ORDERED.iter().enumerate().skip(seed as usize % 5).take(6) {
        cards.push(Card::new(*rank, Suit::ALL[i % 4]));
        if i % 3 == 0 {
            cards.push(Card::new(*rank, Suit::ALL[(i + 1) % 4]));
        }
    }
    Hand::with_cards(cards)
}

fn heuristic_decision_bench(c: &mut Criterion) {
    let roster: Vec<PlayerId> = PlayerId::all(10).collect();
    let mut memory = OpponentMemory::new();
    for rank in Rank::ORDERED.iter().take(4) {
        for _ in 0..4 {
            memory.record_outcome(*rank, PlayerId(3), false);
        }
    }

    let mut group = c.benchmark_group("heuristic_decision");
    for seed in [1u64, 2, 3] {
        let hand = fixture_hand(seed);
        let ctx = RequestContext {
            seat: PlayerId(1),
            hand: &hand,
            books: &[],
            memory: &memory,
            roster: &roster,
        };
        let mut rng = StdRng::seed_from_u64(seed);
        group.bench_function(format!("choose_request_{seed}"), |b| {
            b.iter(|| black_box(HeuristicPolicy::new().choose_request(&ctx, &mut rng)))
        });
    }
    group.finish();
}

criterion_group!(benches, heuristic_decision_bench);
criterion_main!(benches);
