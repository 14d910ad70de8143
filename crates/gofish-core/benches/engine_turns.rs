use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gofish_core::game::engine::{GameConfig, GameEngine};
use gofish_core::model::player::PlayerId;
use gofish_core::policy::{Request, RequestContext, RequestPolicy};
use rand::RngCore;

#[derive(Debug)]
struct FirstRank;

impl RequestPolicy for FirstRank {
    fn choose_request(&self, ctx: &RequestContext<'_>, rng: &mut dyn RngCore) -> Option<Request> {
        let rank = ctx.hand.cards().first()?.rank;
        let targets = ctx.opponents();
        Some(Request::new(rank, targets[rng.next_u32() as usize % targets.len()]))
    }
}

fn first_rank(_: PlayerId) -> Box<dyn RequestPolicy> {
    Box::new(FirstRank)
}

fn play_turns(seed: u64, opponents: usize, turns: usize) -> usize {
    let Ok(mut game) = GameEngine::new(GameConfig::with_opponents(opponents).seed(seed), &first_rank)
    else {
        return 0;
    };
    for _ in 0..turns {
        if game.is_game_over() {
            break;
        }
        if game.is_human_turn() {
            let Some(request) = game.suggest_request(&FirstRank) else { break };
            let _ = game.submit_human_request(request.rank, request.target);
        } else {
            let _ = game.advance_opponent_turn();
        }
    }
    game.total_books()
}

fn engine_turns_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_turns");
    for (seed, opponents) in [(7u64, 1usize), (42u64, 3usize), (1234u64, 9usize)] {
        group.bench_function(format!("turns_{seed}_{opponents}"), |b| {
            b.iter(|| black_box(play_turns(seed, opponents, 200)))
        });
    }
    group.finish();
}

criterion_group!(benches, engine_turns_bench);
criterion_main!(benches);
