use criterion::{black_box, criterion_group, criterion_main, Criterion};

use draft_chess::engines::policy_greedy::GreedyPolicy;
use draft_chess::engines::policy_random::RandomPolicy;
use draft_chess::engines::policy_trait::Policy;
use draft_chess::game_state::game_types::Player;
use draft_chess::machine::commands::Command;
use draft_chess::machine::game::Game;
use draft_chess::rules::legal_moves::all_candidate_actions;
use draft_chess::utils::match_harness::{play_ai_match, MatchConfig};

fn opening_position() -> Game {
    let mut game = Game::default();
    game.submit(Command::RandomDraft { seed: 7 })
        .expect("random draft");
    let mut policy = GreedyPolicy::with_seed(7);
    while let Some(actor) = game.current_actor() {
        if game.state().player(actor).bench.is_empty() {
            break;
        }
        let decision = policy.decide(&game, actor).expect("placement");
        for command in decision.commands() {
            game.submit(command).expect("legal placement");
        }
    }
    game
}

fn bench_candidate_actions(c: &mut Criterion) {
    let game = opening_position();
    c.bench_function("candidate_actions/opening", |b| {
        b.iter(|| all_candidate_actions(black_box(game.state()), Player::P1).len())
    });
}

fn bench_full_match(c: &mut Criterion) {
    let config = MatchConfig {
        random_draft: true,
        ..MatchConfig::default()
    };
    let mut seed = 0u64;
    c.bench_function("match/greedy_vs_random", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            let mut p1 = GreedyPolicy::with_seed(seed);
            let mut p2 = RandomPolicy::with_seed(seed ^ 0x5555);
            play_ai_match(&mut p1, &mut p2, black_box(seed), &config).expect("match runs")
        })
    });
}

criterion_group!(benches, bench_candidate_actions, bench_full_match);
criterion_main!(benches);
