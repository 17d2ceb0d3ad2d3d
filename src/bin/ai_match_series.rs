//! Standalone AI-vs-AI series runner.
//!
//! Run with:
//! `cargo run --release --bin ai_match_series`
//! `cargo run --release --bin ai_match_series -- --verbose`

use draft_chess::engines::policy_greedy::GreedyPolicy;
use draft_chess::engines::policy_random::RandomPolicy;
use draft_chess::engines::policy_trait::Policy;
use draft_chess::utils::match_harness::{play_ai_match_series, MatchConfig, MatchSeriesConfig};

fn main() -> Result<(), String> {
    let verbose = std::env::args().any(|a| a == "--verbose" || a == "-v");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Swap these to compare other policies.
    let player1 = |seed| Box::new(GreedyPolicy::with_seed(seed)) as Box<dyn Policy>;
    let player2 = |seed| Box::new(RandomPolicy::with_seed(seed)) as Box<dyn Policy>;

    let stats = play_ai_match_series(
        player1,
        player2,
        MatchSeriesConfig {
            games: 20,
            base_seed: 1234,
            per_game: MatchConfig {
                random_draft: false,
                ..MatchConfig::default()
            },
            verbose,
        },
    )
    .map_err(|e| e.to_string())?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
