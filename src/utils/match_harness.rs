//! Head-to-head AI match harness.
//!
//! Runs two `Policy` implementations against each other through the normal
//! scheduler path (tickets, think delay, clock) on a manual time source, so a
//! whole game takes microseconds of real time.

use std::time::Instant;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::engines::policy_trait::Policy;
use crate::errors::GameError;
use crate::game_state::game_rules::GameConfig;
use crate::game_state::game_types::{GameOutcome, GameOverReason, Phase, Player};
use crate::machine::commands::Command;
use crate::machine::game::Game;
use crate::machine::time_source::ManualTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Win(GameOutcome),
    /// Stopped after `max_actions` without a result.
    Unfinished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin {
        player: PlayerId,
        reason: GameOverReason,
    },
    Unfinished,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub game: GameConfig,
    pub max_actions: u32,
    /// Skip the draft with a seeded random one.
    pub random_draft: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            game: GameConfig {
                ai_enabled: [true, true],
                ..GameConfig::default()
            },
            max_actions: 1_000,
            random_draft: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub actions: [u32; 2],
    pub decide_time_ns: [u128; 2],
    pub log: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub unfinished: u16,
    pub captain_kills: u16,
    pub timeouts: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_actions: u32,
    pub player2_actions: u32,
    pub player1_avg_decide_us: f64,
    pub player2_avg_decide_us: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} unfinished={} captain_kills={} timeouts={} p1_avg_us={:.3} p2_avg_us={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.unfinished,
            self.captain_kills,
            self.timeouts,
            self.player1_avg_decide_us,
            self.player2_avg_decide_us
        )
    }
}

/// Play one match. `policy_p1` controls P1, `policy_p2` controls P2.
pub fn play_ai_match(
    policy_p1: &mut dyn Policy,
    policy_p2: &mut dyn Policy,
    seed: u64,
    config: &MatchConfig,
) -> Result<MatchResult, GameError> {
    let time = ManualTime::new();
    let mut game = Game::with_time_source(
        GameConfig {
            ai_enabled: [true, true],
            ..config.game
        },
        Box::new(time.clone()),
    );
    policy_p1.new_game();
    policy_p2.new_game();

    if config.random_draft {
        game.submit(Command::RandomDraft { seed })?;
    }

    let mut actions = [0u32; 2];
    let mut decide_time_ns = [0u128; 2];

    for _ in 0..config.max_actions {
        if game.phase() == Phase::GameOver {
            break;
        }
        let Some(ticket) = game.schedule_ai() else {
            break;
        };
        time.advance_to(ticket.due_at_ms);

        let actor = ticket.actor;
        let policy: &mut dyn Policy = match actor {
            Player::P1 => &mut *policy_p1,
            Player::P2 => &mut *policy_p2,
        };
        let started = Instant::now();
        let fired = game.fire_ai(ticket, policy);
        decide_time_ns[actor.index()] += started.elapsed().as_nanos();

        match fired {
            Ok(_) => actions[actor.index()] += 1,
            Err(GameError::NoAvailableAction(player)) if game.phase() == Phase::Play => {
                // Stuck side: let its clock run out.
                time.advance(game.remaining_time_ms(player));
                game.tick();
            }
            Err(GameError::StaleTicket) => {}
            Err(err) => return Err(err),
        }
    }

    let outcome = game
        .outcome()
        .map_or(MatchOutcome::Unfinished, MatchOutcome::Win);
    let log = game
        .state()
        .events
        .entries()
        .iter()
        .map(|e| e.message.clone())
        .collect();
    Ok(MatchResult {
        outcome,
        actions,
        decide_time_ns,
        log,
    })
}

/// Play a series and aggregate results.
///
/// Seats are randomized each game (deterministic from `base_seed`).
pub fn play_ai_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> Result<MatchSeriesStats, GameError>
where
    F1: Fn(u64) -> Box<dyn Policy>,
    F2: Fn(u64) -> Box<dyn Policy>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut seat_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);
    let mut time_ns = [0u128; 2];

    for i in 0..config.games {
        let player1_is_p1 = seat_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        if config.verbose {
            let (p1, p2) = if player1_is_p1 {
                ("Player1", "Player2")
            } else {
                ("Player2", "Player1")
            };
            println!(
                "[series] game {}/{} seed={} P1={} P2={}",
                i + 1,
                config.games,
                seed,
                p1,
                p2
            );
        }

        let mut player1 = player1_factory(seed);
        let mut player2 = player2_factory(seed.wrapping_mul(31).wrapping_add(7));
        let result = if player1_is_p1 {
            play_ai_match(player1.as_mut(), player2.as_mut(), seed, &config.per_game)?
        } else {
            play_ai_match(player2.as_mut(), player1.as_mut(), seed, &config.per_game)?
        };

        let (p1_seat, p2_seat) = if player1_is_p1 { (0, 1) } else { (1, 0) };
        stats.player1_actions += result.actions[p1_seat];
        stats.player2_actions += result.actions[p2_seat];
        time_ns[0] += result.decide_time_ns[p1_seat];
        time_ns[1] += result.decide_time_ns[p2_seat];

        let mapped = match result.outcome {
            MatchOutcome::Win(outcome) => {
                match outcome.reason {
                    GameOverReason::CaptainCaptured => stats.captain_kills += 1,
                    GameOverReason::Timeout => stats.timeouts += 1,
                }
                let player = if (outcome.winner == Player::P1) == player1_is_p1 {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                SeriesOutcome::PlayerWin {
                    player,
                    reason: outcome.reason,
                }
            }
            MatchOutcome::Unfinished => {
                stats.unfinished += 1;
                SeriesOutcome::Unfinished
            }
        };
        if config.verbose {
            println!("[series] result {mapped:?}");
        }
        stats.outcomes.push(mapped);
    }

    let avg_us = |total: u128, count: u32| {
        if count == 0 {
            0.0
        } else {
            total as f64 / f64::from(count) / 1_000.0
        }
    };
    stats.player1_avg_decide_us = avg_us(time_ns[0], stats.player1_actions);
    stats.player2_avg_decide_us = avg_us(time_ns[1], stats.player2_actions);
    Ok(stats)
}
