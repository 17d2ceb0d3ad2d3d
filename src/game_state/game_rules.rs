//! Fixed rule constants for the draft variant.
//!
//! Board size and starting time are not configurable; everything that may be
//! tuned at runtime lives in `GameConfig`.

use crate::game_state::game_types::Player;

/// Number of board rows.
pub const ROWS: usize = 5;

/// Number of board columns.
pub const COLS: usize = 5;

/// Starting clock budget per player in milliseconds.
pub const STARTING_TIME_MS: u64 = 90_000;

/// Number of unique piece types each player drafts.
pub const DRAFT_SIZE: usize = 4;

/// Clock polling resolution used by front-ends.
pub const CLOCK_TICK_MS: u64 = 100;

/// Simulated "thinking" latency before a scheduled AI action may fire.
pub const AI_THINK_DELAY_MS: u64 = 400;

pub const DRAFT_INTRO: &str = "Draft Phase: P1 begins picking. 4 unique pieces per team.";

/// Row on which `player` deploys pieces during placement.
///
/// P1 owns the bottom row, P2 the top row.
#[inline]
pub const fn home_row(player: Player) -> usize {
    match player {
        Player::P1 => ROWS - 1,
        Player::P2 => 0,
    }
}

/// Runtime knobs for a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub starting_time_ms: u64,
    pub tick_interval_ms: u64,
    pub ai_think_delay_ms: u64,
    /// Indexed by `Player::index()`.
    pub ai_enabled: [bool; 2],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_time_ms: STARTING_TIME_MS,
            tick_interval_ms: CLOCK_TICK_MS,
            ai_think_delay_ms: AI_THINK_DELAY_MS,
            ai_enabled: [false, false],
        }
    }
}
