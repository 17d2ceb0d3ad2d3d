//! Top-level game driver.
//!
//! `Game` owns the `GameState`, the time source and the bookkeeping used to
//! detect stale AI work. All mutation goes through `Game::submit` (see
//! `machine::commands`); everything in this file is read-only queries plus the
//! transitions shared by several commands.

use crate::errors::{GameError, GameResult};
use crate::game_state::game_rules::{home_row, GameConfig, COLS, DRAFT_INTRO};
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{GameOutcome, Phase, Player, Selection, Square};
use crate::game_state::piece_registry::{Piece, PieceId};
use crate::machine::scheduler::AiTicket;
use crate::machine::time_source::{MonotonicTime, TimeSource};
use crate::moves::piece_catalog::SpecialTarget;
use crate::rules::legal_moves::{legal_moves, legal_special_targets};
use crate::rules::primitives::decay_fortification;

pub struct Game {
    pub(crate) state: GameState,
    pub(crate) config: GameConfig,
    pub(crate) time: Box<dyn TimeSource>,
    /// Bumped on restart.
    pub(crate) generation: u64,
    /// Bumped on every committed pick, captain choice, placement and action.
    pub(crate) action_count: u64,
    /// Outstanding AI ticket; doubles as the "AI busy" guard.
    pub(crate) ai_in_flight: Option<AiTicket>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("phase", &self.state.phase)
            .field("generation", &self.generation)
            .field("action_count", &self.action_count)
            .field("ai_in_flight", &self.ai_in_flight)
            .finish_non_exhaustive()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::with_time_source(config, Box::new(MonotonicTime::new()))
    }

    pub fn with_time_source(config: GameConfig, time: Box<dyn TimeSource>) -> Self {
        let mut state = GameState::new(&config);
        state.events.record(DRAFT_INTRO);
        Self {
            state,
            config,
            time,
            generation: 0,
            action_count: 0,
            ai_in_flight: None,
        }
    }

    // --- Queries ---

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.time.now_ms()
    }

    /// Side whose input the current phase is waiting for.
    pub fn current_actor(&self) -> Option<Player> {
        self.state.current_actor()
    }

    #[inline]
    pub fn selection(&self) -> Selection {
        self.state.selection
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.state.piece(id)
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.state.piece_at(square)
    }

    pub fn legal_moves(&self, id: PieceId) -> Vec<Square> {
        legal_moves(&self.state, id)
    }

    pub fn legal_special_targets(&self, id: PieceId) -> Vec<SpecialTarget> {
        legal_special_targets(&self.state, id)
    }

    /// Squares to highlight for the current selection: special targets in
    /// special mode (the piece's own square for a self special), otherwise
    /// ordinary moves. Previews show the opponent piece's moves.
    pub fn selection_targets(&self) -> Vec<Square> {
        let Some(id) = self.state.selection.piece() else {
            return Vec::new();
        };
        if self.state.phase != Phase::Play {
            return Vec::new();
        }
        if self.state.selection.special_mode() {
            let own_square = self.piece(id).and_then(|p| p.position);
            self.legal_special_targets(id)
                .into_iter()
                .filter_map(|t| t.square().or(own_square))
                .collect()
        } else {
            self.legal_moves(id)
        }
    }

    /// Empty home-row squares for the side to place.
    pub fn placement_squares(&self) -> Vec<Square> {
        if self.state.phase != Phase::Placement {
            return Vec::new();
        }
        let row = home_row(self.state.placement_turn);
        (0..COLS)
            .map(|col| Square::new(row, col))
            .filter(|&sq| self.state.board.is_empty_at(sq))
            .collect()
    }

    /// Remaining clock for `player`, including time elapsed since the last
    /// tick if their clock is running. Never negative.
    pub fn remaining_time_ms(&self, player: Player) -> u64 {
        let stored = self.state.player(player).time_ms;
        if self.state.phase == Phase::Play && self.state.clock.running_for() == Some(player) {
            let mut clock = self.state.clock;
            let elapsed = clock
                .take_elapsed(self.now_ms())
                .map_or(0, |(_, elapsed)| elapsed);
            stored.saturating_sub(elapsed)
        } else {
            stored
        }
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.state.outcome
    }

    pub fn is_ai_enabled(&self, player: Player) -> bool {
        self.state.ai_enabled[player.index()]
    }

    pub fn is_ai_busy(&self) -> bool {
        self.ai_in_flight.is_some()
    }

    // --- Clock ---

    /// Evaluate the running clock. Returns the player who just ran out of
    /// time, if any.
    pub fn tick(&mut self) -> Option<Player> {
        let now = self.now_ms();
        let expired = self.state.settle_clock(now);
        if expired.is_some() {
            self.ai_in_flight = None;
        }
        expired
    }

    // --- Shared transitions ---

    pub(crate) fn ensure_phase(&self, phase: Phase) -> GameResult<()> {
        if self.state.phase == phase {
            Ok(())
        } else {
            Err(GameError::WrongPhase(self.state.phase))
        }
    }

    pub(crate) fn begin_placement(&mut self) {
        self.state.phase = Phase::Placement;
        self.state.placement_turn = Player::P1;
        self.state.selection = Selection::None;
        self.state
            .events
            .record("Placement: Alternate placing pieces. P1 starts on bottom row.");
    }

    pub(crate) fn begin_play(&mut self) {
        let now = self.now_ms();
        self.state.phase = Phase::Play;
        self.state.selection = Selection::None;
        self.state.active_player = Some(Player::P1);
        self.state.clock.start(Player::P1, now);
        self.state.events.record("Game start! P1 to move.");
    }

    /// Hand the turn over after `actor` committed a move or special.
    ///
    /// Skipped entirely when the action ended the game.
    pub(crate) fn finish_action(&mut self, actor: Player) {
        if self.state.phase == Phase::GameOver {
            return;
        }
        let next = actor.opposite();
        self.state.selection = Selection::None;
        decay_fortification(&mut self.state, next);
        self.state.active_player = Some(next);
        let now = self.now_ms();
        self.state.clock.start(next, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::time_source::ManualTime;

    #[test]
    fn fresh_game_waits_on_p1_draft() {
        let game = Game::with_time_source(GameConfig::default(), Box::new(ManualTime::new()));
        assert_eq!(game.phase(), Phase::Draft);
        assert_eq!(game.current_actor(), Some(Player::P1));
        assert_eq!(game.remaining_time_ms(Player::P1), 90_000);
        assert!(game.placement_squares().is_empty());
        assert!(!game.is_ai_busy());
        assert_eq!(game.state().events.len(), 1);
    }
}
