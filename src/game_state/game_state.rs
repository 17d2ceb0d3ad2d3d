//! The owned session aggregate.
//!
//! `GameState` is plain data threaded through the rules and the state machine.
//! It never reaches for ambient state; the current time is always passed in.

use crate::game_state::board::Board;
use crate::game_state::clock::Clock;
use crate::game_state::events::EventLog;
use crate::game_state::game_rules::GameConfig;
use crate::game_state::game_types::{GameOutcome, GameOverReason, Phase, Player, Selection, Square};
use crate::game_state::piece_registry::{Piece, PieceId, PieceRegistry};
use crate::moves::piece_catalog::PieceType;

#[derive(Debug, Clone)]
pub struct PlayerState {
    pub name: String,
    /// Drafted types in pick order, unique, at most `DRAFT_SIZE`.
    pub drafted: Vec<PieceType>,
    /// Pieces created at captain confirmation and not yet placed.
    pub bench: Vec<PieceId>,
    pub time_ms: u64,
}

impl PlayerState {
    fn new(player: Player, time_ms: u64) -> Self {
        Self {
            name: player.display_name().to_string(),
            drafted: Vec::new(),
            bench: Vec::new(),
            time_ms,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: Phase,
    pub board: Board,
    pub pieces: PieceRegistry,
    /// Indexed by `Player::index()`.
    pub players: [PlayerState; 2],
    pub draft_turn: Player,
    pub placement_turn: Player,
    /// Side to move during play; `None` before play starts.
    pub active_player: Option<Player>,
    pub selection: Selection,
    pub outcome: Option<GameOutcome>,
    pub ai_enabled: [bool; 2],
    pub captains_assigned: bool,
    /// Staged captain choices, confirmed once both sides have one.
    pub captain_nominations: [Option<PieceType>; 2],
    pub clock: Clock,
    pub events: EventLog,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            phase: Phase::Draft,
            board: Board::default(),
            pieces: PieceRegistry::default(),
            players: [
                PlayerState::new(Player::P1, config.starting_time_ms),
                PlayerState::new(Player::P2, config.starting_time_ms),
            ],
            draft_turn: Player::P1,
            placement_turn: Player::P1,
            active_player: None,
            selection: Selection::None,
            outcome: None,
            ai_enabled: config.ai_enabled,
            captains_assigned: false,
            captain_nominations: [None, None],
            clock: Clock::default(),
            events: EventLog::default(),
        }
    }

    #[inline]
    pub fn player(&self, player: Player) -> &PlayerState {
        &self.players[player.index()]
    }

    #[inline]
    pub fn player_mut(&mut self, player: Player) -> &mut PlayerState {
        &mut self.players[player.index()]
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id)
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.board.get(square).and_then(|id| self.pieces.get(id))
    }

    /// Pieces of `owner` that are currently on the board, row-major.
    pub fn pieces_on_board(&self, owner: Player) -> Vec<&Piece> {
        self.board
            .occupied()
            .filter_map(|(_, id)| self.pieces.get(id))
            .filter(|p| p.owner == owner)
            .collect()
    }

    pub fn captain_of(&self, owner: Player) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| p.owner == owner && p.is_captain)
    }

    /// Enter the terminal phase. Stops the clock and drops any selection.
    /// A second call keeps the first outcome.
    pub fn end_game(&mut self, winner: Player, reason: GameOverReason) {
        if self.phase == Phase::GameOver {
            return;
        }
        let outcome = GameOutcome { winner, reason };
        self.phase = Phase::GameOver;
        self.outcome = Some(outcome);
        self.clock.stop();
        self.selection = Selection::None;
        self.events.record(outcome.message());
    }

    /// Debit the running player's budget with time elapsed since the last
    /// anchor. Returns the expired player when the budget reaches zero; the
    /// game is over at that point.
    pub fn settle_clock(&mut self, now_ms: u64) -> Option<Player> {
        if self.phase != Phase::Play {
            return None;
        }
        let (player, elapsed) = self.clock.take_elapsed(now_ms)?;
        let remaining = &mut self.players[player.index()].time_ms;
        *remaining = remaining.saturating_sub(elapsed);
        if *remaining == 0 {
            self.events
                .record(format!("{} ran out of time.", player.display_name()));
            self.end_game(player.opposite(), GameOverReason::Timeout);
            return Some(player);
        }
        None
    }

    /// Whose input the current phase is waiting for, if anyone's.
    ///
    /// During the captain phase this is the first side without a nomination.
    pub fn current_actor(&self) -> Option<Player> {
        match self.phase {
            Phase::Draft => Some(self.draft_turn),
            Phase::Captain => Player::ALL
                .into_iter()
                .find(|p| self.captain_nominations[p.index()].is_none()),
            Phase::Placement => Some(self.placement_turn),
            Phase::Play => self.active_player,
            Phase::GameOver => None,
        }
    }
}
