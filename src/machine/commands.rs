//! Command surface of the state machine.
//!
//! Every human or AI input is one `Command` passed to `Game::submit`. A
//! rejected command returns a `GameError` and leaves the game unchanged.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::errors::{GameError, GameResult};
use crate::game_state::game_rules::{home_row, DRAFT_INTRO, DRAFT_SIZE};
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Phase, Player, Selection, Square};
use crate::game_state::piece_registry::PieceId;
use crate::machine::game::Game;
use crate::moves::piece_catalog::{self, PieceType, SpecialTarget, ALL_PIECE_TYPES};
use crate::rules::legal_moves::legal_moves;
use crate::rules::primitives::{move_piece_to, place_piece};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Draft pick for the side whose draft turn it is.
    Pick(PieceType),
    /// Skip the draft: random teams and captains, then placement.
    RandomDraft { seed: u64 },
    /// Stage one side's captain; confirms once both sides are staged.
    NominateCaptain { player: Player, kind: PieceType },
    ConfirmCaptains { p1: PieceType, p2: PieceType },
    SelectBenchPiece(PieceId),
    PlaceAt(Square),
    /// Select an own piece, or preview an opponent piece.
    SelectBoardPiece(Square),
    ToggleSpecialMode,
    /// Board click: place, move, special commit, reselect or clear preview.
    ActAt(Square),
    ActivateSelfSpecial,
    SetAiEnabled { player: Player, enabled: bool },
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Picked {
        player: Player,
        kind: PieceType,
    },
    CaptainNominated {
        player: Player,
        kind: PieceType,
    },
    CaptainsAssigned {
        p1: PieceId,
        p2: PieceId,
    },
    BenchPieceSelected(PieceId),
    Placed {
        piece: PieceId,
        square: Square,
    },
    Selected {
        piece: PieceId,
        preview: bool,
    },
    SelectionCleared,
    SpecialModeToggled {
        engaged: bool,
    },
    Moved {
        piece: PieceId,
        from: Square,
        to: Square,
        captured: Option<PieceId>,
    },
    SpecialUsed {
        piece: PieceId,
        target: SpecialTarget,
        captured: Option<PieceId>,
    },
    AiToggled {
        player: Player,
        enabled: bool,
    },
    Restarted,
}

impl Game {
    /// Apply one command.
    pub fn submit(&mut self, command: Command) -> GameResult<CommandOutcome> {
        let result = self.dispatch(command);
        if let Err(err) = &result {
            log::debug!("{command:?} rejected: {err}");
        }
        result
    }

    fn dispatch(&mut self, command: Command) -> GameResult<CommandOutcome> {
        match command {
            Command::SetAiEnabled { player, enabled } => Ok(self.set_ai_enabled(player, enabled)),
            Command::Restart => Ok(self.restart()),
            _ => {
                if self.tick().is_some() {
                    return Err(GameError::WrongPhase(Phase::GameOver));
                }
                if self.ai_in_flight.is_some() {
                    return Err(GameError::AiBusy);
                }
                self.dispatch_input(command)
            }
        }
    }

    fn dispatch_input(&mut self, command: Command) -> GameResult<CommandOutcome> {
        match command {
            Command::Pick(kind) => self.pick(kind),
            Command::RandomDraft { seed } => self.random_draft(seed),
            Command::NominateCaptain { player, kind } => self.nominate_captain(player, kind),
            Command::ConfirmCaptains { p1, p2 } => self.confirm_captains(p1, p2),
            Command::SelectBenchPiece(id) => self.select_bench_piece(id),
            Command::PlaceAt(square) => self.place_at(square),
            Command::SelectBoardPiece(square) => self.select_board_piece(square),
            Command::ToggleSpecialMode => self.toggle_special_mode(),
            Command::ActAt(square) => self.act_at(square),
            Command::ActivateSelfSpecial => self.activate_self_special(),
            Command::SetAiEnabled { player, enabled } => Ok(self.set_ai_enabled(player, enabled)),
            Command::Restart => Ok(self.restart()),
        }
    }

    // --- Draft ---

    fn pick(&mut self, kind: PieceType) -> GameResult<CommandOutcome> {
        self.ensure_phase(Phase::Draft)?;
        let player = self.state.draft_turn;
        let drafted = &self.state.player(player).drafted;
        if drafted.contains(&kind) {
            return Err(GameError::AlreadyPicked(player, kind));
        }
        if drafted.len() >= DRAFT_SIZE {
            return Err(GameError::DraftFull(player));
        }

        self.state.player_mut(player).drafted.push(kind);
        let name = self.state.player(player).name.clone();
        self.state.events.record(format!("{name} picked {kind}."));
        self.action_count += 1;

        let full = |state: &GameState, p: Player| state.player(p).drafted.len() >= DRAFT_SIZE;
        if full(&self.state, Player::P1) && full(&self.state, Player::P2) {
            self.state.phase = Phase::Captain;
            self.state.events.record("Draft complete. Assign captains.");
        } else if !full(&self.state, player.opposite()) {
            self.state.draft_turn = player.opposite();
        }
        Ok(CommandOutcome::Picked { player, kind })
    }

    fn random_draft(&mut self, seed: u64) -> GameResult<CommandOutcome> {
        self.ensure_phase(Phase::Draft)?;
        if Player::ALL
            .iter()
            .any(|&p| !self.state.player(p).drafted.is_empty())
        {
            return Err(GameError::DraftAlreadyStarted);
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut captains = [PieceType::Warrior; 2];
        for player in Player::ALL {
            let mut kinds = ALL_PIECE_TYPES.to_vec();
            kinds.shuffle(&mut rng);
            kinds.truncate(DRAFT_SIZE);
            captains[player.index()] = kinds[rng.random_range(0..kinds.len())];
            self.state.player_mut(player).drafted = kinds;
        }
        self.state.events.record("Random draft applied.");
        self.state.phase = Phase::Captain;
        self.confirm_captains(captains[0], captains[1])
    }

    // --- Captains ---

    fn nominate_captain(&mut self, player: Player, kind: PieceType) -> GameResult<CommandOutcome> {
        if self.state.captains_assigned {
            return Err(GameError::CaptainsAlreadyAssigned);
        }
        self.ensure_phase(Phase::Captain)?;
        if !self.state.player(player).drafted.contains(&kind) {
            return Err(GameError::NotDrafted(player, kind));
        }
        self.state.captain_nominations[player.index()] = Some(kind);
        self.action_count += 1;

        if let [Some(p1), Some(p2)] = self.state.captain_nominations {
            return self.confirm_captains(p1, p2);
        }
        Ok(CommandOutcome::CaptainNominated { player, kind })
    }

    fn confirm_captains(&mut self, p1: PieceType, p2: PieceType) -> GameResult<CommandOutcome> {
        if self.state.captains_assigned {
            return Err(GameError::CaptainsAlreadyAssigned);
        }
        self.ensure_phase(Phase::Captain)?;
        for (player, kind) in [(Player::P1, p1), (Player::P2, p2)] {
            if !self.state.player(player).drafted.contains(&kind) {
                return Err(GameError::NotDrafted(player, kind));
            }
        }

        let mut captain_ids = [PieceId(0); 2];
        for (player, captain) in [(Player::P1, p1), (Player::P2, p2)] {
            let drafted = self.state.player(player).drafted.clone();
            let mut bench = Vec::with_capacity(drafted.len());
            for kind in drafted {
                let id = self.state.pieces.create(kind, player);
                if kind == captain {
                    if let Some(piece) = self.state.pieces.get_mut(id) {
                        piece.is_captain = true;
                    }
                    captain_ids[player.index()] = id;
                }
                bench.push(id);
            }
            self.state.player_mut(player).bench = bench;
            self.state.captain_nominations[player.index()] = Some(captain);
        }
        self.state.captains_assigned = true;
        self.state
            .events
            .record(format!("Captains assigned: P1 - {p1}, P2 - {p2}."));
        self.action_count += 1;
        self.begin_placement();
        Ok(CommandOutcome::CaptainsAssigned {
            p1: captain_ids[0],
            p2: captain_ids[1],
        })
    }

    // --- Placement ---

    fn select_bench_piece(&mut self, id: PieceId) -> GameResult<CommandOutcome> {
        self.ensure_phase(Phase::Placement)?;
        let placer = self.state.placement_turn;
        if self.state.player(placer).bench.contains(&id) {
            self.state.selection = Selection::Own {
                piece: id,
                special_mode: false,
            };
            return Ok(CommandOutcome::BenchPieceSelected(id));
        }
        if self.state.player(placer.opposite()).bench.contains(&id) {
            return Err(GameError::NotYourTurn(placer));
        }
        Err(GameError::NotOnBench(id))
    }

    fn place_at(&mut self, square: Square) -> GameResult<CommandOutcome> {
        self.ensure_phase(Phase::Placement)?;
        let placer = self.state.placement_turn;
        if !square.is_on_board() {
            return Err(GameError::OutOfBounds(square));
        }
        let row = home_row(placer);
        if square.row != row {
            return Err(GameError::NotHomeRow(row));
        }
        let Selection::Own { piece: id, .. } = self.state.selection else {
            return Err(GameError::NothingSelected);
        };
        let owner = self.piece(id).ok_or(GameError::UnknownPiece(id))?.owner;
        if owner != placer {
            return Err(GameError::NotYourTurn(placer));
        }
        if !self.state.player(placer).bench.contains(&id) {
            return Err(GameError::NotOnBench(id));
        }

        place_piece(&mut self.state, id, square)?;
        self.state.player_mut(placer).bench.retain(|&b| b != id);
        self.state.selection = Selection::None;
        if let Some(piece) = self.state.piece(id) {
            let label = piece.label();
            self.state.events.record(format!("{label} placed at {square}."));
        }
        self.action_count += 1;

        let bench_empty = |p: Player| self.state.player(p).bench.is_empty();
        if bench_empty(Player::P1) && bench_empty(Player::P2) {
            self.begin_play();
        } else if !bench_empty(placer.opposite()) {
            self.state.placement_turn = placer.opposite();
        }
        Ok(CommandOutcome::Placed { piece: id, square })
    }

    // --- Play ---

    fn active_player(&self) -> GameResult<Player> {
        self.ensure_phase(Phase::Play)?;
        self.state
            .active_player
            .ok_or(GameError::WrongPhase(self.state.phase))
    }

    fn select_board_piece(&mut self, square: Square) -> GameResult<CommandOutcome> {
        let turn = self.active_player()?;
        if !square.is_on_board() {
            return Err(GameError::OutOfBounds(square));
        }
        let piece = self.piece_at(square).ok_or(GameError::EmptySquare(square))?;
        let (id, owner) = (piece.id, piece.owner);

        if owner == turn {
            self.state.selection = Selection::Own {
                piece: id,
                special_mode: false,
            };
            return Ok(CommandOutcome::Selected {
                piece: id,
                preview: false,
            });
        }
        if matches!(self.state.selection, Selection::Own { .. }) {
            return Err(GameError::PreviewBlocked);
        }
        self.state.selection = Selection::Preview { piece: id };
        Ok(CommandOutcome::Selected {
            piece: id,
            preview: true,
        })
    }

    fn own_selection(&self) -> GameResult<(PieceId, bool)> {
        match self.state.selection {
            Selection::Own {
                piece,
                special_mode,
            } => Ok((piece, special_mode)),
            Selection::None | Selection::Preview { .. } => Err(GameError::NothingSelected),
        }
    }

    fn toggle_special_mode(&mut self) -> GameResult<CommandOutcome> {
        self.active_player()?;
        let (id, special_mode) = self.own_selection()?;
        let piece = self.piece(id).ok_or(GameError::UnknownPiece(id))?;
        if !special_mode && piece.special_used {
            return Err(GameError::SpecialAlreadyUsed);
        }
        let engaged = !special_mode;
        self.state.selection = Selection::Own {
            piece: id,
            special_mode: engaged,
        };
        Ok(CommandOutcome::SpecialModeToggled { engaged })
    }

    fn act_at(&mut self, square: Square) -> GameResult<CommandOutcome> {
        if self.state.phase == Phase::Placement {
            return self.place_at(square);
        }
        let turn = self.active_player()?;
        if !square.is_on_board() {
            return Err(GameError::OutOfBounds(square));
        }
        let clicked_own = self.piece_at(square).is_some_and(|p| p.owner == turn);

        match self.state.selection {
            Selection::Own {
                piece,
                special_mode: true,
            } => self.commit_special_at(piece, square),
            Selection::Own {
                piece,
                special_mode: false,
            } => {
                if legal_moves(&self.state, piece).contains(&square) {
                    self.commit_move(piece, square)
                } else if clicked_own {
                    self.select_board_piece(square)
                } else {
                    Err(GameError::IllegalMove(square))
                }
            }
            Selection::Preview { .. } => {
                if clicked_own {
                    self.select_board_piece(square)
                } else {
                    self.state.selection = Selection::None;
                    Ok(CommandOutcome::SelectionCleared)
                }
            }
            Selection::None => {
                if self.piece_at(square).is_some() {
                    self.select_board_piece(square)
                } else {
                    Err(GameError::EmptySquare(square))
                }
            }
        }
    }

    fn activate_self_special(&mut self) -> GameResult<CommandOutcome> {
        self.active_player()?;
        let (id, _) = self.own_selection()?;
        let piece = self.piece(id).ok_or(GameError::UnknownPiece(id))?;
        if piece.special_used {
            return Err(GameError::SpecialAlreadyUsed);
        }
        let targets = piece_catalog::special_targets(&self.state, piece);
        if !targets.contains(&SpecialTarget::SelfStatus) {
            return Err(GameError::NoSelfSpecial);
        }
        self.commit_special(id, SpecialTarget::SelfStatus)
    }

    fn commit_special_at(&mut self, id: PieceId, square: Square) -> GameResult<CommandOutcome> {
        let piece = self.piece(id).ok_or(GameError::UnknownPiece(id))?;
        if piece.special_used {
            return Err(GameError::SpecialAlreadyUsed);
        }
        let targets = piece_catalog::special_targets(&self.state, piece);
        let target = targets
            .iter()
            .copied()
            .find(|t| t.square() == Some(square))
            .or_else(|| {
                (piece.position == Some(square) && targets.contains(&SpecialTarget::SelfStatus))
                    .then_some(SpecialTarget::SelfStatus)
            })
            .ok_or(GameError::NotASpecialTarget(square))?;
        self.commit_special(id, target)
    }

    fn commit_special(&mut self, id: PieceId, target: SpecialTarget) -> GameResult<CommandOutcome> {
        let turn = self.active_player()?;
        let piece = self.piece(id).ok_or(GameError::UnknownPiece(id))?;
        if piece.owner != turn {
            return Err(GameError::NotYourTurn(turn));
        }
        let (label, kind) = (piece.label(), piece.kind);

        let captured = piece_catalog::apply_special(&mut self.state, id, target)?;
        if let Some(piece) = self.state.pieces.get_mut(id) {
            piece.special_used = true;
        }
        self.state
            .events
            .record(format!("{label} used {}.", kind.special_name()));
        self.action_count += 1;
        self.finish_action(turn);
        Ok(CommandOutcome::SpecialUsed {
            piece: id,
            target,
            captured,
        })
    }

    fn commit_move(&mut self, id: PieceId, to: Square) -> GameResult<CommandOutcome> {
        let turn = self.active_player()?;
        let piece = self.piece(id).ok_or(GameError::UnknownPiece(id))?;
        if piece.owner != turn {
            return Err(GameError::NotYourTurn(turn));
        }
        let from = piece.position.ok_or(GameError::PieceNotPlaced(id))?;
        let label = piece.label();

        let captured = move_piece_to(&mut self.state, id, to)?;
        self.state
            .events
            .record(format!("{label} moved {from} -> {to}."));
        self.action_count += 1;
        self.finish_action(turn);
        Ok(CommandOutcome::Moved {
            piece: id,
            from,
            to,
            captured,
        })
    }

    // --- Session ---

    fn set_ai_enabled(&mut self, player: Player, enabled: bool) -> CommandOutcome {
        self.state.ai_enabled[player.index()] = enabled;
        if !enabled && self.ai_in_flight.is_some_and(|t| t.actor == player) {
            self.ai_in_flight = None;
        }
        CommandOutcome::AiToggled { player, enabled }
    }

    fn restart(&mut self) -> CommandOutcome {
        self.state = GameState::new(&self.config);
        self.generation += 1;
        self.action_count = 0;
        self.ai_in_flight = None;
        self.state.events.record("New game.");
        self.state.events.record(DRAFT_INTRO);
        CommandOutcome::Restarted
    }
}
