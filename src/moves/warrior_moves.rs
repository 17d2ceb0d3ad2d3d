//! Warrior: one orthogonal step. Special "Bash" removes an orthogonally
//! adjacent enemy without moving.

use crate::errors::{GameError, GameResult};
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::Square;
use crate::game_state::piece_registry::{Piece, PieceId};
use crate::moves::move_shared::{adjacent_enemies, step_moves, ORTHOGONAL};
use crate::moves::piece_catalog::SpecialTarget;
use crate::rules::primitives::special_capture;

pub fn ordinary_moves(game_state: &GameState, piece: &Piece) -> Vec<Square> {
    step_moves(game_state, piece, &ORTHOGONAL, 1)
}

pub fn special_targets(game_state: &GameState, piece: &Piece) -> Vec<SpecialTarget> {
    adjacent_enemies(game_state, piece, &ORTHOGONAL)
        .into_iter()
        .map(SpecialTarget::Capture)
        .collect()
}

pub fn apply_special(
    game_state: &mut GameState,
    id: PieceId,
    target: SpecialTarget,
) -> GameResult<Option<PieceId>> {
    match target {
        SpecialTarget::Capture(square) => special_capture(game_state, id, square).map(Some),
        SpecialTarget::Teleport(square) => Err(GameError::NotASpecialTarget(square)),
        SpecialTarget::SelfStatus => Err(GameError::NoSelfSpecial),
    }
}
