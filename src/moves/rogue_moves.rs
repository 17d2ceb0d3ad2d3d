//! Rogue: knight jumps. Special "Leap" teleports to any empty square on the
//! Chebyshev ring of radius two.

use crate::errors::{GameError, GameResult};
use crate::game_state::board::Board;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::Square;
use crate::game_state::piece_registry::{Piece, PieceId};
use crate::moves::move_shared::{jump_moves, KNIGHT_OFFSETS};
use crate::moves::piece_catalog::SpecialTarget;
use crate::rules::primitives::special_teleport;

const LEAP_RADIUS: usize = 2;

pub fn ordinary_moves(game_state: &GameState, piece: &Piece) -> Vec<Square> {
    jump_moves(game_state, piece, &KNIGHT_OFFSETS)
}

pub fn special_targets(game_state: &GameState, piece: &Piece) -> Vec<SpecialTarget> {
    let Some(from) = piece.position else {
        return Vec::new();
    };
    Board::squares()
        .filter(|&to| from.chebyshev_distance(to) == LEAP_RADIUS)
        .filter(|&to| game_state.board.is_empty_at(to))
        .map(SpecialTarget::Teleport)
        .collect()
}

pub fn apply_special(
    game_state: &mut GameState,
    id: PieceId,
    target: SpecialTarget,
) -> GameResult<Option<PieceId>> {
    match target {
        SpecialTarget::Teleport(square) => special_teleport(game_state, id, square).map(|_| None),
        SpecialTarget::Capture(square) => Err(GameError::NotASpecialTarget(square)),
        SpecialTarget::SelfStatus => Err(GameError::NoSelfSpecial),
    }
}
