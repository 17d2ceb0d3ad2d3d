//! Board-mutating primitives.
//!
//! These are the only functions that write `Board` cells or
//! `Piece::position`. The state machine, the catalog's special appliers and
//! the AI all go through them, so each one re-checks bounds, occupancy and
//! fortification itself and validates fully before mutating anything.

use crate::errors::{GameError, GameResult};
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{GameOverReason, Player, Square};
use crate::game_state::piece_registry::PieceId;

fn ensure_on_board(square: Square) -> GameResult<()> {
    if square.is_on_board() {
        Ok(())
    } else {
        Err(GameError::OutOfBounds(square))
    }
}

fn position_of(game_state: &GameState, id: PieceId) -> GameResult<Square> {
    game_state
        .piece(id)
        .ok_or(GameError::UnknownPiece(id))?
        .position
        .ok_or(GameError::PieceNotPlaced(id))
}

/// Bind an unplaced piece to an empty square.
pub fn place_piece(game_state: &mut GameState, id: PieceId, square: Square) -> GameResult<()> {
    ensure_on_board(square)?;
    let piece = game_state.piece(id).ok_or(GameError::UnknownPiece(id))?;
    if piece.position.is_some() {
        return Err(GameError::AlreadyPlaced(id));
    }
    if game_state.board.get(square).is_some() {
        return Err(GameError::SquareOccupied(square));
    }

    game_state.board.set(square, Some(id));
    if let Some(piece) = game_state.pieces.get_mut(id) {
        piece.position = Some(square);
    }
    Ok(())
}

/// Remove a piece from the board. Capturing a captain ends the game for the
/// capturing side immediately.
pub fn capture_piece(game_state: &mut GameState, id: PieceId) -> GameResult<()> {
    let square = position_of(game_state, id)?;
    let victim = game_state.piece(id).ok_or(GameError::UnknownPiece(id))?;
    if victim.is_fortified() {
        return Err(GameError::TargetFortified(square));
    }
    let owner = victim.owner;
    let was_captain = victim.is_captain;
    let label = victim.label();

    game_state.board.set(square, None);
    if let Some(piece) = game_state.pieces.get_mut(id) {
        piece.position = None;
    }
    game_state.events.record(format!("{label} was captured!"));

    if was_captain {
        game_state.end_game(owner.opposite(), GameOverReason::CaptainCaptured);
    }
    Ok(())
}

/// Relocate a placed piece, capturing an enemy on the destination.
///
/// Fails without side effects on a friendly or fortified destination.
/// Returns the captured piece, if any.
pub fn move_piece_to(
    game_state: &mut GameState,
    id: PieceId,
    to: Square,
) -> GameResult<Option<PieceId>> {
    ensure_on_board(to)?;
    let from = position_of(game_state, id)?;
    let mover_owner = game_state.piece(id).ok_or(GameError::UnknownPiece(id))?.owner;

    let captured = match game_state.piece_at(to) {
        None => None,
        Some(target) if target.owner == mover_owner => {
            return Err(GameError::FriendlyOccupied(to));
        }
        Some(target) if target.is_fortified() => return Err(GameError::TargetFortified(to)),
        Some(target) => Some(target.id),
    };

    if let Some(victim) = captured {
        capture_piece(game_state, victim)?;
    }
    game_state.board.set(from, None);
    game_state.board.set(to, Some(id));
    if let Some(piece) = game_state.pieces.get_mut(id) {
        piece.position = Some(to);
    }
    Ok(captured)
}

/// Capture the enemy on `square` without moving `user`.
pub fn special_capture(
    game_state: &mut GameState,
    user: PieceId,
    square: Square,
) -> GameResult<PieceId> {
    ensure_on_board(square)?;
    position_of(game_state, user)?;
    let user_owner = game_state.piece(user).ok_or(GameError::UnknownPiece(user))?.owner;
    let target = game_state
        .piece_at(square)
        .filter(|p| p.owner != user_owner)
        .ok_or(GameError::NoEnemyAt(square))?;
    if target.is_fortified() {
        return Err(GameError::TargetFortified(square));
    }
    let victim = target.id;
    capture_piece(game_state, victim)?;
    Ok(victim)
}

/// Move `user` to an empty square, ignoring anything in between.
pub fn special_teleport(
    game_state: &mut GameState,
    user: PieceId,
    square: Square,
) -> GameResult<()> {
    ensure_on_board(square)?;
    let from = position_of(game_state, user)?;
    if game_state.board.get(square).is_some() {
        return Err(GameError::SquareOccupied(square));
    }
    game_state.board.set(from, None);
    game_state.board.set(square, Some(user));
    if let Some(piece) = game_state.pieces.get_mut(user) {
        piece.position = Some(square);
    }
    Ok(())
}

/// Tick down fortification on every on-board piece of `owner`.
pub fn decay_fortification(game_state: &mut GameState, owner: Player) {
    for piece in game_state.pieces.iter_mut() {
        if piece.owner == owner && piece.position.is_some() && piece.fortified_turns_left > 0 {
            piece.fortified_turns_left -= 1;
        }
    }
}
