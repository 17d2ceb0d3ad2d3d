//! Sentinel: orthogonal slider. Special "Fortify" makes it immune to capture
//! for the next enemy turn.

use crate::errors::{GameError, GameResult};
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::Square;
use crate::game_state::piece_registry::{Piece, PieceId};
use crate::moves::move_shared::{ray_moves, ORTHOGONAL};
use crate::moves::piece_catalog::SpecialTarget;

pub fn ordinary_moves(game_state: &GameState, piece: &Piece) -> Vec<Square> {
    ray_moves(game_state, piece, &ORTHOGONAL)
}

pub fn special_targets(_game_state: &GameState, piece: &Piece) -> Vec<SpecialTarget> {
    if piece.position.is_some() {
        vec![SpecialTarget::SelfStatus]
    } else {
        Vec::new()
    }
}

pub fn apply_special(
    game_state: &mut GameState,
    id: PieceId,
    target: SpecialTarget,
) -> GameResult<Option<PieceId>> {
    match target {
        SpecialTarget::SelfStatus => {
            let piece = game_state
                .pieces
                .get_mut(id)
                .ok_or(GameError::UnknownPiece(id))?;
            if piece.position.is_none() {
                return Err(GameError::PieceNotPlaced(id));
            }
            piece.fortified_turns_left = 1;
            let label = piece.label();
            game_state.events.record(format!("{label} is fortified."));
            Ok(None)
        }
        SpecialTarget::Capture(square) | SpecialTarget::Teleport(square) => {
            Err(GameError::NotASpecialTarget(square))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_types::Player;
    use crate::moves::move_shared::test_support::*;
    use crate::moves::piece_catalog::PieceType;

    #[test]
    fn slides_orthogonally() {
        let mut state = empty_play_state();
        let sentinel = put(&mut state, PieceType::Sentinel, Player::P2, 0, 0);
        put(&mut state, PieceType::Warrior, Player::P1, 3, 0);
        let piece = state.piece(sentinel).expect("placed").clone();
        assert_eq!(
            sorted(ordinary_moves(&state, &piece)),
            vec![sq(0, 1), sq(0, 2), sq(0, 3), sq(0, 4), sq(1, 0), sq(2, 0), sq(3, 0)]
        );
    }

    #[test]
    fn fortify_targets_self_and_sets_counter() {
        let mut state = empty_play_state();
        let sentinel = put(&mut state, PieceType::Sentinel, Player::P1, 4, 2);
        let piece = state.piece(sentinel).expect("placed").clone();
        assert_eq!(special_targets(&state, &piece), vec![SpecialTarget::SelfStatus]);

        assert_eq!(
            apply_special(&mut state, sentinel, SpecialTarget::SelfStatus),
            Ok(None)
        );
        assert_eq!(
            state.piece(sentinel).map(|p| p.fortified_turns_left),
            Some(1)
        );
    }

    #[test]
    fn fortify_rejects_square_targets() {
        let mut state = empty_play_state();
        let sentinel = put(&mut state, PieceType::Sentinel, Player::P1, 4, 2);
        assert_eq!(
            apply_special(&mut state, sentinel, SpecialTarget::Teleport(sq(3, 2))),
            Err(GameError::NotASpecialTarget(sq(3, 2)))
        );
    }
}
