//! Ranger: one step in any of eight directions. Special "Shoot" hits an enemy
//! two squares away orthogonally when the square in between is empty.

use crate::errors::{GameError, GameResult};
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::Square;
use crate::game_state::piece_registry::{Piece, PieceId};
use crate::moves::move_shared::{is_enemy_at, step_moves, ALL_DIRECTIONS, ORTHOGONAL};
use crate::moves::piece_catalog::SpecialTarget;
use crate::rules::primitives::special_capture;

pub fn ordinary_moves(game_state: &GameState, piece: &Piece) -> Vec<Square> {
    step_moves(game_state, piece, &ALL_DIRECTIONS, 1)
}

pub fn special_targets(game_state: &GameState, piece: &Piece) -> Vec<SpecialTarget> {
    let Some(from) = piece.position else {
        return Vec::new();
    };
    // Diagonal shots are not part of the ability.
    ORTHOGONAL
        .iter()
        .filter_map(|&(d_row, d_col)| {
            let near = from.offset(d_row, d_col)?;
            let far = from.offset(2 * d_row, 2 * d_col)?;
            (game_state.board.get(near).is_none() && is_enemy_at(game_state, piece, far))
                .then_some(SpecialTarget::Capture(far))
        })
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_types::Player;
    use crate::moves::move_shared::test_support::*;
    use crate::moves::piece_catalog::PieceType;

    #[test]
    fn moves_one_step_in_eight_directions() {
        let mut state = empty_play_state();
        let ranger = put(&mut state, PieceType::Ranger, Player::P1, 0, 0);
        put(&mut state, PieceType::Mage, Player::P1, 1, 1);
        let piece = state.piece(ranger).expect("placed").clone();
        assert_eq!(sorted(ordinary_moves(&state, &piece)), vec![sq(0, 1), sq(1, 0)]);
    }

    #[test]
    fn shoot_needs_a_clear_middle_square() {
        let mut state = empty_play_state();
        let ranger = put(&mut state, PieceType::Ranger, Player::P1, 2, 2);
        put(&mut state, PieceType::Warrior, Player::P2, 0, 2);
        put(&mut state, PieceType::Rogue, Player::P2, 2, 4);
        put(&mut state, PieceType::Mage, Player::P2, 2, 1);
        put(&mut state, PieceType::Sentinel, Player::P2, 2, 0);
        put(&mut state, PieceType::Warrior, Player::P2, 4, 4);
        let piece = state.piece(ranger).expect("placed").clone();

        let mut targets = special_targets(&state, &piece);
        targets.sort_by_key(|t| t.square());
        assert_eq!(
            targets,
            vec![
                SpecialTarget::Capture(sq(0, 2)),
                SpecialTarget::Capture(sq(2, 4))
            ]
        );
    }

    #[test]
    fn shoot_ignores_friendly_pieces() {
        let mut state = empty_play_state();
        let ranger = put(&mut state, PieceType::Ranger, Player::P2, 2, 2);
        put(&mut state, PieceType::Warrior, Player::P2, 4, 2);
        let piece = state.piece(ranger).expect("placed").clone();
        assert!(special_targets(&state, &piece).is_empty());
    }
}
