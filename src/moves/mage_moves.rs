//! Mage: diagonal slider. Special "Blink" teleports up to three diagonal
//! steps onto an empty square, never through an occupied one.

use crate::errors::{GameError, GameResult};
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::Square;
use crate::game_state::piece_registry::{Piece, PieceId};
use crate::moves::move_shared::{ray_moves, DIAGONAL};
use crate::moves::piece_catalog::SpecialTarget;
use crate::rules::primitives::special_teleport;

const BLINK_RANGE: i32 = 3;

pub fn ordinary_moves(game_state: &GameState, piece: &Piece) -> Vec<Square> {
    ray_moves(game_state, piece, &DIAGONAL)
}

pub fn special_targets(game_state: &GameState, piece: &Piece) -> Vec<SpecialTarget> {
    let Some(from) = piece.position else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for &(d_row, d_col) in &DIAGONAL {
        for k in 1..=BLINK_RANGE {
            let Some(to) = from.offset(d_row * k, d_col * k) else {
                break;
            };
            if game_state.board.get(to).is_some() {
                break;
            }
            out.push(SpecialTarget::Teleport(to));
        }
    }
    out
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_types::Player;
    use crate::moves::move_shared::test_support::*;
    use crate::moves::piece_catalog::PieceType;

    #[test]
    fn diagonal_ray_captures_first_enemy_only() {
        let mut state = empty_play_state();
        let mage = put(&mut state, PieceType::Mage, Player::P1, 4, 0);
        put(&mut state, PieceType::Warrior, Player::P2, 2, 2);
        let piece = state.piece(mage).expect("placed").clone();
        assert_eq!(sorted(ordinary_moves(&state, &piece)), vec![sq(2, 2), sq(3, 1)]);
    }

    #[test]
    fn blink_stops_at_occupied_square() {
        let mut state = empty_play_state();
        let mage = put(&mut state, PieceType::Mage, Player::P1, 0, 0);
        put(&mut state, PieceType::Warrior, Player::P2, 2, 2);
        let piece = state.piece(mage).expect("placed").clone();
        assert_eq!(
            special_targets(&state, &piece),
            vec![SpecialTarget::Teleport(sq(1, 1))]
        );
    }

    #[test]
    fn blink_reaches_three_squares_on_open_board() {
        let mut state = empty_play_state();
        let mage = put(&mut state, PieceType::Mage, Player::P1, 0, 0);
        let piece = state.piece(mage).expect("placed").clone();
        let squares: Vec<_> = special_targets(&state, &piece)
            .into_iter()
            .filter_map(SpecialTarget::square)
            .collect();
        assert_eq!(squares, vec![sq(1, 1), sq(2, 2), sq(3, 3)]);
    }

    #[test]
    fn blink_relocates_the_mage() {
        let mut state = empty_play_state();
        let mage = put(&mut state, PieceType::Mage, Player::P1, 0, 0);
        assert_eq!(
            apply_special(&mut state, mage, SpecialTarget::Teleport(sq(2, 2))),
            Ok(None)
        );
        assert_eq!(state.board.get(sq(2, 2)), Some(mage));
        assert!(state.board.get(sq(0, 0)).is_none());
    }
}
