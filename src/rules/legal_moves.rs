//! Legal move and special-target queries.
//!
//! Wraps the catalog's raw generators with the rules that apply to every
//! type: a fortified enemy can never be landed on or special-captured, and a
//! spent special has no targets.

use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Player, Square};
use crate::game_state::piece_registry::{Piece, PieceId};
use crate::moves::piece_catalog::{self, SpecialTarget};

fn is_fortified_enemy(game_state: &GameState, piece: &Piece, square: Square) -> bool {
    game_state
        .piece_at(square)
        .is_some_and(|t| t.owner != piece.owner && t.is_fortified())
}

pub fn legal_moves(game_state: &GameState, id: PieceId) -> Vec<Square> {
    let Some(piece) = game_state.piece(id) else {
        return Vec::new();
    };
    piece_catalog::ordinary_moves(game_state, piece)
        .into_iter()
        .filter(|&to| !is_fortified_enemy(game_state, piece, to))
        .collect()
}

pub fn legal_special_targets(game_state: &GameState, id: PieceId) -> Vec<SpecialTarget> {
    let Some(piece) = game_state.piece(id) else {
        return Vec::new();
    };
    if piece.special_used {
        return Vec::new();
    }
    piece_catalog::special_targets(game_state, piece)
        .into_iter()
        .filter(|target| match target {
            SpecialTarget::Capture(square) => !is_fortified_enemy(game_state, piece, *square),
            SpecialTarget::Teleport(_) | SpecialTarget::SelfStatus => true,
        })
        .collect()
}

/// One candidate action for `owner`, as seen by the AI and the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateAction {
    Move {
        piece: PieceId,
        from: Square,
        to: Square,
    },
    Special {
        piece: PieceId,
        from: Square,
        target: SpecialTarget,
    },
}

impl CandidateAction {
    /// Piece that would be removed by this action, if any.
    pub fn victim<'a>(&self, game_state: &'a GameState) -> Option<&'a Piece> {
        let square = match *self {
            CandidateAction::Move { to, .. } => to,
            CandidateAction::Special {
                target: SpecialTarget::Capture(square),
                ..
            } => square,
            CandidateAction::Special { .. } => return None,
        };
        game_state.piece_at(square)
    }
}

/// Every legal move and special of `owner`'s on-board pieces, row-major.
pub fn all_candidate_actions(game_state: &GameState, owner: Player) -> Vec<CandidateAction> {
    let mut out = Vec::new();
    for piece in game_state.pieces_on_board(owner) {
        let Some(from) = piece.position else {
            continue;
        };
        out.extend(
            legal_moves(game_state, piece.id)
                .into_iter()
                .map(|to| CandidateAction::Move {
                    piece: piece.id,
                    from,
                    to,
                }),
        );
        out.extend(
            legal_special_targets(game_state, piece.id)
                .into_iter()
                .map(|target| CandidateAction::Special {
                    piece: piece.id,
                    from,
                    target,
                }),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_types::Player;
    use crate::moves::move_shared::test_support::*;
    use crate::moves::piece_catalog::{PieceType, ALL_PIECE_TYPES};

    #[test]
    fn fortified_enemy_is_filtered_from_moves_and_specials() {
        let mut state = empty_play_state();
        let warrior = put(&mut state, PieceType::Warrior, Player::P1, 2, 2);
        let sentinel = put(&mut state, PieceType::Sentinel, Player::P2, 2, 3);
        if let Some(p) = state.pieces.get_mut(sentinel) {
            p.fortified_turns_left = 1;
        }

        assert!(!legal_moves(&state, warrior).contains(&sq(2, 3)));
        assert!(legal_special_targets(&state, warrior).is_empty());

        if let Some(p) = state.pieces.get_mut(sentinel) {
            p.fortified_turns_left = 0;
        }
        assert!(legal_moves(&state, warrior).contains(&sq(2, 3)));
        assert_eq!(
            legal_special_targets(&state, warrior),
            vec![SpecialTarget::Capture(sq(2, 3))]
        );
    }

    #[test]
    fn used_special_has_no_targets() {
        let mut state = empty_play_state();
        let sentinel = put(&mut state, PieceType::Sentinel, Player::P1, 4, 4);
        if let Some(p) = state.pieces.get_mut(sentinel) {
            p.special_used = true;
        }
        assert!(legal_special_targets(&state, sentinel).is_empty());
    }

    #[test]
    fn no_type_ever_lands_on_its_own_side() {
        for kind in ALL_PIECE_TYPES {
            let mut state = empty_play_state();
            let mover = put(&mut state, kind, Player::P1, 2, 2);
            for (row, col) in [(1, 1), (1, 2), (2, 1), (0, 1), (3, 4), (4, 4), (0, 0)] {
                put(&mut state, PieceType::Warrior, Player::P1, row, col);
            }
            for to in legal_moves(&state, mover) {
                let occupant = state.piece_at(to).map(|p| p.owner);
                assert_ne!(occupant, Some(Player::P1), "{kind} landed on own piece at {to}");
            }
        }
    }

    #[test]
    fn candidate_actions_report_victims() {
        let mut state = empty_play_state();
        put(&mut state, PieceType::Warrior, Player::P1, 2, 2);
        put(&mut state, PieceType::Rogue, Player::P2, 2, 3);

        let actions = all_candidate_actions(&state, Player::P1);
        let captures = actions
            .iter()
            .filter(|a| a.victim(&state).is_some())
            .count();
        // Step onto (2,3) and Bash on (2,3).
        assert_eq!(captures, 2);
        assert_eq!(actions.len(), 5);
    }
}
