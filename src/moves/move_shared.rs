//! Direction tables and generators shared by the per-type move modules.

use crate::game_state::game_rules::{COLS, ROWS};
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::Square;
use crate::game_state::piece_registry::Piece;

pub const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const ALL_DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// Longest possible ray on the board.
pub const MAX_RAY: usize = if ROWS > COLS { ROWS } else { COLS };

/// Walk each direction up to `max_steps`. Empty squares are added; the first
/// occupied square ends the walk and is added only if it holds an enemy.
pub fn step_moves(
    game_state: &GameState,
    piece: &Piece,
    directions: &[(i32, i32)],
    max_steps: usize,
) -> Vec<Square> {
    let Some(from) = piece.position else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for &(d_row, d_col) in directions {
        for k in 1..=max_steps as i32 {
            let Some(to) = from.offset(d_row * k, d_col * k) else {
                break;
            };
            match game_state.piece_at(to) {
                None => out.push(to),
                Some(occupant) => {
                    if occupant.owner != piece.owner {
                        out.push(to);
                    }
                    break;
                }
            }
        }
    }
    out
}

/// Unbounded sliding rays.
#[inline]
pub fn ray_moves(game_state: &GameState, piece: &Piece, directions: &[(i32, i32)]) -> Vec<Square> {
    step_moves(game_state, piece, directions, MAX_RAY)
}

/// Single jumps to fixed offsets, landing on empty or enemy squares.
pub fn jump_moves(game_state: &GameState, piece: &Piece, offsets: &[(i32, i32)]) -> Vec<Square> {
    let Some(from) = piece.position else {
        return Vec::new();
    };
    offsets
        .iter()
        .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(|&to| {
            game_state
                .piece_at(to)
                .map_or(true, |occupant| occupant.owner != piece.owner)
        })
        .collect()
}

#[inline]
pub fn is_enemy_at(game_state: &GameState, piece: &Piece, square: Square) -> bool {
    game_state
        .piece_at(square)
        .is_some_and(|occupant| occupant.owner != piece.owner)
}

/// Enemy pieces one step away in `directions`.
pub fn adjacent_enemies(
    game_state: &GameState,
    piece: &Piece,
    directions: &[(i32, i32)],
) -> Vec<Square> {
    let Some(from) = piece.position else {
        return Vec::new();
    };
    directions
        .iter()
        .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(|&sq| is_enemy_at(game_state, piece, sq))
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Helpers for building positions directly on a `GameState`.

    use crate::game_state::game_rules::GameConfig;
    use crate::game_state::game_state::GameState;
    use crate::game_state::game_types::{Phase, Player, Square};
    use crate::game_state::piece_registry::PieceId;
    use crate::moves::piece_catalog::PieceType;
    use crate::rules::primitives::place_piece;

    pub fn empty_play_state() -> GameState {
        let mut state = GameState::new(&GameConfig::default());
        state.phase = Phase::Play;
        state.active_player = Some(Player::P1);
        state.captains_assigned = true;
        state
    }

    pub fn put(
        state: &mut GameState,
        kind: PieceType,
        owner: Player,
        row: usize,
        col: usize,
    ) -> PieceId {
        let id = state.pieces.create(kind, owner);
        place_piece(state, id, Square::new(row, col)).expect("test square must be free");
        id
    }

    pub fn sorted(mut squares: Vec<Square>) -> Vec<Square> {
        squares.sort();
        squares
    }

    pub fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col)
    }
}
