//! Fixed 5x5 occupancy grid.
//!
//! The grid only stores piece ids. Keeping `Piece::position` in sync with the
//! grid is the job of `rules::primitives`; nothing else writes cells.

use crate::game_state::game_rules::{COLS, ROWS};
use crate::game_state::game_types::Square;
use crate::game_state::piece_registry::PieceId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<PieceId>; COLS]; ROWS],
}

impl Board {
    /// Occupant of `square`, `None` when empty or off the board.
    #[inline]
    pub fn get(&self, square: Square) -> Option<PieceId> {
        if !square.is_on_board() {
            return None;
        }
        self.cells[square.row][square.col]
    }

    #[inline]
    pub fn is_empty_at(&self, square: Square) -> bool {
        square.is_on_board() && self.cells[square.row][square.col].is_none()
    }

    pub(crate) fn set(&mut self, square: Square, occupant: Option<PieceId>) {
        self.cells[square.row][square.col] = occupant;
    }

    /// All occupied squares in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, PieceId)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|id| (Square::new(row, col), id)))
        })
    }

    pub fn squares() -> impl Iterator<Item = Square> {
        (0..ROWS).flat_map(|row| (0..COLS).map(move |col| Square::new(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_as_unoccupied() {
        let board = Board::default();
        assert_eq!(board.get(Square::new(7, 1)), None);
        assert!(!board.is_empty_at(Square::new(7, 1)));
        assert!(board.is_empty_at(Square::new(4, 4)));
    }

    #[test]
    fn occupied_walks_row_major() {
        let mut board = Board::default();
        board.set(Square::new(3, 1), Some(PieceId(2)));
        board.set(Square::new(0, 4), Some(PieceId(1)));
        let found: Vec<_> = board.occupied().collect();
        assert_eq!(
            found,
            vec![
                (Square::new(0, 4), PieceId(1)),
                (Square::new(3, 1), PieceId(2))
            ]
        );
        assert_eq!(Board::squares().count(), 25);
    }
}
