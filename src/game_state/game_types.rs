//! Small value types shared by every subsystem: sides, squares, phases and
//! the current selection.

use std::fmt;

use crate::game_state::game_rules::{COLS, ROWS};
use crate::game_state::piece_registry::PieceId;

/// Side identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    P1,
    P2,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::P1, Player::P2];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::P1 => 0,
            Player::P2 => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Player::P1 => "Player 1",
            Player::P2 => "Player 2",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::P1 => write!(f, "P1"),
            Player::P2 => write!(f, "P2"),
        }
    }
}

/// Board coordinate, row 0 is the top edge (P2's home row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: usize,
    pub col: usize,
}

impl Square {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.row < ROWS && self.col < COLS
    }

    /// Square reached by stepping `(d_row, d_col)`, or `None` off the board.
    #[inline]
    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Square> {
        let row = self.row as i32 + d_row;
        let col = self.col as i32 + d_col;
        if (0..ROWS as i32).contains(&row) && (0..COLS as i32).contains(&col) {
            Some(Square::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Chebyshev (king-move) distance.
    #[inline]
    pub fn chebyshev_distance(self, other: Square) -> usize {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Top-level phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Draft,
    Captain,
    Placement,
    Play,
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Draft => "draft",
            Phase::Captain => "captain",
            Phase::Placement => "placement",
            Phase::Play => "play",
            Phase::GameOver => "gameover",
        };
        f.write_str(name)
    }
}

/// What the acting player currently has selected.
///
/// `Own` is used both for a bench piece during placement and for a board
/// piece during play. `Preview` is a read-only look at an opponent piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Own { piece: PieceId, special_mode: bool },
    Preview { piece: PieceId },
}

impl Selection {
    #[inline]
    pub fn piece(self) -> Option<PieceId> {
        match self {
            Selection::None => None,
            Selection::Own { piece, .. } | Selection::Preview { piece } => Some(piece),
        }
    }

    #[inline]
    pub fn special_mode(self) -> bool {
        matches!(
            self,
            Selection::Own {
                special_mode: true,
                ..
            }
        )
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    CaptainCaptured,
    Timeout,
}

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner: Player,
    pub reason: GameOverReason,
}

impl GameOutcome {
    pub fn message(&self) -> String {
        match self.reason {
            GameOverReason::CaptainCaptured => {
                format!("{} wins by capturing the captain!", self.winner)
            }
            GameOverReason::Timeout => format!("{} wins on time!", self.winner),
        }
    }
}
