//! Mutable piece instances.
//!
//! Pieces are created when captains are confirmed and never removed: a
//! captured piece keeps its record (with `position == None`) so capture and
//! win reporting can still name it.

use std::fmt;

use crate::game_state::game_types::{Player, Square};
use crate::moves::piece_catalog::PieceType;

/// Unique piece identity. Allocated from a monotonic counter, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceType,
    pub owner: Player,
    pub position: Option<Square>,
    pub is_captain: bool,
    pub special_used: bool,
    pub fortified_turns_left: u8,
}

impl Piece {
    #[inline]
    pub fn is_fortified(&self) -> bool {
        self.fortified_turns_left > 0
    }

    /// Label used in log lines, e.g. `P1 Warrior (Captain)`.
    pub fn label(&self) -> String {
        if self.is_captain {
            format!("{} {} (Captain)", self.owner, self.kind.name())
        } else {
            format!("{} {}", self.owner, self.kind.name())
        }
    }
}

#[derive(Debug, Clone)]
pub struct PieceRegistry {
    pieces: Vec<Piece>,
    next_id: u32,
}

impl Default for PieceRegistry {
    fn default() -> Self {
        Self {
            pieces: Vec::new(),
            next_id: 1,
        }
    }
}

impl PieceRegistry {
    /// Create an unplaced, non-captain piece and return its id.
    pub fn create(&mut self, kind: PieceType, owner: Player) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.pieces.push(Piece {
            id,
            kind,
            owner,
            position: None,
            is_captain: false,
            special_used: false,
            fortified_turns_left: 0,
        });
        id
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        // Ids are allocated in push order, so the vector stays sorted.
        self.pieces
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(|idx| &self.pieces[idx])
    }

    pub fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(move |idx| &mut self.pieces[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Piece> {
        self.pieces.iter_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}
