//! The five piece types and their behaviour bundle.
//!
//! A `PieceType` is a plain tag. Each tag maps to three pure functions in its
//! own module (`<type>_moves.rs`): ordinary moves, special targets and the
//! special effect. Dispatch is a `match`, there is no trait object involved.

use std::fmt;
use std::str::FromStr;

use crate::errors::{GameError, GameResult};
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::Square;
use crate::game_state::piece_registry::{Piece, PieceId};
use crate::moves::{mage_moves, ranger_moves, rogue_moves, sentinel_moves, warrior_moves};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceType {
    Warrior,
    Ranger,
    Mage,
    Rogue,
    Sentinel,
}

pub const ALL_PIECE_TYPES: [PieceType; 5] = [
    PieceType::Warrior,
    PieceType::Ranger,
    PieceType::Mage,
    PieceType::Rogue,
    PieceType::Sentinel,
];

impl PieceType {
    pub const fn id(self) -> &'static str {
        match self {
            PieceType::Warrior => "warrior",
            PieceType::Ranger => "ranger",
            PieceType::Mage => "mage",
            PieceType::Rogue => "rogue",
            PieceType::Sentinel => "sentinel",
        }
    }

    pub const fn abbr(self) -> &'static str {
        match self {
            PieceType::Warrior => "Wa",
            PieceType::Ranger => "Ra",
            PieceType::Mage => "Mg",
            PieceType::Rogue => "Ro",
            PieceType::Sentinel => "Se",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PieceType::Warrior => "Warrior",
            PieceType::Ranger => "Ranger",
            PieceType::Mage => "Mage",
            PieceType::Rogue => "Rogue",
            PieceType::Sentinel => "Sentinel",
        }
    }

    pub const fn special_name(self) -> &'static str {
        match self {
            PieceType::Warrior => "Bash",
            PieceType::Ranger => "Shoot",
            PieceType::Mage => "Blink",
            PieceType::Rogue => "Leap",
            PieceType::Sentinel => "Fortify",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            PieceType::Warrior => {
                "Moves 1 orthogonally. Special: Bash - capture adjacent orthogonal without moving."
            }
            PieceType::Ranger => {
                "Moves 1 any direction. Special: Shoot - capture at distance 2 straight if path clear."
            }
            PieceType::Mage => "Diagonals any distance. Special: Blink up to 3 diagonally to empty.",
            PieceType::Rogue => {
                "Knight-like jumps. Special: Leap to any empty square at Chebyshev distance 2."
            }
            PieceType::Sentinel => {
                "Orthogonals any distance. Special: Fortify - cannot be captured during next enemy turn."
            }
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PieceType {
    type Err = GameError;

    /// Accepts the id, the name or the abbreviation, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ALL_PIECE_TYPES
            .into_iter()
            .find(|t| {
                t.id().eq_ignore_ascii_case(needle)
                    || t.name().eq_ignore_ascii_case(needle)
                    || t.abbr().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| GameError::UnknownPieceType(needle.to_string()))
    }
}

/// A square (or the piece itself) a special may be aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialTarget {
    /// Remove the enemy on the square, the user stays put.
    Capture(Square),
    /// Relocate the user to an empty square.
    Teleport(Square),
    /// Status effect on the user itself.
    SelfStatus,
}

impl SpecialTarget {
    #[inline]
    pub fn square(self) -> Option<Square> {
        match self {
            SpecialTarget::Capture(sq) | SpecialTarget::Teleport(sq) => Some(sq),
            SpecialTarget::SelfStatus => None,
        }
    }
}

/// Raw ordinary destinations, before the fortification filter.
pub fn ordinary_moves(game_state: &GameState, piece: &Piece) -> Vec<Square> {
    match piece.kind {
        PieceType::Warrior => warrior_moves::ordinary_moves(game_state, piece),
        PieceType::Ranger => ranger_moves::ordinary_moves(game_state, piece),
        PieceType::Mage => mage_moves::ordinary_moves(game_state, piece),
        PieceType::Rogue => rogue_moves::ordinary_moves(game_state, piece),
        PieceType::Sentinel => sentinel_moves::ordinary_moves(game_state, piece),
    }
}

/// Raw special targets, before the fortification filter.
pub fn special_targets(game_state: &GameState, piece: &Piece) -> Vec<SpecialTarget> {
    match piece.kind {
        PieceType::Warrior => warrior_moves::special_targets(game_state, piece),
        PieceType::Ranger => ranger_moves::special_targets(game_state, piece),
        PieceType::Mage => mage_moves::special_targets(game_state, piece),
        PieceType::Rogue => rogue_moves::special_targets(game_state, piece),
        PieceType::Sentinel => sentinel_moves::special_targets(game_state, piece),
    }
}

/// Apply the special of piece `id`. Returns the captured piece, if any.
///
/// Does not touch `special_used`; the caller marks it on success.
pub fn apply_special(
    game_state: &mut GameState,
    id: PieceId,
    target: SpecialTarget,
) -> GameResult<Option<PieceId>> {
    let kind = game_state
        .piece(id)
        .ok_or(GameError::UnknownPiece(id))?
        .kind;
    match kind {
        PieceType::Warrior => warrior_moves::apply_special(game_state, id, target),
        PieceType::Ranger => ranger_moves::apply_special(game_state, id, target),
        PieceType::Mage => mage_moves::apply_special(game_state, id, target),
        PieceType::Rogue => rogue_moves::apply_special(game_state, id, target),
        PieceType::Sentinel => sentinel_moves::apply_special(game_state, id, target),
    }
}
