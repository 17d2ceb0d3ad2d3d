//! Policy abstraction for computer-controlled sides.
//!
//! A policy looks at the game and returns one `Decision` for the phase it is
//! asked about. The scheduler turns the decision into the same `Command`s a
//! human would issue, so AI input goes through the exact same validation.

use crate::game_state::game_types::{Player, Square};
use crate::game_state::piece_registry::PieceId;
use crate::machine::commands::Command;
use crate::machine::game::Game;
use crate::moves::piece_catalog::{PieceType, SpecialTarget};
use crate::rules::legal_moves::CandidateAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Pick(PieceType),
    NominateCaptain { player: Player, kind: PieceType },
    Place { piece: PieceId, square: Square },
    Act(CandidateAction),
}

impl Decision {
    /// Command sequence that carries out this decision.
    pub fn commands(&self) -> Vec<Command> {
        match *self {
            Decision::Pick(kind) => vec![Command::Pick(kind)],
            Decision::NominateCaptain { player, kind } => {
                vec![Command::NominateCaptain { player, kind }]
            }
            Decision::Place { piece, square } => {
                vec![Command::SelectBenchPiece(piece), Command::PlaceAt(square)]
            }
            Decision::Act(CandidateAction::Move { from, to, .. }) => {
                vec![Command::SelectBoardPiece(from), Command::ActAt(to)]
            }
            Decision::Act(CandidateAction::Special {
                from,
                target: SpecialTarget::SelfStatus,
                ..
            }) => vec![Command::SelectBoardPiece(from), Command::ActivateSelfSpecial],
            Decision::Act(CandidateAction::Special { from, target, .. }) => {
                let to = target.square().unwrap_or(from);
                vec![
                    Command::SelectBoardPiece(from),
                    Command::ToggleSpecialMode,
                    Command::ActAt(to),
                ]
            }
        }
    }
}

pub trait Policy: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Choose what `actor` does next. `None` means nothing is available.
    fn decide(&mut self, game: &Game, actor: Player) -> Option<Decision>;
}
