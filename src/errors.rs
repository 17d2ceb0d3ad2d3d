//! Errors returned by engine commands.
//!
//! Every variant is a recoverable rejection: the command that produced it left
//! the game state untouched, and the caller can show the `Display` text to the
//! player. There is no fatal variant; the only way a game ends is the designed
//! transition to the game-over phase.

use thiserror::Error;

use crate::game_state::game_types::{Phase, Player, Square};
use crate::game_state::piece_registry::PieceId;
use crate::moves::piece_catalog::PieceType;

pub type GameResult<T> = Result<T, GameError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("not allowed during the {0} phase")]
    WrongPhase(Phase),

    #[error("not your turn: waiting on {0}")]
    NotYourTurn(Player),

    #[error("square {0} is off the board")]
    OutOfBounds(Square),

    #[error("square {0} is occupied")]
    SquareOccupied(Square),

    #[error("square {0} holds one of your own pieces")]
    FriendlyOccupied(Square),

    #[error("target on {0} is fortified")]
    TargetFortified(Square),

    #[error("no enemy piece on {0}")]
    NoEnemyAt(Square),

    #[error("special already used")]
    SpecialAlreadyUsed,

    #[error("{0} is not a valid special target")]
    NotASpecialTarget(Square),

    #[error("this piece has no self-targeted special")]
    NoSelfSpecial,

    #[error("{0} is not a legal move")]
    IllegalMove(Square),

    #[error("{0} already picked {1}")]
    AlreadyPicked(Player, PieceType),

    #[error("{0} has already drafted a full team")]
    DraftFull(Player),

    #[error("the draft has already started")]
    DraftAlreadyStarted,

    #[error("unknown piece type `{0}`")]
    UnknownPieceType(String),

    #[error("{0} did not draft {1}")]
    NotDrafted(Player, PieceType),

    #[error("captains are already assigned")]
    CaptainsAlreadyAssigned,

    #[error("place on your home row (row {0})")]
    NotHomeRow(usize),

    #[error("no piece selected")]
    NothingSelected,

    #[error("piece {0} is not on the bench of the player to place")]
    NotOnBench(PieceId),

    #[error("unknown piece {0}")]
    UnknownPiece(PieceId),

    #[error("piece {0} is already on the board")]
    AlreadyPlaced(PieceId),

    #[error("piece {0} is not on the board")]
    PieceNotPlaced(PieceId),

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("cannot preview an opponent piece while one of your pieces is selected")]
    PreviewBlocked,

    #[error("the AI is still deciding")]
    AiBusy,

    #[error("AI ticket no longer matches the game")]
    StaleTicket,

    #[error("AI action is not due yet")]
    NotDueYet,

    #[error("{0} has no available action")]
    NoAvailableAction(Player),
}
