use thiserror::Error;

use crate::board::{PieceId, PieceKind};
use crate::square::Square;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareParseError {
    #[error("square name must be two characters, got {0:?}")]
    Length(String),
    #[error("invalid file {0:?}, expected a..h")]
    File(char),
    #[error("invalid rank {0:?}, expected 1..8")]
    Rank(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("square {0} is already occupied")]
    SquareOccupied(Square),
    #[error("piece id {0} appears more than once")]
    DuplicateId(PieceId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece with id {0} on the board")]
    UnknownPiece(PieceId),
    #[error("it is not {0}'s turn")]
    WrongTurn(crate::board::Color),
    #[error("the game is already over")]
    GameOver,
    #[error("{kind:?} on {from} cannot move to {to}")]
    IllegalDestination {
        kind: PieceKind,
        from: Square,
        to: Square,
    },
    #[error("move descriptor does not match the board: {0}")]
    StaleMove(&'static str),
    #[error("a pawn reaching {0} must name a promotion piece")]
    PromotionRequired(Square),
    #[error("promotion is only allowed for a pawn reaching the last rank")]
    UnexpectedPromotion,
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),
}
