//! Chess rules engine. Every transition on a [`Game`] returns a new snapshot.

pub mod apply;
pub mod board;
pub mod check;
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod legality;
pub mod movegen;
pub mod moves;
pub mod outcome;
pub mod square;

pub use board::{Board, Color, Piece, PieceId, PieceKind};
pub use clock::Clock;
pub use config::RulesConfig;
pub use error::{BoardError, MoveError, SquareParseError};
pub use game::{Game, Outcome};
pub use legality::CastleSide;
pub use movegen::MoveGenerator;
pub use moves::Move;
pub use outcome::{Classifier, DrawReason, GameStatus, PositionHistory};
pub use square::Square;
