use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::board::{Board, Color, Piece, PieceId, PieceKind};
use crate::clock::Clock;
use crate::config::RulesConfig;
use crate::error::MoveError;
use crate::movegen::MoveGenerator;
use crate::moves::Move;
use crate::outcome::{Classifier, DrawReason, GameStatus, PositionHistory};
use crate::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Checkmate { winner: Color },
    Draw(DrawReason),
    Timeout { winner: Color },
}

/// A complete game snapshot. Every transition returns a new snapshot and
/// leaves the old one untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    #[serde(default)]
    pub config: RulesConfig,
    pub board: Board,
    pub status: GameStatus,
    pub clock: Clock,
    pub moves: Vec<Move>,
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    pub fn with_config(config: RulesConfig) -> Self {
        Self::from_board(Board::new(), Color::White, config)
    }

    pub fn from_board(board: Board, turn: Color, config: RulesConfig) -> Self {
        // Classify up front, the placement may already be mate or drawn
        let status = Classifier::with_config(config).classify(&board, &PositionHistory::new(), 0, turn, None);
        Self {
            config,
            board,
            status,
            clock: Clock::new(config.initial_time),
            moves: Vec::new(),
        }
    }

    pub fn reset(&self) -> Self {
        Self::with_config(self.config)
    }

    pub fn turn(&self) -> Color {
        self.status.turn
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.status.last_move.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn available_moves(&self, id: PieceId) -> Vec<Square> {
        match self.board.piece(id) {
            Some(piece) if piece.color == self.turn() && !self.is_over() => {
                MoveGenerator::new().available_moves(piece, &self.board, self.last_move())
            }
            _ => Vec::new(),
        }
    }

    pub fn legal_moves(&self) -> Vec<(Piece, Square)> {
        if self.is_over() {
            return Vec::new();
        }
        MoveGenerator::new().legal_moves(&self.board, self.turn(), self.last_move())
    }

    pub fn play(&self, id: PieceId, to: Square, promotion: Option<PieceKind>) -> Result<Game, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let piece = self.board.piece(id).ok_or(MoveError::UnknownPiece(id))?;
        if piece.color != self.turn() {
            return Err(MoveError::WrongTurn(piece.color));
        }

        let generator = MoveGenerator::new();
        let last_move = self.last_move();
        let mv = generator.build_move(&self.board, id, to, promotion, last_move)?;
        let board = generator.apply_move(&self.board, &mv, last_move)?;

        let halfmove_clock = if mv.resets_halfmove_clock() {
            0
        } else {
            self.status.halfmove_clock + 1
        };
        let mut history = self.status.position_history.clone();
        history.push(board.position_key());

        let status = Classifier::with_config(self.config).classify(
            &board,
            &history,
            halfmove_clock,
            self.turn().opposite(),
            Some(&mv),
        );
        let clock = if status.is_terminal() {
            self.clock.stop()
        } else {
            self.clock.start()
        };

        let mut moves = self.moves.clone();
        moves.push(mv);
        debug!(
            "{} {:?} {} -> {} (halfmove clock {})",
            mv.piece.color, mv.piece.kind, mv.from, mv.to, halfmove_clock
        );

        Ok(Game {
            config: self.config,
            board,
            status,
            clock,
            moves,
        })
    }

    /// Runs the side to move's clock. At zero that side loses on time.
    pub fn tick(&self, elapsed: Duration) -> Game {
        if self.is_over() || !self.clock.running {
            return self.clone();
        }
        let turn = self.turn();
        let clock = self.clock.tick(turn, elapsed);
        let mut next = Game {
            clock,
            ..self.clone()
        };
        if clock.is_flagged(turn) {
            debug!("{} ran out of time", turn);
            next.status.timed_out = Some(turn);
            next.clock = clock.stop();
        }
        next
    }

    pub fn outcome(&self) -> Outcome {
        if let Some(loser) = self.status.timed_out {
            Outcome::Timeout {
                winner: loser.opposite(),
            }
        } else if self.status.in_checkmate {
            Outcome::Checkmate {
                winner: self.turn().opposite(),
            }
        } else if let Some(reason) = self.status.draw_reason {
            Outcome::Draw(reason)
        } else {
            Outcome::Ongoing
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("failed to serialize game snapshot")
    }

    pub fn from_json(json: &str) -> Result<Game> {
        serde_json::from_str(json).context("failed to load game snapshot")
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
