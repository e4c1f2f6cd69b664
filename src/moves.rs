use serde::{Deserialize, Serialize};

use crate::board::{Piece, PieceKind};
use crate::square::Square;

/// A fully described move. `piece` is the mover as it stood before the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured_piece: Option<Piece>,
    pub promotion: Option<PieceKind>,
    pub is_en_passant: bool,
    pub is_castling: bool,
    pub castling_rook_from: Option<Square>,
    pub castling_rook_to: Option<Square>,
}

impl Move {
    pub fn new(piece: Piece, to: Square) -> Self {
        Self {
            piece,
            from: piece.square,
            to,
            captured_piece: None,
            promotion: None,
            is_en_passant: false,
            is_castling: false,
            castling_rook_from: None,
            castling_rook_to: None,
        }
    }

    pub fn new_capture(piece: Piece, to: Square, captured: Piece) -> Self {
        Self {
            captured_piece: Some(captured),
            ..Self::new(piece, to)
        }
    }

    pub fn new_en_passant(piece: Piece, to: Square, captured: Piece) -> Self {
        Self {
            captured_piece: Some(captured),
            is_en_passant: true,
            ..Self::new(piece, to)
        }
    }

    pub fn new_castling(king: Piece, to: Square, rook_from: Square, rook_to: Square) -> Self {
        Self {
            is_castling: true,
            castling_rook_from: Some(rook_from),
            castling_rook_to: Some(rook_to),
            ..Self::new(king, to)
        }
    }

    pub fn with_promotion(self, promotion: PieceKind) -> Self {
        Self {
            promotion: Some(promotion),
            ..self
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured_piece.is_some()
    }

    pub fn is_pawn_move(&self) -> bool {
        self.piece.kind == PieceKind::Pawn
    }

    pub fn is_double_pawn_push(&self) -> bool {
        self.is_pawn_move() && (self.to.rank() as i8 - self.from.rank() as i8).abs() == 2
    }

    pub fn resets_halfmove_clock(&self) -> bool {
        self.is_pawn_move() || self.is_capture()
    }
}
