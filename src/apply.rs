use log::warn;

use crate::board::{Board, PieceId, PieceKind};
use crate::error::MoveError;
use crate::movegen::MoveGenerator;
use crate::moves::Move;
use crate::square::Square;

impl MoveGenerator {
    pub fn build_move(
        &self,
        board: &Board,
        id: PieceId,
        to: Square,
        promotion: Option<PieceKind>,
        last_move: Option<&Move>,
    ) -> Result<Move, MoveError> {
        let piece = *board.piece(id).ok_or(MoveError::UnknownPiece(id))?;

        if !self.available_moves(&piece, board, last_move).contains(&to) {
            return Err(MoveError::IllegalDestination {
                kind: piece.kind,
                from: piece.square,
                to,
            });
        }

        let mut mv = if let Some(victim) = self.en_passant_victim(&piece, board, to, last_move) {
            Move::new_en_passant(piece, to, *victim)
        } else if self.is_castling_move(&piece, to) {
            let (rook_from, rook_to) = self
                .castling_rook_squares(&piece, to)
                .ok_or(MoveError::StaleMove("castling rook squares"))?;
            Move::new_castling(piece, to, rook_from, rook_to)
        } else if let Some(captured) = board.piece_at(to) {
            Move::new_capture(piece, to, *captured)
        } else {
            Move::new(piece, to)
        };

        let reaches_last_rank = piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank();
        match (reaches_last_rank, promotion) {
            (true, Some(kind)) if kind.is_promotion_target() => mv = mv.with_promotion(kind),
            (true, Some(kind)) => return Err(MoveError::InvalidPromotion(kind)),
            (true, None) => return Err(MoveError::PromotionRequired(to)),
            (false, Some(_)) => return Err(MoveError::UnexpectedPromotion),
            (false, None) => {}
        }

        Ok(mv)
    }

    /// Commits `mv` to a copy of `board`. `mv` must match the move rebuilt
    /// from `board`.
    pub fn apply_move(&self, board: &Board, mv: &Move, last_move: Option<&Move>) -> Result<Board, MoveError> {
        let current = board.piece(mv.piece.id).ok_or(MoveError::UnknownPiece(mv.piece.id))?;
        if *current != mv.piece || mv.from != mv.piece.square {
            warn!("rejecting move of {}: piece is not where the move says", mv.piece.id);
            return Err(MoveError::StaleMove("mover does not match the board"));
        }

        let expected = self.build_move(board, mv.piece.id, mv.to, mv.promotion, last_move).map_err(|err| {
            warn!("rejecting move {} -> {}: {}", mv.from, mv.to, err);
            err
        })?;
        if expected != *mv {
            warn!("rejecting move {} -> {}: descriptor does not match the board", mv.from, mv.to);
            return Err(MoveError::StaleMove("descriptor does not match the board"));
        }

        let mut next = board.clone();

        if let Some(captured) = mv.captured_piece {
            next.remove(captured.id);
        }

        if let (Some(rook_from), Some(rook_to)) = (mv.castling_rook_from, mv.castling_rook_to) {
            let rook_id = next
                .piece_at(rook_from)
                .map(|p| p.id)
                .ok_or(MoveError::StaleMove("castling rook is missing"))?;
            if let Some(rook) = next.piece_mut(rook_id) {
                rook.square = rook_to;
                rook.has_moved = true;
            }
        }

        let mover = next
            .piece_mut(mv.piece.id)
            .ok_or(MoveError::UnknownPiece(mv.piece.id))?;
        mover.square = mv.to;
        mover.has_moved = true;
        if let Some(kind) = mv.promotion {
            mover.kind = kind;
        }

        Ok(next)
    }
}
