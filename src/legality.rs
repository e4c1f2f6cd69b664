use log::trace;

use crate::board::{Board, Color, Piece, PieceKind};
use crate::movegen::MoveGenerator;
use crate::moves::Move;
use crate::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    fn rook_file(&self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    fn king_to_file(&self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    fn rook_to_file(&self) -> u8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }

    fn king_path(&self) -> &'static [u8] {
        match self {
            CastleSide::Kingside => &[5, 6],
            CastleSide::Queenside => &[3, 2],
        }
    }

    fn between(&self) -> &'static [u8] {
        match self {
            CastleSide::Kingside => &[5, 6],
            CastleSide::Queenside => &[1, 2, 3],
        }
    }

    pub fn from_target(to: Square) -> Option<CastleSide> {
        match to.file() {
            6 => Some(CastleSide::Kingside),
            2 => Some(CastleSide::Queenside),
            _ => None,
        }
    }
}

const KING_HOME_FILE: u8 = 4;

impl MoveGenerator {
    /// Legal destinations for `piece`, castling included.
    pub fn available_moves(&self, piece: &Piece, board: &Board, last_move: Option<&Move>) -> Vec<Square> {
        let mut legal: Vec<Square> = self
            .pseudo_legal_moves(piece, board, last_move)
            .into_iter()
            .filter(|&to| {
                // Make the move and reject it if our own king is in check
                let captured = self.en_passant_victim(piece, board, to, last_move).map(|p| p.square);
                let simulated = simulate(board, piece, to, captured);
                !self.is_in_check(&simulated, piece.color)
            })
            .collect();

        if piece.kind == PieceKind::King {
            legal.extend(
                CastleSide::BOTH
                    .iter()
                    .filter_map(|&side| self.castling_target(piece, board, side)),
            );
        }
        legal
    }

    pub fn legal_moves(&self, board: &Board, color: Color, last_move: Option<&Move>) -> Vec<(Piece, Square)> {
        board
            .pieces_of(color)
            .flat_map(|piece| {
                self.available_moves(piece, board, last_move)
                    .into_iter()
                    .map(move |to| (*piece, to))
            })
            .collect()
    }

    pub fn has_legal_move(&self, board: &Board, color: Color, last_move: Option<&Move>) -> bool {
        board
            .pieces_of(color)
            .any(|piece| !self.available_moves(piece, board, last_move).is_empty())
    }

    pub fn castling_target(&self, king: &Piece, board: &Board, side: CastleSide) -> Option<Square> {
        let home = king.color.home_rank();
        if king.kind != PieceKind::King || king.has_moved || king.square != Square::new(KING_HOME_FILE, home)? {
            return None;
        }

        let rook_square = Square::new(side.rook_file(), home)?;
        match board.piece_at(rook_square) {
            Some(rook) if rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved => {}
            _ => return None,
        }

        // Check that squares between king and rook are empty
        for &file in side.between() {
            if !board.is_empty_at(Square::new(file, home)?) {
                return None;
            }
        }

        if self.is_in_check(board, king.color) {
            trace!("{} cannot castle {:?}: king in check", king.color, side);
            return None;
        }

        // Check that the king does not pass through or land on an attacked square
        for &file in side.king_path() {
            let step = Square::new(file, home)?;
            if self.is_in_check(&simulate(board, king, step, None), king.color) {
                trace!("{} cannot castle {:?}: {} is attacked", king.color, side, step);
                return None;
            }
        }

        Square::new(side.king_to_file(), home)
    }

    pub(crate) fn castling_rook_squares(&self, king: &Piece, to: Square) -> Option<(Square, Square)> {
        let side = CastleSide::from_target(to)?;
        let home = king.color.home_rank();
        Some((
            Square::new(side.rook_file(), home)?,
            Square::new(side.rook_to_file(), home)?,
        ))
    }

    pub(crate) fn is_castling_move(&self, king: &Piece, to: Square) -> bool {
        king.kind == PieceKind::King
            && to.rank() == king.square.rank()
            && (to.file() as i8 - king.square.file() as i8).abs() == 2
    }
}

fn simulate(board: &Board, piece: &Piece, to: Square, captured: Option<Square>) -> Board {
    let mut next = board.clone();
    next.remove_at(captured.unwrap_or(to));
    if let Some(mover) = next.piece_mut(piece.id) {
        mover.square = to;
    }
    next
}
