use crate::board::{Board, Piece, PieceKind};
use crate::moves::Move;
use crate::square::Square;

const KING_STEPS: [(i8, i8); 8] = [
    (1, 0), (1, 1), (0, 1), (-1, 1),
    (-1, 0), (-1, -1), (0, -1), (1, -1),
];

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (2, 1), (2, -1), (-2, 1), (-2, -1),
    (1, 2), (1, -2), (-1, 2), (-1, -2),
];

const BISHOP_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_RAYS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[derive(Debug, Clone, Copy, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn pseudo_legal_moves(&self, piece: &Piece, board: &Board, last_move: Option<&Move>) -> Vec<Square> {
        let mut targets = self.attacked_squares(piece, board);
        if piece.kind == PieceKind::Pawn {
            targets.extend(self.pawn_pushes(piece, board));
            if let Some(to) = self.en_passant_target(piece, board, last_move) {
                targets.push(to);
            }
        }
        targets
    }

    /// Squares `piece` attacks. Pawn pushes, en passant and castling are
    /// excluded.
    pub fn attacked_squares(&self, piece: &Piece, board: &Board) -> Vec<Square> {
        match piece.kind {
            PieceKind::King => self.step_moves(piece, board, &KING_STEPS),
            PieceKind::Knight => self.step_moves(piece, board, &KNIGHT_STEPS),
            PieceKind::Bishop => self.ray_moves(piece, board, &BISHOP_RAYS),
            PieceKind::Rook => self.ray_moves(piece, board, &ROOK_RAYS),
            PieceKind::Queen => {
                let mut targets = self.ray_moves(piece, board, &ROOK_RAYS);
                targets.extend(self.ray_moves(piece, board, &BISHOP_RAYS));
                targets
            }
            PieceKind::Pawn => self.pawn_captures(piece, board),
        }
    }

    fn step_moves(&self, piece: &Piece, board: &Board, steps: &[(i8, i8)]) -> Vec<Square> {
        steps
            .iter()
            .filter_map(|&(df, dr)| piece.square.offset(df, dr))
            .filter(|&to| match board.piece_at(to) {
                Some(other) => other.color != piece.color,
                None => true,
            })
            .collect()
    }

    fn ray_moves(&self, piece: &Piece, board: &Board, rays: &[(i8, i8)]) -> Vec<Square> {
        let mut targets = Vec::new();
        for &(df, dr) in rays {
            let mut current = piece.square;
            while let Some(to) = current.offset(df, dr) {
                match board.piece_at(to) {
                    Some(other) => {
                        if other.color != piece.color {
                            targets.push(to);
                        }
                        break;
                    }
                    None => targets.push(to),
                }
                current = to;
            }
        }
        targets
    }

    fn pawn_pushes(&self, piece: &Piece, board: &Board) -> Vec<Square> {
        let mut targets = Vec::new();
        let forward = piece.color.forward();

        // Single push
        let Some(one) = piece.square.offset(0, forward) else {
            return targets;
        };
        if !board.is_empty_at(one) {
            return targets;
        }
        targets.push(one);

        // Double push from the starting rank
        if piece.square.rank() == piece.color.pawn_start_rank() {
            if let Some(two) = one.offset(0, forward) {
                if board.is_empty_at(two) {
                    targets.push(two);
                }
            }
        }
        targets
    }

    fn pawn_captures(&self, piece: &Piece, board: &Board) -> Vec<Square> {
        let forward = piece.color.forward();
        [-1, 1]
            .iter()
            .filter_map(|&df| piece.square.offset(df, forward))
            .filter(|&to| matches!(board.piece_at(to), Some(other) if other.color != piece.color))
            .collect()
    }

    pub(crate) fn en_passant_target(&self, piece: &Piece, board: &Board, last_move: Option<&Move>) -> Option<Square> {
        if piece.kind != PieceKind::Pawn || piece.square.rank() != piece.color.en_passant_rank() {
            return None;
        }
        let last = last_move?;
        if last.piece.color == piece.color || !last.is_double_pawn_push() {
            return None;
        }
        if last.to.rank() != piece.square.rank() || (last.to.file() as i8 - piece.square.file() as i8).abs() != 1 {
            return None;
        }
        // The pawn that moved must still be there to be captured.
        match board.piece_at(last.to) {
            Some(victim) if victim.id == last.piece.id && victim.kind == PieceKind::Pawn => {}
            _ => return None,
        }
        let behind = last.to.offset(0, piece.color.forward())?;
        board.is_empty_at(behind).then_some(behind)
    }

    pub(crate) fn en_passant_victim<'a>(&self, piece: &Piece, board: &'a Board, to: Square, last_move: Option<&Move>) -> Option<&'a Piece> {
        if self.en_passant_target(piece, board, last_move)? != to {
            return None;
        }
        board.piece_at(last_move?.to)
    }
}
