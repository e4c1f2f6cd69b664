use crate::board::{Board, Color};
use crate::movegen::MoveGenerator;
use crate::square::Square;

impl MoveGenerator {
    pub fn is_square_under_attack(&self, board: &Board, square: Square, attacker_color: Color) -> bool {
        board
            .pieces_of(attacker_color)
            .any(|p| self.attacked_squares(p, board).contains(&square))
    }

    /// A board without `color`'s king is never in check.
    pub fn is_in_check(&self, board: &Board, color: Color) -> bool {
        match board.king(color) {
            Some(king) => self.is_square_under_attack(board, king.square, color.opposite()),
            None => false,
        }
    }
}
