use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::board::{Board, Color, PieceKind};
use crate::config::RulesConfig;
use crate::movegen::MoveGenerator;
use crate::moves::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    ThreefoldRepetition,
    FiftyMove,
}

/// Canonical position keys in the order they occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct PositionHistory {
    entries: Vec<String>,
    // Occurrences per key
    counts: HashMap<String, usize>,
}

impl PositionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: String) {
        *self.counts.entry(key.clone()).or_insert(0) += 1;
        self.entries.push(key);
    }

    pub fn count(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<String>> for PositionHistory {
    fn from(entries: Vec<String>) -> Self {
        let mut history = Self::new();
        for key in entries {
            history.push(key);
        }
        history
    }
}

impl From<PositionHistory> for Vec<String> {
    fn from(history: PositionHistory) -> Self {
        history.entries
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub turn: Color,
    pub in_check: bool,
    pub in_checkmate: bool,
    pub in_draw: bool,
    pub draw_reason: Option<DrawReason>,
    pub halfmove_clock: u32,
    pub position_history: PositionHistory,
    pub last_move: Option<Move>,
    /// Side whose clock ran out.
    #[serde(default)]
    pub timed_out: Option<Color>,
}

impl GameStatus {
    pub fn new() -> Self {
        Self {
            turn: Color::White,
            in_check: false,
            in_checkmate: false,
            in_draw: false,
            draw_reason: None,
            halfmove_clock: 0,
            position_history: PositionHistory::new(),
            last_move: None,
            timed_out: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.in_checkmate || self.in_draw || self.timed_out.is_some()
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Classifier {
    move_generator: MoveGenerator,
    config: RulesConfig,
}

impl Classifier {
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    pub fn with_config(config: RulesConfig) -> Self {
        Self {
            move_generator: MoveGenerator::new(),
            config,
        }
    }

    /// Classifies `board` with `turn` to move. `history` must already hold
    /// the key of `board` for it to count towards repetition.
    pub fn classify(
        &self,
        board: &Board,
        history: &PositionHistory,
        halfmove_clock: u32,
        turn: Color,
        last_move: Option<&Move>,
    ) -> GameStatus {
        let in_check = self.move_generator.is_in_check(board, turn);
        let can_move = self.move_generator.has_legal_move(board, turn, last_move);
        let in_checkmate = in_check && !can_move;

        // Checkmate first, then draws in fixed order
        let draw_reason = if in_checkmate {
            None
        } else if self.is_insufficient_material(board) {
            Some(DrawReason::InsufficientMaterial)
        } else if !can_move {
            Some(DrawReason::Stalemate)
        } else if self.is_repetition(board, history) {
            Some(DrawReason::ThreefoldRepetition)
        } else if halfmove_clock >= self.config.fifty_move_limit {
            Some(DrawReason::FiftyMove)
        } else {
            None
        };

        if in_checkmate {
            debug!("checkmate, {} wins", turn.opposite());
        } else if let Some(reason) = draw_reason {
            debug!("draw by {:?}", reason);
        }

        GameStatus {
            turn,
            in_check,
            in_checkmate,
            in_draw: draw_reason.is_some(),
            draw_reason,
            halfmove_clock,
            position_history: history.clone(),
            last_move: last_move.copied(),
            timed_out: None,
        }
    }

    pub fn is_checkmate(&self, board: &Board, turn: Color, last_move: Option<&Move>) -> bool {
        self.move_generator.is_in_check(board, turn) && !self.move_generator.has_legal_move(board, turn, last_move)
    }

    pub fn is_stalemate(&self, board: &Board, turn: Color, last_move: Option<&Move>) -> bool {
        !self.move_generator.is_in_check(board, turn) && !self.move_generator.has_legal_move(board, turn, last_move)
    }

    pub fn is_insufficient_material(&self, board: &Board) -> bool {
        let pieces = board.pieces();
        match pieces.len() {
            // Bare kings
            2 => true,
            // King and a minor piece against a king
            3 => pieces
                .iter()
                .any(|p| matches!(p.kind, PieceKind::Bishop | PieceKind::Knight)),
            // Two bishops on the same color complex. K+N+N is not recognised.
            4 => {
                let bishops: Vec<_> = pieces.iter().filter(|p| p.kind == PieceKind::Bishop).collect();
                bishops.len() == 2 && bishops[0].square.parity() == bishops[1].square.parity()
            }
            _ => false,
        }
    }

    pub fn is_repetition(&self, board: &Board, history: &PositionHistory) -> bool {
        history.count(&board.position_key()) >= self.config.repetition_limit
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn board_with(pieces: &[(Color, PieceKind, &str)]) -> Board {
        let mut board = Board::empty();
        for &(color, kind, at) in pieces {
            board.place(color, kind, sq(at)).unwrap();
        }
        board
    }

    #[test]
    fn test_insufficient_material() {
        let classifier = Classifier::new();

        let kings = board_with(&[(Color::White, PieceKind::King, "e1"), (Color::Black, PieceKind::King, "e8")]);
        assert!(classifier.is_insufficient_material(&kings));

        let knight = board_with(&[
            (Color::White, PieceKind::King, "e1"),
            (Color::Black, PieceKind::King, "e8"),
            (Color::White, PieceKind::Knight, "b1"),
        ]);
        assert!(classifier.is_insufficient_material(&knight));

        let rook = board_with(&[
            (Color::White, PieceKind::King, "e1"),
            (Color::Black, PieceKind::King, "e8"),
            (Color::White, PieceKind::Rook, "a1"),
        ]);
        assert!(!classifier.is_insufficient_material(&rook));

        let opposite_bishops = board_with(&[
            (Color::White, PieceKind::King, "e1"),
            (Color::Black, PieceKind::King, "e8"),
            (Color::White, PieceKind::Bishop, "c1"),
            (Color::Black, PieceKind::Bishop, "c8"),
        ]);
        assert!(!classifier.is_insufficient_material(&opposite_bishops));

        let same_bishops = board_with(&[
            (Color::White, PieceKind::King, "e1"),
            (Color::Black, PieceKind::King, "e8"),
            (Color::White, PieceKind::Bishop, "c1"),
            (Color::Black, PieceKind::Bishop, "f8"),
        ]);
        assert!(classifier.is_insufficient_material(&same_bishops));

        let two_knights = board_with(&[
            (Color::White, PieceKind::King, "e1"),
            (Color::Black, PieceKind::King, "e8"),
            (Color::White, PieceKind::Knight, "b1"),
            (Color::White, PieceKind::Knight, "g1"),
        ]);
        assert!(!classifier.is_insufficient_material(&two_knights));
    }

    #[test]
    fn test_back_rank_mate() {
        let classifier = Classifier::new();
        let board = board_with(&[
            (Color::Black, PieceKind::King, "g8"),
            (Color::Black, PieceKind::Pawn, "f7"),
            (Color::Black, PieceKind::Pawn, "g7"),
            (Color::Black, PieceKind::Pawn, "h7"),
            (Color::White, PieceKind::Queen, "d8"),
            (Color::White, PieceKind::King, "g1"),
        ]);
        let history = PositionHistory::from(vec![board.position_key()]);

        let status = classifier.classify(&board, &history, 0, Color::Black, None);
        assert!(status.in_check);
        assert!(status.in_checkmate);
        assert!(!status.in_draw);
        assert_eq!(status.draw_reason, None);
        assert!(status.is_terminal());
    }

    #[test]
    fn test_stalemate() {
        let classifier = Classifier::new();
        let board = board_with(&[
            (Color::White, PieceKind::King, "a1"),
            (Color::Black, PieceKind::King, "c2"),
            (Color::Black, PieceKind::Queen, "b3"),
        ]);

        let status = classifier.classify(&board, &PositionHistory::new(), 0, Color::White, None);
        assert!(!status.in_check);
        assert!(!status.in_checkmate);
        assert_eq!(status.draw_reason, Some(DrawReason::Stalemate));
        assert!(classifier.is_stalemate(&board, Color::White, None));
        assert!(!classifier.is_checkmate(&board, Color::White, None));
    }

    #[test]
    fn test_insufficient_material_precedes_stalemate() {
        let classifier = Classifier::new();
        // Black king a8 stalemated by the white king and bishop.
        let board = board_with(&[
            (Color::Black, PieceKind::King, "a8"),
            (Color::White, PieceKind::King, "b6"),
            (Color::White, PieceKind::Bishop, "e5"),
        ]);
        let status = classifier.classify(&board, &PositionHistory::new(), 0, Color::Black, None);
        assert!(classifier.is_stalemate(&board, Color::Black, None));
        assert_eq!(status.draw_reason, Some(DrawReason::InsufficientMaterial));
    }

    #[test]
    fn test_fifty_move_limit() {
        let classifier = Classifier::new();
        let board = Board::new();
        let history = PositionHistory::new();

        let status = classifier.classify(&board, &history, 99, Color::White, None);
        assert!(!status.in_draw);

        let status = classifier.classify(&board, &history, 100, Color::White, None);
        assert_eq!(status.draw_reason, Some(DrawReason::FiftyMove));
        assert_eq!(status.halfmove_clock, 100);
    }

    #[test]
    fn test_repetition_counts_current_entry() {
        let classifier = Classifier::new();
        let board = Board::new();
        let key = board.position_key();
        let mut history = PositionHistory::new();
        history.push(key.clone());
        history.push("elsewhere".to_string());
        history.push(key.clone());
        assert!(!classifier.is_repetition(&board, &history));

        history.push(key);
        let status = classifier.classify(&board, &history, 8, Color::White, None);
        assert_eq!(status.draw_reason, Some(DrawReason::ThreefoldRepetition));
    }

    #[test]
    fn test_repetition_precedes_fifty_move() {
        let classifier = Classifier::new();
        let board = Board::new();
        let history = PositionHistory::from(vec![board.position_key(); 3]);
        let status = classifier.classify(&board, &history, 120, Color::White, None);
        assert_eq!(status.draw_reason, Some(DrawReason::ThreefoldRepetition));
    }

    #[test]
    fn test_history_serializes_as_list() {
        let history = PositionHistory::from(vec!["a".to_string(), "b".to_string(), "a".to_string()]);
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, r#"["a","b","a"]"#);
        let back: PositionHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back.count("a"), 2);
        assert_eq!(back, history);
    }
}
