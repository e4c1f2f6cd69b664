use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::BoardError;
use crate::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    pub fn is_promotion_target(&self) -> bool {
        Self::PROMOTIONS.contains(self)
    }

    fn symbol(&self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }

    pub fn forward(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn home_rank(&self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn pawn_start_rank(&self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    pub fn en_passant_rank(&self) -> u8 {
        match self {
            Color::White => 4,
            Color::Black => 3,
        }
    }

    pub fn promotion_rank(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stable identity of a piece within one game. Survives moves and promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub color: Color,
    pub kind: PieceKind,
    pub square: Square,
    #[serde(default)]
    pub has_moved: bool,
}

/// Piece placement. At most one piece per square; ids are never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardData", into = "BoardData")]
pub struct Board {
    pieces: Vec<Piece>,
    next_id: u32,
}

#[derive(Serialize, Deserialize)]
struct BoardData {
    pieces: Vec<Piece>,
    #[serde(default)]
    next_id: u32,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    pub fn new() -> Self {
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            for (file, &kind) in BACK_RANK.iter().enumerate() {
                board.spawn(color, kind, file as u8, color.home_rank());
            }
            for file in 0..8 {
                board.spawn(color, PieceKind::Pawn, file, color.pawn_start_rank());
            }
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            pieces: Vec::new(),
            next_id: 0,
        }
    }

    pub fn from_pieces(pieces: Vec<Piece>) -> Result<Self, BoardError> {
        let mut squares = HashSet::new();
        let mut ids = HashSet::new();
        for piece in &pieces {
            if !squares.insert(piece.square) {
                return Err(BoardError::SquareOccupied(piece.square));
            }
            if !ids.insert(piece.id) {
                return Err(BoardError::DuplicateId(piece.id));
            }
        }
        let next_id = pieces.iter().map(|p| p.id.0 + 1).max().unwrap_or(0);
        Ok(Self { pieces, next_id })
    }

    pub fn place(&mut self, color: Color, kind: PieceKind, square: Square) -> Result<PieceId, BoardError> {
        if self.piece_at(square).is_some() {
            return Err(BoardError::SquareOccupied(square));
        }
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.pieces.push(Piece {
            id,
            color,
            kind,
            square,
            has_moved: false,
        });
        Ok(id)
    }

    fn spawn(&mut self, color: Color, kind: PieceKind, file: u8, rank: u8) {
        if let Some(square) = Square::new(file, rank) {
            self.pieces.push(Piece {
                id: PieceId(self.next_id),
                color,
                kind,
                square,
                has_moved: false,
            });
            self.next_id += 1;
        }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.color == color)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.square == square)
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn king(&self, color: Color) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| p.kind == PieceKind::King && p.color == color)
    }

    pub fn is_empty_at(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    pub(crate) fn remove(&mut self, id: PieceId) -> Option<Piece> {
        let index = self.pieces.iter().position(|p| p.id == id)?;
        Some(self.pieces.remove(index))
    }

    pub(crate) fn remove_at(&mut self, square: Square) -> Option<Piece> {
        let index = self.pieces.iter().position(|p| p.square == square)?;
        Some(self.pieces.remove(index))
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }

    /// Placement-only key used to detect repeated positions. Side to move,
    /// castling rights and en passant are not part of it.
    pub fn position_key(&self) -> String {
        // {color}{kind}{square} tokens, a1 first
        let mut sorted: Vec<&Piece> = self.pieces.iter().collect();
        sorted.sort_by_key(|p| p.square);
        sorted
            .iter()
            .map(|p| format!("{}{}{}", p.color.name(), p.kind.name(), p.square))
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<BoardData> for Board {
    type Error = BoardError;

    fn try_from(data: BoardData) -> Result<Self, Self::Error> {
        let mut board = Board::from_pieces(data.pieces)?;
        // Keep the counter past ids of pieces captured before the save
        board.next_id = board.next_id.max(data.next_id);
        Ok(board)
    }
}

impl From<Board> for BoardData {
    fn from(board: Board) -> Self {
        BoardData {
            pieces: board.pieces,
            next_id: board.next_id,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut result = String::new();
        for rank in (0..8).rev() {
            for file in 0..8 {
                let piece = Square::new(file, rank).and_then(|sq| self.piece_at(sq));
                match piece {
                    Some(p) if p.color == Color::White => result.push(p.kind.symbol().to_ascii_uppercase()),
                    Some(p) => result.push(p.kind.symbol()),
                    None => result.push('.'),
                }
                if file < 7 {
                    result.push(' ');
                }
            }
            result.push('\n');
        }
        write!(f, "{}", result)
    }
}
