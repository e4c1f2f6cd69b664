use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SquareParseError;

/// 0-based file and rank; `a1` is `(0, 0)`. Orders a1..h8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { rank, file })
        } else {
            None
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::new(index % 8, index / 8)
    }

    pub fn file(&self) -> u8 {
        self.file
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn index(&self) -> u8 {
        self.rank * 8 + self.file
    }

    pub fn offset(&self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if is_on_board(file, rank) {
            Self::new(file as u8, rank as u8)
        } else {
            None
        }
    }

    // (file + rank) mod 2 with the rank counted from 1
    pub fn parity(&self) -> u8 {
        (self.file + self.rank + 1) % 2
    }

    pub fn is_light(&self) -> bool {
        self.parity() == 0
    }

    pub fn file_char(&self) -> char {
        (b'a' + self.file) as char
    }

    pub fn rank_char(&self) -> char {
        (b'1' + self.rank) as char
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).filter_map(Square::from_index)
    }
}

pub fn is_on_board(file: i8, rank: i8) -> bool {
    (0..8).contains(&file) && (0..8).contains(&rank)
}

impl Ord for Square {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index().cmp(&other.index())
    }
}

impl PartialOrd for Square {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareParseError::Length(s.to_string()));
        }

        let file = match bytes[0] {
            b @ b'a'..=b'h' => b - b'a',
            _ => return Err(SquareParseError::File(bytes[0] as char)),
        };
        let rank = match bytes[1] {
            b @ b'1'..=b'8' => b - b'1',
            _ => return Err(SquareParseError::Rank(bytes[1] as char)),
        };

        Ok(Square { rank, file })
    }
}

impl TryFrom<String> for Square {
    type Error = SquareParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let e4: Square = "e4".parse().unwrap();
        assert_eq!(e4.file(), 4);
        assert_eq!(e4.rank(), 3);
        assert_eq!(e4.to_string(), "e4");

        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("a10".parse::<Square>().is_err());
        assert!("".parse::<Square>().is_err());
    }

    #[test]
    fn test_offset_does_not_wrap() {
        let h4: Square = "h4".parse().unwrap();
        assert_eq!(h4.offset(1, 0), None);
        assert_eq!(h4.offset(-1, 0), Some("g4".parse().unwrap()));

        let a1: Square = "a1".parse().unwrap();
        assert_eq!(a1.offset(-1, 2), None);
        assert_eq!(a1.offset(0, -1), None);
        assert_eq!(a1.offset(7, 7), Some("h8".parse().unwrap()));
    }

    #[test]
    fn test_ordering_is_rank_major() {
        let mut squares: Vec<Square> = ["b2", "h1", "a2", "a1"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        squares.sort();
        let names: Vec<String> = squares.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, ["a1", "h1", "a2", "b2"]);
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn test_square_colors() {
        let a1: Square = "a1".parse().unwrap();
        let h1: Square = "h1".parse().unwrap();
        let c1: Square = "c1".parse().unwrap();
        let f1: Square = "f1".parse().unwrap();
        assert!(!a1.is_light());
        assert!(h1.is_light());
        assert_ne!(c1.parity(), f1.parity());
    }

    #[test]
    fn test_serializes_as_name() {
        let d5: Square = "d5".parse().unwrap();
        let json = serde_json::to_string(&d5).unwrap();
        assert_eq!(json, "\"d5\"");
        let back: Square = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d5);
        assert!(serde_json::from_str::<Square>("\"z9\"").is_err());
    }
}
