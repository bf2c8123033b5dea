//! Algebraic square identifiers.
//!
//! Grid indices follow screen order: `col` 0 is file a, `row` 0 is rank 8.

use std::fmt;
use std::str::FromStr;

/// One of the 64 board cells, addressed by file (a-h) and rank (1-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Build from zero-based file (0 = a) and rank (0 = rank 1).
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { file, rank })
    }

    /// Build from grid indices, where row 0 is rank 8.
    pub fn from_grid(col: usize, row: usize) -> Option<Self> {
        if col >= 8 || row >= 8 {
            return None;
        }
        Self::new(col as u8, 7 - row as u8)
    }

    /// Grid indices `(col, row)` of this square.
    pub fn grid(self) -> (usize, usize) {
        (self.file as usize, 7 - self.rank as usize)
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    pub fn file_char(self) -> char {
        (b'a' + self.file) as char
    }

    pub fn rank_char(self) -> char {
        (b'1' + self.rank) as char
    }

    pub fn is_light(self) -> bool {
        (self.file + self.rank) % 2 == 1
    }

    /// All 64 squares in grid order: a8, b8, ..., h8, a7, ..., h1.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|row| (0..8).filter_map(move |col| Square::from_grid(col, row)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareError::InvalidLength(s.to_string()));
        }
        let file = match bytes[0] {
            b @ b'a'..=b'h' => b - b'a',
            _ => return Err(SquareError::InvalidFile(s.to_string())),
        };
        let rank = match bytes[1] {
            b @ b'1'..=b'8' => b - b'1',
            _ => return Err(SquareError::InvalidRank(s.to_string())),
        };
        Ok(Self { file, rank })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SquareError {
    #[error("square identifier must be two characters: {0:?}")]
    InvalidLength(String),
    #[error("invalid file in square {0:?}")]
    InvalidFile(String),
    #[error("invalid rank in square {0:?}")]
    InvalidRank(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats() {
        let sq: Square = "e2".parse().unwrap();
        assert_eq!(sq.file(), 4);
        assert_eq!(sq.rank(), 1);
        assert_eq!(sq.to_string(), "e2");
    }

    #[test]
    fn grid_row_zero_is_rank_eight() {
        assert_eq!(Square::from_grid(0, 0).unwrap().to_string(), "a8");
        assert_eq!(Square::from_grid(7, 7).unwrap().to_string(), "h1");
        assert_eq!(Square::from_grid(4, 6).unwrap().to_string(), "e2");
        assert_eq!(Square::from_grid(8, 0), None);
        assert_eq!(Square::from_grid(0, 8), None);
    }

    #[test]
    fn grid_round_trips_for_every_square() {
        let all: Vec<Square> = Square::all().collect();
        assert_eq!(all.len(), 64);
        for sq in all {
            let (col, row) = sq.grid();
            assert_eq!(Square::from_grid(col, row), Some(sq));
            assert_eq!(sq.to_string().parse::<Square>(), Ok(sq));
        }
    }

    #[test]
    fn rejects_malformed_identifiers() {
        assert!(matches!("e".parse::<Square>(), Err(SquareError::InvalidLength(_))));
        assert!(matches!("e22".parse::<Square>(), Err(SquareError::InvalidLength(_))));
        assert!(matches!("i2".parse::<Square>(), Err(SquareError::InvalidFile(_))));
        assert!(matches!("E2".parse::<Square>(), Err(SquareError::InvalidFile(_))));
        assert!(matches!("e9".parse::<Square>(), Err(SquareError::InvalidRank(_))));
        assert!(matches!("e0".parse::<Square>(), Err(SquareError::InvalidRank(_))));
    }

    #[test]
    fn square_colors() {
        assert!(!"a1".parse::<Square>().unwrap().is_light());
        assert!("h1".parse::<Square>().unwrap().is_light());
        assert!("a8".parse::<Square>().unwrap().is_light());
    }
}
