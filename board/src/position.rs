//! The 8x8 piece layout as last reported by the rules service.

use crate::square::Square;
use crate::types::Piece;
use std::fmt;

/// Code used on the wire for an empty square.
pub const EMPTY_CODE: char = '.';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SquareContents {
    #[default]
    Empty,
    Occupied(Piece),
}

impl SquareContents {
    pub fn from_code(code: &str) -> Result<Self, PositionError> {
        let mut chars = code.chars();
        match (chars.next(), chars.next()) {
            (Some(EMPTY_CODE), None) => Ok(Self::Empty),
            (Some(c), None) => Piece::from_code(c)
                .map(Self::Occupied)
                .ok_or_else(|| PositionError::InvalidCode(code.to_string())),
            _ => Err(PositionError::InvalidCode(code.to_string())),
        }
    }

    pub fn code(self) -> char {
        match self {
            Self::Empty => EMPTY_CODE,
            Self::Occupied(piece) => piece.code(),
        }
    }

    pub fn piece(self) -> Option<Piece> {
        match self {
            Self::Empty => None,
            Self::Occupied(piece) => Some(piece),
        }
    }
}

/// An 8x8 board. Rows run rank 8 to rank 1, columns file a to h.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Position {
    grid: [[SquareContents; 8]; 8],
}

impl Position {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from rows of single-character codes, as sent by the rules
    /// service. Exactly eight rows of eight cells are required.
    pub fn from_rows<R, C>(rows: &[R]) -> Result<Self, PositionError>
    where
        R: AsRef<[C]>,
        C: AsRef<str>,
    {
        if rows.len() != 8 {
            return Err(PositionError::RowCount(rows.len()));
        }
        let mut grid = [[SquareContents::Empty; 8]; 8];
        for (row_idx, row) in rows.iter().enumerate() {
            let cells = row.as_ref();
            if cells.len() != 8 {
                return Err(PositionError::ColumnCount {
                    row: row_idx,
                    len: cells.len(),
                });
            }
            for (col_idx, cell) in cells.iter().enumerate() {
                grid[row_idx][col_idx] = SquareContents::from_code(cell.as_ref())?;
            }
        }
        Ok(Self { grid })
    }

    /// Rows of single-character codes, the inverse of [`Position::from_rows`].
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.grid
            .iter()
            .map(|row| row.iter().map(|c| c.code().to_string()).collect())
            .collect()
    }

    pub fn contents_at(&self, square: Square) -> SquareContents {
        let (col, row) = square.grid();
        self.grid[row][col]
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.contents_at(square).piece()
    }

    /// Every occupied square in grid order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.grid.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.code())?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("expected 8 rows, got {0}")]
    RowCount(usize),
    #[error("expected 8 cells in row {row}, got {len}")]
    ColumnCount { row: usize, len: usize },
    #[error("invalid square code {0:?}")]
    InvalidCode(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceColor, PieceKind};

    fn starting_rows() -> Vec<Vec<&'static str>> {
        vec![
            vec!["r", "n", "b", "q", "k", "b", "n", "r"],
            vec!["p"; 8],
            vec!["."; 8],
            vec!["."; 8],
            vec!["."; 8],
            vec!["."; 8],
            vec!["P"; 8],
            vec!["R", "N", "B", "Q", "K", "B", "N", "R"],
        ]
    }

    #[test]
    fn test_starting_position() {
        let position = Position::from_rows(&starting_rows()).unwrap();
        let at = |s: &str| position.piece_at(s.parse().unwrap());

        assert_eq!(at("a1"), Some(Piece::new(PieceKind::Rook, PieceColor::White)));
        assert_eq!(at("e1"), Some(Piece::new(PieceKind::King, PieceColor::White)));
        assert_eq!(at("d8"), Some(Piece::new(PieceKind::Queen, PieceColor::Black)));
        assert_eq!(at("e2"), Some(Piece::new(PieceKind::Pawn, PieceColor::White)));
        assert_eq!(at("e4"), None);
        assert_eq!(position.pieces().count(), 32);
    }

    #[test]
    fn rows_round_trip() {
        let position = Position::from_rows(&starting_rows()).unwrap();
        let again = Position::from_rows(&position.to_rows()).unwrap();
        assert_eq!(position, again);
    }

    #[test]
    fn display_matches_rows() {
        let position = Position::from_rows(&starting_rows()).unwrap();
        let text = position.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "rnbqkbnr");
        assert_eq!(lines[4], "........");
        assert_eq!(lines[7], "RNBQKBNR");
    }

    #[test]
    fn rejects_wrong_dimensions() {
        let mut rows = starting_rows();
        rows.pop();
        assert_eq!(Position::from_rows(&rows), Err(PositionError::RowCount(7)));

        let mut rows = starting_rows();
        rows[3].push(".");
        assert_eq!(
            Position::from_rows(&rows),
            Err(PositionError::ColumnCount { row: 3, len: 9 })
        );
    }

    #[test]
    fn rejects_unknown_codes() {
        let mut rows = starting_rows();
        rows[2][0] = "x";
        assert!(matches!(
            Position::from_rows(&rows),
            Err(PositionError::InvalidCode(_))
        ));

        let mut rows = starting_rows();
        rows[2][0] = "pp";
        assert!(Position::from_rows(&rows).is_err());

        let mut rows = starting_rows();
        rows[2][0] = "";
        assert!(Position::from_rows(&rows).is_err());
    }

    #[test]
    fn empty_board() {
        let position = Position::empty();
        assert_eq!(position.pieces().count(), 0);
        for square in Square::all() {
            assert_eq!(position.contents_at(square), SquareContents::Empty);
        }
    }
}
