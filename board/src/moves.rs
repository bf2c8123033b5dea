//! Moves and the legal-move index reported by the rules service.

use crate::square::{Square, SquareError};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A move from one square to another, written `e2e4` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
}

impl ChessMove {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// A move that leaves the piece where it started.
    pub fn is_null(self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for ChessMove {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.is_ascii() {
            return Err(SquareError::InvalidLength(s.to_string()));
        }
        Ok(Self {
            from: s[..2].parse()?,
            to: s[2..].parse()?,
        })
    }
}

type Destinations = SmallVec<[Square; 8]>;

/// Origin square to legal destination squares, for the side to move in one
/// specific game state token. Destination order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalMoveIndex {
    moves: HashMap<Square, Destinations>,
}

impl LegalMoveIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the wire map (`{"e2": ["e3", "e4"]}`). Any malformed
    /// square rejects the whole index.
    pub fn from_wire<'a, I, D>(entries: I) -> Result<Self, MoveIndexError>
    where
        I: IntoIterator<Item = (&'a String, D)>,
        D: IntoIterator<Item = &'a String>,
    {
        let mut index = Self::new();
        for (origin, destinations) in entries {
            let from: Square = origin
                .parse()
                .map_err(|source| MoveIndexError::Origin { source })?;
            for dest in destinations {
                let to: Square = dest.parse().map_err(|source| MoveIndexError::Destination {
                    origin: from,
                    source,
                })?;
                index.insert(ChessMove::new(from, to));
            }
        }
        Ok(index)
    }

    pub fn insert(&mut self, mv: ChessMove) {
        let destinations = self.moves.entry(mv.from).or_default();
        if !destinations.contains(&mv.to) {
            destinations.push(mv.to);
        }
    }

    /// Destinations for `origin`, empty when it has none.
    pub fn destinations(&self, origin: Square) -> &[Square] {
        self.moves.get(&origin).map(|d| d.as_slice()).unwrap_or(&[])
    }

    pub fn contains(&self, mv: ChessMove) -> bool {
        self.destinations(mv.from).contains(&mv.to)
    }

    pub fn origins(&self) -> impl Iterator<Item = Square> + '_ {
        self.moves.keys().copied()
    }

    /// Number of origin squares with at least one legal move.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Convert back to the wire map shape.
    pub fn to_wire(&self) -> HashMap<String, Vec<String>> {
        self.moves
            .iter()
            .map(|(from, tos)| {
                (
                    from.to_string(),
                    tos.iter().map(|to| to.to_string()).collect(),
                )
            })
            .collect()
    }
}

impl FromIterator<ChessMove> for LegalMoveIndex {
    fn from_iter<T: IntoIterator<Item = ChessMove>>(iter: T) -> Self {
        let mut index = Self::new();
        for mv in iter {
            index.insert(mv);
        }
        index
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveIndexError {
    #[error("invalid origin square: {source}")]
    Origin { source: SquareError },
    #[error("invalid destination for {origin}: {source}")]
    Destination { origin: Square, source: SquareError },
}
