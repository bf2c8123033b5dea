//! Board domain types shared by the rules client and the terminal UI.
//!
//! Nothing here knows chess rules; legality lives on the rules service.

pub mod geometry;
pub mod moves;
pub mod position;
pub mod snapshot;
pub mod square;
pub mod token;
pub mod types;

pub use geometry::{BoardGeometry, GeometryError, PixelPoint};
pub use moves::{ChessMove, LegalMoveIndex, MoveIndexError};
pub use position::{Position, PositionError, SquareContents};
pub use snapshot::GameSnapshot;
pub use square::{Square, SquareError};
pub use token::{GameStateToken, TokenError, INITIAL_TOKEN};
pub use types::{Piece, PieceColor, PieceKind};
