//! Mapping between board-relative pixel coordinates and squares.
//!
//! Pixels are measured from the board's top-left corner. Column index is
//! `floor(x / square_width)` and row index is `floor(y / square_height)`,
//! with row 0 holding rank 8. The mapping is pure and allocation free.

use crate::square::Square;
use std::ops::{Add, Sub};

/// A point in board-relative pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for PixelPoint {
    type Output = PixelPoint;

    fn add(self, rhs: PixelPoint) -> PixelPoint {
        PixelPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for PixelPoint {
    type Output = PixelPoint;

    fn sub(self, rhs: PixelPoint) -> PixelPoint {
        PixelPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Fixed per-square cell size plus the inset at which piece sprites sit
/// inside their cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    square_width: f32,
    square_height: f32,
    piece_inset: PixelPoint,
}

impl Default for BoardGeometry {
    /// 80px cells with 45px sprites centered by a 15px inset.
    fn default() -> Self {
        Self {
            square_width: 80.0,
            square_height: 80.0,
            piece_inset: PixelPoint::new(15.0, 15.0),
        }
    }
}

impl BoardGeometry {
    pub fn new(square_width: f32, square_height: f32) -> Result<Self, GeometryError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(square_width) || !valid(square_height) {
            return Err(GeometryError::InvalidSquareSize {
                width: square_width,
                height: square_height,
            });
        }
        Ok(Self {
            square_width,
            square_height,
            piece_inset: PixelPoint::default(),
        })
    }

    pub fn with_piece_inset(mut self, inset: PixelPoint) -> Self {
        self.piece_inset = inset;
        self
    }

    pub fn square_width(&self) -> f32 {
        self.square_width
    }

    pub fn square_height(&self) -> f32 {
        self.square_height
    }

    /// Total board width and height in pixels.
    pub fn extent(&self) -> (f32, f32) {
        (self.square_width * 8.0, self.square_height * 8.0)
    }

    pub fn contains(&self, point: PixelPoint) -> bool {
        let (width, height) = self.extent();
        point.x.is_finite()
            && point.y.is_finite()
            && point.x >= 0.0
            && point.y >= 0.0
            && point.x < width
            && point.y < height
    }

    /// The square enclosing `point`.
    pub fn square_at(&self, point: PixelPoint) -> Result<Square, GeometryError> {
        if !self.contains(point) {
            return Err(GeometryError::OutOfBounds {
                x: point.x,
                y: point.y,
            });
        }
        let col = (point.x / self.square_width).floor() as usize;
        let row = (point.y / self.square_height).floor() as usize;
        // Float rounding at the far edge can still land on index 8.
        Square::from_grid(col.min(7), row.min(7)).ok_or(GeometryError::OutOfBounds {
            x: point.x,
            y: point.y,
        })
    }

    /// Top-left pixel of the square's cell.
    pub fn origin_of(&self, square: Square) -> PixelPoint {
        let (col, row) = square.grid();
        PixelPoint::new(
            col as f32 * self.square_width,
            row as f32 * self.square_height,
        )
    }

    /// Where a piece sprite resting on `square` is drawn.
    pub fn piece_origin(&self, square: Square) -> PixelPoint {
        self.origin_of(square) + self.piece_inset
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("point ({x}, {y}) lies outside the board")]
    OutOfBounds { x: f32, y: f32 },
    #[error("invalid square size {width}x{height}")]
    InvalidSquareSize { width: f32, height: f32 },
}
