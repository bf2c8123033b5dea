//! Boundary between the interaction core and whatever draws the board.

use board::{PixelPoint, Position, Square};

/// Non-fatal message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Self::Info(text) | Self::Warning(text) => text,
        }
    }
}

/// Draws squares, pieces and legal-move indicators.
///
/// Pieces are addressed by the square they rest on in the last drawn
/// position, so the core never depends on presentation handles.
pub trait RenderAdapter {
    /// Rebuild the whole board from `position`. Any piece left floating by a
    /// drag snaps back to its square and all indicators are hidden.
    fn redraw(&mut self, position: &Position);

    /// Make the indicators on `squares` visible, in addition to any shown.
    fn show_move_indicators(&mut self, squares: &[Square]);

    fn hide_move_indicators(&mut self);

    /// Draw the piece resting on `piece` at `to` instead of its square.
    fn move_piece(&mut self, piece: Square, to: PixelPoint);

    fn notify(&mut self, _notice: Notice) {}
}
