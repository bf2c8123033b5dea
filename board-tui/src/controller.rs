//! Pointer-driven piece interaction.
//!
//! The controller is a two-state machine (`Idle`, `Dragging`) fed with
//! board-relative pointer events. It reads the position model to decide what
//! may be picked up and which squares to highlight, and tells the render
//! adapter what to show. It never talks to the network itself: a completed
//! drag yields a [`ChessMove`] for the caller to submit, and the caller
//! reports the outcome back through [`InteractionController::commit_finished`].

use crate::model::PositionModel;
use crate::render::{Notice, RenderAdapter};
use crate::sync::{SyncError, SyncResult};
use board::{BoardGeometry, ChessMove, Piece, PixelPoint, Square};

/// An in-progress drag. Created on pointer-down over a movable piece and
/// destroyed on pointer-up whatever the outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionSession {
    pub origin: Square,
    pub piece: Piece,
    /// Pointer position relative to the piece's drawn origin.
    pub offset: PixelPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(InteractionSession),
}

pub struct InteractionController {
    geometry: BoardGeometry,
    model: PositionModel,
    state: DragState,
    /// Move handed to the caller and not yet answered.
    pending: Option<ChessMove>,
    hovered: Option<Square>,
}

impl InteractionController {
    pub fn new(geometry: BoardGeometry, model: PositionModel) -> Self {
        Self {
            geometry,
            model,
            state: DragState::Idle,
            pending: None,
            hovered: None,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn is_commit_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_move(&self) -> Option<ChessMove> {
        self.pending
    }

    pub fn hovered(&self) -> Option<Square> {
        self.hovered
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn model(&self) -> &PositionModel {
        &self.model
    }

    /// Redraw from whatever snapshot the model holds now.
    pub fn resync(&mut self, renderer: &mut dyn RenderAdapter) {
        renderer.redraw(&self.model.snapshot().position);
        self.hovered = None;
    }

    /// Try to pick up the piece under `point`. Returns whether a drag began.
    ///
    /// A press while a drag is still open means its release was never seen;
    /// that drag is cancelled before the new press is handled.
    pub fn pointer_down(&mut self, point: PixelPoint, renderer: &mut dyn RenderAdapter) -> bool {
        if let DragState::Dragging(stale) = std::mem::take(&mut self.state) {
            tracing::debug!(square = %stale.origin, "Release lost, cancelling previous drag");
            renderer.hide_move_indicators();
            self.snap_back(stale.origin, renderer);
        }
        if let Some(mv) = self.pending {
            tracing::debug!(pending = %mv, "Ignoring pick-up while a move is being committed");
            return false;
        }
        let Ok(origin) = self.geometry.square_at(point) else {
            return false;
        };

        let snapshot = self.model.snapshot();
        let Some(piece) = snapshot.position.piece_at(origin) else {
            return false;
        };
        if snapshot.side_to_move() != Some(piece.color) {
            tracing::debug!(square = %origin, piece = %piece, "Not this side's turn");
            return false;
        }

        let offset = point - self.geometry.piece_origin(origin);
        self.state = DragState::Dragging(InteractionSession {
            origin,
            piece,
            offset,
        });
        tracing::debug!(square = %origin, piece = %piece, "Drag started");

        renderer.hide_move_indicators();
        renderer.show_move_indicators(&self.model.legal_destinations(origin));
        true
    }

    /// Follow the pointer while dragging; otherwise track hovered squares.
    pub fn pointer_move(&mut self, point: PixelPoint, renderer: &mut dyn RenderAdapter) {
        match self.state {
            DragState::Dragging(session) => {
                renderer.move_piece(session.origin, point - session.offset);
            }
            DragState::Idle => {
                let square = self.geometry.square_at(point).ok();
                if square == self.hovered {
                    return;
                }
                if self.hovered.is_some() {
                    self.pointer_leave(renderer);
                }
                if let Some(square) = square {
                    self.pointer_enter(square, renderer);
                }
            }
        }
    }

    /// Finish the drag. Returns the move to submit, if any.
    ///
    /// The piece is snapped to the destination straight away; if the move
    /// is later refused, [`Self::commit_finished`] puts it back.
    pub fn pointer_up(
        &mut self,
        point: PixelPoint,
        renderer: &mut dyn RenderAdapter,
    ) -> Option<ChessMove> {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        renderer.hide_move_indicators();
        self.hovered = None;

        let Ok(dest) = self.geometry.square_at(point) else {
            tracing::debug!(square = %session.origin, "Dropped outside the board, cancelling");
            self.snap_back(session.origin, renderer);
            return None;
        };

        let mv = ChessMove::new(session.origin, dest);
        if mv.is_null() {
            tracing::debug!(square = %session.origin, "Dropped on origin, nothing to do");
            self.snap_back(session.origin, renderer);
            return None;
        }

        renderer.move_piece(session.origin, self.geometry.piece_origin(dest));
        self.pending = Some(mv);
        tracing::debug!(mv = %mv, "Drag committed");
        Some(mv)
    }

    fn snap_back(&self, origin: Square, renderer: &mut dyn RenderAdapter) {
        renderer.move_piece(origin, self.geometry.piece_origin(origin));
    }

    /// Report the outcome of submitting the pending move. The board is
    /// redrawn from the model either way: on success that shows the new
    /// position, on failure it reverts the optimistic placement.
    pub fn commit_finished<T>(
        &mut self,
        result: &SyncResult<T>,
        renderer: &mut dyn RenderAdapter,
    ) {
        let pending = self.pending.take();
        self.resync(renderer);

        let Err(err) = result else {
            return;
        };
        let notice = match err {
            SyncError::Rejected { mv, reason } => {
                Notice::Warning(format!("Move {mv} refused: {reason}"))
            }
            SyncError::Network(e) => Notice::Warning(format!(
                "Could not reach the rules service ({e}). Press r to resync."
            )),
            SyncError::Superseded { .. } => {
                Notice::Info("Board changed while the move was in flight".to_string())
            }
        };
        tracing::warn!(mv = ?pending, "Commit failed: {}", err);
        renderer.notify(notice);
    }

    /// Pointer entered `square`: show where its piece may go.
    pub fn pointer_enter(&mut self, square: Square, renderer: &mut dyn RenderAdapter) {
        self.hovered = Some(square);
        // The dragged piece owns the overlay until it is dropped, and a
        // pending commit makes the current index about to go stale.
        if self.is_dragging() || self.pending.is_some() {
            return;
        }
        let destinations = self.model.legal_destinations(square);
        if !destinations.is_empty() {
            renderer.show_move_indicators(&destinations);
        }
    }

    /// Pointer left the hovered square: hide all indicators.
    pub fn pointer_leave(&mut self, renderer: &mut dyn RenderAdapter) {
        self.hovered = None;
        if self.is_dragging() {
            return;
        }
        renderer.hide_move_indicators();
    }
}
