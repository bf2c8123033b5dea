//! Interactive board client kept in sync with a remote rules service.
//!
//! The crate holds the client-side state machine: a cached [`PositionModel`],
//! the [`SyncClient`] that refreshes it, and the [`InteractionController`]
//! that turns pointer gestures into moves. Drawing goes through the
//! [`RenderAdapter`] trait; [`ui`] provides the terminal implementation.

pub mod config;
pub mod controller;
pub mod model;
pub mod render;
pub mod sync;
pub mod ui;

pub use controller::{DragState, InteractionController, InteractionSession};
pub use model::PositionModel;
pub use render::{Notice, RenderAdapter};
pub use sync::{SyncClient, SyncError, SyncResult};
