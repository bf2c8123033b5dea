pub mod app;
pub mod board;
pub mod theme;

pub use app::run_app;
pub use board::{BoardWidget, TerminalBoard};
pub use theme::Theme;
