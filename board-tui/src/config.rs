//! Runtime configuration for the board client.
//!
//! Every value has a compile-time default and can be overridden through a
//! dedicated environment variable. Command-line flags, handled in `main`,
//! take precedence over both.

use board::{BoardGeometry, GeometryError};
use std::path::PathBuf;
use std::time::Duration;

/// Default rules service address.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:9090";

/// Default per-request timeout (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Default directory for the rolling log file.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Terminal columns per board square.
pub const SQUARE_COLS: u16 = 7;

/// Terminal rows per board square.
pub const SQUARE_ROWS: u16 = 3;

/// Get the rules service URL.
///
/// Priority:
/// 1. `BOARD_SYNC_SERVER_URL` env variable if set
/// 2. `http://localhost:9090` as fallback
pub fn get_server_url() -> String {
    std::env::var("BOARD_SYNC_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string())
}

/// Get the request timeout in seconds.
///
/// Priority:
/// 1. `BOARD_SYNC_REQUEST_TIMEOUT_SECS` env variable if set (falls back to
///    the default if the value cannot be parsed as a `u64`)
/// 2. `5` seconds as fallback
pub fn get_request_timeout_secs() -> u64 {
    if let Ok(timeout) = std::env::var("BOARD_SYNC_REQUEST_TIMEOUT_SECS") {
        return timeout.parse().unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Get the log directory.
///
/// Priority:
/// 1. `BOARD_SYNC_LOG_DIR` env variable if set
/// 2. `logs` as fallback
pub fn get_log_dir() -> PathBuf {
    if let Ok(path) = std::env::var("BOARD_SYNC_LOG_DIR") {
        return PathBuf::from(path);
    }

    PathBuf::from(DEFAULT_LOG_DIR)
}

/// Geometry of the terminal board, where one cell is one "pixel".
///
/// Pieces are drawn in the middle of their square by the widget, so the
/// piece inset is zero.
pub fn terminal_geometry() -> Result<BoardGeometry, GeometryError> {
    BoardGeometry::new(f32::from(SQUARE_COLS), f32::from(SQUARE_ROWS))
}

/// Settled configuration for one client session.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub server_url: String,
    pub request_timeout: Duration,
    pub log_dir: PathBuf,
}

impl ClientConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self {
            server_url: get_server_url(),
            request_timeout: Duration::from_secs(get_request_timeout_secs()),
            log_dir: get_log_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board::{PixelPoint, Square};

    #[test]
    fn test_get_server_url() {
        let url = get_server_url();
        match std::env::var("BOARD_SYNC_SERVER_URL") {
            Ok(val) => assert_eq!(url, val),
            Err(_) => assert_eq!(url, DEFAULT_SERVER_URL),
        }
    }

    #[test]
    fn test_get_request_timeout_secs_default() {
        if std::env::var("BOARD_SYNC_REQUEST_TIMEOUT_SECS").is_err() {
            assert_eq!(get_request_timeout_secs(), DEFAULT_REQUEST_TIMEOUT_SECS);
        }
    }

    #[test]
    fn test_get_log_dir() {
        let dir = get_log_dir();
        match std::env::var("BOARD_SYNC_LOG_DIR") {
            Ok(val) => assert_eq!(dir, PathBuf::from(val)),
            Err(_) => assert_eq!(dir, PathBuf::from(DEFAULT_LOG_DIR)),
        }
    }

    #[test]
    fn test_from_env_matches_getters() {
        let config = ClientConfig::from_env();
        assert_eq!(config.server_url, get_server_url());
        assert_eq!(
            config.request_timeout,
            Duration::from_secs(get_request_timeout_secs())
        );
        assert_eq!(config.log_dir, get_log_dir());
    }

    #[test]
    fn test_terminal_geometry_cells() {
        let geometry = terminal_geometry().unwrap();
        assert_eq!(geometry.extent(), (56.0, 24.0));
        let e2: Square = "e2".parse().unwrap();
        assert_eq!(geometry.origin_of(e2), PixelPoint::new(28.0, 18.0));
        assert_eq!(geometry.piece_origin(e2), geometry.origin_of(e2));
        assert_eq!(geometry.square_at(PixelPoint::new(34.0, 20.0)), Ok(e2));
    }
}
