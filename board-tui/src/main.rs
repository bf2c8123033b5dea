use board::GameStateToken;
use board_tui::config::{self, ClientConfig};
use board_tui::ui;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "board-tui",
    about = "Drag-and-drop chess board backed by a remote rules service"
)]
struct Cli {
    /// Rules service base URL (overrides BOARD_SYNC_SERVER_URL)
    #[arg(short, long)]
    server: Option<String>,

    /// Per-request timeout in seconds (overrides BOARD_SYNC_REQUEST_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Directory for the rolling log file (overrides BOARD_SYNC_LOG_DIR)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Game state token to start from instead of the initial position
    #[arg(long)]
    fen: Option<String>,
}

impl Cli {
    fn into_config(self) -> (ClientConfig, GameStateToken) {
        let mut config = ClientConfig::from_env();
        if let Some(server) = self.server {
            config.server_url = server;
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(dir) = self.log_dir {
            config.log_dir = dir;
        }
        let start = self.fen.map(GameStateToken::new).unwrap_or_default();
        (config, start)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let (config, start) = Cli::parse().into_config();
    let geometry = config::terminal_geometry()?;

    // The terminal belongs to the board, so logs go to a file.
    std::fs::create_dir_all(&config.log_dir).ok();
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "board-tui");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!(
        server = %config.server_url,
        timeout_secs = config.request_timeout.as_secs(),
        start = %start,
        "Board client starting up"
    );

    ui::run_app(config, geometry, start).await?;

    tracing::info!("Board client shutting down");
    Ok(())
}
