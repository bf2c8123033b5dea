//! Rules service HTTP client library
//!
//! Talks to the remote rules engine that owns legality: fetch the legal
//! moves for a game state token, or submit a move and get back the resulting
//! position.
//!
//! # Example
//!
//! ```no_run
//! use rules_client::{RulesClient, RulesService};
//! use board::GameStateToken;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RulesClient::connect("http://localhost:9090", Duration::from_secs(5))?;
//!     let snapshot = client.valid_moves(&GameStateToken::initial()).await?;
//!     println!("{} pieces can move", snapshot.legal_moves.len());
//!     Ok(())
//! }
//! ```

mod client;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod traits;
pub mod wire;

pub use client::RulesClient;
pub use error::{ClientError, ClientResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockCall, MockRulesService};
pub use traits::RulesService;
