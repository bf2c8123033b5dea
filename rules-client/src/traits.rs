//! RulesService trait abstraction for client implementations

use crate::error::ClientResult;
use async_trait::async_trait;
use board::{ChessMove, GameSnapshot, GameStateToken};

/// Remote authority for legal moves and move results.
/// Implemented by both real RulesClient and MockRulesService
#[async_trait]
pub trait RulesService: Send + Sync {
    /// Legal moves and board layout for `token`. The returned snapshot
    /// carries `token` unchanged.
    async fn valid_moves(&self, token: &GameStateToken) -> ClientResult<GameSnapshot>;

    /// Apply `mv` to `token`. On success the snapshot holds the resulting
    /// token and the legal moves of the side now to move.
    async fn submit_move(&self, token: &GameStateToken, mv: ChessMove)
        -> ClientResult<GameSnapshot>;
}
