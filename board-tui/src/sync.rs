//! Relays rules service answers into the position model.
//!
//! The sync client never decides legality. It sends the token the model
//! currently holds, and applies the answer only if the model still holds
//! that token when the answer arrives. A late or repeated answer therefore
//! cannot apply the same move twice.

use crate::model::PositionModel;
use board::{ChessMove, GameSnapshot, GameStateToken};
use rules_client::{ClientError, RulesService};
use std::rc::Rc;
use thiserror::Error;

pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Error, Debug)]
pub enum SyncError {
    /// Transport failure, server error, or an unusable response body.
    #[error("rules service unavailable: {0}")]
    Network(ClientError),

    #[error("move {mv} rejected: {reason}")]
    Rejected { mv: ChessMove, reason: String },

    /// The model moved on while the request was in flight.
    #[error("response for {sent} arrived after the game state changed")]
    Superseded { sent: GameStateToken },
}

impl SyncError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

pub struct SyncClient<S> {
    service: S,
    model: PositionModel,
}

impl<S: RulesService> SyncClient<S> {
    pub fn new(service: S, model: PositionModel) -> Self {
        Self { service, model }
    }

    pub fn model(&self) -> &PositionModel {
        &self.model
    }

    /// Refresh legal moves for the token the model currently holds.
    pub async fn fetch_legal_moves(&self) -> SyncResult<Rc<GameSnapshot>> {
        let token = self.model.token();
        self.fetch_legal_moves_for(token).await
    }

    /// Fetch legal moves for `token` and, on success, make it the model's
    /// current state. Used at session start with the initial token.
    pub async fn fetch_legal_moves_for(
        &self,
        token: GameStateToken,
    ) -> SyncResult<Rc<GameSnapshot>> {
        let generation = self.model.generation();
        tracing::debug!(token = %token, "Fetching legal moves");

        let snapshot = self.service.valid_moves(&token).await.map_err(|e| {
            tracing::warn!(token = %token, "Failed to fetch legal moves: {}", e);
            SyncError::Network(e)
        })?;

        // A fetch may target a new token, so guard on generation rather than
        // token equality.
        if self.model.generation() != generation {
            tracing::warn!(token = %token, "Discarding legal moves for superseded state");
            return Err(SyncError::Superseded { sent: token });
        }

        tracing::info!(
            token = %snapshot.token,
            origins = snapshot.legal_moves.len(),
            "Legal moves synced"
        );
        Ok(self.model.replace(snapshot))
    }

    /// Submit `mv` against the current token.
    pub async fn submit_move(&self, mv: ChessMove) -> SyncResult<Rc<GameSnapshot>> {
        let sent = self.model.token();
        tracing::debug!(token = %sent, mv = %mv, "Submitting move");

        let snapshot = match self.service.submit_move(&sent, mv).await {
            Ok(snapshot) => snapshot,
            Err(ClientError::Rejected { reason, .. }) => {
                tracing::warn!(mv = %mv, "Move rejected: {}", reason);
                return Err(SyncError::Rejected { mv, reason });
            }
            Err(e) => {
                tracing::warn!(mv = %mv, "Move submission failed: {}", e);
                return Err(SyncError::Network(e));
            }
        };

        if self.model.token() != sent {
            tracing::warn!(mv = %mv, "Discarding move result for superseded state");
            return Err(SyncError::Superseded { sent });
        }

        tracing::info!(mv = %mv, token = %snapshot.token, "Move accepted");
        Ok(self.model.replace(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use board::{LegalMoveIndex, Position, Square, INITIAL_TOKEN};
    use rules_client::{ClientResult, MockCall, MockRulesService};
    use std::sync::Arc;
    use tokio::sync::Notify;

    /// Holds every answer until the test opens the gate.
    struct GatedService {
        gate: Arc<Notify>,
        reply: GameSnapshot,
    }

    #[async_trait]
    impl RulesService for GatedService {
        async fn valid_moves(&self, _token: &GameStateToken) -> ClientResult<GameSnapshot> {
            self.gate.notified().await;
            Ok(self.reply.clone())
        }

        async fn submit_move(
            &self,
            _token: &GameStateToken,
            _mv: ChessMove,
        ) -> ClientResult<GameSnapshot> {
            self.gate.notified().await;
            Ok(self.reply.clone())
        }
    }

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn snapshot_with(token: &str, moves: &[&str]) -> GameSnapshot {
        let legal_moves: LegalMoveIndex = moves.iter().map(|m| m.parse().unwrap()).collect();
        GameSnapshot::new(Position::empty(), legal_moves, GameStateToken::new(token))
    }

    #[tokio::test]
    async fn fetch_replaces_model() {
        let mock = MockRulesService::new()
            .with_valid_moves_response(|token| Ok(snapshot_with(token.as_str(), &["e2e4"])));
        let model = PositionModel::unsynced(GameStateToken::initial());
        let sync = SyncClient::new(mock.clone(), model.clone());

        sync.fetch_legal_moves().await.unwrap();

        assert_eq!(model.generation(), 1);
        assert_eq!(model.token(), GameStateToken::initial());
        assert!(model
            .snapshot()
            .legal_moves
            .contains("e2e4".parse().unwrap()));
        assert_eq!(
            mock.get_calls(),
            vec![MockCall::ValidMoves {
                token: GameStateToken::initial()
            }]
        );
    }

    #[tokio::test]
    async fn network_failure_leaves_model_untouched() {
        let mock = MockRulesService::new().with_valid_moves_response(|_| {
            Err(ClientError::InvalidData("truncated".to_string()))
        });
        let model = PositionModel::unsynced(GameStateToken::initial());
        let sync = SyncClient::new(mock, model.clone());

        let err = sync.fetch_legal_moves().await.unwrap_err();
        assert!(matches!(err, SyncError::Network(_)));
        assert_eq!(model.generation(), 0);
    }

    #[tokio::test]
    async fn accepted_move_replaces_model() {
        let mock = MockRulesService::new()
            .with_submit_move_response(|_, _| Ok(snapshot_with("next b - - 0 1", &["e7e5"])));
        let model = PositionModel::new(snapshot_with(INITIAL_TOKEN, &["e2e4"]));
        let sync = SyncClient::new(mock.clone(), model.clone());

        let mv = "e2e4".parse().unwrap();
        sync.submit_move(mv).await.unwrap();

        assert_eq!(model.token().as_str(), "next b - - 0 1");
        assert_eq!(
            model.snapshot().legal_moves.destinations(sq("e7")),
            &[sq("e5")]
        );
        assert_eq!(mock.submitted_moves(), vec![mv]);
    }

    #[tokio::test]
    async fn rejection_is_reported_without_mutation() {
        let mock = MockRulesService::new().rejecting_moves("illegal");
        let model = PositionModel::new(snapshot_with(INITIAL_TOKEN, &["e2e4"]));
        let before = model.snapshot();
        let sync = SyncClient::new(mock, model.clone());

        let err = sync.submit_move("e2e5".parse().unwrap()).await.unwrap_err();

        assert!(err.is_rejection());
        assert_eq!(model.generation(), 0);
        assert_eq!(*model.snapshot(), *before);
    }

    #[tokio::test]
    async fn response_for_stale_token_is_discarded() {
        let model = PositionModel::new(snapshot_with(INITIAL_TOKEN, &["e2e4"]));
        let gate = Arc::new(Notify::new());
        let service = GatedService {
            gate: gate.clone(),
            reply: snapshot_with("next b - - 0 1", &[]),
        };
        let sync = SyncClient::new(service, model.clone());

        // The model advances while the submission is still in flight.
        let (result, ()) = tokio::join!(sync.submit_move("e2e4".parse().unwrap()), async {
            model.replace(snapshot_with("other w - - 0 2", &[]));
            gate.notify_one();
        });

        assert!(matches!(result, Err(SyncError::Superseded { .. })));
        assert_eq!(model.token().as_str(), "other w - - 0 2");
        assert_eq!(model.generation(), 1);
    }

    #[tokio::test]
    async fn fetch_overtaken_by_replace_is_discarded() {
        let model = PositionModel::unsynced(GameStateToken::initial());
        let gate = Arc::new(Notify::new());
        let service = GatedService {
            gate: gate.clone(),
            reply: snapshot_with(INITIAL_TOKEN, &["e2e4"]),
        };
        let sync = SyncClient::new(service, model.clone());

        let (result, ()) = tokio::join!(sync.fetch_legal_moves(), async {
            model.replace(snapshot_with("moved b - - 0 1", &[]));
            gate.notify_one();
        });

        assert!(matches!(result, Err(SyncError::Superseded { .. })));
        assert_eq!(model.token().as_str(), "moved b - - 0 1");
    }
}
