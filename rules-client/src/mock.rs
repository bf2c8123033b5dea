//! Mock RulesService implementation for testing

use crate::error::{ClientError, ClientResult};
use crate::traits::RulesService;
use async_trait::async_trait;
use board::{ChessMove, GameSnapshot, GameStateToken};
use std::sync::{Arc, Mutex};

type ValidMovesFn = Box<dyn Fn(&GameStateToken) -> ClientResult<GameSnapshot> + Send>;
type SubmitMoveFn = Box<dyn Fn(&GameStateToken, ChessMove) -> ClientResult<GameSnapshot> + Send>;

/// Mock service for testing - only compiled in test mode or with mock feature.
/// Clones share responses and the call log.
#[derive(Clone)]
pub struct MockRulesService {
    responses: Arc<Mutex<MockResponses>>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Default)]
struct MockResponses {
    valid_moves: Option<ValidMovesFn>,
    submit_move: Option<SubmitMoveFn>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    ValidMoves {
        token: GameStateToken,
    },
    SubmitMove {
        token: GameStateToken,
        mv: ChessMove,
    },
}

impl Default for MockRulesService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRulesService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(MockResponses::default())),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Configure valid_moves response
    pub fn with_valid_moves_response<F>(self, f: F) -> Self
    where
        F: Fn(&GameStateToken) -> ClientResult<GameSnapshot> + Send + 'static,
    {
        self.responses.lock().unwrap().valid_moves = Some(Box::new(f));
        self
    }

    /// Configure submit_move response
    pub fn with_submit_move_response<F>(self, f: F) -> Self
    where
        F: Fn(&GameStateToken, ChessMove) -> ClientResult<GameSnapshot> + Send + 'static,
    {
        self.responses.lock().unwrap().submit_move = Some(Box::new(f));
        self
    }

    /// Always answer valid_moves with `snapshot`
    pub fn with_snapshot(self, snapshot: GameSnapshot) -> Self {
        self.with_valid_moves_response(move |_| Ok(snapshot.clone()))
    }

    /// Refuse every submitted move
    pub fn rejecting_moves(self, reason: &str) -> Self {
        let reason = reason.to_string();
        self.with_submit_move_response(move |_, _| {
            Err(ClientError::Rejected {
                status: 400,
                reason: reason.clone(),
            })
        })
    }

    /// Get recorded calls for verification
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Submitted moves in call order
    pub fn submitted_moves(&self) -> Vec<ChessMove> {
        self.get_calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::SubmitMove { mv, .. } => Some(mv),
                MockCall::ValidMoves { .. } => None,
            })
            .collect()
    }

    /// Clear call history
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }
}

#[async_trait]
impl RulesService for MockRulesService {
    async fn valid_moves(&self, token: &GameStateToken) -> ClientResult<GameSnapshot> {
        self.call_log.lock().unwrap().push(MockCall::ValidMoves {
            token: token.clone(),
        });

        let responses = self.responses.lock().unwrap();
        if let Some(ref f) = responses.valid_moves {
            f(token)
        } else {
            Err(ClientError::NotConfigured("valid_moves".to_string()))
        }
    }

    async fn submit_move(
        &self,
        token: &GameStateToken,
        mv: ChessMove,
    ) -> ClientResult<GameSnapshot> {
        self.call_log.lock().unwrap().push(MockCall::SubmitMove {
            token: token.clone(),
            mv,
        });

        let responses = self.responses.lock().unwrap();
        if let Some(ref f) = responses.submit_move {
            f(token, mv)
        } else {
            Err(ClientError::NotConfigured("submit_move".to_string()))
        }
    }
}
