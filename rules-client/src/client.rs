//! HTTP rules service client implementation

use crate::error::{ClientError, ClientResult};
use crate::traits::RulesService;
use crate::wire::{MoveRequest, MoveResponse, ValidMovesRequest, ValidMovesResponse};
use async_trait::async_trait;
use board::{ChessMove, GameSnapshot, GameStateToken};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

const VALID_MOVES_PATH: &str = "valid_moves";
const MOVE_PATH: &str = "move_req";
const HEALTH_PATH: &str = "chess";

/// Network client for communicating with the rules service
#[derive(Debug, Clone)]
pub struct RulesClient {
    http: Client,
    base_url: Url,
}

impl RulesClient {
    /// Build a client for the service rooted at `addr`
    pub fn connect(addr: &str, timeout: Duration) -> ClientResult<Self> {
        let mut base_url =
            Url::parse(addr).map_err(|e| ClientError::InvalidAddress(format!("{addr}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidAddress(addr.to_string()));
        }
        // Ensure relative joins append to the path instead of replacing it.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Probe the service's liveness endpoint
    pub async fn health_check(&self) -> ClientResult<()> {
        let url = self.endpoint(HEALTH_PATH)?;
        let response = self.http.get(url).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidAddress(e.to_string()))
    }

    /// Map non-success statuses onto the error taxonomy. 4xx means the
    /// service looked at the request and refused it, except for timeouts and
    /// rate limiting, which say nothing about the request itself.
    async fn check_status(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if is_refusal(status) {
            let reason = response.text().await.unwrap_or_default();
            let reason = if reason.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request refused")
                    .to_string()
            } else {
                reason.trim().to_string()
            };
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }
        Err(ClientError::ServerError(status.as_u16()))
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "POST");
        let response = self.http.post(url).json(body).send().await?;
        let response = Self::check_status(response).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Err(ClientError::InvalidData("empty response body".to_string()));
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidData(e.to_string()))
    }
}

fn is_refusal(status: StatusCode) -> bool {
    status.is_client_error()
        && !matches!(
            status,
            StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS
        )
}

#[async_trait]
impl RulesService for RulesClient {
    async fn valid_moves(&self, token: &GameStateToken) -> ClientResult<GameSnapshot> {
        let request = ValidMovesRequest {
            fen_state: token.clone(),
        };
        let response: ValidMovesResponse = self.post(VALID_MOVES_PATH, &request).await?;
        response.into_snapshot(token)
    }

    async fn submit_move(
        &self,
        token: &GameStateToken,
        mv: ChessMove,
    ) -> ClientResult<GameSnapshot> {
        let request = MoveRequest::new(token, mv);
        let response: MoveResponse = self.post(MOVE_PATH, &request).await?;
        response.into_snapshot()
    }
}
