//! The game state token exchanged with the rules service.
//!
//! The token is a FEN string, but apart from the side-to-move field the
//! client treats it as opaque and passes it back verbatim.

use crate::types::PieceColor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard starting position.
pub const INITIAL_TOKEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameStateToken(String);

impl GameStateToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn initial() -> Self {
        Self::new(INITIAL_TOKEN)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read the turn field (second whitespace-separated field).
    pub fn side_to_move(&self) -> Result<PieceColor, TokenError> {
        let parts: Vec<&str> = self.0.split_whitespace().collect();
        match parts.get(1) {
            Some(&"w") => Ok(PieceColor::White),
            Some(&"b") => Ok(PieceColor::Black),
            Some(other) => Err(TokenError::InvalidTurn(other.to_string())),
            None => Err(TokenError::MissingTurn),
        }
    }
}

impl Default for GameStateToken {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for GameStateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for GameStateToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for GameStateToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("game state token has no turn field")]
    MissingTurn,
    #[error("invalid turn field {0:?}")]
    InvalidTurn(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_token_has_white_to_move() {
        assert_eq!(
            GameStateToken::initial().side_to_move(),
            Ok(PieceColor::White)
        );
    }

    #[test]
    fn black_to_move() {
        let token =
            GameStateToken::new("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
        assert_eq!(token.side_to_move(), Ok(PieceColor::Black));
    }

    #[test]
    fn malformed_turn_field() {
        assert_eq!(
            GameStateToken::new("8/8/8/8/8/8/8/8").side_to_move(),
            Err(TokenError::MissingTurn)
        );
        assert_eq!(
            GameStateToken::new("8/8/8/8/8/8/8/8 x - - 0 1").side_to_move(),
            Err(TokenError::InvalidTurn("x".to_string()))
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let token = GameStateToken::initial();
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, format!("\"{}\"", INITIAL_TOKEN));
        let back: GameStateToken = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }
}
