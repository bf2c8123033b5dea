//! JSON bodies exchanged with the rules service.
//!
//! Responses are converted into a [`GameSnapshot`] all at once; if any field
//! fails to parse nothing is returned, so a malformed reply can never be
//! partially applied.

use crate::error::{ClientError, ClientResult};
use board::{ChessMove, GameSnapshot, GameStateToken, LegalMoveIndex, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidMovesRequest {
    pub fen_state: GameStateToken,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    pub current_fen_state: GameStateToken,
    pub chess_move: String,
}

impl MoveRequest {
    pub fn new(token: &GameStateToken, mv: ChessMove) -> Self {
        Self {
            current_fen_state: token.clone(),
            chess_move: mv.to_string(),
        }
    }
}

/// Board layout as rows of single-character piece codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebGame {
    pub state: Vec<Vec<String>>,
}

impl From<&Position> for WebGame {
    fn from(position: &Position) -> Self {
        Self {
            state: position.to_rows(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidMovesResponse {
    pub web_game: WebGame,
    pub moves: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResponse {
    pub web_game: WebGame,
    pub resulting_fen: GameStateToken,
    pub moves: HashMap<String, Vec<String>>,
}

fn decode(
    web_game: &WebGame,
    moves: &HashMap<String, Vec<String>>,
    token: GameStateToken,
) -> ClientResult<GameSnapshot> {
    let position = Position::from_rows(&web_game.state)
        .map_err(|e| ClientError::InvalidData(format!("web_game.state: {e}")))?;
    let legal_moves = LegalMoveIndex::from_wire(moves)
        .map_err(|e| ClientError::InvalidData(format!("moves: {e}")))?;
    Ok(GameSnapshot::new(position, legal_moves, token))
}

impl ValidMovesResponse {
    /// The valid-moves reply does not echo a token; the snapshot pairs the
    /// reply with the token that was sent.
    pub fn into_snapshot(self, sent: &GameStateToken) -> ClientResult<GameSnapshot> {
        decode(&self.web_game, &self.moves, sent.clone())
    }
}

impl MoveResponse {
    pub fn into_snapshot(self) -> ClientResult<GameSnapshot> {
        if self.resulting_fen.as_str().trim().is_empty() {
            return Err(ClientError::InvalidData("resulting_fen is empty".to_string()));
        }
        decode(&self.web_game, &self.moves, self.resulting_fen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board::Square;

    const START_RESPONSE: &str = r#"{
        "web_game": { "state": [
            ["r","n","b","q","k","b","n","r"],
            ["p","p","p","p","p","p","p","p"],
            [".",".",".",".",".",".",".","."],
            [".",".",".",".",".",".",".","."],
            [".",".",".",".",".",".",".","."],
            [".",".",".",".",".",".",".","."],
            ["P","P","P","P","P","P","P","P"],
            ["R","N","B","Q","K","B","N","R"]
        ]},
        "moves": { "e2": ["e3", "e4"], "g1": ["f3", "h3"] }
    }"#;

    #[test]
    fn request_bodies_match_service_field_names() {
        let token = GameStateToken::initial();
        let body = serde_json::to_value(ValidMovesRequest {
            fen_state: token.clone(),
        })
        .unwrap();
        assert_eq!(body["fen_state"], token.as_str());

        let mv = "e2e4".parse().unwrap();
        let body = serde_json::to_value(MoveRequest::new(&token, mv)).unwrap();
        assert_eq!(body["current_fen_state"], token.as_str());
        assert_eq!(body["chess_move"], "e2e4");
    }

    #[test]
    fn valid_moves_response_decodes() {
        let response: ValidMovesResponse = serde_json::from_str(START_RESPONSE).unwrap();
        let token = GameStateToken::initial();
        let snapshot = response.into_snapshot(&token).unwrap();

        assert_eq!(snapshot.token, token);
        assert_eq!(snapshot.position.pieces().count(), 32);
        let e2: Square = "e2".parse().unwrap();
        assert_eq!(snapshot.legal_moves.destinations(e2).len(), 2);
    }

    #[test]
    fn move_response_carries_new_token() {
        let mut value: serde_json::Value = serde_json::from_str(START_RESPONSE).unwrap();
        value["resulting_fen"] = "next b KQkq - 0 1".into();
        let response: MoveResponse = serde_json::from_value(value).unwrap();
        let snapshot = response.into_snapshot().unwrap();
        assert_eq!(snapshot.token.as_str(), "next b KQkq - 0 1");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut value: serde_json::Value = serde_json::from_str(START_RESPONSE).unwrap();
        value["engine"] = "mcts".into();
        assert!(serde_json::from_value::<ValidMovesResponse>(value).is_ok());
    }

    #[test]
    fn bad_board_is_invalid_data() {
        let mut value: serde_json::Value = serde_json::from_str(START_RESPONSE).unwrap();
        value["web_game"]["state"][0][0] = "?".into();
        let response: ValidMovesResponse = serde_json::from_value(value).unwrap();
        assert!(matches!(
            response.into_snapshot(&GameStateToken::initial()),
            Err(ClientError::InvalidData(_))
        ));
    }

    #[test]
    fn bad_move_square_is_invalid_data() {
        let mut value: serde_json::Value = serde_json::from_str(START_RESPONSE).unwrap();
        value["moves"]["e2"] = serde_json::json!(["e3", "e44"]);
        let response: ValidMovesResponse = serde_json::from_value(value).unwrap();
        assert!(matches!(
            response.into_snapshot(&GameStateToken::initial()),
            Err(ClientError::InvalidData(_))
        ));
    }

    #[test]
    fn empty_resulting_fen_is_invalid_data() {
        let mut value: serde_json::Value = serde_json::from_str(START_RESPONSE).unwrap();
        value["resulting_fen"] = "".into();
        let response: MoveResponse = serde_json::from_value(value).unwrap();
        assert!(matches!(
            response.into_snapshot(),
            Err(ClientError::InvalidData(_))
        ));
    }
}
