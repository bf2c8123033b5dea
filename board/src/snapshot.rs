//! One authoritative view of the game, replaced as a unit.

use crate::moves::LegalMoveIndex;
use crate::position::Position;
use crate::token::GameStateToken;
use crate::types::PieceColor;

/// Position, legal moves and token as returned together by the rules
/// service. The legal moves are only meaningful against this token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub position: Position,
    pub legal_moves: LegalMoveIndex,
    pub token: GameStateToken,
}

impl GameSnapshot {
    pub fn new(position: Position, legal_moves: LegalMoveIndex, token: GameStateToken) -> Self {
        Self {
            position,
            legal_moves,
            token,
        }
    }

    /// Placeholder before the first fetch: empty board, nothing movable.
    pub fn unsynced(token: GameStateToken) -> Self {
        Self::new(Position::empty(), LegalMoveIndex::new(), token)
    }

    pub fn side_to_move(&self) -> Option<PieceColor> {
        self.token.side_to_move().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsynced_snapshot_has_nothing_to_move() {
        let snapshot = GameSnapshot::unsynced(GameStateToken::initial());
        assert_eq!(snapshot.position.pieces().count(), 0);
        assert!(snapshot.legal_moves.is_empty());
        assert_eq!(snapshot.side_to_move(), Some(PieceColor::White));
    }

    #[test]
    fn garbage_token_has_no_side_to_move() {
        let snapshot = GameSnapshot::unsynced(GameStateToken::new("garbage"));
        assert_eq!(snapshot.side_to_move(), None);
    }
}
