//! Client-side cache of the authoritative game state.
//!
//! The rules service is the source of truth. The model stores the latest
//! snapshot it returned and hands out immutable views of it; the only way
//! to change what the model holds is to replace the whole snapshot.

use board::{
    GameSnapshot, GameStateToken, LegalMoveIndex, PieceColor, Position, Square, SquareContents,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Shared handle to the current snapshot. Clones observe the same model.
#[derive(Debug, Clone)]
pub struct PositionModel {
    inner: Rc<Inner>,
}

#[derive(Debug)]
struct Inner {
    current: RefCell<Rc<GameSnapshot>>,
    generation: Cell<u64>,
}

impl PositionModel {
    pub fn new(snapshot: GameSnapshot) -> Self {
        Self {
            inner: Rc::new(Inner {
                current: RefCell::new(Rc::new(snapshot)),
                generation: Cell::new(0),
            }),
        }
    }

    /// Model holding only a token, before anything was fetched.
    pub fn unsynced(token: GameStateToken) -> Self {
        Self::new(GameSnapshot::unsynced(token))
    }

    /// Swap in a new snapshot. Views taken earlier keep seeing the old one.
    pub fn replace(&self, snapshot: GameSnapshot) -> Rc<GameSnapshot> {
        let snapshot = Rc::new(snapshot);
        *self.inner.current.borrow_mut() = Rc::clone(&snapshot);
        self.inner.generation.set(self.inner.generation.get() + 1);
        tracing::debug!(
            generation = self.inner.generation.get(),
            token = %snapshot.token,
            origins = snapshot.legal_moves.len(),
            "Position model replaced"
        );
        snapshot
    }

    pub fn replace_parts(
        &self,
        position: Position,
        legal_moves: LegalMoveIndex,
        token: GameStateToken,
    ) -> Rc<GameSnapshot> {
        self.replace(GameSnapshot::new(position, legal_moves, token))
    }

    /// The current snapshot. Holding it never blocks a replace.
    pub fn snapshot(&self) -> Rc<GameSnapshot> {
        Rc::clone(&self.inner.current.borrow())
    }

    /// Number of replacements so far.
    pub fn generation(&self) -> u64 {
        self.inner.generation.get()
    }

    pub fn token(&self) -> GameStateToken {
        self.snapshot().token.clone()
    }

    pub fn side_to_move(&self) -> Option<PieceColor> {
        self.snapshot().side_to_move()
    }

    pub fn contents_at(&self, square: Square) -> SquareContents {
        self.snapshot().position.contents_at(square)
    }

    /// True when `square` holds a piece of the side to move.
    pub fn is_movable(&self, square: Square) -> bool {
        movable(&self.snapshot(), square)
    }

    /// Cached destinations for `origin`, or empty when the square holds no
    /// piece of the side to move or the index has nothing for it.
    pub fn legal_destinations(&self, origin: Square) -> Vec<Square> {
        let snapshot = self.snapshot();
        if !movable(&snapshot, origin) {
            return Vec::new();
        }
        snapshot.legal_moves.destinations(origin).to_vec()
    }
}

fn movable(snapshot: &GameSnapshot, square: Square) -> bool {
    match (snapshot.position.piece_at(square), snapshot.side_to_move()) {
        (Some(piece), Some(side)) => piece.color == side,
        _ => false,
    }
}
