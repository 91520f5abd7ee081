//! Public entry points used by collaborators
//!
//! The persistence layer loads a [`Game`], calls [`attempt_move`] with the
//! acting player's color and stores the game again only when the move was
//! accepted.

use crate::error::MoveResult;
use crate::game::{Game, MoveReport};
use crate::types::{Color, PieceId};

/// Create a game with the standard layout, ready for White's first move
pub fn start_game(name: impl Into<String>) -> Game {
    Game::started(name)
}

/// Validate and commit a move requested by `actor`
///
/// See [`Game::attempt_move`].
pub fn attempt_move(game: &mut Game, actor: Color, piece_id: PieceId, x: u8, y: u8) -> MoveResult<MoveReport> {
    game.attempt_move(actor, piece_id, x, y)
}
