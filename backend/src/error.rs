//! Service level errors

use chess_rules::{GameId, MoveRejection, PieceId};
use thiserror::Error;

use crate::record::PlayerId;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("game {0} not found")]
    GameNotFound(GameId),

    #[error("piece {piece} not found in game {game}")]
    PieceNotFound { game: GameId, piece: PieceId },

    /// The acting player holds neither seat of the game
    #[error("player {player} is not seated in game {game}")]
    NotAPlayer { game: GameId, player: PlayerId },

    #[error("game {0} already has two players")]
    GameFull(GameId),

    #[error("player {player} already holds a seat in game {game}")]
    AlreadySeated { game: GameId, player: PlayerId },

    /// The game was written by someone else since it was loaded; nothing was persisted
    #[error("game {game} changed since revision {revision} was loaded")]
    Conflict { game: GameId, revision: u64 },

    /// The rules engine refused the move; nothing was persisted
    #[error("move rejected: {0}")]
    Rejected(#[from] MoveRejection),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Persisted data could not be turned back into a game
    #[error("corrupt record: {message}")]
    Corrupt { message: String },
}

impl ServiceError {
    pub(crate) fn corrupt(message: impl Into<String>) -> Self {
        ServiceError::Corrupt {
            message: message.into(),
        }
    }

    /// The rejection behind this error, if the rules engine refused a move
    pub fn rejection(&self) -> Option<&MoveRejection> {
        match self {
            ServiceError::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
