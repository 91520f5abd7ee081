//! Error types for the rules engine
//!
//! Every illegal move is reported as a [`MoveRejection`]. Rejections are
//! ordinary values: none of them is fatal, and a rejected move never mutates
//! the game it was attempted against.

use serde::Serialize;
use thiserror::Error;

use crate::state::GameStatus;
use crate::types::{Color, PieceId, Square};

/// Why a castling attempt failed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CastlingFailure {
    #[error("the king has already moved")]
    KingMoved,

    #[error("no unmoved rook on the castling side")]
    RookUnavailable,

    #[error("squares between king and rook are occupied")]
    PathOccupied,

    #[error("the king is in check")]
    KingInCheck,

    /// The king would pass through or land on an attacked square
    #[error("the king would cross an attacked square at {square}")]
    SquareAttacked { square: Square },
}

/// Reasons a move attempt is refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum MoveRejection {
    /// Referenced piece does not exist in this game
    #[serde(rename = "not_found")]
    #[error("piece {id} not found")]
    PieceNotFound { id: PieceId },

    #[error("the game has not started")]
    GameNotStarted,

    #[error("the game is over")]
    GameOver,

    /// Acting color does not own the piece, or it is not that color's turn
    #[error("it is not {color}'s turn")]
    NotYourTurn { color: Color },

    #[error("piece {id} has already been captured")]
    PieceAlreadyCaptured { id: PieceId },

    #[error("target {target} is off the board")]
    OutOfBounds { target: Square },

    /// Target is not reachable by this piece's movement pattern
    #[error("a piece cannot move from {from} to {to}")]
    IllegalShape { from: Square, to: Square },

    #[error("the path from {from} to {to} is blocked")]
    PathBlocked { from: Square, to: Square },

    #[error("{target} is occupied by a piece of the same color")]
    OccupiedByOwnPiece { target: Square },

    /// Move would leave the mover's own king attacked
    #[error("move would leave own king in check")]
    SelfCheck,

    #[error("castling not allowed: {reason}")]
    CastlingPrecondition { reason: CastlingFailure },
}

impl MoveRejection {
    /// Stable reason code for diagnostics and transport responses
    pub fn code(&self) -> &'static str {
        match self {
            MoveRejection::PieceNotFound { .. } => "not_found",
            MoveRejection::GameNotStarted => "game_not_started",
            MoveRejection::GameOver => "game_over",
            MoveRejection::NotYourTurn { .. } => "not_your_turn",
            MoveRejection::PieceAlreadyCaptured { .. } => "piece_already_captured",
            MoveRejection::OutOfBounds { .. } => "out_of_bounds",
            MoveRejection::IllegalShape { .. } => "illegal_shape",
            MoveRejection::PathBlocked { .. } => "path_blocked",
            MoveRejection::OccupiedByOwnPiece { .. } => "occupied_by_own_piece",
            MoveRejection::SelfCheck => "self_check",
            MoveRejection::CastlingPrecondition { .. } => "castling_precondition",
        }
    }

    /// Rejection for a move attempted while the game is in `status`
    pub(crate) fn for_inactive(status: GameStatus) -> Self {
        match status {
            GameStatus::Pending => MoveRejection::GameNotStarted,
            _ => MoveRejection::GameOver,
        }
    }
}

/// Result type alias for move attempts
pub type MoveResult<T> = Result<T, MoveRejection>;
