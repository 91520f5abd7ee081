//! Game status state machine
//!
//! ```text
//! Pending ──start──▶ WhiteTurn ⇄ BlackTurn ──mate/stalemate──▶ Finished
//! ```
//!
//! Turns flip exactly once per committed move. `Finished` is terminal.
//! Rejected moves never reach this module.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::info;

use crate::board::Board;
use crate::check::{has_legal_move, is_in_check};
use crate::error::{MoveRejection, MoveResult};
use crate::types::Color;

/// Overall status of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Created, waiting for the game to start
    #[default]
    Pending,
    WhiteTurn,
    BlackTurn,
    /// Terminal: see the game's winner and ending
    Finished,
}

impl GameStatus {
    /// Status in which it is `color`'s turn
    pub fn turn_of(color: Color) -> Self {
        match color {
            Color::White => GameStatus::WhiteTurn,
            Color::Black => GameStatus::BlackTurn,
        }
    }

    /// Whose turn it is, if the game is in progress
    pub fn to_move(self) -> Option<Color> {
        match self {
            GameStatus::WhiteTurn => Some(Color::White),
            GameStatus::BlackTurn => Some(Color::Black),
            GameStatus::Pending | GameStatus::Finished => None,
        }
    }

    /// Side to move, or the rejection for moving in a non-playing status
    pub fn side_to_move(self) -> MoveResult<Color> {
        self.to_move().ok_or(MoveRejection::for_inactive(self))
    }

    pub fn is_finished(self) -> bool {
        self == GameStatus::Finished
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::Pending => "pending",
            GameStatus::WhiteTurn => "white_turn",
            GameStatus::BlackTurn => "black_turn",
            GameStatus::Finished => "finished",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GameStatus {
    type Err = crate::types::ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            GameStatus::Pending,
            GameStatus::WhiteTurn,
            GameStatus::BlackTurn,
            GameStatus::Finished,
        ]
        .into_iter()
        .find(|status| status.as_str() == s)
        .ok_or_else(|| crate::types::ParseNameError {
            what: "game status",
            value: s.to_string(),
        })
    }
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEnding {
    /// The side to move was in check with no legal move; the other side won
    Checkmate,
    /// The side to move had no legal move but was not in check; a draw
    Stalemate,
}

impl GameEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            GameEnding::Checkmate => "checkmate",
            GameEnding::Stalemate => "stalemate",
        }
    }
}

impl std::str::FromStr for GameEnding {
    type Err = crate::types::ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checkmate" => Ok(GameEnding::Checkmate),
            "stalemate" => Ok(GameEnding::Stalemate),
            _ => Err(crate::types::ParseNameError {
                what: "game ending",
                value: s.to_string(),
            }),
        }
    }
}

/// Attempted to start a game that is not pending
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot start a game that is {0}")]
pub struct AlreadyStarted(pub GameStatus);

/// Status fields recomputed after every committed move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub status: GameStatus,
    /// Color whose king is attacked, if any
    pub in_check: Option<Color>,
    pub winner: Option<Color>,
    pub ending: Option<GameEnding>,
}

/// pending → white_turn
pub fn start(status: GameStatus) -> Result<GameStatus, AlreadyStarted> {
    match status {
        GameStatus::Pending => Ok(GameStatus::WhiteTurn),
        other => Err(AlreadyStarted(other)),
    }
}

/// Compute the next status after `mover` committed a move producing `board`
///
/// The opponent is now to move. If they have no legal move the game is over:
/// checkmate when they are in check (mover wins), stalemate otherwise (draw).
pub fn advance(board: &Board, mover: Color, move_number: u32) -> Transition {
    let opponent = mover.opponent();
    let opponent_in_check = is_in_check(board, opponent);
    let in_check = opponent_in_check.then_some(opponent);

    if has_legal_move(board, opponent) {
        if opponent_in_check {
            info!("[GAME] {} king is in check", opponent);
        }
        return Transition {
            status: GameStatus::turn_of(opponent),
            in_check,
            winner: None,
            ending: None,
        };
    }

    if opponent_in_check {
        info!("[GAME] ========== CHECKMATE! ==========");
        info!("[GAME] {} wins | Final Move: #{}", mover, move_number);
        Transition {
            status: GameStatus::Finished,
            in_check,
            winner: Some(mover),
            ending: Some(GameEnding::Checkmate),
        }
    } else {
        info!("[GAME] ========== STALEMATE! ==========");
        info!("[GAME] {} has no legal moves but is not in check | Final Move: #{}", opponent, move_number);
        Transition {
            status: GameStatus::Finished,
            in_check: None,
            winner: None,
            ending: Some(GameEnding::Stalemate),
        }
    }
}
