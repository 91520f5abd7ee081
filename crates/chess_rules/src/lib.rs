//! Chess rules engine
//!
//! Decides, for any proposed move, whether it is legal, what it changes
//! (captures, castling, turn flip, game end) and what the resulting game
//! status is. The crate is synchronous and performs no I/O: callers own the
//! [`Game`] for the duration of a call and persist it afterwards.
//!
//! # Architecture
//!
//! - [`board`] - read-only occupancy view derived from the active pieces
//! - [`piece`] and [`move_gen`] - per-variant candidate move generation
//! - [`validator`] - legality, castling and the self-check guard
//! - [`check`] - check, checkmate and stalemate detection
//! - [`state`] - the pending → turns → finished state machine
//! - [`game`] - the aggregate that ties them together
//!
//! # Example
//!
//! ```rust
//! use chess_rules::{start_game, Color, GameStatus};
//!
//! let mut game = start_game("friendly");
//! let pawn = game.piece_at(1, 2).unwrap().id;
//! let report = game.attempt_move(Color::White, pawn, 1, 3).unwrap();
//! assert_eq!(report.status, GameStatus::BlackTurn);
//! ```

pub mod api;
pub mod board;
pub mod check;
pub mod constants;
pub mod error;
pub mod game;
pub mod move_gen;
pub mod piece;
pub mod state;
pub mod types;
pub mod validator;

pub use api::{attempt_move, start_game};
pub use board::Board;
pub use check::{has_legal_move, is_checkmate, is_in_check, is_stalemate};
pub use error::{CastlingFailure, MoveRejection, MoveResult};
pub use game::{CapturedPiece, Game, GameSnapshot, MoveReport};
pub use piece::Piece;
pub use state::{AlreadyStarted, GameEnding, GameStatus};
pub use types::{Color, GameId, PieceId, PieceKind, Square, Targets};
pub use validator::{MoveValidator, PlannedMove, RookRelocation};
