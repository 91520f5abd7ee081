//! Collaborators around the chess rules engine
//!
//! The rules crate is pure and synchronous. This crate supplies everything it
//! leaves to its callers:
//!
//! - [`store`] - the [`GameStore`] persistence seam and its in-memory backend
//! - [`sqlite`] - the SQLite backend (`games` and `pieces` tables)
//! - [`service`] - seating, actor → color resolution and per-game serialization
//! - [`view`] - JSON presentation of games, pieces and move outcomes
//! - [`config`] - environment driven configuration

pub mod config;
pub mod error;
pub mod record;
pub mod service;
pub mod sqlite;
pub mod store;
pub mod view;

pub use config::{BackendConfig, ConfigError};
pub use error::{ServiceError, ServiceResult};
pub use record::{GameRecord, PieceRef, PlayerId};
pub use service::GameService;
pub use sqlite::SqliteStore;
pub use store::{GameStore, MemoryStore};
pub use view::{GameView, MoveResponse, PieceDetailView, PieceView};
