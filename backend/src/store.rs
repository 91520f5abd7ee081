//! Persistence seam
//!
//! [`GameStore`] is what [`GameService`](crate::service::GameService) talks
//! to. Stores are plain key/value persistence: they never validate moves and
//! they are only ever handed records the rules engine has already accepted.

use async_trait::async_trait;
use chess_rules::{GameId, Piece};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

use crate::error::{ServiceError, ServiceResult};
use crate::record::{GameRecord, PieceRef};

#[async_trait]
pub trait GameStore: Send + Sync {
    /// Persist a new record
    async fn insert(&self, record: &GameRecord) -> ServiceResult<()>;

    async fn load(&self, id: GameId) -> ServiceResult<Option<GameRecord>>;

    /// Overwrite an existing record and bump its revision
    ///
    /// The write only lands if the stored revision still equals
    /// `record.revision`, so two writers that loaded the same revision can
    /// never both succeed.
    ///
    /// # Errors
    ///
    /// * [`ServiceError::GameNotFound`] - the record was never inserted
    /// * [`ServiceError::Conflict`] - the stored record moved past `record.revision`
    async fn save(&self, record: &mut GameRecord) -> ServiceResult<()>;

    async fn find_piece(&self, piece: PieceRef) -> ServiceResult<Option<Piece>>;
}

/// Records kept in process memory
#[derive(Default)]
pub struct MemoryStore {
    games: RwLock<HashMap<GameId, GameRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.read().is_empty()
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn insert(&self, record: &GameRecord) -> ServiceResult<()> {
        debug!("[STORE] Inserting game {}", record.id());
        self.games.write().insert(record.id(), record.clone());
        Ok(())
    }

    async fn load(&self, id: GameId) -> ServiceResult<Option<GameRecord>> {
        Ok(self.games.read().get(&id).cloned())
    }

    async fn save(&self, record: &mut GameRecord) -> ServiceResult<()> {
        let mut games = self.games.write();
        let slot = games
            .get_mut(&record.id())
            .ok_or(ServiceError::GameNotFound(record.id()))?;
        if slot.revision != record.revision {
            return Err(ServiceError::Conflict {
                game: record.id(),
                revision: record.revision,
            });
        }
        record.revision += 1;
        *slot = record.clone();
        debug!("[STORE] Saved game {} at move {}", record.id(), record.game.move_count());
        Ok(())
    }

    async fn find_piece(&self, piece: PieceRef) -> ServiceResult<Option<Piece>> {
        Ok(self
            .games
            .read()
            .get(&piece.game)
            .and_then(|record| record.game.piece(piece.piece).copied()))
    }
}
