//! Game service
//!
//! Wraps a [`GameStore`] with the operations players perform: creating a
//! game, taking the second seat, moving and looking at the board.
//!
//! # Serialization
//!
//! The rules engine assumes exclusive access to a game for the duration of a
//! move. Every mutating operation holds that game's async mutex across the
//! whole load → validate → save sequence, so two moves on the same game can
//! never interleave. Different games proceed independently.
//!
//! A game's mutex only lives while someone holds or waits on it, so the lock
//! table stays as small as the number of games currently being worked on.
//! Other processes sharing the same store are fenced off by the store's
//! revision check instead, which surfaces as [`ServiceError::Conflict`].

use chess_rules::{Game, GameId, MoveReport, Piece, PieceId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info};

use crate::error::{ServiceError, ServiceResult};
use crate::record::{GameRecord, PlayerId};
use crate::store::GameStore;

type LockTable = Mutex<HashMap<GameId, Arc<tokio::sync::Mutex<()>>>>;

pub struct GameService<S> {
    store: S,
    locks: LockTable,
}

/// Exclusive access to one game
///
/// Dropping the guard releases the game and forgets its mutex once nobody
/// else holds or waits on it.
struct GameGuard<'a> {
    locks: &'a LockTable,
    id: GameId,
    held: Option<OwnedMutexGuard<()>>,
}

impl Drop for GameGuard<'_> {
    fn drop(&mut self) {
        self.held = None;
        let mut locks = self.locks.lock();
        if locks.get(&self.id).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(&self.id);
        }
    }
}

impl<S: GameStore> GameService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn lock_for(&self, id: GameId) -> Arc<tokio::sync::Mutex<()>> {
        self.locks.lock().entry(id).or_default().clone()
    }

    async fn acquire(&self, id: GameId) -> GameGuard<'_> {
        let mut guard = GameGuard {
            locks: &self.locks,
            id,
            held: None,
        };
        // Declared after `guard` so a cancelled wait releases its clone first
        let waiting = self.lock_for(id).lock_owned();
        guard.held = Some(waiting.await);
        guard
    }

    /// Number of games whose mutex is currently held or awaited
    pub(crate) fn tracked_games(&self) -> usize {
        self.locks.lock().len()
    }

    async fn load(&self, id: GameId) -> ServiceResult<GameRecord> {
        self.store
            .load(id)
            .await?
            .ok_or(ServiceError::GameNotFound(id))
    }

    /// Create a pending game with `white_player` seated as White
    pub async fn create_game(&self, name: &str, white_player: PlayerId) -> ServiceResult<GameRecord> {
        let record = GameRecord::new(Game::new(name), white_player);
        self.store.insert(&record).await?;
        info!("[SERVICE] Player {} created game {} ({})", white_player, record.id(), name);
        Ok(record)
    }

    /// Seat `black_player` as Black and start the game
    ///
    /// # Errors
    ///
    /// * [`ServiceError::GameFull`] - the black seat is taken
    /// * [`ServiceError::AlreadySeated`] - the player already plays White here
    /// * [`ServiceError::Conflict`] - another process wrote the game meanwhile
    pub async fn join_game(&self, id: GameId, black_player: PlayerId) -> ServiceResult<GameRecord> {
        let _guard = self.acquire(id).await;

        let mut record = self.load(id).await?;
        if record.black_player.is_some() {
            return Err(ServiceError::GameFull(id));
        }
        if record.white_player == Some(black_player) {
            return Err(ServiceError::AlreadySeated {
                game: id,
                player: black_player,
            });
        }

        record
            .game
            .start()
            .map_err(|e| ServiceError::corrupt(format!("game {id} has an open seat but {e}")))?;
        record.black_player = Some(black_player);
        record.touch();
        self.store.save(&mut record).await?;

        info!("[SERVICE] Player {} joined game {} as black", black_player, id);
        Ok(record)
    }

    /// Attempt a move on behalf of `player`
    ///
    /// The acting color is the seat `player` holds. The updated record is
    /// persisted only when the rules engine accepts the move.
    ///
    /// # Errors
    ///
    /// * [`ServiceError::NotAPlayer`] - `player` holds neither seat
    /// * [`ServiceError::Rejected`] - the move is illegal; nothing was written
    /// * [`ServiceError::Conflict`] - another process wrote the game meanwhile
    pub async fn make_move(
        &self,
        id: GameId,
        player: PlayerId,
        piece_id: PieceId,
        x: u8,
        y: u8,
    ) -> ServiceResult<MoveReport> {
        let _guard = self.acquire(id).await;

        let mut record = self.load(id).await?;
        let color = record
            .seat_of(player)
            .ok_or(ServiceError::NotAPlayer { game: id, player })?;

        let report = record
            .game
            .attempt_move(color, piece_id, x, y)
            .inspect_err(|rejection| {
                debug!("[SERVICE] Game {}: player {} move rejected ({})", id, player, rejection.code());
            })?;

        record.touch();
        self.store.save(&mut record).await?;

        info!(
            "[SERVICE] Game {}: player {} moved {} to {} | status {}",
            id, player, piece_id, report.to, report.status
        );
        Ok(report)
    }

    pub async fn show_game(&self, id: GameId) -> ServiceResult<GameRecord> {
        self.load(id).await
    }

    /// A piece together with the game it belongs to
    ///
    /// Both come from a single load, so the piece is always the one in the
    /// returned record.
    pub async fn show_piece(&self, id: GameId, piece_id: PieceId) -> ServiceResult<(Piece, GameRecord)> {
        let record = self.load(id).await?;
        let piece = record
            .game
            .piece(piece_id)
            .copied()
            .ok_or(ServiceError::PieceNotFound {
                game: id,
                piece: piece_id,
            })?;
        Ok((piece, record))
    }
}
