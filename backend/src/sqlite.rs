//! SQLite backed [`GameStore`]
//!
//! # Schema
//!
//! - `games` - one row per game: name, state, seats, winner and timestamps
//! - `pieces` - one row per piece, keyed by `(game_id, piece_id)`. Captured
//!   pieces keep their row with `captured = 1` at `(0, 0)`.
//!
//! Every write runs in a single transaction so a game and its pieces are
//! never persisted out of step.
//!
//! # Concurrency
//!
//! Separate processes may open the same database file, so an in-process lock
//! cannot serialize them. Instead `games.revision` counts successful saves
//! and a save only updates the row if the revision it was loaded at is still
//! current. The losing writer gets [`ServiceError::Conflict`] and its whole
//! transaction is rolled back.

use async_trait::async_trait;
use chess_rules::{Color, Game, GameEnding, GameId, GameSnapshot, GameStatus, Piece, PieceId, PieceKind};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, Sqlite, Transaction};
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::config::BackendConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::record::{GameRecord, PieceRef};
use crate::store::GameStore;

const CREATE_GAMES: &str = "CREATE TABLE IF NOT EXISTS games (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    state TEXT NOT NULL DEFAULT 'pending',
    finished BOOLEAN NOT NULL DEFAULT 0,
    total_players INTEGER NOT NULL DEFAULT 0,
    white_player_id INTEGER,
    black_player_id INTEGER,
    winner TEXT,
    winner_id INTEGER,
    in_check TEXT,
    ending TEXT,
    move_count INTEGER NOT NULL DEFAULT 0,
    revision INTEGER NOT NULL DEFAULT 0,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
);";

const CREATE_PIECES: &str = "CREATE TABLE IF NOT EXISTS pieces (
    game_id TEXT NOT NULL REFERENCES games(id),
    piece_id INTEGER NOT NULL,
    type TEXT NOT NULL,
    x INTEGER NOT NULL,
    y INTEGER NOT NULL,
    color TEXT NOT NULL,
    captured BOOLEAN NOT NULL DEFAULT 0,
    has_moved BOOLEAN NOT NULL DEFAULT 0,
    icon TEXT NOT NULL,
    PRIMARY KEY (game_id, piece_id)
);";

const PIECE_COLUMNS: &str = "piece_id, type, x, y, color, captured, has_moved";

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database named by `config` and ensure the schema
    pub async fn connect(config: &BackendConfig) -> ServiceResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;
        info!("[STORE] Connected to {}", config.database_url);
        Self::with_pool(pool).await
    }

    /// A private in-memory database
    ///
    /// Limited to one connection: every connection to `sqlite::memory:`
    /// opens a separate empty database.
    pub async fn in_memory() -> ServiceResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::with_pool(pool).await
    }

    pub async fn with_pool(pool: SqlitePool) -> ServiceResult<Self> {
        sqlx::query(CREATE_GAMES).execute(&pool).await?;
        sqlx::query(CREATE_PIECES).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Write the `games` row
    ///
    /// With `expected` set this is a conditional update that only matches
    /// the row while it is still at that revision. Returns the number of
    /// rows written.
    async fn write_game_row(
        tx: &mut Transaction<'_, Sqlite>,
        record: &GameRecord,
        revision: u64,
        expected: Option<u64>,
    ) -> ServiceResult<u64> {
        let sql = match expected {
            None => {
                "INSERT INTO games (name, state, finished, total_players, white_player_id, black_player_id,
                    winner, winner_id, in_check, ending, move_count, created_at, updated_at, id, revision)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)"
            }
            Some(_) => {
                "UPDATE games SET name = $1, state = $2, finished = $3, total_players = $4,
                    white_player_id = $5, black_player_id = $6, winner = $7, winner_id = $8,
                    in_check = $9, ending = $10, move_count = $11, created_at = $12, updated_at = $13,
                    revision = $15
                 WHERE id = $14 AND revision = $16"
            }
        };
        let game = &record.game;
        let mut query = sqlx::query(sql)
            .bind(game.name())
            .bind(game.status().as_str())
            .bind(game.status().is_finished())
            .bind(i64::from(record.total_players()))
            .bind(record.white_player)
            .bind(record.black_player)
            .bind(game.winner().map(|c| c.as_str()))
            .bind(record.winner_id())
            .bind(game.in_check().map(|c| c.as_str()))
            .bind(game.ending().map(|e| e.as_str()))
            .bind(i64::from(game.move_count()))
            .bind(record.created_at)
            .bind(record.updated_at)
            .bind(game.id().to_string())
            .bind(revision_value(revision)?);
        if let Some(expected) = expected {
            query = query.bind(revision_value(expected)?);
        }
        let result = query.execute(&mut **tx).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl GameStore for SqliteStore {
    async fn insert(&self, record: &GameRecord) -> ServiceResult<()> {
        let mut tx = self.pool.begin().await?;
        Self::write_game_row(&mut tx, record, record.revision, None).await?;

        let game_id = record.id().to_string();
        for piece in record.game.pieces() {
            sqlx::query(
                "INSERT INTO pieces (game_id, piece_id, type, x, y, color, captured, has_moved, icon)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .bind(&game_id)
            .bind(i64::from(piece.id.0))
            .bind(piece.kind.as_str())
            .bind(i64::from(piece.x))
            .bind(i64::from(piece.y))
            .bind(piece.color.as_str())
            .bind(piece.captured)
            .bind(piece.has_moved)
            .bind(piece.icon())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!("[STORE] Inserted game {} with {} pieces", game_id, record.game.pieces().len());
        Ok(())
    }

    async fn load(&self, id: GameId) -> ServiceResult<Option<GameRecord>> {
        let game_id = id.to_string();
        let Some(row) = sqlx::query("SELECT * FROM games WHERE id = $1")
            .bind(&game_id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let pieces = sqlx::query(&format!(
            "SELECT {PIECE_COLUMNS} FROM pieces WHERE game_id = $1 ORDER BY piece_id"
        ))
        .bind(&game_id)
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(decode_piece)
        .collect::<ServiceResult<Vec<Piece>>>()?;

        let snapshot = GameSnapshot {
            id,
            name: row.try_get("name")?,
            status: parse_column::<GameStatus>(&row, "state")?,
            winner: parse_optional::<Color>(&row, "winner")?,
            in_check: parse_optional::<Color>(&row, "in_check")?,
            ending: parse_optional::<GameEnding>(&row, "ending")?,
            move_count: int_column(&row, "move_count")?,
            pieces,
        };

        Ok(Some(GameRecord {
            game: Game::restore(snapshot),
            white_player: row.try_get("white_player_id")?,
            black_player: row.try_get("black_player_id")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
            revision: int_column(&row, "revision")?,
        }))
    }

    async fn save(&self, record: &mut GameRecord) -> ServiceResult<()> {
        let game_id = record.id().to_string();
        let next = record.revision + 1;

        let mut tx = self.pool.begin().await?;
        if Self::write_game_row(&mut tx, record, next, Some(record.revision)).await? == 0 {
            let exists = sqlx::query("SELECT 1 FROM games WHERE id = $1")
                .bind(&game_id)
                .fetch_optional(&mut *tx)
                .await?
                .is_some();
            return Err(if exists {
                warn!("[STORE] Game {} changed since revision {}", game_id, record.revision);
                ServiceError::Conflict {
                    game: record.id(),
                    revision: record.revision,
                }
            } else {
                ServiceError::GameNotFound(record.id())
            });
        }

        for piece in record.game.pieces() {
            sqlx::query(
                "UPDATE pieces SET x = $1, y = $2, captured = $3, has_moved = $4
                 WHERE game_id = $5 AND piece_id = $6",
            )
            .bind(i64::from(piece.x))
            .bind(i64::from(piece.y))
            .bind(piece.captured)
            .bind(piece.has_moved)
            .bind(&game_id)
            .bind(i64::from(piece.id.0))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        record.revision = next;
        debug!(
            "[STORE] Saved game {} at move {} (revision {})",
            game_id,
            record.game.move_count(),
            next
        );
        Ok(())
    }

    async fn find_piece(&self, piece: PieceRef) -> ServiceResult<Option<Piece>> {
        sqlx::query(&format!(
            "SELECT {PIECE_COLUMNS} FROM pieces WHERE game_id = $1 AND piece_id = $2"
        ))
        .bind(piece.game.to_string())
        .bind(i64::from(piece.piece.0))
        .fetch_optional(&self.pool)
        .await?
        .as_ref()
        .map(decode_piece)
        .transpose()
    }
}

fn revision_value(revision: u64) -> ServiceResult<i64> {
    i64::try_from(revision).map_err(|_| ServiceError::corrupt(format!("revision out of range: {revision}")))
}

fn decode_piece(row: &SqliteRow) -> ServiceResult<Piece> {
    Ok(Piece {
        id: PieceId(int_column(row, "piece_id")?),
        kind: parse_column::<PieceKind>(row, "type")?,
        color: parse_column::<Color>(row, "color")?,
        x: int_column(row, "x")?,
        y: int_column(row, "y")?,
        captured: row.try_get("captured")?,
        has_moved: row.try_get("has_moved")?,
    })
}

/// Integer column narrowed to the width the rules engine uses
fn int_column<T: TryFrom<i64>>(row: &SqliteRow, column: &str) -> ServiceResult<T> {
    let value: i64 = row.try_get(column)?;
    T::try_from(value).map_err(|_| ServiceError::corrupt(format!("{column} out of range: {value}")))
}

fn parse_column<T>(row: &SqliteRow, column: &str) -> ServiceResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value: String = row.try_get(column)?;
    value
        .parse()
        .map_err(|e: T::Err| ServiceError::corrupt(format!("{column}: {e}")))
}

fn parse_optional<T>(row: &SqliteRow, column: &str) -> ServiceResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value: Option<String> = row.try_get(column)?;
    value
        .map(|v| v.parse().map_err(|e: T::Err| ServiceError::corrupt(format!("{column}: {e}"))))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_rules::start_game;

    #[tokio::test]
    async fn test_round_trip_after_a_move() {
        let store = SqliteStore::in_memory().await.unwrap();
        let mut record = GameRecord::new(start_game("sqlite"), 10);
        record.black_player = Some(20);
        store.insert(&record).await.unwrap();

        let pawn = record.game.piece_at(5, 2).unwrap().id;
        record.game.attempt_move(Color::White, pawn, 5, 4).unwrap();
        store.save(&mut record).await.unwrap();
        assert_eq!(record.revision, 1);

        let loaded = store.load(record.id()).await.unwrap().unwrap();
        assert_eq!(loaded.game, record.game);
        assert_eq!(loaded.white_player, Some(10));
        assert_eq!(loaded.black_player, Some(20));
        assert_eq!(loaded.created_at, record.created_at);
        assert_eq!(loaded.revision, 1);
    }

    #[tokio::test]
    async fn test_stale_save_rolls_back() {
        //! The losing writer changes neither the game row nor any piece
        let store = SqliteStore::in_memory().await.unwrap();
        let mut record = GameRecord::new(start_game("sqlite"), 10);
        record.black_player = Some(20);
        store.insert(&record).await.unwrap();

        let mut first = store.load(record.id()).await.unwrap().unwrap();
        let mut second = first.clone();
        let e2 = first.game.piece_at(5, 2).unwrap().id;
        let d2 = second.game.piece_at(4, 2).unwrap().id;
        first.game.attempt_move(Color::White, e2, 5, 4).unwrap();
        second.game.attempt_move(Color::White, d2, 4, 4).unwrap();

        store.save(&mut first).await.unwrap();
        assert!(matches!(
            store.save(&mut second).await,
            Err(ServiceError::Conflict { revision: 0, .. })
        ));

        let loaded = store.load(record.id()).await.unwrap().unwrap();
        assert_eq!(loaded.game, first.game);
        assert_eq!(loaded.game.piece(d2).map(|p| (p.x, p.y)), Some((4, 2)));
        assert_eq!(loaded.revision, 1);
    }

    #[tokio::test]
    async fn test_unknown_game() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert!(store.load(GameId::new()).await.unwrap().is_none());

        let mut record = GameRecord::new(Game::new("never inserted"), 1);
        assert!(matches!(
            store.save(&mut record).await,
            Err(ServiceError::GameNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_find_piece_and_corrupt_rows() {
        let store = SqliteStore::in_memory().await.unwrap();
        let record = GameRecord::new(Game::new("pieces"), 1);
        store.insert(&record).await.unwrap();

        let king = store
            .find_piece(PieceRef {
                game: record.id(),
                piece: PieceId(5),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!((king.kind, king.color, king.x, king.y), (PieceKind::King, Color::White, 5, 1));

        sqlx::query("UPDATE pieces SET type = 'dragon' WHERE piece_id = 5")
            .execute(&store.pool)
            .await
            .unwrap();
        assert!(matches!(
            store.load(record.id()).await,
            Err(ServiceError::Corrupt { .. })
        ));
    }
}
