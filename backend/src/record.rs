//! Persisted game records
//!
//! A [`GameRecord`] is the rules engine's [`Game`] plus what only the
//! collaborators care about: who sits in which seat, and when the row was
//! created and last written.

use chess_rules::{Color, Game, GameId, PieceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of an authenticated user
pub type PlayerId = i64;

/// A piece addressed within its game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceRef {
    pub game: GameId,
    pub piece: PieceId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game: Game,
    pub white_player: Option<PlayerId>,
    pub black_player: Option<PlayerId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Number of successful saves; a save only lands on the revision it was loaded at
    pub revision: u64,
}

impl GameRecord {
    /// A fresh record with `white_player` in the white seat
    pub fn new(game: Game, white_player: PlayerId) -> Self {
        let now = Utc::now();
        Self {
            game,
            white_player: Some(white_player),
            black_player: None,
            created_at: now,
            updated_at: now,
            revision: 0,
        }
    }

    pub fn id(&self) -> GameId {
        self.game.id()
    }

    /// Number of occupied seats
    pub fn total_players(&self) -> u8 {
        u8::from(self.white_player.is_some()) + u8::from(self.black_player.is_some())
    }

    /// Color `player` plays, if seated
    pub fn seat_of(&self, player: PlayerId) -> Option<Color> {
        if self.white_player == Some(player) {
            Some(Color::White)
        } else if self.black_player == Some(player) {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn player_of(&self, color: Color) -> Option<PlayerId> {
        match color {
            Color::White => self.white_player,
            Color::Black => self.black_player,
        }
    }

    /// Player id of the winner, once the game is decided
    pub fn winner_id(&self) -> Option<PlayerId> {
        self.game.winner().and_then(|color| self.player_of(color))
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
