//! JSON presentation
//!
//! Views are flat, serde-serializable shapes for clients. Status strings are
//! the snake_case names (`pending`, `white_turn`, `black_turn`, `finished`).

use chess_rules::{
    Color, GameEnding, GameId, GameStatus, MoveRejection, MoveReport, MoveValidator, Piece, PieceKind, Square,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::record::{GameRecord, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceView {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub color: Color,
    pub x: u8,
    pub y: u8,
    pub captured: bool,
    pub has_moved: bool,
    pub icon: &'static str,
}

impl From<&Piece> for PieceView {
    fn from(piece: &Piece) -> Self {
        Self {
            id: piece.id.0,
            kind: piece.kind,
            color: piece.color,
            x: piece.x,
            y: piece.y,
            captured: piece.captured,
            has_moved: piece.has_moved,
            icon: piece.icon(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameView {
    pub id: GameId,
    pub name: String,
    pub state: GameStatus,
    pub finished: bool,
    pub total_players: u8,
    pub white_player_id: Option<PlayerId>,
    pub black_player_id: Option<PlayerId>,
    pub winner: Option<Color>,
    pub winner_id: Option<PlayerId>,
    pub in_check: Option<Color>,
    pub ending: Option<GameEnding>,
    pub move_count: u32,
    /// Positive when White is ahead on captured material
    pub material_balance: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pieces: Vec<PieceView>,
}

impl From<&GameRecord> for GameView {
    fn from(record: &GameRecord) -> Self {
        let game = &record.game;
        Self {
            id: game.id(),
            name: game.name().to_string(),
            state: game.status(),
            finished: game.status().is_finished(),
            total_players: record.total_players(),
            white_player_id: record.white_player,
            black_player_id: record.black_player,
            winner: game.winner(),
            winner_id: record.winner_id(),
            in_check: game.in_check(),
            ending: game.ending(),
            move_count: game.move_count(),
            material_balance: game.material_balance(),
            created_at: record.created_at,
            updated_at: record.updated_at,
            pieces: game.pieces().iter().map(PieceView::from).collect(),
        }
    }
}

/// One piece with the rest of its game, and where it may move
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceDetailView {
    pub game_id: GameId,
    pub piece: PieceView,
    pub legal_targets: Vec<Square>,
    pub pieces: Vec<PieceView>,
}

impl PieceDetailView {
    /// `piece` is expected to come from `record.game`; its targets are worked
    /// out against that game's board. A captured piece has none.
    pub fn new(piece: &Piece, record: &GameRecord) -> Self {
        let legal_targets = if piece.is_active() {
            let board = record.game.board();
            MoveValidator::new(&board, piece.color)
                .legal_targets(piece)
                .into_iter()
                .collect()
        } else {
            Vec::new()
        };
        Self {
            game_id: record.id(),
            piece: PieceView::from(piece),
            legal_targets,
            pieces: record.game.pieces().iter().map(PieceView::from).collect(),
        }
    }
}

/// Outcome of a move request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveResponse {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Square>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Square>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured: Option<PieceKind>,
    pub castled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GameStatus>,
    pub in_check: Option<Color>,
    pub winner: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending: Option<GameEnding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl MoveResponse {
    pub fn accepted(report: &MoveReport) -> Self {
        Self {
            accepted: true,
            from: Some(report.from),
            to: Some(report.to),
            captured: report.captured.map(|c| c.kind),
            castled: report.is_castle(),
            status: Some(report.status),
            in_check: report.in_check,
            winner: report.winner,
            ending: report.ending,
            reason: None,
            code: None,
        }
    }

    pub fn rejected(rejection: &MoveRejection) -> Self {
        Self {
            accepted: false,
            from: None,
            to: None,
            captured: None,
            castled: false,
            status: None,
            in_check: None,
            winner: None,
            ending: None,
            reason: Some(rejection.to_string()),
            code: Some(rejection.code()),
        }
    }
}
