//! Game aggregate: pieces, status and the move entry point
//!
//! [`Game`] owns its pieces and is mutated only by [`Game::start`] and by a
//! successful [`Game::attempt_move`]. A rejected move leaves the game exactly
//! as it was; validation runs against a derived [`Board`] and the resulting
//! [`PlannedMove`] is committed only after every check has passed.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{Board, PlannedMove, RookRelocation};
use crate::constants::standard_layout;
use crate::error::{MoveRejection, MoveResult};
use crate::piece::Piece;
use crate::state::{self, AlreadyStarted, GameEnding, GameStatus, Transition};
use crate::types::{Color, GameId, PieceId, PieceKind, Square, Targets};
use crate::validator::MoveValidator;

/// A piece removed from play by a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPiece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
}

/// Everything a committed move changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub piece_id: PieceId,
    pub from: Square,
    pub to: Square,
    pub captured: Option<CapturedPiece>,
    pub castled: Option<RookRelocation>,
    pub status: GameStatus,
    pub in_check: Option<Color>,
    pub winner: Option<Color>,
    pub ending: Option<GameEnding>,
}

impl MoveReport {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_castle(&self) -> bool {
        self.castled.is_some()
    }
}

/// Plain-data form of a game, used to persist and restore it
///
/// Restoring does not re-derive anything: the status fields are taken as
/// given, so tests and stores can rebuild arbitrary positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub id: GameId,
    pub name: String,
    pub status: GameStatus,
    pub winner: Option<Color>,
    pub in_check: Option<Color>,
    pub ending: Option<GameEnding>,
    pub move_count: u32,
    pub pieces: Vec<Piece>,
}

/// A two-player chess game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    id: GameId,
    name: String,
    status: GameStatus,
    winner: Option<Color>,
    in_check: Option<Color>,
    ending: Option<GameEnding>,
    move_count: u32,
    pieces: Vec<Piece>,
}

impl Game {
    /// A pending game with the standard 32-piece layout
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_status(name.into(), GameStatus::Pending)
    }

    /// A game with the standard layout that is already White's turn
    pub(crate) fn started(name: impl Into<String>) -> Self {
        let game = Self::with_status(name.into(), GameStatus::WhiteTurn);
        info!("[GAME] Started game {} ({})", game.id, game.name);
        game
    }

    fn with_status(name: String, status: GameStatus) -> Self {
        Self {
            id: GameId::new(),
            name,
            status,
            winner: None,
            in_check: None,
            ending: None,
            move_count: 0,
            pieces: standard_layout(),
        }
    }

    pub fn restore(snapshot: GameSnapshot) -> Self {
        let GameSnapshot {
            id,
            name,
            status,
            winner,
            in_check,
            ending,
            move_count,
            pieces,
        } = snapshot;
        Self {
            id,
            name,
            status,
            winner,
            in_check,
            ending,
            move_count,
            pieces,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id,
            name: self.name.clone(),
            status: self.status,
            winner: self.winner,
            in_check: self.in_check,
            ending: self.ending,
            move_count: self.move_count,
            pieces: self.pieces.clone(),
        }
    }

    /// pending → white_turn
    pub fn start(&mut self) -> Result<(), AlreadyStarted> {
        self.status = state::start(self.status)?;
        info!("[GAME] Started game {} ({})", self.id, self.name);
        Ok(())
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Color whose king is currently attacked
    pub fn in_check(&self) -> Option<Color> {
        self.in_check
    }

    pub fn ending(&self) -> Option<GameEnding> {
        self.ending
    }

    /// Number of committed moves so far
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn side_to_move(&self) -> Option<Color> {
        self.status.to_move()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Active piece on `(x, y)`
    pub fn piece_at(&self, x: u8, y: u8) -> Option<&Piece> {
        let square = Square::new(x, y);
        self.pieces
            .iter()
            .find(|p| p.is_active() && p.square() == square)
    }

    /// Board view over the active pieces
    pub fn board(&self) -> Board {
        Board::from_pieces(&self.pieces)
    }

    /// Legal destinations of a piece, ignoring whose turn it is
    pub fn legal_targets(&self, id: PieceId) -> MoveResult<Targets> {
        let piece = self.piece(id).ok_or(MoveRejection::PieceNotFound { id })?;
        let board = self.board();
        Ok(MoveValidator::new(&board, piece.color).legal_targets(piece))
    }

    /// Piece kinds `color` has captured, ordered by piece id
    pub fn captured_by(&self, color: Color) -> Vec<PieceKind> {
        self.pieces
            .iter()
            .filter(|p| p.captured && p.color == color.opponent())
            .map(|p| p.kind)
            .collect()
    }

    /// Material difference from captures: positive means White is ahead
    pub fn material_balance(&self) -> i32 {
        let score = |color| -> i32 { self.captured_by(color).iter().map(|k| k.value()).sum() };
        score(Color::White) - score(Color::Black)
    }

    /// Validate and, if legal, commit a move
    ///
    /// # Arguments
    ///
    /// * `actor` - Color of the authenticated player making the request
    /// * `piece_id` - Piece to move
    /// * `x`, `y` - Destination coordinates, each expected in `[1, 8]`
    ///
    /// # Errors
    ///
    /// Returns a [`MoveRejection`] and leaves the game untouched when the
    /// move is illegal for any reason.
    pub fn attempt_move(&mut self, actor: Color, piece_id: PieceId, x: u8, y: u8) -> MoveResult<MoveReport> {
        let side = self.status.side_to_move()?;
        let piece = *self
            .piece(piece_id)
            .ok_or(MoveRejection::PieceNotFound { id: piece_id })?;

        let board = self.board();
        let plan = MoveValidator::new(&board, side).validate(actor, &piece, Square::new(x, y))?;

        let captured = self.commit(&plan);
        let transition = state::advance(&self.board(), side, self.move_count);
        self.apply_transition(transition);

        info!(
            "[GAME] Move #{}: {} {} {} -> {}{}{}",
            self.move_count,
            piece.color,
            piece.kind,
            plan.from,
            plan.to,
            if captured.is_some() { " (capture)" } else { "" },
            if plan.rook.is_some() { " (castle)" } else { "" },
        );

        Ok(MoveReport {
            piece_id,
            from: plan.from,
            to: plan.to,
            captured,
            castled: plan.rook,
            status: self.status,
            in_check: self.in_check,
            winner: self.winner,
            ending: self.ending,
        })
    }

    /// Apply a validated plan to the authoritative pieces
    fn commit(&mut self, plan: &PlannedMove) -> Option<CapturedPiece> {
        let mut captured = None;
        for piece in self.pieces.iter_mut() {
            if piece.id == plan.piece {
                piece.x = plan.to.x;
                piece.y = plan.to.y;
                piece.has_moved = true;
            } else if Some(piece.id) == plan.capture {
                piece.captured = true;
                piece.x = Square::OFF_BOARD.x;
                piece.y = Square::OFF_BOARD.y;
                captured = Some(CapturedPiece {
                    id: piece.id,
                    kind: piece.kind,
                    color: piece.color,
                });
            } else if let Some(rook) = plan.rook.filter(|r| r.rook == piece.id) {
                piece.x = rook.to.x;
                piece.y = rook.to.y;
                piece.has_moved = true;
            }
        }
        self.move_count += 1;
        if let Some(taken) = captured {
            debug!("[GAME] {} {} {} captured", taken.color, taken.kind, taken.id);
        }
        captured
    }

    fn apply_transition(&mut self, transition: Transition) {
        self.status = transition.status;
        self.in_check = transition.in_check;
        self.winner = transition.winner;
        self.ending = transition.ending;
    }
}
