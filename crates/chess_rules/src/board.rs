//! Board view used for move validation queries
//!
//! The board is never stored. It is a read-only projection of the active
//! subset of a game's pieces, rebuilt whenever a query needs it. Simulating
//! a move produces a fresh scratch board via [`Board::apply`] and leaves the
//! source untouched.

use serde::{Deserialize, Serialize};

use crate::piece::Piece;
use crate::types::{Color, PieceId, PieceKind, Square, MAX_COORD};

const SIDE: usize = MAX_COORD as usize;

/// The rook half of a castling move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RookRelocation {
    pub rook: PieceId,
    pub from: Square,
    pub to: Square,
}

/// A validated move with all of its side effects spelled out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMove {
    pub piece: PieceId,
    pub from: Square,
    pub to: Square,
    /// Opposing piece removed by this move
    pub capture: Option<PieceId>,
    /// Rook moved alongside the king when castling
    pub rook: Option<RookRelocation>,
}

/// Occupancy snapshot of the 8×8 board
#[derive(Debug, Clone)]
pub struct Board {
    pieces: Vec<Piece>,
    grid: [[Option<usize>; SIDE]; SIDE],
}

#[inline]
fn cell(square: Square) -> Option<(usize, usize)> {
    square
        .is_on_board()
        .then(|| (square.x as usize - 1, square.y as usize - 1))
}

impl Board {
    /// Build a board from any collection of pieces, keeping only active ones
    pub fn from_pieces<'a>(pieces: impl IntoIterator<Item = &'a Piece>) -> Self {
        Self::from_owned(pieces.into_iter().filter(|p| p.is_active()).copied().collect())
    }

    fn from_owned(pieces: Vec<Piece>) -> Self {
        let mut grid = [[None; SIDE]; SIDE];
        for (index, piece) in pieces.iter().enumerate() {
            if let Some((col, row)) = cell(piece.square()) {
                grid[col][row] = Some(index);
            }
        }
        Self { pieces, grid }
    }

    /// Active piece standing on `square`, if any
    pub fn occupant_at(&self, square: Square) -> Option<&Piece> {
        let (col, row) = cell(square)?;
        self.grid[col][row].map(|index| &self.pieces[index])
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.occupant_at(square).is_some()
    }

    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.occupant_at(square).map(|p| p.color)
    }

    /// True when every square strictly between `from` and `to` is empty
    ///
    /// Only meaningful for straight-line pairs (same rank, file or diagonal).
    /// Callers must not pass knight-shaped or otherwise unaligned pairs.
    pub fn path_clear(&self, from: Square, to: Square) -> bool {
        debug_assert!(
            from.is_aligned_with(to),
            "path_clear called with unaligned squares {from} -> {to}"
        );
        let (dx, dy) = from.delta(to);
        let step = (dx.signum(), dy.signum());

        let mut current = from;
        while let Some(next) = current.offset(step.0, step.1) {
            if next == to {
                return true;
            }
            if self.is_occupied(next) {
                return false;
            }
            current = next;
        }
        // Ran off the board without meeting `to`
        false
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.color == color)
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// The active king of `color`
    pub fn king_of(&self, color: Color) -> Option<&Piece> {
        self.pieces_of(color).find(|p| p.kind == PieceKind::King)
    }

    /// Scratch copy of this board with `plan` played on it
    ///
    /// The moving piece is relocated, any captured piece is dropped from the
    /// active set and a castling rook is moved alongside the king.
    pub fn apply(&self, plan: &PlannedMove) -> Board {
        let pieces = self
            .pieces
            .iter()
            .filter(|p| Some(p.id) != plan.capture)
            .map(|p| {
                let mut piece = *p;
                if piece.id == plan.piece {
                    piece.x = plan.to.x;
                    piece.y = plan.to.y;
                    piece.has_moved = true;
                } else if let Some(rook) = plan.rook.filter(|r| r.rook == piece.id) {
                    piece.x = rook.to.x;
                    piece.y = rook.to.y;
                    piece.has_moved = true;
                }
                piece
            })
            .collect();
        Board::from_owned(pieces)
    }
}
