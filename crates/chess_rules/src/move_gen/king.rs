//! King move generation
//!
//! ## King Movement Rules
//!
//! - Kings move one square in any direction (up to 8 destinations)
//! - Cannot move to squares occupied by own pieces
//! - Castling is an additional candidate: the king moves two squares toward
//!   an unmoved rook of its color along the home rank
//!
//! ## Note on Castling
//!
//! Only the static preconditions are checked here (king and rook unmoved and
//! on their home squares, nothing between them). Whether the king is in check
//! or crosses an attacked square needs attack detection, so the validator
//! enforces those conditions.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::{KING_HOME_FILE, KING_OFFSETS};
use crate::piece::Piece;
use crate::types::{Color, PieceKind, Square, Targets};

/// Which rook the king castles with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastlingSide {
    /// Toward the h-file rook
    King,
    /// Toward the a-file rook
    Queen,
}

impl CastlingSide {
    /// Castling side implied by a king move, if it has the castling shape
    ///
    /// The shape is: king on its home square moving exactly two files along
    /// the home rank.
    pub fn from_move(king: &Piece, to: Square) -> Option<CastlingSide> {
        let home = Square::new(KING_HOME_FILE, king.color.home_rank());
        if king.kind != PieceKind::King || king.square() != home || to.y != home.y {
            return None;
        }
        match to.x as i8 - home.x as i8 {
            2 => Some(CastlingSide::King),
            -2 => Some(CastlingSide::Queen),
            _ => None,
        }
    }

    /// Direction of travel along the rank
    pub fn step(self) -> i8 {
        match self {
            CastlingSide::King => 1,
            CastlingSide::Queen => -1,
        }
    }
}

/// `(rook_from, rook_to)` for a castling move of `color`
pub fn castling_rook_squares(color: Color, side: CastlingSide) -> (Square, Square) {
    let rank = color.home_rank();
    match side {
        CastlingSide::King => (Square::new(8, rank), Square::new(6, rank)),
        CastlingSide::Queen => (Square::new(1, rank), Square::new(4, rank)),
    }
}

/// Destination of the king when castling to `side`
pub fn castling_king_square(color: Color, side: CastlingSide) -> Square {
    let x = (KING_HOME_FILE as i8 + 2 * side.step()) as u8;
    Square::new(x, color.home_rank())
}

/// Generate the plain one-square king targets
pub fn generate_king_targets(board: &Board, from: Square, color: Color, targets: &mut Targets) {
    for (dx, dy) in KING_OFFSETS {
        if let Some(to) = from.offset(dx, dy) {
            if board.color_at(to) != Some(color) {
                targets.insert(to);
            }
        }
    }
}

/// The unmoved rook `king` could castle with on `side`, if any
pub fn castling_rook<'a>(board: &'a Board, king: &Piece, side: CastlingSide) -> Option<&'a Piece> {
    let (rook_from, _) = castling_rook_squares(king.color, side);
    board
        .occupant_at(rook_from)
        .filter(|p| p.kind == PieceKind::Rook && p.color == king.color && !p.has_moved)
}

/// Add castling destinations whose static preconditions hold
pub fn generate_castling_targets(board: &Board, king: &Piece, targets: &mut Targets) {
    let home = Square::new(KING_HOME_FILE, king.color.home_rank());
    if king.has_moved || king.square() != home {
        return;
    }

    for side in [CastlingSide::King, CastlingSide::Queen] {
        if let Some(rook) = castling_rook(board, king, side) {
            if board.path_clear(home, rook.square()) {
                targets.insert(castling_king_square(king.color, side));
            }
        }
    }
}
