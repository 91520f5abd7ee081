//! Attack detection and square checking
//!
//! Provides the attack sets used by check detection and by castling's
//! "squares not attacked" condition.
//!
//! ## Algorithm
//!
//! To check if a square is attacked, we iterate through all active pieces of
//! the attacking color and test whether the square is in that piece's attack
//! set. The board holds at most 32 pieces, so no precomputed tables are needed.

use super::{pawn, sliding};
use crate::board::Board;
use crate::constants::{BISHOP_DIRS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRS};
use crate::piece::Piece;
use crate::types::{Color, PieceKind, Square, Targets};

/// Append every square `piece` attacks
///
/// Attack sets ignore who stands on the attacked square. That makes a
/// defended piece show up as attacked, which is what the king needs when it
/// considers capturing it.
pub fn generate_attacks(board: &Board, piece: &Piece, targets: &mut Targets) {
    let from = piece.square();
    match piece.kind {
        PieceKind::Pawn => pawn::generate_pawn_attacks(from, piece.color, targets),
        PieceKind::Knight => offsets(from, &KNIGHT_OFFSETS, targets),
        PieceKind::Bishop => sliding::generate_sliding_attacks(board, from, &BISHOP_DIRS, targets),
        PieceKind::Rook => sliding::generate_sliding_attacks(board, from, &ROOK_DIRS, targets),
        PieceKind::Queen => {
            sliding::generate_sliding_attacks(board, from, &sliding::rays(true, true), targets)
        }
        PieceKind::King => offsets(from, &KING_OFFSETS, targets),
    }
}

fn offsets(from: Square, steps: &[(i8, i8)], targets: &mut Targets) {
    targets.extend(steps.iter().filter_map(|&(dx, dy)| from.offset(dx, dy)));
}

/// Check if a square is under attack by pieces of the specified color
///
/// # Arguments
///
/// * `board` - Current occupancy
/// * `square` - Square to test
/// * `by_color` - Color of the pieces that might attack it
///
/// # Examples
///
/// ```rust,ignore
/// // Is f1 covered by any black piece?
/// let attacked = is_square_attacked(&board, Square::new(6, 1), Color::Black);
/// ```
pub fn is_square_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    board
        .pieces_of(by_color)
        .any(|piece| piece.attacked_squares(board).contains(&square))
}
