//! Rook move generation
//!
//! Handles rook-specific move generation. Rooks are sliding pieces that move
//! horizontally and vertically until blocked by another piece or the board edge.
//!
//! ## Rook Movement Rules
//!
//! - Rooks move along ranks or files
//! - Cannot jump over pieces
//! - Cannot move to squares occupied by own pieces
//! - Can capture opponent pieces on destination squares

use super::sliding;
use crate::board::Board;
use crate::constants::ROOK_DIRS;
use crate::types::{Color, Square, Targets};

/// Generate rook targets from a given square
///
/// Delegates to the common sliding piece logic with the four orthogonal rays.
pub fn generate_rook_targets(board: &Board, from: Square, color: Color, targets: &mut Targets) {
    sliding::generate_sliding_targets(board, from, color, &ROOK_DIRS, targets);
}
