//! Queen move generation
//!
//! The queen combines the rook and bishop rays.

use super::sliding;
use crate::board::Board;
use crate::types::{Color, Square, Targets};

/// Generate queen targets: union of orthogonal and diagonal rays
pub fn generate_queen_targets(board: &Board, from: Square, color: Color, targets: &mut Targets) {
    sliding::generate_sliding_targets(board, from, color, &sliding::rays(true, true), targets);
}
