//! Knight move generation
//!
//! Knights move in an L-shape: two squares in one direction, then one square
//! perpendicular. They jump over pieces, so only the destination matters.

use crate::board::Board;
use crate::constants::KNIGHT_OFFSETS;
use crate::types::{Color, Square, Targets};

/// Generate knight targets from a given square
///
/// Destinations must be on the board and either empty or hold an opponent piece.
pub fn generate_knight_targets(board: &Board, from: Square, color: Color, targets: &mut Targets) {
    for (dx, dy) in KNIGHT_OFFSETS {
        if let Some(to) = from.offset(dx, dy) {
            if board.color_at(to) != Some(color) {
                targets.insert(to);
            }
        }
    }
}
