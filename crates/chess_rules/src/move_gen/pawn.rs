//! Pawn move generation
//!
//! ## Pawn Movement Rules
//!
//! - **Forward push**: one square toward the opponent, onto an empty square
//! - **Double push**: from the starting rank (2 for White, 7 for Black) when
//!   both the intermediate and destination squares are empty
//! - **Captures**: one square diagonally forward, only onto an opponent piece
//!
//! En passant and promotion are not part of this rule set; a pawn on the last
//! rank has no forward targets.

use crate::board::Board;
use crate::types::{Color, Square, Targets};

/// Generate pawn targets from a given square
///
/// # Arguments
///
/// * `board` - Current occupancy
/// * `from` - Square the pawn stands on
/// * `color` - Color of the pawn, which fixes its direction of travel
/// * `targets` - Output set
pub fn generate_pawn_targets(board: &Board, from: Square, color: Color, targets: &mut Targets) {
    let dir = color.forward();

    if let Some(one) = from.offset(0, dir) {
        if !board.is_occupied(one) {
            targets.insert(one);

            if from.y == color.pawn_rank() {
                if let Some(two) = from.offset(0, 2 * dir) {
                    if !board.is_occupied(two) {
                        targets.insert(two);
                    }
                }
            }
        }
    }

    for side in [-1, 1] {
        if let Some(diag) = from.offset(side, dir) {
            if board.color_at(diag) == Some(color.opponent()) {
                targets.insert(diag);
            }
        }
    }
}

/// Diagonal squares a pawn attacks, occupied or not
pub fn generate_pawn_attacks(from: Square, color: Color, targets: &mut Targets) {
    for side in [-1, 1] {
        if let Some(diag) = from.offset(side, color.forward()) {
            targets.insert(diag);
        }
    }
}
