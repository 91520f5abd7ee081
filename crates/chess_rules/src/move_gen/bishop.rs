//! Bishop move generation
//!
//! Bishops slide diagonally until blocked. A blocking opponent piece is a
//! capture target; a blocking friendly piece is not.

use super::sliding;
use crate::board::Board;
use crate::constants::BISHOP_DIRS;
use crate::types::{Color, Square, Targets};

pub fn generate_bishop_targets(board: &Board, from: Square, color: Color, targets: &mut Targets) {
    sliding::generate_sliding_targets(board, from, color, &BISHOP_DIRS, targets);
}
