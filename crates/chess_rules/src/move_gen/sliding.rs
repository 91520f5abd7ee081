//! Sliding piece move generation
//!
//! Common functionality for sliding pieces (bishops, rooks, queens).
//! These pieces move any number of squares along a ray until blocked.
//!
//! ## Algorithm
//!
//! For each direction we walk outwards from the source square:
//! 1. Empty squares are valid targets, keep walking
//! 2. An opponent piece is a valid target (capture), then stop
//! 3. A friendly piece is not a target, stop
//! 4. Leaving the board stops the ray

use crate::board::Board;
use crate::constants::{BISHOP_DIRS, ROOK_DIRS};
use crate::types::{Color, Square, Targets};

/// Walk every ray in `dirs` from `from`, appending reachable squares
///
/// # Arguments
///
/// * `board` - Current occupancy
/// * `from` - Square the slider stands on
/// * `color` - Color of the moving piece
/// * `dirs` - Unit steps `(dx, dy)` to walk
/// * `targets` - Output set
pub fn generate_sliding_targets(
    board: &Board,
    from: Square,
    color: Color,
    dirs: &[(i8, i8)],
    targets: &mut Targets,
) {
    for &(dx, dy) in dirs {
        let mut current = from;
        while let Some(next) = current.offset(dx, dy) {
            match board.color_at(next) {
                None => {
                    targets.insert(next);
                }
                Some(other) => {
                    if other != color {
                        targets.insert(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
}

/// Squares covered by the rays, including the first blocker of either color
pub fn generate_sliding_attacks(
    board: &Board,
    from: Square,
    dirs: &[(i8, i8)],
    targets: &mut Targets,
) {
    for &(dx, dy) in dirs {
        let mut current = from;
        while let Some(next) = current.offset(dx, dy) {
            targets.insert(next);
            if board.is_occupied(next) {
                break;
            }
            current = next;
        }
    }
}

/// Rays used by a slider of the given shape
pub fn rays(orthogonal: bool, diagonal: bool) -> Vec<(i8, i8)> {
    let mut dirs = Vec::with_capacity(8);
    if orthogonal {
        dirs.extend_from_slice(&ROOK_DIRS);
    }
    if diagonal {
        dirs.extend_from_slice(&BISHOP_DIRS);
    }
    dirs
}
