//! Candidate move generation for every piece kind
//!
//! Each submodule owns one movement rule and appends the squares it produces
//! to a caller-supplied [`Targets`](crate::types::Targets) set. Generation
//! respects occupancy (no landing on friendly pieces, sliders stop at the
//! first blocker) but knows nothing about checks; the validator layers the
//! self-check guard on top.
//!
//! # Module Structure
//!
//! - `pawn` - single/double pushes and diagonal captures
//! - `knight` - the eight L-shaped jumps
//! - `sliding` - shared ray walking for bishops, rooks and queens
//! - `bishop`, `rook`, `queen` - thin wrappers over `sliding`
//! - `king` - adjacent squares plus castling destinations
//! - `attack` - attack sets and square-attacked queries used by check detection

pub mod attack;
pub mod bishop;
pub mod king;
pub mod knight;
pub mod pawn;
pub mod queen;
pub mod rook;
pub mod sliding;

#[cfg(test)]
mod tests;

pub use attack::{generate_attacks, is_square_attacked};
pub use bishop::generate_bishop_targets;
pub use king::{castling_rook_squares, generate_castling_targets, generate_king_targets, CastlingSide};
pub use knight::generate_knight_targets;
pub use pawn::generate_pawn_targets;
pub use queen::generate_queen_targets;
pub use rook::generate_rook_targets;
