//! Check, checkmate and stalemate detection
//!
//! All queries take a [`Board`] so they can run equally against the live
//! position and against scratch boards produced during simulation.

use tracing::warn;

use crate::board::Board;
use crate::move_gen::is_square_attacked;
use crate::types::Color;
use crate::validator::MoveValidator;

/// True iff the active king of `color` is attacked by any opposing piece
///
/// A board without a king of `color` is malformed; it is logged and treated
/// as not in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_of(color) {
        Some(king) => is_square_attacked(board, king.square(), color.opponent()),
        None => {
            warn!("[RULES] No active {} king on the board", color);
            false
        }
    }
}

/// True iff `color` has at least one legal move
///
/// Exhaustive over (piece × candidate target) pairs, returning at the first
/// legal one. Bounded by 16 pieces with at most 27 targets each.
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    let validator = MoveValidator::new(board, color);
    board
        .pieces_of(color)
        .any(|piece| !validator.legal_targets(piece).is_empty())
}

/// True iff `color` is in check and no legal move escapes it
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    is_in_check(board, color) && !has_legal_move(board, color)
}

/// True iff `color` is not in check but has no legal move
pub fn is_stalemate(board: &Board, color: Color) -> bool {
    !is_in_check(board, color) && !has_legal_move(board, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::standard_layout;
    use crate::piece::Piece;
    use crate::types::{PieceId, PieceKind, Square};

    fn place(id: u32, kind: PieceKind, color: Color, x: u8, y: u8) -> Piece {
        Piece::new(PieceId(id), kind, color, Square::new(x, y))
    }

    #[test]
    fn test_starting_position_is_quiet() {
        let board = Board::from_pieces(&standard_layout());
        for color in [Color::White, Color::Black] {
            assert!(!is_in_check(&board, color));
            assert!(has_legal_move(&board, color));
            assert!(!is_checkmate(&board, color));
            assert!(!is_stalemate(&board, color));
        }
    }

    #[test]
    fn test_knight_gives_check() {
        let board = Board::from_pieces(&[
            place(1, PieceKind::King, Color::White, 5, 1),
            place(2, PieceKind::King, Color::Black, 5, 8),
            place(3, PieceKind::Knight, Color::Black, 4, 3),
        ]);
        assert!(is_in_check(&board, Color::White));
        assert!(!is_in_check(&board, Color::Black));
    }

    #[test]
    fn test_blocked_slider_does_not_give_check() {
        let board = Board::from_pieces(&[
            place(1, PieceKind::King, Color::White, 5, 1),
            place(2, PieceKind::King, Color::Black, 1, 8),
            place(3, PieceKind::Rook, Color::Black, 5, 8),
            place(4, PieceKind::Pawn, Color::White, 5, 4),
        ]);
        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn test_back_rank_mate() {
        let board = Board::from_pieces(&[
            place(1, PieceKind::King, Color::White, 7, 1),
            place(2, PieceKind::Pawn, Color::White, 6, 2),
            place(3, PieceKind::Pawn, Color::White, 7, 2),
            place(4, PieceKind::Pawn, Color::White, 8, 2),
            place(5, PieceKind::Rook, Color::Black, 1, 1),
            place(6, PieceKind::King, Color::Black, 7, 8),
        ]);
        assert!(is_checkmate(&board, Color::White));
    }

    #[test]
    fn test_check_escaped_by_capture_is_not_mate() {
        let board = Board::from_pieces(&[
            place(1, PieceKind::King, Color::White, 7, 1),
            place(2, PieceKind::Pawn, Color::White, 6, 2),
            place(3, PieceKind::Pawn, Color::White, 7, 2),
            place(4, PieceKind::Pawn, Color::White, 8, 2),
            place(5, PieceKind::Rook, Color::Black, 1, 1),
            place(6, PieceKind::King, Color::Black, 7, 8),
            place(7, PieceKind::Rook, Color::White, 1, 5),
        ]);
        assert!(is_in_check(&board, Color::White));
        assert!(!is_checkmate(&board, Color::White));
    }

    #[test]
    fn test_cornered_king_is_stalemated() {
        let board = Board::from_pieces(&[
            place(1, PieceKind::King, Color::Black, 8, 8),
            place(2, PieceKind::Queen, Color::White, 7, 6),
            place(3, PieceKind::King, Color::White, 1, 1),
        ]);
        assert!(is_stalemate(&board, Color::Black));
        assert!(!is_checkmate(&board, Color::Black));
    }
}
