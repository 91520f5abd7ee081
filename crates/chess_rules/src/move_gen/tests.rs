//! Test suite for candidate move generation
//!
//! # Test Organization
//!
//! - `test_pawn_*` - Pawn movement (forward, double step, capture)
//! - `test_knight_*` - Knight L-shaped movement
//! - `test_bishop_*`, `test_rook_*`, `test_queen_*` - Sliders and blocking
//! - `test_king_*` - King steps and castling candidates
//! - `test_attack_*` - Attack sets used by check detection

use crate::board::Board;
use crate::move_gen::is_square_attacked;
use crate::piece::Piece;
use crate::types::{Color, PieceId, PieceKind, Square, Targets};

/// Build a board from `(kind, color, (x, y))` tuples
///
/// Pieces get ids in list order starting at 1, so the first entry is usually
/// the piece under test.
fn create_test_board(pieces: &[(PieceKind, Color, (u8, u8))]) -> (Board, Vec<Piece>) {
    let pieces: Vec<Piece> = pieces
        .iter()
        .enumerate()
        .map(|(i, &(kind, color, (x, y)))| Piece::new(PieceId(i as u32 + 1), kind, color, Square::new(x, y)))
        .collect();
    (Board::from_pieces(&pieces), pieces)
}

fn squares(list: &[(u8, u8)]) -> Targets {
    list.iter().map(|&(x, y)| Square::new(x, y)).collect()
}

// ============================================================================
// Pawn Movement Tests
// ============================================================================

#[test]
fn test_pawn_single_and_double_step_from_start() {
    //! Pawns on their starting rank may advance one or two squares
    let (board, pieces) = create_test_board(&[(PieceKind::Pawn, Color::White, (1, 2))]);
    assert_eq!(pieces[0].candidate_targets(&board), squares(&[(1, 3), (1, 4)]));

    let (board, pieces) = create_test_board(&[(PieceKind::Pawn, Color::Black, (4, 7))]);
    assert_eq!(pieces[0].candidate_targets(&board), squares(&[(4, 6), (4, 5)]));
}

#[test]
fn test_pawn_single_step_after_leaving_start() {
    let (board, pieces) = create_test_board(&[(PieceKind::Pawn, Color::White, (3, 3))]);
    assert_eq!(pieces[0].candidate_targets(&board), squares(&[(3, 4)]));
}

#[test]
fn test_pawn_blocked_double_step() {
    //! A piece directly in front blocks both the single and the double step
    let (board, pieces) = create_test_board(&[
        (PieceKind::Pawn, Color::White, (5, 2)),
        (PieceKind::Knight, Color::Black, (5, 3)),
    ]);
    assert!(pieces[0].candidate_targets(&board).is_empty());

    let (board, pieces) = create_test_board(&[
        (PieceKind::Pawn, Color::White, (5, 2)),
        (PieceKind::Knight, Color::Black, (5, 4)),
    ]);
    assert_eq!(pieces[0].candidate_targets(&board), squares(&[(5, 3)]));
}

#[test]
fn test_pawn_captures_only_opponents_diagonally() {
    //! Diagonal moves exist only as captures of opposing pieces
    let (board, pieces) = create_test_board(&[
        (PieceKind::Pawn, Color::White, (4, 4)),
        (PieceKind::Pawn, Color::Black, (5, 5)),
        (PieceKind::Pawn, Color::White, (3, 5)),
    ]);
    assert_eq!(pieces[0].candidate_targets(&board), squares(&[(4, 5), (5, 5)]));
}

#[test]
fn test_pawn_on_last_rank_has_no_targets() {
    let (board, pieces) = create_test_board(&[(PieceKind::Pawn, Color::White, (2, 8))]);
    assert!(pieces[0].candidate_targets(&board).is_empty());
}

// ============================================================================
// Knight Movement Tests
// ============================================================================

#[test]
fn test_knight_l_shape_from_center() {
    let (board, pieces) = create_test_board(&[(PieceKind::Knight, Color::White, (4, 4))]);
    assert_eq!(
        pieces[0].candidate_targets(&board),
        squares(&[(5, 6), (6, 5), (6, 3), (5, 2), (3, 2), (2, 3), (2, 5), (3, 6)])
    );
}

#[test]
fn test_knight_can_jump_over_pieces() {
    //! Knights ignore intervening pieces but not friendly destinations
    let (board, pieces) = create_test_board(&[
        (PieceKind::Knight, Color::White, (2, 1)),
        (PieceKind::Pawn, Color::White, (1, 2)),
        (PieceKind::Pawn, Color::White, (2, 2)),
        (PieceKind::Pawn, Color::White, (3, 2)),
        (PieceKind::Pawn, Color::White, (4, 2)),
        (PieceKind::Bishop, Color::Black, (1, 3)),
    ]);
    assert_eq!(pieces[0].candidate_targets(&board), squares(&[(1, 3), (3, 3)]));
}

// ============================================================================
// Slider Movement Tests
// ============================================================================

#[test]
fn test_bishop_blocked_by_piece() {
    //! The blocking square is a target only when it holds an opponent
    let (board, pieces) = create_test_board(&[
        (PieceKind::Bishop, Color::White, (3, 1)),
        (PieceKind::Pawn, Color::White, (2, 2)),
        (PieceKind::Pawn, Color::Black, (5, 3)),
    ]);
    assert_eq!(pieces[0].candidate_targets(&board), squares(&[(4, 2), (5, 3)]));
}

#[test]
fn test_rook_open_board_count() {
    let (board, pieces) = create_test_board(&[(PieceKind::Rook, Color::White, (4, 4))]);
    assert_eq!(pieces[0].candidate_targets(&board).len(), 14);
}

#[test]
fn test_rook_surrounded_by_friends_has_no_targets() {
    let (board, pieces) = create_test_board(&[
        (PieceKind::Rook, Color::White, (4, 4)),
        (PieceKind::Pawn, Color::White, (4, 5)),
        (PieceKind::Pawn, Color::White, (4, 3)),
        (PieceKind::Pawn, Color::White, (5, 4)),
        (PieceKind::Pawn, Color::White, (3, 4)),
    ]);
    assert!(pieces[0].candidate_targets(&board).is_empty());
}

#[test]
fn test_queen_is_rook_plus_bishop() {
    let (board, pieces) = create_test_board(&[(PieceKind::Queen, Color::Black, (4, 4))]);
    assert_eq!(pieces[0].candidate_targets(&board).len(), 27);

    let (board, pieces) = create_test_board(&[
        (PieceKind::Queen, Color::White, (3, 3)),
        (PieceKind::Pawn, Color::White, (4, 4)),
        (PieceKind::Rook, Color::Black, (3, 6)),
    ]);
    let targets = pieces[0].candidate_targets(&board);
    assert!(targets.contains(&Square::new(3, 6)), "Queen should capture enemy rook");
    assert!(!targets.contains(&Square::new(3, 7)), "Queen should not pass the rook");
    assert!(!targets.contains(&Square::new(5, 5)), "Queen should not jump over friendly pawn");
}

// ============================================================================
// King Movement Tests
// ============================================================================

#[test]
fn test_king_single_steps_in_corner() {
    let (board, pieces) = create_test_board(&[(PieceKind::King, Color::White, (1, 1))]);
    assert_eq!(pieces[0].candidate_targets(&board), squares(&[(1, 2), (2, 1), (2, 2)]));
}

#[test]
fn test_king_castling_candidates() {
    //! Castling destinations appear only while king and rook are unmoved
    //! and nothing stands between them
    let (board, pieces) = create_test_board(&[
        (PieceKind::King, Color::White, (5, 1)),
        (PieceKind::Rook, Color::White, (1, 1)),
        (PieceKind::Rook, Color::White, (8, 1)),
        (PieceKind::Knight, Color::White, (7, 1)),
    ]);
    let targets = pieces[0].candidate_targets(&board);
    assert!(targets.contains(&Square::new(3, 1)), "Queen-side path is empty");
    assert!(!targets.contains(&Square::new(7, 1)), "King-side path holds a knight");

    let mut moved_king = pieces[0];
    moved_king.has_moved = true;
    assert!(!moved_king.candidate_targets(&board).contains(&Square::new(3, 1)));
}

#[test]
fn test_black_king_castling_candidates() {
    let (board, pieces) = create_test_board(&[
        (PieceKind::King, Color::Black, (5, 8)),
        (PieceKind::Rook, Color::Black, (8, 8)),
    ]);
    assert!(pieces[0].candidate_targets(&board).contains(&Square::new(7, 8)));
}

// ============================================================================
// Attack Tests
// ============================================================================

#[test]
fn test_attack_pawn_covers_empty_diagonals() {
    //! Pawns attack diagonals they could not move to right now
    let (board, pieces) = create_test_board(&[(PieceKind::Pawn, Color::Black, (4, 7))]);
    assert_eq!(pieces[0].attacked_squares(&board), squares(&[(3, 6), (5, 6)]));
    assert!(is_square_attacked(&board, Square::new(3, 6), Color::Black));
    assert!(!is_square_attacked(&board, Square::new(4, 6), Color::Black));
}

#[test]
fn test_attack_includes_defended_pieces() {
    //! A slider's first blocker is attacked even when it is friendly
    let (board, pieces) = create_test_board(&[
        (PieceKind::Rook, Color::Black, (1, 8)),
        (PieceKind::Knight, Color::Black, (1, 5)),
    ]);
    let attacked = pieces[0].attacked_squares(&board);
    assert!(attacked.contains(&Square::new(1, 5)));
    assert!(!attacked.contains(&Square::new(1, 4)));
}

#[test]
fn test_attack_castling_is_not_an_attack() {
    let (board, pieces) = create_test_board(&[
        (PieceKind::King, Color::White, (5, 1)),
        (PieceKind::Rook, Color::White, (8, 1)),
    ]);
    assert!(pieces[0].candidate_targets(&board).contains(&Square::new(7, 1)));
    assert!(!pieces[0].attacked_squares(&board).contains(&Square::new(7, 1)));
}
