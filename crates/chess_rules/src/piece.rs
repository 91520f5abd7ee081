//! Chess pieces and their per-variant movement rules
//!
//! A [`Piece`] is a plain value: kind, color, coordinates and two flags. The
//! movement rule is selected by matching on [`PieceKind`], so every place that
//! consults movement rules is checked for exhaustiveness by the compiler.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::move_gen;
use crate::types::{Color, PieceId, PieceKind, Square, Targets};

/// A single chess piece belonging to a game
///
/// Pieces are never removed from their game. Capturing sets `captured` and
/// parks the piece on [`Square::OFF_BOARD`]; either condition makes the piece
/// inactive for occupancy and attack computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub x: u8,
    pub y: u8,
    pub captured: bool,
    /// Set once the piece has made a move; used by castling
    pub has_moved: bool,
}

impl Piece {
    pub fn new(id: PieceId, kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            id,
            kind,
            color,
            x: square.x,
            y: square.y,
            captured: false,
            has_moved: false,
        }
    }

    #[inline]
    pub fn square(&self) -> Square {
        Square::new(self.x, self.y)
    }

    /// Active pieces take part in occupancy and attack computations
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.captured && self.square().is_on_board()
    }

    /// Unicode glyph used by the presentation layer
    pub fn icon(&self) -> &'static str {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => "\u{2654}",
            (Color::White, PieceKind::Queen) => "\u{2655}",
            (Color::White, PieceKind::Rook) => "\u{2656}",
            (Color::White, PieceKind::Bishop) => "\u{2657}",
            (Color::White, PieceKind::Knight) => "\u{2658}",
            (Color::White, PieceKind::Pawn) => "\u{2659}",
            (Color::Black, PieceKind::King) => "\u{265A}",
            (Color::Black, PieceKind::Queen) => "\u{265B}",
            (Color::Black, PieceKind::Rook) => "\u{265C}",
            (Color::Black, PieceKind::Bishop) => "\u{265D}",
            (Color::Black, PieceKind::Knight) => "\u{265E}",
            (Color::Black, PieceKind::Pawn) => "\u{265F}",
        }
    }

    /// Squares this piece could move to by its shape rule
    ///
    /// Respects board occupancy and capture rules for the piece type but not
    /// the self-check guard. For kings this includes castling destinations
    /// whose static preconditions hold (king and rook unmoved, path empty);
    /// the attack-related castling conditions are enforced by the validator.
    pub fn candidate_targets(&self, board: &Board) -> Targets {
        let mut targets = Targets::new();
        if !self.is_active() {
            return targets;
        }

        let from = self.square();
        match self.kind {
            PieceKind::Pawn => move_gen::generate_pawn_targets(board, from, self.color, &mut targets),
            PieceKind::Knight => move_gen::generate_knight_targets(board, from, self.color, &mut targets),
            PieceKind::Bishop => move_gen::generate_bishop_targets(board, from, self.color, &mut targets),
            PieceKind::Rook => move_gen::generate_rook_targets(board, from, self.color, &mut targets),
            PieceKind::Queen => move_gen::generate_queen_targets(board, from, self.color, &mut targets),
            PieceKind::King => {
                move_gen::generate_king_targets(board, from, self.color, &mut targets);
                move_gen::generate_castling_targets(board, self, &mut targets);
            }
        }
        targets
    }

    /// Squares this piece attacks, regardless of who occupies them
    ///
    /// Differs from [`Piece::candidate_targets`] in two ways: pawns attack both
    /// forward diagonals even when empty, and castling is never an attack.
    pub fn attacked_squares(&self, board: &Board) -> Targets {
        let mut targets = Targets::new();
        if self.is_active() {
            move_gen::generate_attacks(board, self, &mut targets);
        }
        targets
    }

    /// True iff an opposing piece stands on `square` and this piece can reach it
    pub fn is_capturable(&self, board: &Board, square: Square) -> bool {
        board.color_at(square) == Some(self.color.opponent())
            && self.candidate_targets(board).contains(&square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(kind: PieceKind, color: Color, x: u8, y: u8) -> Piece {
        Piece::new(PieceId(1), kind, color, Square::new(x, y))
    }

    #[test]
    fn test_captured_piece_is_inactive() {
        let mut rook = piece(PieceKind::Rook, Color::White, 1, 1);
        assert!(rook.is_active());

        rook.captured = true;
        assert!(!rook.is_active());

        let parked = piece(PieceKind::Rook, Color::White, 0, 0);
        assert!(!parked.is_active(), "Off-board pieces are inactive");
    }

    #[test]
    fn test_inactive_piece_has_no_targets() {
        let mut queen = piece(PieceKind::Queen, Color::White, 4, 4);
        queen.captured = true;
        let board = Board::from_pieces(&[queen]);
        assert!(queen.candidate_targets(&board).is_empty());
        assert!(queen.attacked_squares(&board).is_empty());
    }

    #[test]
    fn test_icons_distinguish_colors() {
        let white = piece(PieceKind::Knight, Color::White, 2, 1);
        let black = piece(PieceKind::Knight, Color::Black, 2, 8);
        assert_eq!(white.icon(), "♘");
        assert_eq!(black.icon(), "♞");
    }

    #[test]
    fn test_is_capturable() {
        let rook = piece(PieceKind::Rook, Color::White, 1, 1);
        let enemy = Piece::new(PieceId(2), PieceKind::Pawn, Color::Black, Square::new(1, 5));
        let friend = Piece::new(PieceId(3), PieceKind::Pawn, Color::White, Square::new(4, 1));
        let board = Board::from_pieces(&[rook, enemy, friend]);

        assert!(rook.is_capturable(&board, Square::new(1, 5)));
        assert!(!rook.is_capturable(&board, Square::new(4, 1)), "Own piece");
        assert!(!rook.is_capturable(&board, Square::new(1, 4)), "Empty square");
    }
}
