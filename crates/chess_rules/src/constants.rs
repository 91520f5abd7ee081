//! Board geometry and the standard starting layout

use crate::piece::Piece;
use crate::types::{Color, PieceId, PieceKind, Square};

/// Orthogonal unit steps: north, south, east, west
pub const ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Diagonal unit steps
pub const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// File the king starts on (the e-file)
pub const KING_HOME_FILE: u8 = 5;

/// Back rank pieces from the a-file to the h-file
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Number of pieces in the starting layout
pub const STARTING_PIECE_COUNT: usize = 32;

/// The standard 32-piece starting layout
///
/// Ids are assigned 1..=32 in a fixed order: White's back rank, White's
/// pawns, Black's pawns, Black's back rank, each from the a-file to the h-file.
pub fn standard_layout() -> Vec<Piece> {
    let mut pieces = Vec::with_capacity(STARTING_PIECE_COUNT);
    let mut next_id = 1;
    let mut push = |kind: PieceKind, color: Color, x: u8, y: u8| {
        pieces.push(Piece::new(PieceId(next_id), kind, color, Square::new(x, y)));
        next_id += 1;
    };

    for (file, kind) in (1..=8).zip(BACK_RANK) {
        push(kind, Color::White, file, Color::White.home_rank());
    }
    for file in 1..=8 {
        push(PieceKind::Pawn, Color::White, file, Color::White.pawn_rank());
    }
    for file in 1..=8 {
        push(PieceKind::Pawn, Color::Black, file, Color::Black.pawn_rank());
    }
    for (file, kind) in (1..=8).zip(BACK_RANK) {
        push(kind, Color::Black, file, Color::Black.home_rank());
    }

    pieces
}
