//! Core value types shared by every part of the rules engine
//!
//! Coordinates follow the classic 1-based layout used by the persistence
//! schema: `x` is the file (1 = a-file, 8 = h-file) and `y` is the rank
//! (1 = White's home rank, 8 = Black's home rank). The off-board square
//! `(0, 0)` is where captured pieces are parked.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Smallest valid coordinate on either axis
pub const MIN_COORD: u8 = 1;
/// Largest valid coordinate on either axis
pub const MAX_COORD: u8 = 8;

/// Set of destination squares produced by move generation
///
/// A `BTreeSet` keeps iteration order deterministic, which keeps checkmate
/// search and log output reproducible between runs.
pub type Targets = BTreeSet<Square>;

/// Side of the board a piece belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// The other side
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a pawn step for this color
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank holding this color's king and rooks at the start
    pub fn home_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 8,
        }
    }

    /// Rank holding this color's pawns at the start
    pub fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 2,
            Color::Black => 7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => Ok(Color::White),
            "black" => Ok(Color::Black),
            other => Err(ParseNameError::new("color", other)),
        }
    }
}

/// The six movement-rule variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Material value in pawns
    ///
    /// Standard values: pawn 1, knight/bishop 3, rook 5, queen 9. The king is
    /// never captured so it carries no material value.
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    /// Whether the piece moves along unbounded rays
    pub fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PieceKind {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseNameError::new("piece kind", s))
    }
}

/// Error returned when a stored color or piece kind name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {what}: {value:?}")]
pub struct ParseNameError {
    pub what: &'static str,
    pub value: String,
}

impl ParseNameError {
    fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_string(),
        }
    }
}

/// A board coordinate, possibly off the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Square {
    pub x: u8,
    pub y: u8,
}

impl Square {
    /// Parking square for captured pieces
    pub const OFF_BOARD: Square = Square { x: 0, y: 0 };

    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// True when both coordinates lie in `[1, 8]`
    #[inline]
    pub fn is_on_board(self) -> bool {
        (MIN_COORD..=MAX_COORD).contains(&self.x) && (MIN_COORD..=MAX_COORD).contains(&self.y)
    }

    /// Square reached by stepping `(dx, dy)`, or `None` if it leaves the board
    pub fn offset(self, dx: i8, dy: i8) -> Option<Square> {
        let x = self.x as i16 + dx as i16;
        let y = self.y as i16 + dy as i16;
        let range = MIN_COORD as i16..=MAX_COORD as i16;
        if range.contains(&x) && range.contains(&y) {
            Some(Square::new(x as u8, y as u8))
        } else {
            None
        }
    }

    /// Signed `(dx, dy)` from `self` to `other`
    pub fn delta(self, other: Square) -> (i8, i8) {
        (
            other.x as i8 - self.x as i8,
            other.y as i8 - self.y as i8,
        )
    }

    /// True when `other` lies on the same rank, file or diagonal
    pub fn is_aligned_with(self, other: Square) -> bool {
        let (dx, dy) = self.delta(other);
        self != other && (dx == 0 || dy == 0 || dx.abs() == dy.abs())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Identifier of a piece within its game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub Uuid);

impl GameId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for GameId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(GameId)
    }
}
