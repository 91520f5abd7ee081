//! Move legality
//!
//! [`MoveValidator`] decides whether a proposed move is legal against a board
//! snapshot. Validation never mutates anything: the outcome is a
//! [`PlannedMove`] describing every side effect (capture, castling rook
//! relocation), which the game then commits in one step.
//!
//! # Order of checks
//!
//! 1. Turn ownership, captured piece, target bounds
//! 2. Castling-shaped king moves take the castling branch
//! 3. Target must be a candidate target of the piece
//! 4. The move is simulated on a scratch board and rejected if the mover's
//!    own king would be attacked afterwards. This applies to every move,
//!    not only to moves made while in check.

use tracing::debug;

pub use crate::board::{PlannedMove, RookRelocation};

use crate::board::Board;
use crate::check::is_in_check;
use crate::error::{CastlingFailure, MoveRejection, MoveResult};
use crate::move_gen::king::{castling_king_square, castling_rook, castling_rook_squares};
use crate::move_gen::{is_square_attacked, CastlingSide};
use crate::piece::Piece;
use crate::types::{Color, PieceKind, Square, Targets};

/// Legality checks against one board snapshot
pub struct MoveValidator<'a> {
    board: &'a Board,
    side_to_move: Color,
}

impl<'a> MoveValidator<'a> {
    pub fn new(board: &'a Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
        }
    }

    /// Validate a move requested by `actor`
    ///
    /// # Arguments
    ///
    /// * `actor` - Color of the player asking for the move
    /// * `piece` - The piece to move, as stored in the game
    /// * `target` - Destination square
    ///
    /// # Errors
    ///
    /// Any [`MoveRejection`] except the game-status ones, which are decided
    /// before a validator is built.
    pub fn validate(&self, actor: Color, piece: &Piece, target: Square) -> MoveResult<PlannedMove> {
        if actor != self.side_to_move || piece.color != actor {
            return Err(MoveRejection::NotYourTurn { color: actor });
        }
        if !piece.is_active() {
            return Err(MoveRejection::PieceAlreadyCaptured { id: piece.id });
        }
        if !target.is_on_board() {
            return Err(MoveRejection::OutOfBounds { target });
        }

        self.plan(piece, target).inspect_err(|rejection| {
            debug!(
                "[RULES] Rejected {} {} {} -> {}: {}",
                piece.color,
                piece.kind,
                piece.square(),
                target,
                rejection
            );
        })
    }

    /// Every square `piece` can legally move to
    ///
    /// Candidate targets filtered through castling preconditions and the
    /// self-check guard. Turn order is not considered.
    pub fn legal_targets(&self, piece: &Piece) -> Targets {
        piece
            .candidate_targets(self.board)
            .into_iter()
            .filter(|&target| self.plan(piece, target).is_ok())
            .collect()
    }

    /// Steps 2-4: shape, castling and the self-check guard
    fn plan(&self, piece: &Piece, target: Square) -> MoveResult<PlannedMove> {
        if let Some(side) = CastlingSide::from_move(piece, target) {
            return self.plan_castling(piece, side);
        }

        if !piece.candidate_targets(self.board).contains(&target) {
            return Err(self.classify_unreachable(piece, target));
        }

        let plan = PlannedMove {
            piece: piece.id,
            from: piece.square(),
            to: target,
            capture: self.board.occupant_at(target).map(|p| p.id),
            rook: None,
        };
        self.guard_self_check(piece.color, plan)
    }

    fn plan_castling(&self, king: &Piece, side: CastlingSide) -> MoveResult<PlannedMove> {
        let fail = |reason| MoveRejection::CastlingPrecondition { reason };

        if king.has_moved {
            return Err(fail(CastlingFailure::KingMoved));
        }
        let rook = castling_rook(self.board, king, side).ok_or(fail(CastlingFailure::RookUnavailable))?;
        if !self.board.path_clear(king.square(), rook.square()) {
            return Err(fail(CastlingFailure::PathOccupied));
        }

        let opponent = king.color.opponent();
        if is_square_attacked(self.board, king.square(), opponent) {
            return Err(fail(CastlingFailure::KingInCheck));
        }

        let landing = castling_king_square(king.color, side);
        let mut crossing = king.square();
        while crossing != landing {
            crossing = crossing
                .offset(side.step(), 0)
                .ok_or(fail(CastlingFailure::PathOccupied))?;
            if is_square_attacked(self.board, crossing, opponent) {
                return Err(fail(CastlingFailure::SquareAttacked { square: crossing }));
            }
        }

        let (rook_from, rook_to) = castling_rook_squares(king.color, side);
        let plan = PlannedMove {
            piece: king.id,
            from: king.square(),
            to: landing,
            capture: None,
            rook: Some(RookRelocation {
                rook: rook.id,
                from: rook_from,
                to: rook_to,
            }),
        };
        self.guard_self_check(king.color, plan)
    }

    /// Simulate `plan` on a scratch board and refuse it if it exposes the king
    fn guard_self_check(&self, color: Color, plan: PlannedMove) -> MoveResult<PlannedMove> {
        let scratch = self.board.apply(&plan);
        if is_in_check(&scratch, color) {
            Err(MoveRejection::SelfCheck)
        } else {
            Ok(plan)
        }
    }

    /// Explain why `target` is not among the piece's candidate targets
    ///
    /// A target the piece's pattern could reach on an empty board is
    /// `PathBlocked`; anything else is `IllegalShape`. Landing on a friendly
    /// piece is reported separately.
    fn classify_unreachable(&self, piece: &Piece, target: Square) -> MoveRejection {
        let from = piece.square();
        if self.board.color_at(target) == Some(piece.color) {
            return MoveRejection::OccupiedByOwnPiece { target };
        }

        let (dx, dy) = from.delta(target);
        let fits_pattern = match piece.kind {
            PieceKind::Pawn => {
                let dir = piece.color.forward();
                dx == 0 && (dy == dir || (dy == 2 * dir && from.y == piece.color.pawn_rank()))
            }
            PieceKind::Bishop => dx != 0 && dx.abs() == dy.abs(),
            PieceKind::Rook => (dx == 0) != (dy == 0),
            PieceKind::Queen => from.is_aligned_with(target),
            PieceKind::Knight | PieceKind::King => false,
        };

        if fits_pattern {
            MoveRejection::PathBlocked { from, to: target }
        } else {
            MoveRejection::IllegalShape { from, to: target }
        }
    }
}
