use std::{fmt, fmt::Write as _};

use arrayvec::ArrayVec;

use crate::{CastlingSide, Piece, Role, Square};

/// What kind of move a [`Move`] is.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MoveKind {
    /// A quiet move onto an empty square.
    Normal,
    /// A capture on the destination square.
    Capture,
    /// Castling. The rook moves along with the king.
    Castle(CastlingSide),
    /// A pawn captures a pawn that just made a double step past it.
    EnPassant,
    /// A pawn reaches the farthest rank and becomes the given role. May also
    /// be a capture, see [`Move::capture`].
    Promotion(Role),
}

/// A move, as produced by [`movegen`](crate::movegen) and consumed by
/// [`Board::apply_move()`](crate::Board::apply_move).
///
/// # Display
///
/// `Move` implements [`Display`](fmt::Display) using long algebraic
/// notation, e.g. `Ng1-f3`, `e5xd6` or `O-O-O`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    /// The moving piece, as it was before the move.
    pub piece: Piece,
    pub from: Square,
    /// Destination of the moving piece. For castling moves this is the
    /// king's destination.
    pub to: Square,
    /// Role of the captured piece, if any.
    pub capture: Option<Role>,
    pub kind: MoveKind,
}

impl Move {
    /// Gets the role of the moved piece.
    #[inline]
    pub const fn role(&self) -> Role {
        self.piece.role
    }

    /// Checks if the move is a capture.
    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Checks if the move is en passant.
    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    /// Gets the castling side.
    #[inline]
    pub const fn castling_side(&self) -> Option<CastlingSide> {
        match self.kind {
            MoveKind::Castle(side) => Some(side),
            _ => None,
        }
    }

    /// Checks if the move is a castling move.
    #[inline]
    pub const fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::Castle(_))
    }

    /// Gets the promotion role.
    #[inline]
    pub const fn promotion(&self) -> Option<Role> {
        match self.kind {
            MoveKind::Promotion(role) => Some(role),
            _ => None,
        }
    }

    /// Checks if the move is a promotion.
    #[inline]
    pub const fn is_promotion(&self) -> bool {
        matches!(self.kind, MoveKind::Promotion(_))
    }

    /// Checks if the move resets the halfmove clock.
    #[inline]
    pub const fn is_zeroing(&self) -> bool {
        matches!(self.piece.role, Role::Pawn) || self.capture.is_some()
    }

    /// Square of the piece removed by an en passant capture.
    pub fn en_passant_victim(&self) -> Option<Square> {
        if self.is_en_passant() {
            Square::from_coords(self.to.file(), self.from.rank())
        } else {
            None
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let MoveKind::Castle(side) = self.kind {
            return f.write_str(if side.is_king_side() { "O-O" } else { "O-O-O" });
        }

        if self.piece.role != Role::Pawn {
            f.write_char(self.piece.role.upper_char())?;
        }

        write!(
            f,
            "{}{}{}",
            self.from,
            if self.is_capture() { 'x' } else { '-' },
            self.to
        )?;

        if let Some(p) = self.promotion() {
            write!(f, "={}", p.upper_char())?;
        }

        Ok(())
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// There is enough space to hold the legal moves of any reachable chess
/// position.
///
/// # Example
///
/// ```
/// use chess_rules::{GameState, Role};
///
/// let game = GameState::new();
/// let mut moves = game.legal_moves();
/// moves.retain(|m| m.role() == Role::Pawn);
/// assert_eq!(moves.len(), 16);
/// ```
pub type MoveList = ArrayVec<Move, 256>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_display() {
        let knight = Role::Knight.of(Color::White, Square::G1);
        let m = Move {
            piece: knight,
            from: Square::G1,
            to: Square::F3,
            capture: None,
            kind: MoveKind::Normal,
        };
        assert_eq!(m.to_string(), "Ng1-f3");

        let pawn = Role::Pawn.of(Color::Black, Square::B2);
        let m = Move {
            piece: pawn,
            from: Square::B2,
            to: Square::A1,
            capture: Some(Role::Rook),
            kind: MoveKind::Promotion(Role::Queen),
        };
        assert_eq!(m.to_string(), "b2xa1=Q");
        assert!(m.is_zeroing());
    }

    #[test]
    fn test_en_passant_victim() {
        let pawn = Role::Pawn.of(Color::White, Square::E5);
        let m = Move {
            piece: pawn,
            from: Square::E5,
            to: Square::D6,
            capture: Some(Role::Pawn),
            kind: MoveKind::EnPassant,
        };
        assert_eq!(m.en_passant_victim(), Some(Square::D5));
        assert_eq!(m.to_string(), "e5xd6");
    }
}
