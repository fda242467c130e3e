//! Movement patterns.
//!
//! Everything in this module ignores the other pieces on the board. Blocking,
//! captures and legality are handled by [`movegen`](crate::movegen).
//!
//! # Examples
//!
//! ```
//! use chess_rules::{attacks, Color, Square};
//!
//! let ray: Vec<_> = attacks::ray(Square::C2, (1, 1)).collect();
//! assert_eq!(ray, [Square::D3, Square::E4, Square::F5, Square::G6, Square::H7]);
//!
//! let pawn = attacks::pawn_attacks(Color::Black, Square::A7);
//! assert_eq!(pawn.into_iter().collect::<Vec<_>>(), [Square::B6]);
//! ```

use crate::{Bitboard, Color, Piece, Role, Square};

/// A step in file and rank direction.
pub type Delta = (i8, i8);

const KNIGHT_DELTAS: [Delta; 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_DELTAS: [Delta; 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const ROOK_DIRECTIONS: [Delta; 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const BISHOP_DIRECTIONS: [Delta; 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Directions a sliding piece moves in. Empty for non-sliders.
pub fn directions(role: Role) -> &'static [Delta] {
    match role {
        Role::Bishop => &BISHOP_DIRECTIONS,
        Role::Rook => &ROOK_DIRECTIONS,
        Role::Queen => &KING_DELTAS,
        Role::Pawn | Role::Knight | Role::King => &[],
    }
}

/// Squares from `from` (exclusive) in `direction` up to the board edge.
pub fn ray(from: Square, direction: Delta) -> Ray {
    Ray {
        current: from,
        direction,
    }
}

/// Iterator returned by [`ray()`].
#[derive(Debug, Clone)]
pub struct Ray {
    current: Square,
    direction: Delta,
}

impl Iterator for Ray {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        let (df, dr) = self.direction;
        let next = self.current.offset(df, dr)?;
        self.current = next;
        Some(next)
    }
}

impl std::iter::FusedIterator for Ray {}

fn steps(from: Square, deltas: &[Delta]) -> Bitboard {
    deltas
        .iter()
        .filter_map(|&(df, dr)| from.offset(df, dr))
        .collect()
}

pub fn knight_pattern(sq: Square) -> Bitboard {
    steps(sq, &KNIGHT_DELTAS)
}

pub fn king_pattern(sq: Square) -> Bitboard {
    steps(sq, &KING_DELTAS)
}

/// Full length rays in all directions of a sliding role.
pub fn slider_pattern(role: Role, sq: Square) -> Bitboard {
    directions(role)
        .iter()
        .flat_map(|&direction| ray(sq, direction))
        .collect()
}

/// The two forward diagonals of a pawn.
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    let forward = color.forward();
    steps(sq, &[(-1, forward), (1, forward)])
}

/// Forward steps of a pawn: one, and a second one if it has not moved yet.
pub fn pawn_pushes(color: Color, sq: Square, has_moved: bool) -> Bitboard {
    let forward = color.forward();
    let mut pushes = Bitboard::EMPTY;
    if let Some(single) = sq.offset(0, forward) {
        pushes.add(single);
        if !has_moved {
            pushes.extend(single.offset(0, forward));
        }
    }
    pushes
}

/// Raw movement pattern of a piece. See [`Piece::pattern()`].
pub fn pattern(piece: &Piece) -> Bitboard {
    match piece.role {
        Role::Pawn => {
            pawn_pushes(piece.color, piece.square, piece.has_moved)
                | pawn_attacks(piece.color, piece.square)
        }
        Role::Knight => knight_pattern(piece.square),
        Role::King => king_pattern(piece.square),
        Role::Bishop | Role::Rook | Role::Queen => slider_pattern(piece.role, piece.square),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knight() {
        assert_eq!(knight_pattern(Square::A1).count(), 2);
        assert_eq!(knight_pattern(Square::D4).count(), 8);
        assert!(knight_pattern(Square::G1).contains(Square::F3));
    }

    #[test]
    fn test_king() {
        assert_eq!(king_pattern(Square::H8).count(), 3);
        assert_eq!(king_pattern(Square::E4).count(), 8);
    }

    #[test]
    fn test_sliders() {
        assert_eq!(slider_pattern(Role::Rook, Square::A1).count(), 14);
        assert_eq!(slider_pattern(Role::Bishop, Square::A1).count(), 7);
        assert_eq!(slider_pattern(Role::Queen, Square::D4).count(), 27);
        assert!(slider_pattern(Role::Knight, Square::D4).is_empty());
    }

    #[test]
    fn test_pawn_pattern() {
        let unmoved = Role::Pawn.of(Color::White, Square::E2);
        let expected: Bitboard = [Square::E3, Square::E4, Square::D3, Square::F3]
            .into_iter()
            .collect();
        assert_eq!(unmoved.pattern(), expected);

        let moved = Role::Pawn.of(Color::Black, Square::A5).moved_to(Square::A5);
        let expected: Bitboard = [Square::A4, Square::B4].into_iter().collect();
        assert_eq!(moved.pattern(), expected);
    }

    #[test]
    fn test_pawn_on_last_rank() {
        let pawn = Role::Pawn.of(Color::White, Square::C8);
        assert!(pawn.pattern().is_empty());
    }
}
