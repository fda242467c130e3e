// This file is part of the chess-rules library.
// Copyright (C) 2026 The chess-rules developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use std::fmt;

use crate::{attacks, bitboard::Bitboard, color::Color, role::Role, square::Square};

/// A piece on the board, with [`Color`], [`Role`], the [`Square`] it stands
/// on, and whether it has moved since the game started.
///
/// Pieces are owned by the [`Board`](crate::Board). Values handed out by it
/// are snapshots; the board keeps `square` up to date as pieces move.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
    pub square: Square,
    pub has_moved: bool,
}

impl Piece {
    /// FEN letter of the piece, uppercase for white.
    pub fn char(self) -> char {
        self.color.fold(self.role.upper_char(), self.role.char())
    }

    /// Destination squares of the raw movement pattern, without regard for
    /// any other piece on the board.
    ///
    /// # Examples
    ///
    /// ```
    /// use chess_rules::{Color, Role, Square};
    ///
    /// let knight = Role::Knight.of(Color::White, Square::A1);
    /// assert_eq!(knight.pattern().count(), 2);
    ///
    /// let bishop = Role::Bishop.of(Color::White, Square::D4);
    /// assert_eq!(bishop.pattern().count(), 13);
    /// ```
    pub fn pattern(&self) -> Bitboard {
        attacks::pattern(self)
    }

    /// Whether this piece belongs to the same side as `other`.
    #[inline]
    pub fn is_friend_of(&self, other: &Piece) -> bool {
        self.color == other.color
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.role == Role::King
    }

    /// The same piece after moving to `square`.
    #[must_use]
    #[inline]
    pub fn moved_to(self, square: Square) -> Piece {
        Piece {
            square,
            has_moved: true,
            ..self
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} on {}", self.color, self.role, self.square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char() {
        assert_eq!(Role::Queen.of(Color::White, Square::D1).char(), 'Q');
        assert_eq!(Role::Pawn.of(Color::Black, Square::D7).char(), 'p');
    }

    #[test]
    fn test_moved_to() {
        let rook = Role::Rook.of(Color::White, Square::A1).moved_to(Square::A4);
        assert_eq!(rook.square, Square::A4);
        assert!(rook.has_moved);
        assert_eq!(rook.role, Role::Rook);
    }

    #[test]
    fn test_display() {
        let king = Role::King.of(Color::Black, Square::E8);
        assert_eq!(king.to_string(), "black king on e8");
    }
}
