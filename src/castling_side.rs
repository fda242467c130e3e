use std::ops;

use bitflags::bitflags;

use crate::{Color, Square};

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    #[inline]
    pub const fn is_queen_side(self) -> bool {
        matches!(self, CastlingSide::QueenSide)
    }

    #[inline]
    pub const fn is_king_side(self) -> bool {
        matches!(self, CastlingSide::KingSide)
    }

    pub const fn king_to_file(self) -> u8 {
        match self {
            CastlingSide::KingSide => 6,
            CastlingSide::QueenSide => 2,
        }
    }

    pub const fn rook_from_file(self) -> u8 {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 0,
        }
    }

    pub const fn rook_to_file(self) -> u8 {
        match self {
            CastlingSide::KingSide => 5,
            CastlingSide::QueenSide => 3,
        }
    }

    /// Home square of the king, the same for both sides.
    pub fn king_from(color: Color) -> Square {
        back_rank_square(4, color)
    }

    pub fn king_to(self, color: Color) -> Square {
        back_rank_square(self.king_to_file(), color)
    }

    pub fn rook_from(self, color: Color) -> Square {
        back_rank_square(self.rook_from_file(), color)
    }

    pub fn rook_to(self, color: Color) -> Square {
        back_rank_square(self.rook_to_file(), color)
    }

    /// Squares strictly between king and rook, which must all be empty.
    pub fn between(self, color: Color) -> impl Iterator<Item = Square> {
        let files = match self {
            CastlingSide::KingSide => 5..7,
            CastlingSide::QueenSide => 1..4,
        };
        files.map(move |file| back_rank_square(file, color))
    }

    /// Squares the king passes through or lands on, which must not be
    /// attacked.
    pub fn king_path(self, color: Color) -> [Square; 2] {
        match self {
            CastlingSide::KingSide => [back_rank_square(5, color), back_rank_square(6, color)],
            CastlingSide::QueenSide => [back_rank_square(3, color), back_rank_square(2, color)],
        }
    }

    #[must_use]
    #[inline]
    pub const fn other(self) -> CastlingSide {
        match self {
            CastlingSide::KingSide => CastlingSide::QueenSide,
            CastlingSide::QueenSide => CastlingSide::KingSide,
        }
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

impl ops::Not for CastlingSide {
    type Output = CastlingSide;

    #[inline]
    fn not(self) -> CastlingSide {
        self.other()
    }
}

fn back_rank_square(file: u8, color: Color) -> Square {
    Square::from_coords(file, color.backrank()).expect("back rank square")
}

bitflags! {
    /// Castling sides for which king and rook of one color have not moved
    /// from their home squares.
    ///
    /// Having a right does not make castling legal: the squares between
    /// must be empty and the king must not pass through check.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
    pub struct CastlingRights: u8 {
        const KING_SIDE = 1;
        const QUEEN_SIDE = 2;
    }
}

impl CastlingRights {
    #[inline]
    pub const fn side(side: CastlingSide) -> CastlingRights {
        match side {
            CastlingSide::KingSide => CastlingRights::KING_SIDE,
            CastlingSide::QueenSide => CastlingRights::QUEEN_SIDE,
        }
    }

    #[inline]
    pub const fn has(self, side: CastlingSide) -> bool {
        self.contains(CastlingRights::side(side))
    }
}

impl From<CastlingSide> for CastlingRights {
    fn from(side: CastlingSide) -> CastlingRights {
        CastlingRights::side(side)
    }
}
