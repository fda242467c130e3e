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

//! Piece positions on a board.

use std::{fmt, fmt::Write as _};

use crate::{
    castling_side::{CastlingRights, CastlingSide},
    color::Color,
    m::{Move, MoveKind},
    role::Role,
    square::Square,
    types::Piece,
};

const BACKRANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// [`Piece`] positions on a board, and the en passant square left behind by
/// the last move.
///
/// The board is the single owner of piece state. It does not know whose
/// turn it is and performs no legality checks of its own.
///
/// # Examples
///
/// ```
/// use chess_rules::{Board, Color, Role, Square};
///
/// let board = Board::new();
/// // r n b q k b n r
/// // p p p p p p p p
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // P P P P P P P P
/// // R N B Q K B N R
///
/// let piece = board.piece_at(Square::E8).expect("black king");
/// assert_eq!((piece.color, piece.role), (Color::Black, Role::King));
/// assert_eq!(board.pieces_of(Color::White).count(), 16);
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
    ep_square: Option<Square>,
}

impl Board {
    /// The standard starting position.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (file, role) in (0..8).zip(BACKRANK) {
                let sq = Square::from_coords(file, color.backrank()).expect("back rank");
                board.place(role.of(color, sq), sq);

                let sq = Square::from_coords(file, pawn_rank(color)).expect("pawn rank");
                board.place(Role::Pawn.of(color, sq), sq);
            }
        }
        board
    }

    pub fn empty() -> Board {
        Board {
            squares: [None; 64],
            ep_square: None,
        }
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_some()
    }

    /// All pieces, in square order `A1`, `B1`, ..., `H8`.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.squares.iter().flatten().copied()
    }

    /// All pieces of one side, in square order `A1`, `B1`, ..., `H8`.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |piece| piece.color == color)
    }

    /// Puts `piece` on `sq`, updating its square. Returns the piece that
    /// was there before.
    pub fn place(&mut self, piece: Piece, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].replace(Piece { square: sq, ..piece })
    }

    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// Square of the king of `color`, if there is one.
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(Piece::is_king)
            .map(|king| king.square)
    }

    /// Square of the king of `color`.
    ///
    /// # Panics
    ///
    /// Panics if there is no such king. A board in play always has exactly
    /// one king of each color.
    pub fn king_square(&self, color: Color) -> Square {
        self.king_of(color)
            .unwrap_or_else(|| panic!("board has no {color} king"))
    }

    /// The square a pawn skipped over with a double step on the last move.
    #[inline]
    pub fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    pub(crate) fn set_ep_square(&mut self, ep_square: Option<Square>) {
        self.ep_square = ep_square;
    }

    /// Castling sides for which the king and the respective rook of `color`
    /// are still unmoved on their home squares.
    pub fn castling_rights(&self, color: Color) -> CastlingRights {
        let mut rights = CastlingRights::empty();
        if !self.is_unmoved(CastlingSide::king_from(color), color, Role::King) {
            return rights;
        }
        for side in CastlingSide::ALL {
            if self.is_unmoved(side.rook_from(color), color, Role::Rook) {
                rights |= CastlingRights::side(side);
            }
        }
        rights
    }

    fn is_unmoved(&self, sq: Square, color: Color, role: Role) -> bool {
        matches!(
            self.piece_at(sq),
            Some(piece) if piece.color == color && piece.role == role && !piece.has_moved
        )
    }

    /// Unconditionally executes a move that has already been validated.
    ///
    /// Relocates the moving piece, removes any captured piece (including the
    /// en passant victim), moves the rook along when castling and swaps a
    /// promoting pawn for its new role. The moving piece, and the rook when
    /// castling, are marked as moved. Returns the captured piece.
    ///
    /// # Panics
    ///
    /// Panics if the piece described by the move is not on `m.from`, or if
    /// the rook is missing for a castling move.
    pub fn apply_move(&mut self, m: &Move) -> Option<Piece> {
        let moved = match self.remove(m.from) {
            Some(piece) if piece.color == m.piece.color && piece.role == m.piece.role => piece,
            found => panic!("cannot apply {m}: expected {} on {}, found {found:?}", m.piece, m.from),
        };

        self.ep_square = None;

        let captured = match m.kind {
            MoveKind::EnPassant => m.en_passant_victim().and_then(|sq| self.remove(sq)),
            MoveKind::Castle(side) => {
                let rook_from = side.rook_from(moved.color);
                let rook = self
                    .remove(rook_from)
                    .unwrap_or_else(|| panic!("cannot apply {m}: no rook on {rook_from}"));
                let rook_to = side.rook_to(moved.color);
                self.place(rook.moved_to(rook_to), rook_to);
                None
            }
            MoveKind::Normal | MoveKind::Capture | MoveKind::Promotion(_) => self.remove(m.to),
        };

        if moved.role == Role::Pawn && m.from.rank().abs_diff(m.to.rank()) == 2 {
            self.ep_square = m.from.offset(0, moved.color.forward());
        }

        let role = m.promotion().unwrap_or(moved.role);
        self.place(
            Piece {
                role,
                ..moved.moved_to(m.to)
            },
            m.to,
        );

        captured
    }

    /// The piece placement part of a FEN, e.g.
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    pub fn board_fen(&self) -> String {
        let mut fen = String::with_capacity(64);

        for rank in (0..8).rev() {
            let mut empty = 0;

            for file in 0..8 {
                let sq = Square::from_coords(file, rank).expect("on board");
                match self.piece_at(sq) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        fen.push(piece.char());
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }

            if rank > 0 {
                fen.push('/');
            }
        }

        fen
    }

    /// Parses the piece placement part of a FEN.
    ///
    /// Pawns off their starting rank are marked as moved. All other pieces
    /// are considered unmoved.
    pub fn from_board_fen(board_fen: &str) -> Option<Board> {
        let mut board = Board::empty();
        let mut rank = 7;
        let mut file = 0;

        for ch in board_fen.chars() {
            match ch {
                '/' => {
                    if file != 8 || rank == 0 {
                        return None;
                    }
                    file = 0;
                    rank -= 1;
                }
                '1'..='8' => {
                    file += ch as u8 - b'0';
                    if file > 8 {
                        return None;
                    }
                }
                _ => {
                    let role = Role::from_char(ch)?;
                    let color = Color::from_white(ch.is_ascii_uppercase());
                    let sq = Square::from_coords(file, rank)?;
                    let mut piece = role.of(color, sq);
                    piece.has_moved = role == Role::Pawn && rank != pawn_rank(color);
                    board.place(piece, sq);
                    file += 1;
                }
            }
        }

        if rank == 0 && file == 8 {
            Some(board)
        } else {
            None
        }
    }
}

fn pawn_rank(color: Color) -> u8 {
    color.fold(1, 6)
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.board_fen())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let sq = Square::from_coords(file, rank).expect("on board");
                f.write_char(self.piece_at(sq).map_or('.', Piece::char))?;
                f.write_char(if file < 7 { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal(board: &Board, from: Square, to: Square) -> Move {
        let piece = board.piece_at(from).expect("piece on from");
        Move {
            piece,
            from,
            to,
            capture: board.piece_at(to).map(|p| p.role),
            kind: if board.is_occupied(to) {
                MoveKind::Capture
            } else {
                MoveKind::Normal
            },
        }
    }

    #[test]
    fn test_piece_at() {
        let board = Board::new();
        assert_eq!(
            board.piece_at(Square::A2).map(|p| (p.color, p.role)),
            Some((Color::White, Role::Pawn))
        );
        assert_eq!(
            board.piece_at(Square::B1).map(|p| (p.color, p.role)),
            Some((Color::White, Role::Knight))
        );
        assert_eq!(board.piece_at(Square::E4), None);
        assert_eq!(board.piece_at(Square::D8).map(|p| p.square), Some(Square::D8));
    }

    #[test]
    fn test_pieces_of_order() {
        let board = Board::new();
        let squares: Vec<Square> = board.pieces_of(Color::Black).map(|p| p.square).collect();
        assert_eq!(squares.len(), 16);
        assert_eq!(squares[0], Square::A7);
        assert_eq!(squares[15], Square::H8);
    }

    #[test]
    fn test_place_remove() {
        let mut board = Board::empty();
        let rook = Role::Rook.of(Color::White, Square::A1);
        assert_eq!(board.place(rook, Square::A3), None);
        assert_eq!(board.piece_at(Square::A3).map(|p| p.square), Some(Square::A3));
        assert_eq!(board.remove(Square::A3).map(|p| p.role), Some(Role::Rook));
        assert!(!board.is_occupied(Square::A3));
    }

    #[test]
    fn test_king_square() {
        let board = Board::new();
        assert_eq!(board.king_square(Color::White), Square::E1);
        assert_eq!(board.king_square(Color::Black), Square::E8);
        assert_eq!(Board::empty().king_of(Color::White), None);
    }

    #[test]
    fn test_board_fen() {
        let board = Board::new();
        assert_eq!(board.board_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
        assert_eq!(Board::from_board_fen(&board.board_fen()), Some(board));

        let sparse = Board::from_board_fen("4k3/8/8/3P4/8/8/8/4K3").expect("valid");
        assert_eq!(sparse.board_fen(), "4k3/8/8/3P4/8/8/8/4K3");
        assert_eq!(sparse.piece_at(Square::D5).map(|p| p.has_moved), Some(true));

        assert_eq!(Board::from_board_fen("8/8/8/8/8/8/8"), None);
        assert_eq!(Board::from_board_fen("9/8/8/8/8/8/8/8"), None);
        assert_eq!(Board::from_board_fen("8/8/8/8/8/8/8/7x"), None);
    }

    #[test]
    fn test_apply_normal_and_ep_square() {
        let mut board = Board::new();
        let m = normal(&board, Square::E2, Square::E4);
        assert_eq!(board.apply_move(&m), None);
        assert_eq!(board.ep_square(), Some(Square::E3));
        let pawn = board.piece_at(Square::E4).expect("moved pawn");
        assert!(pawn.has_moved);
        assert_eq!(pawn.square, Square::E4);

        let m = normal(&board, Square::G8, Square::F6);
        board.apply_move(&m);
        assert_eq!(board.ep_square(), None);
    }

    #[test]
    fn test_apply_castle() {
        let mut board = Board::from_board_fen("r3k2r/8/8/8/8/8/8/R3K2R").expect("valid");
        let king = board.piece_at(Square::E1).expect("king");
        board.apply_move(&Move {
            piece: king,
            from: Square::E1,
            to: Square::G1,
            capture: None,
            kind: MoveKind::Castle(CastlingSide::KingSide),
        });
        assert_eq!(board.piece_at(Square::G1).map(|p| p.role), Some(Role::King));
        assert_eq!(board.piece_at(Square::F1).map(|p| p.role), Some(Role::Rook));
        assert!(board.piece_at(Square::F1).is_some_and(|p| p.has_moved));
        assert_eq!(board.piece_at(Square::H1), None);
        assert_eq!(board.castling_rights(Color::White), CastlingRights::empty());
        assert_eq!(board.castling_rights(Color::Black), CastlingRights::all());
    }

    #[test]
    fn test_apply_en_passant() {
        let mut board = Board::from_board_fen("4k3/8/8/3pP3/8/8/8/4K3").expect("valid");
        let pawn = board.piece_at(Square::E5).expect("pawn");
        let captured = board.apply_move(&Move {
            piece: pawn,
            from: Square::E5,
            to: Square::D6,
            capture: Some(Role::Pawn),
            kind: MoveKind::EnPassant,
        });
        assert_eq!(captured.map(|p| (p.color, p.role)), Some((Color::Black, Role::Pawn)));
        assert_eq!(board.piece_at(Square::D5), None);
        assert_eq!(board.piece_at(Square::D6).map(|p| p.color), Some(Color::White));
    }

    #[test]
    fn test_apply_promotion() {
        let mut board = Board::from_board_fen("1r2k3/P7/8/8/8/8/8/4K3").expect("valid");
        let pawn = board.piece_at(Square::A7).expect("pawn");
        let captured = board.apply_move(&Move {
            piece: pawn,
            from: Square::A7,
            to: Square::B8,
            capture: Some(Role::Rook),
            kind: MoveKind::Promotion(Role::Knight),
        });
        assert_eq!(captured.map(|p| p.role), Some(Role::Rook));
        let knight = board.piece_at(Square::B8).expect("promoted piece");
        assert_eq!((knight.color, knight.role), (Color::White, Role::Knight));
        assert!(knight.has_moved);
    }

    #[test]
    #[should_panic]
    fn test_apply_without_piece() {
        let mut board = Board::new();
        let ghost = Role::Knight.of(Color::White, Square::D4);
        board.apply_move(&Move {
            piece: ghost,
            from: Square::D4,
            to: Square::E6,
            capture: None,
            kind: MoveKind::Normal,
        });
    }
}
