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

//! Move generation and attack detection.
//!
//! All functions take the [`Board`] explicitly and never mutate it. Legality
//! is decided by applying each candidate to a copy of the board and checking
//! that the mover's king is not attacked afterwards.
//!
//! # Examples
//!
//! ```
//! use chess_rules::{movegen, Board, Color, Square};
//!
//! let board = Board::new();
//! let knight = board.piece_at(Square::G1).expect("knight");
//!
//! let moves = movegen::legal_moves(&board, &knight);
//! let targets: Vec<_> = moves.iter().map(|m| m.to).collect();
//! assert_eq!(targets, [Square::F3, Square::H3]);
//!
//! assert!(!movegen::is_in_check(&board, Color::White));
//! assert_eq!(movegen::all_legal_moves(&board, Color::Black).len(), 20);
//! ```

use arrayvec::ArrayVec;

use crate::{
    attacks, Bitboard, Board, CastlingSide, Color, Move, MoveKind, MoveList, Piece, Role, Square,
};

/// Moves that follow the movement rules of `piece`, without regard for the
/// safety of its own king. Does not include castling.
///
/// Sliding pieces stop at the first occupied square, which is only included
/// when it holds an opposing piece. Pawns that reach the farthest rank
/// produce a single [`MoveKind::Promotion`] to a queen.
pub fn pseudo_legal_moves(board: &Board, piece: &Piece) -> MoveList {
    let mut moves = MoveList::new();
    match piece.role {
        Role::Pawn => gen_pawn(board, piece, &mut moves),
        Role::Knight | Role::King => gen_stepper(board, piece, &mut moves),
        Role::Bishop | Role::Rook | Role::Queen => gen_slider(board, piece, &mut moves),
    }
    moves
}

fn gen_stepper(board: &Board, piece: &Piece, moves: &mut MoveList) {
    for to in piece.pattern() {
        match board.piece_at(to) {
            Some(target) if target.is_friend_of(piece) => (),
            target => moves.push(normal_or_capture(piece, to, target)),
        }
    }
}

fn gen_slider(board: &Board, piece: &Piece, moves: &mut MoveList) {
    for &direction in attacks::directions(piece.role) {
        for to in attacks::ray(piece.square, direction) {
            match board.piece_at(to) {
                None => moves.push(normal_or_capture(piece, to, None)),
                Some(target) => {
                    if !target.is_friend_of(piece) {
                        moves.push(normal_or_capture(piece, to, Some(target)));
                    }
                    break;
                }
            }
        }
    }
}

fn gen_pawn(board: &Board, piece: &Piece, moves: &mut MoveList) {
    let forward = piece.color.forward();

    if let Some(single) = piece.square.offset(0, forward) {
        if !board.is_occupied(single) {
            moves.push(pawn_move(piece, single, None));

            if !piece.has_moved {
                if let Some(double) = single.offset(0, forward) {
                    if !board.is_occupied(double) {
                        moves.push(pawn_move(piece, double, None));
                    }
                }
            }
        }
    }

    for to in attacks::pawn_attacks(piece.color, piece.square) {
        match board.piece_at(to) {
            Some(target) if !target.is_friend_of(piece) => {
                moves.push(pawn_move(piece, to, Some(target.role)));
            }
            Some(_) => (),
            None => {
                if board.ep_square() == Some(to) && has_ep_victim(board, piece, to) {
                    moves.push(Move {
                        piece: *piece,
                        from: piece.square,
                        to,
                        capture: Some(Role::Pawn),
                        kind: MoveKind::EnPassant,
                    });
                }
            }
        }
    }
}

fn has_ep_victim(board: &Board, pawn: &Piece, to: Square) -> bool {
    Square::from_coords(to.file(), pawn.square.rank())
        .and_then(|sq| board.piece_at(sq))
        .is_some_and(|victim| victim.role == Role::Pawn && !victim.is_friend_of(pawn))
}

fn normal_or_capture(piece: &Piece, to: Square, target: Option<Piece>) -> Move {
    Move {
        piece: *piece,
        from: piece.square,
        to,
        capture: target.map(|t| t.role),
        kind: if target.is_some() {
            MoveKind::Capture
        } else {
            MoveKind::Normal
        },
    }
}

fn pawn_move(pawn: &Piece, to: Square, capture: Option<Role>) -> Move {
    let kind = if to.rank() == pawn.color.promotion_rank() {
        MoveKind::Promotion(Role::Queen)
    } else if capture.is_some() {
        MoveKind::Capture
    } else {
        MoveKind::Normal
    };
    Move {
        piece: *pawn,
        from: pawn.square,
        to,
        capture,
        kind,
    }
}

/// Squares attacked by `piece`.
///
/// Pawns attack both forward diagonals, whether or not anything stands
/// there, and never attack straight ahead. Sliding attacks stop at the first
/// occupied square. Squares holding pieces of the same color count as
/// attacked (defended).
pub fn attacks(board: &Board, piece: &Piece) -> Bitboard {
    match piece.role {
        Role::Pawn => attacks::pawn_attacks(piece.color, piece.square),
        Role::Knight => attacks::knight_pattern(piece.square),
        Role::King => attacks::king_pattern(piece.square),
        Role::Bishop | Role::Rook | Role::Queen => {
            let mut attacked = Bitboard::EMPTY;
            for &direction in attacks::directions(piece.role) {
                for sq in attacks::ray(piece.square, direction) {
                    attacked.add(sq);
                    if board.is_occupied(sq) {
                        break;
                    }
                }
            }
            attacked
        }
    }
}

/// Tests if any piece of color `by` attacks `sq`.
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|piece| attacks(board, &piece).contains(sq))
}

pub fn is_in_check(board: &Board, color: Color) -> bool {
    is_square_attacked(board, board.king_square(color), !color)
}

fn is_safe(board: &Board, m: &Move) -> bool {
    let mut after = board.clone();
    after.apply_move(m);
    !is_in_check(&after, m.piece.color)
}

/// Legal moves of `piece`, including castling if `piece` is a king that can
/// castle.
pub fn legal_moves(board: &Board, piece: &Piece) -> MoveList {
    let mut moves = pseudo_legal_moves(board, piece);
    moves.retain(|m| is_safe(board, m));
    if piece.is_king() {
        moves.extend(
            castle_moves(board, piece.color)
                .into_iter()
                .filter(|m| m.from == piece.square),
        );
    }
    moves
}

/// Legal moves of all pieces of `color`, in square order of the moving
/// pieces.
pub fn all_legal_moves(board: &Board, color: Color) -> MoveList {
    let mut moves = MoveList::new();
    for piece in board.pieces_of(color) {
        moves.extend(legal_moves(board, &piece));
    }
    moves
}

pub fn has_legal_moves(board: &Board, color: Color) -> bool {
    // Castling is never the only legal move: it requires the king's step
    // onto the transit square to be legal as well.
    board.pieces_of(color).any(|piece| {
        pseudo_legal_moves(board, &piece)
            .iter()
            .any(|m| is_safe(board, m))
    })
}

/// Castling moves available to `color`.
///
/// Requires the king and the respective rook to be unmoved on their home
/// squares, the squares between them to be empty, and the king's start,
/// transit and destination squares to be unattacked.
pub fn castle_moves(board: &Board, color: Color) -> ArrayVec<Move, 2> {
    let mut moves = ArrayVec::new();

    let rights = board.castling_rights(color);
    if rights.is_empty() || is_in_check(board, color) {
        return moves;
    }

    let king_from = CastlingSide::king_from(color);
    let Some(king) = board.piece_at(king_from) else {
        return moves;
    };

    for side in CastlingSide::ALL {
        if rights.has(side)
            && side.between(color).all(|sq| !board.is_occupied(sq))
            && side
                .king_path(color)
                .iter()
                .all(|&sq| !is_square_attacked(board, sq, !color))
        {
            moves.push(Move {
                piece: king,
                from: king_from,
                to: side.king_to(color),
                capture: None,
                kind: MoveKind::Castle(side),
            });
        }
    }

    moves
}

pub fn is_checkmate(board: &Board, color: Color) -> bool {
    is_in_check(board, color) && !has_legal_moves(board, color)
}

pub fn is_stalemate(board: &Board, color: Color) -> bool {
    !is_in_check(board, color) && !has_legal_moves(board, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(board_fen: &str) -> Board {
        Board::from_board_fen(board_fen).expect("valid board fen")
    }

    fn targets(moves: &[Move]) -> Bitboard {
        moves.iter().map(|m| m.to).collect()
    }

    #[test]
    fn test_slider_blocked() {
        let board = board("4k3/8/8/8/1p6/8/8/R3K3");
        let rook = board.piece_at(Square::A1).expect("rook");
        let moves = pseudo_legal_moves(&board, &rook);
        // a2-a8 upwards, b1-d1 sideways
        assert_eq!(moves.len(), 10);
        assert!(moves.iter().all(|m| !m.is_capture()));

        let board = self::board("4k3/8/8/8/8/8/8/R2pK3");
        let rook = board.piece_at(Square::A1).expect("rook");
        let moves = pseudo_legal_moves(&board, &rook);
        let capture = moves.iter().find(|m| m.to == Square::D1).expect("capture");
        assert_eq!(capture.capture, Some(Role::Pawn));
        assert_eq!(capture.kind, MoveKind::Capture);
    }

    #[test]
    fn test_pawn_pushes() {
        let start = Board::new();
        let pawn = start.piece_at(Square::E2).expect("pawn");
        assert_eq!(
            targets(&pseudo_legal_moves(&start, &pawn)),
            [Square::E3, Square::E4].into_iter().collect()
        );

        let blocked = board("4k3/8/8/8/8/4n3/4P3/4K3");
        let pawn = blocked.piece_at(Square::E2).expect("pawn");
        assert!(pseudo_legal_moves(&blocked, &pawn).is_empty());

        let half_blocked = board("4k3/8/8/8/4n3/8/4P3/4K3");
        let pawn = half_blocked.piece_at(Square::E2).expect("pawn");
        assert_eq!(
            targets(&pseudo_legal_moves(&half_blocked, &pawn)),
            Bitboard::from_square(Square::E3)
        );
    }

    #[test]
    fn test_pawn_captures_only_opponents() {
        let board = board("4k3/8/8/8/8/3p1N2/4P3/4K3");
        let pawn = board.piece_at(Square::E2).expect("pawn");
        let moves = pseudo_legal_moves(&board, &pawn);
        assert!(moves.iter().any(|m| m.to == Square::D3 && m.is_capture()));
        assert!(moves.iter().all(|m| m.to != Square::F3));
    }

    #[test]
    fn test_promotion() {
        let board = board("1n2k3/P7/8/8/8/8/8/4K3");
        let pawn = board.piece_at(Square::A7).expect("pawn");
        let moves = pseudo_legal_moves(&board, &pawn);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|m| m.promotion() == Some(Role::Queen)));
        assert!(moves.iter().any(|m| m.to == Square::B8 && m.capture == Some(Role::Knight)));
    }

    #[test]
    fn test_en_passant() {
        let mut board = board("4k3/3p4/8/4P3/8/8/8/4K3");
        let black_pawn = board.piece_at(Square::D7).expect("pawn");
        board.apply_move(&Move {
            piece: black_pawn,
            from: Square::D7,
            to: Square::D5,
            capture: None,
            kind: MoveKind::Normal,
        });
        assert_eq!(board.ep_square(), Some(Square::D6));

        let white_pawn = board.piece_at(Square::E5).expect("pawn");
        let moves = legal_moves(&board, &white_pawn);
        let ep = moves.iter().find(|m| m.is_en_passant()).expect("en passant");
        assert_eq!(ep.to, Square::D6);
        assert_eq!(ep.capture, Some(Role::Pawn));
    }

    #[test]
    fn test_en_passant_exposing_king() {
        // Capturing en passant would clear the fifth rank for the rook.
        let mut board = board("8/8/8/KPp4r/8/8/8/4k3");
        board.set_ep_square(Some(Square::C6));
        let pawn = board.piece_at(Square::B5).expect("pawn");
        assert!(pseudo_legal_moves(&board, &pawn).iter().any(Move::is_en_passant));
        assert!(!legal_moves(&board, &pawn).iter().any(Move::is_en_passant));
    }

    #[test]
    fn test_attacks() {
        let board = board("4k3/8/8/8/8/8/3P4/4K3");
        let pawn = board.piece_at(Square::D2).expect("pawn");
        assert_eq!(
            attacks(&board, &pawn),
            [Square::C3, Square::E3].into_iter().collect()
        );

        // The king defends the pawn.
        assert!(is_square_attacked(&board, Square::D2, Color::White));
        assert!(!is_square_attacked(&board, Square::D3, Color::White));
        assert!(is_square_attacked(&board, Square::E3, Color::White));
    }

    #[test]
    fn test_pinned_piece() {
        let board = board("4r1k1/8/8/8/8/8/4B3/4K3");
        let bishop = board.piece_at(Square::E2).expect("bishop");
        assert!(!pseudo_legal_moves(&board, &bishop).is_empty());
        assert!(legal_moves(&board, &bishop).is_empty());
    }

    #[test]
    fn test_king_cannot_capture_defended() {
        let board = board("4k3/8/8/8/8/2b5/3r4/4K3");
        let king = board.piece_at(Square::E1).expect("king");
        let moves = legal_moves(&board, &king);
        // The bishop defends d2, the rook covers d1, e2 and f2.
        assert_eq!(targets(&moves), Bitboard::from_square(Square::F1));
    }

    #[test]
    fn test_castle_moves() {
        let board = board("r3k2r/8/8/8/8/8/8/R3K2R");
        assert_eq!(castle_moves(&board, Color::White).len(), 2);
        assert_eq!(castle_moves(&board, Color::Black).len(), 2);

        let king = board.piece_at(Square::E1).expect("king");
        let moves = legal_moves(&board, &king);
        assert!(moves.iter().any(|m| m.to == Square::G1 && m.is_castle()));
        assert!(moves.iter().any(|m| m.to == Square::C1 && m.is_castle()));
    }

    #[test]
    fn test_castle_blocked_or_attacked() {
        // Knight between king and rook on the queen side.
        let board = board("4k3/8/8/8/8/8/8/RN2K2R");
        let moves = castle_moves(&board, Color::White);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].castling_side(), Some(CastlingSide::KingSide));

        // Bishop attacks f1.
        let board = self::board("4k3/8/8/8/8/8/6b1/R3K2R");
        let moves = castle_moves(&board, Color::White);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].castling_side(), Some(CastlingSide::QueenSide));

        // b1 may be attacked, the king does not pass it.
        let board = self::board("4k3/8/8/8/8/n7/8/R3K3");
        assert_eq!(castle_moves(&board, Color::White).len(), 1);

        // Occupied by an opposing piece.
        let board = self::board("4k3/8/8/8/8/8/8/Rr2K3");
        assert!(castle_moves(&board, Color::White).is_empty());

        // In check.
        let board = self::board("4k3/8/8/8/8/8/8/R3K2r");
        assert!(is_in_check(&board, Color::White));
        assert!(castle_moves(&board, Color::White).is_empty());
    }

    #[test]
    fn test_castle_after_rook_moved() {
        let mut board = board("4k3/8/8/8/8/8/8/R3K2R");
        let mut rook = board.remove(Square::H1).expect("rook");
        rook.has_moved = true;
        board.place(rook, Square::H1);
        let moves = castle_moves(&board, Color::White);
        assert_eq!(moves.len(), 1);
        assert!(moves[0].castling_side().is_some_and(CastlingSide::is_queen_side));
    }

    #[test]
    fn test_checkmate_and_stalemate() {
        let mate = board("R5k1/5ppp/8/8/8/8/8/6K1");
        assert!(is_in_check(&mate, Color::Black));
        assert!(is_checkmate(&mate, Color::Black));
        assert!(!is_stalemate(&mate, Color::Black));

        let stalemate = board("7k/5Q2/6K1/8/8/8/8/8");
        assert!(!is_in_check(&stalemate, Color::Black));
        assert!(is_stalemate(&stalemate, Color::Black));
        assert!(!is_checkmate(&stalemate, Color::Black));

        let start = Board::new();
        assert!(has_legal_moves(&start, Color::White));
        assert!(!is_checkmate(&start, Color::White));
        assert!(!is_stalemate(&start, Color::White));
    }

    #[test]
    fn test_all_legal_moves_start() {
        let board = Board::new();
        assert_eq!(all_legal_moves(&board, Color::White).len(), 20);
        assert_eq!(all_legal_moves(&board, Color::Black).len(), 20);
    }
}
