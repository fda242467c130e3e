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

use std::{error::Error, fmt};

use arrayvec::ArrayVec;
use bitflags::bitflags;
use tracing::{debug, trace};

use crate::{
    fen::{apply_castling, Fen},
    movegen, Board, CastlingSide, Color, Move, MoveKind, MoveList, Piece, Role, Square,
};

/// Whether the game is still running, and how it ended otherwise.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is in check and has no legal moves.
    Checkmate {
        winner: Color,
    },
    /// The side to move is not in check but has no legal moves.
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }

    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner),
            GameStatus::Ongoing | GameStatus::Stalemate => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GameStatus::Ongoing => f.write_str("ongoing"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => f.write_str("stalemate"),
        }
    }
}

/// Error when a command is rejected. The game is left unchanged.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlayError {
    /// The game already ended in checkmate or stalemate.
    GameOver { status: GameStatus },
    /// The given piece is not on the board as described.
    NoSuchPiece { square: Square },
    /// It is not the turn of the given color.
    OutOfTurn { color: Color },
    IllegalMove { from: Square, to: Square },
    CastlingUnavailable { color: Color, side: CastlingSide },
    /// Pawns can not promote to pawns or kings.
    InvalidPromotion { role: Role },
    /// The last move was not a promotion landing on the given square.
    NoPendingPromotion { square: Square },
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PlayError::GameOver { status } => write!(f, "game is over ({status})"),
            PlayError::NoSuchPiece { square } => write!(f, "no such piece on {square}"),
            PlayError::OutOfTurn { color } => write!(f, "not {color}'s turn"),
            PlayError::IllegalMove { from, to } => write!(f, "illegal move {from}-{to}"),
            PlayError::CastlingUnavailable { color, side } => write!(
                f,
                "{color} can not castle {}",
                if side.is_king_side() {
                    "king side"
                } else {
                    "queen side"
                }
            ),
            PlayError::InvalidPromotion { role } => write!(f, "can not promote to {role}"),
            PlayError::NoPendingPromotion { square } => {
                write!(f, "no pending promotion on {square}")
            }
        }
    }
}

impl Error for PlayError {}

bitflags! {
    /// Reasons for a [`GameState`] not being set up from a [`Fen`].
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
    pub struct PositionErrorKinds: u32 {
        /// There are no kings of one color.
        const MISSING_KING = 1 << 0;
        /// There is more than one king of one color.
        const TOO_MANY_KINGS = 1 << 1;
        /// There are pawns on the first or last rank.
        const PAWNS_ON_BACKRANK = 1 << 2;
        /// The en passant square does not follow a double step of an
        /// opposing pawn.
        const INVALID_EP_SQUARE = 1 << 3;
        /// The player not to move is in check.
        const OPPOSITE_CHECK = 1 << 4;
        /// A castling right is given for a king or rook that is not on its
        /// home square.
        const INVALID_CASTLING_RIGHTS = 1 << 5;
    }
}

const REASONS: [(PositionErrorKinds, &str); 6] = [
    (PositionErrorKinds::MISSING_KING, "missing king"),
    (PositionErrorKinds::TOO_MANY_KINGS, "too many kings"),
    (PositionErrorKinds::PAWNS_ON_BACKRANK, "pawns on backrank"),
    (PositionErrorKinds::INVALID_EP_SQUARE, "invalid ep square"),
    (PositionErrorKinds::OPPOSITE_CHECK, "opposite check"),
    (PositionErrorKinds::INVALID_CASTLING_RIGHTS, "invalid castling rights"),
];

/// Error when trying to set up an illegal position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionError {
    kinds: PositionErrorKinds,
}

impl PositionError {
    pub(crate) const fn new(kinds: PositionErrorKinds) -> PositionError {
        PositionError { kinds }
    }

    pub const fn kinds(&self) -> PositionErrorKinds {
        self.kinds
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal position")?;
        let mut first = true;
        for (kind, reason) in REASONS {
            if self.kinds.contains(kind) {
                f.write_str(if first { ": " } else { ", " })?;
                f.write_str(reason)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl Error for PositionError {}

/// A game of chess: the board, the side to move, the move history and the
/// game status.
///
/// All commands validate before mutating anything. A rejected command
/// returns a [`PlayError`] and leaves the game as it was.
///
/// # Examples
///
/// ```
/// use chess_rules::{GameState, GameStatus, Square};
///
/// let mut game = GameState::new();
///
/// for (from, to) in [
///     (Square::F2, Square::F3),
///     (Square::E7, Square::E5),
///     (Square::G2, Square::G4),
///     (Square::D8, Square::H4),
/// ] {
///     let piece = game.board().piece_at(from).expect("piece to move");
///     game.attempt_move(&piece, to)?;
/// }
///
/// assert!(game.is_check());
/// assert_eq!(game.status(), GameStatus::Checkmate { winner: chess_rules::Color::Black });
/// # Ok::<_, chess_rules::PlayError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameState {
    board: Board,
    turn: Color,
    history: Vec<Move>,
    status: GameStatus,
    halfmoves: u32,
    fullmoves: u32,
}

impl Default for GameState {
    fn default() -> GameState {
        GameState::new()
    }
}

impl GameState {
    /// A game in the standard starting position, white to move.
    pub fn new() -> GameState {
        GameState {
            board: Board::new(),
            turn: Color::White,
            history: Vec::new(),
            status: GameStatus::Ongoing,
            halfmoves: 0,
            fullmoves: 1,
        }
    }

    /// Sets up a game from a parsed [`Fen`].
    ///
    /// # Errors
    ///
    /// Errors if the kings are missing or duplicated, pawns stand on a back
    /// rank, the en passant square or castling rights are inconsistent with
    /// the board, or the side not to move is in check.
    pub fn from_fen(fen: Fen) -> Result<GameState, PositionError> {
        let Fen {
            mut board,
            turn,
            castling,
            ep_square,
            halfmoves,
            fullmoves,
        } = fen;

        let mut kinds = PositionErrorKinds::empty();

        for color in Color::ALL {
            match board.pieces_of(color).filter(Piece::is_king).count() {
                0 => kinds |= PositionErrorKinds::MISSING_KING,
                1 => (),
                _ => kinds |= PositionErrorKinds::TOO_MANY_KINGS,
            }
        }

        if board
            .pieces()
            .any(|p| p.role == Role::Pawn && (p.square.rank() == 0 || p.square.rank() == 7))
        {
            kinds |= PositionErrorKinds::PAWNS_ON_BACKRANK;
        }

        if let Some(ep_square) = ep_square {
            if !is_valid_ep_square(&board, turn, ep_square) {
                kinds |= PositionErrorKinds::INVALID_EP_SQUARE;
            }
        }

        if let Err(err) = apply_castling(&mut board, &castling) {
            kinds |= err.kinds();
        }

        if !kinds.intersects(PositionErrorKinds::MISSING_KING | PositionErrorKinds::TOO_MANY_KINGS)
            && movegen::is_in_check(&board, !turn)
        {
            kinds |= PositionErrorKinds::OPPOSITE_CHECK;
        }

        if !kinds.is_empty() {
            return Err(PositionError::new(kinds));
        }

        board.set_ep_square(ep_square);

        let mut game = GameState {
            board,
            turn,
            history: Vec::new(),
            status: GameStatus::Ongoing,
            halfmoves,
            fullmoves: fullmoves.max(1),
        };
        game.check_game_over();
        Ok(game)
    }

    pub fn to_fen(&self) -> Fen {
        Fen::from_game(self)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// All moves played so far, oldest first. Moves of games set up from a
    /// FEN start with an empty history.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The status as of the last command.
    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Number of half-moves since the last capture or pawn move.
    pub fn halfmoves(&self) -> u32 {
        self.halfmoves
    }

    /// Move number, starting at 1 and incremented after each black move.
    pub fn fullmoves(&self) -> u32 {
        self.fullmoves
    }

    pub fn is_check(&self) -> bool {
        movegen::is_in_check(&self.board, self.turn)
    }

    /// All legal moves of the side to move.
    pub fn legal_moves(&self) -> MoveList {
        movegen::all_legal_moves(&self.board, self.turn)
    }

    /// Legal moves of the piece on `sq`. Empty unless that piece belongs to
    /// the side to move.
    pub fn legal_moves_for(&self, sq: Square) -> MoveList {
        match self.board.piece_at(sq) {
            Some(piece) if piece.color == self.turn => movegen::legal_moves(&self.board, &piece),
            _ => MoveList::new(),
        }
    }

    pub fn castle_moves(&self) -> ArrayVec<Move, 2> {
        movegen::castle_moves(&self.board, self.turn)
    }

    /// Scans the side to move for checkmate and stalemate and updates the
    /// status accordingly.
    pub fn check_game_over(&mut self) -> GameStatus {
        let status = if movegen::has_legal_moves(&self.board, self.turn) {
            GameStatus::Ongoing
        } else if movegen::is_in_check(&self.board, self.turn) {
            GameStatus::Checkmate { winner: !self.turn }
        } else {
            GameStatus::Stalemate
        };

        if status != self.status {
            debug!(%status, turn = %self.turn, "game status changed");
            self.status = status;
        }

        status
    }

    fn ensure_ongoing(&self) -> Result<(), PlayError> {
        if self.status.is_over() {
            Err(PlayError::GameOver {
                status: self.status,
            })
        } else {
            Ok(())
        }
    }

    /// Moves `piece` to `target`.
    ///
    /// This is also how kings castle, by moving two squares towards the
    /// rook. Pawns reaching the last rank are promoted to queens, see
    /// [`GameState::promote()`] to choose another role.
    ///
    /// # Errors
    ///
    /// Rejects the move if the game is over, if `piece` is not on the board
    /// as described, if it is not the turn of its color, or if `target` is
    /// not a legal destination.
    pub fn attempt_move(&mut self, piece: &Piece, target: Square) -> Result<Move, PlayError> {
        let m = self
            .find_move(piece, target)
            .inspect_err(|err| trace!(%err, "rejected move"))?;
        self.play_unchecked(m);
        Ok(m)
    }

    fn find_move(&self, piece: &Piece, target: Square) -> Result<Move, PlayError> {
        self.ensure_ongoing()?;

        let piece = self
            .board
            .piece_at(piece.square)
            .filter(|p| p.color == piece.color && p.role == piece.role)
            .ok_or(PlayError::NoSuchPiece {
                square: piece.square,
            })?;

        if piece.color != self.turn {
            return Err(PlayError::OutOfTurn { color: piece.color });
        }

        movegen::legal_moves(&self.board, &piece)
            .into_iter()
            .find(|m| m.to == target)
            .ok_or(PlayError::IllegalMove {
                from: piece.square,
                to: target,
            })
    }

    /// Castles `color` to `side`, moving king and rook together.
    ///
    /// # Errors
    ///
    /// Rejects castling if the game is over, if it is not the turn of
    /// `color`, or if castling to `side` is not legal right now.
    pub fn attempt_castle(&mut self, color: Color, side: CastlingSide) -> Result<Move, PlayError> {
        let m = self
            .find_castle(color, side)
            .inspect_err(|err| trace!(%err, "rejected castling"))?;
        self.play_unchecked(m);
        Ok(m)
    }

    fn find_castle(&self, color: Color, side: CastlingSide) -> Result<Move, PlayError> {
        self.ensure_ongoing()?;

        if color != self.turn {
            return Err(PlayError::OutOfTurn { color });
        }

        movegen::castle_moves(&self.board, color)
            .into_iter()
            .find(|m| m.castling_side() == Some(side))
            .ok_or(PlayError::CastlingUnavailable { color, side })
    }

    /// Replaces the piece that just promoted on `sq` with `role`.
    ///
    /// Only possible directly after the promotion move, before the next
    /// move. The status is recomputed, since the new piece may give or
    /// lift check.
    ///
    /// # Errors
    ///
    /// Errors with [`PlayError::InvalidPromotion`] for pawns and kings, and
    /// with [`PlayError::NoPendingPromotion`] if the last move was not a
    /// promotion landing on `sq`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chess_rules::{fen::Fen, Role, Square};
    ///
    /// let fen: Fen = "4k3/1P6/8/8/8/8/8/4K3 w - -".parse().expect("valid fen");
    /// let mut game = fen.into_game().expect("legal position");
    ///
    /// let pawn = game.board().piece_at(Square::B7).expect("pawn");
    /// let m = game.attempt_move(&pawn, Square::B8)?;
    /// assert_eq!(m.promotion(), Some(Role::Queen));
    ///
    /// let knight = game.promote(Square::B8, Role::Knight)?;
    /// assert_eq!(knight.role, Role::Knight);
    /// # Ok::<_, chess_rules::PlayError>(())
    /// ```
    pub fn promote(&mut self, sq: Square, role: Role) -> Result<Piece, PlayError> {
        self.replace_promoted(sq, role)
            .inspect_err(|err| trace!(%err, "rejected promotion"))
    }

    fn replace_promoted(&mut self, sq: Square, role: Role) -> Result<Piece, PlayError> {
        if !role.is_promotion_target() {
            return Err(PlayError::InvalidPromotion { role });
        }

        let pending = PlayError::NoPendingPromotion { square: sq };
        let Some(last) = self
            .history
            .last_mut()
            .filter(|m| m.is_promotion() && m.to == sq)
        else {
            return Err(pending);
        };
        let promoted = self.board.piece_at(sq).ok_or(pending)?;

        last.kind = MoveKind::Promotion(role);
        let piece = Piece {
            role,
            has_moved: true,
            ..promoted
        };
        self.board.place(piece, sq);
        debug!(square = %sq, %role, "promoted");

        self.check_game_over();
        Ok(piece)
    }

    /// Plays a move, validating it first.
    ///
    /// Unlike [`GameState::attempt_move()`], promotion moves may name any
    /// promotion role directly.
    ///
    /// # Errors
    ///
    /// Rejects the move if the game is over, if it is not the turn of the
    /// moving piece, or if it is not a legal move.
    pub fn play(&mut self, m: Move) -> Result<(), PlayError> {
        self.validate(&m)
            .inspect_err(|err| trace!(%err, "rejected move"))?;
        self.play_unchecked(m);
        Ok(())
    }

    fn validate(&self, m: &Move) -> Result<(), PlayError> {
        self.ensure_ongoing()?;

        if m.piece.color != self.turn {
            return Err(PlayError::OutOfTurn {
                color: m.piece.color,
            });
        }

        let probe = match m.kind {
            MoveKind::Promotion(role) if !role.is_promotion_target() => {
                return Err(PlayError::InvalidPromotion { role });
            }
            MoveKind::Promotion(_) => Move {
                kind: MoveKind::Promotion(Role::Queen),
                ..*m
            },
            _ => *m,
        };

        if self.legal_moves_for(m.from).contains(&probe) {
            Ok(())
        } else {
            Err(PlayError::IllegalMove {
                from: m.from,
                to: m.to,
            })
        }
    }

    /// Plays a move without checking its legality.
    ///
    /// # Panics
    ///
    /// May panic if the moving piece is not on the board. Illegal moves that
    /// do not panic leave the game in an inconsistent state.
    pub fn play_unchecked(&mut self, m: Move) {
        let captured = self.board.apply_move(&m);

        if m.is_zeroing() {
            self.halfmoves = 0;
        } else {
            self.halfmoves = self.halfmoves.saturating_add(1);
        }

        if self.turn.is_black() {
            self.fullmoves = self.fullmoves.saturating_add(1);
        }

        self.turn = !self.turn;
        self.history.push(m);
        debug!(mv = %m, captured = ?captured.map(|p| p.role), "played move");

        self.check_game_over();
    }
}

fn is_valid_ep_square(board: &Board, turn: Color, ep_square: Square) -> bool {
    // The pawn that just moved stands one square beyond, its origin one
    // square behind, both seen from the side to move.
    let forward = turn.forward();
    ep_square.rank() == (!turn).fold(2, 5)
        && !board.is_occupied(ep_square)
        && ep_square
            .offset(0, forward)
            .is_some_and(|origin| !board.is_occupied(origin))
        && ep_square
            .offset(0, -forward)
            .and_then(|sq| board.piece_at(sq))
            .is_some_and(|pawn| pawn.role == Role::Pawn && pawn.color != turn)
}
