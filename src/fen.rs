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

//! Parse and write Forsyth-Edwards-Notation.
//!
//! # Examples
//!
//! Parse a FEN and set up a game:
//!
//! ```
//! use chess_rules::{fen::Fen, GameState};
//!
//! let fen: Fen = "r1bqkbnr/ppp2Qpp/2np4/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4".parse()?;
//! let game = fen.into_game()?;
//! assert!(game.status().is_over());
//!
//! # #[derive(Debug)] struct CommonError;
//! # impl From<chess_rules::fen::ParseFenError> for CommonError { fn from(_: chess_rules::fen::ParseFenError) -> Self { Self } }
//! # impl From<chess_rules::PositionError> for CommonError { fn from(_: chess_rules::PositionError) -> Self { Self } }
//! # Ok::<_, CommonError>(())
//! ```
//!
//! Write a FEN:
//!
//! ```
//! use chess_rules::GameState;
//!
//! let game = GameState::new();
//! assert_eq!(
//!     game.to_fen().to_string(),
//!     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
//! );
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{
    Board, ByColor, CastlingRights, CastlingSide, Color, GameState, Piece, PositionError,
    PositionErrorKinds, Role, Square,
};

/// Errors that can occur when parsing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
    TooManyFields,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid ep square in fen",
            ParseFenError::InvalidHalfmoveClock => "invalid halfmove clock in fen",
            ParseFenError::InvalidFullmoves => "invalid fullmove part in fen",
            ParseFenError::TooManyFields => "too many fields in fen",
        })
    }
}

impl Error for ParseFenError {}

/// A parsed FEN.
///
/// Fields after the board may be omitted. They default to `w - - 0 1`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fen {
    pub board: Board,
    pub turn: Color,
    pub castling: ByColor<CastlingRights>,
    pub ep_square: Option<Square>,
    pub halfmoves: u32,
    pub fullmoves: u32,
}

impl Default for Fen {
    fn default() -> Fen {
        Fen {
            board: Board::new(),
            turn: Color::White,
            castling: ByColor::new_with(|_| CastlingRights::all()),
            ep_square: None,
            halfmoves: 0,
            fullmoves: 1,
        }
    }
}

impl Fen {
    pub fn empty() -> Fen {
        Fen {
            board: Board::empty(),
            turn: Color::White,
            castling: ByColor::default(),
            ep_square: None,
            halfmoves: 0,
            fullmoves: 1,
        }
    }

    /// Captures the current position of a game.
    pub fn from_game(game: &GameState) -> Fen {
        let board = game.board();
        Fen {
            board: board.clone(),
            turn: game.turn(),
            castling: ByColor::new_with(|color| board.castling_rights(color)),
            ep_square: board.ep_square(),
            halfmoves: game.halfmoves(),
            fullmoves: game.fullmoves(),
        }
    }

    /// Validates the position and sets up a game from it.
    ///
    /// # Errors
    ///
    /// Errors if the position is not legal, see [`PositionError`].
    pub fn into_game(self) -> Result<GameState, PositionError> {
        GameState::from_fen(self)
    }

    pub fn from_ascii(fen: &[u8]) -> Result<Fen, ParseFenError> {
        let fen = std::str::from_utf8(fen).map_err(|_| ParseFenError::InvalidBoard)?;
        let mut parts = fen.split_ascii_whitespace();

        let board = parts
            .next()
            .and_then(Board::from_board_fen)
            .ok_or(ParseFenError::InvalidBoard)?;

        let turn = match parts.next() {
            Some(part) => match part.as_bytes() {
                &[ch] => Color::from_char(char::from(ch)).ok_or(ParseFenError::InvalidTurn)?,
                _ => return Err(ParseFenError::InvalidTurn),
            },
            None => Color::White,
        };

        let castling = match parts.next() {
            Some(part) => parse_castling(&board, part)?,
            None => ByColor::default(),
        };

        let ep_square = match parts.next() {
            Some("-") | None => None,
            Some(part) => Some(part.parse().map_err(|_| ParseFenError::InvalidEpSquare)?),
        };

        let halfmoves = match parts.next() {
            Some(part) => {
                btoi::btou(part.as_bytes()).map_err(|_| ParseFenError::InvalidHalfmoveClock)?
            }
            None => 0,
        };

        let fullmoves = match parts.next() {
            Some(part) => btoi::btou::<u32>(part.as_bytes())
                .map_err(|_| ParseFenError::InvalidFullmoves)?
                .max(1),
            None => 1,
        };

        if parts.next().is_some() {
            return Err(ParseFenError::TooManyFields);
        }

        Ok(Fen {
            board,
            turn,
            castling,
            ep_square,
            halfmoves,
            fullmoves,
        })
    }
}

fn parse_castling(board: &Board, part: &str) -> Result<ByColor<CastlingRights>, ParseFenError> {
    let mut castling = ByColor::<CastlingRights>::default();
    if part == "-" {
        return Ok(castling);
    }

    for ch in part.chars() {
        let color = Color::from_white(ch.is_ascii_uppercase());
        let side = match ch.to_ascii_lowercase() {
            'k' => CastlingSide::KingSide,
            'q' => CastlingSide::QueenSide,
            _ => return Err(ParseFenError::InvalidCastling),
        };
        if !board.castling_rights(color).has(side) || castling[color].has(side) {
            return Err(ParseFenError::InvalidCastling);
        }
        castling[color] |= CastlingRights::side(side);
    }

    Ok(castling)
}

fn castling_fen(castling: &ByColor<CastlingRights>) -> String {
    let mut fen = String::with_capacity(4);
    for color in Color::ALL {
        for side in CastlingSide::ALL {
            if castling[color].has(side) {
                let ch = if side.is_king_side() { 'k' } else { 'q' };
                fen.push(color.fold(ch.to_ascii_uppercase(), ch));
            }
        }
    }
    if fen.is_empty() {
        fen.push('-');
    }
    fen
}

/// Marks kings and rooks as moved where `castling` denies a right that the
/// bare piece placement would allow.
pub(crate) fn apply_castling(
    board: &mut Board,
    castling: &ByColor<CastlingRights>,
) -> Result<(), PositionError> {
    for color in Color::ALL {
        let available = board.castling_rights(color);
        let wanted = castling[color];
        if !available.contains(wanted) {
            return Err(PositionError::new(PositionErrorKinds::INVALID_CASTLING_RIGHTS));
        }

        for side in CastlingSide::ALL {
            if available.has(side) && !wanted.has(side) {
                mark_moved(board, side.rook_from(color));
            }
        }
        if wanted.is_empty() {
            mark_moved(board, CastlingSide::king_from(color));
        }
    }
    Ok(())
}

fn mark_moved(board: &mut Board, sq: Square) {
    if let Some(piece) = board.piece_at(sq) {
        if matches!(piece.role, Role::King | Role::Rook) {
            board.place(
                Piece {
                    has_moved: true,
                    ..piece
                },
                sq,
            );
        }
    }
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Fen, ParseFenError> {
        Fen::from_ascii(fen.as_bytes())
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ",
            self.board.board_fen(),
            self.turn.char(),
            castling_fen(&self.castling)
        )?;
        match self.ep_square {
            Some(sq) => write!(f, "{sq}")?,
            None => f.write_str("-")?,
        }
        write!(f, " {} {}", self.halfmoves, self.fullmoves)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fen {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Fen {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct FenVisitor;

        impl serde::de::Visitor<'_> for FenVisitor {
            type Value = Fen;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("fen string")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(FenVisitor)
    }
}
