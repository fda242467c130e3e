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

//! Chess rules for two players: legal moves, check, checkmate and
//! stalemate, castling, en passant and promotion.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use chess_rules::GameState;
//!
//! let game = GameState::new();
//! let legals = game.legal_moves();
//! assert_eq!(legals.len(), 20);
//! ```
//!
//! Move a piece:
//!
//! ```
//! # use chess_rules::GameState;
//! use chess_rules::{Color, Square};
//!
//! let mut game = GameState::new();
//!
//! // 1. e4
//! let pawn = game.board().piece_at(Square::E2).expect("pawn");
//! game.attempt_move(&pawn, Square::E4)?;
//! assert_eq!(game.turn(), Color::Black);
//! # Ok::<_, chess_rules::PlayError>(())
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! # use chess_rules::GameState;
//! use chess_rules::GameStatus;
//!
//! # let game = GameState::new();
//! assert!(!game.is_check());
//! assert_eq!(game.status(), GameStatus::Ongoing);
//! assert!(!game.status().is_over());
//! ```
//!
//! Positions can be set up from and written to [FEN](fen). Front ends that
//! work with clicks can use [`select::Selection`].
//!
//! # Logging
//!
//! Played moves and status changes are logged at `debug` level, rejected
//! commands at `trace` level, using [`tracing`](https://docs.rs/tracing).
//! No subscriber is installed by this crate.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   [`Square`], [`Color`] and [`fen::Fen`].

#![doc(html_root_url = "https://docs.rs/chess-rules/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod bitboard;
mod board;
mod castling_side;
mod color;
mod game;
mod m;
mod role;
mod square;
mod types;

pub mod attacks;
pub mod fen;
pub mod movegen;
pub mod perft;
pub mod select;

pub use crate::{
    bitboard::Bitboard,
    board::Board,
    castling_side::{CastlingRights, CastlingSide},
    color::{ByColor, Color, ParseColorError},
    game::{GameState, GameStatus, PlayError, PositionError, PositionErrorKinds},
    m::{Move, MoveKind, MoveList},
    role::Role,
    square::{ParseSquareError, Square},
    types::Piece,
};
