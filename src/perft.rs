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

//! Count legal move paths.
//!
//! # Examples
//!
//! ```
//! use chess_rules::{perft::perft, GameState};
//!
//! let game = GameState::new();
//! assert_eq!(perft(&game, 1), 20);
//! assert_eq!(perft(&game, 2), 400);
//! assert_eq!(perft(&game, 3), 8902);
//! ```

use crate::{movegen, Board, Color, GameState};

/// Counts legal move paths of a given length.
///
/// Paths with mate or stalemate are not counted unless it occurs in the final
/// position. Promotions count once, as a queen. Useful for comparing, testing
/// and debugging move generation correctness and performance.
pub fn perft(game: &GameState, depth: u32) -> u64 {
    perft_board(game.board(), game.turn(), depth)
}

fn perft_board(board: &Board, turn: Color, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }

    let moves = movegen::all_legal_moves(board, turn);

    if depth == 1 {
        moves.len() as u64
    } else {
        moves
            .iter()
            .map(|m| {
                let mut child = board.clone();
                child.apply_move(m);
                perft_board(&child, !turn, depth - 1)
            })
            .sum()
    }
}

/// Like [`perft()`], but also prints the perft of each child for debugging.
pub fn debug_perft(game: &GameState, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }

    game.legal_moves()
        .iter()
        .map(|m| {
            let mut child = game.clone();
            child.play_unchecked(*m);
            let nodes = perft(&child, depth - 1);
            println!("{m} {}: {nodes}", depth - 1);
            nodes
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    #[test]
    fn test_mate_in_final_position() {
        // Fool's mate, one move before.
        let game = "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq -"
            .parse::<Fen>()
            .expect("valid fen")
            .into_game()
            .expect("legal position");
        assert_eq!(perft(&game, 0), 1);
        assert_eq!(perft(&game, 1), 30);
    }

    #[test]
    fn test_debug_perft() {
        let game = GameState::new();
        assert_eq!(debug_perft(&game, 2), perft(&game, 2));
    }
}
