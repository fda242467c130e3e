//! Click driven piece selection.
//!
//! A front end forwards each clicked square to [`Selection::click()`]. The
//! first click on a piece of the side to move selects it, a click on one of
//! its legal destinations plays the move.
//!
//! ```
//! use chess_rules::{
//!     select::{ClickOutcome, Selection},
//!     GameState, Square,
//! };
//!
//! let mut game = GameState::new();
//! let mut selection = Selection::default();
//!
//! assert!(matches!(selection.click(&mut game, Square::G1)?, ClickOutcome::Selected(_)));
//! assert_eq!(selection.targets().count(), 2);
//!
//! assert!(matches!(selection.click(&mut game, Square::F3)?, ClickOutcome::Played(_)));
//! assert_eq!(selection, Selection::Idle);
//! # Ok::<_, chess_rules::PlayError>(())
//! ```

use crate::{movegen, Bitboard, GameState, Move, MoveList, Piece, PlayError, Square};

/// Whether a piece is selected, together with its legal moves.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Selection {
    #[default]
    Idle,
    Selected {
        piece: Piece,
        moves: MoveList,
    },
}

/// What a click did.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ClickOutcome {
    Selected(Piece),
    Deselected,
    Played(Move),
    /// Nothing was selected and the click did not hit a piece of the side
    /// to move.
    Ignored,
}

impl Selection {
    /// Destination squares of the selected piece.
    pub fn targets(&self) -> Bitboard {
        match self {
            Selection::Idle => Bitboard::EMPTY,
            Selection::Selected { moves, .. } => moves.iter().map(|m| m.to).collect(),
        }
    }

    pub fn selected(&self) -> Option<&Piece> {
        match self {
            Selection::Idle => None,
            Selection::Selected { piece, .. } => Some(piece),
        }
    }

    /// Handles a click on `sq`.
    ///
    /// Clicking the selected piece again deselects it. Clicking one of its
    /// destinations plays the move. Clicking another piece of the side to
    /// move selects that one instead, any other square deselects.
    ///
    /// # Errors
    ///
    /// Errors with [`PlayError::GameOver`] once the game has ended. The
    /// selection is cleared in that case.
    pub fn click(&mut self, game: &mut GameState, sq: Square) -> Result<ClickOutcome, PlayError> {
        let status = game.status();
        if status.is_over() {
            *self = Selection::Idle;
            return Err(PlayError::GameOver { status });
        }

        match std::mem::take(self) {
            Selection::Idle => Ok(self.select(game, sq)),
            Selection::Selected { piece, moves } => {
                if sq == piece.square {
                    Ok(ClickOutcome::Deselected)
                } else if moves.iter().any(|m| m.to == sq) {
                    game.attempt_move(&piece, sq).map(ClickOutcome::Played)
                } else {
                    match self.select(game, sq) {
                        ClickOutcome::Ignored => Ok(ClickOutcome::Deselected),
                        outcome => Ok(outcome),
                    }
                }
            }
        }
    }

    fn select(&mut self, game: &GameState, sq: Square) -> ClickOutcome {
        match game.board().piece_at(sq) {
            Some(piece) if piece.color == game.turn() => {
                let moves = movegen::legal_moves(game.board(), &piece);
                *self = Selection::Selected { piece, moves };
                ClickOutcome::Selected(piece)
            }
            _ => ClickOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fen::Fen, Color, Role};

    #[test]
    fn test_select_and_deselect() {
        let mut game = GameState::new();
        let mut selection = Selection::default();

        assert_eq!(selection.click(&mut game, Square::E4), Ok(ClickOutcome::Ignored));
        // Black pieces can not be selected while white is to move.
        assert_eq!(selection.click(&mut game, Square::E7), Ok(ClickOutcome::Ignored));

        let outcome = selection.click(&mut game, Square::E2).expect("ongoing");
        assert!(matches!(outcome, ClickOutcome::Selected(piece) if piece.role == Role::Pawn));
        assert_eq!(selection.targets(), [Square::E3, Square::E4].into_iter().collect());

        assert_eq!(selection.click(&mut game, Square::E2), Ok(ClickOutcome::Deselected));
        assert_eq!(selection, Selection::Idle);
    }

    #[test]
    fn test_reselect() {
        let mut game = GameState::new();
        let mut selection = Selection::default();

        selection.click(&mut game, Square::E2).expect("ongoing");
        let outcome = selection.click(&mut game, Square::B1).expect("ongoing");
        assert!(matches!(outcome, ClickOutcome::Selected(piece) if piece.role == Role::Knight));
        assert_eq!(selection.selected().map(|p| p.square), Some(Square::B1));

        // An unreachable empty square deselects.
        assert_eq!(selection.click(&mut game, Square::D5), Ok(ClickOutcome::Deselected));
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_play() {
        let mut game = GameState::new();
        let mut selection = Selection::default();

        selection.click(&mut game, Square::E2).expect("ongoing");
        let outcome = selection.click(&mut game, Square::E4).expect("ongoing");
        assert!(matches!(outcome, ClickOutcome::Played(m) if m.to == Square::E4));
        assert_eq!(selection, Selection::Idle);
        assert_eq!(game.turn(), Color::Black);
    }

    #[test]
    fn test_game_over() {
        let mut game = "R5k1/5ppp/8/8/8/8/8/6K1 b - -"
            .parse::<Fen>()
            .expect("valid fen")
            .into_game()
            .expect("legal position");
        let mut selection = Selection::default();
        assert!(matches!(
            selection.click(&mut game, Square::G8),
            Err(PlayError::GameOver { .. })
        ));
        assert_eq!(selection, Selection::Idle);
    }
}
