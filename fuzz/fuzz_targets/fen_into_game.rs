#![no_main]

use chess_rules::{fen::Fen, movegen};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(fen) = Fen::from_ascii(data) else {
        return;
    };
    let Ok(game) = fen.into_game() else {
        return;
    };

    for m in game.legal_moves() {
        let mut board = game.board().clone();
        board.apply_move(&m);
        assert!(!movegen::is_in_check(&board, game.turn()));
    }

    assert_eq!(game.legal_moves().is_empty(), game.status().is_over());
});
