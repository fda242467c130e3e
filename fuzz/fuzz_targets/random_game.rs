#![no_main]

use chess_rules::{GameState, PlayError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut game = GameState::new();

    for &byte in data {
        let moves = game.legal_moves();
        if moves.is_empty() {
            assert!(game.status().is_over());
            let m = game.history().last().copied().expect("moves were played");
            assert!(matches!(game.play(m), Err(PlayError::GameOver { .. })));
            break;
        }

        let m = moves[usize::from(byte) % moves.len()];
        let before = game.turn();
        game.play(m).expect("legal move");
        assert_ne!(game.turn(), before);
    }
});
