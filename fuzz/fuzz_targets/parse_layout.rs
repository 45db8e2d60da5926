#![no_main]
use dragboard::board::assets::Assets;
use dragboard::board::{Board, Layout};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(layout) = Layout::parse(s) {
            let board = Board::new(&layout, &Assets::default());
            assert_eq!(board.piece_count(), layout.piece_count());
            assert_eq!(Layout::parse(&layout.to_string()).ok(), Some(layout));
        }
    }
});
