#![no_main]
use dragboard::board::assets::Assets;
use dragboard::board::Layout;
use dragboard::Session;
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes: malformed lines are reported and skipped, gestures can move
// pieces anywhere but never create or lose one.
fuzz_target!(|data: &[u8]| {
    let mut input = data;
    let mut output = Vec::new();
    let layout = Layout::starting();
    let mut session = Session::new(layout, Assets::default(), &mut input, &mut output);
    session.run().unwrap();
    let board = session.board();
    assert_eq!(board.piece_count(), 32);
    assert_eq!(
        board.cells().iter().map(|cell| cell.images().len()).sum::<usize>(),
        32
    );
});
