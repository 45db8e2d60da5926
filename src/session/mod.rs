//! The session connects the board and the drag controller to a line-oriented
//! text interface: every input line is a pointer gesture or a query, every
//! gesture gets a one-line report on the output.
//!
//! [`Session::run`] is the "main loop" of the binary. The drag state lives in
//! that loop and is handed to the controller with every gesture.
//!
//! Input errors (unknown commands, malformed squares, lines that are not
//! UTF-8) are reported on the output and the loop goes on. Only I/O errors end
//! it early.

use std::io::{BufRead, Write};

use crate::board::assets::Assets;
use crate::board::core::Square;
use crate::board::{Board, ImageId, Layout};
use crate::drag::{DragEvent, DragState, DropTarget, Effect};
use crate::session::command::{Command, HELP};

mod command;

/// Owns the board and handles the commands read from the input.
pub struct Session<'a, R: BufRead, W: Write> {
    layout: Layout,
    assets: Assets,
    board: Board,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// Creates a session with a board built from the given layout and assets.
    #[must_use]
    pub fn new(layout: Layout, assets: Assets, input: &'a mut R, output: &'a mut W) -> Self {
        let board = Board::new(&layout, &assets);
        Self {
            layout,
            assets,
            board,
            input,
            output,
        }
    }

    /// Board in its current state.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Reads the input until `quit` or the end of the stream and executes the
    /// commands.
    ///
    /// # Errors
    ///
    /// Reading the input or writing the output failed.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut state = DragState::Idle;
        let mut bytes = Vec::new();
        loop {
            bytes.clear();
            if self.input.read_until(b'\n', &mut bytes)? == 0 {
                break;
            }
            let line = match std::str::from_utf8(&bytes) {
                Ok(line) => line,
                Err(e) => {
                    log::debug!("rejected non-UTF-8 input: {bytes:?}");
                    writeln!(self.output, "error: input is not valid UTF-8: {e}")?;
                    continue;
                },
            };
            let command = match Command::parse(line) {
                Ok(command) => command,
                Err(e) => {
                    log::debug!("rejected input {:?}: {e:#}", line.trim_end());
                    writeln!(self.output, "error: {e:#}")?;
                    continue;
                },
            };
            match command {
                Command::Drag(square) => state = self.handle_drag(state, square)?,
                Command::Over(square) => {
                    let target = self.target(square);
                    state = self.handle_gesture(state, DragEvent::Over(target))?;
                },
                Command::Drop(square) => {
                    let target = self.target(square);
                    state = self.handle_gesture(state, DragEvent::Drop(target))?;
                },
                Command::DropCell(square) => {
                    let target = DropTarget::Cell(square);
                    state = self.handle_gesture(state, DragEvent::Drop(target))?;
                },
                Command::End => state = self.handle_gesture(state, DragEvent::End)?,
                Command::Board => writeln!(self.output, "{:?}", self.board)?,
                Command::Cells => self.handle_cells()?,
                Command::State => writeln!(self.output, "{state}")?,
                Command::Layout => writeln!(self.output, "{}", self.board.to_layout())?,
                Command::Reset => {
                    self.board = Board::new(&self.layout, &self.assets);
                    state = DragState::Idle;
                    writeln!(self.output, "board reset")?;
                },
                Command::Help => writeln!(self.output, "{HELP}")?,
                Command::Quit => break,
                Command::Empty => {},
            }
        }
        self.output.flush()?;
        Ok(())
    }

    /// The pointer lands on the top-most image of a cell, or on the cell
    /// itself when it is empty.
    fn target(&self, square: Square) -> DropTarget {
        match self.board.top(square) {
            Some(image) => DropTarget::Image(image),
            None => DropTarget::Cell(square),
        }
    }

    /// Drag can only start on an image: an empty cell has nothing to grab.
    fn handle_drag(&mut self, state: DragState, square: Square) -> anyhow::Result<DragState> {
        match self.board.top(square) {
            Some(image) => self.handle_gesture(state, DragEvent::Start(image)),
            None => {
                writeln!(self.output, "ignored: cell {square} is empty")?;
                Ok(state)
            },
        }
    }

    fn handle_gesture(&mut self, state: DragState, event: DragEvent) -> anyhow::Result<DragState> {
        let (next, effect) = state.apply(event, &mut self.board);
        let report = self.describe(effect);
        writeln!(self.output, "{report}")?;
        Ok(next)
    }

    fn handle_cells(&mut self) -> anyhow::Result<()> {
        let mut listing = String::new();
        self.board.write_cells(&mut listing)?;
        write!(self.output, "{listing}")?;
        Ok(())
    }

    /// Same as [`Effect`]'s `Display` but names images by their piece code.
    fn describe(&self, effect: Effect) -> String {
        let code = |image: ImageId| match self.board.image(image) {
            Some(image) => image.code().to_string(),
            None => image.to_string(),
        };
        match effect {
            Effect::Picked(image) => match self.board.locate(image) {
                Some(square) => format!("picked {} from {square}", code(image)),
                None => effect.to_string(),
            },
            Effect::Moved { image, from, to } => {
                format!("moved {} from {from} to {to}", code(image))
            },
            Effect::Stacked { image, from, to } => {
                format!("stacked {} from {from} onto {to}", code(image))
            },
            Effect::DropAllowed | Effect::Cancelled | Effect::Ignored(_) => effect.to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run_bytes(mut input: &[u8]) -> String {
        let mut output = Vec::new();
        let layout = Layout::starting();
        let mut session = Session::new(layout, Assets::default(), &mut input, &mut output);
        session.run().unwrap();
        String::from_utf8(output).unwrap()
    }

    fn run(script: &str) -> String {
        run_bytes(script.as_bytes())
    }

    #[test]
    fn move_pawn() {
        assert_eq!(
            run("drag e2\nover e4\ndrop e4\nstate\n"),
            "picked wP from e2\ndrop allowed\nmoved wP from e2 to e4\nidle\n"
        );
    }

    #[test]
    fn stack_pieces() {
        assert_eq!(
            run("drag d1\nover d8\ndrop d8\nd\n"),
            "picked wQ from d1\n\
             drop allowed\n\
             stacked wQ from d1 onto d8\n\
             r n b Q+k b n r\n\
             p p p p p p p p\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             P P P P P P P P\n\
             R N B . K B N R\n"
        );
    }

    #[test]
    fn drop_piece_stacks_too() {
        assert_eq!(
            run("drag d1\ndrop piece d8\n"),
            "picked wQ from d1\nstacked wQ from d1 onto d8\n"
        );
    }

    #[test]
    fn drop_piece_on_empty_cell() {
        assert_eq!(
            run("drag b1\ndrop piece c3\n"),
            "picked wN from b1\nmoved wN from b1 to c3\n"
        );
    }

    #[test]
    fn occupied_cell_container() {
        assert_eq!(
            run("drag a1\ndrop cell a2\nstate\n"),
            "picked wR from a1\nignored: cell a2 is occupied\nidle\n"
        );
    }

    #[test]
    fn drag_state_is_reported() {
        assert_eq!(
            run("drag 8\nstate\nend\nstate\n"),
            "picked wP from a2\ndragging #8\ndrag cancelled\nidle\n"
        );
    }

    #[test]
    fn empty_cells_can_not_be_dragged() {
        assert_eq!(run("drag e4\nstate\n"), "ignored: cell e4 is empty\nidle\n");
    }

    #[test]
    fn errors_do_not_stop_the_loop() {
        assert_eq!(
            run("fly e2\ndrop\n\nstate\n"),
            "error: unknown command: fly\n\
             error: expected `drop [piece|cell] <square>`, got `drop`\n\
             idle\n"
        );
    }

    #[test]
    fn invalid_utf8_is_reported() {
        let output = run_bytes(b"\xff\xfe\nstate\ndrag e2\n\x80\ndrop e4\n");
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("error: input is not valid UTF-8"));
        assert_eq!(lines[1], "idle");
        assert_eq!(lines[2], "picked wP from e2");
        assert!(lines[3].starts_with("error: input is not valid UTF-8"));
        assert_eq!(lines[4], "moved wP from e2 to e4");
    }

    #[test]
    fn reset_restores_layout() {
        let output = run("drag e2\ndrop e4\nreset\nlayout\n");
        assert_eq!(
            output.lines().skip(3).collect::<Vec<_>>(),
            Layout::starting().to_string().lines().collect::<Vec<_>>()
        );
        assert_eq!(output.lines().nth(2), Some("board reset"));
    }

    #[test]
    fn quit_stops_reading() {
        assert_eq!(run("state\nquit\nstate\n"), "idle\n");
    }

    #[test]
    fn cells_listing() {
        let output = run("cells\n");
        assert_eq!(output.lines().count(), 64);
        assert_eq!(output.lines().nth(63), Some("h8 light bR#63=pieces/bR.png"));
    }
}
