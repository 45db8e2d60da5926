use anyhow::{bail, Context};

use crate::board::core::Square;

/// Commands understood by [`super::Session`], one per input line.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    /// Start dragging the top-most image of the cell.
    Drag(Square),
    /// Drag over the cell.
    Over(Square),
    /// Drop where the pointer lands: the top-most image of the cell, or the
    /// cell itself when it is empty.
    Drop(Square),
    /// Drop on the cell container, even when it holds images.
    DropCell(Square),
    /// The gesture ended outside of the board.
    End,
    Board,
    Cells,
    State,
    Layout,
    Reset,
    Help,
    Quit,
    /// Blank line.
    Empty,
}

pub(super) const HELP: &str = "\
drag <sq>        start dragging the top piece of a cell
over <sq>        drag over a cell
drop <sq>        drop on a cell, stacking onto its top piece if any
drop cell <sq>   drop on the cell container only
end              drop outside of the board
board | d        print the board
cells            list every cell with its pieces
state            print the drag state
layout           print the board as a layout
reset            rebuild the board from the layout
help             print this message
quit             exit
squares are either algebraic (e2) or layout indices (0..=63)";

fn square(command: &str, argument: Option<&str>) -> anyhow::Result<Square> {
    match argument {
        Some(argument) => {
            Square::try_from(argument).with_context(|| format!("`{command}` expects a square"))
        },
        None => bail!("`{command}` expects a square"),
    }
}

fn no_arguments(command: Command, parts: &[&str]) -> anyhow::Result<Command> {
    match parts.len() {
        1 => Ok(command),
        _ => bail!("`{}` does not take arguments", parts[0]),
    }
}

fn parse_drop(parts: &[&str]) -> anyhow::Result<Command> {
    match parts {
        [_, "cell", target] => Ok(Command::DropCell(square("drop cell", Some(*target))?)),
        [_, "piece", target] | [_, target] => Ok(Command::Drop(square("drop", Some(*target))?)),
        _ => bail!("expected `drop [piece|cell] <square>`, got `{}`", parts.join(" ")),
    }
}

impl Command {
    pub(super) fn parse(input: &str) -> anyhow::Result<Self> {
        let parts: Vec<&str> = input.split_whitespace().collect();

        if parts.is_empty() {
            return Ok(Self::Empty);
        }

        match parts[0] {
            "drag" if parts.len() <= 2 => Ok(Self::Drag(square(parts[0], parts.get(1).copied())?)),
            "over" if parts.len() <= 2 => Ok(Self::Over(square(parts[0], parts.get(1).copied())?)),
            "drop" => parse_drop(&parts),
            "drag" | "over" => bail!("`{}` expects a single square", parts[0]),
            "end" => no_arguments(Self::End, &parts),
            "board" | "d" => no_arguments(Self::Board, &parts),
            "cells" => no_arguments(Self::Cells, &parts),
            "state" => no_arguments(Self::State, &parts),
            "layout" => no_arguments(Self::Layout, &parts),
            "reset" => no_arguments(Self::Reset, &parts),
            "help" => no_arguments(Self::Help, &parts),
            "quit" => no_arguments(Self::Quit, &parts),
            command => bail!("unknown command: {command}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_gestures() {
        assert_eq!(Command::parse("drag e2").unwrap(), Command::Drag(Square::E2));
        assert_eq!(Command::parse("drag 8").unwrap(), Command::Drag(Square::A2));
        assert_eq!(Command::parse("over e4").unwrap(), Command::Over(Square::E4));
        assert_eq!(Command::parse("drop e4").unwrap(), Command::Drop(Square::E4));
        assert_eq!(Command::parse("drop piece e7").unwrap(), Command::Drop(Square::E7));
        assert_eq!(
            Command::parse("drop cell 28").unwrap(),
            Command::DropCell(Square::E4)
        );
        assert_eq!(Command::parse("end").unwrap(), Command::End);
    }

    #[test]
    fn parse_queries() {
        assert_eq!(Command::parse("board").unwrap(), Command::Board);
        assert_eq!(Command::parse("d").unwrap(), Command::Board);
        assert_eq!(Command::parse("cells").unwrap(), Command::Cells);
        assert_eq!(Command::parse("state").unwrap(), Command::State);
        assert_eq!(Command::parse("layout").unwrap(), Command::Layout);
        assert_eq!(Command::parse("reset").unwrap(), Command::Reset);
        assert_eq!(Command::parse("help").unwrap(), Command::Help);
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn parse_whitespace() {
        assert_eq!(Command::parse("").unwrap(), Command::Empty);
        assert_eq!(Command::parse("   \n").unwrap(), Command::Empty);
        assert_eq!(Command::parse("  drag   e2 \n").unwrap(), Command::Drag(Square::E2));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Command::parse("castle").unwrap_err().to_string(),
            "unknown command: castle"
        );
        assert_eq!(
            Command::parse("drag").unwrap_err().to_string(),
            "`drag` expects a square"
        );
        assert!(Command::parse("drag z9").is_err());
        assert!(Command::parse("drag e2 e4").is_err());
        assert!(Command::parse("over").is_err());
        assert!(Command::parse("drop").is_err());
        assert!(Command::parse("drop piece").is_err());
        assert!(Command::parse("drop piece e2 e4").is_err());
        assert!(Command::parse("drop 64").is_err());
        assert_eq!(
            Command::parse("quit now").unwrap_err().to_string(),
            "`quit` does not take arguments"
        );
    }
}
