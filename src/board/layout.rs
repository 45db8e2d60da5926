//! The 64-slot table describing what the board is built from.
//!
//! A layout is just data: each slot is either empty or holds a piece code
//! that is taken verbatim. Nothing checks that the codes are known or that
//! the arrangement makes sense, unknown codes show up as broken images once
//! the board is built.

use std::fmt;
use std::path::Path;

use anyhow::{bail, Context};
use itertools::Itertools;

use crate::board::core::{Square, BOARD_SIZE, BOARD_WIDTH};

/// Tokens accepted for an empty slot in the text format.
const EMPTY_TOKENS: [&str; 2] = [".", "--"];

/// Starts a comment that runs until the end of the line.
const COMMENT: char = '#';

#[rustfmt::skip]
const STARTING: [&str; BOARD_SIZE as usize] = [
    "wR", "wN", "wB", "wQ", "wK", "wB", "wN", "wR",
    "wP", "wP", "wP", "wP", "wP", "wP", "wP", "wP",
    "",   "",   "",   "",   "",   "",   "",   "",
    "",   "",   "",   "",   "",   "",   "",   "",
    "",   "",   "",   "",   "",   "",   "",   "",
    "",   "",   "",   "",   "",   "",   "",   "",
    "bP", "bP", "bP", "bP", "bP", "bP", "bP", "bP",
    "bR", "bN", "bB", "bQ", "bK", "bB", "bN", "bR",
];

/// Ordered sequence of 64 entries. Index `i` is row `i / 8`, column `i % 8`.
#[derive(Clone, PartialEq, Eq)]
pub struct Layout {
    slots: Vec<Option<String>>,
}

impl Layout {
    /// The standard chess starting position, white on the first two rows.
    #[must_use]
    pub fn starting() -> Self {
        Self::from_codes(STARTING)
    }

    /// Layout with no pieces at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            slots: vec![None; BOARD_SIZE as usize],
        }
    }

    /// Builds a layout from exactly 64 codes, an empty string marks an empty
    /// slot.
    #[must_use]
    pub fn from_codes(codes: [&str; BOARD_SIZE as usize]) -> Self {
        Self {
            slots: codes
                .iter()
                .map(|code| (!code.is_empty()).then(|| (*code).to_string()))
                .collect(),
        }
    }

    /// Parses the text format: 64 whitespace-separated tokens in index order,
    /// `.` or `--` for an empty slot, anything else is a piece code.
    ///
    /// # Errors
    ///
    /// If the number of tokens is not exactly [`BOARD_SIZE`].
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        let tokens = input
            .lines()
            .map(|line| match line.split_once(COMMENT) {
                Some((content, _)) => content,
                None => line,
            })
            .flat_map(str::split_whitespace)
            .collect_vec();
        if tokens.len() != BOARD_SIZE as usize {
            bail!(
                "layout should have exactly {BOARD_SIZE} entries, got {}",
                tokens.len()
            );
        }
        Ok(Self {
            slots: tokens
                .into_iter()
                .map(|token| (!EMPTY_TOKENS.contains(&token)).then(|| token.to_string()))
                .collect(),
        })
    }

    /// Reads and parses a layout file.
    ///
    /// # Errors
    ///
    /// If the file can not be read or [`Layout::parse`] fails.
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading layout from {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("parsing layout {}", path.display()))
    }

    /// Piece code at the given square, if any.
    #[must_use]
    pub fn at(&self, square: Square) -> Option<&str> {
        self.slots[square.index()].as_deref()
    }

    /// Puts a code into the slot, replacing whatever was there.
    pub fn set(&mut self, square: Square, code: Option<&str>) {
        self.slots[square.index()] = code.map(str::to_string);
    }

    /// Iterates over the slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
        self.slots.iter().map(Option::as_deref)
    }

    /// Number of non-empty slots.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Display for Layout {
    /// Writes the text format accepted by [`Layout::parse`], one row per line
    /// in index order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.slots
                .iter()
                .map(|slot| slot.as_deref().unwrap_or(EMPTY_TOKENS[0]))
                .chunks(BOARD_WIDTH as usize)
                .into_iter()
                .map(|mut row| row.join(" "))
                .join("\n")
        )
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn starting_layout() {
        let layout = Layout::starting();
        assert_eq!(layout.piece_count(), 32);
        assert_eq!(layout.at(Square::A1), Some("wR"));
        assert_eq!(layout.at(Square::E1), Some("wK"));
        assert_eq!(layout.at(Square::A2), Some("wP"));
        assert_eq!(layout.at(Square::E4), None);
        assert_eq!(layout.at(Square::D8), Some("bQ"));
        assert_eq!(layout.at(Square::H7), Some("bP"));
        assert_eq!(Layout::empty().piece_count(), 0);
    }

    #[test]
    fn text_round_trip() {
        let layout = Layout::starting();
        assert_eq!(Layout::parse(&layout.to_string()).unwrap(), layout);
        assert_eq!(
            layout.to_string().lines().next(),
            Some("wR wN wB wQ wK wB wN wR")
        );
        assert_eq!(layout.to_string().lines().nth(3), Some(". . . . . . . ."));
    }

    #[test]
    fn comments_and_empty_tokens() {
        let mut input = String::from("# custom layout\n");
        input.push_str("wK -- . . . . . . # first row\n");
        for _ in 0..7 {
            input.push_str(". . . . . . . .\n");
        }
        let layout = Layout::parse(&input).unwrap();
        assert_eq!(layout.piece_count(), 1);
        assert_eq!(layout.at(Square::A1), Some("wK"));
        assert_eq!(layout.at(Square::B1), None);
    }

    #[test]
    fn unknown_codes_are_kept() {
        let input = std::iter::once("zz")
            .chain(std::iter::repeat(".").take(63))
            .join(" ");
        let layout = Layout::parse(&input).unwrap();
        assert_eq!(layout.at(Square::A1), Some("zz"));
    }

    #[test]
    fn wrong_size() {
        assert!(Layout::parse("").is_err());
        assert!(Layout::parse(&std::iter::repeat(".").take(63).join(" ")).is_err());
        let error = Layout::parse(&std::iter::repeat("wP").take(65).join(" ")).unwrap_err();
        assert_eq!(
            error.to_string(),
            "layout should have exactly 64 entries, got 65"
        );
    }

    #[test]
    fn set_slots() {
        let mut layout = Layout::empty();
        layout.set(Square::E4, Some("wQ"));
        assert_eq!(layout.at(Square::E4), Some("wQ"));
        layout.set(Square::E4, None);
        assert_eq!(layout, Layout::empty());
    }
}
