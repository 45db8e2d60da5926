//! Piece code to image asset lookup.
//!
//! The table has exactly one entry per piece (12 in total) and never changes
//! after it is built. Only the directory the images live in is configurable.
//! Loading the images is not this crate's concern: the board only stores the
//! references.

use std::fmt;

use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::board::core::{Piece, PieceKind, Player};

/// Directory the piece images are served from unless configured otherwise.
pub const DEFAULT_ASSETS_DIR: &str = "pieces";

const IMAGE_EXTENSION: &str = "png";

/// Where an image gets its picture from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// Relative path of a known piece image, e.g. `pieces/wR.png`.
    Asset(String),
    /// Piece code that is not in the table. Drawn as a broken image.
    Broken(String),
}

impl ImageSource {
    /// Returns `true` for broken references.
    #[must_use]
    pub const fn is_broken(&self) -> bool {
        matches!(self, Self::Broken(_))
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset(path) => f.write_str(path),
            Self::Broken(code) => write!(f, "<broken: {code}>"),
        }
    }
}

/// Immutable piece code → image path table.
#[derive(Clone, Debug)]
pub struct Assets {
    entries: Vec<(String, String)>,
}

impl Assets {
    /// Builds the table for images stored in `directory`.
    #[must_use]
    pub fn new(directory: &str) -> Self {
        let directory = directory.trim_end_matches('/');
        let entries = Player::iter()
            .cartesian_product(PieceKind::iter())
            .map(|(owner, kind)| {
                let code = Piece { owner, kind }.code();
                let path = if directory.is_empty() {
                    format!("{code}.{IMAGE_EXTENSION}")
                } else {
                    format!("{directory}/{code}.{IMAGE_EXTENSION}")
                };
                (code, path)
            })
            .collect();
        Self { entries }
    }

    /// Resolves a piece code. Codes outside the table are not an error: they
    /// resolve to [`ImageSource::Broken`].
    #[must_use]
    pub fn resolve(&self, code: &str) -> ImageSource {
        match self.entries.iter().find(|(known, _)| known == code) {
            Some((_, path)) => ImageSource::Asset(path.clone()),
            None => ImageSource::Broken(code.to_string()),
        }
    }

    /// Number of known piece codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a table built with [`Assets::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(code, path)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(code, path)| (code.as_str(), path.as_str()))
    }
}

impl Default for Assets {
    fn default() -> Self {
        Self::new(DEFAULT_ASSETS_DIR)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn twelve_entries() {
        let assets = Assets::default();
        assert_eq!(assets.len(), 12);
        assert!(!assets.is_empty());
        assert_eq!(assets.iter().map(|(code, _)| code).unique().count(), 12);
    }

    #[test]
    fn known_codes() {
        let assets = Assets::default();
        for code in [
            "bR", "bN", "bB", "bQ", "bK", "bP", "wR", "wN", "wB", "wQ", "wK", "wP",
        ] {
            assert_eq!(
                assets.resolve(code),
                ImageSource::Asset(format!("pieces/{code}.png"))
            );
        }
    }

    #[test]
    fn unknown_codes_are_broken() {
        let assets = Assets::default();
        assert_eq!(assets.resolve("xZ"), ImageSource::Broken("xZ".to_string()));
        assert!(assets.resolve("wr").is_broken());
        assert!(assets.resolve("").is_broken());
        assert_eq!(assets.resolve("xZ").to_string(), "<broken: xZ>");
    }

    #[test]
    fn custom_directory() {
        let assets = Assets::new("static/img/");
        assert_eq!(
            assets.resolve("bK"),
            ImageSource::Asset("static/img/bK.png".to_string())
        );
        assert_eq!(
            Assets::new("").resolve("wQ"),
            ImageSource::Asset("wQ.png".to_string())
        );
    }
}
