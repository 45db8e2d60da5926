//! Chessboard with free drag-and-drop piece placement.
//!
//! The board is built from a 64-slot [`board::Layout`] into cells holding
//! piece images; the [`drag`] controller moves images between cells. There
//! are no chess rules: any piece can be put anywhere. The binary drives both
//! through a [`Session`] reading gestures from the standard input.

// Rustdoc lints.
#![warn(
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]

pub mod board;
pub mod drag;

mod session;
pub use session::Session;
use shadow_rs::shadow;

shadow!(build);

/// Build profile. Produced by `build.rs`.
const PROFILE: &str = include_str!(concat!(env!("OUT_DIR"), "/profile"));

/// Returns the full version that can be used to identify how the binary was
/// built in the first place.
#[must_use]
pub fn version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints the version and build information on startup.
pub fn print_version_info() {
    println!("dragboard {}", version());
    println!("Build profile: {PROFILE}");
    if !shadow_rs::git_clean() {
        println!("Warning: built with uncommitted changes");
    }
    println!("Type `help` for the list of commands.");
    println!();
}
