use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dragboard::board::assets::{Assets, DEFAULT_ASSETS_DIR};
use dragboard::board::Layout;
use env_logger::Env;

/// Chessboard with free drag-and-drop piece placement. Reads gestures from the
/// standard input, one per line; type `help` for the list of commands.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// File with 64 whitespace-separated piece codes (`.` for an empty cell).
    /// Standard starting position when not set.
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,
    /// Directory the piece images are served from.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_ASSETS_DIR)]
    assets: String,
    /// Do not print the version banner on startup.
    #[arg(long, short)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let config = Config::parse();
    log::debug!("{config:?}");

    let layout = match &config.layout {
        Some(path) => Layout::read(path).context("loading the initial layout")?,
        None => Layout::starting(),
    };
    if !config.quiet {
        dragboard::print_version_info();
    }

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let mut session = dragboard::Session::new(
        layout,
        Assets::new(&config.assets),
        &mut input,
        &mut output,
    );
    session.run()
}
