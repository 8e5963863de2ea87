//! CLI arguments using clap

use crate::application::dto::StripOptions;
use clap::Parser;
use std::path::PathBuf;

/// romsplit - console header stripper
///
/// Detects copier headers on game images (a7800, fds, lynx, nes, snes) and
/// writes a header-free copy next to each file as `<PATH>.new`.
#[derive(Parser, Debug)]
#[command(name = "romsplit")]
#[command(version)]
#[command(about = "Detect and strip console copier headers from game images", long_about = None)]
pub struct Cli {
    /// Also write the removed header to <PATH>.header
    #[arg(short = 's', long)]
    pub save_header: bool,

    /// Game image, or a directory whose files are processed (not recursive)
    pub path: PathBuf,
}

impl Cli {
    /// Builds the run options, reading the parallel switch from `parallel_env`
    pub fn options(&self, parallel_env: Option<&str>) -> StripOptions {
        StripOptions::new(self.save_header).with_parallel_setting(parallel_env)
    }
}
