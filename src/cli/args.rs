//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Write the final catalog to this path instead of printing it to stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Merge per-file catalogs with the external `msgcat` utility
    #[arg(long)]
    pub msgcat: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Template files or directories to scan
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}
