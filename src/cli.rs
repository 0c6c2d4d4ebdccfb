// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is a single command: give it a URL and it decides by itself whether
// to crawl a website or walk a GitHub repository.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "site-snapshot",
    version,
    about = "Crawl a website or GitHub repository into a JSON snapshot",
    long_about = "site-snapshot crawls a website breadth-first (within a page and depth budget) \
                  or walks a GitHub repository through the contents API, and prints what it \
                  found as JSON or as a short summary."
)]
pub struct Cli {
    /// Website or GitHub repository URL (e.g., https://github.com/user/repo)
    pub url: String,

    /// Maximum number of pages to crawl (websites only, default: 10)
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Maximum link depth from the start page (websites only, default: 10)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// User-Agent header to send instead of the default browser string
    #[arg(long, value_name = "AGENT")]
    pub user_agent: Option<String>,

    /// JSON file with crawl settings; flags given on the command line win
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the snapshot as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Also write the JSON snapshot to this file
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Don't draw the progress line
    #[arg(long, short)]
    pub quiet: bool,
}
