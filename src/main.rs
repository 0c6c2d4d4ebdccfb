// src/main.rs
// =============================================================================
// This is the entry point of the command-line tool.
//
// What happens here:
// 1. Set up logging (RUST_LOG=debug for per-request detail)
// 2. Parse command-line arguments and build the crawl settings
// 3. Crawl, drawing a progress line on stderr
// 4. Print the snapshot (JSON or summary) and optionally save it
// 5. Exit with proper code (0 = success, 1 = nothing scraped, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use cli::Cli;
use site_snapshot::{CrawlConfig, Crawler, CrawlResult, Node, RepoTree, Snapshot};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = snapshot produced
//   Ok(1) = nothing could be scraped
//   Err = unexpected error
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    let crawler = Crawler::new(config)?;

    eprintln!("🔍 Crawling {} ({})", cli.url, crawler.mode_for(&cli.url));

    let bar = progress_bar(cli.quiet)?;
    let mut progress = |current: usize, total: usize| {
        bar.set_length(total as u64);
        bar.set_position(current as u64);
    };
    let snapshot = crawler.crawl(&cli.url, &mut progress).await;
    bar.finish_and_clear();

    let Some(snapshot) = snapshot else {
        eprintln!("⚠️  Could not scrape {}", cli.url);
        return Ok(1);
    };

    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("💾 Saved snapshot to {}", path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_summary(&snapshot);
    }

    Ok(0)
}

// Config file first (if any), then command-line flags on top
fn build_config(cli: &Cli) -> Result<CrawlConfig> {
    let mut config = match &cli.config {
        Some(path) => CrawlConfig::from_file(path)?,
        None => CrawlConfig::default(),
    };
    if let Some(max_pages) = cli.max_pages {
        config = config.with_max_pages(max_pages);
    }
    if let Some(max_depth) = cli.max_depth {
        config = config.with_max_depth(max_depth);
    }
    if let Some(user_agent) = &cli.user_agent {
        config = config.with_user_agent(user_agent.as_str());
    }
    Ok(config)
}

// "Scraped 3 of 10 items [######--------------] 30%" on stderr; hidden with --quiet
fn progress_bar(quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("Scraped {pos} of {len} items [{bar:20.cyan/blue}] {percent}%")?
            .progress_chars("#>-"),
    );
    Ok(bar)
}

fn print_summary(snapshot: &Snapshot) {
    match snapshot {
        Snapshot::Website(pages) => print_pages(pages),
        Snapshot::Repository(tree) => {
            print_tree(tree, 0);
            println!();
            println!("📊 {} file(s)", tree.file_count());
        }
    }
}

// Prints pages as a human-readable table
fn print_pages(pages: &CrawlResult) {
    println!("{:<60} {:<30} {:>6}", "URL", "TITLE", "LINKS");
    println!("{}", "=".repeat(98));

    for page in pages.pages() {
        println!(
            "{:<60} {:<30} {:>6}",
            truncate(&page.url, 57),
            truncate(&page.title, 27),
            page.links.len()
        );
    }

    println!();
    println!("📊 {} page(s) crawled", pages.len());
}

fn print_tree(tree: &RepoTree, indent: usize) {
    for (name, node) in tree.iter() {
        let pad = "  ".repeat(indent);
        match node {
            Node::Dir { content } => {
                println!("{}{}/", pad, name);
                print_tree(content, indent + 1);
            }
            Node::File { content: Some(text) } => println!("{}{} ({} bytes)", pad, name, text.len()),
            Node::File { content: None } => println!("{}{} (no content)", pad, name),
        }
    }
}

// Shortens long cells for the table, on a char boundary
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_tracks_reports() {
        let bar = progress_bar(false).unwrap();
        bar.set_length(10);
        bar.set_position(3);
        assert_eq!(bar.length(), Some(10));
        assert_eq!(bar.position(), 3);
        bar.finish_and_clear();
    }

    #[test]
    fn test_quiet_progress_bar_is_hidden() {
        assert!(progress_bar(true).unwrap().is_hidden());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "site-snapshot",
            "https://example.com",
            "--max-depth",
            "0",
            "--user-agent",
            "snapshot-bot/1.0",
        ]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.max_depth, 1);
        assert_eq!(config.max_pages, 10);
        assert_eq!(config.user_agent, "snapshot-bot/1.0");
    }
}
