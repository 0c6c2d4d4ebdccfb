// src/website/queue.rs
// =============================================================================
// This module implements website crawling with a breadth-first approach.
//
// How it works:
// 1. Start with the initial URL in a queue, at depth 0
// 2. Pop the front of the queue; skip it if already visited, drop it if it
//    is deeper than max_depth or the page budget is used up
// 3. Fetch the page; on any failure just move on
// 4. Record the page, report progress, queue its links at depth + 1
// 5. Repeat until the queue is empty or max_pages pages are recorded
//
// Links are followed wherever they point (no same-domain restriction).
// Each URL is fetched at most once: successes go into `visited`, failures
// into `failed`, and both are checked before fetching.
//
// Rust concepts:
// - HashSet: To track visited URLs (O(1) lookup)
// - VecDeque: Double-ended queue for breadth-first crawling
// =============================================================================

use super::html::parse_page;
use crate::config::CrawlConfig;
use crate::fetch::{Fetch, FetchError};
use crate::model::{CrawlResult, PageRecord};
use crate::progress::{report_guarded, Progress};
use anyhow::{anyhow, Result};
use std::collections::{HashSet, VecDeque};
use url::Url;

// Represents a page in the crawl queue
#[derive(Debug, Clone)]
struct CrawlItem {
    url: String,
    depth: usize, // Link hops from the starting URL
}

// Crawls a website starting from a URL
//
// Parameters:
//   fetcher: how pages are downloaded
//   start_url: The URL to start crawling from
//   config: max_pages / max_depth budgets and the page timeout
//   progress: told (pages recorded, max_pages) after every page
//
// Returns: the pages reached, in the order they were fetched. An empty result
// means even the start page could not be fetched.
//
// Example:
//   max_depth=0: Only crawl the starting page
//   max_depth=1: Crawl starting page + all pages it links to
pub async fn crawl_website<F: Fetch>(
    fetcher: &F,
    start_url: &str,
    config: &CrawlConfig,
    progress: &mut dyn Progress,
) -> Result<CrawlResult> {
    // Parse and validate the starting URL
    Url::parse(start_url).map_err(|e| anyhow!("Invalid URL '{}': {}", start_url, e))?;

    let max_pages = config.max_pages;
    let max_depth = config.max_depth;
    ::log::info!(
        "Crawling website {} (max_pages={}, max_depth={})",
        start_url,
        max_pages,
        max_depth
    );

    let mut queue = VecDeque::new();
    queue.push_back(CrawlItem {
        url: start_url.to_string(),
        depth: 0,
    });

    let mut visited: HashSet<String> = HashSet::new();
    let mut failed: HashSet<String> = HashSet::new();
    let mut results = CrawlResult::new();

    while let Some(item) = queue.pop_front() {
        if visited.len() >= max_pages {
            break;
        }

        // Already-seen URLs don't count toward the budget
        if visited.contains(&item.url) || failed.contains(&item.url) {
            continue;
        }

        if item.depth > max_depth {
            ::log::debug!("Skipping {} at depth {}", item.url, item.depth);
            continue;
        }

        ::log::debug!("Crawling [depth {}]: {}", item.depth, item.url);

        let html = match fetch_page(fetcher, &item.url, config).await {
            Ok(html) => html,
            Err(e) => {
                ::log::warn!("Failed to fetch {}: {}", item.url, e);
                failed.insert(item.url);
                continue;
            }
        };

        let parsed = parse_page(&html, &item.url);

        // Links already crawled are left out of the record
        let links: Vec<String> = parsed
            .links
            .into_iter()
            .filter(|link| !visited.contains(link))
            .collect();

        visited.insert(item.url.clone());

        for link in &links {
            if !visited.contains(link) && visited.len() < max_pages {
                queue.push_back(CrawlItem {
                    url: link.clone(),
                    depth: item.depth + 1,
                });
            }
        }

        results.insert(PageRecord {
            title: parsed.title,
            text: parsed.text,
            url: item.url,
            links,
        });

        report_guarded(progress, visited.len(), max_pages);
    }

    ::log::info!("Crawled {} page(s) from {}", results.len(), start_url);
    Ok(results)
}

// Fetches a web page and returns its HTML content
//
// Pages are decoded leniently: invalid UTF-8 sequences become U+FFFD rather
// than failing the page.
async fn fetch_page<F: Fetch>(
    fetcher: &F,
    url: &str,
    config: &CrawlConfig,
) -> Result<String, FetchError> {
    let body = fetcher.get(url, Some(config.page_timeout())).await?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why is the budget checked both when queueing and when popping?
//    - When queueing, to avoid growing the queue once the budget is spent
//    - When popping, because links queued earlier may still be waiting after
//      the budget runs out
//
// 2. Why is the start URL stored exactly as given?
//    - URLs are compared as plain strings. "https://a.com" and "https://a.com/"
//      are different keys; we don't try to be clever about that.
// -----------------------------------------------------------------------------
