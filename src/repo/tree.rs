// src/repo/tree.rs
// =============================================================================
// Walks a repository through the contents API, depth-first, and builds a
// RepoTree mirroring its directories.
//
// Per entry:
// - file: download the raw content unless the name is on the skip list;
//   keep it only if it is valid UTF-8
// - dir:  recurse into its own listing (except .git); keep it only if the
//   subtree came back non-empty
// - anything else (symlinks, submodules): left out
//
// Progress is reported after every entry as (entries processed, size of the
// root listing). Nested entries keep counting past the root size, so the
// reported value is capped at the total; it is an approximation anchored to
// the root listing, not an exact fraction of all entries.
//
// The budgets in CrawlConfig (max_pages, max_depth) do not apply here: the
// whole tree the API exposes is walked.
// =============================================================================

use super::api::{decode_listing, listing_url, EntryKind, ListingEntry};
use crate::config::CrawlConfig;
use crate::fetch::{Fetch, FetchError};
use crate::model::{Node, RepoTree};
use crate::progress::{report_guarded, Progress};
use anyhow::Result;
use futures::future::{FutureExt, LocalBoxFuture};

// Scrapes a whole repository
//
// Returns Ok(None) when the root listing is unavailable or the repository
// has nothing we keep; Err only when the URL can't be turned into a listing
// URL at all.
pub async fn scrape_tree<F: Fetch>(
    fetcher: &F,
    repo_url: &str,
    config: &CrawlConfig,
    progress: &mut dyn Progress,
) -> Result<Option<RepoTree>> {
    let api_url = listing_url(repo_url, config)?;
    ::log::info!("Scraping repository {} via {}", repo_url, api_url);

    let mut walk = TreeWalk {
        fetcher,
        config,
        progress,
        items_processed: 0,
        total_items: None,
    };
    let tree = walk.scrape_dir(api_url).await;

    match &tree {
        Some(tree) => ::log::info!(
            "Scraped {} file(s) from {} ({} entries visited)",
            tree.file_count(),
            repo_url,
            walk.items_processed
        ),
        None => ::log::warn!("Nothing scraped from {}", repo_url),
    }
    Ok(tree)
}

// State shared by every level of one walk
struct TreeWalk<'a, F> {
    fetcher: &'a F,
    config: &'a CrawlConfig,
    progress: &'a mut dyn Progress,
    items_processed: usize,
    // Size of the root listing, set once when it is fetched
    total_items: Option<usize>,
}

impl<'a, F: Fetch> TreeWalk<'a, F> {
    // Boxed because it recurses
    fn scrape_dir<'s>(&'s mut self, api_url: String) -> LocalBoxFuture<'s, Option<RepoTree>> {
        async move {
            let entries = match self.fetch_listing(&api_url).await {
                Ok(entries) => entries,
                Err(e) => {
                    ::log::warn!("Directory unavailable {}: {}", api_url, e);
                    return None;
                }
            };

            let total = *self.total_items.get_or_insert(entries.len());

            let mut tree = RepoTree::new();
            for entry in entries {
                self.items_processed += 1;
                if total > 0 {
                    report_guarded(&mut *self.progress, self.items_processed.min(total), total);
                }

                match entry.kind {
                    EntryKind::File => {
                        let node = self.scrape_file(&entry).await;
                        tree.insert(entry.name, node);
                    }
                    EntryKind::Dir if entry.name.eq_ignore_ascii_case(".git") => {
                        ::log::debug!("Skipping .git directory in {}", api_url);
                    }
                    EntryKind::Dir => {
                        let Some(child_url) = entry.url.clone() else {
                            ::log::debug!("Directory {} has no listing URL", entry.name);
                            continue;
                        };
                        if let Some(subtree) = self.scrape_dir(child_url).await {
                            tree.insert(entry.name, Node::Dir { content: subtree });
                        }
                    }
                    EntryKind::Other => {
                        ::log::debug!("Ignoring {} (not a file or directory)", entry.name);
                    }
                }
            }

            // Empty directories collapse to "absent"
            if tree.is_empty() {
                None
            } else {
                Some(tree)
            }
        }
        .boxed_local()
    }

    async fn fetch_listing(&self, api_url: &str) -> Result<Vec<ListingEntry>, FetchError> {
        let body = self
            .fetcher
            .get(api_url, Some(self.config.repo_timeout()))
            .await?;
        decode_listing(&body)
    }

    // Builds the node for one file entry; never fails, a file we can't read
    // just has no content
    async fn scrape_file(&self, entry: &ListingEntry) -> Node {
        if self.config.skips_content(&entry.name) {
            return Node::file(None);
        }

        let Some(download_url) = entry.download_url.as_deref() else {
            return Node::file(None);
        };

        match self
            .fetcher
            .get(download_url, Some(self.config.repo_timeout()))
            .await
        {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Node::file(Some(text)),
                Err(_) => {
                    ::log::debug!("{} is not UTF-8 text; keeping it without content", entry.name);
                    Node::file(None)
                }
            },
            Err(e) => {
                ::log::warn!("Failed to download {}: {}", download_url, e);
                Node::file(None)
            }
        }
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why LocalBoxFuture?
//    - An async fn that calls itself would have an infinitely sized future
//    - Boxing the future gives it a fixed size (a pointer)
//    - "Local" because the progress callback need not be Send
//
// 2. Why a TreeWalk struct instead of passing counters around?
//    - Every level of the recursion shares the same counters and callback
//    - Keeping them on one &mut self makes that sharing explicit
// -----------------------------------------------------------------------------
