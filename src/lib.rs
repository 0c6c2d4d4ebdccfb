// src/lib.rs
// =============================================================================
// site-snapshot: crawl a URL into a JSON-serializable snapshot.
//
// - Websites are crawled breadth-first within a page and depth budget and
//   come back as URL -> {title, text, url, links}
// - GitHub repositories are walked through the contents API and come back
//   as a nested name -> {type, content} tree
//
// Quick start:
//
//   let mut progress = |done: usize, total: usize| eprintln!("{}/{}", done, total);
//   if let Some(snapshot) = site_snapshot::crawl("https://example.com", 10, 2, &mut progress).await {
//       println!("{}", serde_json::to_string_pretty(&snapshot)?);
//   }
//
// Modules:
// - config: budgets, timeouts, skip lists
// - fetch: the HTTP GET primitive
// - website / repo: the two traversals
// - router: picks a traversal for a URL
// =============================================================================

pub mod config;
pub mod fetch;
pub mod model;
pub mod progress;
pub mod repo;
pub mod router;
pub mod website;

pub use config::CrawlConfig;
pub use fetch::{Fetch, FetchError, HttpFetcher};
pub use model::{CrawlResult, Node, PageRecord, RepoTree, Snapshot};
pub use progress::{NoProgress, Progress};
pub use router::{crawl, Crawler, Mode};
