// src/router.rs
// =============================================================================
// The single entry point: look at the URL, pick a traversal, run it.
//
// - URLs containing the repository host (github.com) are walked through the
//   contents API and give a RepoTree
// - Everything else is crawled as a website and gives a CrawlResult
//
// Whatever goes wrong inside a traversal (bad URL, unreachable root, even a
// panic) comes back as None. Callers treat None as "could not scrape"; the
// reason is only in the logs.
// =============================================================================

use crate::config::CrawlConfig;
use crate::fetch::{Fetch, HttpFetcher};
use crate::model::Snapshot;
use crate::progress::Progress;
use crate::repo::scrape_tree;
use crate::website::crawl_website;
use anyhow::Result;
use futures::FutureExt;
use std::fmt;
use std::panic::AssertUnwindSafe;

/// Which traversal a URL gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Website,
    Repository,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Website => write!(f, "website"),
            Mode::Repository => write!(f, "repository"),
        }
    }
}

pub struct Crawler<F = HttpFetcher> {
    fetcher: F,
    config: CrawlConfig,
}

impl Crawler<HttpFetcher> {
    // Crawler that talks to the network, sending config.user_agent
    pub fn new(config: CrawlConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.user_agent)?;
        Ok(Self { fetcher, config })
    }
}

impl<F: Fetch> Crawler<F> {
    pub fn with_fetcher(fetcher: F, config: CrawlConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn mode_for(&self, url: &str) -> Mode {
        let host = self.config.repo_host.to_lowercase();
        if url.to_lowercase().contains(&host) {
            Mode::Repository
        } else {
            Mode::Website
        }
    }

    /// Crawls `url` and returns its snapshot, or None if nothing could be
    /// scraped.
    pub async fn crawl(&self, url: &str, progress: &mut dyn Progress) -> Option<Snapshot> {
        let mode = self.mode_for(url);
        ::log::info!("Crawling {} as {}", url, mode);

        let outcome = AssertUnwindSafe(self.run(url, mode, progress))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(snapshot)) => snapshot,
            Ok(Err(e)) => {
                ::log::warn!("Error processing URL {}: {:#}", url, e);
                None
            }
            Err(_) => {
                ::log::error!("Crawl of {} panicked", url);
                None
            }
        }
    }

    async fn run(&self, url: &str, mode: Mode, progress: &mut dyn Progress) -> Result<Option<Snapshot>> {
        let snapshot = match mode {
            Mode::Repository => scrape_tree(&self.fetcher, url, &self.config, progress)
                .await?
                .map(Snapshot::Repository),
            Mode::Website => {
                let pages = crawl_website(&self.fetcher, url, &self.config, progress).await?;
                // Not even the start page: same as a failed repository root
                Some(pages)
                    .filter(|pages| !pages.is_empty())
                    .map(Snapshot::Website)
            }
        };
        Ok(snapshot)
    }
}

/// Crawls `url` over the network with default settings and the given budgets.
///
/// `max_pages` and `max_depth` only apply to websites.
pub async fn crawl(
    url: &str,
    max_pages: usize,
    max_depth: usize,
    progress: &mut dyn Progress,
) -> Option<Snapshot> {
    let config = CrawlConfig::default()
        .with_max_pages(max_pages)
        .with_max_depth(max_depth);

    match Crawler::new(config) {
        Ok(crawler) => crawler.crawl(url, progress).await,
        Err(e) => {
            ::log::error!("{:#}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fake::StaticFetcher;
    use crate::fetch::FetchError;
    use crate::progress::NoProgress;
    use std::time::Duration;

    fn crawler(fetcher: StaticFetcher) -> Crawler<StaticFetcher> {
        Crawler::with_fetcher(fetcher, CrawlConfig::default())
    }

    #[test]
    fn test_mode_for() {
        let crawler = crawler(StaticFetcher::new());
        assert_eq!(crawler.mode_for("https://github.com/o/r"), Mode::Repository);
        assert_eq!(crawler.mode_for("https://GitHub.com/o/r"), Mode::Repository);
        assert_eq!(
            crawler.mode_for("https://api.github.com/repos/o/r/contents"),
            Mode::Repository
        );
        assert_eq!(crawler.mode_for("https://example.com/"), Mode::Website);
        assert_eq!(crawler.mode_for("https://gitlab.com/o/r"), Mode::Website);
    }

    #[tokio::test]
    async fn test_routes_website() {
        let url = "https://example.com/";
        let crawler = crawler(StaticFetcher::new().page(url, "<title>Hi</title>"));

        let snapshot = crawler.crawl(url, &mut NoProgress).await.unwrap();
        let pages = snapshot.as_website().unwrap();
        assert_eq!(pages.get(url).unwrap().title, "Hi");
    }

    #[tokio::test]
    async fn test_routes_repository() {
        let fetcher = StaticFetcher::new()
            .page(
                "https://api.github.com/repos/o/r/contents",
                r#"[{"name": "a.txt", "type": "file", "url": "u", "download_url": "https://raw.example/a"}]"#,
            )
            .page("https://raw.example/a", "A");
        let crawler = crawler(fetcher);

        let snapshot = crawler.crawl("https://github.com/o/r", &mut NoProgress).await.unwrap();
        let tree = snapshot.as_repository().unwrap();
        assert_eq!(tree.get("a.txt").unwrap().text(), Some("A"));
    }

    #[tokio::test]
    async fn test_unreachable_roots_are_none() {
        let fetcher = StaticFetcher::new()
            .fail("https://example.com/", FetchError::Status(500))
            .fail("https://api.github.com/repos/o/r/contents", FetchError::Timeout);
        let crawler = crawler(fetcher);

        assert!(crawler.crawl("https://example.com/", &mut NoProgress).await.is_none());
        assert!(crawler.crawl("https://github.com/o/r", &mut NoProgress).await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_urls_are_none() {
        let crawler = crawler(StaticFetcher::new());
        assert!(crawler.crawl("not a url", &mut NoProgress).await.is_none());
        assert!(crawler.crawl("https://github.com/", &mut NoProgress).await.is_none());
    }

    #[tokio::test]
    async fn test_panicking_callback_does_not_abort() {
        let fetcher = StaticFetcher::new()
            .page("https://example.com/", r#"<a href="/b">b</a>"#)
            .page("https://example.com/b", "<p>b</p>");
        let crawler = crawler(fetcher);

        let mut progress = |_: usize, _: usize| panic!("progress bar closed");
        let snapshot = crawler.crawl("https://example.com/", &mut progress).await.unwrap();
        assert_eq!(snapshot.len(), 2);
    }

    struct PanickingFetcher;

    impl Fetch for PanickingFetcher {
        async fn get(&self, _url: &str, _timeout: Option<Duration>) -> Result<Vec<u8>, FetchError> {
            panic!("fetcher bug");
        }
    }

    #[tokio::test]
    async fn test_panicking_traversal_is_none() {
        let crawler = Crawler::with_fetcher(PanickingFetcher, CrawlConfig::default());
        assert!(crawler.crawl("https://example.com/", &mut NoProgress).await.is_none());
    }
}
