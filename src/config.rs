// src/config.rs
// =============================================================================
// Settings for a crawl.
//
// Budgets (max_pages / max_depth) only apply to website crawls. Repository
// crawls walk the whole tree the listing API exposes.
//
// The struct derives Serialize/Deserialize so the binary can load it from a
// JSON file; every field has a default, so a partial file is fine.
// =============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Maximum number of pages in a website snapshot
    pub max_pages: usize,

    /// Maximum link distance from the start page (start page = 0)
    pub max_depth: usize,

    /// Per-request timeout for web pages, in seconds
    pub page_timeout_secs: u64,

    /// Per-request timeout for listing and raw-file requests, in seconds
    pub repo_timeout_secs: u64,

    pub user_agent: String,

    /// Base URL of the contents API, e.g. https://api.github.com
    pub api_base: String,

    /// URLs containing this host are crawled as repositories
    pub repo_host: String,

    /// File extensions (lowercase, with the dot) whose content is not downloaded
    pub skip_extensions: Vec<String>,

    /// Exact file names (lowercase) whose content is not downloaded
    pub skip_files: Vec<String>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: 10,
            max_depth: 10,
            page_timeout_secs: 10,
            repo_timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            api_base: "https://api.github.com".to_string(),
            repo_host: "github.com".to_string(),
            skip_extensions: [".png", ".jpg", ".jpeg", ".gif", ".ds_store"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            skip_files: vec![".gitignore".to_string()],
        }
    }
}

impl CrawlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a config from a JSON file. Missing fields keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config.normalized())
    }

    // Budgets must be positive; 0 is treated as 1
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn repo_timeout(&self) -> Duration {
        Duration::from_secs(self.repo_timeout_secs)
    }

    /// Whether a repository file's content should be left out.
    ///
    /// Extensions match case-insensitively against the end of the name;
    /// skip_files match the whole (lowercased) name.
    pub fn skips_content(&self, file_name: &str) -> bool {
        let name = file_name.to_lowercase();
        self.skip_extensions.iter().any(|ext| name.ends_with(ext.as_str()))
            || self.skip_files.iter().any(|skip| *skip == name)
    }

    // Applies the same clamping as the builder methods to values that came
    // from a file
    fn normalized(mut self) -> Self {
        self.max_pages = self.max_pages.max(1);
        self.max_depth = self.max_depth.max(1);
        // A zero timeout would make every request fail immediately
        self.page_timeout_secs = self.page_timeout_secs.max(1);
        self.repo_timeout_secs = self.repo_timeout_secs.max(1);
        self.api_base = self.api_base.trim_end_matches('/').to_string();
        self.skip_extensions = self.skip_extensions.iter().map(|s| s.to_lowercase()).collect();
        self.skip_files = self.skip_files.iter().map(|s| s.to_lowercase()).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.max_pages, 10);
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.page_timeout(), Duration::from_secs(10));
        assert_eq!(config.repo_host, "github.com");
    }

    #[test]
    fn test_zero_budgets_are_clamped() {
        let config = CrawlConfig::new().with_max_pages(0).with_max_depth(0);
        assert_eq!(config.max_pages, 1);
        assert_eq!(config.max_depth, 1);
    }

    #[test]
    fn test_skips_content_case_insensitive() {
        let config = CrawlConfig::default();
        assert!(config.skips_content("logo.PNG"));
        assert!(config.skips_content("photo.Jpeg"));
        assert!(config.skips_content(".DS_Store"));
        assert!(config.skips_content(".gitignore"));
        assert!(!config.skips_content("main.rs"));
        assert!(!config.skips_content("gitignore.md"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: CrawlConfig = serde_json::from_str(r#"{"max_pages": 3}"#).unwrap();
        assert_eq!(config.max_pages, 3);
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_from_file_clamps_and_lowercases() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"max_pages": 0, "page_timeout_secs": 0, "repo_timeout_secs": 0,
                "skip_extensions": [".SVG"], "skip_files": ["LICENSE"],
                "api_base": "http://localhost:3000/"}}"#
        )
        .unwrap();

        let config = CrawlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_pages, 1);
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.page_timeout(), Duration::from_secs(1));
        assert_eq!(config.repo_timeout(), Duration::from_secs(1));
        assert_eq!(config.skip_extensions, vec![".svg"]);
        assert_eq!(config.skip_files, vec!["license"]);
        assert_eq!(config.api_base, "http://localhost:3000");
        assert!(config.skips_content("Icon.svg"));
        assert!(config.skips_content("license"));
    }

    #[test]
    fn test_from_file_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(CrawlConfig::from_file(file.path()).is_err());
        assert!(CrawlConfig::from_file("/nonexistent/site-snapshot.json").is_err());
    }

    #[test]
    fn test_with_user_agent() {
        let config = CrawlConfig::new().with_user_agent("snapshot-bot/1.0");
        assert_eq!(config.user_agent, "snapshot-bot/1.0");
    }

    #[test]
    fn test_api_base_trailing_slash() {
        let config = CrawlConfig::new().with_api_base("http://127.0.0.1:8080/");
        assert_eq!(config.api_base, "http://127.0.0.1:8080");
    }
}
