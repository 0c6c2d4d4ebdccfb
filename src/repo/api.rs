// src/repo/api.rs
// =============================================================================
// Talking to the GitHub contents API.
//
// - Turning a repository web URL into its contents-listing URL
// - Decoding one listing (the JSON array of a directory's entries)
//
// A listing entry looks like:
//   {"name": "README.md", "type": "file",
//    "url": "https://api.github.com/repos/o/r/contents/README.md?ref=main",
//    "download_url": "https://raw.githubusercontent.com/o/r/main/README.md", ...}
//
// Only the fields we use are declared; serde ignores the rest.
// =============================================================================

use crate::config::CrawlConfig;
use crate::fetch::FetchError;
use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    // symlink, submodule, anything newer
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Listing URL of this entry (for directories: its own listing)
    #[serde(default)]
    pub url: Option<String>,
    /// Raw-content URL; null for directories and some special files
    #[serde(default)]
    pub download_url: Option<String>,
}

// Decodes a directory listing
//
// Anything that isn't a JSON array of entries (an error object, the single
// object the API returns for a file path, HTML) is an unreadable body.
pub fn decode_listing(body: &[u8]) -> Result<Vec<ListingEntry>, FetchError> {
    serde_json::from_slice(body).map_err(|e| FetchError::Body(format!("bad listing: {}", e)))
}

// Works out the contents-listing URL for a repository URL
//
// Supported formats:
//   - https://github.com/owner/repo[/tree/...]  -> {api_base}/repos/owner/repo/contents
//   - https://github.com/owner/repo.git         -> same, .git dropped
//   - .../contents                              -> used as-is
//   - anything else                             -> "{url}/contents"
pub fn listing_url(repo_url: &str, config: &CrawlConfig) -> Result<String> {
    if let Some(path) = strip_web_prefix(repo_url, &config.repo_host) {
        let (owner, repo) = parse_owner_repo(path)
            .ok_or_else(|| anyhow!("Invalid repository URL format: {}", repo_url))?;
        return Ok(format!(
            "{}/repos/{}/{}/contents",
            config.api_base, owner, repo
        ));
    }

    let trimmed = repo_url.trim_end_matches('/');
    if trimmed.ends_with("/contents") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{}/contents", trimmed))
    }
}

// Returns the path after "https://github.com/" (scheme and www. optional),
// or None if the URL is not a repository web URL
fn strip_web_prefix<'a>(url: &'a str, host: &str) -> Option<&'a str> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);

    let head = rest.get(..host.len())?;
    if !head.eq_ignore_ascii_case(host) {
        return None;
    }
    rest[host.len()..].strip_prefix('/')
}

// "owner/repo/tree/main/src" -> ("owner", "repo")
fn parse_owner_repo(path: &str) -> Option<(&str, &str)> {
    let mut parts = path.split(['/', '?', '#']);
    let owner = parts.next().filter(|s| !s.is_empty())?;
    let repo = parts.next().filter(|s| !s.is_empty())?;
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    Some((owner, repo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_url_to_listing_url() {
        let config = CrawlConfig::default();
        assert_eq!(
            listing_url("https://github.com/rust-lang/rust", &config).unwrap(),
            "https://api.github.com/repos/rust-lang/rust/contents"
        );
    }

    #[test]
    fn test_web_url_with_git_and_subpath() {
        let config = CrawlConfig::default();
        assert_eq!(
            listing_url("https://github.com/user/repo.git", &config).unwrap(),
            "https://api.github.com/repos/user/repo/contents"
        );
        assert_eq!(
            listing_url("https://www.GitHub.com/user/repo/tree/main/src", &config).unwrap(),
            "https://api.github.com/repos/user/repo/contents"
        );
    }

    #[test]
    fn test_missing_repo_segment_is_error() {
        let config = CrawlConfig::default();
        assert!(listing_url("https://github.com/user", &config).is_err());
        assert!(listing_url("https://github.com/", &config).is_err());
    }

    #[test]
    fn test_api_urls() {
        let config = CrawlConfig::default();
        let api = "https://api.github.com/repos/user/repo/contents";
        assert_eq!(listing_url(api, &config).unwrap(), api);
        assert_eq!(
            listing_url("https://api.github.com/repos/user/repo", &config).unwrap(),
            api
        );
    }

    #[test]
    fn test_custom_api_base() {
        let config = CrawlConfig::default().with_api_base("http://localhost:3000");
        assert_eq!(
            listing_url("https://github.com/o/r", &config).unwrap(),
            "http://localhost:3000/repos/o/r/contents"
        );
    }

    #[test]
    fn test_decode_listing() {
        let body = br#"[
            {"name": "a.txt", "type": "file", "url": "u1", "download_url": "d1", "size": 3},
            {"name": "src", "type": "dir", "url": "u2", "download_url": null},
            {"name": "link", "type": "symlink", "url": "u3"}
        ]"#;
        let entries = decode_listing(body).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].kind, EntryKind::File);
        assert_eq!(entries[0].download_url.as_deref(), Some("d1"));
        assert_eq!(entries[1].kind, EntryKind::Dir);
        assert_eq!(entries[1].download_url, None);
        assert_eq!(entries[2].kind, EntryKind::Other);
    }

    #[test]
    fn test_decode_rejects_non_listing() {
        assert!(decode_listing(br#"{"message": "Not Found"}"#).is_err());
        assert!(decode_listing(b"<html>").is_err());
    }
}
