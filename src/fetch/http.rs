// src/fetch/http.rs
// =============================================================================
// The real fetcher: plain GET requests through reqwest.
//
// Key behavior:
// - One shared Client (connection pooling) with a fixed User-Agent
// - Follows up to 5 redirects; the final status must be exactly 200
// - Per-request timeout chosen by the caller (pages vs. repository calls)
// - reqwest errors are sorted into FetchError variants
//
// Rust concepts:
// - async/await: each request is awaited before the next one starts
// - From-style conversion: turning library errors into our own error type
// =============================================================================

use super::{Fetch, FetchError};
use anyhow::{Context, Result};
use reqwest::{header, Client, StatusCode};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds a client that sends `user_agent` with every request
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5)) // Follow up to 5 redirects
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn get(&self, url: &str, timeout: Option<Duration>) -> Result<Vec<u8>, FetchError> {
        let mut request = self
            .client
            .get(url)
            .header(header::ACCEPT, "text/html,application/json;q=0.9,*/*;q=0.8");
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(categorize_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            ::log::debug!("GET {} -> HTTP {}", url, status.as_u16());
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(categorize_error)?;
        ::log::debug!("GET {} -> {} bytes", url, body.len());
        Ok(body.to_vec())
    }
}

// Sorts reqwest errors into the failure reasons the crawler cares about
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure or refused connection
// - Too many redirects
// - The body stream breaking halfway
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::Transport("too many redirects".to_string())
    } else if error.is_connect() {
        FetchError::Transport(format!("connection failed: {}", error))
    } else if error.is_body() || error.is_decode() {
        FetchError::Body(error.to_string())
    } else {
        FetchError::Transport(error.to_string())
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why only 200 and not every 2xx?
//    - A 204 or 206 has no (or only part of a) page, so there is nothing to
//      record. Redirects are already followed by the client, so a moved page
//      still ends in 200.
//
// 2. Why bytes instead of text?
//    - Repository files may be binary. The caller decides whether to decode
//      as UTF-8 strictly (files) or leniently (HTML pages).
// -----------------------------------------------------------------------------
