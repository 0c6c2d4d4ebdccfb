// src/fetch/mod.rs
// =============================================================================
// The HTTP fetch primitive both traversals are built on.
//
// A fetch either returns the body of a 200 response or a FetchError saying
// why it didn't. Traversals match on that result and decide whether to skip
// the page, drop the file content, or give up on a directory. Nothing here
// retries.
//
// Submodules:
// - http: the real fetcher, on top of reqwest
// - fake: a canned-response fetcher for tests
// =============================================================================

mod http;

#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpFetcher;

use std::time::Duration;
use thiserror::Error;

// Why a single request produced nothing usable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No response within the timeout
    #[error("request timed out")]
    Timeout,

    /// DNS, connect, TLS, redirect-loop or other transport failure
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with something other than 200
    #[error("HTTP {0}")]
    Status(u16),

    /// The body arrived but could not be read or decoded
    #[error("unreadable body: {0}")]
    Body(String),
}

/// Something that can GET a URL.
///
/// `timeout` of None means "use the client's default".
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn get(&self, url: &str, timeout: Option<Duration>) -> Result<Vec<u8>, FetchError>;
}
