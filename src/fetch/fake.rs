// src/fetch/fake.rs
// A Fetch implementation that serves canned responses, for tests.
// Unknown URLs answer 404. Every request is recorded in order.

use super::{Fetch, FetchError};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Default)]
pub(crate) struct StaticFetcher {
    routes: HashMap<String, Result<Vec<u8>, FetchError>>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(url.to_string(), Ok(body.into()));
        self
    }

    pub(crate) fn fail(mut self, url: &str, error: FetchError) -> Self {
        self.routes.insert(url.to_string(), Err(error));
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self, url: &str) -> usize {
        self.requests().iter().filter(|u| *u == url).count()
    }
}

impl Fetch for StaticFetcher {
    async fn get(&self, url: &str, _timeout: Option<Duration>) -> Result<Vec<u8>, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.routes
            .get(url)
            .cloned()
            .unwrap_or(Err(FetchError::Status(404)))
    }
}
