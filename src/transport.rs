//! HTTP transport behind a trait seam.
//!
//! The client only needs "GET this url, give me the body", so the
//! transport is a trait: production uses a configured [`reqwest`]
//! client, tests substitute canned pages and count resolver calls.

use std::time::Duration;

use crate::error::Result;

/// User-Agent sent with every request.
const USER_AGENT: &str = concat!(
    "gismeteo-rs/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/rjl-climate/gismeteo-rs)"
);

/// Default timeout for page fetches.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Minimal fetch interface consumed by [`crate::Gismeteo`].
pub trait Transport: Send + Sync {
    /// Fetch a url and return the response body as text.
    fn get(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Production transport over a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
