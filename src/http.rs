//! HTTP access for extractors.
//!
//! Extractors never talk to `reqwest` directly. They go through the
//! [`Fetcher`] trait so the transport can be swapped: [`HttpFetcher`] in
//! production, an in-memory map in tests.

use crate::config::HttpConfig;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Fetches a URL and returns its body as text.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Download `url` on behalf of `video_id`.
    ///
    /// `note` is a short human description ("Downloading JSON metadata")
    /// that implementations log before the request goes out.
    async fn fetch_text(&self, url: &str, video_id: &str, note: &str) -> Result<String>;
}

/// [`Fetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build the shared client from [`HttpConfig`].
    ///
    /// # Arguments
    ///
    /// * `config` - User agent, per-request timeout and optional proxy
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ExtractorError::Http`] if the proxy URL is
    /// invalid or the TLS backend cannot be initialized.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs));
        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%video_id))]
    async fn fetch_text(&self, url: &str, video_id: &str, note: &str) -> Result<String> {
        info!("{}: {}", video_id, note);
        let t0 = Instant::now();
        let res = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status);
        let response = match res {
            Ok(r) => r,
            Err(e) => {
                warn!(%url, elapsed_ms = t0.elapsed().as_millis() as u64, error = %e, "Request failed");
                return Err(e.into());
            }
        };
        let body = response.text().await?;
        debug!(
            %url,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched"
        );
        Ok(body)
    }
}

/// Fetch `url` and decode the body as JSON.
#[instrument(level = "debug", skip(fetcher))]
pub async fn download_json(
    fetcher: &dyn Fetcher,
    url: &str,
    video_id: &str,
    note: &str,
) -> Result<Value> {
    let body = fetcher.fetch_text(url, video_id, note).await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned bodies by exact URL and records what was requested.
    #[derive(Debug, Default)]
    pub struct StaticFetcher {
        pages: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl StaticFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
            self.pages.insert(url.to_string(), body.into());
            self
        }

        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch_text(&self, url: &str, _video_id: &str, _note: &str) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            match self.pages.get(url) {
                Some(body) => Ok(body.clone()),
                None => Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("HTTP Error 404: {}", url),
                )
                .into()),
            }
        }
    }
}
