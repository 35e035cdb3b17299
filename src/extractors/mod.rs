//! Site extractors.
//!
//! Each extractor recognizes one family of URLs and turns a URL into an
//! [`ExtractResult`]: either a finished [`crate::models::VideoRecord`] or a
//! [`crate::models::UrlReference`] handing the job to another extractor.
//!
//! # Supported Sites
//!
//! | Site | Module | Method | Result |
//! |------|--------|--------|--------|
//! | on.aol.com | [`aol`] | JSON details API | Video record |
//! | features.aol.com | [`aol_features`] | HTML scraping | Reference to a 5min player |
//!
//! `aol-video:<id>` is accepted as a shorthand for an on.aol.com video id.

use crate::error::{ExtractorError, Result};
use crate::http::Fetcher;
use crate::models::ExtractResult;
use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, instrument};

pub mod aol;
pub mod aol_features;

pub use aol::AolIE;
pub use aol_features::AolFeaturesIE;

/// A site-specific extractor.
#[async_trait]
pub trait InfoExtractor: Send + Sync {
    /// Human-readable name, used in messages (`on.aol.com`).
    fn ie_name(&self) -> &'static str;

    /// Stable key other extractors use to refer to this one (`Aol`).
    fn ie_key(&self) -> &'static str;

    /// Pattern for the URLs this extractor accepts. Must capture `id`.
    fn valid_url(&self) -> &Regex;

    fn suitable(&self, url: &str) -> bool {
        self.valid_url().is_match(url)
    }

    /// Pull the `id` group out of `url`.
    fn match_id(&self, url: &str) -> Result<String> {
        self.valid_url()
            .captures(url)
            .and_then(|c| c.name("id"))
            .map(|m| m.as_str().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ExtractorError::UnsupportedUrl {
                url: url.to_string(),
            })
    }

    async fn extract(&self, url: &str, fetcher: &dyn Fetcher) -> Result<ExtractResult>;
}

/// Every extractor, in matching order.
pub fn all_extractors() -> Vec<Box<dyn InfoExtractor>> {
    vec![Box::new(AolIE), Box::new(AolFeaturesIE)]
}

/// First extractor that accepts `url`.
pub fn find_extractor(url: &str) -> Option<Box<dyn InfoExtractor>> {
    all_extractors().into_iter().find(|ie| ie.suitable(url))
}

/// Pick the extractor for `url` and run it.
#[instrument(level = "info", skip(fetcher))]
pub async fn extract_url(url: &str, fetcher: &dyn Fetcher) -> Result<ExtractResult> {
    let ie = find_extractor(url).ok_or_else(|| ExtractorError::UnsupportedUrl {
        url: url.to_string(),
    })?;
    debug!(extractor = ie.ie_name(), "Selected extractor");
    ie.extract(url, fetcher).await
}
