//! features.aol.com video pages.
//!
//! These pages do not host their own media. They embed a 5min player through
//! a `PlayerSeed.js` loader script, so this extractor only finds that script
//! url and hands it to the `FiveMin` extractor.

use super::InfoExtractor;
use crate::error::Result;
use crate::http::Fetcher;
use crate::models::{ExtractResult, UrlReference};
use crate::utils::search_regex;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, instrument};

static VALID_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://features\.aol\.com/video/(?P<id>[^/?#]+)").unwrap());
static PLAYER_SEED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<script type="text/javascript" src="(https?://[^/]*?5min\.com/Scripts/PlayerSeed\.js[^"]+)""#,
    )
    .unwrap()
});

/// Key of the extractor that understands 5min player urls.
pub const FIVE_MIN_IE_KEY: &str = "FiveMin";

#[derive(Debug, Default, Clone, Copy)]
pub struct AolFeaturesIE;

#[async_trait]
impl InfoExtractor for AolFeaturesIE {
    fn ie_name(&self) -> &'static str {
        "features.aol.com"
    }

    fn ie_key(&self) -> &'static str {
        "AolFeatures"
    }

    fn valid_url(&self) -> &Regex {
        &VALID_URL
    }

    #[instrument(level = "info", skip_all, fields(%url))]
    async fn extract(&self, url: &str, fetcher: &dyn Fetcher) -> Result<ExtractResult> {
        let display_id = self.match_id(url)?;
        let webpage = fetcher
            .fetch_text(url, &display_id, "Downloading webpage")
            .await?;
        let embed_url = search_regex(&PLAYER_SEED_RE, &webpage, "5min embed url")?;

        info!(%display_id, %embed_url, "Found 5min embed");
        Ok(ExtractResult::Url(UrlReference {
            url: embed_url,
            ie_key: FIVE_MIN_IE_KEY.to_string(),
        }))
    }
}
