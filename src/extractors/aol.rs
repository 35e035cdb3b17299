//! on.aol.com video extractor.
//!
//! Metadata comes from the AOL On feed API:
//!
//! ```text
//! https://feedapi.b2c.on.aol.com/v1.0/app/videos/aolon/<id>/details
//! ```
//!
//! The payload wraps everything in `response`, with a `statusText` that must
//! be `"Ok"` and a `data` object holding the video. Most `data` fields are
//! optional and loosely typed (numbers sometimes arrive as strings, or as
//! `"N/A"`), so they are read as raw JSON values and coerced one by one.
//!
//! # URL Pattern
//!
//! - `http://on.aol.com/video/<slug>-<id>` (id is the part after the last `-`)
//! - `aol-video:<id>`

use super::InfoExtractor;
use crate::error::{ExtractorError, Result};
use crate::formats::{extract_m3u8_formats, sort_formats};
use crate::http::{Fetcher, download_json};
use crate::models::{ExtractResult, FormatDescriptor, VideoRecord};
use crate::utils::{determine_ext, int_or_none, str_or_none, upload_date};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

const IE_NAME: &str = "on.aol.com";
const STATUS_OK: &str = "Ok";

static VALID_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:aol-video:|https?://on\.aol\.com/video/.*-)(?P<id>[^/?-]+)").unwrap()
});
static DIMENSIONS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)x(\d+)").unwrap());

pub fn details_url(video_id: &str) -> String {
    format!(
        "https://feedapi.b2c.on.aol.com/v1.0/app/videos/aolon/{}/details",
        video_id
    )
}

#[allow(non_snake_case)]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawVideoData {
    title: Option<Value>,
    duration: Option<Value>,
    publishDate: Option<Value>,
    views: Option<Value>,
    description: Option<Value>,
    videoOwner: Option<Value>,
    videoMasterPlaylist: Option<Value>,
    renditions: Option<Vec<RawRendition>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRendition {
    url: Option<Value>,
    format: Option<Value>,
    quality: Option<Value>,
}

/// Quality labels are usually strings but occasionally bare numbers.
fn label(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Build a progressive format, reading `WIDTHxHEIGHT` out of the url text.
fn direct_format(video_url: &str, quality: Option<String>) -> FormatDescriptor {
    let mut f = FormatDescriptor::direct(video_url, quality);
    f.ext = Some(determine_ext(video_url, "mp4"));
    if let Some(cap) = DIMENSIONS_RE.captures(video_url) {
        if let (Ok(width), Ok(height)) = (cap[1].parse::<u32>(), cap[2].parse::<u32>()) {
            f.width = Some(width);
            f.height = Some(height);
        }
    }
    f
}

/// Extractor for `on.aol.com` videos and `aol-video:` ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct AolIE;

impl AolIE {
    #[instrument(level = "info", skip_all, fields(%video_id))]
    async fn collect_formats(
        &self,
        data: &RawVideoData,
        video_id: &str,
        fetcher: &dyn Fetcher,
    ) -> Result<Vec<FormatDescriptor>> {
        let mut formats = Vec::new();

        if let Some(m3u8_url) = str_or_none(data.videoMasterPlaylist.as_ref()).filter(|u| !u.is_empty()) {
            formats.extend(extract_m3u8_formats(fetcher, &m3u8_url, video_id, "mp4", "hls", false).await?);
        }

        for rendition in data.renditions.iter().flatten() {
            let Some(video_url) = str_or_none(rendition.url.as_ref()).filter(|u| !u.is_empty()) else {
                debug!("Skipping rendition without url");
                continue;
            };
            if str_or_none(rendition.format.as_ref()).as_deref() == Some("m3u8") {
                formats.extend(extract_m3u8_formats(fetcher, &video_url, video_id, "mp4", "hls", false).await?);
            } else {
                formats.push(direct_format(&video_url, label(rendition.quality.as_ref())));
            }
        }

        let formats = sort_formats(formats);
        if formats.is_empty() {
            warn!("No formats found");
        }
        Ok(formats)
    }
}

#[async_trait]
impl InfoExtractor for AolIE {
    fn ie_name(&self) -> &'static str {
        IE_NAME
    }

    fn ie_key(&self) -> &'static str {
        "Aol"
    }

    fn valid_url(&self) -> &Regex {
        &VALID_URL
    }

    #[instrument(level = "info", skip_all, fields(%url))]
    async fn extract(&self, url: &str, fetcher: &dyn Fetcher) -> Result<ExtractResult> {
        let video_id = self.match_id(url)?;

        let payload = download_json(
            fetcher,
            &details_url(&video_id),
            &video_id,
            "Downloading JSON metadata",
        )
        .await?;
        let mut response = match payload {
            Value::Object(mut map) => map.remove("response"),
            _ => None,
        }
        .filter(Value::is_object)
        .ok_or_else(|| ExtractorError::missing_field("response", "details payload"))?;

        // Refusals may carry `data` of any shape; check the status before typing it.
        let status = match response.get("statusText") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => {
                return Err(ExtractorError::missing_field("statusText", "details response"));
            }
            Some(other) => other.to_string(),
        };
        if status != STATUS_OK {
            warn!(%video_id, %status, "API refused the request");
            return Err(ExtractorError::expected(IE_NAME, status));
        }

        let data: RawVideoData = match response.get_mut("data").map(Value::take) {
            Some(Value::Null) | None => {
                return Err(ExtractorError::missing_field("data", "details response"));
            }
            Some(raw) => serde_json::from_value(raw)?,
        };
        let title = str_or_none(data.title.as_ref())
            .ok_or_else(|| ExtractorError::missing_field("title", "video data"))?;

        let formats = self.collect_formats(&data, &video_id, fetcher).await?;
        let timestamp = int_or_none(data.publishDate.as_ref());

        info!(%video_id, formats = formats.len(), "Extracted video");
        Ok(ExtractResult::Video(VideoRecord {
            id: video_id,
            title,
            duration: int_or_none(data.duration.as_ref()),
            timestamp,
            upload_date: upload_date(timestamp),
            view_count: int_or_none(data.views.as_ref()),
            description: str_or_none(data.description.as_ref()),
            uploader: str_or_none(data.videoOwner.as_ref()),
            formats,
            extractor: IE_NAME.to_string(),
            extractor_key: self.ie_key().to_string(),
        }))
    }
}
