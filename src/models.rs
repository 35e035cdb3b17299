//! Data models produced by the extractors.
//!
//! - [`VideoRecord`]: canonical metadata for one video plus its formats
//! - [`FormatDescriptor`]: one playable rendition of a video
//! - [`UrlReference`]: a hand-off to another extractor
//! - [`ExtractResult`]: what an extractor returns, one of the two above
//!
//! Field names follow the info-dict vocabulary used by media downloaders
//! (`format_id`, `tbr`, `view_count`, ...) so the JSON output drops straight
//! into existing tooling.

use serde::{Deserialize, Serialize};

/// One playable rendition of a video.
///
/// Renditions are unique per `url` inside a [`VideoRecord`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FormatDescriptor {
    /// Direct media or variant playlist URL.
    pub url: String,
    /// Site quality label or generated HLS id (`hls-1200`).
    pub format_id: Option<String>,
    /// Container extension, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Total bitrate in kbit/s.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbr: Option<f64>,
    /// Transfer protocol (`https`, `m3u8_native`, `m3u8`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

impl FormatDescriptor {
    /// A direct (progressive) rendition with only a url and a label.
    pub fn direct(url: &str, format_id: Option<String>) -> Self {
        Self {
            url: url.to_string(),
            format_id,
            ext: None,
            width: None,
            height: None,
            tbr: None,
            protocol: url::Url::parse(url).ok().map(|u| u.scheme().to_string()),
        }
    }
}

/// Canonical metadata for a single video.
///
/// Built once per extraction and handed to the caller; nothing mutates it
/// afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VideoRecord {
    /// Identifier derived from the input URL. Never empty.
    pub id: String,
    pub title: String,
    /// Length in seconds.
    pub duration: Option<i64>,
    /// Publication time as a UNIX timestamp.
    pub timestamp: Option<i64>,
    /// `YYYYMMDD` rendering of `timestamp` in UTC.
    pub upload_date: Option<String>,
    pub view_count: Option<i64>,
    pub description: Option<String>,
    pub uploader: Option<String>,
    /// Sorted worst to best.
    pub formats: Vec<FormatDescriptor>,
    /// Name of the extractor that produced the record.
    pub extractor: String,
    pub extractor_key: String,
}

/// A pointer to a URL that another extractor should handle.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UrlReference {
    pub url: String,
    /// Key of the extractor expected to take over (e.g. `FiveMin`).
    pub ie_key: String,
}

/// The outcome of a successful extraction.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "_type", rename_all = "snake_case")]
pub enum ExtractResult {
    Video(VideoRecord),
    Url(UrlReference),
}

impl ExtractResult {
    /// Identifier used when naming output files.
    pub fn file_stem(&self) -> String {
        match self {
            Self::Video(record) => format!("{}.info", record.id),
            Self::Url(reference) => {
                let slug = reference
                    .url
                    .rsplit('/')
                    .find(|s| !s.is_empty())
                    .unwrap_or("reference");
                let slug: String = slug
                    .chars()
                    .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
                    .collect();
                format!("{}.url", slug)
            }
        }
    }
}
