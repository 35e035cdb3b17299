//! Format list helpers: HLS master playlist expansion and ordering.
//!
//! Only the master playlist level of HLS is read here. Each
//! `#EXT-X-STREAM-INF` entry becomes one [`FormatDescriptor`]; segment
//! playlists are left to whatever downloads the media.

use crate::error::{ExtractorError, Result};
use crate::http::Fetcher;
use crate::models::FormatDescriptor;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use tracing::{debug, info, instrument, warn};
use url::Url;

static ATTRIBUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([A-Z0-9-]+)=("[^"]*"|[^",]*)"#).unwrap());

/// Fetch an HLS playlist and list its variants as formats.
///
/// With `fatal == false` any failure (network, not a playlist) is logged
/// and an empty list is returned instead of an error.
///
/// # Arguments
///
/// * `fetcher` - Transport used for the playlist request
/// * `m3u8_url` - Absolute URL of the master (or media) playlist
/// * `video_id` - Id of the video the playlist belongs to, for logging
/// * `ext` - Container extension recorded on every variant (`"mp4"`)
/// * `m3u8_id` - Prefix for generated format ids (`"hls"` gives `hls-1200`)
/// * `fatal` - Whether a failed download or a non-playlist body is an error
///
/// # Returns
///
/// One [`FormatDescriptor`] per `#EXT-X-STREAM-INF` variant, in playlist
/// order, or a single entry for a media playlist.
#[instrument(level = "info", skip(fetcher))]
pub async fn extract_m3u8_formats(
    fetcher: &dyn Fetcher,
    m3u8_url: &str,
    video_id: &str,
    ext: &str,
    m3u8_id: &str,
    fatal: bool,
) -> Result<Vec<FormatDescriptor>> {
    let res = fetcher
        .fetch_text(m3u8_url, video_id, "Downloading m3u8 information")
        .await;
    let playlist = match res {
        Ok(body) => body,
        Err(e) if !fatal => {
            warn!(%m3u8_url, error = %e, "Failed to download m3u8 information; skipping");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    if !playlist.trim_start().starts_with("#EXTM3U") {
        if fatal {
            return Err(ExtractorError::regex_not_found("m3u8 playlist header"));
        }
        warn!(%m3u8_url, "Response is not an m3u8 playlist; skipping");
        return Ok(Vec::new());
    }

    let formats = parse_m3u8_master(&playlist, m3u8_url, ext, m3u8_id);
    info!(count = formats.len(), "Extracted HLS formats");
    Ok(formats)
}

/// Turn the text of an HLS playlist into formats.
///
/// A media playlist (no `#EXT-X-STREAM-INF`) yields a single format pointing
/// at the playlist itself.
pub fn parse_m3u8_master(
    playlist: &str,
    m3u8_url: &str,
    ext: &str,
    m3u8_id: &str,
) -> Vec<FormatDescriptor> {
    if !playlist.contains("#EXT-X-STREAM-INF") {
        return vec![FormatDescriptor {
            url: m3u8_url.to_string(),
            format_id: Some(m3u8_id.to_string()),
            ext: Some(ext.to_string()),
            width: None,
            height: None,
            tbr: None,
            protocol: Some("m3u8".to_string()),
        }];
    }

    let base = Url::parse(m3u8_url).ok();
    let mut formats = Vec::new();
    let mut pending: Option<FormatDescriptor> = None;

    for line in playlist.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(attrs) = line.strip_prefix("#EXT-X-STREAM-INF:") {
            let mut f = FormatDescriptor {
                url: String::new(),
                format_id: None,
                ext: Some(ext.to_string()),
                width: None,
                height: None,
                tbr: None,
                protocol: Some("m3u8_native".to_string()),
            };
            for cap in ATTRIBUTE_RE.captures_iter(attrs) {
                let value = cap[2].trim_matches('"');
                match &cap[1] {
                    "BANDWIDTH" => {
                        f.tbr = value
                            .parse::<f64>()
                            .ok()
                            .filter(|b| b.is_finite())
                            .map(|b| b / 1000.0)
                    }
                    "RESOLUTION" => {
                        if let Some((w, h)) = value.split_once('x') {
                            f.width = w.parse().ok();
                            f.height = h.parse().ok();
                        }
                    }
                    _ => {}
                }
            }
            pending = Some(f);
        } else if line.starts_with('#') {
            continue;
        } else if let Some(mut f) = pending.take() {
            f.url = match &base {
                Some(base) => base
                    .join(line)
                    .map(|u| u.to_string())
                    .unwrap_or_else(|_| line.to_string()),
                None => line.to_string(),
            };
            let suffix = match f.tbr {
                Some(tbr) => (tbr as i64).to_string(),
                None => formats.len().to_string(),
            };
            f.format_id = Some(format!("{}-{}", m3u8_id, suffix));
            formats.push(f);
        }
    }

    debug!(count = formats.len(), "Parsed master playlist variants");
    formats
}

fn cmp_option<T: PartialOrd>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
    }
}

/// Drop duplicate urls and order formats from worst to best.
///
/// Keys, in order: width, height, tbr, format_id. Missing values sort
/// before present ones. Equal keys keep their insertion order.
///
/// # Examples
///
/// ```ignore
/// // [1280x720 "HD", no size "Low", 640x360 "SD"] -> ["Low", "SD", "HD"]
/// let sorted = sort_formats(formats);
/// ```
pub fn sort_formats(formats: Vec<FormatDescriptor>) -> Vec<FormatDescriptor> {
    let mut formats: Vec<FormatDescriptor> = formats
        .into_iter()
        .unique_by(|f| f.url.clone())
        .collect();
    formats.sort_by(|a, b| {
        cmp_option(&a.width, &b.width)
            .then_with(|| cmp_option(&a.height, &b.height))
            .then_with(|| cmp_option(&a.tbr, &b.tbr))
            .then_with(|| cmp_option(&a.format_id, &b.format_id))
    });
    formats
}
