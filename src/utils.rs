//! Helpers for loosely-typed JSON, regex scraping, dates and output paths.
//!
//! - Coercion of JSON values into integers or strings, degrading to `None`
//! - Regex search with a named failure
//! - Upload date rendering from UNIX timestamps
//! - Log truncation and output directory validation

use crate::error::{ExtractorError, Result};
use chrono::DateTime;
use regex::Regex;
use serde_json::Value;
use std::fs as stdfs;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Coerce a JSON value into an integer.
///
/// Integers pass through and JSON floats are truncated. Strings must hold
/// a whole integer (surrounding whitespace allowed); `"3.0"`, `"N/A"` and
/// anything else that is not one is `None`.
///
/// # Arguments
///
/// * `value` - A field looked up in a JSON object, if it was present
///
/// # Returns
///
/// The integer value, or `None` when the field is missing or not coercible.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(int_or_none(Some(&json!("94"))), Some(94));
/// assert_eq!(int_or_none(Some(&json!("N/A"))), None);
/// ```
pub fn int_or_none(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Read a JSON value as a string, treating `null` and non-strings as absent.
pub fn str_or_none(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

/// Return the first capture group of `re` in `haystack`.
///
/// `name` describes what was sought and ends up in the error message when
/// nothing matches.
pub fn search_regex(re: &Regex, haystack: &str, name: &str) -> Result<String> {
    match re.captures(haystack).and_then(|c| c.get(1)) {
        Some(m) => {
            debug!(%name, value = %truncate_for_log(m.as_str(), 120), "Regex matched");
            Ok(m.as_str().to_string())
        }
        None => Err(ExtractorError::regex_not_found(name)),
    }
}

/// Guess a file extension from the last path segment of `url`.
///
/// Falls back to `default` when the url has no short alphanumeric
/// extension.
pub fn determine_ext(url: &str, default: &str) -> String {
    let path = url::Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| url.split(['?', '#']).next().unwrap_or_default().to_string());
    path.rsplit('/')
        .next()
        .and_then(|segment| segment.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or(default)
        .to_lowercase()
}

/// Render a UNIX timestamp as a `YYYYMMDD` date in UTC.
pub fn upload_date(timestamp: Option<i64>) -> Option<String> {
    let dt = DateTime::from_timestamp(timestamp?, 0)?;
    Some(dt.format("%Y%m%d").to_string())
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` bytes (backing off to a char boundary) with
/// an ellipsis and the number of dropped bytes appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then writes and removes a scratch file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<()> {
    fs::create_dir_all(path).await?;
    let scratch_path = format!("{}/..__write_check__", path.trim_end_matches('/'));
    stdfs::File::create(&scratch_path)?;
    let _ = stdfs::remove_file(&scratch_path);
    info!("Output directory is writable");
    Ok(())
}
