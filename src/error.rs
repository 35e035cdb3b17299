//! Error types shared by every extractor.
//!
//! Extraction failures fall into two families:
//!
//! - **Expected** failures: the site answered, but said no (a non-`Ok` API
//!   status). These carry the site's own wording and are shown to the user
//!   as-is, without being treated as a program fault.
//! - **Extraction faults**: the page or payload no longer has the shape we
//!   look for (regex did not match, required field missing), or the transport
//!   underneath failed.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The site reported a failure in its own words.
    #[error("{ie_name} said: {message}")]
    Expected { ie_name: String, message: String },

    #[error("Unable to extract {name}")]
    RegexNotFound { name: String },

    #[error("Missing field '{field}' in {context}")]
    MissingField { field: String, context: String },

    #[error("Unsupported URL: {url}")]
    UnsupportedUrl { url: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl ExtractorError {
    pub fn expected(ie_name: &str, message: impl Into<String>) -> Self {
        Self::Expected {
            ie_name: ie_name.to_string(),
            message: message.into(),
        }
    }

    pub fn regex_not_found(name: &str) -> Self {
        Self::RegexNotFound {
            name: name.to_string(),
        }
    }

    pub fn missing_field(field: &str, context: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
            context: context.to_string(),
        }
    }

    /// Whether the failure is the site's answer rather than a fault in the
    /// extractor or the network.
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Expected { .. })
    }
}

pub type Result<T> = std::result::Result<T, ExtractorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_message_carries_site_text() {
        let err = ExtractorError::expected("on.aol.com", "Video not found");
        assert_eq!(err.to_string(), "on.aol.com said: Video not found");
        assert!(err.is_expected());
    }

    #[test]
    fn test_regex_not_found_is_a_fault() {
        let err = ExtractorError::regex_not_found("5min embed url");
        assert_eq!(err.to_string(), "Unable to extract 5min embed url");
        assert!(!err.is_expected());
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: ExtractorError = parse.unwrap_err().into();
        assert!(matches!(err, ExtractorError::Json(_)));
    }
}
