//! Output writers for extraction results.
//!
//! - [`json`]: stdout JSON lines or one `.json` file per result

pub mod json;
