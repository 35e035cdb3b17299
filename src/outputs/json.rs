//! JSON output for extraction results.
//!
//! Results go either to stdout, one compact JSON document per line, or to a
//! directory with one pretty-printed file per result:
//!
//! ```text
//! json_output_dir/
//! ├── 518167793.info.json
//! └── PlayerSeed_js_sid_1420_playList_519507715.url.json
//! ```

use crate::error::Result;
use crate::models::ExtractResult;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, instrument};

/// Write an [`ExtractResult`] to a pretty-printed JSON file.
///
/// The directory is created if it is missing. Video records are named after
/// their id, references after the last segment of their url.
///
/// # Arguments
///
/// * `result` - The extraction result to serialize
/// * `json_output_dir` - Directory that receives the file
///
/// # Returns
///
/// The path of the written file, or an error if directory creation,
/// serialization or the write fails.
///
/// # Output Path
///
/// `{json_output_dir}/{id}.info.json` or `{json_output_dir}/{slug}.url.json`
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_result(result: &ExtractResult, json_output_dir: &str) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(result)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = PathBuf::from(json_output_dir).join(format!("{}.json", result.file_stem()));
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON file");
    Ok(path)
}

/// Print `result` to stdout as a single JSON line.
pub async fn print_result(result: &ExtractResult) -> Result<()> {
    let mut line = serde_json::to_string(result)?;
    line.push('\n');
    let mut stdout = tokio::io::stdout();
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UrlReference;

    #[tokio::test]
    async fn test_write_result_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("out");
        let result = ExtractResult::Url(UrlReference {
            url: "https://pshared.5min.com/Scripts/PlayerSeed.js?sid=1420".to_string(),
            ie_key: "FiveMin".to_string(),
        });

        let path = write_result(&result, dir.to_str().unwrap()).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "PlayerSeed_js_sid_1420.url.json");

        let text = std::fs::read_to_string(&path).unwrap();
        let back: ExtractResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, result);
    }
}
