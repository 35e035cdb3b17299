//! # aol_extract
//!
//! Metadata and format extraction for AOL video pages.
//!
//! ## Supported URLs
//!
//! - `http://on.aol.com/video/<slug>-<id>` and `aol-video:<id>`: resolved
//!   through the AOL On feed API into a full record with formats
//! - `http://features.aol.com/video/<slug>`: scraped for the embedded 5min
//!   player, returned as a reference for a `FiveMin` extractor
//!
//! ## Usage
//!
//! ```sh
//! aol_extract aol-video:518167793
//! aol_extract -j ./info "http://features.aol.com/video/<slug>"
//! ```
//!
//! ## Architecture
//!
//! 1. **Matching**: pick the extractor whose URL pattern accepts the input
//! 2. **Fetching**: one HTTP GET for the API payload or the web page
//! 3. **Normalizing**: map raw fields into a record, expanding HLS playlists
//! 4. **Output**: print JSON lines or write one JSON file per result

use clap::Parser;
use futures::stream::{self, StreamExt};
use std::error::Error;
use std::process::ExitCode;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod extractors;
mod formats;
mod http;
mod models;
mod outputs;
mod utils;

use cli::Cli;
use config::Config;
use http::HttpFetcher;
use models::ExtractResult;
use outputs::json;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = Config::load(&args).await?;

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "JSON output directory is not writable");
            return Err(e.into());
        }
    }

    let fetcher = HttpFetcher::new(&config.http)?;
    info!(
        urls = args.urls.len(),
        concurrency = config.concurrency,
        "Starting extraction"
    );

    let results: Vec<(String, error::Result<ExtractResult>)> = stream::iter(args.urls.iter())
        .map(|url| {
            let fetcher = &fetcher;
            async move {
                let res = extractors::extract_url(url, fetcher).await;
                (url.clone(), res)
            }
        })
        .buffered(config.concurrency)
        .collect()
        .await;

    let mut failed = 0usize;
    for (url, res) in results {
        match res {
            Ok(result) => {
                if let Err(e) = emit(&result, args.json_output_dir.as_deref()).await {
                    error!(%url, error = %e, "Failed to write result");
                    failed += 1;
                }
            }
            Err(e) if e.is_expected() => {
                warn!(%url, "{}", e);
                failed += 1;
            }
            Err(e) => {
                error!(%url, error = %e, "Extraction failed");
                failed += 1;
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        total = args.urls.len(),
        failed,
        "Execution complete"
    );

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[instrument(level = "debug", skip(result))]
async fn emit(result: &ExtractResult, json_output_dir: Option<&str>) -> error::Result<()> {
    if let ExtractResult::Url(reference) = result {
        let known = extractors::all_extractors()
            .iter()
            .any(|ie| ie.ie_key() == reference.ie_key);
        if !known {
            info!(ie_key = %reference.ie_key, url = %reference.url, "No registered extractor for reference; emitting as-is");
        }
    }
    match json_output_dir {
        Some(dir) => json::write_result(result, dir).await.map(|_| ()),
        None => json::print_result(result).await,
    }
}
