//! Command-line interface definitions.
//!
//! Flags override values from the YAML file given with `--config`; see
//! [`crate::config`].

use clap::Parser;

/// Extract metadata and formats for AOL videos.
///
/// # Examples
///
/// ```sh
/// # Print one JSON line per URL
/// aol_extract "http://on.aol.com/video/netflix-is-raising-rates-5707d6b8e4b090497b04f706"
///
/// # Internal id scheme, write <id>.info.json files
/// aol_extract -j ./info aol-video:518167793
///
/// # Through a proxy
/// aol_extract --proxy socks5://127.0.0.1:9050 aol-video:518167793
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Video URLs (on.aol.com, features.aol.com) or aol-video:<id>
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Write one JSON file per result into this directory instead of stdout
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Proxy URL for all requests
    #[arg(long, env = "AOL_EXTRACT_PROXY")]
    pub proxy: Option<String>,

    /// Number of URLs extracted concurrently
    #[arg(long)]
    pub concurrency: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "aol_extract",
            "--json-output-dir",
            "./info",
            "aol-video:518167793",
            "http://features.aol.com/video/some-slug",
        ]);

        assert_eq!(cli.json_output_dir.as_deref(), Some("./info"));
        assert_eq!(cli.urls.len(), 2);
        assert_eq!(cli.urls[0], "aol-video:518167793");
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["aol_extract", "-j", "/tmp/info", "-c", "/tmp/c.yaml", "aol-video:1"]);

        assert_eq!(cli.json_output_dir.as_deref(), Some("/tmp/info"));
        assert_eq!(cli.config.as_deref(), Some("/tmp/c.yaml"));
    }

    #[test]
    fn test_cli_requires_url() {
        assert!(Cli::try_parse_from(["aol_extract"]).is_err());
    }
}
