//! Runtime configuration.
//!
//! Settings come from an optional YAML file and are then overridden by any
//! command-line flags that were given. Every field has a default, so an empty
//! or absent file is valid.
//!
//! ```yaml
//! http:
//!   user_agent: "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0"
//!   timeout_secs: 20
//!   proxy: "socks5://127.0.0.1:9050"
//! concurrency: 4
//! ```

use crate::cli::Cli;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Settings for the shared HTTP client.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Proxy URL applied to every request (`http://`, `https://`, `socks5://`).
    pub proxy: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            proxy: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    /// How many URLs are extracted at the same time.
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            concurrency: 4,
        }
    }
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load the file named by `--config` (if any) and apply CLI overrides.
    #[instrument(level = "info", skip_all, fields(path = ?args.config))]
    pub async fn load(args: &Cli) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => {
                let text = tokio::fs::read_to_string(path).await?;
                let config = Self::from_yaml(&text)?;
                info!(%path, "Loaded configuration file");
                config
            }
            None => Self::default(),
        };
        config.apply_overrides(args);
        debug!(?config, "Effective configuration");
        Ok(config)
    }

    pub fn apply_overrides(&mut self, args: &Cli) {
        if let Some(ua) = &args.user_agent {
            self.http.user_agent = ua.clone();
        }
        if let Some(secs) = args.timeout_secs {
            self.http.timeout_secs = secs;
        }
        if let Some(proxy) = &args.proxy {
            self.http.proxy = Some(proxy.clone());
        }
        if let Some(n) = args.concurrency {
            self.concurrency = n;
        }
        self.concurrency = self.concurrency.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("http:\n  timeout_secs: 5\n").unwrap();
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.concurrency, 4);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(Config::from_yaml("http: [unclosed").is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = Config::from_yaml("concurrency: 8\nhttp:\n  proxy: http://a:1\n").unwrap();
        let args = Cli::parse_from([
            "aol_extract",
            "--proxy",
            "socks5://127.0.0.1:9050",
            "--concurrency",
            "0",
            "aol-video:518167793",
        ]);
        config.apply_overrides(&args);
        assert_eq!(config.http.proxy.as_deref(), Some("socks5://127.0.0.1:9050"));
        assert_eq!(config.concurrency, 1);
    }

    #[tokio::test]
    async fn test_load_reads_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "http:\n  user_agent: test-agent\n").unwrap();
        let args = Cli::parse_from([
            "aol_extract",
            "--config",
            path.to_str().unwrap(),
            "aol-video:1",
        ]);
        let config = Config::load(&args).await.unwrap();
        assert_eq!(config.http.user_agent, "test-agent");
    }
}
