//! Command-line interface parsing for the Pokedex REPL
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! the validated settings the REPL starts with.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::data::DEFAULT_BASE_URL;

/// Default freshness window for cached responses, in seconds
pub const DEFAULT_CACHE_INTERVAL_SECS: u64 = 30;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The cache interval must be positive
    #[error("Invalid cache interval: must be at least 1 second")]
    ZeroCacheInterval,

    /// The base URL is not an http(s) URL
    #[error("Invalid base URL: '{0}'. Expected an http:// or https:// URL")]
    InvalidBaseUrl(String),
}

/// Pokedex - browse PokeAPI location areas from an interactive prompt
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Interactive explorer for PokeAPI location areas")]
#[command(version)]
pub struct Cli {
    /// How long fetched pages stay cached, in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_CACHE_INTERVAL_SECS)]
    pub cache_interval: u64,

    /// PokeAPI base URL
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Log cache hits, misses and HTTP requests to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Freshness window and sweep period for the response cache
    pub cache_interval: Duration,
    /// PokeAPI base URL without a trailing slash
    pub base_url: String,
    /// Whether debug logging is enabled by default
    pub verbose: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            cache_interval: Duration::from_secs(DEFAULT_CACHE_INTERVAL_SECS),
            base_url: DEFAULT_BASE_URL.to_string(),
            verbose: false,
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if the interval is zero or the base URL is not http(s)
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.cache_interval == 0 {
            return Err(CliError::ZeroCacheInterval);
        }

        let base_url = cli.base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CliError::InvalidBaseUrl(cli.base_url.clone()));
        }

        Ok(StartupConfig {
            cache_interval: Duration::from_secs(cli.cache_interval),
            base_url: base_url.to_string(),
            verbose: cli.verbose,
        })
    }

    /// Default log filter when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "warn,pokedex=debug"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_config_default() {
        let config = StartupConfig::default();
        assert_eq!(config.cache_interval, Duration::from_secs(30));
        assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
        assert!(!config.verbose);
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["pokedex"]);
        assert_eq!(cli.cache_interval, 30);
        assert_eq!(cli.base_url, DEFAULT_BASE_URL);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_all_flags() {
        let cli = Cli::parse_from([
            "pokedex",
            "--cache-interval",
            "5",
            "--base-url",
            "http://localhost:8000/api/v2",
            "-v",
        ]);
        assert_eq!(cli.cache_interval, 5);
        assert_eq!(cli.base_url, "http://localhost:8000/api/v2");
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_rejects_negative_interval() {
        let result = Cli::try_parse_from(["pokedex", "--cache-interval", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_startup_config_from_cli_defaults() {
        let cli = Cli::parse_from(["pokedex"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.cache_interval, Duration::from_secs(30));
        assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
    }

    #[test]
    fn test_startup_config_from_cli_zero_interval() {
        let cli = Cli::parse_from(["pokedex", "--cache-interval", "0"]);
        let err = StartupConfig::from_cli(&cli).unwrap_err();
        assert!(matches!(err, CliError::ZeroCacheInterval));
        assert!(err.to_string().contains("cache interval"));
    }

    #[test]
    fn test_startup_config_trims_trailing_slash() {
        let cli = Cli::parse_from(["pokedex", "--base-url", "https://example.com/api/v2/"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.base_url, "https://example.com/api/v2");
    }

    #[test]
    fn test_startup_config_invalid_base_url() {
        let cli = Cli::parse_from(["pokedex", "--base-url", "ftp://example.com"]);
        let err = StartupConfig::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("ftp://example.com"));
    }

    #[test]
    fn test_default_log_filter() {
        let mut config = StartupConfig::default();
        assert_eq!(config.default_log_filter(), "warn");
        config.verbose = true;
        assert_eq!(config.default_log_filter(), "warn,pokedex=debug");
    }
}
