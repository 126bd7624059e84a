//! Pokedex - browse PokeAPI location areas from an interactive prompt
//!
//! Starts a REPL on stdin/stdout. Fetched pages are kept in an in-memory cache
//! for the configured interval so paging back and forth avoids repeat requests.

use std::io;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use pokedex::cache::Cache;
use pokedex::cli::{Cli, StartupConfig};
use pokedex::commands::{CommandRegistry, Session};
use pokedex::data::{Endpoints, PokeApiClient};
use pokedex::repl;

/// Upper bound on a single PokeAPI request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends logs to stderr so stdout carries only the REPL transcript
fn init_tracing(config: &StartupConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter())),
        )
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    // Print the Display form; returning the error from main would show Debug
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StartupConfig::from_cli(&cli)?;
    init_tracing(&config);

    let cache = Cache::new(config.cache_interval)?;
    tracing::debug!(interval = ?cache.interval(), base_url = %config.base_url, "starting pokedex");

    let http_client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    let mut session = Session::new(
        cache.clone(),
        Arc::new(PokeApiClient::with_client(http_client)),
        Endpoints::new(config.base_url.as_str()),
    );
    let registry = CommandRegistry::standard();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    repl::run(&mut session, &registry, stdin, &mut stdout).await?;

    cache.shutdown();
    Ok(())
}
