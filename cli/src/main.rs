//! SEO Roaster CLI.
//!
//! ```text
//! seo-roaster [--config PATH] analyze <URL> [--json] [--timeout SECS] [--first-roast]
//! seo-roaster [--config PATH] serve [--bind ADDR]
//! ```
//!
//! Logs go to stderr (`RUST_LOG`, default `info`) so stdout carries only the
//! report.

mod render;

use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use roaster_analyzer::Analyzer;
use roaster_config::RoasterConfig;
use roaster_fetch::Fetcher;
use roaster_roasts::{CatalogRoaster, Pick};
use roaster_server::{FailureReport, RoastReport};

#[derive(Debug, Parser)]
#[command(name = "seo-roaster", version, about = "Grade a page's on-page SEO, with attitude")]
struct Cli {
    /// Config file (default: $SEO_ROASTER_CONFIG or ~/.seo-roaster/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyse one page and print the roast report.
    Analyze {
        url: String,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,

        /// Fetch timeout in seconds (default: the configured fetch timeout).
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Always pick the first roast line instead of a random one.
        #[arg(long)]
        first_roast: bool,
    },

    /// Run the HTTP service.
    Serve {
        /// Listen address (overrides config and PORT).
        #[arg(long, value_name = "ADDR")]
        bind: Option<SocketAddr>,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<RoasterConfig> {
    match path {
        Some(path) => RoasterConfig::load_from(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => {
            tracing::debug!(path = ?RoasterConfig::path(), "loading config");
            RoasterConfig::load().context("loading config")
        }
    }
}

async fn analyze(
    config: &RoasterConfig,
    url: &str,
    json: bool,
    timeout: Option<u64>,
    pick: Pick,
) -> Result<ExitCode> {
    let fetch = config.fetch();
    let fetcher = Fetcher::new(&fetch).context("building HTTP client")?;
    let timeout = Duration::from_secs(
        timeout.unwrap_or_else(|| u64::from(fetch.timeout_seconds())),
    );
    let analyzer = Analyzer::new(fetcher, timeout);
    let roaster = CatalogRoaster::new(pick);

    tracing::info!(url, timeout_secs = timeout.as_secs(), "analysing page");

    match analyzer.analyze(url).await {
        Ok(analysis) => {
            let report = RoastReport::new(&analysis, &roaster);
            if json {
                let out = serde_json::to_string_pretty(&report).context("serializing report")?;
                println!("{out}");
            } else {
                print!("{}", render::render_report(&report));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            let report = FailureReport::new(&failure, &roaster);
            if json {
                let out = serde_json::to_string_pretty(&report).context("serializing report")?;
                println!("{out}");
            } else {
                print!("{}", render::render_failure(&report));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn serve(config: &RoasterConfig, bind: Option<SocketAddr>) -> Result<ExitCode> {
    if let Some(bind) = bind {
        tracing::debug!(%bind, "bind address overridden on the command line");
    }
    roaster_server::serve_config(config, bind)
        .await
        .context("running server")?;
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Analyze {
            url,
            json,
            timeout,
            first_roast,
        } => {
            let pick = if first_roast { Pick::First } else { Pick::Random };
            analyze(&config, &url, json, timeout, pick).await
        }
        Command::Serve { bind } => serve(&config, bind).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_analyze_flags() {
        let cli = Cli::try_parse_from([
            "seo-roaster",
            "analyze",
            "example.com",
            "--json",
            "--timeout",
            "3",
        ])
        .unwrap();
        match cli.command {
            Command::Analyze {
                url, json, timeout, ..
            } => {
                assert_eq!(url, "example.com");
                assert!(json);
                assert_eq!(timeout, Some(3));
            }
            Command::Serve { .. } => panic!("expected analyze"),
        }
    }

    #[test]
    fn parses_serve_bind() {
        let cli = Cli::try_parse_from(["seo-roaster", "serve", "--bind", "0.0.0.0:9000"]).unwrap();
        match cli.command {
            Command::Serve { bind } => assert_eq!(bind, Some("0.0.0.0:9000".parse().unwrap())),
            Command::Analyze { .. } => panic!("expected serve"),
        }
    }

    #[test]
    fn missing_explicit_config_falls_back_to_defaults() {
        let config = load_config(Some(Path::new("/nonexistent/seo-roaster/config.toml"))).unwrap();
        assert_eq!(
            config.fetch().timeout_seconds(),
            RoasterConfig::default().fetch().timeout_seconds()
        );
        assert!(config.server.is_none());
    }

    #[test]
    fn rejects_bad_bind_address() {
        assert!(Cli::try_parse_from(["seo-roaster", "serve", "--bind", "nowhere"]).is_err());
    }
}
