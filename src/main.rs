use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use kvsearch_core::{config::Config, request, MemoryLister, PathSearchEngine};

#[derive(Parser)]
#[command(name = "kvsearch", about = request::HELP_SYNOPSIS, long_about = request::HELP_DESCRIPTION)]
struct Cli {
    /// Keyword to look for in folder and key names. Empty lists everything.
    #[arg(default_value = "")]
    keyword: String,

    /// File with one key path per line (`a/b/foo`). Reads stdin when omitted.
    #[arg(long, value_name = "FILE")]
    paths: Option<PathBuf>,

    /// Config file to use instead of ~/.config/kvsearch/config.toml.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log at debug level to stderr.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };

    let default_filter = if cli.debug { "debug" } else { config.log.filter.as_str() };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let paths = match &cli.paths {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            read_paths(file)?
        }
        None => read_paths(io::stdin().lock())?,
    };
    tracing::debug!(paths = paths.len(), "loaded key paths");

    let lister = MemoryLister::from_paths(&paths);
    let engine = PathSearchEngine::new(config.search);
    let outcome = request::search_keys(&engine, &cli.keyword, &lister).await;

    println!("{}", serde_json::to_string(&outcome.response)?);
    outcome.into_result()?;
    Ok(())
}

/// One key path per line; blank lines and `#` comments are skipped.
fn read_paths(reader: impl Read) -> anyhow::Result<Vec<String>> {
    let mut paths = Vec::new();
    for line in BufReader::new(reader).lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        paths.push(line.to_string());
    }
    Ok(paths)
}
