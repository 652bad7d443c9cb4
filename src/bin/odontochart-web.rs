//! OdontoChart Web Server Binary
//!
//! Starts the REST API that serves chart documents and applies clicks
//! for a browser front end.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3001, charts directory from the config)
//! odontochart-web
//!
//! # Specify port and workspace
//! odontochart-web --port 8080 --workspace ~/charts
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use odontochart::config::Config;
use odontochart::web;

/// OdontoChart Web Server - REST API for the dental chart
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Workspace directory containing chart files.
    /// Defaults to the configured charts directory
    /// (`<config dir>/OdontoChart/charts` unless overridden).
    #[arg(short, long)]
    workspace: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let workspace_root = match args.workspace {
        Some(path) => path,
        None => Config::load().unwrap_or_default().charts_dir()?,
    };
    std::fs::create_dir_all(&workspace_root).with_context(|| {
        format!(
            "Failed to create workspace directory: {}",
            workspace_root.display()
        )
    })?;

    info!("Workspace root: {}", workspace_root.display());

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("Invalid host or port")?;

    web::run_server(workspace_root, addr).await
}
