//! OdontoChart - terminal dental charting editor
//!
//! Opens a patient's chart, lets the clinician mark treatments per tooth
//! surface with the keyboard or mouse, and saves the chart as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use odontochart::config::Config;
use odontochart::constants::{APP_BINARY_NAME, APP_NAME};
use odontochart::models::{Chart, ChartDocument, ChartMetadata, ToothId};
use odontochart::projection::ChartView;
use odontochart::services::ChartService;
use odontochart::tui;

/// OdontoChart - terminal dental charting editor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Chart file to open (created on first save if it does not exist)
    #[arg(value_name = "FILE")]
    chart_path: Option<PathBuf>,

    /// Patient label (sets the label of the opened chart)
    #[arg(short, long)]
    patient: Option<String>,

    /// Tooth to focus on start (e.g. 36)
    #[arg(short, long, value_name = "TOOTH")]
    tooth: Option<u8>,

    /// Initial view: flat or aggregate
    #[arg(long, value_name = "VIEW")]
    view: Option<ChartView>,

    /// Use this config file instead of the platform default
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal is owned by the editor)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Enable debug logging (with --log-file)
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> Config {
    let result = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    result.unwrap_or_else(|e| {
        warn!("Using default configuration: {:#}", e);
        Config::default()
    })
}

/// Loads the chart named on the command line, or starts an empty one.
fn open_document(cli: &Cli) -> Result<(ChartDocument, Option<PathBuf>)> {
    let (mut document, source_path) = match &cli.chart_path {
        Some(path) if path.exists() => (ChartService::load(path)?, Some(path.clone())),
        Some(path) => {
            info!("{} does not exist yet, starting a new chart", path.display());
            (ChartDocument::new(ChartMetadata::default(), &Chart::new()), Some(path.clone()))
        }
        None => (ChartDocument::new(ChartMetadata::default(), &Chart::new()), None),
    };

    if let Some(patient) = &cli.patient {
        document.metadata.set_patient(patient.as_str())?;
    }
    Ok((document, source_path))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    if let Some(path) = &cli.chart_path {
        if path.is_dir() {
            eprintln!("Error: {} is a directory, expected a chart file", path.display());
            eprintln!();
            eprintln!("Examples:");
            eprintln!("  {APP_BINARY_NAME} jane_doe.json");
            eprintln!("  {APP_BINARY_NAME} --patient \"Jane Doe\"");
            std::process::exit(1);
        }
        if path.extension().is_some_and(|ext| ext != "json") {
            eprintln!(
                "Warning: Expected a JSON chart file (.json), but got: {}",
                path.display()
            );
        }
    }

    let mut config = load_config(&cli);
    if let Some(view) = cli.view {
        config.ui.default_view = view;
    }

    let (document, source_path) = open_document(&cli)?;
    info!("{} v{} starting", APP_NAME, env!("CARGO_PKG_VERSION"));

    let mut state = tui::AppState::new(document, source_path, config);
    if let Some(tooth) = cli.tooth.map(ToothId) {
        if !state.focus_tooth(tooth) {
            warn!("Tooth {} is not in the arcade layout", tooth);
        }
    }
    let mut terminal = tui::setup_terminal()?;
    let result = tui::run_tui(&mut state, &mut terminal);
    tui::restore_terminal(terminal)?;

    result
}
