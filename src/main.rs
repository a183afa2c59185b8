use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use data_inspector::config::{self, InspectorConfig};
use data_inspector::snapshot::Snapshot;
use data_inspector::store::Store;
use data_inspector::tui::app::InspectorApp;
use data_inspector::tui::runner::run_tui;

#[derive(Parser)]
#[command(name = "data-inspector", about = "Inspect messages captured from a topology.")]
struct Cli {
    /// Snapshot file (JSON) with devices and their messages
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Config file (defaults to .inspector/config.yaml, then ~/.inspector/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(long)]
    debug: bool,
}

/// Log to a file: the terminal belongs to the TUI.
fn init_logging(debug: bool) -> Result<PathBuf> {
    let dir = config::dirs_path().unwrap_or_else(std::env::temp_dir);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    let path = dir.join("inspector.log");
    let file = std::fs::File::create(&path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    let level = if debug { "data_inspector=debug" } else { "data_inspector=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.parse()?),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = init_logging(cli.debug)?;

    let config = InspectorConfig::load(cli.config.as_deref());
    let store = match &cli.snapshot {
        Some(path) => {
            let snapshot = Snapshot::load(path)
                .with_context(|| format!("loading snapshot {}", path.display()))?;
            Store::from_state(snapshot.into_state())
        }
        None => Store::new(),
    };

    info!(
        devices = store.state().devices.len(),
        log = %log_path.display(),
        "inspector starting"
    );

    run_tui(InspectorApp::new(store, config)).await
}
