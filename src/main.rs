mod app;
mod cache;
mod commands;
mod config;
mod event;
mod gallery;
mod query;
mod store;
mod ui;

use crate::gallery::{ApiClient, Gallery};
use crate::store::SqliteStore;
use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "g9s")]
#[command(about = "A terminal UI for media gallery administration, inspired by k9s")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/g9s/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Directory for the store database and log file
  #[arg(short, long)]
  data_dir: Option<PathBuf>,
}

/// Set up file logging under the data directory.
///
/// The TUI owns the terminal, so logs cannot go to stdout. The returned
/// guard flushes buffered lines when dropped; keep it alive for the whole
/// run.
fn init_logging(data_dir: &Path) -> Result<WorkerGuard> {
  let file = tracing_appender::rolling::never(data_dir, "g9s.log");
  let (writer, guard) = tracing_appender::non_blocking(file);

  let filter = EnvFilter::try_from_env("G9S_LOG").unwrap_or_else(|_| EnvFilter::new("g9s=info"));

  tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().with_writer(writer).with_ansi(false))
    .try_init()
    .map_err(|e| eyre!("Failed to init logging: {}", e))?;

  Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  let mut config = config::Config::load(args.config.as_deref())?;
  // The command line wins over the config file
  if args.data_dir.is_some() {
    config.data_dir = args.data_dir;
  }

  let data_dir = config.resolve_data_dir()?;
  std::fs::create_dir_all(&data_dir).map_err(|e| {
    eyre!(
      "Failed to create data directory {}: {}",
      data_dir.display(),
      e
    )
  })?;

  let _guard = init_logging(&data_dir)?;

  let store = SqliteStore::open(&data_dir)?;
  let client = ApiClient::new(&config)?;
  let gallery = Gallery::new(Arc::new(store), client);

  let mut app = app::App::new(gallery);
  app.run().await?;

  Ok(())
}
