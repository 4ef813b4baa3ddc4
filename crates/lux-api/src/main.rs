//! lux-server binary.
//!
//! Reads `lux.toml` (or the path given with `--config`) layered under
//! `LUX_*` environment variables, validates the facet tables, and serves the
//! JSON adapter over HTTP.
//!
//! # Checking the tables
//!
//! ```
//! cargo run -p lux-api --bin lux-server -- --check
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use lux_api::{AppState, ServerConfig};
use lux_core::{FacetConfig, RecordTypes};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "LUX faceted-search adapter")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "lux.toml")]
  config: PathBuf,

  /// Validate the facet tables and exit.
  #[arg(long)]
  check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("LUX"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let mut record_types = RecordTypes::standard();
  if let Some(path) = &server_cfg.record_types_file {
    record_types.extend(load_record_types(path)?);
  }

  let facets = FacetConfig::standard().with_record_types(record_types);
  facets.validate().context("facet tables are inconsistent")?;

  if cli.check {
    println!("facet tables ok");
    return Ok(());
  }

  let app = lux_api::router(AppState::new(facets));
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

fn load_record_types(path: &Path) -> anyhow::Result<RecordTypes> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read record types from {path:?}"))?;
  serde_json::from_str(&raw)
    .with_context(|| format!("failed to parse record types in {path:?}"))
}
