//! JSON adapter over the LUX facet, criteria and timeline crates.
//!
//! Exposes an axum [`Router`] backed by a shared [`FacetConfig`]. Handlers
//! only call the synchronous core; TLS and auth are the caller's concern.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/lux", lux_api::router(AppState::new(FacetConfig::standard())))
//! ```

pub mod error;
pub mod facets;
pub mod links;
pub mod timeline;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json, Router,
  routing::{get, post},
};
use lux_core::FacetConfig;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `lux.toml` and `LUX_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:              String,
  #[serde(default = "default_port")]
  pub port:              u16,
  /// JSON file of `{scope: {code: label}}` extending the built-in record
  /// types.
  #[serde(default)]
  pub record_types_file: Option<PathBuf>,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
  pub config: Arc<FacetConfig>,
}

impl AppState {
  pub fn new(config: FacetConfig) -> Self {
    Self {
      config: Arc::new(config),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the adapter router.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/facets/{tab}", get(facets::handler))
    .route("/criteria", post(links::encode))
    .route("/links/criteria", get(links::decode))
    .route("/timeline", post(timeline::build))
    .route("/timeline/criteria", get(timeline::bar))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

async fn health() -> Json<Value> { Json(json!({ "status": "ok" })) }
