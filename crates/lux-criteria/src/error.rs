//! Error types for the lux-criteria codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid link {link:?}: {source}")]
  InvalidUrl {
    link:   String,
    #[source]
    source: url::ParseError,
  },

  #[error("link is not an api search or facets link: {0}")]
  NotAnApiLink(String),

  #[error("unknown scope {0:?}")]
  UnknownScope(String),

  #[error("link names no scope: {0}")]
  MissingScope(String),

  #[error("malformed criteria: {0}")]
  Criteria(#[from] lux_core::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
