//! Error types for `lux-timeline`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid date {0:?}: expected [-]YYYY[-MM-DD[THH:MM:SS]]")]
  InvalidDate(String),

  #[error(transparent)]
  Core(#[from] lux_core::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
