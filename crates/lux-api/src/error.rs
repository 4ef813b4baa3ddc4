//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),
}

impl From<lux_core::Error> for ApiError {
  fn from(e: lux_core::Error) -> Self { ApiError::BadRequest(e.to_string()) }
}

impl From<lux_criteria::Error> for ApiError {
  fn from(e: lux_criteria::Error) -> Self { ApiError::BadRequest(e.to_string()) }
}

impl From<lux_timeline::Error> for ApiError {
  fn from(e: lux_timeline::Error) -> Self { ApiError::BadRequest(e.to_string()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
