//! Handlers for `POST /timeline` and `GET /timeline/criteria`.

use std::collections::HashMap;

use axum::{
  Json,
  extract::{Query, State},
};
use lux_core::Scope;
use lux_timeline::{TimelineBucket, TimelineParser, Window, YearTotals, year_with_label};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

// ─── POST /timeline ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
  /// Observed years, ascending.
  pub years:  Vec<String>,
  /// Every year from the first to the last observed one.
  pub axis:   Vec<AxisYear>,
  pub window: Window,
  pub totals: HashMap<String, YearTotals>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisYear {
  pub year:     String,
  pub label:    String,
  pub count:    u64,
  pub has_data: bool,
}

/// `POST /timeline`: body maps each facets link to the buckets it returned.
pub async fn build(
  Json(results): Json<HashMap<String, Vec<TimelineBucket>>>,
) -> Json<Timeline> {
  let parser = TimelineParser::new(&results);
  let axis = parser
    .years_with_no_data()
    .into_iter()
    .map(|y| AxisYear {
      label:    year_with_label(&y.year),
      year:     y.year,
      count:    y.count,
      has_data: y.has_data,
    })
    .collect();

  Json(Timeline {
    years: parser.sorted_years(),
    axis,
    window: parser.start_and_end_index(),
    totals: parser.transformed().clone(),
  })
}

// ─── GET /timeline/criteria ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BarParams {
  pub scope: Scope,
  pub facet: String,
  pub year:  String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarLink {
  pub q:            Option<String>,
  pub results_link: Option<String>,
}

/// `GET /timeline/criteria?scope=..&facet=..&year=..`: where a bar links to.
pub async fn bar(
  State(state): State<AppState>,
  Query(params): Query<BarParams>,
) -> Result<Json<BarLink>, ApiError> {
  let criteria = lux_timeline::year_range_criteria(
    &state.config,
    params.scope,
    &params.facet,
    &params.year,
  )?;
  Ok(Json(BarLink {
    q:            lux_criteria::serialize_criteria(&criteria, &state.config),
    results_link: lux_criteria::results_link(&criteria, &state.config),
  }))
}
