//! Handlers for `POST /criteria` and `GET /links/criteria`.

use axum::{
  Json,
  extract::{Query, State},
};
use lux_core::{Criteria, FacetValue, Scope, Tab};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

// ─── POST /criteria ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedCriteria {
  /// `None` when nothing is selected.
  pub q:            Option<String>,
  pub results_link: Option<String>,
  /// One entry per selected value, for the "selected filters" strip.
  pub selected:     Vec<SelectedFilter>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedFilter {
  pub facet_name: String,
  pub value:      FacetValue,
  pub label:      Option<String>,
}

/// `POST /criteria`: encode a selection. Unknown facets are rejected.
pub async fn encode(
  State(state): State<AppState>,
  Json(criteria): Json<Criteria>,
) -> Result<Json<EncodedCriteria>, ApiError> {
  let config = &state.config;
  let mut selected = Vec::new();
  for (name, values) in &criteria.facets {
    let def = config.facet(criteria.scope, name).ok_or_else(|| {
      lux_core::Error::UnknownFacet {
        scope: criteria.scope,
        facet: name.clone(),
      }
    })?;
    for value in values {
      let label = def
        .selected_label(value, config.record_types())
        .or_else(|| def.facet_label(value, config.record_types()));
      selected.push(SelectedFilter {
        facet_name: name.clone(),
        value: value.clone(),
        label,
      });
    }
  }

  Ok(Json(EncodedCriteria {
    q: lux_criteria::serialize_criteria(&criteria, config),
    results_link: lux_criteria::results_link(&criteria, config),
    selected,
  }))
}

// ─── GET /links/criteria ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LinkParams {
  pub link: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedLink {
  pub scope:        Scope,
  pub tab:          Tab,
  /// The facet selections the link's `q` maps to, for labelling.
  pub criteria:     Criteria,
  /// Results page for the link's own `q`, clauses without a facet included.
  pub results_link: String,
  pub name:         Option<String>,
  pub page:         Option<u32>,
}

/// `GET /links/criteria?link=...`: reverse-map a backend link.
pub async fn decode(
  State(state): State<AppState>,
  Query(params): Query<LinkParams>,
) -> Result<Json<DecodedLink>, ApiError> {
  let link = lux_criteria::try_parse_link(&params.link)?;
  let mut criteria = match &link.query {
    Some(query) => lux_criteria::criteria_from_fragment(link.scope, query, &state.config),
    None => Criteria::new(link.scope),
  };
  criteria.sort = link.sort.clone();

  Ok(Json(DecodedLink {
    scope: link.scope,
    tab: link.tab(),
    criteria,
    results_link: lux_criteria::results_link_for(&link),
    name: link.name,
    page: link.page,
  }))
}
