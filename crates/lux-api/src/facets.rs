//! Handler for `GET /facets/{tab}`.

use axum::{
  Json,
  extract::{Path, State},
};
use lux_core::{FacetConfig, FacetDefinition, FacetValue, Tab};
use serde::Serialize;

use crate::{AppState, error::ApiError};

/// Presentation metadata for one facet of a results tab.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetDescriptor {
  pub name:                String,
  pub section_label:       String,
  pub id_facet:            bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub search_term:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub selected_date_label: Option<String>,
  /// Labels of `1` and `0`, for boolean-coded facets only.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub values:              Vec<ValueLabel>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueLabel {
  pub value:          FacetValue,
  pub label:          Option<String>,
  pub selected_label: Option<String>,
}

impl FacetDescriptor {
  fn new(def: &FacetDefinition, config: &FacetConfig) -> Self {
    let values = if config.is_boolean_facet(def.name) {
      [1, 0]
        .into_iter()
        .map(|n| {
          let value = FacetValue::Number(n);
          ValueLabel {
            label: def.facet_label(&value, config.record_types()),
            selected_label: def.selected_label(&value, config.record_types()),
            value,
          }
        })
        .collect()
    } else {
      Vec::new()
    };

    Self {
      name: def.name.to_owned(),
      section_label: def.section_label.to_owned(),
      id_facet: def.id_facet,
      search_term: config
        .search_term(def.scope, def.name)
        .map(|t| t.search_term_name.to_owned()),
      selected_date_label: config
        .selected_date_facet_label(def.name)
        .map(str::to_owned),
      values,
    }
  }
}

/// `GET /facets/{tab}`: the tab's facets in display order.
pub async fn handler(
  State(state): State<AppState>,
  Path(tab): Path<String>,
) -> Result<Json<Vec<FacetDescriptor>>, ApiError> {
  let tab: Tab = tab
    .parse()
    .map_err(|_| ApiError::NotFound(format!("no results tab {tab:?}")))?;
  let config = &state.config;
  Ok(Json(
    config
      .tab_facets(tab)
      .map(|def| FacetDescriptor::new(def, config))
      .collect(),
  ))
}
