//! [`Criteria`]: the user's current selection, and its merge into one
//! backend fragment.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{config::FacetConfig, facet::FacetValue, fragment::Fragment, scope::Scope};

/// Backend field carrying the free-text clause.
pub const TEXT_FIELD: &str = "text";

/// Selected facet values for one scope, plus optional free text and sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
  pub scope:  Scope,
  #[serde(default)]
  pub facets: BTreeMap<String, Vec<FacetValue>>,
  /// Facets whose values must all match (`AND`) instead of any (`OR`).
  #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
  pub all_of: BTreeSet<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sort:   Option<String>,
}

impl Criteria {
  pub fn new(scope: Scope) -> Self {
    Self {
      scope,
      facets: BTreeMap::new(),
      all_of: BTreeSet::new(),
      text: None,
      sort: None,
    }
  }

  /// Builder form of [`Self::select`].
  pub fn with_facet(mut self, facet: &str, value: impl Into<FacetValue>) -> Self {
    self.select(facet, value.into());
    self
  }

  /// Require every selected value of `facet` to match.
  pub fn matching_all(mut self, facet: &str) -> Self {
    self.all_of.insert(facet.to_owned());
    self
  }

  pub fn with_text(mut self, text: impl Into<String>) -> Self {
    self.text = Some(text.into());
    self
  }

  /// Add `value` to the selection of `facet`. Selecting a value twice is a
  /// no-op.
  pub fn select(&mut self, facet: &str, value: FacetValue) {
    let values = self.facets.entry(facet.to_owned()).or_default();
    if !values.contains(&value) {
      values.push(value);
    }
  }

  /// Remove `value` from `facet`; the facet disappears with its last value.
  pub fn deselect(&mut self, facet: &str, value: &FacetValue) {
    if let Some(values) = self.facets.get_mut(facet) {
      values.retain(|v| v != value);
      if values.is_empty() {
        self.facets.remove(facet);
        self.all_of.remove(facet);
      }
    }
  }

  pub fn is_empty(&self) -> bool {
    self.text.as_deref().is_none_or(str::is_empty)
      && self.facets.values().all(Vec::is_empty)
  }

  /// Merge every active selection into one fragment: values of one facet
  /// are `OR`ed (or `AND`ed for facets in [`Self::all_of`]), facets and the
  /// free text are `AND`ed. `None` when nothing is selected.
  ///
  /// Facets not registered in this scope are skipped.
  pub fn to_fragment(&self, config: &FacetConfig) -> Option<Fragment> {
    let mut clauses = Vec::new();

    if let Some(text) = self.text.as_deref().filter(|t| !t.is_empty()) {
      clauses.push(Fragment::field(TEXT_FIELD, Fragment::value(text)));
    }

    for (name, values) in &self.facets {
      let Some(def) = config.facet(self.scope, name) else {
        tracing::debug!(scope = %self.scope, facet = %name, "skipping unknown facet");
        continue;
      };
      let branches = values.iter().map(|v| def.build_query(v)).collect();
      let clause = if self.all_of.contains(name) {
        Fragment::all(branches)
      } else {
        Fragment::any(branches)
      };
      if let Some(clause) = clause {
        clauses.push(clause);
      }
    }

    Fragment::all(clauses)
  }
}
