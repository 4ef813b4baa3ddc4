//! [`FacetConfig`]: the read-only facet registry and mapping tables, built
//! once from [`FacetTables`] and shared by reference.

use std::{
  collections::{HashMap, HashSet},
  sync::LazyLock,
};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{
  error::{ConfigError, Error, Result},
  facet::{FacetDefinition, FacetValue, QueryShape},
  fragment::Fragment,
  scope::{Scope, Tab},
  special::SpecialCaseFn,
  tables::{self, FacetRow, TermRow},
};

// ─── Raw tables ──────────────────────────────────────────────────────────────

/// The static inputs of a [`FacetConfig`]. Tests swap individual tables for
/// fixtures with struct-update syntax over [`FacetTables::standard`].
#[derive(Debug, Clone, Copy)]
pub struct FacetTables {
  pub custom_facets:              &'static [FacetDefinition],
  pub facet_search_terms:         &'static [(Scope, &'static [TermRow])],
  pub search_term_facets:         &'static [(Scope, &'static [FacetRow])],
  pub facet_names_lists:          &'static [(Tab, &'static [&'static str])],
  pub facet_labels:               &'static [(&'static str, &'static str)],
  pub selected_date_facet_labels: &'static [(&'static str, &'static str)],
  pub boolean_facet_names:        &'static [&'static str],
  pub special_cases:              &'static [(Scope, &'static str, SpecialCaseFn)],
}

impl FacetTables {
  pub fn standard() -> Self {
    Self {
      custom_facets:              tables::CUSTOM_FACETS,
      facet_search_terms:         tables::FACET_SEARCH_TERMS,
      search_term_facets:         tables::SEARCH_TERM_FACETS,
      facet_names_lists:          tables::FACET_NAMES_LISTS,
      facet_labels:               tables::FACET_LABELS,
      selected_date_facet_labels: tables::SELECTED_DATE_FACET_LABELS,
      boolean_facet_names:        tables::BOOLEAN_FACET_NAMES,
      special_cases:              tables::SPECIAL_CASES,
    }
  }
}

// ─── Record types ────────────────────────────────────────────────────────────

/// `recordTypes[scope][code] -> display name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordTypes(HashMap<Scope, HashMap<String, String>>);

impl RecordTypes {
  pub fn standard() -> Self {
    let mut map: HashMap<Scope, HashMap<String, String>> = HashMap::new();
    for (scope, rows) in tables::DEFAULT_RECORD_TYPES {
      let entry = map.entry(*scope).or_default();
      for (code, label) in *rows {
        entry.insert((*code).to_owned(), (*label).to_owned());
      }
    }
    Self(map)
  }

  /// Display name for `code` in `scope`; `None` for unknown codes.
  pub fn label(&self, scope: Scope, code: &str) -> Option<&str> {
    self.0.get(&scope)?.get(code).map(String::as_str)
  }

  /// Add or override entries from `other`.
  pub fn extend(&mut self, other: RecordTypes) {
    for (scope, codes) in other.0 {
      self.0.entry(scope).or_default().extend(codes);
    }
  }
}

// ─── Mapping entries ─────────────────────────────────────────────────────────

/// The backend search term a facet corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTerm {
  pub search_term_name: &'static str,
  pub id_facet:         bool,
}

/// The facet a backend search term corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermFacet {
  pub facet_name: &'static str,
  pub id_facet:   bool,
}

// ─── Config ──────────────────────────────────────────────────────────────────

static STANDARD: LazyLock<FacetConfig> = LazyLock::new(FacetConfig::standard);

/// The facet registry, the facet ↔ search-term tables and the label tables.
///
/// Never mutated after construction; share it by reference or `Arc`.
#[derive(Debug, Clone)]
pub struct FacetConfig {
  tables:             FacetTables,
  registry:           HashMap<Scope, HashMap<&'static str, FacetDefinition>>,
  facet_search_terms: HashMap<Scope, HashMap<&'static str, SearchTerm>>,
  search_term_facets: HashMap<Scope, HashMap<&'static str, TermFacet>>,
  facet_labels:       HashMap<&'static str, &'static str>,
  date_labels:        HashMap<&'static str, &'static str>,
  boolean_facets:     HashSet<&'static str>,
  record_types:       RecordTypes,
}

impl FacetConfig {
  /// Build from the built-in tables and record types.
  pub fn standard() -> Self {
    Self::from_tables(FacetTables::standard(), RecordTypes::standard())
  }

  /// The process-wide instance of [`Self::standard`].
  pub fn global() -> &'static Self { &STANDARD }

  pub fn from_tables(tables: FacetTables, record_types: RecordTypes) -> Self {
    let mut facet_search_terms: HashMap<_, HashMap<_, _>> = HashMap::new();
    for (scope, rows) in tables.facet_search_terms {
      let entry = facet_search_terms.entry(*scope).or_default();
      for &(facet, term, id_facet) in *rows {
        entry.insert(facet, SearchTerm {
          search_term_name: term,
          id_facet,
        });
      }
    }

    let mut search_term_facets: HashMap<_, HashMap<_, _>> = HashMap::new();
    for (scope, rows) in tables.search_term_facets {
      let entry = search_term_facets.entry(*scope).or_default();
      for &(term, facet, id_facet) in *rows {
        entry.insert(term, TermFacet {
          facet_name: facet,
          id_facet,
        });
      }
    }

    let facet_labels: HashMap<_, _> =
      tables.facet_labels.iter().copied().collect();

    let mut registry: HashMap<Scope, HashMap<&'static str, FacetDefinition>> =
      HashMap::new();
    for def in tables.custom_facets {
      registry.entry(def.scope).or_default().insert(def.name, def.clone());
    }
    for (tab, names) in tables.facet_names_lists {
      let scope = tab.scope();
      for &name in *names {
        let known = registry.get(&scope).is_some_and(|r| r.contains_key(name));
        if known {
          continue;
        }
        let Some(term) = facet_search_terms.get(&scope).and_then(|t| t.get(name))
        else {
          continue;
        };
        let def = derived_definition(scope, name, term, &facet_labels);
        registry.entry(scope).or_default().insert(name, def);
      }
    }

    Self {
      tables,
      registry,
      facet_search_terms,
      search_term_facets,
      facet_labels,
      date_labels: tables.selected_date_facet_labels.iter().copied().collect(),
      boolean_facets: tables.boolean_facet_names.iter().copied().collect(),
      record_types,
    }
  }

  /// Replace the record-type table, e.g. with one extended from settings.
  pub fn with_record_types(mut self, record_types: RecordTypes) -> Self {
    self.record_types = record_types;
    self
  }

  // ── Registry ──────────────────────────────────────────────────────────

  pub fn facet(&self, scope: Scope, name: &str) -> Option<&FacetDefinition> {
    self.registry.get(&scope)?.get(name)
  }

  /// Look a facet up by name alone; names are unique across scopes.
  pub fn find_facet(&self, name: &str) -> Option<&FacetDefinition> {
    self.registry.values().find_map(|facets| facets.get(name))
  }

  /// The registered facets of `tab`, in UI order.
  pub fn tab_facets(&self, tab: Tab) -> impl Iterator<Item = &FacetDefinition> {
    self
      .facet_names(tab)
      .iter()
      .filter_map(move |name| self.facet(tab.scope(), name))
  }

  /// Build the backend clause for `value` of facet `name`. `None` only when
  /// the facet is not registered in `scope`.
  pub fn build_query(
    &self,
    scope: Scope,
    name: &str,
    value: &FacetValue,
  ) -> Option<Fragment> {
    self.facet(scope, name).map(|def| def.build_query(value))
  }

  // ── Mapping ───────────────────────────────────────────────────────────

  pub fn search_term(&self, scope: Scope, facet: &str) -> Option<&SearchTerm> {
    self.facet_search_terms.get(&scope)?.get(facet)
  }

  pub fn facet_for_term(&self, scope: Scope, term: &str) -> Option<&TermFacet> {
    self.search_term_facets.get(&scope)?.get(term)
  }

  pub fn special_case(&self, scope: Scope, field: &str) -> Option<SpecialCaseFn> {
    self
      .tables
      .special_cases
      .iter()
      .find(|(s, f, _)| *s == scope && *f == field)
      .map(|(_, _, parse)| *parse)
  }

  // ── Labels ────────────────────────────────────────────────────────────

  pub fn facet_names(&self, tab: Tab) -> &'static [&'static str] {
    self
      .tables
      .facet_names_lists
      .iter()
      .find(|(t, _)| *t == tab)
      .map(|(_, names)| *names)
      .unwrap_or_default()
  }

  pub fn facet_label(&self, name: &str) -> Option<&'static str> {
    self.facet_labels.get(name).copied()
  }

  pub fn selected_date_facet_label(&self, name: &str) -> Option<&'static str> {
    self.date_labels.get(name).copied()
  }

  pub fn is_boolean_facet(&self, name: &str) -> bool {
    self.boolean_facets.contains(name)
  }

  pub fn record_types(&self) -> &RecordTypes { &self.record_types }

  // ── Validation ────────────────────────────────────────────────────────

  /// Check the tables against each other. Every problem is reported, not
  /// just the first.
  pub fn problems(&self) -> Vec<ConfigError> {
    let mut problems = Vec::new();

    for scope in Scope::iter() {
      let forward = self.facet_search_terms.get(&scope);
      let inverse = self.search_term_facets.get(&scope);

      for (&facet, term) in forward.into_iter().flatten() {
        match self.facet_for_term(scope, term.search_term_name) {
          Some(back) if back.facet_name == facet => {
            if back.id_facet != term.id_facet {
              problems.push(ConfigError::IdFacetMismatch { scope, facet });
            }
          }
          _ => problems.push(ConfigError::FacetNotInverse {
            scope,
            facet,
            term: term.search_term_name,
          }),
        }
      }

      for (&term, back) in inverse.into_iter().flatten() {
        let round_trips = self
          .search_term(scope, back.facet_name)
          .is_some_and(|t| t.search_term_name == term);
        if !round_trips {
          problems.push(ConfigError::TermNotInverse {
            scope,
            term,
            facet: back.facet_name,
          });
        }
      }

      for (&facet, def) in self.registry.get(&scope).into_iter().flatten() {
        let tab = scope.tab();
        if !self.facet_names(tab).contains(&facet) {
          problems.push(ConfigError::NotListed { scope, tab, facet });
        }
        if self.facet_label(facet).is_none() {
          problems.push(ConfigError::MissingLabel(facet));
        }
        if let Some(term) = self.search_term(scope, facet)
          && term.id_facet != def.id_facet
        {
          problems.push(ConfigError::IdFacetMismatch { scope, facet });
        }
      }
    }

    for (tab, names) in self.tables.facet_names_lists {
      for &facet in *names {
        if self.facet(tab.scope(), facet).is_none() {
          problems.push(ConfigError::Unregistered { tab: *tab, facet });
        }
      }
    }

    let mut owners: HashMap<&'static str, Scope> = HashMap::new();
    for scope in Scope::iter() {
      for &facet in self.registry.get(&scope).into_iter().flat_map(HashMap::keys) {
        if let Some(first) = owners.insert(facet, scope) {
          problems.push(ConfigError::DuplicateFacet {
            facet,
            first,
            second: scope,
          });
        }
      }
    }

    problems
  }

  /// [`Self::problems`] as a `Result`.
  pub fn validate(&self) -> Result<()> {
    let problems = self.problems();
    if problems.is_empty() {
      Ok(())
    } else {
      Err(Error::InvalidConfig(problems))
    }
  }
}

/// A definition for a facet that only exists in the mapping tables.
fn derived_definition(
  scope: Scope,
  name: &'static str,
  term: &SearchTerm,
  labels: &HashMap<&'static str, &'static str>,
) -> FacetDefinition {
  let field = term.search_term_name;
  let shape = if term.id_facet {
    QueryShape::Identifier(field)
  } else if name.ends_with("Date") {
    QueryShape::Date(field)
  } else {
    QueryShape::Scalar(field)
  };
  FacetDefinition {
    name,
    scope,
    section_label: labels.get(name).copied().unwrap_or(name),
    facet_label: None,
    selected_label: None,
    shape,
    id_facet: term.id_facet,
  }
}
