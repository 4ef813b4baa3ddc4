//! Error types for `lux-core`.

use thiserror::Error;

use crate::scope::{Scope, Tab};

#[derive(Debug, Error)]
pub enum Error {
  #[error("malformed criteria fragment: {0}")]
  MalformedFragment(String),

  #[error("unknown facet {facet:?} in scope {scope}")]
  UnknownFacet { scope: Scope, facet: String },

  #[error("{} configuration problem(s), first: {}", .0.len(), .0[0])]
  InvalidConfig(Vec<ConfigError>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

/// One inconsistency between the static facet tables.
///
/// These are build-time defects in the tables, reported together by
/// [`crate::FacetConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
  #[error("{scope}: facet {facet:?} maps to {term:?}, which does not map back")]
  FacetNotInverse {
    scope: Scope,
    facet: &'static str,
    term:  &'static str,
  },

  #[error("{scope}: search term {term:?} maps to {facet:?}, which does not map back")]
  TermNotInverse {
    scope: Scope,
    term:  &'static str,
    facet: &'static str,
  },

  #[error("{scope}: idFacet flags disagree for facet {facet:?}")]
  IdFacetMismatch { scope: Scope, facet: &'static str },

  #[error("{scope}: facet {facet:?} is registered but missing from the {tab} list")]
  NotListed {
    scope: Scope,
    tab:   Tab,
    facet: &'static str,
  },

  #[error("{tab}: facet {facet:?} is listed but has no definition")]
  Unregistered { tab: Tab, facet: &'static str },

  #[error("facet {facet:?} is registered in both {first} and {second}")]
  DuplicateFacet {
    facet:  &'static str,
    first:  Scope,
    second: Scope,
  },

  #[error("facet {0:?} has no facet label")]
  MissingLabel(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
