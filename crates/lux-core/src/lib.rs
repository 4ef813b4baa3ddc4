//! Core types and configuration tables for the LUX faceted-search client.
//!
//! This crate holds the facet registry, the facet ↔ search-term mapping
//! tables, the criteria fragment tree and the user-level [`Criteria`] state.
//! It is deliberately free of HTTP and I/O; the codec (`lux-criteria`), the
//! timeline (`lux-timeline`) and the JSON adapter (`lux-api`) all build on it.

pub mod config;
pub mod criteria;
pub mod error;
pub mod facet;
pub mod fragment;
pub mod scope;
pub mod special;
pub mod tables;

pub use config::{FacetConfig, FacetTables, RecordTypes};
pub use criteria::Criteria;
pub use error::{ConfigError, Error, Result};
pub use facet::{FacetDefinition, FacetHit, FacetValue, Label, QueryShape};
pub use fragment::{Comparator, Fragment, Literal};
pub use scope::{Scope, Tab};

#[cfg(test)]
mod tests;
