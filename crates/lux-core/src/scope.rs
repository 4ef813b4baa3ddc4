//! Scopes (the entity types a facet or a criteria applies to) and the
//! results tabs they render into.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A backend entity scope.
///
/// `Place` never carries custom facet builders but participates in the
/// mapping tables and has its own results tab.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Scope {
  Item,
  Work,
  Set,
  Agent,
  Place,
  Concept,
  Event,
}

impl Scope {
  pub fn as_str(self) -> &'static str { self.into() }

  /// The results tab that lists records of this scope.
  pub fn tab(self) -> Tab {
    match self {
      Self::Item => Tab::Objects,
      Self::Work => Tab::Works,
      Self::Set => Tab::Collections,
      Self::Agent => Tab::People,
      Self::Place => Tab::Places,
      Self::Concept => Tab::Concepts,
      Self::Event => Tab::Events,
    }
  }

  /// One-letter prefix of the results-page URL parameters for this scope.
  pub fn param_prefix(self) -> char {
    match self {
      Self::Item => 'i',
      Self::Work => 'w',
      Self::Set => 's',
      Self::Agent => 'a',
      Self::Place => 'p',
      Self::Concept => 'c',
      Self::Event => 'e',
    }
  }

  /// Results-page sort parameter, e.g. `is` for items.
  pub fn sort_param(self) -> String { format!("{}s", self.param_prefix()) }

  /// Results-page page-number parameter, e.g. `ip` for items.
  pub fn page_param(self) -> String { format!("{}p", self.param_prefix()) }
}

/// A results tab of the search UI.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tab {
  Objects,
  Works,
  Collections,
  People,
  Places,
  Concepts,
  Events,
}

impl Tab {
  pub fn as_str(self) -> &'static str { self.into() }

  pub fn scope(self) -> Scope {
    match self {
      Self::Objects => Scope::Item,
      Self::Works => Scope::Work,
      Self::Collections => Scope::Set,
      Self::People => Scope::Agent,
      Self::Places => Scope::Place,
      Self::Concepts => Scope::Concept,
      Self::Events => Scope::Event,
    }
  }
}
