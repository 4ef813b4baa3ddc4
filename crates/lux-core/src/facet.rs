//! Facet definitions: presentation metadata plus the query each facet value
//! builds.

use serde::{Deserialize, Serialize};

use crate::{
  config::RecordTypes,
  fragment::{Comparator, Fragment, Literal},
  scope::Scope,
};

// ─── Values ──────────────────────────────────────────────────────────────────

/// A concrete value selected for a facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetValue {
  /// Boolean-coded facets use `0`/`1`.
  Number(i64),
  /// Entity URIs, record-type codes and single dates.
  Text(String),
  /// Inclusive range of ISO-8601 date-times, used by date facets.
  DateRange { start: String, end: String },
}

impl FacetValue {
  /// The value as a plain string; a date range renders as an ISO-8601
  /// interval (`start/end`).
  pub fn to_text(&self) -> String {
    match self {
      Self::Number(n) => n.to_string(),
      Self::Text(s) => s.clone(),
      Self::DateRange { start, end } => format!("{start}/{end}"),
    }
  }

  /// The literal a scalar clause carries. Date ranges have none.
  pub fn as_literal(&self) -> Option<Literal> {
    match self {
      Self::Number(n) => Some(Literal::from(*n)),
      Self::Text(s) => Some(Literal::Text(s.clone())),
      Self::DateRange { .. } => None,
    }
  }

  /// Recover a value from a decoded literal. Non-integral numbers and
  /// booleans are carried as text.
  pub fn from_literal(literal: &Literal) -> Self {
    match literal {
      Literal::Number(n) => n
        .as_i64()
        .map(Self::Number)
        .unwrap_or_else(|| Self::Text(n.to_string())),
      Literal::Text(s) => Self::Text(s.clone()),
      Literal::Bool(b) => Self::Text(b.to_string()),
    }
  }
}

impl From<i64> for FacetValue {
  fn from(n: i64) -> Self { Self::Number(n) }
}

impl From<&str> for FacetValue {
  fn from(s: &str) -> Self { Self::Text(s.to_owned()) }
}

/// One facet selection recovered from backend criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetHit {
  pub facet_name: String,
  pub value:      FacetValue,
}

impl FacetHit {
  pub fn new(facet_name: impl Into<String>, value: impl Into<FacetValue>) -> Self {
    Self {
      facet_name: facet_name.into(),
      value:      value.into(),
    }
  }
}

// ─── Labels ──────────────────────────────────────────────────────────────────

/// What a computed label may look at besides the value itself.
#[derive(Debug, Clone, Copy)]
pub struct LabelContext<'a> {
  pub scope:        Scope,
  pub record_types: &'a RecordTypes,
}

pub type LabelFn = fn(&FacetValue, &LabelContext<'_>) -> Option<String>;

/// Display text for a facet value: fixed, or computed from the value.
#[derive(Debug, Clone, Copy)]
pub enum Label {
  Static(&'static str),
  Computed(LabelFn),
}

impl Label {
  pub fn render(&self, value: &FacetValue, ctx: &LabelContext<'_>) -> Option<String> {
    match self {
      Self::Static(text) => Some((*text).to_owned()),
      Self::Computed(f) => f(value, ctx),
    }
  }
}

/// `1` renders as `yes`, `0` as `no`; anything else has no label.
pub fn boolean_label(value: &FacetValue, yes: &str, no: &str) -> Option<String> {
  match value {
    FacetValue::Number(1) => Some(yes.to_owned()),
    FacetValue::Number(0) => Some(no.to_owned()),
    _ => None,
  }
}

// ─── Query shapes ────────────────────────────────────────────────────────────

pub type QueryFn = fn(&FacetValue) -> Fragment;

/// How a facet value becomes a backend clause.
#[derive(Debug, Clone, Copy)]
pub enum QueryShape {
  /// `{"<field>": <value>}`
  Scalar(&'static str),
  /// `{"<field>": {"id": <value>}}`
  Identifier(&'static str),
  /// `{"<field>": <date>}`, or a `>=`/`<=` pair for a date range.
  Date(&'static str),
  /// Anything nested deeper than one field.
  Custom(QueryFn),
}

/// A registered facet.
#[derive(Debug, Clone)]
pub struct FacetDefinition {
  pub name:           &'static str,
  pub scope:          Scope,
  pub section_label:  &'static str,
  pub facet_label:    Option<Label>,
  pub selected_label: Option<Label>,
  pub shape:          QueryShape,
  /// The backend search term carries an entity URI rather than a scalar.
  pub id_facet:       bool,
}

impl FacetDefinition {
  /// Build the backend clause selecting records that match `value`.
  ///
  /// Pure and total: domain membership of `value` is not checked.
  pub fn build_query(&self, value: &FacetValue) -> Fragment {
    match self.shape {
      QueryShape::Scalar(field) | QueryShape::Date(field) => {
        value_clause(field, value)
      }
      QueryShape::Identifier(field) => match value {
        FacetValue::DateRange { .. } => value_clause(field, value),
        other => Fragment::field(field, Fragment::id(other.to_text())),
      },
      QueryShape::Custom(build) => build(value),
    }
  }

  /// Label for `value` in the facet list. `None` when the facet has no
  /// label or the value is outside the label's domain.
  pub fn facet_label(
    &self,
    value: &FacetValue,
    record_types: &RecordTypes,
  ) -> Option<String> {
    self.facet_label.as_ref()?.render(value, &self.context(record_types))
  }

  /// Label for `value` in the "selected filters" strip.
  pub fn selected_label(
    &self,
    value: &FacetValue,
    record_types: &RecordTypes,
  ) -> Option<String> {
    self
      .selected_label
      .as_ref()?
      .render(value, &self.context(record_types))
  }

  fn context<'a>(&self, record_types: &'a RecordTypes) -> LabelContext<'a> {
    LabelContext {
      scope: self.scope,
      record_types,
    }
  }
}

/// `{"<field>": <literal>}`, or an inclusive comparison pair for a range.
pub fn value_clause(field: &str, value: &FacetValue) -> Fragment {
  match value {
    FacetValue::DateRange { start, end } => Fragment::And(vec![
      Fragment::Compare {
        field:      field.to_owned(),
        comparator: Comparator::Ge,
        value:      Literal::Text(start.clone()),
      },
      Fragment::Compare {
        field:      field.to_owned(),
        comparator: Comparator::Le,
        value:      Literal::Text(end.clone()),
      },
    ]),
    FacetValue::Number(n) => Fragment::field(field, Fragment::value(*n)),
    FacetValue::Text(s) => Fragment::field(field, Fragment::value(s.as_str())),
  }
}
