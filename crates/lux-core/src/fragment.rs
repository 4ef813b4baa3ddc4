//! Criteria fragments: the backend's nested JSON query language as a typed
//! tree.
//!
//! The backend grammar is a tree of equality/containment clauses composed
//! with `AND`/`OR`. On the wire every node is a JSON object:
//!
//! | Variant                 | JSON                                   |
//! |-------------------------|----------------------------------------|
//! | [`Fragment::Field`]     | `{"<name>": <inner>}`                  |
//! | [`Fragment::Value`]     | `"text"`, `1`, `true`                  |
//! | [`Fragment::IdRef`]     | `{"id": "<uri>"}`                      |
//! | [`Fragment::Compare`]   | `{"<field>": <value>, "_comp": ">="}`  |
//! | [`Fragment::And`]       | `{"AND": [...]}`                       |
//! | [`Fragment::Or`]        | `{"OR": [...]}`                        |
//!
//! An object with several plain keys decodes to an `And` of single-key
//! fields, so `decode(encode(f)) == f` holds for every fragment while the
//! reverse direction only holds up to that normalisation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::{Error, Result};

const AND: &str = "AND";
const OR: &str = "OR";
const ID: &str = "id";
const COMP: &str = "_comp";

// ─── Leaves ──────────────────────────────────────────────────────────────────

/// A scalar leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
  Text(String),
  Number(Number),
  Bool(bool),
}

impl Literal {
  pub fn to_json(&self) -> Value {
    match self {
      Self::Text(s) => Value::String(s.clone()),
      Self::Number(n) => Value::Number(n.clone()),
      Self::Bool(b) => Value::Bool(*b),
    }
  }

  fn from_json(value: &Value) -> Option<Self> {
    match value {
      Value::String(s) => Some(Self::Text(s.clone())),
      Value::Number(n) => Some(Self::Number(n.clone())),
      Value::Bool(b) => Some(Self::Bool(*b)),
      _ => None,
    }
  }
}

impl From<&str> for Literal {
  fn from(s: &str) -> Self { Self::Text(s.to_owned()) }
}

impl From<String> for Literal {
  fn from(s: String) -> Self { Self::Text(s) }
}

impl From<i64> for Literal {
  fn from(n: i64) -> Self { Self::Number(n.into()) }
}

/// Comparison operator carried by the `_comp` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
  Lt,
  Le,
  Eq,
  Ge,
  Gt,
}

impl Comparator {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Lt => "<",
      Self::Le => "<=",
      Self::Eq => "==",
      Self::Ge => ">=",
      Self::Gt => ">",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "<" => Some(Self::Lt),
      "<=" => Some(Self::Le),
      "==" => Some(Self::Eq),
      ">=" => Some(Self::Ge),
      ">" => Some(Self::Gt),
      _ => None,
    }
  }
}

// ─── Tree ────────────────────────────────────────────────────────────────────

/// A (possibly nested) backend query clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
  /// A backend field constrained by a nested clause or a literal.
  Field(String, Box<Fragment>),
  Value(Literal),
  /// Reference to an entity by URI.
  IdRef(String),
  /// Ordered comparison on a field, e.g. a date lower bound.
  Compare {
    field:      String,
    comparator: Comparator,
    value:      Literal,
  },
  And(Vec<Fragment>),
  Or(Vec<Fragment>),
}

impl Fragment {
  pub fn field(name: impl Into<String>, inner: Fragment) -> Self {
    Self::Field(name.into(), Box::new(inner))
  }

  pub fn id(uri: impl Into<String>) -> Self { Self::IdRef(uri.into()) }

  pub fn value(literal: impl Into<Literal>) -> Self {
    Self::Value(literal.into())
  }

  /// Combine clauses with `AND`: nothing for no clauses, the clause itself
  /// for one.
  pub fn all(mut clauses: Vec<Fragment>) -> Option<Self> {
    match clauses.len() {
      0 => None,
      1 => clauses.pop(),
      _ => Some(Self::And(clauses)),
    }
  }

  /// Combine clauses with `OR`, with the same collapsing as [`Self::all`].
  pub fn any(mut clauses: Vec<Fragment>) -> Option<Self> {
    match clauses.len() {
      0 => None,
      1 => clauses.pop(),
      _ => Some(Self::Or(clauses)),
    }
  }

  /// The clauses of this fragment read as a conjunction, with nested `AND`
  /// nodes flattened.
  pub fn conjuncts(&self) -> Vec<&Fragment> {
    match self {
      Self::And(parts) => parts.iter().flat_map(Fragment::conjuncts).collect(),
      other => vec![other],
    }
  }

  /// The branches of this fragment read as a disjunction, with nested `OR`
  /// nodes flattened.
  pub fn disjuncts(&self) -> Vec<&Fragment> {
    match self {
      Self::Or(parts) => parts.iter().flat_map(Fragment::disjuncts).collect(),
      other => vec![other],
    }
  }

  /// The URI this clause points at, looking through `AND`.
  pub fn as_id(&self) -> Option<&str> {
    self.conjuncts().into_iter().find_map(|part| match part {
      Self::IdRef(id) => Some(id.as_str()),
      _ => None,
    })
  }

  // ── JSON ────────────────────────────────────────────────────────────────

  pub fn to_json(&self) -> Value {
    match self {
      Self::Field(name, inner) => single(name, inner.to_json()),
      Self::Value(literal) => literal.to_json(),
      Self::IdRef(id) => single(ID, Value::String(id.clone())),
      Self::Compare {
        field,
        comparator,
        value,
      } => {
        let mut map = Map::new();
        map.insert(field.clone(), value.to_json());
        map.insert(COMP.to_owned(), Value::String(comparator.as_str().into()));
        Value::Object(map)
      }
      Self::And(parts) => single(AND, list(parts)),
      Self::Or(parts) => single(OR, list(parts)),
    }
  }

  pub fn from_json(value: &Value) -> Result<Self> {
    match value {
      Value::Object(map) => from_object(map),
      other => Literal::from_json(other)
        .map(Self::Value)
        .ok_or_else(|| malformed("expected an object or a scalar", other)),
    }
  }
}

fn single(key: &str, value: Value) -> Value {
  let mut map = Map::new();
  map.insert(key.to_owned(), value);
  Value::Object(map)
}

fn list(parts: &[Fragment]) -> Value {
  Value::Array(parts.iter().map(Fragment::to_json).collect())
}

fn malformed(reason: &str, value: &Value) -> Error {
  Error::MalformedFragment(format!("{reason}: {value}"))
}

fn from_object(map: &Map<String, Value>) -> Result<Fragment> {
  if let Some(comp) = map.get(COMP) {
    return from_comparison(map, comp);
  }

  let mut entries = map.iter();
  match (entries.next(), entries.next()) {
    (None, _) => Err(Error::MalformedFragment("empty object".into())),
    (Some((key, value)), None) => from_entry(key, value),
    _ => {
      let parts = map
        .iter()
        .map(|(key, value)| from_entry(key, value))
        .collect::<Result<Vec<_>>>()?;
      Ok(Fragment::And(parts))
    }
  }
}

fn from_entry(key: &str, value: &Value) -> Result<Fragment> {
  match key {
    AND => Ok(Fragment::And(from_list(value)?)),
    OR => Ok(Fragment::Or(from_list(value)?)),
    ID => value
      .as_str()
      .map(Fragment::id)
      .ok_or_else(|| malformed("`id` must be a string", value)),
    _ => Ok(Fragment::field(key, Fragment::from_json(value)?)),
  }
}

fn from_list(value: &Value) -> Result<Vec<Fragment>> {
  value
    .as_array()
    .ok_or_else(|| malformed("combinator expects an array", value))?
    .iter()
    .map(Fragment::from_json)
    .collect()
}

fn from_comparison(map: &Map<String, Value>, comp: &Value) -> Result<Fragment> {
  let comparator = comp
    .as_str()
    .and_then(Comparator::parse)
    .ok_or_else(|| malformed("unknown comparator", comp))?;

  let mut fields = map.iter().filter(|(key, _)| key.as_str() != COMP);
  let (Some((field, value)), None) = (fields.next(), fields.next()) else {
    return Err(Error::MalformedFragment(
      "`_comp` needs exactly one compared field".into(),
    ));
  };
  let value = Literal::from_json(value)
    .ok_or_else(|| malformed("compared value must be a scalar", value))?;

  Ok(Fragment::Compare {
    field: field.clone(),
    comparator,
    value,
  })
}

impl Serialize for Fragment {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.to_json().serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for Fragment {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Fragment::from_json(&value).map_err(serde::de::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn decodes_nested_member_of_shape() {
    let value = json!({
      "memberOf": { "curatedBy": { "OR": [
        { "memberOf": { "id": "X" } },
        { "id": "X" },
      ] } }
    });
    let fragment = Fragment::from_json(&value).unwrap();
    assert_eq!(
      fragment,
      Fragment::field(
        "memberOf",
        Fragment::field(
          "curatedBy",
          Fragment::Or(vec![
            Fragment::field("memberOf", Fragment::id("X")),
            Fragment::id("X"),
          ]),
        ),
      )
    );
    assert_eq!(fragment.to_json(), value);
  }

  #[test]
  fn multi_key_object_becomes_and() {
    let fragment =
      Fragment::from_json(&json!({ "isOnline": 1, "text": "vase" })).unwrap();
    let Fragment::And(parts) = &fragment else {
      panic!("expected And, got {fragment:?}")
    };
    assert_eq!(parts.len(), 2);
    assert_eq!(Fragment::from_json(&fragment.to_json()).unwrap(), fragment);
  }

  #[test]
  fn comparison_round_trips() {
    let value = json!({ "producedDate": "1950-01-01T00:00:00.000Z", "_comp": ">=" });
    let fragment = Fragment::from_json(&value).unwrap();
    assert!(matches!(
      &fragment,
      Fragment::Compare { field, comparator: Comparator::Ge, .. } if field == "producedDate"
    ));
    assert_eq!(fragment.to_json(), value);
  }

  #[test]
  fn rejects_shapes_outside_the_grammar() {
    assert!(Fragment::from_json(&json!(null)).is_err());
    assert!(Fragment::from_json(&json!([1, 2])).is_err());
    assert!(Fragment::from_json(&json!({})).is_err());
    assert!(Fragment::from_json(&json!({ "id": 7 })).is_err());
    assert!(Fragment::from_json(&json!({ "AND": { "a": 1 } })).is_err());
    assert!(Fragment::from_json(&json!({ "a": 1, "b": 2, "_comp": ">=" })).is_err());
    assert!(Fragment::from_json(&json!({ "a": 1, "_comp": "~" })).is_err());
  }

  #[test]
  fn all_and_any_collapse_trivial_lists() {
    assert_eq!(Fragment::all(vec![]), None);
    assert_eq!(
      Fragment::all(vec![Fragment::id("a")]),
      Some(Fragment::id("a"))
    );
    assert_eq!(
      Fragment::any(vec![Fragment::id("a"), Fragment::id("b")]),
      Some(Fragment::Or(vec![Fragment::id("a"), Fragment::id("b")]))
    );
  }

  #[test]
  fn conjuncts_flatten_nested_and() {
    let fragment = Fragment::And(vec![
      Fragment::id("a"),
      Fragment::And(vec![Fragment::id("b"), Fragment::id("c")]),
    ]);
    assert_eq!(fragment.conjuncts().len(), 3);
    assert_eq!(fragment.as_id(), Some("a"));
  }

  #[test]
  fn serde_goes_through_the_json_mapping() {
    let fragment = Fragment::field("classification", Fragment::id("urn:x"));
    let text = serde_json::to_string(&fragment).unwrap();
    assert_eq!(text, r#"{"classification":{"id":"urn:x"}}"#);
    let back: Fragment = serde_json::from_str(&text).unwrap();
    assert_eq!(back, fragment);
  }
}
