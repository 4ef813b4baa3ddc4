//! Reverse mapping from backend criteria to facet selections.
//!
//! Pipeline:
//!   Fragment
//!     └─ conjuncts()             → top-level clauses
//!          ├─ special cases      → FacetHit*
//!          ├─ search-term lookup → FacetHit
//!          ├─ OR of one facet    → FacetHit*
//!          └─ Compare pairs      → FacetHit (DateRange)
//!               └─ fold per facet (OR within a clause, AND across clauses)
//!                    └─ Criteria

use std::collections::{BTreeMap, BTreeSet};

use lux_core::{
  Comparator, Criteria, FacetConfig, FacetHit, FacetValue, Fragment, Literal,
  Scope, criteria::TEXT_FIELD,
};

/// What a fragment decodes to before it becomes a [`Criteria`].
#[derive(Debug, Default)]
pub(crate) struct Decoded {
  pub hits:   Vec<FacetHit>,
  pub text:   Option<String>,
  /// Facets selected by more than one top-level clause.
  pub all_of: BTreeSet<String>,
}

/// How the values of one facet have been joined so far.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Join {
  Single,
  Any,
  All,
}

#[derive(Default)]
struct Bounds {
  start: Option<String>,
  end:   Option<String>,
}

pub(crate) fn criteria_from_fragment(
  scope: Scope,
  fragment: &Fragment,
  config: &FacetConfig,
) -> Criteria {
  let decoded = decode(scope, fragment, config);
  let mut criteria = Criteria::new(scope);
  for hit in decoded.hits {
    criteria.select(&hit.facet_name, hit.value);
  }
  criteria.all_of = decoded.all_of;
  criteria.text = decoded.text;
  criteria
}

pub(crate) fn decode(
  scope: Scope,
  fragment: &Fragment,
  config: &FacetConfig,
) -> Decoded {
  let mut out = Decoded::default();
  let mut joins: BTreeMap<String, Join> = BTreeMap::new();
  let mut bounds: BTreeMap<&'static str, Bounds> = BTreeMap::new();

  for clause in fragment.conjuncts() {
    let hits = match clause {
      Fragment::Field(name, inner) if name == TEXT_FIELD => {
        match &**inner {
          Fragment::Value(Literal::Text(text)) => out.text = Some(text.clone()),
          _ => tracing::debug!("dropping non-text free-text clause"),
        }
        continue;
      }
      Fragment::Field(name, inner) => {
        if let Some(parse) = config.special_case(scope, name) {
          parse(clause).unwrap_or_else(|| {
            tracing::debug!(%scope, field = %name, "special case matched nothing");
            Vec::new()
          })
        } else {
          field_hit(scope, name, inner, config).into_iter().collect()
        }
      }
      Fragment::Compare {
        field,
        comparator,
        value,
      } => {
        let Some(term) = config.facet_for_term(scope, field) else {
          tracing::debug!(%scope, %field, "dropping comparison on unmapped field");
          continue;
        };
        let value = FacetValue::from_literal(value).to_text();
        match comparator {
          Comparator::Ge | Comparator::Gt => {
            bounds.entry(term.facet_name).or_default().start = Some(value);
            continue;
          }
          Comparator::Le | Comparator::Lt => {
            bounds.entry(term.facet_name).or_default().end = Some(value);
            continue;
          }
          Comparator::Eq => vec![FacetHit::new(term.facet_name, FacetValue::Text(value))],
        }
      }
      Fragment::Or(_) => or_hits(scope, clause, config),
      _ => {
        tracing::debug!(%scope, "dropping unrecognised clause");
        continue;
      }
    };
    fold_clause(&mut out, &mut joins, scope, hits);
  }

  for (facet, Bounds { start, end }) in bounds {
    match (start, end) {
      (Some(start), Some(end)) => {
        let hit = FacetHit::new(facet, FacetValue::DateRange { start, end });
        fold_clause(&mut out, &mut joins, scope, vec![hit]);
      }
      _ => tracing::debug!(%scope, facet, "dropping half-open date range"),
    }
  }

  out
}

/// Add the hits of one top-level clause. Several values of a facet inside
/// one clause are alternatives; single values from separate clauses must
/// all match. A facet mixing the two cannot be represented and its later
/// clauses are dropped.
fn fold_clause(
  out: &mut Decoded,
  joins: &mut BTreeMap<String, Join>,
  scope: Scope,
  hits: Vec<FacetHit>,
) {
  let mut counts: BTreeMap<String, usize> = BTreeMap::new();
  for hit in &hits {
    *counts.entry(hit.facet_name.clone()).or_default() += 1;
  }

  let mut rejected = BTreeSet::new();
  for (facet, count) in counts {
    let join = match (joins.get(&facet), count) {
      (None, 1) => Join::Single,
      (None, _) => Join::Any,
      (Some(Join::Single | Join::All), 1) => Join::All,
      _ => {
        tracing::debug!(%scope, %facet, "dropping clause mixing AND and OR on one facet");
        rejected.insert(facet);
        continue;
      }
    };
    if join == Join::All {
      out.all_of.insert(facet.clone());
    }
    joins.insert(facet, join);
  }

  out
    .hits
    .extend(hits.into_iter().filter(|hit| !rejected.contains(&hit.facet_name)));
}

/// `{"<term>": {"id": ..}}` or `{"<term>": <literal>}` for a mapped term.
fn field_hit(
  scope: Scope,
  term: &str,
  inner: &Fragment,
  config: &FacetConfig,
) -> Option<FacetHit> {
  let Some(mapped) = config.facet_for_term(scope, term) else {
    tracing::debug!(%scope, term, "dropping unmapped search term");
    return None;
  };
  let value = match inner {
    Fragment::Value(literal) if !mapped.id_facet => FacetValue::from_literal(literal),
    other => FacetValue::Text(other.as_id()?.to_owned()),
  };
  Some(FacetHit::new(mapped.facet_name, value))
}

/// Every branch must decode to selections of one and the same facet;
/// anything else is not a facet selection.
fn or_hits(scope: Scope, clause: &Fragment, config: &FacetConfig) -> Vec<FacetHit> {
  let mut hits: Vec<FacetHit> = Vec::new();
  for branch in clause.disjuncts() {
    let decoded = decode(scope, branch, config);
    let same_facet = hits
      .first()
      .or(decoded.hits.first())
      .is_some_and(|first| decoded.hits.iter().all(|h| h.facet_name == first.facet_name));
    if decoded.text.is_some()
      || decoded.hits.is_empty()
      || !decoded.all_of.is_empty()
      || !same_facet
    {
      tracing::debug!(%scope, "dropping OR that is not a choice within one facet");
      return Vec::new();
    }
    for hit in decoded.hits {
      if !hits.contains(&hit) {
        hits.push(hit);
      }
    }
  }
  hits
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn decode_json(scope: Scope, value: serde_json::Value) -> Criteria {
    let fragment = Fragment::from_json(&value).unwrap();
    criteria_from_fragment(scope, &fragment, FacetConfig::global())
  }

  #[test]
  fn maps_scalar_and_id_terms() {
    let criteria = decode_json(
      Scope::Item,
      json!({ "AND": [
        { "isOnline": 1 },
        { "material": { "id": "urn:clay" } },
        { "text": "vase" },
      ] }),
    );
    assert_eq!(criteria.facets["itemIsOnline"], vec![FacetValue::Number(1)]);
    assert_eq!(criteria.facets["itemMaterialId"], vec![FacetValue::from("urn:clay")]);
    assert_eq!(criteria.text.as_deref(), Some("vase"));
  }

  #[test]
  fn or_of_one_facet_yields_several_values() {
    let criteria = decode_json(
      Scope::Work,
      json!({ "OR": [
        { "language": { "id": "urn:en" } },
        { "language": { "id": "urn:fr" } },
      ] }),
    );
    assert_eq!(
      criteria.facets["workLanguageId"],
      vec![FacetValue::from("urn:en"), FacetValue::from("urn:fr")]
    );
  }

  #[test]
  fn and_of_one_term_requires_every_value() {
    let criteria = decode_json(
      Scope::Item,
      json!({ "AND": [
        { "classification": { "id": "urn:A" } },
        { "classification": { "id": "urn:B" } },
      ] }),
    );
    assert_eq!(criteria.facets["itemTypeId"], vec![
      FacetValue::from("urn:A"),
      FacetValue::from("urn:B"),
    ]);
    assert!(criteria.all_of.contains("itemTypeId"));
  }

  #[test]
  fn mixed_and_or_on_one_facet_keeps_the_first_clause() {
    let criteria = decode_json(
      Scope::Work,
      json!({ "AND": [
        { "OR": [
          { "language": { "id": "urn:en" } },
          { "language": { "id": "urn:fr" } },
        ] },
        { "language": { "id": "urn:de" } },
      ] }),
    );
    assert_eq!(
      criteria.facets["workLanguageId"],
      vec![FacetValue::from("urn:en"), FacetValue::from("urn:fr")]
    );
    assert!(criteria.all_of.is_empty());
  }

  #[test]
  fn or_across_facets_is_dropped() {
    let criteria = decode_json(
      Scope::Work,
      json!({ "OR": [
        { "language": { "id": "urn:en" } },
        { "isOnline": 1 },
      ] }),
    );
    assert!(criteria.is_empty());
  }

  #[test]
  fn comparison_pair_becomes_a_date_range() {
    let criteria = decode_json(
      Scope::Item,
      json!({ "AND": [
        { "producedDate": "1950-01-01T00:00:00.000Z", "_comp": ">=" },
        { "producedDate": "1950-12-31T23:59:59.999Z", "_comp": "<=" },
      ] }),
    );
    assert_eq!(criteria.facets["itemProductionDate"], vec![FacetValue::DateRange {
      start: "1950-01-01T00:00:00.000Z".into(),
      end:   "1950-12-31T23:59:59.999Z".into(),
    }]);
  }

  #[test]
  fn half_open_range_is_dropped() {
    let criteria = decode_json(
      Scope::Item,
      json!({ "producedDate": "1950-01-01T00:00:00.000Z", "_comp": ">=" }),
    );
    assert!(criteria.is_empty());
  }

  #[test]
  fn member_of_goes_through_the_special_case() {
    let criteria = decode_json(
      Scope::Item,
      json!({ "AND": [
        { "memberOf": { "id": "urn:collection" } },
        { "OR": [
          { "memberOf": { "curatedBy": { "OR": [
            { "memberOf": { "id": "urn:u1" } }, { "id": "urn:u1" },
          ] } } },
          { "memberOf": { "curatedBy": { "OR": [
            { "memberOf": { "id": "urn:u2" } }, { "id": "urn:u2" },
          ] } } },
        ] },
      ] }),
    );
    assert_eq!(criteria.facets["responsibleCollections"], vec![FacetValue::from(
      "urn:collection"
    )]);
    assert_eq!(criteria.facets["responsibleUnits"], vec![
      FacetValue::from("urn:u1"),
      FacetValue::from("urn:u2"),
    ]);
  }

  #[test]
  fn unmapped_terms_are_dropped() {
    let criteria = decode_json(
      Scope::Place,
      json!({ "AND": [ { "nonsense": 1 }, { "partOf": { "id": "urn:p" } } ] }),
    );
    assert_eq!(criteria.facets.len(), 1);
    assert_eq!(criteria.facets["placePartOfId"], vec![FacetValue::from("urn:p")]);
  }
}
