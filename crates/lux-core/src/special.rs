//! Reverse translators for facets whose backend clause is nested deeper than
//! one field, where a plain search-term lookup cannot recover the facet.

use crate::{
  facet::{FacetHit, FacetValue},
  fragment::Fragment,
};

/// Reads a criteria object and returns the facet selections it encodes, or
/// `None` when it holds nothing recognisable. `Some` is never empty.
pub type SpecialCaseFn = fn(&Fragment) -> Option<Vec<FacetHit>>;

pub const RESPONSIBLE_UNITS: &str = "responsibleUnits";
pub const RESPONSIBLE_COLLECTIONS: &str = "responsibleCollections";

/// Invert the two `memberOf` shapes built by the item registry:
///
/// - every branch of `memberOf.curatedBy.OR` exposing an id, either directly
///   (`{"id": ..}`) or through a collection (`{"memberOf": {"id": ..}}`),
///   is a `responsibleUnits` selection;
/// - a top-level `memberOf.id` is a `responsibleCollections` selection.
pub fn parse_member_of(criteria: &Fragment) -> Option<Vec<FacetHit>> {
  let mut hits = Vec::new();

  for clause in criteria.conjuncts() {
    let Fragment::Field(name, member_of) = clause else {
      continue;
    };
    if name != "memberOf" {
      continue;
    }

    for part in member_of.conjuncts() {
      match part {
        Fragment::Field(name, curated_by) if name == "curatedBy" => {
          for branch in curated_by.disjuncts() {
            if let Some(id) = exposed_id(branch) {
              push_unique(&mut hits, RESPONSIBLE_UNITS, id);
            }
          }
        }
        Fragment::IdRef(id) => push_unique(&mut hits, RESPONSIBLE_COLLECTIONS, id),
        _ => {}
      }
    }
  }

  (!hits.is_empty()).then_some(hits)
}

fn exposed_id(branch: &Fragment) -> Option<&str> {
  branch.as_id().or_else(|| {
    branch.conjuncts().into_iter().find_map(|part| match part {
      Fragment::Field(name, inner) if name == "memberOf" => inner.as_id(),
      _ => None,
    })
  })
}

fn push_unique(hits: &mut Vec<FacetHit>, facet_name: &str, id: &str) {
  let hit = FacetHit {
    facet_name: facet_name.to_owned(),
    value:      FacetValue::Text(id.to_owned()),
  };
  if !hits.contains(&hit) {
    hits.push(hit);
  }
}
