//! Criteria codec for LUX.
//!
//! Converts between [`lux_core`] criteria and the `q` parameter carried by
//! backend HAL links and results-page URLs. Pure synchronous; no HTTP.
//!
//! # Quick start
//!
//! ```no_run
//! use lux_core::FacetConfig;
//!
//! let config = FacetConfig::global();
//! let link = "/api/search/item?q=%7B%22isOnline%22%3A1%7D";
//! let criteria = lux_criteria::parse(link, config).unwrap();
//! println!("{}", lux_criteria::results_link(&criteria, config).unwrap());
//!
//! let decoded = lux_criteria::parse_link(link).unwrap();
//! println!("{}", lux_criteria::results_link_for(&decoded));
//! ```

pub mod error;
mod link;
mod parse;
mod serialize;

pub use error::{Error, Result};
pub use link::LinkKind;
use lux_core::{Criteria, FacetConfig, FacetHit, Fragment, Scope, Tab};
use serde::Serialize;

// ─── Public types ────────────────────────────────────────────────────────────

/// A decoded backend link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkCriteria {
  /// From the path, or from a `_scope` key inside `q`.
  pub scope: Scope,
  pub kind:  LinkKind,
  /// `None` when the link carries no `q`.
  pub query: Option<Fragment>,
  pub name:  Option<String>,
  pub page:  Option<u32>,
  pub sort:  Option<String>,
}

impl LinkCriteria {
  pub fn tab(&self) -> Tab { self.scope.tab() }
}

/// The results tab a link targets and, for facets links, the facet name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabAndName {
  pub tab:  Tab,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
}

// ─── Encoding ────────────────────────────────────────────────────────────────

/// Compact JSON of `fragment`.
pub fn serialize(fragment: &Fragment) -> String {
  serialize::serialize(fragment)
}

/// The `q` value for `criteria`; `None` when nothing is selected.
pub fn serialize_criteria(criteria: &Criteria, config: &FacetConfig) -> Option<String> {
  serialize::serialize_criteria(criteria, config)
}

/// The results-page link for `criteria`; `None` when nothing is selected.
///
/// Only facet selections survive the trip through [`Criteria`]; to follow a
/// backend link use [`results_link_for`].
pub fn results_link(criteria: &Criteria, config: &FacetConfig) -> Option<String> {
  serialize::results_link(criteria, config)
}

/// The results-page link showing what a backend link returns, with its `q`
/// and `sort` carried over verbatim.
pub fn results_link_for(link: &LinkCriteria) -> String {
  serialize::results_link_for(link)
}

/// A backend API link of `kind` for `fragment`, optionally naming a facet.
pub fn api_link(
  kind: LinkKind,
  scope: Scope,
  fragment: &Fragment,
  name: Option<&str>,
) -> String {
  serialize::api_link(kind, scope, fragment, name)
}

/// The criteria behind one entry of a related-facets list.
pub fn related_facet_link(criteria: &Fragment, search_term: &str, uri: &str) -> Fragment {
  serialize::related_facet_link(criteria, search_term, uri)
}

// ─── Decoding ────────────────────────────────────────────────────────────────

/// Decode a backend link, reporting why it could not be read.
pub fn try_parse_link(link: &str) -> Result<LinkCriteria> { link::decode(link) }

/// Decode a backend link. Malformed links are logged and yield `None`.
pub fn parse_link(link: &str) -> Option<LinkCriteria> {
  link::decode(link)
    .inspect_err(|err| tracing::warn!(%err, link, "discarding link"))
    .ok()
}

/// Recover facet selections and free text from backend criteria. Clauses
/// with no facet counterpart are dropped.
pub fn criteria_from_fragment(
  scope: Scope,
  fragment: &Fragment,
  config: &FacetConfig,
) -> Criteria {
  parse::criteria_from_fragment(scope, fragment, config)
}

/// The facet selections `fragment` encodes, in clause order.
pub fn facet_hits(scope: Scope, fragment: &Fragment, config: &FacetConfig) -> Vec<FacetHit> {
  parse::decode(scope, fragment, config).hits
}

/// [`parse_link`] then [`criteria_from_fragment`]; the link's `sort` is kept.
pub fn parse(link: &str, config: &FacetConfig) -> Option<Criteria> {
  let decoded = parse_link(link)?;
  let mut criteria = match &decoded.query {
    Some(query) => criteria_from_fragment(decoded.scope, query, config),
    None => Criteria::new(decoded.scope),
  };
  criteria.sort = decoded.sort;
  Some(criteria)
}

/// The results tab of `link` and, for a facets link, its `name`. `None` for
/// links of another kind or links that cannot be read.
pub fn extract_tab_and_name(link: &str, kind: LinkKind) -> Option<TabAndName> {
  let raw = link::split(link).ok()?;
  if raw.kind != kind {
    return None;
  }
  let scope = match raw.scope {
    Some(scope) => scope,
    None => link::decode_q(raw.q.as_deref()?).ok()?.1?,
  };
  Some(TabAndName {
    tab:  scope.tab(),
    name: (kind == LinkKind::Facets).then_some(raw.name).flatten(),
  })
}

// ─── Round-trip tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod roundtrip_tests {
  use lux_core::FacetValue;
  use serde_json::json;

  use super::*;

  fn config() -> &'static FacetConfig { FacetConfig::global() }

  fn link_for(criteria: &Criteria) -> String {
    let q = criteria.to_fragment(config()).unwrap();
    api_link(LinkKind::Search, criteria.scope, &q, None)
  }

  #[test]
  fn parse_serialize_parse_is_stable() {
    let criteria = Criteria::new(Scope::Item)
      .with_text("blue vase")
      .with_facet("itemIsOnline", 1_i64)
      .with_facet("itemMaterialId", "urn:clay")
      .with_facet("itemMaterialId", "urn:glass")
      .with_facet("responsibleUnits", "urn:unit")
      .with_facet("responsibleCollections", "urn:collection")
      .with_facet("itemProductionDate", FacetValue::DateRange {
        start: "1950-01-01T00:00:00.000Z".into(),
        end:   "1959-12-31T23:59:59.999Z".into(),
      });

    let first = parse(&link_for(&criteria), config()).unwrap();
    assert_eq!(first, criteria);

    let second = parse(&link_for(&first), config()).unwrap();
    assert_eq!(second, first);
  }

  fn q_of(link: &str) -> serde_json::Value {
    let (_, query) = link.split_once('?').unwrap();
    let q = url::form_urlencoded::parse(query.as_bytes())
      .find(|(key, _)| key == "q")
      .unwrap()
      .1;
    serde_json::from_str(&q).unwrap()
  }

  #[test]
  fn and_of_one_term_survives_reencoding() {
    let q = Fragment::from_json(&json!({ "AND": [
      { "classification": { "id": "urn:A" } },
      { "classification": { "id": "urn:B" } },
    ] }))
    .unwrap();
    let link = api_link(LinkKind::Search, Scope::Item, &q, None);

    let criteria = parse(&link, config()).unwrap();
    assert_eq!(
      serialize_criteria(&criteria, config()).as_deref(),
      Some(r#"{"AND":[{"classification":{"id":"urn:A"}},{"classification":{"id":"urn:B"}}]}"#)
    );
    assert_eq!(parse(&link_for(&criteria), config()).unwrap(), criteria);
  }

  #[test]
  fn results_link_for_keeps_clauses_without_a_facet() {
    let related = json!({ "AND": [
      { "isOnline": 1 },
      { "OR": [
        { "producedBy": { "id": "urn:X" } },
        { "encounteredBy": { "id": "urn:X" } },
      ] },
    ] });
    let q = Fragment::from_json(&related).unwrap();
    let mut link = api_link(LinkKind::Search, Scope::Item, &q, None);
    link.push_str("&sort=itemProductionDate%3Adesc");

    let decoded = parse_link(&link).unwrap();
    let results = results_link_for(&decoded);
    assert!(results.starts_with("/view/results/objects?"));
    assert!(results.ends_with("&searchLink=true&is=itemProductionDate%3Adesc"));
    assert_eq!(q_of(&results), related);

    // Going through the facet selection keeps only the mapped clause.
    let criteria = parse(&link, config()).unwrap();
    let narrowed = results_link(&criteria, config()).unwrap();
    assert_eq!(q_of(&narrowed), json!({ "isOnline": 1 }));
  }

  #[test]
  fn empty_query_object_means_no_criteria() {
    let decoded = parse_link("/api/facets/item?q=%7B%7D&name=itemProductionDate").unwrap();
    assert_eq!(decoded.scope, Scope::Item);
    assert_eq!(decoded.query, None);
    assert_eq!(decoded.name.as_deref(), Some("itemProductionDate"));
    assert_eq!(
      parse("/api/search/agent?q=%7B%7D", config()),
      Some(Criteria::new(Scope::Agent))
    );
  }

  #[test]
  fn serialized_fragment_parses_back() {
    let q = Fragment::field("classification", Fragment::id("urn:type"));
    let json: serde_json::Value = serde_json::from_str(&serialize(&q)).unwrap();
    assert_eq!(Fragment::from_json(&json).unwrap(), q);
  }

  #[test]
  fn parse_keeps_sort_and_embedded_scope() {
    let link = "https://lux.example.org/api/search?q=%7B%22_scope%22%3A%22work%22%2C%22isOnline%22%3A1%7D&sort=workCreationDate%3Adesc";
    let criteria = parse(link, config()).unwrap();
    assert_eq!(criteria.scope, Scope::Work);
    assert_eq!(criteria.facets["workIsOnline"], vec![FacetValue::Number(1)]);
    assert_eq!(criteria.sort.as_deref(), Some("workCreationDate:desc"));
  }

  #[test]
  fn malformed_links_yield_none() {
    assert_eq!(parse_link("/api/search/item?q=%7Bnot-json"), None);
    assert_eq!(parse_link("/api/search/item?q=null"), None);
    assert_eq!(parse_link("http://[::1"), None);
    assert!(try_parse_link("/api/search/item?q=null").is_err());
  }

  #[test]
  fn extracts_tab_and_name_for_matching_kind() {
    let link = "api/facets/item?q=%7B%7D&name=itemProductionDate";
    assert_eq!(
      extract_tab_and_name(link, LinkKind::Facets),
      Some(TabAndName {
        tab:  Tab::Objects,
        name: Some("itemProductionDate".into()),
      })
    );
    assert_eq!(extract_tab_and_name(link, LinkKind::Search), None);

    let search = "/api/search/agent?q=%7B%7D&name=ignored";
    assert_eq!(
      extract_tab_and_name(search, LinkKind::Search),
      Some(TabAndName {
        tab:  Tab::People,
        name: None,
      })
    );
  }

  #[test]
  fn facet_hits_are_in_clause_order() {
    let q = Fragment::And(vec![
      Fragment::field("partOf", Fragment::id("urn:p")),
      Fragment::field("classification", Fragment::id("urn:t")),
    ]);
    let hits = facet_hits(Scope::Place, &q, config());
    assert_eq!(hits, vec![
      FacetHit::new("placePartOfId", "urn:p"),
      FacetHit::new("placeTypeId", "urn:t"),
    ]);
  }
}
