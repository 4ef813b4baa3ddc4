//! Outbound encoding: criteria → `q` → links.

use lux_core::{Criteria, FacetConfig, Fragment, Scope};
use url::form_urlencoded;

use crate::{LinkCriteria, link::LinkKind};

const EMPTY_QUERY: &str = "{}";

/// Compact JSON of a fragment, as carried in a `q` parameter.
pub(crate) fn serialize(fragment: &Fragment) -> String {
  fragment.to_json().to_string()
}

pub(crate) fn serialize_criteria(
  criteria: &Criteria,
  config: &FacetConfig,
) -> Option<String> {
  criteria.to_fragment(config).map(|q| serialize(&q))
}

/// `/view/results/<tab>?q=..&searchLink=true[&<prefix>s=<sort>]`
fn results_url(scope: Scope, q: &str, sort: Option<&str>) -> String {
  let mut query = form_urlencoded::Serializer::new(String::new());
  query.append_pair("q", q);
  query.append_pair("searchLink", "true");
  if let Some(sort) = sort {
    query.append_pair(&scope.sort_param(), sort);
  }
  format!("/view/results/{}?{}", scope.tab(), query.finish())
}

pub(crate) fn results_link(
  criteria: &Criteria,
  config: &FacetConfig,
) -> Option<String> {
  let q = serialize_criteria(criteria, config)?;
  Some(results_url(criteria.scope, &q, criteria.sort.as_deref()))
}

/// Carries the link's own `q` across unchanged, including clauses with no
/// facet counterpart. A link without criteria gets `{}`.
pub(crate) fn results_link_for(link: &LinkCriteria) -> String {
  let q = link
    .query
    .as_ref()
    .map_or_else(|| EMPTY_QUERY.to_owned(), serialize);
  results_url(link.scope, &q, link.sort.as_deref())
}

/// `/api/<kind>/<scope>?q=..[&name=..]`
pub(crate) fn api_link(
  kind: LinkKind,
  scope: Scope,
  fragment: &Fragment,
  name: Option<&str>,
) -> String {
  let mut query = form_urlencoded::Serializer::new(String::new());
  query.append_pair("q", &serialize(fragment));
  if let Some(name) = name {
    query.append_pair("name", name);
  }
  format!("/api/{kind}/{scope}?{}", query.finish())
}

/// `{"AND": [<criteria>, {"<search_term>": {"id": "<uri>"}}]}`
pub(crate) fn related_facet_link(
  criteria: &Fragment,
  search_term: &str,
  uri: &str,
) -> Fragment {
  Fragment::And(vec![
    criteria.clone(),
    Fragment::field(search_term, Fragment::id(uri)),
  ])
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn serialize_is_compact() {
    let q = Fragment::field("isOnline", Fragment::value(1_i64));
    assert_eq!(serialize(&q), r#"{"isOnline":1}"#);
  }

  #[test]
  fn results_link_carries_tab_and_sort() {
    let mut criteria =
      Criteria::new(Scope::Item).with_facet("itemIsOnline", 1_i64);
    criteria.sort = Some("itemProductionDate:asc".into());
    let link = results_link(&criteria, FacetConfig::global()).unwrap();
    assert_eq!(
      link,
      "/view/results/objects?q=%7B%22isOnline%22%3A1%7D&searchLink=true\
       &is=itemProductionDate%3Aasc"
    );
  }

  #[test]
  fn results_link_for_an_empty_link_query() {
    let link = LinkCriteria {
      scope: Scope::Work,
      kind:  LinkKind::Search,
      query: None,
      name:  None,
      page:  None,
      sort:  Some("workTitle:asc".into()),
    };
    assert_eq!(
      results_link_for(&link),
      "/view/results/works?q=%7B%7D&searchLink=true&ws=workTitle%3Aasc"
    );
  }

  #[test]
  fn results_link_needs_a_selection() {
    let criteria = Criteria::new(Scope::Agent);
    assert_eq!(results_link(&criteria, FacetConfig::global()), None);
  }

  #[test]
  fn related_facet_link_ands_the_entry() {
    let base = Fragment::field("text", Fragment::value("rembrandt"));
    let q = related_facet_link(&base, "aboutAgent", "urn:agent:1");
    assert_eq!(
      q.to_json(),
      json!({ "AND": [
        { "text": "rembrandt" },
        { "aboutAgent": { "id": "urn:agent:1" } },
      ] })
    );
  }

  #[test]
  fn api_link_names_kind_and_scope() {
    let q = Fragment::field("isOnline", Fragment::value(1_i64));
    assert_eq!(
      api_link(LinkKind::Facets, Scope::Set, &q, Some("setTypeId")),
      "/api/facets/set?q=%7B%22isOnline%22%3A1%7D&name=setTypeId"
    );
  }
}
