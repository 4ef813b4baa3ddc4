//! HAL link decoding.
//!
//! Backend links look like `<base>/api/<kind>/<scope>?q=<json>&name=..`.
//! Relative links are resolved against a placeholder base; only the path and
//! query are ever read.

use lux_core::{Fragment, Scope};
use serde_json::Value;
use strum::{Display, EnumString, IntoStaticStr};
use url::Url;

use crate::{
  LinkCriteria,
  error::{Error, Result},
};

const PLACEHOLDER_BASE: &str = "http://localhost/";

/// Key a criteria object may carry to name its own scope.
const SCOPE_KEY: &str = "_scope";

/// The API endpoint family a link points at.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum LinkKind {
  Search,
  SearchEstimate,
  Facets,
}

/// A link split into its parts, with `q` still encoded.
pub(crate) struct RawLink {
  pub kind:  LinkKind,
  pub scope: Option<Scope>,
  pub q:     Option<String>,
  pub name:  Option<String>,
  pub page:  Option<u32>,
  pub sort:  Option<String>,
}

pub(crate) fn resolve(link: &str) -> Result<Url> {
  let resolved = match Url::parse(link) {
    Err(url::ParseError::RelativeUrlWithoutBase) => {
      Url::parse(PLACEHOLDER_BASE).and_then(|base| base.join(link))
    }
    other => other,
  };
  resolved.map_err(|source| Error::InvalidUrl {
    link: link.to_owned(),
    source,
  })
}

pub(crate) fn split(link: &str) -> Result<RawLink> {
  let url = resolve(link)?;
  let segments: Vec<&str> = url
    .path_segments()
    .map(|s| s.filter(|s| !s.is_empty()).collect())
    .unwrap_or_default();

  let Some((at, kind)) = segments
    .iter()
    .enumerate()
    .find_map(|(i, s)| s.parse::<LinkKind>().ok().map(|k| (i, k)))
  else {
    return Err(Error::NotAnApiLink(link.to_owned()));
  };

  let scope = match segments.get(at + 1) {
    Some(s) => Some(
      s.parse::<Scope>()
        .map_err(|_| Error::UnknownScope((*s).to_owned()))?,
    ),
    None => None,
  };

  let mut raw = RawLink {
    kind,
    scope,
    q: None,
    name: None,
    page: None,
    sort: None,
  };
  for (key, value) in url.query_pairs() {
    match key.as_ref() {
      "q" => raw.q = Some(value.into_owned()),
      "name" => raw.name = Some(value.into_owned()),
      "page" => raw.page = value.parse().ok(),
      "sort" => raw.sort = Some(value.into_owned()),
      _ => {}
    }
  }
  Ok(raw)
}

/// Decode a `q` parameter, lifting out an embedded `_scope` key. An object
/// with nothing else in it places no constraint and decodes to `None`.
pub(crate) fn decode_q(q: &str) -> Result<(Option<Fragment>, Option<Scope>)> {
  let mut value: Value = serde_json::from_str(q)?;

  let mut scope = None;
  if let Value::Object(map) = &mut value {
    if let Some(embedded) = map.remove(SCOPE_KEY) {
      let name = embedded.as_str().unwrap_or_default();
      scope = Some(
        name
          .parse::<Scope>()
          .map_err(|_| Error::UnknownScope(name.to_owned()))?,
      );
    }
    if map.is_empty() {
      return Ok((None, scope));
    }
  }

  Ok((Some(Fragment::from_json(&value)?), scope))
}

pub(crate) fn decode(link: &str) -> Result<LinkCriteria> {
  let raw = split(link)?;
  let (query, embedded) = match raw.q.as_deref() {
    Some(q) => decode_q(q)?,
    None => (None, None),
  };
  let scope = raw
    .scope
    .or(embedded)
    .ok_or_else(|| Error::MissingScope(link.to_owned()))?;

  Ok(LinkCriteria {
    scope,
    kind: raw.kind,
    query,
    name: raw.name,
    page: raw.page,
    sort: raw.sort,
  })
}
