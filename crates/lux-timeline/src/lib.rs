//! Timeline aggregation for LUX date facets.
//!
//! Turns the buckets returned for one or more date facets into a contiguous
//! per-year axis with totals, era labels and an initial zoom window, and
//! builds the criteria a single bar links to.

mod aggregate;
pub mod error;
mod parser;
mod year;

pub use aggregate::{
  TaggedBucket, TimelineBucket, TimelineYear, Window, YearTotals,
  add_search_tag_to_facet_values, collapse_to_years, fill_gaps,
  fill_gaps_with_counts, initial_window, sorted_years,
};
pub use error::{Error, Result};
use lux_core::{Criteria, FacetConfig, FacetValue, Scope};
pub use parser::{TimelineParser, search_tag_from_faceted_search};
pub use year::{year_from_date_string, year_with_label};

/// Criteria selecting every record whose `facet` date falls in `year`.
pub fn year_range_criteria(
  config: &FacetConfig,
  scope: Scope,
  facet: &str,
  year: &str,
) -> Result<Criteria> {
  if config.facet(scope, facet).is_none() {
    return Err(
      lux_core::Error::UnknownFacet {
        scope,
        facet: facet.to_owned(),
      }
      .into(),
    );
  }
  let (start, end) = year::year_bounds(year::parse_year(year)?);
  Ok(Criteria::new(scope).with_facet(facet, FacetValue::DateRange { start, end }))
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn bar_criteria_cover_the_whole_year() {
    let criteria = year_range_criteria(
      FacetConfig::global(),
      Scope::Item,
      "itemProductionDate",
      "1979",
    )
    .unwrap();
    let q = criteria.to_fragment(FacetConfig::global()).unwrap();
    assert_eq!(
      q.to_json(),
      json!({ "AND": [
        { "producedDate": "1979-01-01T00:00:00.000Z", "_comp": ">=" },
        { "producedDate": "1979-12-31T23:59:59.999Z", "_comp": "<=" },
      ] })
    );
  }

  #[test]
  fn bce_bars_use_expanded_years() {
    let criteria =
      year_range_criteria(FacetConfig::global(), Scope::Event, "eventStartDate", "-2017")
        .unwrap();
    assert_eq!(criteria.facets["eventStartDate"], vec![FacetValue::DateRange {
      start: "-002017-01-01T00:00:00.000Z".into(),
      end:   "-002017-12-31T23:59:59.999Z".into(),
    }]);
  }

  #[test]
  fn bad_inputs_are_errors() {
    let config = FacetConfig::global();
    assert!(matches!(
      year_range_criteria(config, Scope::Item, "itemProductionDate", "soon"),
      Err(Error::InvalidDate(_))
    ));
    assert!(matches!(
      year_range_criteria(config, Scope::Work, "itemProductionDate", "1979"),
      Err(Error::Core(lux_core::Error::UnknownFacet { .. }))
    ));
  }
}
