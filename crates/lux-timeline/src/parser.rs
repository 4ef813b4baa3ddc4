//! [`TimelineParser`]: timeline data for a set of date facets.

use std::collections::HashMap;

use lux_criteria::LinkKind;

use crate::aggregate::{
  TimelineBucket, TimelineYear, Window, YearTotals, add_search_tag_to_facet_values,
  collapse_into, fill_gaps_with_counts, initial_window, sorted_years,
};

/// The `name` parameter of a facets link: the facet the buckets belong to.
pub fn search_tag_from_faceted_search(link: &str) -> Option<String> {
  lux_criteria::extract_tab_and_name(link, LinkKind::Facets)?.name
}

/// Per-year totals built from the buckets of one or more date facets, keyed
/// by the facets link each page of buckets was fetched from.
#[derive(Debug, Clone, Default)]
pub struct TimelineParser {
  collapsed: HashMap<String, YearTotals>,
}

impl TimelineParser {
  pub fn new<'a, I>(results: I) -> Self
  where
    I: IntoIterator<Item = (&'a String, &'a Vec<TimelineBucket>)>,
  {
    let mut collapsed = HashMap::new();
    for (link, buckets) in results {
      let Some(facet) = search_tag_from_faceted_search(link) else {
        tracing::warn!(%link, "dropping timeline buckets without a facet name");
        continue;
      };
      let tagged = add_search_tag_to_facet_values(buckets, &facet);
      collapse_into(&mut collapsed, &tagged);
    }
    Self { collapsed }
  }

  /// Year → totals.
  pub fn transformed(&self) -> &HashMap<String, YearTotals> { &self.collapsed }

  pub fn sorted_years(&self) -> Vec<String> { sorted_years(&self.collapsed) }

  /// The contiguous axis, with counts for observed years.
  pub fn years_with_no_data(&self) -> Vec<TimelineYear> {
    fill_gaps_with_counts(&self.sorted_years(), &self.collapsed)
  }

  pub fn start_and_end_index(&self) -> Window {
    let sorted = self.sorted_years();
    let filled = fill_gaps_with_counts(&sorted, &self.collapsed);
    initial_window(&sorted, &self.collapsed, &filled)
  }
}
