//! Bucket aggregation: collapse per year, sort, fill gaps, pick the initial
//! window.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::year::{parse_year, year_from_date_string};

// ─── Types ───────────────────────────────────────────────────────────────────

/// One facet value of a date facet, as returned by the facets endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineBucket {
  pub value:       String,
  pub total_items: u64,
}

/// A bucket annotated with the facet it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedBucket {
  pub facet_name:  String,
  pub value:       String,
  pub total_items: u64,
}

/// Totals for one year: overall and per facet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearTotals {
  pub total:  u64,
  #[serde(flatten)]
  pub facets: BTreeMap<String, u64>,
}

/// One bar slot of the timeline axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineYear {
  pub year:     String,
  pub count:    u64,
  pub has_data: bool,
}

/// Inclusive indices into the filled axis shown before the user zooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
  pub initial_start: usize,
  pub initial_end:   usize,
}

/// Axes up to this many years are shown whole.
const SHOW_WHOLE_AXIS: usize = 20;

// ─── Operations ──────────────────────────────────────────────────────────────

/// Tag every bucket of one facet with its name.
pub fn add_search_tag_to_facet_values(
  buckets: &[TimelineBucket],
  facet_name: &str,
) -> Vec<TaggedBucket> {
  buckets
    .iter()
    .map(|b| TaggedBucket {
      facet_name:  facet_name.to_owned(),
      value:       b.value.clone(),
      total_items: b.total_items,
    })
    .collect()
}

/// Sum buckets per year and per facet into `into`. Buckets whose date has no
/// readable year are dropped.
pub(crate) fn collapse_into(
  into: &mut HashMap<String, YearTotals>,
  buckets: &[TaggedBucket],
) {
  for bucket in buckets {
    let year = match year_from_date_string(&bucket.value) {
      Ok(year) => year,
      Err(err) => {
        tracing::warn!(%err, facet = %bucket.facet_name, "dropping timeline bucket");
        continue;
      }
    };
    let totals = into.entry(year).or_default();
    totals.total += bucket.total_items;
    *totals.facets.entry(bucket.facet_name.clone()).or_default() +=
      bucket.total_items;
  }
}

pub fn collapse_to_years(buckets: &[TaggedBucket]) -> HashMap<String, YearTotals> {
  let mut collapsed = HashMap::new();
  collapse_into(&mut collapsed, buckets);
  collapsed
}

/// Years of `collapsed` in numeric order.
pub fn sorted_years(collapsed: &HashMap<String, YearTotals>) -> Vec<String> {
  let mut years: Vec<(i64, &String)> = collapsed
    .keys()
    .filter_map(|y| parse_year(y).ok().map(|n| (n, y)))
    .collect();
  years.sort_unstable();
  years.into_iter().map(|(_, y)| y.clone()).collect()
}

/// Every year from the first to the last of `sorted`, zero counts, with
/// `has_data` set for the observed ones.
pub fn fill_gaps(sorted: &[String]) -> Vec<TimelineYear> {
  fill(sorted, |_| 0)
}

/// [`fill_gaps`] with counts taken from `collapsed`.
pub fn fill_gaps_with_counts(
  sorted: &[String],
  collapsed: &HashMap<String, YearTotals>,
) -> Vec<TimelineYear> {
  fill(sorted, |year| collapsed.get(year).map_or(0, |t| t.total))
}

fn fill(sorted: &[String], count: impl Fn(&str) -> u64) -> Vec<TimelineYear> {
  let observed: Vec<i64> = sorted.iter().filter_map(|y| parse_year(y).ok()).collect();
  let (Some(&first), Some(&last)) = (observed.first(), observed.last()) else {
    return Vec::new();
  };

  (first..=last)
    .map(|n| {
      let year = n.to_string();
      let has_data = observed.binary_search(&n).is_ok();
      TimelineYear {
        count: if has_data { count(&year) } else { 0 },
        year,
        has_data,
      }
    })
    .collect()
}

/// The slice of the filled axis shown initially.
///
/// Axes of at most 20 years are shown whole. Longer axes show two thirds of
/// their length, centred on the count-weighted mean year (rounded half up)
/// and kept inside the axis.
pub fn initial_window(
  sorted: &[String],
  collapsed: &HashMap<String, YearTotals>,
  filled: &[TimelineYear],
) -> Window {
  let len = filled.len();
  if len == 0 {
    return Window {
      initial_start: 0,
      initial_end:   0,
    };
  }
  if len <= SHOW_WHOLE_AXIS {
    return Window {
      initial_start: 0,
      initial_end:   len - 1,
    };
  }

  let span = len * 2 / 3;
  let center = weighted_center(sorted, collapsed, filled);
  let start = center.saturating_sub(span / 2).min(len - 1 - span);
  Window {
    initial_start: start,
    initial_end:   start + span,
  }
}

/// Mean axis index of the observed years, weighted by their totals.
fn weighted_center(
  sorted: &[String],
  collapsed: &HashMap<String, YearTotals>,
  filled: &[TimelineYear],
) -> usize {
  let Some(origin) = filled.first().and_then(|y| parse_year(&y.year).ok()) else {
    return 0;
  };
  let indexed: Vec<(u64, u64)> = sorted
    .iter()
    .filter_map(|y| {
      let index = u64::try_from(parse_year(y).ok()? - origin).ok()?;
      Some((index, collapsed.get(y).map_or(0, |t| t.total)))
    })
    .collect();
  if indexed.is_empty() {
    return 0;
  }

  let total: u64 = indexed.iter().map(|(_, w)| w).sum();
  let (sum, weight) = if total == 0 {
    (indexed.iter().map(|(i, _)| i).sum::<u64>(), indexed.len() as u64)
  } else {
    (indexed.iter().map(|(i, w)| i * w).sum(), total)
  };
  ((2 * sum + weight) / (2 * weight)) as usize
}
