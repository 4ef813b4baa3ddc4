//! Era-aware year handling: extracting a year from a facet date, labelling
//! it, and formatting it back into ISO-8601.

use crate::error::{Error, Result};

/// Years may carry up to six digits (ISO-8601 expanded representation).
const MAX_YEAR_DIGITS: usize = 6;

/// The year of an ISO-8601 date string, without leading zeros.
///
/// `-002017-10-20T00:00:00` → `-2017`, `2017-10-20T00:00:00` → `2017`,
/// `+012000-01-01T00:00:00` → `12000`.
pub fn year_from_date_string(raw: &str) -> Result<String> {
  let (negative, rest) = match raw.strip_prefix('-') {
    Some(rest) => (true, rest),
    None => (false, raw.strip_prefix('+').unwrap_or(raw)),
  };
  let end = rest.find(['-', 'T']).unwrap_or(rest.len());
  let digits = &rest[..end];
  if digits.is_empty()
    || digits.len() > MAX_YEAR_DIGITS
    || !digits.bytes().all(|b| b.is_ascii_digit())
  {
    return Err(Error::InvalidDate(raw.to_owned()));
  }

  let year = match digits.trim_start_matches('0') {
    "" => "0",
    trimmed => trimmed,
  };
  Ok(if negative && year != "0" {
    format!("-{year}")
  } else {
    year.to_owned()
  })
}

/// `-2024` → `2024 B.C.E.`, `2024` → `2024 C.E.`
pub fn year_with_label(year: &str) -> String {
  match year.strip_prefix('-') {
    Some(bce) => format!("{bce} B.C.E."),
    None => format!("{year} C.E."),
  }
}

pub(crate) fn parse_year(year: &str) -> Result<i64> {
  year.parse().map_err(|_| Error::InvalidDate(year.to_owned()))
}

/// Four digits inside 0000–9999, a sign and six digits outside.
pub(crate) fn iso_year(year: i64) -> String {
  if (0..=9999).contains(&year) {
    format!("{year:04}")
  } else {
    let sign = if year < 0 { '-' } else { '+' };
    format!("{sign}{:06}", year.unsigned_abs())
  }
}

/// First and last instant of `year`.
pub(crate) fn year_bounds(year: i64) -> (String, String) {
  let y = iso_year(year);
  (
    format!("{y}-01-01T00:00:00.000Z"),
    format!("{y}-12-31T23:59:59.999Z"),
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bce_year_drops_padding() {
    assert_eq!(year_from_date_string("-002017-10-20T00:00:00").unwrap(), "-2017");
  }

  #[test]
  fn ce_year() {
    assert_eq!(year_from_date_string("2017-10-20T00:00:00").unwrap(), "2017");
    assert_eq!(year_from_date_string("0998-01-01").unwrap(), "998");
    assert_eq!(year_from_date_string("1945").unwrap(), "1945");
  }

  #[test]
  fn expanded_years_read_back() {
    assert_eq!(year_from_date_string("+012000-01-01T00:00:00Z").unwrap(), "12000");
    assert_eq!(year_from_date_string(&iso_year(12000)).unwrap(), "12000");
    assert_eq!(year_from_date_string(&year_bounds(-5).1).unwrap(), "-5");
  }

  #[test]
  fn year_zero_has_no_sign() {
    assert_eq!(year_from_date_string("-0000-01-01").unwrap(), "0");
  }

  #[test]
  fn malformed_dates_are_errors() {
    for raw in ["", "-", "+", "+-12", "T00:00", "19x5-01-01", "1234567-01-01", "soon"] {
      assert!(
        matches!(year_from_date_string(raw), Err(Error::InvalidDate(_))),
        "{raw:?}"
      );
    }
  }

  #[test]
  fn labels_by_era() {
    assert_eq!(year_with_label("-2024"), "2024 B.C.E.");
    assert_eq!(year_with_label("2024"), "2024 C.E.");
  }

  #[test]
  fn iso_years_expand_outside_four_digits() {
    assert_eq!(iso_year(1950), "1950");
    assert_eq!(iso_year(998), "0998");
    assert_eq!(iso_year(-2017), "-002017");
    assert_eq!(iso_year(12000), "+012000");
    assert_eq!(year_bounds(-5).0, "-000005-01-01T00:00:00.000Z");
  }
}
