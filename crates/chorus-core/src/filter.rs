//! The filter shared by every read path.
//!
//! [`FeedbackFilter`] is a plain value: building one validates the caller's
//! parameters but runs nothing. Storage backends translate it into their own
//! query language, so listing, metrics and trend all select exactly the same
//! rows.

use chrono::{DateTime, Datelike as _, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use crate::{Error, Result, feedback::FeedbackStatus};

/// Bounds are compared as RFC 3339 text, which only orders correctly for
/// four-digit years.
const MAX_YEAR: i32 = 9999;

/// Raw query-string parameters, exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
  /// `YYYY-MM-DD`, inclusive.
  pub start:    Option<String>,
  /// `YYYY-MM-DD`, inclusive of the whole day.
  pub end:      Option<String>,
  pub store_id: Option<String>,
  pub area:     Option<String>,
  pub status:   Option<String>,
}

/// A validated conjunction of optional constraints over feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackFilter {
  /// Inclusive lower bound on `timestamp`.
  pub from:     Option<DateTime<Utc>>,
  /// Exclusive upper bound on `timestamp`.
  pub until:    Option<DateTime<Utc>>,
  pub store_id: Option<i64>,
  /// Exact match on the linked store's area; requires a join.
  pub area:     Option<String>,
  pub status:   Option<FeedbackStatus>,
}

impl FeedbackFilter {
  /// Validate `params` into a filter. Any malformed value fails the whole
  /// build; empty values count as absent.
  pub fn from_params(params: &FilterParams) -> Result<Self> {
    let from = present(&params.start)
      .map(|s| parse_date("start", s))
      .transpose()?
      .map(start_of_day);

    // An end on the last four-digit day leaves the range open above.
    let until = present(&params.end)
      .map(|s| parse_date("end", s))
      .transpose()?
      .and_then(|d| d.succ_opt())
      .filter(|d| d.year() <= MAX_YEAR)
      .map(start_of_day);

    let store_id = present(&params.store_id)
      .map(|s| {
        s.trim()
          .parse::<i64>()
          .map_err(|_| Error::InvalidStoreId(s.to_owned()))
      })
      .transpose()?;

    let status = present(&params.status)
      .map(FeedbackStatus::parse)
      .transpose()?;

    Ok(Self {
      from,
      until,
      store_id,
      area: present(&params.area).map(str::to_owned),
      status,
    })
  }

  /// Whether evaluating this filter needs the stores table.
  pub fn needs_store_join(&self) -> bool { self.area.is_some() }

  /// Whether the filter constrains nothing.
  pub fn is_unconstrained(&self) -> bool { *self == Self::default() }
}

fn present(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|s| !s.is_empty())
}

fn parse_date(param: &'static str, value: &str) -> Result<NaiveDate> {
  let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
    Error::InvalidDate { param, value: value.to_owned() }
  })?;
  if !(0..=MAX_YEAR).contains(&date.year()) {
    return Err(Error::DateOutOfRange(date));
  }
  Ok(date)
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
  date.and_time(NaiveTime::MIN).and_utc()
}
