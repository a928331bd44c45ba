//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with a fixed number of
//! fractional digits, so string comparison in SQL orders them
//! chronologically. Labels are stored as their display text.

use chrono::{DateTime, SecondsFormat, Utc};
use chorus_core::{
  category::Category,
  feedback::{Feedback, FeedbackStatus},
  location::Store,
  sentiment::Sentiment,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Labels ──────────────────────────────────────────────────────────────────

pub fn decode_category(s: &str) -> Result<Category> {
  Category::parse(s).ok_or_else(|| Error::Decode {
    column: "category",
    value:  s.to_owned(),
  })
}

pub fn decode_sentiment(s: &str) -> Result<Sentiment> {
  Sentiment::parse(s).ok_or_else(|| Error::Decode {
    column: "sentiment",
    value:  s.to_owned(),
  })
}

pub fn decode_status(s: &str) -> Result<FeedbackStatus> {
  FeedbackStatus::parse(s).map_err(|_| Error::Decode {
    column: "status",
    value:  s.to_owned(),
  })
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawFeedback::from_row`], for a `feedback f` alias.
pub const FEEDBACK_COLUMNS: &str = "f.id, f.platform, f.text, f.timestamp, \
   f.category, f.sentiment, f.sentiment_score, f.store_id, f.status";

/// Raw values read directly from a `feedback` row.
pub struct RawFeedback {
  pub id:              i64,
  pub platform:        String,
  pub text:            String,
  pub timestamp:       String,
  pub category:        String,
  pub sentiment:       String,
  pub sentiment_score: f64,
  pub store_id:        Option<i64>,
  pub status:          String,
}

impl RawFeedback {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      platform:        row.get(1)?,
      text:            row.get(2)?,
      timestamp:       row.get(3)?,
      category:        row.get(4)?,
      sentiment:       row.get(5)?,
      sentiment_score: row.get(6)?,
      store_id:        row.get(7)?,
      status:          row.get(8)?,
    })
  }

  pub fn into_feedback(self) -> Result<Feedback> {
    Ok(Feedback {
      id:              self.id,
      platform:        self.platform,
      text:            self.text,
      timestamp:       decode_dt(&self.timestamp)?,
      category:        decode_category(&self.category)?,
      sentiment:       decode_sentiment(&self.sentiment)?,
      sentiment_score: self.sentiment_score,
      store_id:        self.store_id,
      status:          decode_status(&self.status)?,
    })
  }
}

/// A `stores` row; every column maps directly.
pub fn store_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Store> {
  Ok(Store {
    id:   row.get(0)?,
    name: row.get(1)?,
    area: row.get(2)?,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn encoded_timestamps_sort_chronologically() {
    let a: DateTime<Utc> = "2024-01-01T09:59:59.5Z".parse().unwrap();
    let b: DateTime<Utc> = "2024-01-01T10:00:00Z".parse().unwrap();
    assert_eq!(encode_dt(b), "2024-01-01T10:00:00.000000Z");
    assert!(encode_dt(a) < encode_dt(b));
    assert_eq!(decode_dt(&encode_dt(a)).unwrap(), a);
  }

  #[test]
  fn unknown_labels_fail_to_decode() {
    assert!(decode_category("Parking").is_err());
    assert!(decode_sentiment("positive").is_err());
    assert!(decode_status("Open").is_err());
    assert_eq!(decode_status("Resolved").unwrap(), FeedbackStatus::Resolved);
  }
}
