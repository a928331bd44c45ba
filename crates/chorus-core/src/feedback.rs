//! Feedback items — the unit of ingestion.
//!
//! A feedback item is written once, fully enriched, and afterwards only ever
//! moves from [`FeedbackStatus::New`] to [`FeedbackStatus::Resolved`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result, category::Category, enrich::Enrichment,
  sentiment::Sentiment,
};

/// Upper bound on `platform`, in characters.
pub const MAX_PLATFORM_LEN: usize = 100;
/// Upper bound on `text`, in characters.
pub const MAX_TEXT_LEN: usize = 1000;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Workflow status. The only transition is `New -> Resolved`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub enum FeedbackStatus {
  #[default]
  New,
  Resolved,
}

impl FeedbackStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::New => "New",
      Self::Resolved => "Resolved",
    }
  }

  /// Exact-match parse of a status label.
  pub fn parse(label: &str) -> Result<Self> {
    match label {
      "New" => Ok(Self::New),
      "Resolved" => Ok(Self::Resolved),
      other => Err(Error::InvalidStatus(other.to_owned())),
    }
  }
}

// ─── Feedback ────────────────────────────────────────────────────────────────

/// A persisted, enriched feedback item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
  pub id:              i64,
  pub platform:        String,
  pub text:            String,
  /// Server-assigned creation time (UTC).
  pub timestamp:       DateTime<Utc>,
  pub category:        Category,
  pub sentiment:       Sentiment,
  pub sentiment_score: f64,
  /// Weak reference to a [`Store`](crate::location::Store); never enforced.
  pub store_id:        Option<i64>,
  pub status:          FeedbackStatus,
}

// ─── Submission ──────────────────────────────────────────────────────────────

/// A validated ingestion request, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
  pub platform: String,
  pub text:     String,
  pub store_id: Option<i64>,
}

impl Submission {
  /// Validate raw request fields. `platform` and `text` are required and
  /// bounded; `store_id` is passed through untouched.
  pub fn new(
    platform: Option<String>,
    text: Option<String>,
    store_id: Option<i64>,
  ) -> Result<Self> {
    let platform = platform.ok_or(Error::MissingField("platform"))?;
    let text = text.ok_or(Error::MissingField("text"))?;
    check_len("platform", &platform, MAX_PLATFORM_LEN)?;
    check_len("text", &text, MAX_TEXT_LEN)?;
    Ok(Self { platform, text, store_id })
  }

  /// Attach a complete enrichment, producing the record to insert.
  pub fn enriched(self, enrichment: &Enrichment) -> NewFeedback {
    NewFeedback {
      platform:        self.platform,
      text:            self.text,
      store_id:        self.store_id,
      category:        enrichment.category,
      sentiment:       enrichment.sentiment,
      sentiment_score: enrichment.sentiment_score,
    }
  }
}

pub(crate) fn check_len(
  field: &'static str,
  value: &str,
  max: usize,
) -> Result<()> {
  if value.chars().count() > max {
    return Err(Error::FieldTooLong { field, max });
  }
  Ok(())
}

// ─── NewFeedback ─────────────────────────────────────────────────────────────

/// Input to [`crate::store::FeedbackStore::record_feedback`].
///
/// `id`, `timestamp` and `status` are always set by the store. There is no
/// way to build one without a full enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
  pub platform:        String,
  pub text:            String,
  pub store_id:        Option<i64>,
  pub category:        Category,
  pub sentiment:       Sentiment,
  pub sentiment_score: f64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_platform_is_rejected() {
    let err = Submission::new(None, Some("hi".into()), None).unwrap_err();
    assert!(matches!(err, Error::MissingField("platform")));
    assert!(err.is_validation());
  }

  #[test]
  fn missing_text_is_rejected() {
    let err = Submission::new(Some("web".into()), None, None).unwrap_err();
    assert!(matches!(err, Error::MissingField("text")));
  }

  #[test]
  fn text_is_bounded_in_characters() {
    let at_limit = "é".repeat(MAX_TEXT_LEN);
    assert!(Submission::new(Some("web".into()), Some(at_limit), None).is_ok());

    let over = "a".repeat(MAX_TEXT_LEN + 1);
    let err = Submission::new(Some("web".into()), Some(over), None).unwrap_err();
    assert!(matches!(err, Error::FieldTooLong { field: "text", .. }));
  }

  #[test]
  fn empty_text_is_accepted() {
    let s = Submission::new(Some("web".into()), Some(String::new()), Some(3))
      .unwrap();
    assert_eq!(s.store_id, Some(3));
  }

  #[test]
  fn status_parse_is_exact() {
    assert_eq!(FeedbackStatus::parse("New").unwrap(), FeedbackStatus::New);
    assert_eq!(
      FeedbackStatus::parse("Resolved").unwrap(),
      FeedbackStatus::Resolved
    );
    assert!(FeedbackStatus::parse("resolved").is_err());
    assert!(FeedbackStatus::parse("Open").is_err());
  }

  #[test]
  fn feedback_serializes_with_labels() {
    let fb = Feedback {
      id:              7,
      platform:        "web".into(),
      text:            "ok".into(),
      timestamp:       "2024-01-01T10:00:00Z".parse().unwrap(),
      category:        Category::Speed,
      sentiment:       Sentiment::Neutral,
      sentiment_score: 0.0,
      store_id:        None,
      status:          FeedbackStatus::New,
    };
    let json = serde_json::to_value(&fb).unwrap();
    assert_eq!(json["category"], "Speed");
    assert_eq!(json["sentiment"], "Neutral");
    assert_eq!(json["status"], "New");
    assert_eq!(json["timestamp"], "2024-01-01T10:00:00Z");
    assert!(json["store_id"].is_null());
  }
}
