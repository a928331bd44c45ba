//! Aggregation over a filtered view of feedback.
//!
//! Category breakdowns list only categories that occur in the view, while the
//! sentiment breakdown always carries all three labels. Both shapes are part
//! of the wire format and must not be unified.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{category::Category, feedback::Feedback, sentiment::Sentiment};

/// Count and mean score for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryMetrics {
  pub count:                   u64,
  pub average_sentiment_score: f64,
}

/// Counts per sentiment label. Every label is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
  #[serde(rename = "Positive")]
  pub positive: u64,
  #[serde(rename = "Negative")]
  pub negative: u64,
  #[serde(rename = "Neutral")]
  pub neutral:  u64,
}

impl SentimentCounts {
  fn bump(&mut self, sentiment: Sentiment) {
    match sentiment {
      Sentiment::Positive => self.positive += 1,
      Sentiment::Negative => self.negative += 1,
      Sentiment::Neutral => self.neutral += 1,
    }
  }

  pub fn get(&self, sentiment: Sentiment) -> u64 {
    match sentiment {
      Sentiment::Positive => self.positive,
      Sentiment::Negative => self.negative,
      Sentiment::Neutral => self.neutral,
    }
  }
}

/// Summary of a filtered view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackMetrics {
  pub total:                 u64,
  pub feedback_by_sentiment: SentimentCounts,
  pub feedback_by_category:  BTreeMap<Category, CategoryMetrics>,
}

/// Mean sentiment for one calendar day (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
  pub date:                    NaiveDate,
  pub average_sentiment_score: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct Mean {
  sum:   f64,
  count: u64,
}

impl Mean {
  fn add(&mut self, value: f64) {
    self.sum += value;
    self.count += 1;
  }

  fn value(self) -> f64 { self.sum / self.count as f64 }
}

/// Count, average per category and count per sentiment over `view`.
pub fn summarize<'a>(
  view: impl IntoIterator<Item = &'a Feedback>,
) -> FeedbackMetrics {
  let mut total = 0;
  let mut by_sentiment = SentimentCounts::default();
  let mut by_category: BTreeMap<Category, Mean> = BTreeMap::new();

  for fb in view {
    total += 1;
    by_sentiment.bump(fb.sentiment);
    by_category.entry(fb.category).or_default().add(fb.sentiment_score);
  }

  FeedbackMetrics {
    total,
    feedback_by_sentiment: by_sentiment,
    feedback_by_category: by_category
      .into_iter()
      .map(|(category, mean)| {
        (category, CategoryMetrics {
          count:                   mean.count,
          average_sentiment_score: mean.value(),
        })
      })
      .collect(),
  }
}

/// Mean score per UTC day present in `view`, oldest first, without gaps
/// filled in.
pub fn daily_trend<'a>(
  view: impl IntoIterator<Item = &'a Feedback>,
) -> Vec<TrendPoint> {
  let mut days: BTreeMap<NaiveDate, Mean> = BTreeMap::new();
  for fb in view {
    days
      .entry(fb.timestamp.date_naive())
      .or_default()
      .add(fb.sentiment_score);
  }

  days
    .into_iter()
    .map(|(date, mean)| TrendPoint {
      date,
      average_sentiment_score: mean.value(),
    })
    .collect()
}
