//! Topical categories and the classifier that assigns them.
//!
//! The candidate set is closed: a [`Category`] can only ever be one of the
//! four labels below, so whatever a classifier returns is already clamped to
//! the system's taxonomy.

use std::{collections::HashMap, sync::OnceLock};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Labels ──────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
  Deserialize,
)]
pub enum Category {
  #[serde(rename = "Quality of food")]
  QualityOfFood,
  #[serde(rename = "Customer service")]
  CustomerService,
  Speed,
  Ambience,
}

impl Category {
  /// The fixed, ordered candidate set offered to every classification.
  pub const ALL: [Category; 4] = [
    Category::QualityOfFood,
    Category::CustomerService,
    Category::Speed,
    Category::Ambience,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::QualityOfFood => "Quality of food",
      Self::CustomerService => "Customer service",
      Self::Speed => "Speed",
      Self::Ambience => "Ambience",
    }
  }

  pub fn parse(label: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|c| c.as_str() == label)
  }
}

impl std::fmt::Display for Category {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One entry of a classifier ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedLabel {
  pub label:      Category,
  /// In `[0, 1]`; comparable across entries of the same ranking.
  pub confidence: f64,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Ranks candidate labels for a piece of text.
///
/// Calls may be slow and are synchronous. An implementation either returns a
/// ranking covering every candidate, best first, or fails; it never returns
/// a partial result.
pub trait CategoryClassifier: Send + Sync {
  fn classify(
    &self,
    text: &str,
    candidates: &[Category],
  ) -> Result<Vec<RankedLabel>>;
}

// ─── Keyword classifier ──────────────────────────────────────────────────────

/// Scores each candidate by keyword hits and turns the counts into
/// Laplace-smoothed confidences. Ties keep candidate order.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
  /// Build the classifier, forcing the shared keyword table to load.
  pub fn new() -> Self {
    let keywords = keywords().len();
    tracing::debug!(keywords, "category keyword table ready");
    Self
  }

  fn hits(text: &str) -> HashMap<Category, usize> {
    let table = keywords();
    let mut hits = HashMap::new();
    let lowered = text.to_lowercase();
    for word in lowered.split(|c: char| !c.is_alphanumeric()) {
      if let Some(&category) = table.get(word) {
        *hits.entry(category).or_insert(0) += 1;
      }
    }
    hits
  }
}

impl CategoryClassifier for KeywordClassifier {
  fn classify(
    &self,
    text: &str,
    candidates: &[Category],
  ) -> Result<Vec<RankedLabel>> {
    if candidates.is_empty() {
      return Err(Error::Classifier("no candidate labels".into()));
    }

    let hits = Self::hits(text);
    let counts: Vec<usize> = candidates
      .iter()
      .map(|c| hits.get(c).copied().unwrap_or(0))
      .collect();
    let total = counts.iter().sum::<usize>() + candidates.len();

    let mut ranking: Vec<RankedLabel> = candidates
      .iter()
      .zip(counts)
      .map(|(&label, n)| RankedLabel {
        label,
        confidence: (n + 1) as f64 / total as f64,
      })
      .collect();
    // Stable sort: equal confidences stay in candidate order.
    ranking.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    Ok(ranking)
  }
}

fn keywords() -> &'static HashMap<&'static str, Category> {
  static KEYWORDS: OnceLock<HashMap<&'static str, Category>> = OnceLock::new();
  KEYWORDS.get_or_init(|| {
    use Category::*;
    let groups: [(Category, &[&str]); 4] = [
      (QualityOfFood, &[
        "food", "meal", "dish", "dishes", "taste", "tasted", "tasty",
        "flavor", "flavour", "delicious", "bland", "fresh", "stale", "cold",
        "burnt", "raw", "undercooked", "overcooked", "portion", "portions",
        "pizza", "burger", "pasta", "salad", "soup", "coffee", "dessert",
        "menu", "ingredients", "cooked", "seasoning", "salty", "spicy",
        "greasy", "soggy", "inedible", "tasteless", "yummy", "chef",
      ]),
      (CustomerService, &[
        "service", "staff", "waiter", "waitress", "server", "servers",
        "manager", "cashier", "employee", "employees", "rude", "polite",
        "friendly", "unfriendly", "helpful", "unhelpful", "attentive",
        "welcoming", "ignored", "attitude", "served", "host", "hostess",
        "apologized", "complaint", "refund", "courteous",
      ]),
      (Speed, &[
        "slow", "fast", "quick", "quickly", "wait", "waited", "waiting",
        "minutes", "hour", "hours", "delay", "delayed", "late", "forever",
        "prompt", "promptly", "speed", "queue", "line", "took", "ages",
        "efficient", "rushed",
      ]),
      (Ambience, &[
        "ambience", "ambiance", "atmosphere", "music", "noisy", "noise",
        "loud", "quiet", "decor", "lighting", "clean", "dirty", "cozy",
        "crowded", "cramped", "seating", "seats", "table", "tables",
        "vibe", "interior", "smell", "sticky", "comfortable", "view",
        "restroom", "bathroom", "beautiful",
      ]),
    ];
    groups
      .into_iter()
      .flat_map(|(category, words)| words.iter().map(move |w| (*w, category)))
      .collect()
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn top(text: &str) -> RankedLabel {
    KeywordClassifier::new().classify(text, &Category::ALL).unwrap()[0]
  }

  #[test]
  fn labels_serialize_as_display_text() {
    let json = serde_json::to_value(Category::QualityOfFood).unwrap();
    assert_eq!(json, "Quality of food");
    let back: Category = serde_json::from_str("\"Customer service\"").unwrap();
    assert_eq!(back, Category::CustomerService);
    for c in Category::ALL {
      assert_eq!(Category::parse(c.as_str()), Some(c));
      assert_eq!(c.to_string(), c.as_str());
    }
  }

  #[test]
  fn ranking_covers_every_candidate_best_first() {
    let ranking = KeywordClassifier::new()
      .classify("we waited an hour, so slow", &Category::ALL)
      .unwrap();
    assert_eq!(ranking.len(), Category::ALL.len());
    assert_eq!(ranking[0].label, Category::Speed);
    assert!(ranking.windows(2).all(|w| w[0].confidence >= w[1].confidence));
    assert!(ranking.iter().all(|r| (0.0..=1.0).contains(&r.confidence)));
  }

  #[test]
  fn picks_the_dominant_topic() {
    assert_eq!(top("The soup was cold and bland").label, Category::QualityOfFood);
    assert_eq!(top("Our waiter was rude").label, Category::CustomerService);
    assert_eq!(top("Lovely music and cozy decor").label, Category::Ambience);
  }

  #[test]
  fn no_keywords_falls_back_to_candidate_order() {
    let r = top("hmm");
    assert_eq!(r.label, Category::QualityOfFood);
    assert!((r.confidence - 0.25).abs() < 1e-9);
  }

  #[test]
  fn respects_a_narrower_candidate_set() {
    let ranking = KeywordClassifier::new()
      .classify("slow and rude", &[Category::Ambience, Category::Speed])
      .unwrap();
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0].label, Category::Speed);
  }

  #[test]
  fn empty_candidate_set_fails() {
    let err = KeywordClassifier::new().classify("slow", &[]).unwrap_err();
    assert!(err.is_dependency());
  }
}
