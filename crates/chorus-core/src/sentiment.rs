//! Sentiment scoring: text to polarity and a three-way label.
//!
//! The label thresholds are fixed policy and live here, not in
//! configuration. Scorers only produce a polarity; [`Sentiment::from_polarity`]
//! is the single place that turns it into a label.

use std::{collections::HashMap, sync::OnceLock};

use serde::{Deserialize, Serialize};

use crate::Result;

/// Polarity strictly above this is `Positive`.
pub const POSITIVE_THRESHOLD: f64 = 0.2;
/// Polarity strictly below this is `Negative`.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

// ─── Label ───────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
  Deserialize,
)]
pub enum Sentiment {
  Positive,
  Neutral,
  Negative,
}

impl Sentiment {
  pub const ALL: [Sentiment; 3] =
    [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

  pub fn from_polarity(polarity: f64) -> Self {
    if polarity > POSITIVE_THRESHOLD {
      Self::Positive
    } else if polarity < NEGATIVE_THRESHOLD {
      Self::Negative
    } else {
      Self::Neutral
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Positive => "Positive",
      Self::Neutral => "Neutral",
      Self::Negative => "Negative",
    }
  }

  pub fn parse(label: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|s| s.as_str() == label)
  }
}

/// Output of a [`SentimentScorer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
  /// Continuous polarity in `[-1, 1]`.
  pub polarity: f64,
  pub label:    Sentiment,
}

impl SentimentScore {
  /// Clamp `polarity` into range and derive the label from it.
  pub fn from_polarity(polarity: f64) -> Self {
    let polarity = if polarity.is_nan() { 0.0 } else { polarity.clamp(-1.0, 1.0) };
    Self { polarity, label: Sentiment::from_polarity(polarity) }
  }

  pub fn neutral() -> Self { Self::from_polarity(0.0) }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Maps text to a [`SentimentScore`].
///
/// Implementations must be pure and reentrant, and must return the neutral
/// score for empty or opinion-free text rather than failing.
pub trait SentimentScorer: Send + Sync {
  fn score(&self, text: &str) -> Result<SentimentScore>;
}

// ─── Lexicon scorer ──────────────────────────────────────────────────────────

/// Averages word polarities from a fixed lexicon, honouring intensifiers
/// ("very good") and negation ("not good", "wasn't fresh").
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
  /// Build the scorer, forcing the shared lexicon to load.
  pub fn new() -> Self {
    let words = lexicon().len();
    tracing::debug!(words, "sentiment lexicon ready");
    Self
  }

  /// Polarity of `text` in `[-1, 1]`; `0.0` when no opinion word is found.
  pub fn polarity(&self, text: &str) -> f64 {
    let lexicon = lexicon();
    let mut scores = Vec::new();
    let mut boost = 1.0;
    let mut negated = false;

    for token in tokens(text) {
      if let Some(&p) = lexicon.get(token.as_str()) {
        let mut p = p * boost;
        if negated {
          p *= -0.5;
        }
        scores.push(p.clamp(-1.0, 1.0));
        boost = 1.0;
        negated = false;
      } else if let Some(f) = intensity(&token) {
        boost *= f;
      } else if is_negator(&token) {
        negated = true;
      } else if !FILLERS.contains(&token.as_str()) {
        boost = 1.0;
        negated = false;
      }
    }

    if scores.is_empty() {
      return 0.0;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    mean.clamp(-1.0, 1.0)
  }
}

impl SentimentScorer for LexiconScorer {
  fn score(&self, text: &str) -> Result<SentimentScore> {
    Ok(SentimentScore::from_polarity(self.polarity(text)))
  }
}

/// Lowercased words; apostrophes stay inside words so "didn't" is one token.
fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
  text
    .split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '’'))
    .map(|w| w.trim_matches(|c| c == '\'' || c == '’'))
    .filter(|w| !w.is_empty())
    .map(|w| w.to_lowercase().replace('’', "'"))
}

fn is_negator(token: &str) -> bool {
  matches!(token, "not" | "no" | "never" | "nor" | "neither" | "cannot")
    || token.ends_with("n't")
}

fn intensity(token: &str) -> Option<f64> {
  let f = match token {
    "very" | "really" | "super" | "totally" => 1.3,
    "extremely" | "incredibly" | "absolutely" => 1.5,
    "so" | "too" => 1.2,
    "quite" => 1.1,
    "somewhat" => 0.7,
    "slightly" => 0.5,
    _ => return None,
  };
  Some(f)
}

/// Words that do not break the link between a modifier and its opinion word.
const FILLERS: &[&str] = &["a", "an", "the", "at", "all", "that", "be", "been"];

fn lexicon() -> &'static HashMap<&'static str, f64> {
  static LEXICON: OnceLock<HashMap<&'static str, f64>> = OnceLock::new();
  LEXICON.get_or_init(|| {
    [
      // positive
      ("good", 0.7),
      ("great", 0.8),
      ("excellent", 1.0),
      ("amazing", 0.6),
      ("awesome", 1.0),
      ("fantastic", 0.8),
      ("wonderful", 1.0),
      ("superb", 1.0),
      ("perfect", 1.0),
      ("best", 1.0),
      ("outstanding", 0.8),
      ("impressive", 0.8),
      ("delicious", 1.0),
      ("tasty", 0.8),
      ("yummy", 0.6),
      ("fresh", 0.3),
      ("love", 0.5),
      ("loved", 0.7),
      ("lovely", 0.5),
      ("enjoy", 0.4),
      ("enjoyed", 0.5),
      ("nice", 0.6),
      ("friendly", 0.4),
      ("helpful", 0.5),
      ("attentive", 0.4),
      ("welcoming", 0.4),
      ("polite", 0.4),
      ("pleasant", 0.7),
      ("happy", 0.8),
      ("satisfied", 0.5),
      ("beautiful", 0.85),
      ("cozy", 0.5),
      ("comfortable", 0.4),
      ("clean", 0.4),
      ("fast", 0.2),
      ("quick", 0.35),
      ("efficient", 0.4),
      ("prompt", 0.3),
      ("fine", 0.4),
      ("ok", 0.5),
      ("okay", 0.5),
      ("recommend", 0.3),
      // negative
      ("bad", -0.7),
      ("terrible", -1.0),
      ("awful", -1.0),
      ("horrible", -1.0),
      ("worst", -1.0),
      ("disgusting", -1.0),
      ("inedible", -0.8),
      ("unacceptable", -0.8),
      ("hate", -0.8),
      ("hated", -0.9),
      ("annoying", -0.8),
      ("boring", -0.6),
      ("disappointing", -0.6),
      ("disappointed", -0.75),
      ("poor", -0.4),
      ("rude", -0.6),
      ("unfriendly", -0.5),
      ("unhelpful", -0.5),
      ("slow", -0.3),
      ("late", -0.3),
      ("cold", -0.6),
      ("lukewarm", -0.3),
      ("stale", -0.5),
      ("soggy", -0.5),
      ("bland", -0.5),
      ("tasteless", -0.6),
      ("burnt", -0.5),
      ("greasy", -0.4),
      ("dirty", -0.6),
      ("sticky", -0.3),
      ("noisy", -0.4),
      ("loud", -0.3),
      ("crowded", -0.3),
      ("cramped", -0.4),
      ("overpriced", -0.5),
      ("expensive", -0.5),
      ("wrong", -0.5),
      ("angry", -0.5),
      ("sad", -0.5),
    ]
    .into_iter()
    .collect()
  })
}
