//! The enrichment step applied to every feedback item at ingestion time.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  category::{Category, CategoryClassifier, KeywordClassifier},
  sentiment::{LexiconScorer, Sentiment, SentimentScorer},
};

/// The complete annotation for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
  pub category:            Category,
  pub category_confidence: f64,
  pub sentiment:           Sentiment,
  pub sentiment_score:     f64,
}

/// Composes a [`SentimentScorer`] and a [`CategoryClassifier`].
///
/// Built once at process start and shared behind an `Arc`; both
/// collaborators are immutable after construction.
#[derive(Clone)]
pub struct Enricher {
  scorer:     Arc<dyn SentimentScorer>,
  classifier: Arc<dyn CategoryClassifier>,
}

impl Enricher {
  pub fn new(
    scorer: Arc<dyn SentimentScorer>,
    classifier: Arc<dyn CategoryClassifier>,
  ) -> Self {
    Self { scorer, classifier }
  }

  /// Annotate `text`. Fails as a whole if either half fails.
  pub fn enrich(&self, text: &str) -> Result<Enrichment> {
    let score = self.scorer.score(text)?;
    let top = self
      .classifier
      .classify(text, &Category::ALL)?
      .into_iter()
      .next()
      .ok_or_else(|| Error::Classifier("empty ranking".into()))?;

    Ok(Enrichment {
      category:            top.label,
      category_confidence: top.confidence,
      sentiment:           score.label,
      sentiment_score:     score.polarity,
    })
  }
}

impl Default for Enricher {
  /// The built-in lexicon scorer and keyword classifier.
  fn default() -> Self {
    Self::new(
      Arc::new(LexiconScorer::new()),
      Arc::new(KeywordClassifier::new()),
    )
  }
}

impl std::fmt::Debug for Enricher {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Enricher").finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{category::RankedLabel, sentiment::SentimentScore};

  struct Unavailable;

  impl CategoryClassifier for Unavailable {
    fn classify(&self, _: &str, _: &[Category]) -> Result<Vec<RankedLabel>> {
      Err(Error::Classifier("model not loaded".into()))
    }
  }

  struct Silent;

  impl CategoryClassifier for Silent {
    fn classify(&self, _: &str, _: &[Category]) -> Result<Vec<RankedLabel>> {
      Ok(Vec::new())
    }
  }

  struct Fixed(f64);

  impl SentimentScorer for Fixed {
    fn score(&self, _: &str) -> Result<SentimentScore> {
      Ok(SentimentScore::from_polarity(self.0))
    }
  }

  #[test]
  fn enriches_with_top_label_and_score() {
    let e = Enricher::default()
      .enrich("Service was terrible and slow")
      .unwrap();
    assert_eq!(e.sentiment, Sentiment::Negative);
    assert!(e.sentiment_score < -0.1);
    assert!(Category::ALL.contains(&e.category));
    assert!(e.category_confidence > 0.0 && e.category_confidence <= 1.0);
  }

  #[test]
  fn label_follows_score_thresholds() {
    let enricher =
      Enricher::new(Arc::new(Fixed(0.2)), Arc::new(KeywordClassifier::new()));
    assert_eq!(enricher.enrich("x").unwrap().sentiment, Sentiment::Neutral);
  }

  #[test]
  fn classifier_failure_fails_the_whole_enrichment() {
    let enricher =
      Enricher::new(Arc::new(LexiconScorer::new()), Arc::new(Unavailable));
    let err = enricher.enrich("great food").unwrap_err();
    assert!(err.is_dependency());
  }

  #[test]
  fn empty_ranking_is_a_classifier_error() {
    let enricher = Enricher::new(Arc::new(LexiconScorer::new()), Arc::new(Silent));
    assert!(matches!(
      enricher.enrich("great food").unwrap_err(),
      Error::Classifier(_)
    ));
  }

  #[test]
  fn empty_text_is_enriched_as_neutral() {
    let e = Enricher::default().enrich("").unwrap();
    assert_eq!(e.sentiment, Sentiment::Neutral);
    assert_eq!(e.sentiment_score, 0.0);
  }
}
