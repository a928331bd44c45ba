//! Error types for `chorus-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing required data: {0}")]
  MissingField(&'static str),

  #[error("{field} exceeds {max} characters")]
  FieldTooLong { field: &'static str, max: usize },

  #[error("invalid date format for {param}: {value:?} (expected YYYY-MM-DD)")]
  InvalidDate { param: &'static str, value: String },

  #[error("date out of range: {0}")]
  DateOutOfRange(chrono::NaiveDate),

  #[error("invalid store_id: {0:?}")]
  InvalidStoreId(String),

  #[error("unknown status label: {0:?}")]
  InvalidStatus(String),

  #[error("classifier error: {0}")]
  Classifier(String),

  #[error("sentiment scorer error: {0}")]
  Scorer(String),
}

impl Error {
  /// Whether this error was caused by caller input rather than by a
  /// collaborator.
  pub fn is_validation(&self) -> bool {
    matches!(
      self,
      Self::MissingField(_)
        | Self::FieldTooLong { .. }
        | Self::InvalidDate { .. }
        | Self::DateOutOfRange(_)
        | Self::InvalidStoreId(_)
        | Self::InvalidStatus(_)
    )
  }

  /// Whether this error came from the scorer or classifier.
  pub fn is_dependency(&self) -> bool {
    matches!(self, Self::Classifier(_) | Self::Scorer(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
