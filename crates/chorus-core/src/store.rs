//! The `FeedbackStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `chorus-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  feedback::{Feedback, NewFeedback},
  filter::FeedbackFilter,
  location::{NewStore, Store},
};

/// Abstraction over a Chorus storage backend.
///
/// Feedback rows are insert-only apart from the single `New -> Resolved`
/// status transition. Every method is one atomic unit of work against the
/// backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait FeedbackStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Stores ────────────────────────────────────────────────────────────

  /// Register a store and return it with its assigned id.
  fn add_store(
    &self,
    input: NewStore,
  ) -> impl Future<Output = Result<Store, Self::Error>> + Send + '_;

  /// List stores ordered by id, optionally restricted to one area.
  fn list_stores(
    &self,
    area: Option<String>,
  ) -> impl Future<Output = Result<Vec<Store>, Self::Error>> + Send + '_;

  /// Distinct non-null areas across all stores, sorted.
  fn list_areas(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  // ── Feedback ──────────────────────────────────────────────────────────

  /// Persist a fully-enriched feedback item. The store assigns `id`,
  /// `timestamp` (now, UTC) and the initial `New` status.
  fn record_feedback(
    &self,
    input: NewFeedback,
  ) -> impl Future<Output = Result<Feedback, Self::Error>> + Send + '_;

  /// Retrieve a feedback item by id. Returns `None` if not found.
  fn get_feedback(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Feedback>, Self::Error>> + Send + '_;

  /// Mark a feedback item `Resolved`. Idempotent; returns the item as it
  /// stands afterwards, or `None` if the id does not exist.
  fn resolve_feedback(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Feedback>, Self::Error>> + Send + '_;

  /// Every item matching `filter`, newest first.
  fn scan_feedback<'a>(
    &'a self,
    filter: &'a FeedbackFilter,
  ) -> impl Future<Output = Result<Vec<Feedback>, Self::Error>> + Send + 'a;
}
