//! JSON REST API for Chorus.
//!
//! Exposes an axum [`Router`] backed by any
//! [`chorus_core::store::FeedbackStore`]. TLS, CORS and request tracing are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/v1", chorus_api::api_router(state))
//! ```

pub mod error;
pub mod events;
pub mod feedback;
pub mod metrics;
pub mod stores;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use chorus_core::{enrich::Enricher, store::FeedbackStore};
use serde::Serialize;

pub use error::ApiError;
pub use events::Notifier;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:    Arc<S>,
  /// Built once at startup; never rebuilt per request.
  pub enricher: Arc<Enricher>,
  pub notifier: Notifier,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      enricher: Arc::clone(&self.enricher),
      notifier: self.notifier.clone(),
    }
  }
}

/// `{"message": "..."}` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct Message {
  pub message: String,
}

impl Message {
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into() }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: FeedbackStore + 'static,
{
  Router::new()
    // Feedback
    .route("/feedback", get(feedback::list::<S>).post(feedback::create::<S>))
    .route("/feedback/{id}/resolve", post(feedback::resolve::<S>))
    // Metrics
    .route("/metrics", get(metrics::summary::<S>))
    .route("/metrics/trend", get(metrics::trend::<S>))
    // Stores
    .route("/stores", get(stores::list::<S>).post(stores::create::<S>))
    .route("/areas", get(stores::areas::<S>))
    // Live updates
    .route("/events", get(events::stream::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
