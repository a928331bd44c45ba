//! HTTP front end for Chorus.
//!
//! Wraps [`chorus_api::api_router`] under `/v1`, adds a plain-text health
//! route at `/`, and applies the request-tracing and CORS layers.

use std::path::PathBuf;

use axum::{Router, routing::get};
use chorus_api::ApiState;
use chorus_core::store::FeedbackStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CHORUS_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                  String,
  #[serde(default = "default_port")]
  pub port:                  u16,
  #[serde(default = "default_store_path")]
  pub store_path:            PathBuf,
  /// How far a live subscriber may fall behind before it skips events.
  #[serde(default = "default_event_capacity")]
  pub event_capacity:        usize,
  #[serde(default = "default_true")]
  pub cors_allow_any_origin: bool,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 5000 }
fn default_store_path() -> PathBuf { PathBuf::from("feedback.db") }
fn default_event_capacity() -> usize { 100 }
fn default_true() -> bool { true }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                  default_host(),
      port:                  default_port(),
      store_path:            default_store_path(),
      event_capacity:        default_event_capacity(),
      cors_allow_any_origin: default_true(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

pub const HEALTH_TEXT: &str = "Hello! Your feedback server is running.";

async fn hello() -> &'static str { HEALTH_TEXT }

/// Build the complete application router.
pub fn router<S>(state: ApiState<S>, config: &ServerConfig) -> Router
where
  S: FeedbackStore + 'static,
{
  let app = Router::new()
    .route("/", get(hello))
    .nest("/v1", chorus_api::api_router(state))
    .layer(TraceLayer::new_for_http());

  if config.cors_allow_any_origin {
    app.layer(CorsLayer::permissive())
  } else {
    app
  }
}
