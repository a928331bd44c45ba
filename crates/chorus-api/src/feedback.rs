//! Handlers for `/feedback` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/feedback` | Optional `start`, `end`, `store_id`, `area`, `status` |
//! | `POST` | `/feedback` | Body: [`SubmitBody`]; returns 201 + analysis |
//! | `POST` | `/feedback/:id/resolve` | 404 if not found; always re-publishes |

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use chorus_core::{
  category::Category,
  event::ChangeEvent,
  feedback::{Feedback, Submission},
  filter::{FeedbackFilter, FilterParams},
  sentiment::Sentiment,
  store::FeedbackStore,
};
use serde::{Deserialize, Serialize};

use crate::{ApiState, Message, error::ApiError};

/// Validate `params` and run the resulting filter. Shared by every read path.
pub(crate) async fn filtered_view<S>(
  state: &ApiState<S>,
  params: &FilterParams,
) -> Result<Vec<Feedback>, ApiError>
where
  S: FeedbackStore,
{
  let filter = FeedbackFilter::from_params(params)?;
  state
    .store
    .scan_feedback(&filter)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /feedback[?start=YYYY-MM-DD][&end=...][&store_id=...][&area=...][&status=...]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<FilterParams>,
) -> Result<Json<Vec<Feedback>>, ApiError>
where
  S: FeedbackStore + 'static,
{
  Ok(Json(filtered_view(&state, &params).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /feedback`. Required fields are checked by
/// [`Submission::new`] so that a missing field is a 400, not a 422.
#[derive(Debug, Deserialize)]
pub struct SubmitBody {
  pub platform: Option<String>,
  pub text:     Option<String>,
  pub store_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct Analysis {
  pub category:            Category,
  pub category_confidence: f64,
  pub sentiment:           Sentiment,
  pub polarity_score:      f64,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
  pub message:  String,
  pub id:       i64,
  pub analysis: Analysis,
}

/// `POST /feedback` — enrich, persist, then announce.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  body: Result<Json<SubmitBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FeedbackStore + 'static,
{
  let Json(body) = body?;
  let submission = Submission::new(body.platform, body.text, body.store_id)?;

  // Classification may be slow; keep it off the async workers.
  let enricher = state.enricher.clone();
  let text = submission.text.clone();
  let enrichment = tokio::task::spawn_blocking(move || enricher.enrich(&text))
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

  let feedback = state
    .store
    .record_feedback(submission.enriched(&enrichment))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(
    id = feedback.id,
    category = %feedback.category,
    sentiment = feedback.sentiment.as_str(),
    "feedback recorded"
  );
  state.notifier.publish(ChangeEvent::new_feedback(&feedback));

  Ok((
    StatusCode::CREATED,
    Json(SubmitResponse {
      message:  "Feedback added successfully".into(),
      id:       feedback.id,
      analysis: Analysis {
        category:            enrichment.category,
        category_confidence: enrichment.category_confidence,
        sentiment:           enrichment.sentiment,
        polarity_score:      enrichment.sentiment_score,
      },
    }),
  ))
}

// ─── Resolve ──────────────────────────────────────────────────────────────────

/// `POST /feedback/:id/resolve`
///
/// Resolving an already-resolved item succeeds and publishes
/// `feedback_resolved` again.
pub async fn resolve<S>(
  State(state): State<ApiState<S>>,
  path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Message>, ApiError>
where
  S: FeedbackStore + 'static,
{
  let Path(id) = path?;
  state
    .store
    .resolve_feedback(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("Feedback item not found".into()))?;

  tracing::info!(id, "feedback resolved");
  state.notifier.publish(ChangeEvent::resolved(id));

  Ok(Json(Message::new(format!("Feedback {id} marked as Resolved"))))
}
