//! Handlers for `/metrics` endpoints. Both accept the same filter parameters
//! as `GET /feedback` and aggregate exactly the rows it would list.

use axum::{
  Json,
  extract::{Query, State},
};
use chorus_core::{
  filter::FilterParams,
  metrics::{self, FeedbackMetrics, TrendPoint},
  store::FeedbackStore,
};

use crate::{ApiState, error::ApiError, feedback::filtered_view};

/// `GET /metrics` — totals, per-sentiment counts and per-category averages.
pub async fn summary<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<FilterParams>,
) -> Result<Json<FeedbackMetrics>, ApiError>
where
  S: FeedbackStore + 'static,
{
  let view = filtered_view(&state, &params).await?;
  Ok(Json(metrics::summarize(&view)))
}

/// `GET /metrics/trend` — mean sentiment per day, oldest first.
pub async fn trend<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<FilterParams>,
) -> Result<Json<Vec<TrendPoint>>, ApiError>
where
  S: FeedbackStore + 'static,
{
  let view = filtered_view(&state, &params).await?;
  Ok(Json(metrics::daily_trend(&view)))
}
