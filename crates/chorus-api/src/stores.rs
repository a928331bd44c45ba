//! Handlers for `/stores` and `/areas`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/stores` | Optional `?area=` exact match |
//! | `POST` | `/stores` | Body: `{"name":"...","area":"..."}` |
//! | `GET`  | `/areas`  | Distinct non-null areas |

use axum::{
  Json,
  extract::{Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use chorus_core::{
  location::{NewStore, Store},
  store::FeedbackStore,
};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub area: Option<String>,
}

/// `GET /stores[?area=<area>]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Store>>, ApiError>
where
  S: FeedbackStore + 'static,
{
  let area = params.area.filter(|a| !a.is_empty());
  let stores = state
    .store
    .list_stores(area)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(stores))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name: Option<String>,
  pub area: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
  pub message: &'static str,
  pub id:      i64,
}

/// `POST /stores` — body: `{"name":"Main St","area":"Downtown"}`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FeedbackStore + 'static,
{
  let Json(body) = body?;
  let input = NewStore::new(body.name, body.area)?;
  let store = state
    .store
    .add_store(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  tracing::info!(id = store.id, area = ?store.area, "store added");
  Ok((
    StatusCode::CREATED,
    Json(CreateResponse { message: "Store added", id: store.id }),
  ))
}

// ─── Areas ────────────────────────────────────────────────────────────────────

/// `GET /areas`
pub async fn areas<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<String>>, ApiError>
where
  S: FeedbackStore + 'static,
{
  let areas = state
    .store
    .list_areas()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(areas))
}
