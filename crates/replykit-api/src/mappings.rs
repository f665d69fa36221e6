//! Handlers for `/mappings`.

use axum::{
  Json,
  extract::{Query, State},
};
use replykit_core::{
  id::{ResponseId, TriggerId},
  mapping::{Condition, Mapping, NewMapping},
  store::RuleStore,
};
use serde::Deserialize;

use crate::{AppState, error::ApiError, triggers::default_true};

fn default_sequence_order() -> i32 { 1 }

#[derive(Debug, Deserialize)]
pub struct CreateMapping {
  pub trigger_id:     TriggerId,
  pub response_id:    ResponseId,
  #[serde(default)]
  pub conditions:     Condition,
  #[serde(default = "default_sequence_order")]
  pub sequence_order: i32,
  #[serde(default = "default_true")]
  pub active:         bool,
}

/// `POST /mappings`
///
/// A dangling `trigger_id` or `response_id` is the caller's mistake and maps
/// to 400, not 500.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(payload): Json<CreateMapping>,
) -> Result<Json<Mapping>, ApiError>
where
  S: RuleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if state
    .store
    .get_trigger(&payload.trigger_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .is_none()
  {
    return Err(ApiError::BadRequest(format!(
      "trigger {} does not exist",
      payload.trigger_id
    )));
  }
  if state
    .store
    .get_response(&payload.response_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .is_none()
  {
    return Err(ApiError::BadRequest(format!(
      "response {} does not exist",
      payload.response_id
    )));
  }

  let mapping = state
    .store
    .add_mapping(NewMapping {
      trigger_id:     payload.trigger_id,
      response_id:    payload.response_id,
      conditions:     payload.conditions,
      sequence_order: payload.sequence_order,
      active:         payload.active,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(mapping))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub trigger_id: TriggerId,
}

/// `GET /mappings?trigger_id=TRG_001`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Mapping>>, ApiError>
where
  S: RuleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let mappings = state
    .store
    .list_mappings(&params.trigger_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(mappings))
}
