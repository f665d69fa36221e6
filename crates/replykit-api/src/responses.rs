//! Handlers for `/responses`.

use axum::{
  Json,
  extract::{Path, State},
};
use replykit_core::{
  id::ResponseId,
  response::{Attachment, NewResponse, Response, ResponseKind},
  store::RuleStore,
};
use serde::Deserialize;

use crate::{AppState, error::ApiError, triggers::default_true};

#[derive(Debug, Deserialize)]
pub struct CreateResponse {
  pub text:         String,
  #[serde(default)]
  pub kind:         ResponseKind,
  #[serde(default)]
  pub attachments:  Vec<Attachment>,
  #[serde(default)]
  pub follow_up_id: Option<ResponseId>,
  #[serde(default = "default_true")]
  pub active:       bool,
}

/// `POST /responses`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(payload): Json<CreateResponse>,
) -> Result<Json<Response>, ApiError>
where
  S: RuleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let response = state
    .store
    .add_response(NewResponse {
      text:         payload.text,
      kind:         payload.kind,
      attachments:  payload.attachments,
      follow_up_id: payload.follow_up_id,
      active:       payload.active,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(response))
}

/// `GET /responses`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Response>>, ApiError>
where
  S: RuleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let responses = state
    .store
    .list_responses()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(responses))
}

/// `GET /responses/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Response>, ApiError>
where
  S: RuleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = ResponseId::new(id);
  state
    .store
    .get_response(&id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("response {id}")))
}
