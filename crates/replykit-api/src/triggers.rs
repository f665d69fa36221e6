//! Handlers for `/triggers`.

use axum::{
  Json,
  extract::{Path, State},
};
use replykit_core::{
  id::TriggerId,
  store::RuleStore,
  trigger::{MatchStrategy, NewTrigger, Trigger},
};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

fn default_priority() -> i32 { 10 }
pub(crate) fn default_true() -> bool { true }

#[derive(Debug, Deserialize)]
pub struct CreateTrigger {
  pub phrase:         String,
  pub match_strategy: MatchStrategy,
  #[serde(default)]
  pub intent:         Option<String>,
  #[serde(default = "default_priority")]
  pub priority:       i32,
  #[serde(default = "default_true")]
  pub active:         bool,
}

/// `POST /triggers`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(payload): Json<CreateTrigger>,
) -> Result<Json<Trigger>, ApiError>
where
  S: RuleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let trigger = state
    .store
    .add_trigger(NewTrigger {
      phrase:         payload.phrase,
      match_strategy: payload.match_strategy,
      intent:         payload.intent,
      priority:       payload.priority,
      active:         payload.active,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(trigger))
}

/// `GET /triggers`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Trigger>>, ApiError>
where
  S: RuleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let triggers = state
    .store
    .list_triggers()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(triggers))
}

/// `GET /triggers/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Trigger>, ApiError>
where
  S: RuleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = TriggerId::new(id);
  state
    .store
    .get_trigger(&id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("trigger {id}")))
}
