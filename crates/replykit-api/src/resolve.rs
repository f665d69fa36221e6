//! Handler for `POST /resolve` — the transport boundary.
//!
//! A message comes in with the sender's handle; the rendered reply (or
//! null, for no match) goes out. No-match is a normal 200 branch, never an
//! error status.

use axum::{Json, extract::State};
use replykit_core::{
  render::Context, resolver::RenderedReply, store::RuleStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
  /// The inbound message text.
  pub text:    String,
  /// Messenger handle of the sender; looked up in the customer directory
  /// unless an explicit `context` is supplied.
  #[serde(default)]
  pub sender:  Option<String>,
  /// Explicit rendering context; wins over the directory lookup.
  #[serde(default)]
  pub context: Option<Context>,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
  /// The rendered reply, or `null` when no trigger matched.
  pub reply: Option<RenderedReply>,
}

/// `POST /resolve`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Json(payload): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, ApiError>
where
  S: RuleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let context = match payload.context {
    Some(ctx) => Some(ctx),
    None => match &payload.sender {
      Some(handle) => state
        .customers
        .find_customer(handle)
        .await
        .map(|c| c.to_context()),
      None => None,
    },
  };

  let reply = state
    .resolver
    .resolve(&payload.text, context.as_ref())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(ResolveResponse { reply }))
}
