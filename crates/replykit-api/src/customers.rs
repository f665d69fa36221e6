//! Handlers for `/customers`.

use axum::{
  Json,
  extract::{Path, State},
};
use replykit_core::store::RuleStore;
use replykit_crm::{Customer, NewCustomer};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct CreateCustomer {
  pub name:     String,
  pub email:    String,
  pub handle:   String,
  pub status:   String,
  #[serde(default)]
  pub projects: Vec<String>,
  #[serde(default)]
  pub notes:    String,
}

/// `POST /customers`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(payload): Json<CreateCustomer>,
) -> Result<Json<Customer>, ApiError>
where
  S: RuleStore,
{
  let customer = state
    .customers
    .add_customer(NewCustomer {
      name:     payload.name,
      email:    payload.email,
      handle:   payload.handle,
      status:   payload.status,
      projects: payload.projects,
      notes:    payload.notes,
    })
    .await
    .map_err(|e| match e {
      replykit_crm::Error::DuplicateHandle(h) => {
        ApiError::Conflict(format!("customer with handle {h:?} exists"))
      }
      other => ApiError::Store(Box::new(other)),
    })?;
  Ok(Json(customer))
}

/// `GET /customers/{handle}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(handle): Path<String>,
) -> Result<Json<Customer>, ApiError>
where
  S: RuleStore,
{
  state
    .customers
    .find_customer(&handle)
    .await
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("customer {handle}")))
}
