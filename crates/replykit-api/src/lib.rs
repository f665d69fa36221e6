//! JSON REST API for replykit.
//!
//! Exposes an axum [`Router`] backed by any
//! [`replykit_core::store::RuleStore`] plus the customer directory.
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", replykit_api::api_router(state))
//! ```

pub mod customers;
pub mod error;
pub mod mappings;
pub mod resolve;
pub mod responses;
pub mod triggers;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use replykit_core::{resolver::Resolver, store::RuleStore};
use replykit_crm::CustomerDirectory;

pub use error::ApiError;

/// Shared handler state: the rule store, a resolver over it, and the
/// customer directory used to build rendering contexts.
pub struct AppState<S> {
  pub store:     Arc<S>,
  pub resolver:  Resolver<S>,
  pub customers: CustomerDirectory,
}

impl<S> AppState<S> {
  pub fn new(store: Arc<S>, customers: CustomerDirectory) -> Self
  where
    S: RuleStore,
  {
    Self {
      resolver: Resolver::new(store.clone()),
      store,
      customers,
    }
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:     self.store.clone(),
      resolver:  self.resolver.clone(),
      customers: self.customers.clone(),
    }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: RuleStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Rules
    .route(
      "/triggers",
      get(triggers::list::<S>).post(triggers::create::<S>),
    )
    .route("/triggers/{id}", get(triggers::get_one::<S>))
    .route(
      "/responses",
      get(responses::list::<S>).post(responses::create::<S>),
    )
    .route("/responses/{id}", get(responses::get_one::<S>))
    .route(
      "/mappings",
      get(mappings::list::<S>).post(mappings::create::<S>),
    )
    // Customers
    .route(
      "/customers",
      post(customers::create::<S>),
    )
    .route("/customers/{handle}", get(customers::get_one::<S>))
    // The transport boundary: message in, rendered reply (or null) out.
    .route("/resolve", post(resolve::handler::<S>))
    .with_state(state)
}
