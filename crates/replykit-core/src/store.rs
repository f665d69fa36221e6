//! The `RuleStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `replykit-store-json`). Higher layers (the resolver, `replykit-api`)
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  id::{ResponseId, TriggerId},
  mapping::{Mapping, NewMapping},
  response::{NewResponse, Response},
  trigger::{NewTrigger, Trigger},
};

/// Abstraction over a reply-rule store backend.
///
/// All three collections are append-only: entries are created and persisted
/// immediately, never updated or deleted. Listing order is insertion order
/// (ascending id ordinal) and must be deterministic across reloads — the
/// resolver's tie-breaking depends on it.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RuleStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Create and persist a new trigger. Always succeeds; the store assigns
  /// the next sequential id and both timestamps.
  fn add_trigger(
    &self,
    input: NewTrigger,
  ) -> impl Future<Output = Result<Trigger, Self::Error>> + Send + '_;

  /// Create and persist a new response template.
  fn add_response(
    &self,
    input: NewResponse,
  ) -> impl Future<Output = Result<Response, Self::Error>> + Send + '_;

  /// Create and persist a trigger → response link.
  ///
  /// Fails if either referenced id is absent at call time, in which case
  /// the store must not be mutated. Existence is not re-checked later;
  /// consumers tolerate dangling references.
  fn add_mapping(
    &self,
    input: NewMapping,
  ) -> impl Future<Output = Result<Mapping, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a trigger by id. Returns `None` if not found.
  fn get_trigger<'a>(
    &'a self,
    id: &'a TriggerId,
  ) -> impl Future<Output = Result<Option<Trigger>, Self::Error>> + Send + 'a;

  /// Retrieve a response by id. Returns `None` if not found.
  fn get_response<'a>(
    &'a self,
    id: &'a ResponseId,
  ) -> impl Future<Output = Result<Option<Response>, Self::Error>> + Send + 'a;

  /// List all triggers (active and inactive) in insertion order.
  fn list_triggers(
    &self,
  ) -> impl Future<Output = Result<Vec<Trigger>, Self::Error>> + Send + '_;

  /// List all responses (active and inactive) in insertion order.
  fn list_responses(
    &self,
  ) -> impl Future<Output = Result<Vec<Response>, Self::Error>> + Send + '_;

  /// List all mappings of `trigger_id` (active and inactive) in insertion
  /// order.
  fn list_mappings<'a>(
    &'a self,
    trigger_id: &'a TriggerId,
  ) -> impl Future<Output = Result<Vec<Mapping>, Self::Error>> + Send + 'a;
}
