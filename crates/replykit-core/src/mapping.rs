//! Mapping types — the many-to-many link between triggers and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  id::{MappingId, ResponseId, TriggerId},
  render::Context,
  trigger::default_true,
};

// ─── Condition ───────────────────────────────────────────────────────────────

/// A predicate evaluated against the external context when a mapping is
/// considered during resolution.
///
/// Every mapping created today carries [`Condition::Always`], so all active
/// mappings of a matched trigger pass. The tagged representation keeps the
/// extension point type-safe instead of an inert free-form object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
  #[default]
  Always,
  /// Passes when the context is present and `context[field] == value`.
  FieldEquals { field: String, value: String },
}

impl Condition {
  pub fn evaluate(&self, context: Option<&Context>) -> bool {
    match self {
      Self::Always => true,
      Self::FieldEquals { field, value } => {
        context.is_some_and(|ctx| ctx.get(field) == Some(value))
      }
    }
  }
}

// ─── Mapping ─────────────────────────────────────────────────────────────────

fn default_sequence_order() -> i32 { 1 }

/// A persisted trigger → response link.
///
/// Referential integrity is checked at creation time only; a mapping may
/// outlive its response, in which case resolution degrades to no-reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mapping {
  pub id:             MappingId,
  pub trigger_id:     TriggerId,
  pub response_id:    ResponseId,
  #[serde(default)]
  pub conditions:     Condition,
  /// Ascending = earlier. Ties resolve in insertion order.
  #[serde(default = "default_sequence_order")]
  pub sequence_order: i32,
  #[serde(default = "default_true")]
  pub active:         bool,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

// ─── NewMapping ──────────────────────────────────────────────────────────────

/// Input to [`RuleStore::add_mapping`](crate::store::RuleStore::add_mapping).
/// The id and timestamps are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewMapping {
  pub trigger_id:     TriggerId,
  pub response_id:    ResponseId,
  pub conditions:     Condition,
  pub sequence_order: i32,
  pub active:         bool,
}

impl NewMapping {
  /// Convenience constructor: `Always` condition, sequence order 1,
  /// `active = true`.
  pub fn new(trigger_id: TriggerId, response_id: ResponseId) -> Self {
    Self {
      trigger_id,
      response_id,
      conditions: Condition::default(),
      sequence_order: default_sequence_order(),
      active: true,
    }
  }

  pub fn with_sequence_order(mut self, order: i32) -> Self {
    self.sequence_order = order;
    self
  }

  pub fn with_conditions(mut self, conditions: Condition) -> Self {
    self.conditions = conditions;
    self
  }

  pub fn inactive(mut self) -> Self {
    self.active = false;
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ctx(pairs: &[(&str, &str)]) -> Context {
    pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect()
  }

  #[test]
  fn always_passes_with_and_without_context() {
    assert!(Condition::Always.evaluate(None));
    assert!(Condition::Always.evaluate(Some(&ctx(&[("status", "VIP")]))));
  }

  #[test]
  fn field_equals_requires_matching_context() {
    let cond = Condition::FieldEquals {
      field: "status".into(),
      value: "VIP".into(),
    };
    assert!(cond.evaluate(Some(&ctx(&[("status", "VIP")]))));
    assert!(!cond.evaluate(Some(&ctx(&[("status", "Lead")]))));
    assert!(!cond.evaluate(Some(&ctx(&[("name", "VIP")]))));
    assert!(!cond.evaluate(None));
  }
}
