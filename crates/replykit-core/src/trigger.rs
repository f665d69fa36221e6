//! Trigger types — the pattern side of the reply engine.
//!
//! A trigger pairs a phrase with a match strategy; together they define the
//! predicate an inbound message is tested against. Triggers are created and
//! persisted by a [`RuleStore`](crate::store::RuleStore); no update or
//! delete operations exist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::TriggerId;

// ─── Match strategy ──────────────────────────────────────────────────────────

/// How a trigger phrase is compared against an inbound message.
///
/// All strategies operate on the normalised (trimmed, lowercased) message;
/// `Regex` additionally compiles case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
  /// Normalised message equals the normalised phrase.
  Exact,
  /// Normalised phrase is a substring of the normalised message.
  Contains,
  /// Phrase is a regular expression; any match anywhere counts, and capture
  /// groups are exposed to template rendering.
  Regex,
}

// ─── Trigger ─────────────────────────────────────────────────────────────────

fn default_priority() -> i32 { 10 }
pub(crate) fn default_true() -> bool { true }

/// A persisted trigger. The id is immutable once assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trigger {
  pub id:             TriggerId,
  pub phrase:         String,
  pub match_strategy: MatchStrategy,
  /// Free-form intent label, e.g. `"pricing_query"`. Informational only.
  #[serde(default)]
  pub intent:         Option<String>,
  /// Lower value = higher precedence. Ties resolve in insertion order.
  #[serde(default = "default_priority")]
  pub priority:       i32,
  #[serde(default = "default_true")]
  pub active:         bool,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

// ─── NewTrigger ──────────────────────────────────────────────────────────────

/// Input to [`RuleStore::add_trigger`](crate::store::RuleStore::add_trigger).
/// The id and timestamps are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewTrigger {
  pub phrase:         String,
  pub match_strategy: MatchStrategy,
  pub intent:         Option<String>,
  pub priority:       i32,
  pub active:         bool,
}

impl NewTrigger {
  /// Convenience constructor with default priority (10) and `active = true`.
  pub fn new(phrase: impl Into<String>, match_strategy: MatchStrategy) -> Self {
    Self {
      phrase: phrase.into(),
      match_strategy,
      intent: None,
      priority: default_priority(),
      active: true,
    }
  }

  pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
    self.intent = Some(intent.into());
    self
  }

  pub fn with_priority(mut self, priority: i32) -> Self {
    self.priority = priority;
    self
  }

  pub fn inactive(mut self) -> Self {
    self.active = false;
    self
  }
}
