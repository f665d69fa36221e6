//! Response types — the template side of the reply engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{id::ResponseId, trigger::default_true};

// ─── Response kind ───────────────────────────────────────────────────────────

/// How the rendered text should be interpreted by the transport layer.
/// Serialised tags match the persisted layout (`"text"`, `"markdown"`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
  #[default]
  #[serde(rename = "text")]
  PlainText,
  Markdown,
  ImageUrl,
  DocumentUrl,
}

// ─── Attachment ──────────────────────────────────────────────────────────────

/// A media descriptor carried alongside the rendered text. The engine never
/// inspects attachments; order is preserved as authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
  pub url:     String,
  #[serde(default)]
  pub caption: Option<String>,
}

// ─── Response ────────────────────────────────────────────────────────────────

/// A persisted response template.
///
/// `text` may contain placeholder tokens of the form `{crm_<field>}` and
/// `{regex_group_<n>}`; see [`render`](crate::render::render).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
  pub id:           ResponseId,
  pub text:         String,
  #[serde(default)]
  pub kind:         ResponseKind,
  #[serde(default)]
  pub attachments:  Vec<Attachment>,
  /// Reserved for response chaining; stored but never consumed.
  #[serde(default)]
  pub follow_up_id: Option<ResponseId>,
  #[serde(default = "default_true")]
  pub active:       bool,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

// ─── NewResponse ─────────────────────────────────────────────────────────────

/// Input to [`RuleStore::add_response`](crate::store::RuleStore::add_response).
/// The id and timestamps are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewResponse {
  pub text:         String,
  pub kind:         ResponseKind,
  pub attachments:  Vec<Attachment>,
  pub follow_up_id: Option<ResponseId>,
  pub active:       bool,
}

impl NewResponse {
  /// Convenience constructor: plain text, no attachments, `active = true`.
  pub fn new(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      kind: ResponseKind::default(),
      attachments: Vec::new(),
      follow_up_id: None,
      active: true,
    }
  }

  pub fn with_kind(mut self, kind: ResponseKind) -> Self {
    self.kind = kind;
    self
  }

  pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
    self.attachments = attachments;
    self
  }

  pub fn inactive(mut self) -> Self {
    self.active = false;
    self
  }
}
