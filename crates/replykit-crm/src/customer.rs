//! Customer record types.

use chrono::{DateTime, Utc};
use replykit_core::{entity_id, render::Context};
use serde::{Deserialize, Serialize};

entity_id!(
  /// Identifier of a [`Customer`].
  CustomerId,
  "CUST"
);

/// A persisted customer record, keyed in the directory by `handle` (the
/// customer's messenger identifier).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
  pub id:         CustomerId,
  pub name:       String,
  pub email:      String,
  /// Messenger identifier the transport layer hands us with each message.
  pub handle:     String,
  /// Free-form pipeline status, e.g. `"Lead"`, `"Active Client"`.
  pub status:     String,
  #[serde(default)]
  pub projects:   Vec<String>,
  /// Timestamped note log; lines are appended, never rewritten.
  #[serde(default)]
  pub notes:      String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Customer {
  /// Flatten the record into a rendering context: the fields templates can
  /// reach via `{crm_name}`, `{crm_status}`, and `{crm_email}`.
  pub fn to_context(&self) -> Context {
    Context::from([
      ("name".to_owned(), self.name.clone()),
      ("status".to_owned(), self.status.clone()),
      ("email".to_owned(), self.email.clone()),
    ])
  }
}

/// Input to [`CustomerDirectory::add_customer`](crate::CustomerDirectory::add_customer).
/// The id and timestamps are always assigned by the directory.
#[derive(Debug, Clone)]
pub struct NewCustomer {
  pub name:     String,
  pub email:    String,
  pub handle:   String,
  pub status:   String,
  pub projects: Vec<String>,
  pub notes:    String,
}

impl NewCustomer {
  pub fn new(
    name: impl Into<String>,
    email: impl Into<String>,
    handle: impl Into<String>,
    status: impl Into<String>,
  ) -> Self {
    Self {
      name: name.into(),
      email: email.into(),
      handle: handle.into(),
      status: status.into(),
      projects: Vec::new(),
      notes: String::new(),
    }
  }

  pub fn with_projects(mut self, projects: Vec<String>) -> Self {
    self.projects = projects;
    self
  }

  pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
    self.notes = notes.into();
    self
  }
}
