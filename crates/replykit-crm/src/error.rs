//! Error type for `replykit-crm`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A customer with this handle already exists.
  #[error("customer with handle {0:?} already exists")]
  DuplicateHandle(String),

  #[error("customer not found: {0:?}")]
  CustomerNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
