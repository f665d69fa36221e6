//! Error type for `replykit-store-json`.

use replykit_core::id::{ResponseId, TriggerId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] replykit_core::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// Mapping creation referenced a trigger that does not exist.
  #[error("trigger not found: {0}")]
  TriggerNotFound(TriggerId),

  /// Mapping creation referenced a response that does not exist.
  #[error("response not found: {0}")]
  ResponseNotFound(ResponseId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
