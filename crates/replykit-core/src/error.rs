//! Error types for `replykit-core`.

use thiserror::Error;

use crate::id::{ResponseId, TriggerId};

#[derive(Debug, Error)]
pub enum Error {
  #[error("trigger not found: {0}")]
  TriggerNotFound(TriggerId),

  #[error("response not found: {0}")]
  ResponseNotFound(ResponseId),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
