//! Server configuration.

use serde::Deserialize;

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 8080 }
fn default_data_dir() -> String { "./data".to_owned() }

/// Deserialised from `config.toml` layered with `REPLYKIT_*` environment
/// variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:     String,
  #[serde(default = "default_port")]
  pub port:     u16,
  /// Directory holding `triggers.json`, `responses.json`, `mappings.json`,
  /// and `customers.json`.
  #[serde(default = "default_data_dir")]
  pub data_dir: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:     default_host(),
      port:     default_port(),
      data_dir: default_data_dir(),
    }
  }
}
