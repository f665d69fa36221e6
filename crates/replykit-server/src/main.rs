//! replykit server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! JSON-backed rule store and customer directory under `data_dir`, and
//! serves the JSON API over HTTP at `/api`.

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use replykit_api::AppState;
use replykit_crm::CustomerDirectory;
use replykit_store_json::JsonStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "replykit reply-engine server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("REPLYKIT"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Open the rule store and customer directory.
  let store = JsonStore::open(&server_cfg.data_dir)
    .await
    .with_context(|| {
      format!("failed to open rule store in {:?}", server_cfg.data_dir)
    })?;
  let customers = CustomerDirectory::open(&server_cfg.data_dir)
    .await
    .with_context(|| {
      format!("failed to open customer directory in {:?}", server_cfg.data_dir)
    })?;

  let state = AppState::new(Arc::new(store), customers);
  let app = axum::Router::new()
    .nest("/api", replykit_api::api_router(state))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
