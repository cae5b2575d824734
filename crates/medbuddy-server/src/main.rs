//! medbuddy server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `MEDBUDDY_*`
//! environment overrides, opens the SQLite store, and serves HTTP.
//!
//! # Session secret generation
//!
//! To generate a value for `session_secret` in config.toml:
//!
//! ```
//! cargo run -p medbuddy-server --bin server -- --generate-secret
//! ```

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use medbuddy_server::{AppState, ServerConfig, config::expand_tilde, session::generate_secret};
use medbuddy_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Medical Buddy record server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print a fresh hex-encoded session secret and exit.
  #[arg(long)]
  generate_secret: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if cli.generate_secret {
    println!("{}", hex::encode(generate_secret()));
    return Ok(());
  }

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let session = server_cfg
    .session_key()
    .context("invalid session_secret")?;

  let limiter = server_cfg
    .rate_limit()
    .context("invalid rate limit settings")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let address = server_cfg.address();
  let state = AppState {
    store:   Arc::new(store),
    session: Arc::new(session),
    limiter: Arc::new(limiter),
  };

  let app = medbuddy_server::router(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
    .await
    .context("server error")?;

  Ok(())
}
