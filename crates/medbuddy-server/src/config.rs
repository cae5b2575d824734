//! Runtime configuration.
//!
//! Loaded from an optional TOML file layered under `MEDBUDDY_*` environment
//! variables. Every field has a default, so an empty environment is valid.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use serde::Deserialize;

use crate::{
  limit::{LimitError, RateLimit},
  session::{KeyError, SessionKey},
};

/// Runtime server configuration.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:           String,
  #[serde(default = "default_port")]
  pub port:           u16,
  #[serde(default = "default_store_path")]
  pub store_path:     PathBuf,
  /// Hex-encoded cookie signing secret, at least 32 bytes. Generated per
  /// process when absent.
  #[serde(default)]
  pub session_secret: Option<String>,
  /// Requests each client address may make per window.
  #[serde(default = "default_rate_limit_requests")]
  pub rate_limit_requests: u32,
  #[serde(default = "default_rate_limit_window_secs")]
  pub rate_limit_window_secs: u64,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 5000 }

fn default_store_path() -> PathBuf { PathBuf::from("medical_buddy.db") }

fn default_rate_limit_requests() -> u32 { 100 }

fn default_rate_limit_window_secs() -> u64 { 15 * 60 }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:           default_host(),
      port:           default_port(),
      store_path:     default_store_path(),
      session_secret: None,
      rate_limit_requests: default_rate_limit_requests(),
      rate_limit_window_secs: default_rate_limit_window_secs(),
    }
  }
}

impl ServerConfig {
  /// Read `path` (if it exists) and then `MEDBUDDY_*` environment overrides.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    Self::load_from(path, config::Environment::with_prefix("MEDBUDDY"))
  }

  fn load_from(
    path: &Path,
    env: config::Environment,
  ) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn rate_limit(&self) -> Result<RateLimit, LimitError> {
    RateLimit::new(
      self.rate_limit_requests,
      Duration::from_secs(self.rate_limit_window_secs),
    )
  }

  /// The configured session key, or a fresh random one if none is set.
  pub fn session_key(&self) -> Result<SessionKey, KeyError> {
    match &self.session_secret {
      Some(secret) => SessionKey::from_hex(secret),
      None => {
        tracing::warn!(
          "no session_secret configured; sessions will not survive a restart"
        );
        Ok(SessionKey::generate())
      }
    }
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
