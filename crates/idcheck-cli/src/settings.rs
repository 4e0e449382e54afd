//! Runtime settings and the credentials file.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{ConfigBuilder, builder::DefaultState};
use idcheck_core::{CredentialSource, Credentials, Endpoints, Error, Policy};
use serde::Deserialize;

// ─── Settings ────────────────────────────────────────────────────────────────

/// Deserialised from the optional TOML settings file, overridden by
/// `IDCHECK_*` environment variables (`IDCHECK_ENDPOINTS__LOCATE=…`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub endpoints:        Endpoints,
  pub policy:           Policy,
  /// TOML file holding `username` and `password`.
  pub credentials_path: PathBuf,
  pub timeout_secs:     u64,
  /// Disable only against test environments with self-signed certificates.
  pub verify_tls:       bool,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      endpoints:        Endpoints::default(),
      policy:           Policy::default(),
      credentials_path: PathBuf::from("credentials.toml"),
      timeout_secs:     30,
      verify_tls:       true,
    }
  }
}

impl Settings {
  /// Load from `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let builder = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("IDCHECK")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      );
    Self::build(builder)
  }

  fn build(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
    let settings: Settings = builder
      .build()
      .context("failed to read settings")?
      .try_deserialize()
      .context("failed to deserialise settings")?;
    settings.endpoints.validate()?;
    Ok(settings)
  }
}

// ─── Credentials file ────────────────────────────────────────────────────────

/// Reads credentials from a TOML file on every [`load`](CredentialSource::load).
#[derive(Debug, Clone)]
pub struct CredentialsFile {
  path: PathBuf,
}

impl CredentialsFile {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
}

impl CredentialSource for CredentialsFile {
  fn load(&self) -> idcheck_core::Result<Credentials> {
    let raw = std::fs::read_to_string(&self.path).map_err(|e| {
      Error::Credentials(format!("reading {}: {e}", self.path.display()))
    })?;
    parse_credentials(&raw)
  }
}

fn parse_credentials(raw: &str) -> idcheck_core::Result<Credentials> {
  let credentials: Credentials = toml::from_str(raw)
    .map_err(|e| Error::Credentials(format!("parsing credentials: {e}")))?;
  if credentials.username.is_empty() {
    return Err(Error::Credentials("username is empty".into()));
  }
  Ok(credentials)
}
