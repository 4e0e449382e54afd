//! Error types for `idcheck-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("credentials unavailable: {0}")]
  Credentials(String),

  #[error("invalid configuration: {0}")]
  Config(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
