//! Error type for the response codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The payload is not well-formed XML. Payloads that parse but lack the
  /// expected nodes are not errors; they get the fallback result pair.
  #[error("malformed payload: {0}")]
  MalformedPayload(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
