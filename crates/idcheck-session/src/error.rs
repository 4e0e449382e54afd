//! The single error kind surfaced by the orchestrator.

use idcheck_core::CallKind;
use thiserror::Error;

/// A stage failed: the transport errored or the payload was malformed. The
/// source is kept for inspection at the service layer; the subject layer only
/// reports `false`.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct ServiceError {
  pub kind:   CallKind,
  pub stage:  &'static str,
  #[source]
  pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl ServiceError {
  pub fn new(
    kind: CallKind,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
  ) -> Self {
    Self {
      kind,
      stage: kind.stage(),
      source: source.into(),
    }
  }
}
