//! Blocking HTTP transport for the verification service.

use std::time::Duration;

use anyhow::{Context, Result};
use idcheck_core::Transport;
use reqwest::{StatusCode, blocking::Client};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
  #[error("request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("{url} returned {status}")]
  Status { url: String, status: StatusCode },
}

/// Posts form-encoded fields and returns the response body as text.
///
/// Cheap to clone; the inner [`Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpTransport {
  client: Client,
}

impl HttpTransport {
  pub fn new(timeout: Duration, verify_tls: bool) -> Result<Self> {
    let client = Client::builder()
      .timeout(timeout)
      .danger_accept_invalid_certs(!verify_tls)
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client })
  }
}

impl Transport for HttpTransport {
  type Error = TransportError;

  fn post(
    &self,
    url: &str,
    fields: &[(String, String)],
  ) -> Result<String, TransportError> {
    let resp = self.client.post(url).form(fields).send()?;
    let status = resp.status();
    if !status.is_success() {
      return Err(TransportError::Status {
        url: url.to_owned(),
        status,
      });
    }
    Ok(resp.text()?)
  }
}
