//! Interfaces for the collaborators the core depends on but does not
//! implement.
//!
//! The HTTP transport and the credential store live outside the core (see
//! `idcheck-cli`). Tests substitute scripted in-memory implementations.

use crate::{Result, subject::Credentials};

/// Sends a form POST and returns the raw response body.
///
/// Implementations are synchronous and blocking. TLS policy, proxies and
/// timeouts are the implementation's concern.
pub trait Transport {
  type Error: std::error::Error + Send + Sync + 'static;

  fn post(
    &self,
    url: &str,
    fields: &[(String, String)],
  ) -> Result<String, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
  type Error = T::Error;

  fn post(
    &self,
    url: &str,
    fields: &[(String, String)],
  ) -> Result<String, Self::Error> {
    (**self).post(url, fields)
  }
}

/// Supplies the account credentials (file, environment, secret store…).
pub trait CredentialSource {
  fn load(&self) -> Result<Credentials>;
}

/// Credentials already held in memory.
impl CredentialSource for Credentials {
  fn load(&self) -> Result<Credentials> { Ok(self.clone()) }
}
