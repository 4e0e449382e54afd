//! Core types for the identity-verification client.
//!
//! This crate is free of XML and HTTP dependencies. It holds the
//! result-code catalog, the subject and question data model, the request
//! builder, the decision policy, and the traits for the external
//! collaborators (transport and credential source). Every other crate
//! depends on it.

pub mod error;
pub mod policy;
pub mod request;
pub mod subject;
pub mod taxonomy;
pub mod transport;

pub use error::{Error, Result};
pub use policy::Policy;
pub use request::{CallKind, Endpoints, Request};
pub use subject::{Answer, Credentials, Identity, Question};
pub use transport::{CredentialSource, Transport};
