//! Stateful orchestration of the five-stage verification flow.
//!
//! [`Service`] performs single round trips (build request → transport →
//! parse) and keeps the last response of each kind. [`Subject`] owns a
//! service and the per-attempt state, applying each response's decisions to
//! its own fields.
//!
//! Neither type is synchronised: one owner, one thread at a time.

pub mod error;
mod service;
mod subject;

pub use error::ServiceError;
pub use service::{Service, ServiceConfig};
pub use subject::Subject;
