//! Response codec for the identity-verification service.
//!
//! Turns the service's XML payloads into typed responses and derives the
//! eligibility and pass/fail decisions from them. Pure synchronous; no HTTP
//! dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use idcheck_core::{CallKind, Policy};
//! use idcheck_response::Response;
//!
//! let raw = "<response><results><key>result.match</key></results></response>";
//! let response = Response::parse(CallKind::Locate, raw).unwrap();
//! if let Some(locate) = response.as_locate() {
//!   println!("eligible: {}", locate.eligible_for_verification(&Policy::default()));
//! }
//! ```

mod decision;
pub mod document;
pub mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod response;

pub use error::{Error, Result};
pub use response::{
  AnswersResponse, LocateResponse, PayloadShape, Qualifiers, QuestionsResponse,
  Response, ResponseBase, Round,
};
