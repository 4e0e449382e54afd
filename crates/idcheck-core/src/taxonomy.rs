//! Catalog of the result codes reported by the verification service.
//!
//! The service answers every call with string codes. Outer codes come back on
//! locate and question-fetch calls; the two answer-submission calls also carry
//! an inner code describing how many answers were wrong. This module only
//! names them. Turning codes into decisions is [`crate::policy`]'s job.

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Message used when a payload has none of the nodes the parser looks for.
pub const UNEXPECTED_ERROR_MESSAGE: &str =
  "The API returned an unexpected error.";

/// Result key reported for error nodes and unrecognised payloads.
pub const ERROR_KEY: &str = "error";

/// Qualifier messages that rule a subject out of questioning, whatever the
/// match status. They are configured on the service account side.
pub const DISQUALIFYING_QUALIFIERS: [&str; 6] = [
  "Subject is Deceased",
  "SSN unavailable",
  "SSN4 Does Not Match",
  "SSN Issued Prior to DOB",
  "SSN Is Invalid",
  "Single Address in File",
];

// ─── Outer results ───────────────────────────────────────────────────────────

/// Outer result of a locate or question-fetch call.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  AsRefStr,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
pub enum OuterResult {
  #[strum(serialize = "result.match")]
  Match,
  #[strum(serialize = "result.no.match")]
  NoMatch,
  #[strum(serialize = "error")]
  Error,
  /// Any key outside the catalog.
  #[strum(serialize = "unexpected")]
  Unexpected,
}

impl OuterResult {
  /// Classify a raw result key. Keys outside the catalog map to
  /// [`OuterResult::Unexpected`].
  pub fn classify(key: &str) -> Self {
    key.parse().unwrap_or(Self::Unexpected)
  }
}

// ─── Inner results ───────────────────────────────────────────────────────────

/// Inner result of a first-stage answer submission (three questions).
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  AsRefStr,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
pub enum QuestionsResult {
  #[strum(serialize = "result.questions.0.incorrect")]
  NoneIncorrect,
  #[strum(serialize = "result.questions.1.incorrect")]
  OneIncorrect,
  #[strum(serialize = "result.questions.2.incorrect")]
  TwoIncorrect,
  #[strum(serialize = "result.questions.3.incorrect")]
  ThreeIncorrect,
  #[strum(serialize = "result.timeout")]
  Timeout,
  #[strum(serialize = "error")]
  Error,
}

impl QuestionsResult {
  /// Number of wrong answers, or `None` for timeouts and errors.
  pub fn incorrect(self) -> Option<u8> {
    match self {
      Self::NoneIncorrect => Some(0),
      Self::OneIncorrect => Some(1),
      Self::TwoIncorrect => Some(2),
      Self::ThreeIncorrect => Some(3),
      Self::Timeout | Self::Error => None,
    }
  }
}

/// Inner result of a challenge answer submission (two questions).
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  AsRefStr,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
pub enum ChallengeResult {
  #[strum(serialize = "result.challenge.0.incorrect")]
  NoneIncorrect,
  #[strum(serialize = "result.challenge.1.incorrect")]
  OneIncorrect,
  #[strum(serialize = "result.challenge.2.incorrect")]
  TwoIncorrect,
  #[strum(serialize = "result.timeout")]
  Timeout,
  #[strum(serialize = "error")]
  Error,
}

impl ChallengeResult {
  /// Number of wrong answers, or `None` for timeouts and errors.
  pub fn incorrect(self) -> Option<u8> {
    match self {
      Self::NoneIncorrect => Some(0),
      Self::OneIncorrect => Some(1),
      Self::TwoIncorrect => Some(2),
      Self::Timeout | Self::Error => None,
    }
  }
}
