//! Pass/fail thresholds applied to result codes.
//!
//! The defaults are fixed business policy. First-stage verification tolerates
//! up to two wrong answers out of three, and exactly two wrong escalates to the
//! challenge round. The challenge round tolerates none.

use serde::{Deserialize, Serialize};

use crate::taxonomy::{
  ChallengeResult, DISQUALIFYING_QUALIFIERS, QuestionsResult,
};

/// Thresholds consulted by the decision predicates.
///
/// Exposed so tests and deployments can override them; `Policy::default()`
/// reproduces the service's published table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
  /// Qualifier messages that make a located subject ineligible.
  pub disqualifying_qualifiers:  Vec<String>,
  /// Highest number of wrong first-stage answers that still verifies.
  pub max_incorrect_answers:     u8,
  /// Number of wrong first-stage answers that triggers the challenge round.
  pub challenge_on_incorrect:    u8,
  /// Highest number of wrong challenge answers that still verifies.
  pub max_incorrect_challenge:   u8,
}

impl Default for Policy {
  fn default() -> Self {
    Self {
      disqualifying_qualifiers: DISQUALIFYING_QUALIFIERS
        .iter()
        .map(|s| s.to_string())
        .collect(),
      max_incorrect_answers:    2,
      challenge_on_incorrect:   2,
      max_incorrect_challenge:  0,
    }
  }
}

impl Policy {
  /// Whether a qualifier message rules the subject out of questioning.
  pub fn is_disqualifying(&self, message: &str) -> bool {
    self.disqualifying_qualifiers.iter().any(|q| q == message)
  }

  /// First-stage inner key → verified. Timeouts, errors and unknown keys fail.
  pub fn verified(&self, inner_key: &str) -> bool {
    questions_incorrect(inner_key)
      .is_some_and(|n| n <= self.max_incorrect_answers)
  }

  /// First-stage inner key → challenge round required.
  pub fn needs_challenge(&self, inner_key: &str) -> bool {
    questions_incorrect(inner_key) == Some(self.challenge_on_incorrect)
  }

  /// Challenge inner key → verified. Timeouts, errors and unknown keys fail.
  pub fn challenge_verified(&self, inner_key: &str) -> bool {
    inner_key
      .parse::<ChallengeResult>()
      .ok()
      .and_then(ChallengeResult::incorrect)
      .is_some_and(|n| n <= self.max_incorrect_challenge)
  }
}

fn questions_incorrect(inner_key: &str) -> Option<u8> {
  inner_key
    .parse::<QuestionsResult>()
    .ok()
    .and_then(QuestionsResult::incorrect)
}
