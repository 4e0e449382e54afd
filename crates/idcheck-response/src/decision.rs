//! Pass/fail decisions derived from parsed responses.
//!
//! These are pure predicates. The thresholds come from [`Policy`]; the
//! response only contributes its result keys, qualifiers and eligibility
//! flag.

use idcheck_core::Policy;

use crate::response::{AnswersResponse, LocateResponse, Round};

impl LocateResponse {
  /// Eligible iff the service flagged the subject eligible, the outer result
  /// is a match, and no qualifier message is disqualifying. A missing
  /// eligibility node means not eligible.
  pub fn eligible_for_verification(&self, policy: &Policy) -> bool {
    let flagged_eligible = self.eligible_for_questions.as_deref() == Some("true");
    let disqualified = self
      .qualifiers
      .messages()
      .any(|message| policy.is_disqualifying(message));

    flagged_eligible && self.base.is_match() && !disqualified
  }
}

impl AnswersResponse {
  /// Whether this round's inner result passes. The first round passes with
  /// up to two wrong answers; the challenge round passes only with none.
  pub fn verified(&self, policy: &Policy) -> bool {
    match self.round {
      Round::Verification => policy.verified(&self.inner_key),
      Round::Challenge => policy.challenge_verified(&self.inner_key),
    }
  }

  /// Whether the challenge round must follow. Only a first-round result of
  /// exactly two wrong answers escalates.
  pub fn needs_challenge(&self, policy: &Policy) -> bool {
    match self.round {
      Round::Verification => policy.needs_challenge(&self.inner_key),
      Round::Challenge => false,
    }
  }
}
