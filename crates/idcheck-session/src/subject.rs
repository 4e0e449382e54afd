//! The person being verified and their per-attempt state.

use idcheck_core::{Identity, Question, Transport, subject::describe_questions};

use crate::service::Service;

/// A single verification attempt.
///
/// Stages run in the order `locate` → `get_questions` → `submit_answers` →
/// `get_challenge_questions` → `submit_challenge_answers`, but the order is
/// not enforced; the service simply answers whatever it is asked. Each stage
/// returns `false` on failure and leaves every field untouched.
pub struct Subject<T> {
  identity:                  Identity,
  id_number:                 Option<String>,
  eligible_for_verification: bool,
  qualifiers:                String,
  verified:                  bool,
  challenge:                 bool,
  verification_questions:    Option<Vec<Question>>,
  challenge_questions:       Option<Vec<Question>>,
  service:                   Service<T>,
}

impl<T: Transport> Subject<T> {
  /// A subject with a blank identity.
  pub fn new(service: Service<T>) -> Self {
    Self::with_identity(Identity::default(), service)
  }

  pub fn with_identity(identity: Identity, service: Service<T>) -> Self {
    Self {
      identity,
      id_number: None,
      eligible_for_verification: false,
      qualifiers: String::new(),
      verified: false,
      challenge: false,
      verification_questions: None,
      challenge_questions: None,
      service,
    }
  }

  // ── Stages ────────────────────────────────────────────────────────────────

  /// Locate the subject and record the id number, eligibility, and any
  /// qualifiers.
  pub fn locate(&mut self) -> bool {
    let Ok(response) = self.service.locate(&self.identity) else {
      return false;
    };

    self.id_number = response.base.id_number.clone();
    self.eligible_for_verification =
      response.eligible_for_verification(self.service.policy());
    if !response.qualifiers.is_empty() {
      self.qualifiers = response.qualifiers.summary();
    }

    tracing::info!(
      result = %response.base.result_key,
      eligible = self.eligible_for_verification,
      "located subject"
    );
    true
  }

  /// Fetch the first-round questions.
  pub fn get_questions(&mut self) -> bool {
    let Ok(response) = self.service.get_questions(self.id_number.as_deref())
    else {
      return false;
    };

    self.verification_questions = response.questions;
    tracing::info!(
      count = self.verification_questions.as_ref().map_or(0, Vec::len),
      "fetched verification questions"
    );
    true
  }

  /// Submit the chosen first-round answers and record the outcome.
  pub fn submit_answers(&mut self) -> bool {
    let Ok(response) = self.service.submit_answers(
      self.id_number.as_deref(),
      self.verification_questions.as_deref(),
    ) else {
      return false;
    };

    let policy = self.service.policy();
    self.verified = response.verified(policy);
    self.challenge = response.needs_challenge(policy);

    tracing::info!(
      result = %response.inner_key,
      verified = self.verified,
      challenge = self.challenge,
      "submitted answers"
    );
    true
  }

  /// Fetch the challenge questions.
  pub fn get_challenge_questions(&mut self) -> bool {
    let Ok(response) = self
      .service
      .get_challenge_questions(self.id_number.as_deref())
    else {
      return false;
    };

    self.challenge_questions = response.questions;
    tracing::info!(
      count = self.challenge_questions.as_ref().map_or(0, Vec::len),
      "fetched challenge questions"
    );
    true
  }

  /// Submit the chosen challenge answers and record the outcome.
  pub fn submit_challenge_answers(&mut self) -> bool {
    let Ok(response) = self.service.submit_challenge_answers(
      self.id_number.as_deref(),
      self.challenge_questions.as_deref(),
    ) else {
      return false;
    };

    self.verified = response.verified(self.service.policy());
    tracing::info!(
      result = %response.inner_key,
      verified = self.verified,
      "submitted challenge answers"
    );
    true
  }

  // ── Debugging fixtures ────────────────────────────────────────────────────

  /// Switch to the service's test record, which is always located.
  pub fn set_match(&mut self) -> &'static str {
    self.identity = Identity {
      user_id: std::mem::take(&mut self.identity.user_id),
      ..Identity::test_match()
    };
    "set to Spider Man"
  }

  /// Switch to a record the service will not locate.
  pub fn set_no_match(&mut self) -> &'static str {
    self.identity = Identity {
      user_id: std::mem::take(&mut self.identity.user_id),
      ..Identity::test_no_match()
    };
    "set to DoesNot Exist"
  }

  /// Numbered listing of the verification questions.
  pub fn describe_questions(&self) -> String {
    describe_questions(self.verification_questions.as_deref().unwrap_or_default())
  }

  /// Numbered listing of the challenge questions.
  pub fn describe_challenge_questions(&self) -> String {
    describe_questions(self.challenge_questions.as_deref().unwrap_or_default())
  }
}

impl<T> Subject<T> {
  // ── Accessors ─────────────────────────────────────────────────────────────

  pub fn identity(&self) -> &Identity { &self.identity }

  /// Set once a locate succeeds with a results payload.
  pub fn id_number(&self) -> Option<&str> { self.id_number.as_deref() }

  pub fn eligible_for_verification(&self) -> bool {
    self.eligible_for_verification
  }

  /// Qualifier messages from the last locate that had any, joined by `|`.
  pub fn qualifiers(&self) -> &str { &self.qualifiers }

  pub fn verified(&self) -> bool { self.verified }

  /// Whether the challenge round is required.
  pub fn challenge(&self) -> bool { self.challenge }

  /// `None` until a question fetch returns questions.
  pub fn verification_questions(&self) -> Option<&[Question]> {
    self.verification_questions.as_deref()
  }

  /// Mutable access for choosing answers before submission.
  pub fn verification_questions_mut(&mut self) -> Option<&mut [Question]> {
    self.verification_questions.as_deref_mut()
  }

  /// Replace the verification questions, e.g. when resuming an attempt.
  pub fn set_verification_questions(&mut self, questions: Vec<Question>) {
    self.verification_questions = Some(questions);
  }

  pub fn challenge_questions(&self) -> Option<&[Question]> {
    self.challenge_questions.as_deref()
  }

  pub fn challenge_questions_mut(&mut self) -> Option<&mut [Question]> {
    self.challenge_questions.as_deref_mut()
  }

  pub fn set_challenge_questions(&mut self, questions: Vec<Question>) {
    self.challenge_questions = Some(questions);
  }

  pub fn service(&self) -> &Service<T> { &self.service }
}
