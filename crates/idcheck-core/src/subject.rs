//! Identity attributes, credentials, and knowledge-based questions.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── Identity ────────────────────────────────────────────────────────────────

/// The attributes a subject is located by. Set once per verification attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
  pub first_name: String,
  pub last_name:  String,
  pub address:    String,
  pub city:       String,
  pub state:      String,
  pub zip:        String,
  pub ssn_last4:  String,
  pub dob_month:  String,
  pub dob_year:   String,
  /// Caller-supplied identifier echoed back by the service as `uid`.
  pub user_id:    String,
}

impl Identity {
  /// The service's test record that is always located.
  pub fn test_match() -> Self {
    Self {
      first_name: "Spider".into(),
      last_name:  "Man".into(),
      address:    "321 Orange Dr".into(),
      city:       "Miami".into(),
      state:      "FL".into(),
      zip:        "33134".into(),
      ssn_last4:  "1333".into(),
      dob_month:  "1".into(),
      dob_year:   "1950".into(),
      user_id:    String::new(),
    }
  }

  /// A record the service will never locate.
  pub fn test_no_match() -> Self {
    Self {
      first_name: "DoesNot".into(),
      last_name:  "Exist".into(),
      address:    "123 Main St".into(),
      city:       "Nowhere".into(),
      state:      "NY".into(),
      zip:        "10001".into(),
      ssn_last4:  "1234".into(),
      dob_month:  "1".into(),
      dob_year:   "1965".into(),
      user_id:    String::new(),
    }
  }

  /// "First Last", for log lines and prompts.
  pub fn display_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

// ─── Credentials ─────────────────────────────────────────────────────────────

/// Account credentials attached to every outbound request.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

impl Credentials {
  pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
    Self {
      username: username.into(),
      password: password.into(),
    }
  }
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .finish()
  }
}

// ─── Questions ───────────────────────────────────────────────────────────────

/// One candidate answer to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
  pub text: String,
}

impl Answer {
  pub fn new(text: impl Into<String>) -> Self { Self { text: text.into() } }
}

/// A knowledge-based question as returned by a question-fetch call.
///
/// `chosen_answer` is filled in by the caller before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub prompt:            String,
  /// Opaque type code, echoed back as `question{N}Type` on submission.
  pub question_type:     String,
  pub candidate_answers: Vec<Answer>,
  pub chosen_answer:     Option<String>,
}

impl Question {
  pub fn new(prompt: impl Into<String>, question_type: impl Into<String>) -> Self {
    Self {
      prompt: prompt.into(),
      question_type: question_type.into(),
      ..Self::default()
    }
  }

  /// Choose the candidate at `index`. Returns `false` if out of range.
  pub fn choose(&mut self, index: usize) -> bool {
    match self.candidate_answers.get(index) {
      Some(answer) => {
        self.chosen_answer = Some(answer.text.clone());
        true
      }
      None => false,
    }
  }
}

/// Render questions as a numbered listing with their candidate answers.
pub fn describe_questions(questions: &[Question]) -> String {
  let mut out = String::new();
  for (n, question) in questions.iter().enumerate() {
    out.push_str(&format!("{n} - {}:\n", question.prompt));
    for answer in &question.candidate_answers {
      out.push_str(&format!("   - {}\n", answer.text));
    }
  }
  out
}
