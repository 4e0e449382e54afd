//! Outbound request assembly for the five call kinds.
//!
//! Every request is a POST of flat form fields to a fixed endpoint. Locate
//! sends the full identity; the others send only the credentials and the
//! remote id number, plus numbered `question{N}Type` / `question{N}Answer`
//! pairs for the two answer submissions.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  subject::{Credentials, Identity, Question},
};

// ─── Call kinds ──────────────────────────────────────────────────────────────

/// The five remote calls, in workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
  Locate,
  FetchQuestions,
  SubmitAnswers,
  FetchChallengeQuestions,
  SubmitChallengeAnswers,
}

impl CallKind {
  pub const ALL: [CallKind; 5] = [
    CallKind::Locate,
    CallKind::FetchQuestions,
    CallKind::SubmitAnswers,
    CallKind::FetchChallengeQuestions,
    CallKind::SubmitChallengeAnswers,
  ];

  /// Stage name used in log records.
  pub fn stage(self) -> &'static str {
    match self {
      Self::Locate => "locate()",
      Self::FetchQuestions => "get_questions()",
      Self::SubmitAnswers => "submit_answers()",
      Self::FetchChallengeQuestions => "get_challenge_questions()",
      Self::SubmitChallengeAnswers => "submit_challenge_answers()",
    }
  }

  /// Position in [`CallKind::ALL`].
  pub fn index(self) -> usize {
    match self {
      Self::Locate => 0,
      Self::FetchQuestions => 1,
      Self::SubmitAnswers => 2,
      Self::FetchChallengeQuestions => 3,
      Self::SubmitChallengeAnswers => 4,
    }
  }
}

// ─── Endpoints ───────────────────────────────────────────────────────────────

/// Target URL for each call kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
  pub locate:              String,
  pub questions:           String,
  pub answers:             String,
  pub challenge_questions: String,
  pub challenge_answers:   String,
}

impl Default for Endpoints {
  fn default() -> Self {
    Self {
      locate:              "https://web.idologylive.com/api/idlive.svc".into(),
      questions:           "https://web.idologylive.com/api/idliveq.svc".into(),
      answers:             "https://web.idologylive.com/api/idliveq-answers.svc"
        .into(),
      challenge_questions: "https://web.idologylive.com/api/idliveq-challenge.svc"
        .into(),
      challenge_answers:
        "https://web.idologylive.com/api/idliveq-challenge-answers.svc".into(),
    }
  }
}

impl Endpoints {
  pub fn url(&self, kind: CallKind) -> &str {
    match kind {
      CallKind::Locate => &self.locate,
      CallKind::FetchQuestions => &self.questions,
      CallKind::SubmitAnswers => &self.answers,
      CallKind::FetchChallengeQuestions => &self.challenge_questions,
      CallKind::SubmitChallengeAnswers => &self.challenge_answers,
    }
  }

  /// Reject endpoint sets with blank or non-HTTP URLs.
  pub fn validate(&self) -> Result<()> {
    for kind in CallKind::ALL {
      let url = self.url(kind);
      if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(Error::Config(format!(
          "endpoint for {} is not an http(s) URL: {url:?}",
          kind.stage()
        )));
      }
    }
    Ok(())
  }
}

// ─── Request ─────────────────────────────────────────────────────────────────

/// A fully-assembled outbound call. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
  kind:   CallKind,
  url:    String,
  fields: Vec<(String, String)>,
}

impl Request {
  /// Locate: credentials plus the full identity.
  pub fn locate(
    endpoints: &Endpoints,
    credentials: &Credentials,
    identity: &Identity,
  ) -> Self {
    let mut request = Self::with_credentials(CallKind::Locate, endpoints, credentials);
    request.push("firstName", &identity.first_name);
    request.push("lastName", &identity.last_name);
    request.push("address", &identity.address);
    request.push("city", &identity.city);
    request.push("state", &identity.state);
    request.push("zip", &identity.zip);
    request.push("ssnLast4", &identity.ssn_last4);
    request.push("dobMonth", &identity.dob_month);
    request.push("dobYear", &identity.dob_year);
    request.push("uid", &identity.user_id);
    request
  }

  /// Fetch the first-stage questions for a located subject.
  pub fn fetch_questions(
    endpoints: &Endpoints,
    credentials: &Credentials,
    id_number: Option<&str>,
  ) -> Self {
    Self::with_id(CallKind::FetchQuestions, endpoints, credentials, id_number)
  }

  /// Submit chosen answers to the first-stage questions.
  pub fn submit_answers(
    endpoints: &Endpoints,
    credentials: &Credentials,
    id_number: Option<&str>,
    questions: Option<&[Question]>,
  ) -> Self {
    let mut request =
      Self::with_id(CallKind::SubmitAnswers, endpoints, credentials, id_number);
    request.push_answers(questions.unwrap_or_default());
    request
  }

  /// Fetch the challenge questions.
  pub fn fetch_challenge_questions(
    endpoints: &Endpoints,
    credentials: &Credentials,
    id_number: Option<&str>,
  ) -> Self {
    Self::with_id(
      CallKind::FetchChallengeQuestions,
      endpoints,
      credentials,
      id_number,
    )
  }

  /// Submit chosen answers to the challenge questions.
  pub fn submit_challenge_answers(
    endpoints: &Endpoints,
    credentials: &Credentials,
    id_number: Option<&str>,
    questions: Option<&[Question]>,
  ) -> Self {
    let mut request = Self::with_id(
      CallKind::SubmitChallengeAnswers,
      endpoints,
      credentials,
      id_number,
    );
    request.push_answers(questions.unwrap_or_default());
    request
  }

  pub fn kind(&self) -> CallKind { self.kind }

  pub fn url(&self) -> &str { &self.url }

  /// Form fields in insertion order.
  pub fn fields(&self) -> &[(String, String)] { &self.fields }

  /// Value of the first field named `name`.
  pub fn field(&self, name: &str) -> Option<&str> {
    self
      .fields
      .iter()
      .find(|(k, _)| k == name)
      .map(|(_, v)| v.as_str())
  }

  /// Field names only, safe to log.
  pub fn field_names(&self) -> Vec<&str> {
    self.fields.iter().map(|(k, _)| k.as_str()).collect()
  }

  /// Re-derive the `(type, answer)` pairs from the numbered fields, in
  /// question order. Stops at the first gap in the numbering.
  pub fn answer_pairs(&self) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for n in 1.. {
      let (Some(question_type), Some(answer)) = (
        self.field(&format!("question{n}Type")),
        self.field(&format!("question{n}Answer")),
      ) else {
        break;
      };
      pairs.push((question_type.to_string(), answer.to_string()));
    }
    pairs
  }

  // ── Assembly helpers ──────────────────────────────────────────────────────

  fn with_credentials(
    kind: CallKind,
    endpoints: &Endpoints,
    credentials: &Credentials,
  ) -> Self {
    let mut request = Self {
      kind,
      url: endpoints.url(kind).to_string(),
      fields: Vec::new(),
    };
    request.push("username", &credentials.username);
    request.push("password", &credentials.password);
    request
  }

  fn with_id(
    kind: CallKind,
    endpoints: &Endpoints,
    credentials: &Credentials,
    id_number: Option<&str>,
  ) -> Self {
    let mut request = Self::with_credentials(kind, endpoints, credentials);
    request.push("idNumber", id_number.unwrap_or_default());
    request
  }

  /// Numbering is 1-based and follows the list's iteration order.
  fn push_answers(&mut self, questions: &[Question]) {
    for (i, question) in questions.iter().enumerate() {
      let n = i + 1;
      self.push(&format!("question{n}Type"), &question.question_type);
      self.push(
        &format!("question{n}Answer"),
        question.chosen_answer.as_deref().unwrap_or_default(),
      );
    }
  }

  fn push(&mut self, name: &str, value: &str) {
    self.fields.push((name.to_string(), value.to_string()));
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::subject::Answer;

  fn creds() -> Credentials { Credentials::new("user", "pass") }

  fn question(prompt: &str, question_type: &str, chosen: &str) -> Question {
    let mut q = Question::new(prompt, question_type);
    q.candidate_answers.push(Answer::new(chosen));
    q.candidate_answers.push(Answer::new("None of the above"));
    q.chosen_answer = Some(chosen.to_string());
    q
  }

  fn three_questions() -> Vec<Question> {
    vec![
      question("With which name are you associated?", "question.type1", "JANNE"),
      question("Which number goes with your address?", "question.type2", "142"),
      question("Which cross street is near you?", "question.type3", "MEADOW ST"),
    ]
  }

  #[test]
  fn locate_sends_full_identity() {
    let identity = Identity {
      user_id: "1".into(),
      ..Identity::test_match()
    };
    let req = Request::locate(&Endpoints::default(), &creds(), &identity);

    assert_eq!(req.kind(), CallKind::Locate);
    assert_eq!(req.url(), "https://web.idologylive.com/api/idlive.svc");
    assert_eq!(req.field_names(), vec![
      "username", "password", "firstName", "lastName", "address", "city",
      "state", "zip", "ssnLast4", "dobMonth", "dobYear", "uid",
    ]);
    assert_eq!(req.field("username"), Some("user"));
    assert_eq!(req.field("password"), Some("pass"));
    assert_eq!(req.field("firstName"), Some("Spider"));
    assert_eq!(req.field("zip"), Some("33134"));
    assert_eq!(req.field("uid"), Some("1"));
    assert!(req.field("idNumber").is_none());
  }

  #[test]
  fn question_fetches_send_only_credentials_and_id() {
    let endpoints = Endpoints::default();
    for req in [
      Request::fetch_questions(&endpoints, &creds(), Some("12345")),
      Request::fetch_challenge_questions(&endpoints, &creds(), Some("12345")),
    ] {
      assert_eq!(req.field_names(), vec!["username", "password", "idNumber"]);
      assert_eq!(req.field("idNumber"), Some("12345"));
    }
  }

  #[test]
  fn each_kind_targets_its_endpoint() {
    let endpoints = Endpoints::default();
    let c = creds();
    let reqs = [
      Request::locate(&endpoints, &c, &Identity::default()),
      Request::fetch_questions(&endpoints, &c, None),
      Request::submit_answers(&endpoints, &c, None, None),
      Request::fetch_challenge_questions(&endpoints, &c, None),
      Request::submit_challenge_answers(&endpoints, &c, None, None),
    ];
    for (req, kind) in reqs.iter().zip(CallKind::ALL) {
      assert_eq!(req.kind(), kind);
      assert_eq!(req.url(), endpoints.url(kind));
    }
    assert_eq!(
      endpoints.url(CallKind::SubmitChallengeAnswers),
      "https://web.idologylive.com/api/idliveq-challenge-answers.svc"
    );
  }

  #[test]
  fn unset_id_is_sent_empty() {
    let req = Request::fetch_questions(&Endpoints::default(), &creds(), None);
    assert_eq!(req.field("idNumber"), Some(""));
  }

  #[test]
  fn submit_answers_numbers_from_one() {
    let questions = three_questions();
    let req = Request::submit_answers(
      &Endpoints::default(),
      &creds(),
      Some("12345"),
      Some(&questions),
    );

    assert_eq!(req.field("question1Type"), Some("question.type1"));
    assert_eq!(req.field("question1Answer"), Some("JANNE"));
    assert_eq!(req.field("question2Type"), Some("question.type2"));
    assert_eq!(req.field("question2Answer"), Some("142"));
    assert_eq!(req.field("question3Type"), Some("question.type3"));
    assert_eq!(req.field("question3Answer"), Some("MEADOW ST"));
    assert!(req.field("question0Type").is_none());
    assert!(req.field("question4Type").is_none());
  }

  #[test]
  fn single_question_is_numbered_one() {
    let questions = vec![question("Which street?", "street.name", "VICTOR WAY")];
    let req = Request::submit_challenge_answers(
      &Endpoints::default(),
      &creds(),
      Some("1"),
      Some(&questions),
    );
    assert_eq!(req.field("question1Type"), Some("street.name"));
    assert_eq!(req.field("question1Answer"), Some("VICTOR WAY"));
    assert!(req.field("question2Type").is_none());
  }

  #[test]
  fn answer_pairs_reproduce_question_order() {
    let questions = three_questions();
    let req = Request::submit_answers(
      &Endpoints::default(),
      &creds(),
      Some("12345"),
      Some(&questions),
    );
    let expected: Vec<(String, String)> = questions
      .iter()
      .map(|q| (q.question_type.clone(), q.chosen_answer.clone().unwrap()))
      .collect();
    assert_eq!(req.answer_pairs(), expected);
  }

  #[test]
  fn reordering_questions_reattributes_answers() {
    let mut questions = three_questions();
    questions.reverse();
    let req = Request::submit_answers(
      &Endpoints::default(),
      &creds(),
      Some("12345"),
      Some(&questions),
    );
    assert_eq!(req.field("question1Type"), Some("question.type3"));
    assert_eq!(req.field("question1Answer"), Some("MEADOW ST"));
  }

  #[test]
  fn unchosen_answer_is_sent_empty() {
    let questions = vec![Question::new("Where was your SSN issued?", "ssn.issued.in")];
    let req = Request::submit_answers(
      &Endpoints::default(),
      &creds(),
      Some("1"),
      Some(&questions),
    );
    assert_eq!(req.field("question1Type"), Some("ssn.issued.in"));
    assert_eq!(req.field("question1Answer"), Some(""));
  }

  #[test]
  fn unset_question_list_adds_no_pairs() {
    let req =
      Request::submit_answers(&Endpoints::default(), &creds(), Some("1"), None);
    assert_eq!(req.field_names(), vec!["username", "password", "idNumber"]);
    assert!(req.answer_pairs().is_empty());
  }

  #[test]
  fn endpoint_validation() {
    assert!(Endpoints::default().validate().is_ok());
    let broken = Endpoints {
      answers: String::new(),
      ..Endpoints::default()
    };
    assert!(matches!(broken.validate(), Err(Error::Config(_))));
  }
}
