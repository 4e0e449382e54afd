//! Typed responses for the five call kinds.
//!
//! Every response shares a [`ResponseBase`] (raw text, element tree, outer
//! result pair, id number). The per-kind structs add qualifiers, questions,
//! or the inner verification result. [`Response`] is the tagged union the
//! service keeps for inspection.

use idcheck_core::{
  CallKind,
  subject::{Answer, Question},
  taxonomy::{ERROR_KEY, OuterResult, UNEXPECTED_ERROR_MESSAGE},
};

use crate::{
  document::{self, Element},
  error::Result,
};

// ─── Base ────────────────────────────────────────────────────────────────────

/// Which top-level node the outer result pair was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
  /// An `<error>` node was present; nothing else was extracted.
  Error,
  /// A `<results>` node was present.
  Results,
  /// Neither node; the fallback pair was used.
  Unrecognized,
}

/// Fields every response carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseBase {
  pub raw:            String,
  pub document:       Element,
  pub shape:          PayloadShape,
  pub result_key:     String,
  pub result_message: String,
  /// Only read from payloads with a `<results>` node.
  pub id_number:      Option<String>,
}

impl ResponseBase {
  /// Parse the shared fields. Only malformed XML is an error.
  pub fn parse(raw: &str) -> Result<Self> {
    let document = document::parse(raw)?;

    let (shape, result_key, result_message, id_number) =
      if let Some(error) = document.find("error") {
        (PayloadShape::Error, ERROR_KEY.to_string(), error.inner_text(), None)
      } else if let Some(results) = document.find("results") {
        (
          PayloadShape::Results,
          results.text_of("key"),
          results.text_of("message"),
          document.find("id-number").map(Element::inner_text),
        )
      } else {
        (
          PayloadShape::Unrecognized,
          ERROR_KEY.to_string(),
          UNEXPECTED_ERROR_MESSAGE.to_string(),
          None,
        )
      };

    Ok(Self {
      raw: raw.to_string(),
      document,
      shape,
      result_key,
      result_message,
      id_number,
    })
  }

  /// The outer key classified against the catalog.
  pub fn outcome(&self) -> OuterResult { OuterResult::classify(&self.result_key) }

  pub fn is_match(&self) -> bool { self.outcome() == OuterResult::Match }
}

// ─── Locate ──────────────────────────────────────────────────────────────────

/// Qualifier key → message, in document order. A repeated key keeps its
/// first position and takes the last message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Qualifiers(Vec<(String, String)>);

impl Qualifiers {
  pub fn insert(&mut self, key: String, message: String) {
    match self.0.iter_mut().find(|(k, _)| *k == key) {
      Some(entry) => entry.1 = message,
      None => self.0.push((key, message)),
    }
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.0.iter().find(|(k, _)| k == key).map(|(_, m)| m.as_str())
  }

  pub fn contains_key(&self, key: &str) -> bool { self.get(key).is_some() }

  pub fn messages(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(|(_, m)| m.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, m)| (k.as_str(), m.as_str()))
  }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// Messages joined with `|`.
  pub fn summary(&self) -> String {
    self.messages().collect::<Vec<_>>().join("|")
  }
}

/// Response to a locate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocateResponse {
  pub base:                   ResponseBase,
  pub qualifiers:             Qualifiers,
  /// Text of `<eligible-for-questions>`, if the node exists.
  pub eligible_for_questions: Option<String>,
}

impl LocateResponse {
  pub fn parse(raw: &str) -> Result<Self> {
    let base = ResponseBase::parse(raw)?;
    let mut qualifiers = Qualifiers::default();
    let mut eligible_for_questions = None;

    // Everything but an outer error node is scanned, fallback shape included.
    if base.shape != PayloadShape::Error {
      for qualifier in base
        .document
        .find_all("qualifiers")
        .into_iter()
        .flat_map(|container| container.find_all("qualifier"))
      {
        qualifiers.insert(qualifier.text_of("key"), qualifier.text_of("message"));
      }
      eligible_for_questions = base
        .document
        .find("eligible-for-questions")
        .map(Element::inner_text);
    }

    Ok(Self {
      base,
      qualifiers,
      eligible_for_questions,
    })
  }
}

// ─── Question fetches ────────────────────────────────────────────────────────

/// Which round of questioning a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
  Verification,
  Challenge,
}

/// Response to a question fetch (either round).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionsResponse {
  pub base:      ResponseBase,
  pub round:     Round,
  /// `None` unless the outer result is a match and at least one question was
  /// returned. An empty list is never produced.
  pub questions: Option<Vec<Question>>,
}

impl QuestionsResponse {
  pub fn parse(raw: &str, round: Round) -> Result<Self> {
    let base = ResponseBase::parse(raw)?;

    let returned: Vec<&Element> = base
      .document
      .find_all("questions")
      .into_iter()
      .flat_map(|container| container.find_all("question"))
      .collect();

    let questions: Option<Vec<Question>> = (base.is_match() && !returned.is_empty())
      .then(|| returned.into_iter().map(parse_question).collect());

    Ok(Self {
      base,
      round,
      questions,
    })
  }
}

fn parse_question(element: &Element) -> Question {
  let mut question =
    Question::new(element.text_of("prompt"), element.text_of("type"));
  question.candidate_answers = element
    .find_all("answer")
    .into_iter()
    .map(|a| Answer::new(a.inner_text()))
    .collect();
  question
}

// ─── Answer submissions ──────────────────────────────────────────────────────

/// Response to an answer submission (either round).
///
/// The service reports the round's outcome in its own node pair, separately
/// from the generic outer result; `inner_key` is what the decision predicates
/// read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswersResponse {
  pub base:          ResponseBase,
  pub round:         Round,
  pub inner_key:     String,
  pub inner_message: String,
}

impl AnswersResponse {
  pub fn parse(raw: &str, round: Round) -> Result<Self> {
    let base = ResponseBase::parse(raw)?;
    let (error_tag, result_tag) = match round {
      Round::Verification => ("idliveq-error", "idliveq-result"),
      Round::Challenge => ("idliveq-challenge-error", "idliveq-challenge-result"),
    };

    let (inner_key, inner_message) = if base.shape == PayloadShape::Error {
      (ERROR_KEY.to_string(), base.result_message.clone())
    } else if let Some(node) = base
      .document
      .find(error_tag)
      .or_else(|| base.document.find(result_tag))
    {
      (node.text_of("key"), node.text_of("message"))
    } else {
      (ERROR_KEY.to_string(), UNEXPECTED_ERROR_MESSAGE.to_string())
    };

    Ok(Self {
      base,
      round,
      inner_key,
      inner_message,
    })
  }
}

// ─── Tagged union ────────────────────────────────────────────────────────────

/// A parsed response of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
  Locate(LocateResponse),
  Questions(QuestionsResponse),
  Answers(AnswersResponse),
  ChallengeQuestions(QuestionsResponse),
  ChallengeAnswers(AnswersResponse),
}

impl Response {
  /// Parse `raw` as the response to a call of `kind`.
  pub fn parse(kind: CallKind, raw: &str) -> Result<Self> {
    Ok(match kind {
      CallKind::Locate => Self::Locate(LocateResponse::parse(raw)?),
      CallKind::FetchQuestions => {
        Self::Questions(QuestionsResponse::parse(raw, Round::Verification)?)
      }
      CallKind::SubmitAnswers => {
        Self::Answers(AnswersResponse::parse(raw, Round::Verification)?)
      }
      CallKind::FetchChallengeQuestions => {
        Self::ChallengeQuestions(QuestionsResponse::parse(raw, Round::Challenge)?)
      }
      CallKind::SubmitChallengeAnswers => {
        Self::ChallengeAnswers(AnswersResponse::parse(raw, Round::Challenge)?)
      }
    })
  }

  pub fn kind(&self) -> CallKind {
    match self {
      Self::Locate(_) => CallKind::Locate,
      Self::Questions(_) => CallKind::FetchQuestions,
      Self::Answers(_) => CallKind::SubmitAnswers,
      Self::ChallengeQuestions(_) => CallKind::FetchChallengeQuestions,
      Self::ChallengeAnswers(_) => CallKind::SubmitChallengeAnswers,
    }
  }

  pub fn base(&self) -> &ResponseBase {
    match self {
      Self::Locate(r) => &r.base,
      Self::Questions(r) | Self::ChallengeQuestions(r) => &r.base,
      Self::Answers(r) | Self::ChallengeAnswers(r) => &r.base,
    }
  }

  pub fn as_locate(&self) -> Option<&LocateResponse> {
    match self {
      Self::Locate(r) => Some(r),
      _ => None,
    }
  }

  pub fn as_questions(&self) -> Option<&QuestionsResponse> {
    match self {
      Self::Questions(r) | Self::ChallengeQuestions(r) => Some(r),
      _ => None,
    }
  }

  pub fn as_answers(&self) -> Option<&AnswersResponse> {
    match self {
      Self::Answers(r) | Self::ChallengeAnswers(r) => Some(r),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{Error, fixtures};

  // ── Base ──────────────────────────────────────────────────────────────────

  #[test]
  fn error_node_sets_error_pair() {
    let r = ResponseBase::parse(fixtures::ERROR).unwrap();
    assert_eq!(r.shape, PayloadShape::Error);
    assert_eq!(r.result_key, "error");
    assert_eq!(
      r.result_message,
      "Your IP address is not registered. Please call IDology Customer Service (770-984-4697)."
    );
    assert!(r.id_number.is_none());
  }

  #[test]
  fn unknown_shape_falls_back() {
    let r = ResponseBase::parse(fixtures::UNKNOWN).unwrap();
    assert_eq!(r.shape, PayloadShape::Unrecognized);
    assert_eq!(r.result_key, "error");
    assert_eq!(r.result_message, "The API returned an unexpected error.");
  }

  #[test]
  fn results_node_sets_key_message_and_id() {
    let r = ResponseBase::parse(fixtures::NO_MATCH).unwrap();
    assert_eq!(r.shape, PayloadShape::Results);
    assert_eq!(r.result_key, "result.no.match");
    assert_eq!(r.result_message, "ID Not Located");
    assert_eq!(r.id_number.as_deref(), Some("5342330"));
    assert_eq!(r.outcome(), OuterResult::NoMatch);
  }

  #[test]
  fn raw_payload_is_retained() {
    let r = ResponseBase::parse(fixtures::MATCH_FOUND).unwrap();
    assert_eq!(r.raw, fixtures::MATCH_FOUND);
    assert!(r.document.find("response").is_some());
  }

  #[test]
  fn malformed_payload_is_an_error() {
    for kind in CallKind::ALL {
      assert!(matches!(
        Response::parse(kind, fixtures::MALFORMED),
        Err(Error::MalformedPayload(_))
      ));
    }
  }

  #[test]
  fn error_takes_precedence_over_results() {
    let raw = "<response><error>denied</error>\
      <id-number>1</id-number>\
      <results><key>result.match</key><message>ID Located</message></results>\
      <eligible-for-questions>true</eligible-for-questions>\
      <qualifiers><qualifier><key>resultcode.thin.file</key><message>Thin File</message></qualifier></qualifiers>\
      </response>";
    let r = LocateResponse::parse(raw).unwrap();
    assert_eq!(r.base.result_key, "error");
    assert_eq!(r.base.result_message, "denied");
    assert!(r.base.id_number.is_none());
    assert!(r.qualifiers.is_empty());
    assert!(r.eligible_for_questions.is_none());
  }

  // ── Locate ────────────────────────────────────────────────────────────────

  #[test]
  fn locate_match_without_qualifiers() {
    let r = LocateResponse::parse(fixtures::MATCH_FOUND).unwrap();
    assert_eq!(r.base.result_key, "result.match");
    assert_eq!(r.base.result_message, "ID Located");
    assert_eq!(r.base.id_number.as_deref(), Some("5342889"));
    assert_eq!(r.eligible_for_questions.as_deref(), Some("true"));
    assert!(r.qualifiers.is_empty());
  }

  #[test]
  fn locate_collects_qualifiers() {
    for (key, message) in fixtures::DISQUALIFYING {
      let r = LocateResponse::parse(&fixtures::match_with_qualifier(key, message))
        .unwrap();
      assert_eq!(r.base.id_number.as_deref(), Some("5922430"));
      assert!(r.qualifiers.contains_key(key));
      assert_eq!(r.qualifiers.get(key), Some(message));
    }
  }

  #[test]
  fn qualifier_order_and_summary() {
    let r = LocateResponse::parse(fixtures::MATCH_WITH_TWO_QUALIFIERS).unwrap();
    let keys: Vec<_> = r.qualifiers.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["resultcode.thin.file", "resultcode.address.velocity"]);
    assert_eq!(r.qualifiers.summary(), "Thin File|Address Velocity Alert");
  }

  #[test]
  fn repeated_qualifier_key_keeps_last_message() {
    let mut q = Qualifiers::default();
    q.insert("a".into(), "first".into());
    q.insert("b".into(), "other".into());
    q.insert("a".into(), "second".into());
    assert_eq!(q.len(), 2);
    assert_eq!(q.summary(), "second|other");
  }

  #[test]
  fn qualifiers_are_read_from_every_container() {
    let raw = "<response><results><key>result.match</key></results>\
      <qualifiers><qualifier><key>a</key><message>First</message></qualifier></qualifiers>\
      <qualifiers><qualifier><key>b</key><message>Second</message></qualifier></qualifiers>\
      </response>";
    let r = LocateResponse::parse(raw).unwrap();
    assert_eq!(r.qualifiers.summary(), "First|Second");
  }

  #[test]
  fn qualifiers_survive_the_fallback_shape() {
    let raw = "<response>\
      <qualifiers><qualifier><key>resultcode.subject.deceased</key>\
      <message>Subject is Deceased</message></qualifier></qualifiers>\
      </response>";
    let r = LocateResponse::parse(raw).unwrap();
    assert_eq!(r.base.shape, PayloadShape::Unrecognized);
    assert_eq!(r.base.result_key, "error");
    assert_eq!(r.qualifiers.get("resultcode.subject.deceased"), Some("Subject is Deceased"));
  }

  // ── Questions ─────────────────────────────────────────────────────────────

  #[test]
  fn questions_are_parsed_in_order() {
    let r = QuestionsResponse::parse(fixtures::QUESTIONS, Round::Verification)
      .unwrap();
    assert_eq!(r.base.result_key, "result.match");
    assert_eq!(r.base.id_number.as_deref(), Some("5343388"));

    let questions = r.questions.unwrap();
    let prompts: Vec<_> = questions.iter().map(|q| q.prompt.as_str()).collect();
    assert_eq!(prompts, vec![
      "With which name are you associated?",
      "Where was your social security number issued?",
      "In which county have you lived?",
    ]);
    let types: Vec<_> = questions.iter().map(|q| q.question_type.as_str()).collect();
    assert_eq!(types, vec!["alternate.names.phone", "ssn.issued.in", "current.county"]);

    let answers: Vec<_> = questions[1]
      .candidate_answers
      .iter()
      .map(|a| a.text.as_str())
      .collect();
    assert_eq!(answers, vec![
      "Michigan", "Wyoming", "Arkansas", "North Carolina", "Illinois",
      "None of the above",
    ]);
    assert!(questions.iter().all(|q| q.candidate_answers.len() == 6));
    assert!(questions.iter().all(|q| q.chosen_answer.is_none()));
  }

  #[test]
  fn challenge_questions_are_parsed() {
    let r = QuestionsResponse::parse(fixtures::CHALLENGE_QUESTIONS, Round::Challenge)
      .unwrap();
    assert_eq!(r.base.result_message, "Pass");
    assert_eq!(r.base.id_number.as_deref(), Some("5444900"));
    let questions = r.questions.unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].question_type, "person.known");
    assert_eq!(questions[1].prompt, "Which street goes with your address number 840?");
    assert_eq!(questions[1].candidate_answers[0].text, "ROBBIE VW");
  }

  #[test]
  fn missing_questions_element_leaves_list_unset() {
    let r = QuestionsResponse::parse(fixtures::MATCH_FOUND, Round::Verification)
      .unwrap();
    assert_eq!(r.base.result_key, "result.match");
    assert_eq!(r.base.id_number.as_deref(), Some("5342889"));
    assert!(r.questions.is_none());
  }

  #[test]
  fn empty_questions_element_leaves_list_unset() {
    let r = QuestionsResponse::parse(fixtures::EMPTY_QUESTIONS, Round::Verification)
      .unwrap();
    assert!(r.base.is_match());
    assert!(r.base.document.find("questions").is_some());
    assert!(r.questions.is_none());
  }

  #[test]
  fn questions_ignored_without_match() {
    let raw = fixtures::QUESTIONS.replace("result.match", "result.no.match");
    let r = QuestionsResponse::parse(&raw, Round::Verification).unwrap();
    assert!(r.questions.is_none());
  }

  // ── Answers ───────────────────────────────────────────────────────────────

  #[test]
  fn inner_result_is_read_per_round() {
    let r = AnswersResponse::parse(
      &fixtures::verification_result("result.questions.1.incorrect", "One Incorrect Answer"),
      Round::Verification,
    )
    .unwrap();
    assert_eq!(r.inner_key, "result.questions.1.incorrect");
    assert_eq!(r.inner_message, "One Incorrect Answer");
    assert_eq!(r.base.result_key, "result.match");

    let c = AnswersResponse::parse(
      &fixtures::challenge_result("result.challenge.0.incorrect"),
      Round::Challenge,
    )
    .unwrap();
    assert_eq!(c.inner_key, "result.challenge.0.incorrect");
    assert_eq!(c.inner_message, "result.challenge.0.incorrect");
  }

  #[test]
  fn inner_error_wins_over_inner_result() {
    let r = AnswersResponse::parse(fixtures::VERIFICATION_INNER_ERROR, Round::Verification)
      .unwrap();
    assert_eq!(r.inner_key, "id.not.eligible.for.questions");
    assert_eq!(r.inner_message, "Not Eligible For Questions");
  }

  #[test]
  fn other_rounds_nodes_are_not_read() {
    let r = AnswersResponse::parse(
      &fixtures::verification_result("result.questions.0.incorrect", "All Answers Correct"),
      Round::Challenge,
    )
    .unwrap();
    assert_eq!(r.inner_key, "error");
    assert_eq!(r.inner_message, "The API returned an unexpected error.");
  }

  #[test]
  fn outer_error_becomes_inner_error() {
    let r = AnswersResponse::parse(fixtures::ERROR, Round::Verification).unwrap();
    assert_eq!(r.inner_key, "error");
    assert_eq!(r.inner_message, r.base.result_message);
  }

  #[test]
  fn timeout_is_an_ordinary_result() {
    let r = AnswersResponse::parse(fixtures::VERIFICATION_TIMEOUT, Round::Verification)
      .unwrap();
    assert_eq!(r.inner_key, "result.timeout");
    assert_eq!(r.inner_message, "result.timeout");
  }

  // ── Union ─────────────────────────────────────────────────────────────────

  #[test]
  fn parse_dispatches_on_kind() {
    for kind in CallKind::ALL {
      let r = Response::parse(kind, fixtures::MATCH_FOUND).unwrap();
      assert_eq!(r.kind(), kind);
      assert_eq!(r.base().result_key, "result.match");
    }
    let r = Response::parse(CallKind::Locate, fixtures::MATCH_FOUND).unwrap();
    assert!(r.as_locate().is_some());
    assert!(r.as_questions().is_none());
    let r = Response::parse(CallKind::SubmitChallengeAnswers, fixtures::MATCH_FOUND)
      .unwrap();
    assert_eq!(r.as_answers().map(|a| a.round), Some(Round::Challenge));
  }
}
