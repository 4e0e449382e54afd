//! One remote round trip per call kind.

use idcheck_core::{
  CallKind, Credentials, Endpoints, Identity, Policy, Question, Request,
  Transport,
};
use idcheck_response::{
  AnswersResponse, LocateResponse, QuestionsResponse, Response, Round,
};

use crate::error::ServiceError;

/// Everything a [`Service`] needs besides its transport.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
  pub endpoints:   Endpoints,
  pub credentials: Credentials,
  pub policy:      Policy,
}

impl ServiceConfig {
  /// Default endpoints and policy with the given credentials.
  pub fn new(credentials: Credentials) -> Self {
    Self {
      endpoints: Endpoints::default(),
      credentials,
      policy: Policy::default(),
    }
  }
}

/// Client for the verification service.
///
/// Each call builds its request, posts it, and parses the reply. Any
/// transport or parse failure is logged with the stage name and returned as a
/// [`ServiceError`]. The most recent response of each kind is kept for
/// inspection.
pub struct Service<T> {
  transport: T,
  config:    ServiceConfig,
  last:      [Option<Response>; 5],
}

impl<T: Transport> Service<T> {
  pub fn new(transport: T, config: ServiceConfig) -> Self {
    Self {
      transport,
      config,
      last: Default::default(),
    }
  }

  pub fn config(&self) -> &ServiceConfig { &self.config }

  pub fn policy(&self) -> &Policy { &self.config.policy }

  pub fn transport(&self) -> &T { &self.transport }

  /// The last successfully parsed response for `kind`.
  pub fn last_response(&self, kind: CallKind) -> Option<&Response> {
    self.last[kind.index()].as_ref()
  }

  // ── Calls ─────────────────────────────────────────────────────────────────

  /// Look the subject up by identity.
  pub fn locate(
    &mut self,
    identity: &Identity,
  ) -> Result<LocateResponse, ServiceError> {
    let c = &self.config;
    let request = Request::locate(&c.endpoints, &c.credentials, identity);
    self.exchange(request, LocateResponse::parse, Response::Locate)
  }

  /// Fetch the first-round questions for a located subject.
  pub fn get_questions(
    &mut self,
    id_number: Option<&str>,
  ) -> Result<QuestionsResponse, ServiceError> {
    let c = &self.config;
    let request = Request::fetch_questions(&c.endpoints, &c.credentials, id_number);
    self.exchange(
      request,
      |raw| QuestionsResponse::parse(raw, Round::Verification),
      Response::Questions,
    )
  }

  /// Submit the chosen first-round answers.
  pub fn submit_answers(
    &mut self,
    id_number: Option<&str>,
    questions: Option<&[Question]>,
  ) -> Result<AnswersResponse, ServiceError> {
    let c = &self.config;
    let request =
      Request::submit_answers(&c.endpoints, &c.credentials, id_number, questions);
    self.exchange(
      request,
      |raw| AnswersResponse::parse(raw, Round::Verification),
      Response::Answers,
    )
  }

  /// Fetch the challenge questions.
  pub fn get_challenge_questions(
    &mut self,
    id_number: Option<&str>,
  ) -> Result<QuestionsResponse, ServiceError> {
    let c = &self.config;
    let request =
      Request::fetch_challenge_questions(&c.endpoints, &c.credentials, id_number);
    self.exchange(
      request,
      |raw| QuestionsResponse::parse(raw, Round::Challenge),
      Response::ChallengeQuestions,
    )
  }

  /// Submit the chosen challenge answers.
  pub fn submit_challenge_answers(
    &mut self,
    id_number: Option<&str>,
    questions: Option<&[Question]>,
  ) -> Result<AnswersResponse, ServiceError> {
    let c = &self.config;
    let request = Request::submit_challenge_answers(
      &c.endpoints,
      &c.credentials,
      id_number,
      questions,
    );
    self.exchange(
      request,
      |raw| AnswersResponse::parse(raw, Round::Challenge),
      Response::ChallengeAnswers,
    )
  }

  // ── Round trip ────────────────────────────────────────────────────────────

  /// Post `request`, parse the reply with `parse`, and keep a copy in the
  /// slot for the request's kind.
  fn exchange<R: Clone>(
    &mut self,
    request: Request,
    parse: impl FnOnce(&str) -> idcheck_response::Result<R>,
    wrap: fn(R) -> Response,
  ) -> Result<R, ServiceError> {
    let kind = request.kind();
    tracing::debug!(
      stage = kind.stage(),
      url = request.url(),
      fields = ?request.field_names(),
      "posting request"
    );

    let raw = self
      .transport
      .post(request.url(), request.fields())
      .map_err(|e| failed(kind, e))?;
    let response = parse(raw.as_str()).map_err(|e| failed(kind, e))?;

    let stored = wrap(response.clone());
    tracing::debug!(
      stage = kind.stage(),
      result_key = %stored.base().result_key,
      "parsed response"
    );
    self.last[kind.index()] = Some(stored);
    Ok(response)
  }
}

fn failed(
  kind: CallKind,
  source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> ServiceError {
  let error = ServiceError::new(kind, source);
  tracing::error!(stage = error.stage, error = %error.source, "verification service error");
  error
}
