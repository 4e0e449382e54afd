//! Terminal walkthrough of a verification attempt.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use idcheck_core::{Question, Transport};
use idcheck_session::Subject;

/// Locate the subject and print what the service said about them.
pub fn locate<T: Transport>(
  subject: &mut Subject<T>,
  out: &mut impl Write,
) -> Result<bool> {
  if !subject.locate() {
    bail!("locate() failed; see the log for details");
  }
  writeln!(out, "id number: {}", subject.id_number().unwrap_or("-"))?;
  writeln!(
    out,
    "eligible for verification: {}",
    subject.eligible_for_verification()
  )?;
  if !subject.qualifiers().is_empty() {
    writeln!(out, "qualifiers: {}", subject.qualifiers())?;
  }
  Ok(subject.eligible_for_verification())
}

/// Run every stage, asking the user to pick each answer on `input`.
/// Returns whether the subject ended up verified.
pub fn verify<T: Transport>(
  subject: &mut Subject<T>,
  input: &mut impl BufRead,
  out: &mut impl Write,
) -> Result<bool> {
  if !locate(subject, out)? {
    writeln!(out, "subject cannot be verified")?;
    return Ok(false);
  }

  if !subject.get_questions() {
    bail!("get_questions() failed; see the log for details");
  }
  let Some(questions) = subject.verification_questions_mut() else {
    writeln!(out, "no questions were returned")?;
    return Ok(false);
  };
  ask(questions, input, out)?;
  if !subject.submit_answers() {
    bail!("submit_answers() failed; see the log for details");
  }

  if subject.challenge() {
    writeln!(out, "two answers were wrong; answer the challenge questions")?;
    if !subject.get_challenge_questions() {
      bail!("get_challenge_questions() failed; see the log for details");
    }
    let Some(questions) = subject.challenge_questions_mut() else {
      writeln!(out, "no challenge questions were returned")?;
      return Ok(false);
    };
    ask(questions, input, out)?;
    if !subject.submit_challenge_answers() {
      bail!("submit_challenge_answers() failed; see the log for details");
    }
  }

  writeln!(out, "verified: {}", subject.verified())?;
  Ok(subject.verified())
}

fn ask(
  questions: &mut [Question],
  input: &mut impl BufRead,
  out: &mut impl Write,
) -> Result<()> {
  for (n, question) in questions.iter_mut().enumerate() {
    writeln!(out, "\n{}. {}", n + 1, question.prompt)?;
    for (i, answer) in question.candidate_answers.iter().enumerate() {
      writeln!(out, "   {}) {}", i + 1, answer.text)?;
    }

    loop {
      write!(out, "answer [1-{}]: ", question.candidate_answers.len())?;
      out.flush()?;

      let mut line = String::new();
      if input.read_line(&mut line).context("reading answer")? == 0 {
        bail!("input closed before every question was answered");
      }
      let picked = line
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|i| i.checked_sub(1))
        .is_some_and(|i| question.choose(i));
      if picked {
        break;
      }
      writeln!(out, "not a valid choice")?;
    }
  }
  Ok(())
}
