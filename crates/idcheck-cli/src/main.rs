//! `idcheck`: run an identity verification against the IDology service.
//!
//! # Usage
//!
//! ```text
//! idcheck locate --fixture match
//! idcheck --config idcheck.toml verify --first-name Jane --last-name Doe …
//! ```

mod client;
mod flow;
mod settings;

use std::{io, path::PathBuf, process::ExitCode, time::Duration};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use client::HttpTransport;
use idcheck_core::{CredentialSource, Identity};
use idcheck_session::{Service, ServiceConfig, Subject};
use settings::{CredentialsFile, Settings};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Knowledge-based identity verification client")]
struct Cli {
  /// Path to the TOML settings file.
  #[arg(short, long, default_value = "idcheck.toml")]
  config: PathBuf,

  /// TOML file with `username` and `password`; overrides the settings file.
  #[arg(long, env = "IDCHECK_CREDENTIALS", value_name = "FILE")]
  credentials: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Look the subject up and report eligibility.
  Locate(IdentityArgs),
  /// Run the full question-and-answer flow interactively.
  Verify(IdentityArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum Fixture {
  /// The service's test record, which is always located.
  Match,
  /// A record the service will never locate.
  NoMatch,
}

#[derive(Args)]
struct IdentityArgs {
  /// Use a built-in test identity instead of the flags below.
  #[arg(long, value_enum)]
  fixture: Option<Fixture>,

  #[arg(long, default_value = "")]
  first_name: String,
  #[arg(long, default_value = "")]
  last_name:  String,
  #[arg(long, default_value = "")]
  address:    String,
  #[arg(long, default_value = "")]
  city:       String,
  #[arg(long, default_value = "")]
  state:      String,
  #[arg(long, default_value = "")]
  zip:        String,
  #[arg(long, default_value = "")]
  ssn_last4:  String,
  #[arg(long, default_value = "")]
  dob_month:  String,
  #[arg(long, default_value = "")]
  dob_year:   String,
  /// Caller's own reference for this subject.
  #[arg(long, default_value = "")]
  user_id:    String,
}

impl IdentityArgs {
  fn into_subject<T: idcheck_core::Transport>(self, service: Service<T>) -> Subject<T> {
    let identity = Identity {
      first_name: self.first_name,
      last_name:  self.last_name,
      address:    self.address,
      city:       self.city,
      state:      self.state,
      zip:        self.zip,
      ssn_last4:  self.ssn_last4,
      dob_month:  self.dob_month,
      dob_year:   self.dob_year,
      user_id:    self.user_id,
    };
    let mut subject = Subject::with_identity(identity, service);
    let note = match self.fixture {
      Some(Fixture::Match) => Some(subject.set_match()),
      Some(Fixture::NoMatch) => Some(subject.set_no_match()),
      None => None,
    };
    if let Some(note) = note {
      tracing::info!("{note}");
    }
    subject
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  let credentials_path = cli.credentials.unwrap_or(settings.credentials_path);
  let credentials = CredentialsFile::new(credentials_path)
    .load()
    .context("failed to load credentials")?;

  let transport = HttpTransport::new(
    Duration::from_secs(settings.timeout_secs),
    settings.verify_tls,
  )?;
  if !settings.verify_tls {
    tracing::warn!("TLS certificate verification is disabled");
  }
  let service = Service::new(transport, ServiceConfig {
    endpoints: settings.endpoints,
    credentials,
    policy: settings.policy,
  });

  let mut stdout = io::stdout();
  let passed = match cli.command {
    Command::Locate(args) => {
      let mut subject = args.into_subject(service);
      flow::locate(&mut subject, &mut stdout)?
    }
    Command::Verify(args) => {
      let mut subject = args.into_subject(service);
      flow::verify(&mut subject, &mut io::stdin().lock(), &mut stdout)?
    }
  };

  Ok(if passed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
