//! CLI command handlers.
//!
//! This is the only layer that turns component results into user-facing output
//! and exit codes. Nothing below it prints or terminates the process.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::error::ErrorKind;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use crossterm::style::Stylize;
use tracing::{info, warn};

use crate::cli::args::{Args, Invocation, Options, Strategy};
use crate::config::Config;
use crate::constants;
use crate::core::dispatcher::{AnalysisRequest, Dispatcher};
use crate::core::report;
use crate::credentials::CredentialStore;
use crate::error::CredentialError;

/// How a command finished, short of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// No API key was stored; instructions were printed.
    MissingKey,
}

impl Outcome {
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::MissingKey => ExitCode::from(constants::EXIT_FAILURE),
        }
    }
}

/// Runs a parsed invocation against the real home directory and config.
///
/// # Errors
///
/// Returns an error if the home directory, config, key file, or API request
/// fails.
pub fn run(invocation: Invocation) -> Result<ExitCode> {
    let store = CredentialStore::from_home()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = match invocation {
        Invocation::AddKey(key) => add_key(&store, &key, &mut out)?,
        Invocation::Analyze(opts) => match require_key(&store, &mut out)? {
            Some(key) => {
                let config = Config::load().wrap_err("Failed to load configuration")?;
                analyze(key, &config, &opts, &mut out)?
            }
            None => Outcome::MissingKey,
        },
    };
    Ok(outcome.exit_code())
}

/// Prints what clap produced for help/version requests or bad input.
///
/// Help and version succeed; anything else prints the usage banner and is a
/// usage failure.
#[must_use]
pub fn handle_parse_error(err: &clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        _ => {
            let _ = err.print();
            println!("\n{}", Args::usage_banner());
            ExitCode::from(constants::EXIT_USAGE)
        }
    }
}

/// Stores `key` and confirms where it went.
///
/// # Errors
///
/// Returns an error if the key file cannot be written.
pub fn add_key<W: Write>(store: &CredentialStore, key: &str, out: &mut W) -> Result<Outcome> {
    store.save_key(key)?;
    info!(path = %store.path().display(), "API key stored");
    writeln!(out, "{}{}", constants::MSG_KEY_SAVED, store.path().display())?;
    Ok(Outcome::Success)
}

/// Looks up the stored key, printing instructions when there is none.
///
/// Runs before anything else an analysis needs, so a missing key is reported
/// ahead of config problems and before any network access.
///
/// # Errors
///
/// Returns an error if the key file exists but cannot be read.
pub fn require_key<W: Write>(store: &CredentialStore, out: &mut W) -> Result<Option<String>> {
    match store.get_key() {
        Ok(key) => Ok(Some(key)),
        Err(CredentialError::Missing { path }) => {
            warn!(path = %path.display(), "no API key stored");
            write!(out, "{}", key_instructions(stdout_is_terminal()))?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Runs one analysis with `key` and writes the report to `out`.
///
/// # Errors
///
/// Returns an error if the request cannot be built or sent, or the API answers
/// with an error.
pub fn analyze<W: Write>(
    key: String,
    config: &Config,
    opts: &Options,
    out: &mut W,
) -> Result<Outcome> {
    let strategy = opts.strategy_or(config.strategy);
    let dispatcher = Dispatcher::new(&config.endpoint)?;
    let body = dispatcher
        .dispatch(&AnalysisRequest {
            url: opts.url.clone(),
            key,
            strategy,
        })
        .wrap_err_with(|| format!("Analysis of {} failed", opts.url))?;

    if opts.json {
        writeln!(out, "{body}")?;
    } else {
        write!(out, "{}", report::render(&body))?;
    }

    if opts.open {
        open_web_report(&opts.url, strategy, out)?;
    }

    Ok(Outcome::Success)
}

/// Guidance for getting and installing an API key.
#[must_use]
pub fn key_instructions(color: bool) -> String {
    let header = if color {
        constants::MSG_NO_KEY_HEADER.red().to_string()
    } else {
        constants::MSG_NO_KEY_HEADER.to_string()
    };

    let mut text = format!("{header}\n");
    for step in constants::MSG_NO_KEY_STEPS {
        text.push_str(step);
        text.push('\n');
    }
    text
}

fn open_web_report<W: Write>(
    url: &str,
    strategy: Strategy,
    out: &mut W,
) -> Result<()> {
    let link = report::web_report_url(url, strategy);
    writeln!(out, "\n{}", constants::MSG_OPENING_BROWSER)?;
    if let Err(e) = open::that(&link) {
        warn!(error = %e, "browser launch failed");
        writeln!(out, "{}: {link}", constants::ERR_OPEN_BROWSER_FAILED)?;
    }
    Ok(())
}

fn stdout_is_terminal() -> bool {
    crossterm::tty::IsTty::is_tty(&io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(url: &str) -> Options {
        Options {
            url: url.to_string(),
            strategy: None,
            json: false,
            open: false,
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().join(constants::KEY_FILE_NAME))
    }

    #[test]
    fn test_add_key_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut out = Vec::new();

        let outcome = add_key(&store, "ABC123\n", &mut out).unwrap();
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(store.get_key().unwrap(), "ABC123");

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with(constants::MSG_KEY_SAVED));
        assert!(printed.contains(constants::KEY_FILE_NAME));
    }

    #[test]
    fn test_require_key_without_key_prints_instructions() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut out = Vec::new();

        assert_eq!(require_key(&store, &mut out).unwrap(), None);

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains(constants::MSG_NO_KEY_HEADER));
        assert!(printed.contains("pagespeed add-key YOUR_KEY"));
    }

    #[test]
    fn test_require_key_returns_stored_key_quietly() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save_key(" KEY\n").unwrap();
        let mut out = Vec::new();

        assert_eq!(require_key(&store, &mut out).unwrap().as_deref(), Some("KEY"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_analyze_rejects_invalid_endpoint_before_sending() {
        let config = Config {
            endpoint: "not a url".to_string(),
            strategy: Strategy::Desktop,
        };
        let mut out = Vec::new();

        assert!(analyze("KEY".to_string(), &config, &options("example.org"), &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_analyze_rejects_invalid_target_before_sending() {
        let config = Config::default();
        let mut out = Vec::new();

        let err = analyze("KEY".to_string(), &config, &options("http://"), &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("invalid URL"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_key_instructions_color() {
        let plain = key_instructions(false);
        assert!(plain.starts_with(constants::MSG_NO_KEY_HEADER));
        assert!(!plain.contains('\u{1b}'));

        let colored = key_instructions(true);
        assert!(colored.contains(constants::MSG_NO_KEY_HEADER));
        assert!(colored.ends_with(&plain[constants::MSG_NO_KEY_HEADER.len()..]));
    }

    #[test]
    fn test_outcome_exit_codes_differ() {
        assert_ne!(
            format!("{:?}", Outcome::Success.exit_code()),
            format!("{:?}", Outcome::MissingKey.exit_code())
        );
    }
}
