//! Command-line argument definitions.

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use serde::Deserialize;

use crate::constants;

/// pagespeed - `PageSpeed` Insights from the terminal
///
/// Runs `PageSpeed` analysis on the page at the specified URL, and returns a
/// `PageSpeed` score, a list of suggestions to make that page faster, and other
/// information.
#[derive(Parser, Debug)]
#[command(
    name = "pagespeed",
    author,
    version,
    about,
    disable_version_flag = true,
    args_conflicts_with_subcommands = true,
    after_help = constants::USAGE_EXAMPLES
)]
pub struct Args {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// The URL of the page for which the `PageSpeed` Insights API should generate results
    #[arg(short, long = "url", value_name = "URL")]
    pub url: Option<String>,

    /// The URL to analyze (same as --url)
    #[arg(value_name = "URL", hide = true)]
    pub target: Option<String>,

    /// The strategy to use when analyzing the page [default: desktop]
    #[arg(short, long, value_enum, value_name = "STRATEGY")]
    pub strategy: Option<Strategy>,

    /// Print the raw API response instead of the formatted report
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Open the web report for the URL in the browser afterwards
    #[arg(long, action = ArgAction::SetTrue)]
    pub open: bool,

    /// Show the pagespeed version and exit
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Save your API key to ~/.pagespeed_api_key
    #[command(name = "add-key")]
    AddKey {
        /// The `PageSpeed` Insights API key
        key: String,
    },
}

/// Analysis mode requested from the API.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Analyze the page as a desktop browser sees it.
    #[default]
    Desktop,
    /// Analyze the page as a mobile device sees it.
    Mobile,
}

impl Strategy {
    /// Value sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed options for an analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub url: String,
    /// `None` when `-s` was not given.
    pub strategy: Option<Strategy>,
    pub json: bool,
    pub open: bool,
}

impl Options {
    /// The requested strategy, or `fallback` when none was given.
    #[must_use]
    pub fn strategy_or(&self, fallback: Strategy) -> Strategy {
        self.strategy.unwrap_or(fallback)
    }
}

/// What the user asked the program to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Analyze(Options),
    AddKey(String),
}

impl Args {
    /// Turns the raw arguments into an [`Invocation`].
    ///
    /// Help and version requests come back as errors of kind
    /// [`ErrorKind::DisplayHelp`] and [`ErrorKind::DisplayVersion`]; the caller
    /// decides whether to print them and exit.
    ///
    /// # Errors
    ///
    /// Returns a [`clap::Error`] for help/version displays, malformed input, or
    /// when no URL was given.
    pub fn parse_invocation<I, T>(args: I) -> Result<Invocation, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = Self::try_parse_from(args)?;

        if let Some(Commands::AddKey { key }) = args.command {
            return Ok(Invocation::AddKey(key));
        }

        let Some(url) = args.url.or(args.target) else {
            return Err(Self::command().error(
                ErrorKind::MissingRequiredArgument,
                "a URL is required (use -u URL or pass it as the only argument)",
            ));
        };

        Ok(Invocation::Analyze(Options {
            url,
            strategy: args.strategy,
            json: args.json,
            open: args.open,
        }))
    }

    /// The full help text, used as the usage banner on bad input.
    #[must_use]
    pub fn usage_banner() -> String {
        Self::command().render_help().to_string()
    }
}
