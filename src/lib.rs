//! pagespeed - run `PageSpeed` Insights analysis from the terminal.
//!
//! The binary is a thin driver over these modules: [`cli::args`] parses the
//! command line, [`credentials`] stores the API key, [`crate::core::dispatcher`] sends
//! the single API request and [`crate::core::report`] formats what comes back.

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod credentials;
pub mod error;
pub mod logging;
