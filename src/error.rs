//! Error types for the credential store, configuration, and dispatcher.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reading or writing the API key file.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// No key file, or a key file with nothing but whitespace.
    #[error("no API key found at {}", .path.display())]
    Missing { path: PathBuf },
    /// The home directory could not be determined (`HOME` unset).
    #[error("unable to determine the home directory; is HOME set?")]
    NoHome,
    #[error("unable to access API key file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failures building or sending the analysis request.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("invalid URL '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid API endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{message}: {source}")]
    Transport {
        message: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{}{status}{}", crate::constants::ERR_SERVER_ERROR, api_detail(.detail.as_deref()))]
    Api {
        status: reqwest::StatusCode,
        detail: Option<String>,
    },
}

fn api_detail(detail: Option<&str>) -> String {
    detail
        .map(|d| format!(" ({d})"))
        .unwrap_or_default()
}
