//! `PageSpeed` Insights request dispatch.

use reqwest::blocking::Client;
use tracing::{debug, info};
use url::{ParseError, Url};

use crate::cli::args::Strategy;
use crate::constants;
use crate::error::DispatchError;

/// One analysis request: what to analyze, with which key, and how.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub url: String,
    pub key: String,
    pub strategy: Strategy,
}

/// Sends analysis requests to the API endpoint.
#[derive(Debug)]
pub struct Dispatcher {
    client: Client,
    endpoint: Url,
}

impl Dispatcher {
    /// Creates a dispatcher for the given `runPagespeed` endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn new(endpoint: &str) -> Result<Self, DispatchError> {
        let endpoint = Url::parse(endpoint).map_err(|source| DispatchError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let client = Client::builder()
            .user_agent(format!("{}/{}", constants::APP_NAME, constants::APP_VERSION))
            .build()
            .map_err(|source| DispatchError::Transport {
                message: constants::ERR_HTTP_CLIENT_BUILD_FAILED,
                source,
            })?;

        Ok(Self { client, endpoint })
    }

    /// Builds the full request URL for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidUrl`] if the target URL cannot be parsed.
    pub fn request_url(&self, request: &AnalysisRequest) -> Result<Url, DispatchError> {
        let target = normalize_target(&request.url)?;

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("url", target.as_str())
            .append_pair("key", &request.key)
            .append_pair("strategy", request.strategy.as_str());
        Ok(url)
    }

    /// Sends the request and returns the response body.
    ///
    /// Exactly one request is made; there is no retry.
    ///
    /// # Errors
    ///
    /// Returns an error on an invalid target URL, a transport failure, or a
    /// non-success status from the API.
    pub fn dispatch(&self, request: &AnalysisRequest) -> Result<String, DispatchError> {
        let url = self.request_url(request)?;
        info!(
            page = %request.url,
            strategy = %request.strategy,
            endpoint = %self.endpoint,
            "requesting analysis"
        );

        // Errors carry the request URL, which includes the key; strip it.
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| DispatchError::Transport {
                message: constants::ERR_NETWORK_REQUEST_FAILED,
                source: source.without_url(),
            })?;

        let status = response.status();
        debug!(%status, "analysis response received");

        let body = response.text().map_err(|source| DispatchError::Transport {
            message: constants::ERR_READ_CONTENT_FAILED,
            source: source.without_url(),
        })?;

        if !status.is_success() {
            return Err(DispatchError::Api {
                status,
                detail: api_error_message(&body),
            });
        }

        Ok(body)
    }
}

/// Parses the target, assuming `http://` when no scheme is given.
///
/// `localhost:8080` parses as a URL with scheme `localhost`; anything without a
/// host is treated as scheme-less too.
///
/// # Errors
///
/// Returns [`DispatchError::InvalidUrl`] if the result is not a valid URL.
pub fn normalize_target(input: &str) -> Result<Url, DispatchError> {
    let input = input.trim();
    let invalid = |source: ParseError| DispatchError::InvalidUrl {
        input: input.to_string(),
        source,
    };

    match Url::parse(input) {
        Ok(url) if url.has_host() => Ok(url),
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("{}{input}", constants::DEFAULT_SCHEME)).map_err(invalid)
        }
        Err(source) => Err(invalid(source)),
    }
}

/// Pulls `error.message` out of an API error body.
fn api_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/error/message")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}
