//! Application-wide constants and configuration values.
//!
//! This module defines the static values used throughout pagespeed,
//! including file names, API endpoints, environment variables, and user-facing
//! messages.

// === Application Metadata ===

/// Application name (from Cargo.toml).
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
/// Current application version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// === Path Configuration ===

/// Name of the API key file inside the home directory.
pub const KEY_FILE_NAME: &str = ".pagespeed_api_key";
/// Name of the config subdirectory under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "pagespeed";
/// Name of the optional config file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// === Environment ===

/// Log filter directive, e.g. `debug` or `pagespeed=trace`.
pub const ENV_LOG: &str = "PAGESPEED_LOG";
/// Overrides the API endpoint from the config file.
pub const ENV_ENDPOINT: &str = "PAGESPEED_ENDPOINT";
/// Default log level when `PAGESPEED_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// === API Endpoints ===

/// `PageSpeed` Insights `runPagespeed` endpoint.
pub const DEFAULT_API_ENDPOINT: &str =
    "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";
/// Human-facing web report.
pub const WEB_REPORT_URL: &str = "https://pagespeed.web.dev/analysis";
/// Scheme assumed for targets given without one (`google.com`).
pub const DEFAULT_SCHEME: &str = "http://";

// === Exit Codes ===

/// Missing credential, config, transport or API failure.
pub const EXIT_FAILURE: u8 = 1;
/// Bad command-line usage.
pub const EXIT_USAGE: u8 = 2;

// === Messages ===

/// Usage examples shown under the help text.
pub const USAGE_EXAMPLES: &str = "\
Examples:
  pagespeed -u google.com
  pagespeed -u google.com -s mobile
  pagespeed add-key YOUR_KEY";

pub const MSG_NO_KEY_HEADER: &str = "Looks like you don't have an API key";
pub const MSG_NO_KEY_STEPS: [&str; 4] = [
    "  - visit the Google APIs Console. here: `https://console.cloud.google.com/apis'",
    "  - enable the PageSpeed Insights API",
    "  - go to Credentials and create an API key",
    "  - paste the key into a file at ~/.pagespeed_api_key or add it with the pagespeed command: `pagespeed add-key YOUR_KEY'",
];
pub const MSG_KEY_SAVED: &str = "API key saved to ";
pub const MSG_OPENING_BROWSER: &str = "Opening web report...";
pub const MSG_NO_SUGGESTIONS: &str = "No suggestions, nice work!";

// === Error Messages ===

pub const ERR_HTTP_CLIENT_BUILD_FAILED: &str = "Failed to build HTTP client";
pub const ERR_NETWORK_REQUEST_FAILED: &str = "Network request failed";
pub const ERR_READ_CONTENT_FAILED: &str = "Failed to read response";
pub const ERR_SERVER_ERROR: &str = "API returned error: ";
pub const ERR_OPEN_BROWSER_FAILED: &str = "Failed to open browser";
