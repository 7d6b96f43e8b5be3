//! Rendering of analysis responses.
//!
//! The response is treated as opaque: when it looks like a Lighthouse (v5) or
//! legacy (v1) `PageSpeed` result, the score and suggestions are pulled out and
//! printed; anything else is passed through unchanged.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Deserialize;

use crate::cli::args::Strategy;
use crate::constants;

/// Lighthouse scores at or above this count as passing.
const PASSING_SCORE: f64 = 0.9;

// ── Response shapes ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LighthouseResponse {
    lighthouse_result: LighthouseResult,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LighthouseResult {
    requested_url: Option<String>,
    final_url: Option<String>,
    config_settings: Option<ConfigSettings>,
    #[serde(default)]
    categories: BTreeMap<String, Category>,
    #[serde(default)]
    audits: BTreeMap<String, Audit>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigSettings {
    form_factor: Option<String>,
}

#[derive(Deserialize)]
struct Category {
    score: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Audit {
    #[serde(default)]
    title: String,
    score: Option<f64>,
    display_value: Option<String>,
    details: Option<AuditDetails>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuditDetails {
    #[serde(rename = "type")]
    kind: Option<String>,
    overall_savings_ms: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyResponse {
    id: Option<String>,
    title: Option<String>,
    score: u32,
    formatted_results: Option<LegacyResults>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyResults {
    #[serde(default)]
    rule_results: BTreeMap<String, LegacyRule>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyRule {
    #[serde(default)]
    localized_rule_name: String,
    #[serde(default)]
    rule_impact: f64,
}

// ── Rendering ───────────────────────────────────────────────────────────────

/// Formats an API response body for the terminal.
///
/// Falls back to the raw body if it is not a recognizable result.
#[must_use]
pub fn render(body: &str) -> String {
    if let Ok(response) = serde_json::from_str::<LighthouseResponse>(body) {
        return render_lighthouse(&response.lighthouse_result);
    }
    if let Ok(response) = serde_json::from_str::<LegacyResponse>(body) {
        return render_legacy(&response);
    }
    body.to_string()
}

fn render_lighthouse(result: &LighthouseResult) -> String {
    let mut out = String::with_capacity(1024);

    if let Some(url) = result.final_url.as_ref().or(result.requested_url.as_ref()) {
        let _ = writeln!(out, "URL:      {url}");
    }
    if let Some(form_factor) = result
        .config_settings
        .as_ref()
        .and_then(|c| c.form_factor.as_deref())
    {
        let _ = writeln!(out, "Strategy: {form_factor}");
    }
    match result.categories.get("performance").and_then(|c| c.score) {
        Some(score) => {
            let _ = writeln!(out, "Score:    {}", percent(score));
        }
        None => {
            let _ = writeln!(out, "Score:    n/a");
        }
    }

    let mut opportunities: Vec<(&Audit, f64)> = result
        .audits
        .values()
        .filter_map(|audit| {
            let details = audit.details.as_ref()?;
            if details.kind.as_deref() != Some("opportunity") {
                return None;
            }
            let savings = details.overall_savings_ms.unwrap_or(0.0);
            let failing = audit.score.map_or(true, |s| s < PASSING_SCORE);
            (failing && savings > 0.0).then_some((audit, savings))
        })
        .collect();
    opportunities.sort_by(|a, b| b.1.total_cmp(&a.1));

    let _ = writeln!(out);
    if opportunities.is_empty() {
        let _ = writeln!(out, "{}", constants::MSG_NO_SUGGESTIONS);
        return out;
    }

    let _ = writeln!(out, "Suggestions:");
    for (audit, savings) in opportunities {
        match &audit.display_value {
            Some(value) if !value.is_empty() => {
                let _ = writeln!(out, "  - {} ({value})", audit.title);
            }
            _ => {
                let _ = writeln!(out, "  - {} (~{savings:.0} ms)", audit.title);
            }
        }
    }
    out
}

fn render_legacy(response: &LegacyResponse) -> String {
    let mut out = String::with_capacity(1024);

    if let Some(title) = &response.title {
        let _ = writeln!(out, "Title:    {title}");
    }
    if let Some(id) = &response.id {
        let _ = writeln!(out, "URL:      {id}");
    }
    let _ = writeln!(out, "Score:    {}", response.score);

    let mut rules: Vec<&LegacyRule> = response
        .formatted_results
        .iter()
        .flat_map(|r| r.rule_results.values())
        .filter(|rule| rule.rule_impact > 0.0)
        .collect();
    rules.sort_by(|a, b| b.rule_impact.total_cmp(&a.rule_impact));

    let _ = writeln!(out);
    if rules.is_empty() {
        let _ = writeln!(out, "{}", constants::MSG_NO_SUGGESTIONS);
        return out;
    }

    let _ = writeln!(out, "Suggestions:");
    for rule in rules {
        let _ = writeln!(
            out,
            "  - {} (impact {:.1})",
            rule.localized_rule_name, rule.rule_impact
        );
    }
    out
}

/// Lighthouse score (0.0-1.0) as a 0-100 integer.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(score: f64) -> u8 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}

// ── Web report ──────────────────────────────────────────────────────────────

/// Link to the `PageSpeed` web report for `url`.
#[must_use]
pub fn web_report_url(url: &str, strategy: Strategy) -> String {
    format!(
        "{}?url={}&form_factor={strategy}",
        constants::WEB_REPORT_URL,
        urlencoding::encode(url),
    )
}
