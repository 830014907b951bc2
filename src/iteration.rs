//! Per-iteration request and check logic
//!
//! One iteration is a single GET against the target followed by a fixed set
//! of named boolean checks. Transport failures and unparsable bodies are
//! expected outcomes under load: they fail checks and are tallied, they never
//! propagate as errors.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;

pub const STATUS_CHECK: &str = "status is 200";
pub const OK_CHECK: &str = "body ok flag is true";

/// Health body served by the target. Both fields are optional so that a
/// well-formed JSON object with missing fields still counts as "body present".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthBody {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub cloud: Option<String>,
}

/// Per-scenario iteration configuration, populated once at startup.
#[derive(Debug, Clone)]
pub struct IterationConfig {
    /// URL to GET
    pub target: String,
    /// Expected `cloud` value; `None` accepts any
    pub expect_cloud: Option<String>,
    /// Whether the cloud check is part of this scenario's check set
    pub check_cloud: bool,
}

impl IterationConfig {
    /// Label for the cloud check, carrying the configured expectation.
    pub fn cloud_check_label(&self) -> String {
        format!(
            "cloud matches expected ({})",
            self.expect_cloud.as_deref().unwrap_or("any")
        )
    }
}

/// Outcome of one named check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
}

/// Outcome of one full iteration.
#[derive(Debug, Clone)]
pub struct IterationOutcome {
    /// Observed HTTP status; `None` on transport failure
    pub status: Option<u16>,
    /// Wall-clock latency from send to body read
    pub latency: Duration,
    /// Transport failure or status >= 400
    pub request_failed: bool,
    pub checks: Vec<CheckResult>,
}

/// Run one iteration: GET the target, parse the body defensively, evaluate
/// the scenario's checks. Failures surface as failed checks and the
/// request-failed flag; the iteration always completes.
pub async fn run_iteration(client: &Client, cfg: &IterationConfig) -> IterationOutcome {
    let start = Instant::now();

    let (status, body) = match client.get(&cfg.target).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            // Parse failure is an expected outcome, not an error
            let body = response.json::<HealthBody>().await.ok();
            (Some(status), body)
        }
        Err(e) => {
            tracing::debug!("request to {} failed: {}", cfg.target, e);
            (None, None)
        }
    };
    let latency = start.elapsed();

    let checks = evaluate_checks(status, body.as_ref(), cfg);
    let request_failed = !matches!(status, Some(s) if s < 400);

    IterationOutcome {
        status,
        latency,
        request_failed,
        checks,
    }
}

/// Evaluate the named checks for one observed response.
///
/// Pure over `(status, body, config)` so check semantics are testable without
/// any I/O. The cloud check requires a parsed body; an unset expectation then
/// accepts any cloud tag, including a missing one.
pub fn evaluate_checks(
    status: Option<u16>,
    body: Option<&HealthBody>,
    cfg: &IterationConfig,
) -> Vec<CheckResult> {
    let mut checks = vec![
        CheckResult {
            name: STATUS_CHECK.to_string(),
            passed: status == Some(200),
        },
        CheckResult {
            name: OK_CHECK.to_string(),
            passed: body.map_or(false, |b| b.ok == Some(true)),
        },
    ];

    if cfg.check_cloud {
        let passed = body.map_or(false, |b| match cfg.expect_cloud.as_deref() {
            None => true,
            Some(expect) => b.cloud.as_deref() == Some(expect),
        });
        checks.push(CheckResult {
            name: cfg.cloud_check_label(),
            passed,
        });
    }

    checks
}
