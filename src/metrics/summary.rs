//! Serializable run summary, optionally persisted after a run
//!
//! Mirrors what the final console report shows so runs can be compared
//! offline or fed to a results viewer.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use uuid::Uuid;

use super::collector::MetricsCollector;
use crate::engine::thresholds::ThresholdResult;

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub scenario: String,
    pub run_id: String,
    pub elapsed_seconds: u64,
    pub requests: RequestSummary,
    pub latency_ms: LatencySummary,
    pub checks: Vec<CheckSummary>,
    pub thresholds: Vec<ThresholdSummary>,
}

#[derive(Debug, Serialize)]
pub struct RequestSummary {
    pub started: usize,
    pub completed: usize,
    pub failed: usize,
    pub failed_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct LatencySummary {
    pub min: u64,
    pub p50: u64,
    pub p95: u64,
    pub p99: u64,
    pub max: u64,
    pub mean: f64,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct CheckSummary {
    pub name: String,
    pub passes: usize,
    pub fails: usize,
    pub pass_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct ThresholdSummary {
    pub name: String,
    pub observed: f64,
    pub passed: bool,
}

impl RunSummary {
    pub fn build(
        scenario: &str,
        collector: &MetricsCollector,
        thresholds: &[ThresholdResult],
    ) -> Self {
        let metrics = collector.get_snapshot();
        let latency = collector.get_latency_percentiles();

        Self {
            scenario: scenario.to_string(),
            run_id: Uuid::new_v4().to_string(),
            elapsed_seconds: collector.elapsed_seconds(),
            requests: RequestSummary {
                started: metrics.requests.started,
                completed: metrics.requests.completed,
                failed: metrics.requests.failed,
                failed_rate: collector.failed_rate(),
            },
            latency_ms: LatencySummary {
                min: latency.min,
                p50: latency.p50,
                p95: latency.p95,
                p99: latency.p99,
                max: latency.max,
                mean: latency.mean,
                count: latency.count,
            },
            checks: metrics
                .checks
                .iter()
                .map(|(name, tally)| CheckSummary {
                    name: name.clone(),
                    passes: tally.passes,
                    fails: tally.fails,
                    pass_rate: tally.pass_rate(),
                })
                .collect(),
            thresholds: thresholds
                .iter()
                .map(|result| ThresholdSummary {
                    name: result.threshold.describe(),
                    observed: result.observed,
                    passed: result.passed,
                })
                .collect(),
        }
    }

    /// Write the summary as pretty-printed JSON.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        tracing::info!("Run summary written to {}", path.display());
        Ok(())
    }
}
