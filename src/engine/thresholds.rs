//! Declarative aggregate thresholds, evaluated over a whole run
//!
//! Individual check failures never stop a run; the run's overall verdict
//! comes from these aggregate conditions after the schedule completes.

use crate::metrics::collector::MetricsCollector;

/// Aggregate pass/fail condition over the whole run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// Failed-request rate must stay strictly below `max` (0.0-1.0)
    FailedRate { max: f64 },
    /// Latency percentile must stay strictly below `max_ms`
    DurationPercentile { quantile: f64, max_ms: u64 },
}

impl Threshold {
    pub fn describe(&self) -> String {
        match *self {
            Threshold::FailedRate { max } => format!("http_req_failed rate<{}", max),
            Threshold::DurationPercentile { quantile, max_ms } => {
                format!("http_req_duration p({:.0})<{}", quantile * 100.0, max_ms)
            }
        }
    }
}

/// One evaluated threshold with its observed value.
#[derive(Debug, Clone)]
pub struct ThresholdResult {
    pub threshold: Threshold,
    pub observed: f64,
    pub passed: bool,
}

/// Evaluate all thresholds against the collector's aggregates.
pub fn evaluate(thresholds: &[Threshold], collector: &MetricsCollector) -> Vec<ThresholdResult> {
    thresholds
        .iter()
        .map(|threshold| {
            let (observed, passed) = match *threshold {
                Threshold::FailedRate { max } => {
                    let rate = collector.failed_rate();
                    (rate, rate < max)
                }
                Threshold::DurationPercentile { quantile, max_ms } => {
                    let value = collector.latency_at_quantile(quantile);
                    (value as f64, value < max_ms)
                }
            };
            ThresholdResult {
                threshold: *threshold,
                observed,
                passed,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iteration::IterationOutcome;
    use std::time::Duration;

    fn record(collector: &MetricsCollector, latency_ms: u64, failed: bool) {
        collector.request_started();
        collector.record_iteration(&IterationOutcome {
            status: if failed { None } else { Some(200) },
            latency: Duration::from_millis(latency_ms),
            request_failed: failed,
            checks: vec![],
        });
    }

    #[test]
    fn failed_rate_threshold_is_strict() {
        let collector = MetricsCollector::new();
        for i in 0..100 {
            record(&collector, 10, i == 0);
        }

        // Observed rate is exactly 0.01: `rate<0.01` fails, `rate<0.02` passes
        let results = evaluate(
            &[
                Threshold::FailedRate { max: 0.01 },
                Threshold::FailedRate { max: 0.02 },
            ],
            &collector,
        );
        assert!(!results[0].passed);
        assert!(results[1].passed);
    }

    #[test]
    fn percentile_threshold_compares_histogram() {
        let collector = MetricsCollector::new();
        for _ in 0..98 {
            record(&collector, 10, false);
        }
        record(&collector, 900, false);
        record(&collector, 900, false);

        let results = evaluate(
            &[
                Threshold::DurationPercentile {
                    quantile: 0.95,
                    max_ms: 500,
                },
                Threshold::DurationPercentile {
                    quantile: 0.99,
                    max_ms: 800,
                },
            ],
            &collector,
        );
        assert!(results[0].passed, "p95 should sit in the 10ms bulk");
        assert!(!results[1].passed, "p99 should catch the 900ms outlier");
    }

    #[test]
    fn empty_run_passes_vacuously() {
        let collector = MetricsCollector::new();
        let results = evaluate(
            &[
                Threshold::FailedRate { max: 0.01 },
                Threshold::DurationPercentile {
                    quantile: 0.95,
                    max_ms: 500,
                },
            ],
            &collector,
        );
        assert!(results.iter().all(|r| r.passed));
    }

    #[test]
    fn describes_like_the_run_options() {
        assert_eq!(
            Threshold::FailedRate { max: 0.01 }.describe(),
            "http_req_failed rate<0.01"
        );
        assert_eq!(
            Threshold::DurationPercentile {
                quantile: 0.99,
                max_ms: 800
            }
            .describe(),
            "http_req_duration p(99)<800"
        );
    }
}
