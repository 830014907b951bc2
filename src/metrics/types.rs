//! Metric types

/// Counters for issued requests.
#[derive(Debug, Clone, Default)]
pub struct RequestMetrics {
    pub started: usize,
    pub completed: usize,
    pub failed: usize,
    pub in_flight: usize,
}

/// Pass/fail tally for one named check.
#[derive(Debug, Clone, Default)]
pub struct CheckTally {
    pub passes: usize,
    pub fails: usize,
}

impl CheckTally {
    /// Fraction of evaluations that passed, 0.0 when never evaluated.
    pub fn pass_rate(&self) -> f64 {
        let total = self.passes + self.fails;
        if total == 0 {
            0.0
        } else {
            self.passes as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SystemMetrics {
    pub cpu_usage: f32,
    pub memory_used_mb: u64,
    pub memory_total_mb: u64,
}

/// Snapshot of all counters for reporting.
///
/// Check tallies keep first-seen order so reports list checks the way the
/// scenario evaluates them.
#[derive(Debug, Clone, Default)]
pub struct TestMetrics {
    pub requests: RequestMetrics,
    pub checks: Vec<(String, CheckTally)>,
    pub vus: usize,
    pub system: SystemMetrics,
}
