//! Metrics collector - thread-safe collection with latency tracking

use std::sync::Arc;
use std::time::Instant;

use hdrhistogram::Histogram;
use parking_lot::RwLock;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

use super::types::{CheckTally, TestMetrics};
use crate::iteration::IterationOutcome;

#[derive(Clone)]
pub struct MetricsCollector {
    metrics: Arc<RwLock<TestMetrics>>,
    latencies: Arc<RwLock<Histogram<u64>>>,
    system: Arc<RwLock<System>>,
    start_time: Instant,
}

impl MetricsCollector {
    pub fn new() -> Self {
        // Create histogram with 3 significant digits of precision
        let latency_hist = Histogram::new(3).expect("Failed to create latency histogram");

        // Initialize system monitor
        let system = System::new_with_specifics(
            RefreshKind::new()
                .with_cpu(CpuRefreshKind::everything())
                .with_memory(MemoryRefreshKind::everything()),
        );

        Self {
            metrics: Arc::new(RwLock::new(TestMetrics::default())),
            latencies: Arc::new(RwLock::new(latency_hist)),
            system: Arc::new(RwLock::new(system)),
            start_time: Instant::now(),
        }
    }

    pub fn request_started(&self) {
        let mut metrics = self.metrics.write();
        metrics.requests.started += 1;
        metrics.requests.in_flight += 1;
    }

    /// Record a finished iteration: request counters, check tallies, latency.
    pub fn record_iteration(&self, outcome: &IterationOutcome) {
        let mut metrics = self.metrics.write();
        metrics.requests.in_flight = metrics.requests.in_flight.saturating_sub(1);
        if outcome.request_failed {
            metrics.requests.failed += 1;
        } else {
            metrics.requests.completed += 1;
        }

        for check in &outcome.checks {
            match metrics
                .checks
                .iter_mut()
                .find(|(name, _)| name == &check.name)
            {
                Some((_, tally)) => {
                    if check.passed {
                        tally.passes += 1;
                    } else {
                        tally.fails += 1;
                    }
                }
                None => {
                    let mut tally = CheckTally::default();
                    if check.passed {
                        tally.passes = 1;
                    } else {
                        tally.fails = 1;
                    }
                    metrics.checks.push((check.name.clone(), tally));
                }
            }
        }
        drop(metrics);

        // Latency is recorded for failed requests too
        if let Some(mut hist) = self.latencies.try_write() {
            let _ = hist.record(outcome.latency.as_millis() as u64);
        }
    }

    /// Current virtual-user target, set by the executor.
    pub fn set_vus(&self, vus: usize) {
        self.metrics.write().vus = vus;
    }

    /// Update system metrics (CPU, memory)
    pub fn update_system_metrics(&self) {
        let mut system = self.system.write();
        system.refresh_cpu_all();
        system.refresh_memory();

        let mut metrics = self.metrics.write();

        metrics.system.cpu_usage = system.global_cpu_usage();
        metrics.system.memory_used_mb = system.used_memory() / 1024 / 1024;
        metrics.system.memory_total_mb = system.total_memory() / 1024 / 1024;
    }

    pub fn get_snapshot(&self) -> TestMetrics {
        self.metrics.read().clone()
    }

    pub fn get_latency_percentiles(&self) -> LatencyStats {
        let hist = self.latencies.read();
        LatencyStats {
            min: hist.min(),
            p50: hist.value_at_quantile(0.50),
            p95: hist.value_at_quantile(0.95),
            p99: hist.value_at_quantile(0.99),
            max: hist.max(),
            mean: hist.mean(),
            count: hist.len(),
        }
    }

    /// Latency value at a single quantile, in milliseconds.
    pub fn latency_at_quantile(&self, quantile: f64) -> u64 {
        self.latencies.read().value_at_quantile(quantile)
    }

    /// Fraction of finished requests that failed, 0.0 before any finish.
    pub fn failed_rate(&self) -> f64 {
        let metrics = self.metrics.read();
        let finished = metrics.requests.completed + metrics.requests.failed;
        if finished == 0 {
            0.0
        } else {
            metrics.requests.failed as f64 / finished as f64
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct LatencyStats {
    pub min: u64,
    pub p50: u64,
    pub p95: u64,
    pub p99: u64,
    pub max: u64,
    pub mean: f64,
    pub count: u64,
}
