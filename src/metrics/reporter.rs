//! Console reporter for metrics with real-time updates

use std::io::{self, Write};

use tokio::time::{interval, Duration};

use super::collector::MetricsCollector;
use crate::engine::thresholds::ThresholdResult;

/// Start periodic metrics reporting (every N seconds)
pub async fn start_periodic_reporter(collector: MetricsCollector, interval_secs: u64) {
    let mut ticker = interval(Duration::from_secs(interval_secs));

    loop {
        ticker.tick().await;

        // Update system metrics before printing
        collector.update_system_metrics();

        print_live_metrics(&collector);
    }
}

/// Print live metrics (clears screen and updates in place)
pub fn print_live_metrics(collector: &MetricsCollector) {
    // Clear screen and move cursor to top
    print!("\x1B[2J\x1B[1;1H");

    let metrics = collector.get_snapshot();
    let elapsed = collector.elapsed_seconds();
    let latency = collector.get_latency_percentiles();

    println!("╔════════════════════════════════════════════════════════════════╗");
    println!("║            Multicloud Load Test - Live Metrics                 ║");
    println!("╚════════════════════════════════════════════════════════════════╝");

    // Time elapsed
    println!(
        "\n⏱️  Elapsed Time: {:02}:{:02}:{:02}    Virtual Users: {}",
        elapsed / 3600,
        (elapsed % 3600) / 60,
        elapsed % 60,
        metrics.vus
    );

    // Requests
    println!("\n┌─ REQUESTS ──────────────────────────────────────────────────┐");
    println!(
        "│  Started:      {:>8}    In-Flight:  {:>8}              │",
        metrics.requests.started, metrics.requests.in_flight
    );
    println!(
        "│  Completed:    {:>8}    Failed:     {:>8}              │",
        metrics.requests.completed, metrics.requests.failed
    );

    if metrics.requests.started > 0 {
        let finished = metrics.requests.completed + metrics.requests.failed;
        let success_rate = if finished > 0 {
            (metrics.requests.completed as f64 / finished as f64) * 100.0
        } else {
            0.0
        };
        let throughput = if elapsed > 0 {
            finished as f64 / elapsed as f64
        } else {
            0.0
        };
        println!(
            "│  Success Rate: {:>7.2}%    Throughput: {:>7.2}/sec        │",
            success_rate, throughput
        );
    }
    println!("└─────────────────────────────────────────────────────────────┘");

    // Request latencies
    if latency.count > 0 {
        println!("\n┌─ REQUEST LATENCY (ms) ──────────────────────────────────────┐");
        println!(
            "│  Min: {:>6}  P50: {:>6}  P95: {:>6}  P99: {:>6}  Max: {:>6}│",
            latency.min, latency.p50, latency.p95, latency.p99, latency.max
        );
        println!(
            "│  Mean: {:>8.2} ms    Count: {:>10}                    │",
            latency.mean, latency.count
        );
        println!("└─────────────────────────────────────────────────────────────┘");
    }

    // Checks
    if !metrics.checks.is_empty() {
        println!("\n┌─ CHECKS ────────────────────────────────────────────────────┐");
        for (name, tally) in &metrics.checks {
            println!(
                "│  {:<32} {:>7} ✓ {:>7} ✗ {:>6.2}% │",
                name,
                tally.passes,
                tally.fails,
                tally.pass_rate() * 100.0
            );
        }
        println!("└─────────────────────────────────────────────────────────────┘");
    }

    // System metrics
    println!("\n┌─ SYSTEM ────────────────────────────────────────────────────┐");
    println!(
        "│  CPU Usage:    {:>6.1}%    Memory: {:>6} / {:>6} MB       │",
        metrics.system.cpu_usage, metrics.system.memory_used_mb, metrics.system.memory_total_mb
    );
    println!("└─────────────────────────────────────────────────────────────┘");

    println!("\n  [Press Ctrl+C to stop test]");

    // Flush stdout to ensure immediate display
    let _ = io::stdout().flush();
}

/// Print final summary report
pub fn print_final_report(collector: &MetricsCollector) {
    let metrics = collector.get_snapshot();
    let elapsed = collector.elapsed_seconds();
    let latency = collector.get_latency_percentiles();

    println!("\n╔════════════════════════════════════════════════════════════════╗");
    println!("║                    FINAL TEST REPORT                           ║");
    println!("╚════════════════════════════════════════════════════════════════╝");

    println!("\n📊 REQUESTS");
    println!("   Total Started:        {:>10}", metrics.requests.started);
    println!("   Total Completed:      {:>10}", metrics.requests.completed);
    println!("   Total Failed:         {:>10}", metrics.requests.failed);

    let finished = metrics.requests.completed + metrics.requests.failed;
    if elapsed > 0 {
        let throughput = finished as f64 / elapsed as f64;
        println!("   Throughput:           {:>10.2} requests/sec", throughput);
    }

    if finished > 0 {
        let success_rate = (metrics.requests.completed as f64 / finished as f64) * 100.0;
        println!("   Success Rate:         {:>10.2}%", success_rate);
        println!(
            "   Failed Rate:          {:>10.4}",
            collector.failed_rate()
        );
    }

    if latency.count > 0 {
        println!("\n📈 REQUEST LATENCY");
        println!("   Min:                  {:>10} ms", latency.min);
        println!("   P50 (Median):         {:>10} ms", latency.p50);
        println!("   P95:                  {:>10} ms", latency.p95);
        println!("   P99:                  {:>10} ms", latency.p99);
        println!("   Max:                  {:>10} ms", latency.max);
        println!("   Mean:                 {:>10.2} ms", latency.mean);
    }

    if !metrics.checks.is_empty() {
        println!("\n✅ CHECKS");
        for (name, tally) in &metrics.checks {
            println!(
                "   {:<36} {:>8} ✓ {:>8} ✗ {:>7.2}%",
                name,
                tally.passes,
                tally.fails,
                tally.pass_rate() * 100.0
            );
        }
    }

    println!("\n⏱️  Test Duration: {} seconds", elapsed);
    println!("════════════════════════════════════════════════════════════════\n");
}

/// Print per-threshold verdicts after the final report
pub fn print_threshold_results(results: &[ThresholdResult]) {
    if results.is_empty() {
        return;
    }

    println!("📋 THRESHOLDS");
    for result in results {
        println!(
            "   {} {:<40} (observed {:.4})",
            if result.passed { "✓" } else { "✗" },
            result.threshold.describe(),
            result.observed
        );
    }
    println!();
}
