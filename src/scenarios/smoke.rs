//! Smoke scenario - small fixed load with a tight latency threshold

use std::time::Duration;

use anyhow::Result;

use crate::cli::{RunArgs, SmokeArgs};
use crate::config;
use crate::engine::{executor, thresholds};
use crate::iteration::IterationConfig;
use crate::metrics::collector::MetricsCollector;
use crate::metrics::reporter;
use crate::metrics::summary::RunSummary;

pub async fn run(run_args: RunArgs, args: SmokeArgs) -> Result<()> {
    tracing::info!("Starting smoke scenario");

    let mut profile = config::smoke_profile();
    profile.vus = args.vus;
    profile.duration = Duration::from_secs(args.duration);

    let cfg = IterationConfig {
        target: run_args.target.clone(),
        expect_cloud: run_args.expect_cloud_opt(),
        check_cloud: false,
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;

    // Setup metrics collector
    let collector = MetricsCollector::new();
    let collector_clone = collector.clone();

    // Start periodic metrics reporter
    let report_interval = run_args.report_interval;
    let reporter_task = tokio::spawn(async move {
        reporter::start_periodic_reporter(collector_clone, report_interval).await;
    });

    tracing::info!(
        "Running {} virtual users for {}s against {}",
        profile.vus,
        profile.duration.as_secs(),
        cfg.target
    );

    executor::run_fixed(
        profile.vus,
        profile.duration,
        profile.pacing,
        client,
        cfg,
        collector.clone(),
    )
    .await?;

    // Stop the live reporter before printing the final report
    reporter_task.abort();

    // Print final report
    reporter::print_final_report(&collector);

    // Evaluate thresholds over the whole run
    let results = thresholds::evaluate(&profile.thresholds, &collector);
    reporter::print_threshold_results(&results);

    if let Some(path) = run_args.summary_out.as_deref() {
        RunSummary::build("smoke", &collector, &results).write_to(path)?;
    }

    if results.iter().any(|result| !result.passed) {
        anyhow::bail!("one or more thresholds breached");
    }

    Ok(())
}
