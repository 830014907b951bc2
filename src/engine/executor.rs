//! Virtual-user executor - drives the iteration callback per load profile
//!
//! Each virtual user is an independent tokio task running the iteration
//! body in a loop: one GET, one set of checks, one pacing sleep. The only
//! state shared between users is the metrics collector and the atomic
//! user target. Shutdown is schedule-driven: once the deadline or stage
//! schedule elapses no new iterations start, in-flight iterations finish
//! and are joined.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::time::{interval, Instant};

use crate::engine::pacing::Pacing;
use crate::engine::stages::StageSchedule;
use crate::iteration::{run_iteration, IterationConfig};
use crate::metrics::collector::MetricsCollector;

/// Supervision tick for the staged executor.
const SUPERVISE_INTERVAL: Duration = Duration::from_millis(100);

/// Run a fixed pool of virtual users for a fixed duration.
pub async fn run_fixed(
    vus: usize,
    duration: Duration,
    pacing: Pacing,
    client: reqwest::Client,
    cfg: IterationConfig,
    collector: MetricsCollector,
) -> Result<()> {
    let deadline = Instant::now() + duration;
    collector.set_vus(vus);

    let mut handles = Vec::with_capacity(vus);
    for vu_index in 0..vus {
        let client = client.clone();
        let cfg = cfg.clone();
        let collector = collector.clone();

        handles.push(tokio::spawn(async move {
            tracing::debug!("virtual user {} started", vu_index);
            while Instant::now() < deadline {
                collector.request_started();
                let outcome = run_iteration(&client, &cfg).await;
                collector.record_iteration(&outcome);

                tokio::time::sleep(pacing.next_delay()).await;
            }
            tracing::debug!("virtual user {} retired", vu_index);
        }));
    }

    join_virtual_users(handles).await;
    collector.set_vus(0);

    Ok(())
}

/// Run a staged schedule, recomputing the virtual-user target on a short
/// supervision tick.
///
/// Users above the current target park after finishing their in-flight
/// iteration and resume if a later stage raises the target again; the end
/// of the schedule stops everyone.
pub async fn run_staged(
    schedule: StageSchedule,
    pacing: Pacing,
    client: reqwest::Client,
    cfg: IterationConfig,
    collector: MetricsCollector,
) -> Result<()> {
    anyhow::ensure!(!schedule.is_empty(), "stage schedule cannot be empty");

    let total = schedule.total_duration();
    let start = Instant::now();
    let target = Arc::new(AtomicUsize::new(0));

    tracing::info!(
        "Running {} stages over {}s, peak {} virtual users",
        schedule.len(),
        total.as_secs(),
        schedule.max_target()
    );

    let mut handles = Vec::new();
    let mut spawned = 0usize;
    let mut ticker = interval(SUPERVISE_INTERVAL);

    loop {
        ticker.tick().await;

        let Some(current) = schedule.target_at(start.elapsed()) else {
            break;
        };
        target.store(current, Ordering::Relaxed);
        collector.set_vus(current);

        // Spawn up to the current target; parked users handle scale-down
        while spawned < current {
            let vu_index = spawned;
            spawned += 1;

            let client = client.clone();
            let cfg = cfg.clone();
            let collector = collector.clone();
            let target = Arc::clone(&target);

            handles.push(tokio::spawn(async move {
                tracing::debug!("virtual user {} started", vu_index);
                loop {
                    if start.elapsed() >= total {
                        break;
                    }
                    if vu_index >= target.load(Ordering::Relaxed) {
                        // Parked during ramp-down; poll for reactivation
                        tokio::time::sleep(SUPERVISE_INTERVAL).await;
                        continue;
                    }

                    collector.request_started();
                    let outcome = run_iteration(&client, &cfg).await;
                    collector.record_iteration(&outcome);

                    tokio::time::sleep(pacing.next_delay()).await;
                }
                tracing::debug!("virtual user {} retired", vu_index);
            }));
        }
    }

    target.store(0, Ordering::Relaxed);
    collector.set_vus(0);

    join_virtual_users(handles).await;

    Ok(())
}

/// Wait for all virtual-user tasks to finish their in-flight work.
async fn join_virtual_users(handles: Vec<tokio::task::JoinHandle<()>>) {
    let count = handles.len();
    tracing::info!(
        "Schedule complete, waiting for {} virtual users to finish...",
        count
    );

    for (idx, handle) in handles.into_iter().enumerate() {
        if let Err(e) = handle.await {
            tracing::error!("Virtual user task {} panicked: {}", idx, e);
        }

        // Log progress every 10 users
        if (idx + 1) % 10 == 0 {
            tracing::info!("Waited for {}/{} virtual users", idx + 1, count);
        }
    }

    tracing::info!("All virtual users finished");
}
