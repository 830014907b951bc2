//! End-to-end executor tests against the stand-in health server

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;

use multicloud_load_test::engine::pacing::Pacing;
use multicloud_load_test::engine::stages::{Stage, StageSchedule};
use multicloud_load_test::engine::thresholds::{evaluate, Threshold};
use multicloud_load_test::engine::executor;
use multicloud_load_test::iteration::IterationConfig;
use multicloud_load_test::metrics::collector::MetricsCollector;
use multicloud_load_test::server;

/// Serve a router on an ephemeral port and return its base URL.
async fn spawn_app(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{}/", addr)
}

fn config(target: String, check_cloud: bool) -> IterationConfig {
    IterationConfig {
        target,
        expect_cloud: None,
        check_cloud,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn fixed_pool_runs_and_collects() {
    let target = spawn_app(server::health_router("aws".to_string())).await;
    let collector = MetricsCollector::new();
    let client = reqwest::Client::new();

    executor::run_fixed(
        3,
        Duration::from_secs(2),
        Pacing::Fixed(Duration::from_millis(50)),
        client,
        config(target, false),
        collector.clone(),
    )
    .await
    .expect("fixed run");

    let snapshot = collector.get_snapshot();
    assert!(snapshot.requests.started > 0);
    assert_eq!(snapshot.requests.failed, 0);
    assert_eq!(snapshot.requests.in_flight, 0);
    assert_eq!(
        snapshot.requests.started,
        snapshot.requests.completed + snapshot.requests.failed
    );
    assert!(snapshot.checks.iter().all(|(_, tally)| tally.fails == 0));
}

#[tokio::test(flavor = "multi_thread")]
async fn fixed_pool_against_healthy_target_passes_smoke_thresholds() {
    let target = spawn_app(server::health_router("aws".to_string())).await;
    let collector = MetricsCollector::new();
    let client = reqwest::Client::new();

    executor::run_fixed(
        2,
        Duration::from_secs(1),
        Pacing::Fixed(Duration::from_millis(50)),
        client,
        config(target, false),
        collector.clone(),
    )
    .await
    .expect("fixed run");

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
    assert!(results.iter().all(|r| r.passed), "results: {:?}", results);
}

#[tokio::test(flavor = "multi_thread")]
async fn staged_schedule_ramps_and_finishes() {
    let target = spawn_app(server::health_router("aws".to_string())).await;
    let collector = MetricsCollector::new();
    let client = reqwest::Client::new();

    let schedule = StageSchedule::new(vec![
        Stage {
            duration: Duration::from_secs(1),
            target: 3,
        },
        Stage {
            duration: Duration::from_secs(1),
            target: 0,
        },
    ]);

    executor::run_staged(
        schedule,
        Pacing::Fixed(Duration::from_millis(50)),
        client,
        config(target, true),
        collector.clone(),
    )
    .await
    .expect("staged run");

    let snapshot = collector.get_snapshot();
    assert!(snapshot.requests.started > 0);
    assert_eq!(snapshot.requests.in_flight, 0);
    assert_eq!(snapshot.vus, 0, "target returns to zero after the schedule");
    assert!(snapshot
        .checks
        .iter()
        .any(|(name, _)| name.starts_with("cloud matches expected")));
}

#[tokio::test(flavor = "multi_thread")]
async fn staged_executor_rejects_empty_schedule() {
    let collector = MetricsCollector::new();
    let client = reqwest::Client::new();

    let result = executor::run_staged(
        StageSchedule::new(vec![]),
        Pacing::Fixed(Duration::from_millis(50)),
        client,
        config("http://127.0.0.1:1/".to_string(), false),
        collector,
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_target_breaches_failed_rate_threshold() {
    let collector = MetricsCollector::new();
    let client = reqwest::Client::new();

    executor::run_fixed(
        2,
        Duration::from_secs(1),
        Pacing::Fixed(Duration::from_millis(100)),
        client,
        config("http://127.0.0.1:1/".to_string(), false),
        collector.clone(),
    )
    .await
    .expect("run completes even when every request fails");

    let results = evaluate(&[Threshold::FailedRate { max: 0.01 }], &collector);
    assert!(!results[0].passed);
    assert!(collector.failed_rate() > 0.99);
}
