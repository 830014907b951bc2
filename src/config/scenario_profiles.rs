use std::time::Duration;

use crate::engine::pacing::Pacing;
use crate::engine::stages::{Stage, StageSchedule};
use crate::engine::thresholds::Threshold;

/// Load profile for the smoke scenario.
#[derive(Debug, Clone)]
pub struct SmokeProfile {
    pub vus: usize,
    pub duration: Duration,
    pub pacing: Pacing,
    pub thresholds: Vec<Threshold>,
}

/// Load profile for the ramp/soak scenario.
#[derive(Debug, Clone)]
pub struct RampProfile {
    pub schedule: StageSchedule,
    pub pacing: Pacing,
    pub thresholds: Vec<Threshold>,
}

/// Smoke profile: quick confidence check
///
/// - 5 virtual users for 20 seconds
/// - fixed 100ms pacing between iterations
/// - <1% failed requests, p95 under 500ms
pub fn smoke_profile() -> SmokeProfile {
    SmokeProfile {
        vus: 5,
        duration: Duration::from_secs(20),
        pacing: Pacing::Fixed(Duration::from_millis(100)),
        thresholds: vec![
            Threshold::FailedRate { max: 0.01 },
            Threshold::DurationPercentile {
                quantile: 0.95,
                max_ms: 500,
            },
        ],
    }
}

/// Ramp/soak profile: staged climb to 50 users, hold, ramp down
///
/// - 0 -> 50 users over 2 minutes, hold 50 for 3 minutes, down over 1 minute
/// - uniformly random 1.0-1.4s pacing between iterations
/// - <1% failed requests, p95 under 300ms, p99 under 800ms
pub fn ramp_profile() -> RampProfile {
    RampProfile {
        schedule: StageSchedule::new(vec![
            Stage {
                duration: Duration::from_secs(120),
                target: 50,
            },
            Stage {
                duration: Duration::from_secs(180),
                target: 50,
            },
            Stage {
                duration: Duration::from_secs(60),
                target: 0,
            },
        ]),
        pacing: Pacing::Uniform {
            min: Duration::from_millis(1000),
            max: Duration::from_millis(1400),
        },
        thresholds: vec![
            Threshold::FailedRate { max: 0.01 },
            Threshold::DurationPercentile {
                quantile: 0.95,
                max_ms: 300,
            },
            Threshold::DurationPercentile {
                quantile: 0.99,
                max_ms: 800,
            },
        ],
    }
}
