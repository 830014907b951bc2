//! Staged virtual-user schedule with linear ramping between targets

use std::time::Duration;

/// One time-bounded ramp target: over `duration`, the active virtual-user
/// target moves linearly from the previous stage's target to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub duration: Duration,
    pub target: usize,
}

/// Ordered stage schedule. The first stage ramps from zero virtual users.
#[derive(Debug, Clone)]
pub struct StageSchedule {
    stages: Vec<Stage>,
}

impl StageSchedule {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Total wall-clock duration of the schedule.
    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }

    /// Highest virtual-user target named by any stage.
    pub fn max_target(&self) -> usize {
        self.stages.iter().map(|s| s.target).max().unwrap_or(0)
    }

    /// Virtual-user target at `elapsed`, linearly interpolated within the
    /// active stage. `None` once the schedule has run out.
    pub fn target_at(&self, elapsed: Duration) -> Option<usize> {
        let mut stage_start = Duration::ZERO;
        let mut from = 0usize;

        for stage in &self.stages {
            let stage_end = stage_start + stage.duration;
            if elapsed < stage_end {
                let progress = if stage.duration.is_zero() {
                    1.0
                } else {
                    (elapsed - stage_start).as_secs_f64() / stage.duration.as_secs_f64()
                };
                let from_f = from as f64;
                let to_f = stage.target as f64;
                return Some((from_f + (to_f - from_f) * progress).round() as usize);
            }
            from = stage.target;
            stage_start = stage_end;
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_hold_down() -> StageSchedule {
        StageSchedule::new(vec![
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
        ])
    }

    #[test]
    fn ramps_up_linearly() {
        let schedule = ramp_hold_down();
        assert_eq!(schedule.target_at(Duration::ZERO), Some(0));
        assert_eq!(schedule.target_at(Duration::from_secs(60)), Some(25));
        assert_eq!(schedule.target_at(Duration::from_secs(119)), Some(50));
    }

    #[test]
    fn holds_between_equal_targets() {
        let schedule = ramp_hold_down();
        assert_eq!(schedule.target_at(Duration::from_secs(120)), Some(50));
        assert_eq!(schedule.target_at(Duration::from_secs(210)), Some(50));
        assert_eq!(schedule.target_at(Duration::from_secs(299)), Some(50));
    }

    #[test]
    fn ramps_down_linearly() {
        let schedule = ramp_hold_down();
        assert_eq!(schedule.target_at(Duration::from_secs(330)), Some(25));
        assert_eq!(schedule.target_at(Duration::from_secs(354)), Some(5));
    }

    #[test]
    fn runs_out_after_total_duration() {
        let schedule = ramp_hold_down();
        assert_eq!(schedule.total_duration(), Duration::from_secs(360));
        assert_eq!(schedule.target_at(Duration::from_secs(360)), None);
        assert_eq!(schedule.target_at(Duration::from_secs(600)), None);
    }

    #[test]
    fn empty_schedule_has_no_target() {
        let schedule = StageSchedule::new(vec![]);
        assert!(schedule.is_empty());
        assert_eq!(schedule.target_at(Duration::ZERO), None);
        assert_eq!(schedule.max_target(), 0);
    }

    #[test]
    fn max_target_spans_stages() {
        assert_eq!(ramp_hold_down().max_target(), 50);
    }
}
