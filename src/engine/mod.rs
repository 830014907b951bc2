// Engine module
// Virtual-user scheduling, pacing and aggregate thresholds

pub mod executor;
pub mod pacing;
pub mod stages;
pub mod thresholds;
