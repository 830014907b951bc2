// Config module
// Declarative per-scenario load profiles

pub mod scenario_profiles;

pub use scenario_profiles::{ramp_profile, smoke_profile, RampProfile, SmokeProfile};
