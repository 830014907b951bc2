// CLI module
// Argument types for the load-test binary

pub mod args;

pub use args::{Cli, Mode, RampArgs, RunArgs, Scenario, ServeArgs, SmokeArgs};
