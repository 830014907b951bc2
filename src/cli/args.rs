use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::engine::stages::Stage;

/// Multicloud Load Testing Tool
#[derive(Parser, Debug)]
#[command(name = "load-test")]
#[command(about = "Load testing tool for the multicloud health endpoint")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Mode {
    /// Start the stand-in health server (runs until Ctrl+C)
    Serve(ServeArgs),

    /// Run a load scenario against a target endpoint
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Port to bind the health server on
    #[arg(long, default_value = "8080", env = "PORT")]
    pub port: u16,

    /// Cloud tag reported in the health body
    #[arg(long, default_value = "local", env = "CLOUD")]
    pub cloud: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Base URL to issue GET requests against
    #[arg(long, default_value = "http://localhost:8080/", env = "TARGET")]
    pub target: String,

    /// Expected `cloud` value in the health body (empty accepts any)
    #[arg(long, default_value = "", env = "EXPECT_CLOUD")]
    pub expect_cloud: String,

    /// Metrics reporting interval in seconds
    #[arg(long, default_value = "5")]
    pub report_interval: u64,

    /// Write a JSON run summary to this path after the run
    #[arg(long)]
    pub summary_out: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub scenario: Scenario,
}

impl RunArgs {
    /// Expected cloud tag as an option; an empty value means "accept any".
    pub fn expect_cloud_opt(&self) -> Option<String> {
        let expect = self.expect_cloud.trim();
        if expect.is_empty() {
            None
        } else {
            Some(expect.to_string())
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Scenario {
    /// Short fixed-load check: few users, tight latency threshold
    Smoke(SmokeArgs),

    /// Staged ramp and soak: climb to 50 users, hold, ramp down
    Ramp(RampArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SmokeArgs {
    /// Number of virtual users
    #[arg(long, default_value = "5")]
    pub vus: usize,

    /// Test duration in seconds
    #[arg(long, default_value = "20")]
    pub duration: u64,
}

#[derive(Args, Debug, Clone)]
pub struct RampArgs {
    /// Override the stage schedule, repeatable: --stage 2m:50 --stage 3m:50 --stage 1m:0
    #[arg(long = "stage", value_parser = parse_stage)]
    pub stages: Vec<Stage>,
}

/// Parse a `<duration>:<target>` stage spec, e.g. `2m:50` or `45s:10`.
pub fn parse_stage(s: &str) -> Result<Stage, String> {
    let (duration, target) = s
        .split_once(':')
        .ok_or_else(|| format!("invalid stage '{}', expected <duration>:<target>", s))?;

    let duration = parse_duration(duration)?;
    let target = target
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("invalid stage target '{}'", target))?;

    Ok(Stage { duration, target })
}

/// Parse a duration like `30`, `30s`, `2m` or `1h`. A bare number is seconds.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("duration cannot be empty".to_string());
    }

    let (value, multiplier) = match s.chars().last() {
        Some('s') => (&s[..s.len() - 1], 1),
        Some('m') => (&s[..s.len() - 1], 60),
        Some('h') => (&s[..s.len() - 1], 3600),
        Some(c) if c.is_ascii_digit() => (s, 1),
        Some(c) => return Err(format!("unknown duration unit '{}', use 's', 'm' or 'h'", c)),
        None => return Err("duration cannot be empty".to_string()),
    };

    let value = value
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("invalid numeric value in duration '{}'", s))?;

    Ok(Duration::from_secs(value * multiplier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_seconds() {
        assert_eq!(parse_duration("20"), Ok(Duration::from_secs(20)));
    }

    #[test]
    fn parses_suffixed_durations() {
        assert_eq!(parse_duration("45s"), Ok(Duration::from_secs(45)));
        assert_eq!(parse_duration("2m"), Ok(Duration::from_secs(120)));
        assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
    }

    #[test]
    fn rejects_bad_durations() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("m").is_err());
        assert!(parse_duration("10x").is_err());
        assert!(parse_duration("-5s").is_err());
    }

    #[test]
    fn parses_stage_spec() {
        assert_eq!(
            parse_stage("2m:50"),
            Ok(Stage {
                duration: Duration::from_secs(120),
                target: 50,
            })
        );
        assert_eq!(
            parse_stage("45s:0"),
            Ok(Stage {
                duration: Duration::from_secs(45),
                target: 0,
            })
        );
    }

    #[test]
    fn rejects_bad_stage_specs() {
        assert!(parse_stage("2m").is_err());
        assert!(parse_stage("2m:lots").is_err());
        assert!(parse_stage(":5").is_err());
    }
}
