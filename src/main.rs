use anyhow::Result;
use clap::Parser;

use multicloud_load_test::cli::{Cli, Mode, Scenario};
use multicloud_load_test::{scenarios, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    match cli.mode {
        Mode::Serve(args) => {
            // Initialize tracing
            let subscriber = tracing_subscriber::fmt()
                .with_max_level(if args.verbose {
                    tracing::Level::DEBUG
                } else {
                    tracing::Level::INFO
                })
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;

            // Run the health server (blocks until Ctrl+C)
            server::run_server(args.port, args.cloud).await?;
        }

        Mode::Run(run_args) => {
            // Initialize tracing
            let subscriber = tracing_subscriber::fmt()
                .with_max_level(if run_args.verbose {
                    tracing::Level::DEBUG
                } else {
                    tracing::Level::INFO
                })
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;

            tracing::info!("Multicloud Load Test Client Starting...");
            tracing::info!("Target: {}", run_args.target);
            tracing::info!(
                "Expected cloud: {}",
                if run_args.expect_cloud.is_empty() {
                    "any"
                } else {
                    run_args.expect_cloud.as_str()
                }
            );

            // Run the selected scenario
            match run_args.scenario.clone() {
                Scenario::Smoke(args) => {
                    tracing::info!("Running Smoke scenario");
                    tracing::info!("  Virtual Users: {}", args.vus);
                    tracing::info!("  Duration: {}s", args.duration);
                    scenarios::smoke::run(run_args, args).await?;
                }
                Scenario::Ramp(args) => {
                    tracing::info!("Running Ramp scenario");
                    scenarios::ramp::run(run_args, args).await?;
                }
            }

            tracing::info!("Load test complete");
        }
    }

    Ok(())
}
