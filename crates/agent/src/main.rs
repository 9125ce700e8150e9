//! `airguard-agent` -- periodic severity and danger-zone evaluator.
//!
//! Loads a dashboard snapshot (sensor readings, alerts, the active spread
//! prediction and the user's location), classifies it and prints one JSON
//! report per evaluation. See [`airguard_agent::config`] for the
//! environment variables it reads.

use airguard_agent::config::AgentConfig;
use airguard_agent::runner;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "airguard_agent=info,airguard_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AgentConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    let classifier = config.load_classifier().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to load threshold table");
        std::process::exit(1);
    });

    tracing::info!(
        snapshot = %config.snapshot_path.display(),
        role = config.role.as_str(),
        interval = ?config.interval,
        "Starting airguard-agent",
    );

    if let Err(e) = runner::run(&config, &classifier).await {
        tracing::error!(error = %e, "Evaluation failed");
        std::process::exit(1);
    }
}
