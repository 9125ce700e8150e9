//! Periodic evaluation loop.
//!
//! Re-reads the snapshot on every tick so upstream writers can replace it
//! at any time. Ticks share nothing but the classifier; a failed tick is
//! logged and the loop carries on. A single run (no interval) returns its
//! error instead so the process can exit non-zero.

use chrono::Utc;

use airguard_core::classifier::SeverityClassifier;

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::evaluator::{evaluate, DashboardReport};
use crate::snapshot::DashboardSnapshot;

/// Load the configured snapshot and evaluate it once.
pub fn evaluate_once(
    config: &AgentConfig,
    classifier: &SeverityClassifier,
) -> Result<DashboardReport, AgentError> {
    let snapshot = DashboardSnapshot::load(&config.snapshot_path)?;
    Ok(evaluate(&snapshot, classifier, config.role, Utc::now()))
}

/// Evaluate and print the report as a JSON line.
fn emit(config: &AgentConfig, classifier: &SeverityClassifier) -> Result<(), AgentError> {
    let report = evaluate_once(config, classifier)?;
    let json = serde_json::to_string(&report).map_err(AgentError::Report)?;
    println!("{json}");
    Ok(())
}

/// Run until Ctrl-C, or once if no interval is configured.
///
/// Only a single run can fail; in the loop each failed tick is logged and
/// the next one proceeds.
pub async fn run(config: &AgentConfig, classifier: &SeverityClassifier) -> Result<(), AgentError> {
    let Some(interval) = config.interval else {
        return emit(config, classifier);
    };

    let mut ticker = tokio::time::interval(interval);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = emit(config, classifier) {
                    tracing::error!(error = %e, "Evaluation failed");
                }
            }
            result = &mut shutdown => {
                if let Err(e) = result {
                    tracing::error!(error = %e, "Failed to listen for shutdown signal");
                }
                tracing::info!("Shutting down");
                break;
            }
        }
    }
    Ok(())
}
