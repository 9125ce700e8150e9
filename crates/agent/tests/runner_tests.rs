//! Integration tests for the runner's single-pass and looping modes.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use assert_matches::assert_matches;

use airguard_agent::config::AgentConfig;
use airguard_agent::error::AgentError;
use airguard_agent::runner::run;
use airguard_core::alert_policy::UserRole;
use airguard_core::classifier::SeverityClassifier;

const FIXTURE: &str = include_str!("fixtures/refinery_snapshot.json");

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

fn config(snapshot_path: PathBuf, interval: Option<Duration>) -> AgentConfig {
    AgentConfig {
        snapshot_path,
        thresholds_path: None,
        role: UserRole::Industry,
        interval,
    }
}

// ---------------------------------------------------------------------------
// Test: single run
// ---------------------------------------------------------------------------

#[tokio::test]
async fn single_run_succeeds_on_valid_snapshot() {
    let file = write_temp(FIXTURE);
    let config = config(file.path().to_path_buf(), None);

    assert_matches!(run(&config, &SeverityClassifier::default()).await, Ok(()));
}

/// A missing snapshot fails the single run so `main` can exit non-zero.
#[tokio::test]
async fn single_run_returns_io_error_for_missing_snapshot() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = config(dir.path().join("missing.json"), None);

    assert_matches!(
        run(&config, &SeverityClassifier::default()).await,
        Err(AgentError::Io { path, .. }) if path.ends_with("missing.json")
    );
}

#[tokio::test]
async fn single_run_returns_parse_error_for_malformed_snapshot() {
    let file = write_temp("{ not json");
    let config = config(file.path().to_path_buf(), None);

    assert_matches!(
        run(&config, &SeverityClassifier::default()).await,
        Err(AgentError::Parse { .. })
    );
}

// ---------------------------------------------------------------------------
// Test: periodic loop
// ---------------------------------------------------------------------------

/// Failing ticks are logged, not returned: the loop keeps running until
/// it is cancelled.
#[tokio::test]
async fn loop_survives_failing_ticks() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = config(dir.path().join("missing.json"), Some(Duration::from_millis(5)));
    let classifier = SeverityClassifier::default();

    let outcome = tokio::time::timeout(Duration::from_millis(50), run(&config, &classifier)).await;

    assert!(outcome.is_err(), "loop should still be running");
}
