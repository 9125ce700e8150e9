//! Environment-driven agent configuration.
//!
//! | Variable                   | Required | Default | Description                              |
//! |----------------------------|----------|---------|------------------------------------------|
//! | `AIRGUARD_SNAPSHOT_PATH`   | yes      | --      | JSON dashboard snapshot to evaluate      |
//! | `AIRGUARD_THRESHOLDS_PATH` | no       | --      | JSON threshold table (built-in if unset) |
//! | `AIRGUARD_ROLE`            | no       | `user`  | `industry` or `user`                     |
//! | `AIRGUARD_INTERVAL_SECS`   | no       | `5`     | Seconds between evaluations, `0` = once  |

use std::path::PathBuf;
use std::time::Duration;

use airguard_core::alert_policy::UserRole;
use airguard_core::classifier::SeverityClassifier;
use airguard_core::thresholds::ThresholdTable;

use crate::error::AgentError;

pub const ENV_SNAPSHOT_PATH: &str = "AIRGUARD_SNAPSHOT_PATH";
pub const ENV_THRESHOLDS_PATH: &str = "AIRGUARD_THRESHOLDS_PATH";
pub const ENV_ROLE: &str = "AIRGUARD_ROLE";
pub const ENV_INTERVAL_SECS: &str = "AIRGUARD_INTERVAL_SECS";

/// Default interval between evaluation passes.
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub snapshot_path: PathBuf,
    pub thresholds_path: Option<PathBuf>,
    pub role: UserRole,
    /// `None` means evaluate once and exit.
    pub interval: Option<Duration>,
}

impl AgentConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, AgentError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns the value of a
    /// variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AgentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let snapshot_path = lookup(ENV_SNAPSHOT_PATH)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| {
                AgentError::Config(format!("{ENV_SNAPSHOT_PATH} environment variable is required"))
            })?;

        let thresholds_path = lookup(ENV_THRESHOLDS_PATH)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let role = match lookup(ENV_ROLE) {
            Some(value) => UserRole::from_str_value(value.trim()).map_err(AgentError::Config)?,
            None => UserRole::User,
        };

        let interval_secs = match lookup(ENV_INTERVAL_SECS) {
            Some(value) => value.trim().parse::<u64>().map_err(|_| {
                AgentError::Config(format!(
                    "{ENV_INTERVAL_SECS} must be a non-negative integer, got '{value}'"
                ))
            })?,
            None => DEFAULT_INTERVAL_SECS,
        };
        let interval = (interval_secs > 0).then(|| Duration::from_secs(interval_secs));

        Ok(Self {
            snapshot_path,
            thresholds_path,
            role,
            interval,
        })
    }

    /// Build the classifier, loading a custom threshold table if one is
    /// configured.
    pub fn load_classifier(&self) -> Result<SeverityClassifier, AgentError> {
        let table = match &self.thresholds_path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| AgentError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                let table = ThresholdTable::from_json(&json)?;
                tracing::info!(path = %path.display(), "Loaded custom threshold table");
                table
            }
            None => ThresholdTable::default(),
        };
        Ok(SeverityClassifier::new(table))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_snapshot_is_set() {
        let config = AgentConfig::from_lookup(lookup(&[(ENV_SNAPSHOT_PATH, "snap.json")])).unwrap();
        assert_eq!(config.snapshot_path, PathBuf::from("snap.json"));
        assert_eq!(config.thresholds_path, None);
        assert_eq!(config.role, UserRole::User);
        assert_eq!(config.interval, Some(Duration::from_secs(DEFAULT_INTERVAL_SECS)));
    }

    #[test]
    fn snapshot_path_is_required() {
        assert_matches!(
            AgentConfig::from_lookup(lookup(&[])),
            Err(AgentError::Config(msg)) if msg.contains(ENV_SNAPSHOT_PATH)
        );
    }

    #[test]
    fn zero_interval_means_run_once() {
        let config = AgentConfig::from_lookup(lookup(&[
            (ENV_SNAPSHOT_PATH, "snap.json"),
            (ENV_INTERVAL_SECS, "0"),
        ]))
        .unwrap();
        assert_eq!(config.interval, None);
    }

    #[test]
    fn parses_role_and_thresholds_path() {
        let config = AgentConfig::from_lookup(lookup(&[
            (ENV_SNAPSHOT_PATH, "snap.json"),
            (ENV_THRESHOLDS_PATH, "thresholds.json"),
            (ENV_ROLE, "industry"),
        ]))
        .unwrap();
        assert_eq!(config.role, UserRole::Industry);
        assert_eq!(config.thresholds_path, Some(PathBuf::from("thresholds.json")));
    }

    #[test]
    fn rejects_invalid_role_and_interval() {
        assert!(AgentConfig::from_lookup(lookup(&[
            (ENV_SNAPSHOT_PATH, "snap.json"),
            (ENV_ROLE, "admin"),
        ]))
        .is_err());
        assert!(AgentConfig::from_lookup(lookup(&[
            (ENV_SNAPSHOT_PATH, "snap.json"),
            (ENV_INTERVAL_SECS, "-3"),
        ]))
        .is_err());
    }
}
