//! Dashboard snapshot loading.
//!
//! A snapshot is everything the surrounding application knows at one
//! instant: the latest sensor readings, the current alert list, the active
//! spread prediction, the user's registered location and the hourly
//! pollutant history behind the trend view.

use std::path::Path;

use serde::{Deserialize, Serialize};

use airguard_core::alert::Alert;
use airguard_core::geofence::GeoPoint;
use airguard_core::history::HistoricalSample;
use airguard_core::prediction::Prediction;
use airguard_core::reading::SensorReading;

use crate::error::AgentError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    #[serde(default)]
    pub readings: Vec<SensorReading>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub prediction: Option<Prediction>,
    #[serde(default)]
    pub user_location: Option<GeoPoint>,
    /// Hourly samples, oldest first.
    #[serde(default)]
    pub history: Vec<HistoricalSample>,
}

impl DashboardSnapshot {
    pub fn from_json(json: &str, origin: &str) -> Result<Self, AgentError> {
        serde_json::from_str(json).map_err(|source| AgentError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Read and parse a snapshot file.
    pub fn load(path: &Path) -> Result<Self, AgentError> {
        let path_str = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|source| AgentError::Io {
            path: path_str.clone(),
            source,
        })?;
        let snapshot = Self::from_json(&json, &path_str)?;
        tracing::debug!(
            path = %path_str,
            readings = snapshot.readings.len(),
            alerts = snapshot.alerts.len(),
            has_prediction = snapshot.prediction.is_some(),
            history = snapshot.history.len(),
            "Snapshot loaded",
        );
        Ok(snapshot)
    }
}
