//! Alert records and their display ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::geofence::GeoPoint;
use crate::severity::SeverityLevel;
use crate::types::{EntityId, Timestamp};

/// What raised the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// A sensor reading crossed a threshold.
    Sensor,
    /// A spread prediction covers a populated area.
    Prediction,
}

/// A single alert shown in the alert list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: EntityId,
    pub kind: AlertKind,
    pub severity: SeverityLevel,
    pub title: String,
    pub message: String,
    /// When the alert was raised.
    pub timestamp: Timestamp,
    /// The sensor that triggered it, for sensor alerts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    /// Once set, never cleared.
    #[serde(default)]
    pub acknowledged: bool,
}

impl Alert {
    /// Mark the alert as acknowledged.
    ///
    /// Returns `true` if this call changed the state.
    pub fn acknowledge(&mut self) -> bool {
        let changed = !self.acknowledged;
        self.acknowledged = true;
        changed
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }
}

/// Display order: unacknowledged first, then newest first, then by id so
/// equal keys still sort deterministically.
pub fn compare_for_display(a: &Alert, b: &Alert) -> Ordering {
    a.acknowledged
        .cmp(&b.acknowledged)
        .then_with(|| b.timestamp.cmp(&a.timestamp))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort alerts in place using [`compare_for_display`].
pub fn sort_for_display(alerts: &mut [Alert]) {
    alerts.sort_by(compare_for_display);
}
