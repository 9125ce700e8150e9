//! One evaluation pass over a dashboard snapshot.
//!
//! Pure apart from logging: the same snapshot, classifier, role and
//! timestamp always produce the same report.

use serde::Serialize;

use airguard_core::alert::{sort_for_display, Alert};
use airguard_core::alert_policy::{
    alerts_for_role, critical_alert, unacknowledged_count, AlertCentreSummary, UserRole,
};
use airguard_core::classifier::SeverityClassifier;
use airguard_core::history::{TimeRange, WindowSummary};
use airguard_core::prediction::is_in_danger_zone;
use airguard_core::severity::SeverityLevel;
use airguard_core::status::{overall_status, OverallStatus, SeverityCounts};
use airguard_core::types::{EntityId, Timestamp};

use crate::snapshot::DashboardSnapshot;

/// Classification outcome for one sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorStatus {
    pub sensor_id: EntityId,
    pub location_name: String,
    /// `None` when the reading could not be classified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<SeverityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything the dashboard widgets need, computed from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub evaluated_at: Timestamp,
    pub role: UserRole,
    pub sensors: Vec<SensorStatus>,
    pub counts: SeverityCounts,
    pub in_danger_zone: bool,
    pub overall: OverallStatus,
    /// Alerts visible to `role`, in display order.
    pub alerts: Vec<Alert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_alert_id: Option<EntityId>,
    pub unacknowledged: usize,
    /// Filter counts for the operator alert centre; industry only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_centre: Option<AlertCentreSummary>,
    /// Trend statistics per time range; empty without history.
    pub trends: Vec<WindowSummary>,
}

/// Evaluate `snapshot` for `role`.
///
/// Readings with invalid values are reported with an error and left out of
/// the counts and overall status rather than assigned a guessed severity.
pub fn evaluate(
    snapshot: &DashboardSnapshot,
    classifier: &SeverityClassifier,
    role: UserRole,
    now: Timestamp,
) -> DashboardReport {
    let sensors: Vec<SensorStatus> = snapshot
        .readings
        .iter()
        .map(|reading| match reading.severity(classifier) {
            Ok(level) => SensorStatus {
                sensor_id: reading.sensor_id.clone(),
                location_name: reading.location.name.clone(),
                severity: Some(level),
                error: None,
            },
            Err(e) => {
                tracing::warn!(sensor_id = %reading.sensor_id, error = %e, "Skipping invalid reading");
                SensorStatus {
                    sensor_id: reading.sensor_id.clone(),
                    location_name: reading.location.name.clone(),
                    severity: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();

    let levels: Vec<SeverityLevel> = sensors.iter().filter_map(|s| s.severity).collect();
    let counts = SeverityCounts::from_levels(levels.iter().copied());

    let in_danger_zone = is_in_danger_zone(
        snapshot.prediction.as_ref(),
        snapshot.user_location.as_ref(),
    );
    let overall = overall_status(levels, in_danger_zone);

    let mut alerts = alerts_for_role(&snapshot.alerts, role, in_danger_zone);
    let critical_alert_id = critical_alert(&alerts).map(|a| a.id.clone());
    let unacknowledged = unacknowledged_count(&alerts);
    sort_for_display(&mut alerts);

    let alert_centre = match role {
        UserRole::Industry => Some(AlertCentreSummary::from_alerts(&alerts)),
        UserRole::User => None,
    };

    let trends: Vec<WindowSummary> = TimeRange::ALL
        .into_iter()
        .filter_map(|range| WindowSummary::compute(&snapshot.history, range))
        .collect();

    if in_danger_zone {
        tracing::warn!(role = role.as_str(), "User location is inside the predicted danger zone");
    }
    tracing::debug!(
        sensors = sensors.len(),
        overall = %overall.level,
        alerts = alerts.len(),
        unacknowledged,
        trends = trends.len(),
        "Snapshot evaluated",
    );

    DashboardReport {
        evaluated_at: now,
        role,
        sensors,
        counts,
        in_danger_zone,
        overall,
        alerts,
        critical_alert_id,
        unacknowledged,
        alert_centre,
        trends,
    }
}
