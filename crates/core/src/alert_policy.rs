//! Which alerts each audience sees, and which one escalates to a banner.

use serde::{Deserialize, Serialize};

use crate::alert::{Alert, AlertKind};
use crate::error::CoreError;
use crate::severity::SeverityLevel;
use crate::status::SeverityCounts;

pub const ROLE_INDUSTRY: &str = "industry";
pub const ROLE_USER: &str = "user";

pub const FILTER_ALL: &str = "all";

/// Dashboard audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Plant operators: see every alert.
    Industry,
    /// Nearby residents: see alerts relevant to their location.
    User,
}

impl UserRole {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ROLE_INDUSTRY => Ok(Self::Industry),
            ROLE_USER => Ok(Self::User),
            _ => Err(format!(
                "Invalid role '{s}'. Must be one of: {ROLE_INDUSTRY}, {ROLE_USER}"
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Industry => ROLE_INDUSTRY,
            Self::User => ROLE_USER,
        }
    }
}

/// Whether `alert` is shown to `role`.
///
/// Residents see hazardous alerts and every prediction alert; unhealthy
/// alerts are added only while their location is inside the danger zone.
pub fn is_visible_to(alert: &Alert, role: UserRole, in_danger_zone: bool) -> bool {
    match role {
        UserRole::Industry => true,
        UserRole::User => {
            alert.severity == SeverityLevel::Hazardous
                || alert.kind == AlertKind::Prediction
                || (in_danger_zone && alert.severity == SeverityLevel::Unhealthy)
        }
    }
}

/// Alerts visible to `role`, in their original order.
pub fn alerts_for_role(alerts: &[Alert], role: UserRole, in_danger_zone: bool) -> Vec<Alert> {
    alerts
        .iter()
        .filter(|a| is_visible_to(a, role, in_danger_zone))
        .cloned()
        .collect()
}

/// First unacknowledged hazardous alert, if any. Drives the escalation
/// banner.
pub fn critical_alert(alerts: &[Alert]) -> Option<&Alert> {
    alerts
        .iter()
        .find(|a| !a.acknowledged && a.severity == SeverityLevel::Hazardous)
}

pub fn unacknowledged_count(alerts: &[Alert]) -> usize {
    alerts.iter().filter(|a| !a.acknowledged).count()
}

pub fn acknowledged_count(alerts: &[Alert]) -> usize {
    alerts.iter().filter(|a| a.acknowledged).count()
}

/// Severity filter of the operator alert centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertFilter {
    #[default]
    All,
    Severity(SeverityLevel),
}

impl AlertFilter {
    /// `all` or one of the severity strings.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        if s == FILTER_ALL {
            return Ok(Self::All);
        }
        SeverityLevel::from_str_value(s).map(Self::Severity)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => FILTER_ALL,
            Self::Severity(level) => level.as_str(),
        }
    }

    pub fn matches(&self, alert: &Alert) -> bool {
        match self {
            Self::All => true,
            Self::Severity(level) => alert.severity == *level,
        }
    }
}

/// Alerts passing `filter`, in their original order.
pub fn filter_alerts(alerts: &[Alert], filter: AlertFilter) -> Vec<Alert> {
    alerts.iter().filter(|a| filter.matches(a)).cloned().collect()
}

/// Counts shown above the operator alert list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertCentreSummary {
    pub total: usize,
    /// Alerts per severity filter.
    pub by_severity: SeverityCounts,
    pub acknowledged: usize,
    pub pending: usize,
}

impl AlertCentreSummary {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        let mut by_severity = SeverityCounts::default();
        for level in SeverityLevel::ALL {
            let count = filter_alerts(alerts, AlertFilter::Severity(level)).len();
            match level {
                SeverityLevel::Safe => by_severity.safe = count,
                SeverityLevel::Moderate => by_severity.moderate = count,
                SeverityLevel::Unhealthy => by_severity.unhealthy = count,
                SeverityLevel::Hazardous => by_severity.hazardous = count,
            }
        }
        Self {
            total: filter_alerts(alerts, AlertFilter::All).len(),
            by_severity,
            acknowledged: acknowledged_count(alerts),
            pending: unacknowledged_count(alerts),
        }
    }
}

/// Acknowledge the alert with `id`.
///
/// Returns `Ok(true)` if it was newly acknowledged, `Ok(false)` if it
/// already was.
pub fn acknowledge_by_id(alerts: &mut [Alert], id: &str) -> Result<bool, CoreError> {
    let alert = alerts
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(|| CoreError::NotFound {
            entity: "alert",
            id: id.to_string(),
        })?;
    let changed = alert.acknowledge();
    if changed {
        tracing::debug!(alert_id = id, "Alert acknowledged");
    }
    Ok(changed)
}
