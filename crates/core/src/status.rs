//! Dashboard-level status: per-level counts and the overall air-quality
//! verdict.

use serde::Serialize;

use crate::severity::{worst, SeverityLevel};

/// Number of readings at each severity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub safe: usize,
    pub moderate: usize,
    pub unhealthy: usize,
    pub hazardous: usize,
}

impl SeverityCounts {
    pub fn from_levels<I>(levels: I) -> Self
    where
        I: IntoIterator<Item = SeverityLevel>,
    {
        let mut counts = Self::default();
        for level in levels {
            counts.record(level);
        }
        counts
    }

    pub fn record(&mut self, level: SeverityLevel) {
        match level {
            SeverityLevel::Safe => self.safe += 1,
            SeverityLevel::Moderate => self.moderate += 1,
            SeverityLevel::Unhealthy => self.unhealthy += 1,
            SeverityLevel::Hazardous => self.hazardous += 1,
        }
    }

    pub fn get(&self, level: SeverityLevel) -> usize {
        match level {
            SeverityLevel::Safe => self.safe,
            SeverityLevel::Moderate => self.moderate,
            SeverityLevel::Unhealthy => self.unhealthy,
            SeverityLevel::Hazardous => self.hazardous,
        }
    }

    pub fn total(&self) -> usize {
        self.safe + self.moderate + self.unhealthy + self.hazardous
    }
}

/// The status card shown to residents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverallStatus {
    pub level: SeverityLevel,
    pub label: &'static str,
    pub message: &'static str,
}

impl OverallStatus {
    pub fn for_level(level: SeverityLevel) -> Self {
        let (label, message) = match level {
            SeverityLevel::Safe => ("Good", "Air quality is good for all activities"),
            SeverityLevel::Moderate => ("Moderate", "Air quality is acceptable"),
            SeverityLevel::Unhealthy => (
                "Unhealthy",
                "Sensitive groups should limit outdoor activity",
            ),
            SeverityLevel::Hazardous => ("Hazardous", "Stay indoors and avoid exposure"),
        };
        Self {
            level,
            label,
            message,
        }
    }
}

/// Worst reading severity, escalated to hazardous when the user is inside
/// the predicted danger zone.
pub fn overall_status<I>(reading_levels: I, in_danger_zone: bool) -> OverallStatus
where
    I: IntoIterator<Item = SeverityLevel>,
{
    let level = if in_danger_zone {
        SeverityLevel::Hazardous
    } else {
        worst(reading_levels)
    };
    OverallStatus::for_level(level)
}
