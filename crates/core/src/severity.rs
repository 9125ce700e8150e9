//! Four-level severity scale shared by readings, alerts and predictions.
//!
//! The derived `Ord` follows declaration order, so `Safe < Moderate <
//! Unhealthy < Hazardous` everywhere: sorting, escalation checks and
//! worst-pollutant aggregation all use the same total order.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const SEVERITY_SAFE: &str = "safe";
pub const SEVERITY_MODERATE: &str = "moderate";
pub const SEVERITY_UNHEALTHY: &str = "unhealthy";
pub const SEVERITY_HAZARDOUS: &str = "hazardous";

/// All valid severity strings, lowest first.
pub const VALID_SEVERITY_LEVELS: &[&str] = &[
    SEVERITY_SAFE,
    SEVERITY_MODERATE,
    SEVERITY_UNHEALTHY,
    SEVERITY_HAZARDOUS,
];

// ---------------------------------------------------------------------------
// Enum
// ---------------------------------------------------------------------------

/// How dangerous a reading, alert or predicted zone is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Safe,
    Moderate,
    Unhealthy,
    Hazardous,
}

impl SeverityLevel {
    /// Every level, lowest first.
    pub const ALL: [SeverityLevel; 4] = [
        SeverityLevel::Safe,
        SeverityLevel::Moderate,
        SeverityLevel::Unhealthy,
        SeverityLevel::Hazardous,
    ];

    /// Parse the lowercase wire value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            SEVERITY_SAFE => Ok(Self::Safe),
            SEVERITY_MODERATE => Ok(Self::Moderate),
            SEVERITY_UNHEALTHY => Ok(Self::Unhealthy),
            SEVERITY_HAZARDOUS => Ok(Self::Hazardous),
            _ => Err(format!(
                "Invalid severity '{s}'. Must be one of: {}",
                VALID_SEVERITY_LEVELS.join(", ")
            )),
        }
    }

    /// The lowercase wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => SEVERITY_SAFE,
            Self::Moderate => SEVERITY_MODERATE,
            Self::Unhealthy => SEVERITY_UNHEALTHY,
            Self::Hazardous => SEVERITY_HAZARDOUS,
        }
    }

    /// Whether this level is at least as severe as `other`.
    pub fn is_at_least(&self, other: SeverityLevel) -> bool {
        *self >= other
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Highest level in `levels`, or `Safe` when there are none.
pub fn worst<I>(levels: I) -> SeverityLevel
where
    I: IntoIterator<Item = SeverityLevel>,
{
    levels.into_iter().max().unwrap_or(SeverityLevel::Safe)
}
