//! Per-pollutant threshold configuration.
//!
//! Pure data -- no global tables. A [`ThresholdTable`] is built once (the
//! built-in defaults or a JSON document supplied by the caller) and owned by
//! the classifier. Every triple is validated on construction, so a table
//! that exists is always usable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::pollutant::PollutantKind;
use crate::severity::SeverityLevel;

/// Generic boundaries used for pollutants the table has no entry for.
pub const FALLBACK_THRESHOLDS: [f64; 3] = [50.0, 100.0, 200.0];

/// Built-in boundaries: `(kind, [moderate, unhealthy, hazardous])`.
const DEFAULT_THRESHOLDS: [(PollutantKind, [f64; 3]); 5] = [
    (PollutantKind::Nh3, [25.0, 50.0, 100.0]),
    (PollutantKind::Co2, [500.0, 700.0, 1000.0]),
    (PollutantKind::Ch4, [2.5, 4.0, 6.0]),
    (PollutantKind::So2, [15.0, 35.0, 75.0]),
    (PollutantKind::Pm25, [35.0, 75.0, 150.0]),
];

// ---------------------------------------------------------------------------
// ThresholdTriple
// ---------------------------------------------------------------------------

/// Lower bounds of the moderate, unhealthy and hazardous bands.
///
/// Finite, non-negative and strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTriple")]
pub struct ThresholdTriple {
    moderate: f64,
    unhealthy: f64,
    hazardous: f64,
}

#[derive(Deserialize)]
struct RawTriple {
    moderate: f64,
    unhealthy: f64,
    hazardous: f64,
}

impl TryFrom<RawTriple> for ThresholdTriple {
    type Error = CoreError;

    fn try_from(raw: RawTriple) -> Result<Self, Self::Error> {
        ThresholdTriple::new(raw.moderate, raw.unhealthy, raw.hazardous)
    }
}

impl ThresholdTriple {
    pub fn new(moderate: f64, unhealthy: f64, hazardous: f64) -> Result<Self, CoreError> {
        for (name, value) in [
            ("moderate", moderate),
            ("unhealthy", unhealthy),
            ("hazardous", hazardous),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Validation(format!(
                    "{name} threshold must be finite and non-negative, got {value}"
                )));
            }
        }
        if !(moderate < unhealthy && unhealthy < hazardous) {
            return Err(CoreError::Validation(format!(
                "thresholds must be strictly increasing, got [{moderate}, {unhealthy}, {hazardous}]"
            )));
        }
        Ok(Self {
            moderate,
            unhealthy,
            hazardous,
        })
    }

    pub fn from_array(values: [f64; 3]) -> Result<Self, CoreError> {
        Self::new(values[0], values[1], values[2])
    }

    pub fn moderate(&self) -> f64 {
        self.moderate
    }

    pub fn unhealthy(&self) -> f64 {
        self.unhealthy
    }

    pub fn hazardous(&self) -> f64 {
        self.hazardous
    }

    /// Band for an already-validated value. Each boundary belongs to the
    /// band above it.
    pub fn band(&self, value: f64) -> SeverityLevel {
        if value >= self.hazardous {
            SeverityLevel::Hazardous
        } else if value >= self.unhealthy {
            SeverityLevel::Unhealthy
        } else if value >= self.moderate {
            SeverityLevel::Moderate
        } else {
            SeverityLevel::Safe
        }
    }

    /// Fallback triple. The constant is strictly increasing, so this cannot
    /// fail.
    fn fallback() -> Self {
        Self {
            moderate: FALLBACK_THRESHOLDS[0],
            unhealthy: FALLBACK_THRESHOLDS[1],
            hazardous: FALLBACK_THRESHOLDS[2],
        }
    }
}

// ---------------------------------------------------------------------------
// ThresholdTable
// ---------------------------------------------------------------------------

/// Immutable mapping from pollutant to its threshold triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    #[serde(default)]
    entries: BTreeMap<PollutantKind, ThresholdTriple>,
    #[serde(default = "ThresholdTriple::fallback")]
    fallback: ThresholdTriple,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        let entries = DEFAULT_THRESHOLDS
            .iter()
            .map(|&(kind, [m, u, h])| {
                (
                    kind,
                    ThresholdTriple {
                        moderate: m,
                        unhealthy: u,
                        hazardous: h,
                    },
                )
            })
            .collect();
        Self {
            entries,
            fallback: ThresholdTriple::fallback(),
        }
    }
}

impl ThresholdTable {
    /// Build a table from explicit entries. Kinds not present use `fallback`.
    pub fn new(
        entries: impl IntoIterator<Item = (PollutantKind, ThresholdTriple)>,
        fallback: ThresholdTriple,
    ) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            fallback,
        }
    }

    /// Parse a JSON table, e.g.
    /// `{"entries": {"nh3": {"moderate": 25, "unhealthy": 50, "hazardous": 100}}}`.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("invalid threshold table: {e}")))
    }

    /// Triple configured for `kind`, or the fallback.
    pub fn triple_for(&self, kind: PollutantKind) -> &ThresholdTriple {
        self.entries.get(&kind).unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &ThresholdTriple {
        &self.fallback
    }

    pub fn has_entry(&self, kind: PollutantKind) -> bool {
        self.entries.contains_key(&kind)
    }
}
