//! Pollutant kinds and the per-reading measurement types.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const POLLUTANT_NH3: &str = "nh3";
pub const POLLUTANT_CO2: &str = "co2";
pub const POLLUTANT_CH4: &str = "ch4";
pub const POLLUTANT_SO2: &str = "so2";
pub const POLLUTANT_PM25: &str = "pm25";

/// All recognised pollutant keys.
pub const VALID_POLLUTANTS: &[&str] = &[
    POLLUTANT_NH3,
    POLLUTANT_CO2,
    POLLUTANT_CH4,
    POLLUTANT_SO2,
    POLLUTANT_PM25,
];

/// A measured gas or particulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollutantKind {
    Nh3,
    Co2,
    Ch4,
    So2,
    Pm25,
}

impl PollutantKind {
    pub const ALL: [PollutantKind; 5] = [
        PollutantKind::Nh3,
        PollutantKind::Co2,
        PollutantKind::Ch4,
        PollutantKind::So2,
        PollutantKind::Pm25,
    ];

    /// Parse a pollutant key. Returns `None` for anything unrecognised so
    /// callers can fall back to the generic thresholds.
    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            POLLUTANT_NH3 => Some(Self::Nh3),
            POLLUTANT_CO2 => Some(Self::Co2),
            POLLUTANT_CH4 => Some(Self::Ch4),
            POLLUTANT_SO2 => Some(Self::So2),
            POLLUTANT_PM25 => Some(Self::Pm25),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nh3 => POLLUTANT_NH3,
            Self::Co2 => POLLUTANT_CO2,
            Self::Ch4 => POLLUTANT_CH4,
            Self::So2 => POLLUTANT_SO2,
            Self::Pm25 => POLLUTANT_PM25,
        }
    }
}

impl fmt::Display for PollutantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single pollutant measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub kind: PollutantKind,
    pub value: f64,
}

impl Measurement {
    pub fn new(kind: PollutantKind, value: f64) -> Self {
        Self { kind, value }
    }

    /// Finite and non-negative.
    pub fn is_valid(&self) -> bool {
        is_valid_value(self.value)
    }
}

/// Whether `value` can be classified at all.
pub fn is_valid_value(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// The five pollutant values carried by every sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollutantReadings {
    pub nh3: f64,
    pub co2: f64,
    pub ch4: f64,
    pub so2: f64,
    pub pm25: f64,
}

impl PollutantReadings {
    pub fn get(&self, kind: PollutantKind) -> f64 {
        match kind {
            PollutantKind::Nh3 => self.nh3,
            PollutantKind::Co2 => self.co2,
            PollutantKind::Ch4 => self.ch4,
            PollutantKind::So2 => self.so2,
            PollutantKind::Pm25 => self.pm25,
        }
    }

    /// One measurement per pollutant, in [`PollutantKind::ALL`] order.
    pub fn measurements(&self) -> Vec<Measurement> {
        PollutantKind::ALL
            .iter()
            .map(|&kind| Measurement::new(kind, self.get(kind)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for kind in PollutantKind::ALL {
            assert_eq!(PollutantKind::from_key(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn unknown_key_is_none() {
        assert_eq!(PollutantKind::from_key("o3"), None);
        assert_eq!(PollutantKind::from_key("NH3"), None);
    }

    #[test]
    fn validity_rejects_negative_and_non_finite() {
        assert!(is_valid_value(0.0));
        assert!(is_valid_value(12.5));
        assert!(!is_valid_value(-0.1));
        assert!(!is_valid_value(f64::NAN));
        assert!(!is_valid_value(f64::INFINITY));
    }

    #[test]
    fn readings_expand_to_five_measurements() {
        let readings = PollutantReadings {
            nh3: 12.5,
            co2: 420.0,
            ch4: 1.9,
            so2: 8.2,
            pm25: 28.0,
        };
        let measurements = readings.measurements();
        assert_eq!(measurements.len(), 5);
        assert_eq!(measurements[0], Measurement::new(PollutantKind::Nh3, 12.5));
        assert_eq!(measurements[4], Measurement::new(PollutantKind::Pm25, 28.0));
    }
}
