//! Sensor reading records as delivered by the sensor-data source.

use serde::{Deserialize, Serialize};

use crate::classifier::SeverityClassifier;
use crate::error::CoreError;
use crate::geofence::GeoPoint;
use crate::pollutant::PollutantReadings;
use crate::severity::SeverityLevel;
use crate::types::{EntityId, Timestamp};

/// Weather conditions recorded alongside the pollutant values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReadings {
    pub temperature: f64,
    /// Percent, 0-100.
    pub humidity: f64,
    pub wind_speed: f64,
    /// Degrees clockwise from north.
    pub wind_direction: f64,
}

/// Where a sensor is installed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorLocation {
    pub name: String,
    #[serde(flatten)]
    pub point: GeoPoint,
}

/// One reading from one sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: EntityId,
    pub sensor_id: EntityId,
    pub timestamp: Timestamp,
    pub pollutants: PollutantReadings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environmental: Option<EnvironmentalReadings>,
    pub location: SensorLocation,
}

impl SensorReading {
    /// Overall severity of this reading (worst pollutant wins).
    pub fn severity(&self, classifier: &SeverityClassifier) -> Result<SeverityLevel, CoreError> {
        classifier.classify_readings(&self.pollutants)
    }
}
