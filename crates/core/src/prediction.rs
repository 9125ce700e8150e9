//! Predicted pollutant spread and danger-zone checks.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::geofence::{GeoJsonFeature, GeoPoint, GeoPolygon};
use crate::severity::SeverityLevel;
use crate::types::{EntityId, Timestamp};

/// A spread forecast produced by an upstream prediction source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: EntityId,
    pub timestamp: Timestamp,
    /// Display label of the gas, e.g. `SO2`.
    pub gas_type: String,
    pub spread_direction: String,
    /// Kilometres.
    pub spread_distance_km: f64,
    /// Minutes until the forecast spread is reached.
    pub time_frame_minutes: u32,
    pub affected_area: GeoPolygon,
    #[serde(default)]
    pub summary: String,
    pub severity: SeverityLevel,
}

impl Prediction {
    /// Whether `point` is inside the predicted affected area.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        self.affected_area.contains(point)
    }

    /// Replace the affected area with the outer ring of a GeoJSON feature.
    pub fn with_geojson_area(mut self, feature: &GeoJsonFeature) -> Result<Self, CoreError> {
        self.affected_area = GeoPolygon::try_from(feature)?;
        Ok(self)
    }
}

/// Whether a user's registered location falls in the predicted zone.
///
/// No prediction or no location means not in danger.
pub fn is_in_danger_zone(prediction: Option<&Prediction>, location: Option<&GeoPoint>) -> bool {
    match (prediction, location) {
        (Some(prediction), Some(location)) => {
            if !prediction.affected_area.is_well_formed() {
                tracing::warn!(
                    prediction_id = %prediction.id,
                    vertices = prediction.affected_area.len(),
                    "Prediction area has too few vertices, treating as empty",
                );
            }
            prediction.contains(location)
        }
        _ => false,
    }
}
