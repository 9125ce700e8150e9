//! Severity classification for pollutant measurements.
//!
//! Pure logic -- the classifier owns an immutable [`ThresholdTable`] and
//! maps values onto the four-level scale. Invalid values (negative or
//! non-finite) are reported as errors rather than clamped.

use crate::error::CoreError;
use crate::pollutant::{is_valid_value, Measurement, PollutantKind, PollutantReadings};
use crate::severity::SeverityLevel;
use crate::thresholds::ThresholdTable;

/// Maps measurements to [`SeverityLevel`]s using a fixed threshold table.
#[derive(Debug, Clone, Default)]
pub struct SeverityClassifier {
    thresholds: ThresholdTable,
}

impl SeverityClassifier {
    pub fn new(thresholds: ThresholdTable) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    /// Classify a single value for `kind`.
    pub fn classify(&self, kind: PollutantKind, value: f64) -> Result<SeverityLevel, CoreError> {
        if !is_valid_value(value) {
            return Err(CoreError::InvalidMeasurement { kind, value });
        }
        Ok(self.thresholds.triple_for(kind).band(value))
    }

    /// Classify by pollutant key. Unrecognised keys use the table's fallback
    /// triple instead of failing.
    pub fn classify_named(&self, name: &str, value: f64) -> Result<SeverityLevel, CoreError> {
        match PollutantKind::from_key(name) {
            Some(kind) => self.classify(kind, value),
            None => {
                if !is_valid_value(value) {
                    return Err(CoreError::InvalidNamedMeasurement {
                        name: name.to_string(),
                        value,
                    });
                }
                tracing::debug!(pollutant = name, "Unknown pollutant, using fallback thresholds");
                Ok(self.thresholds.fallback().band(value))
            }
        }
    }

    /// Worst severity across `measurements`.
    ///
    /// An empty slice is `Safe`. A single invalid measurement fails the
    /// whole aggregate.
    pub fn classify_aggregate(
        &self,
        measurements: &[Measurement],
    ) -> Result<SeverityLevel, CoreError> {
        let mut worst = SeverityLevel::Safe;
        for m in measurements {
            let level = self.classify(m.kind, m.value)?;
            if level > worst {
                worst = level;
            }
        }
        Ok(worst)
    }

    /// Worst severity across the five pollutants of a sensor reading.
    pub fn classify_readings(
        &self,
        readings: &PollutantReadings,
    ) -> Result<SeverityLevel, CoreError> {
        self.classify_aggregate(&readings.measurements())
    }
}
