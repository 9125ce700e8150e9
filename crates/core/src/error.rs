use crate::pollutant::PollutantKind;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid measurement for {kind}: {value} (must be finite and non-negative)")]
    InvalidMeasurement { kind: PollutantKind, value: f64 },

    #[error("Invalid reading for '{name}': {value} (must be finite and non-negative)")]
    InvalidNamedMeasurement { name: String, value: f64 },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}
