//! `airguard-core` -- pollutant severity and danger-zone decision engine.
//!
//! Pure logic only: no I/O, no shared mutable state. Callers load sensor
//! readings, predictions and alerts from wherever they live and pass them
//! in; every function returns a fresh result.

pub mod alert;
pub mod alert_policy;
pub mod classifier;
pub mod error;
pub mod geofence;
pub mod history;
pub mod pollutant;
pub mod prediction;
pub mod reading;
pub mod severity;
pub mod status;
pub mod thresholds;
pub mod types;
