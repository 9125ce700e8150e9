/// Alert and sensor identifiers are opaque strings supplied by the caller.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
