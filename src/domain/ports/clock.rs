use chrono::{DateTime, Utc};

/// Source of the current instant. Evaluations sample it once per call.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
