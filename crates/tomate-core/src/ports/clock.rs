use chrono::{DateTime, Utc};

/// Source of wall-clock time for the timer engine.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
