//! Tomate adapters - Infrastructure implementations
//!
//! Concrete implementations of the ports defined in tomate-core, plus the
//! test doubles used across the workspace.

pub mod clock;
pub mod testing;

pub use clock::SystemClock;
pub use testing::{FailingReminderPlatform, ManualClock, RecordingReminderPlatform};
