mod failing_platform;
mod manual_clock;
mod recording_platform;

pub use failing_platform::FailingReminderPlatform;
pub use manual_clock::ManualClock;
pub use recording_platform::RecordingReminderPlatform;
