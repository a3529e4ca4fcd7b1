mod clock;
mod reminder_platform;

pub use clock::Clock;
pub use reminder_platform::{
    NotificationError, PermissionState, ReminderId, ReminderPlatform, ScheduleResult,
    ScheduledReminder,
};
