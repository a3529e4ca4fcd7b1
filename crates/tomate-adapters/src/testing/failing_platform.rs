use async_trait::async_trait;
use tomate_core::{
    NotificationError, PermissionState, ReminderId, ReminderPlatform, ScheduleResult,
    ScheduledReminder,
};

/// Platform whose every call fails, for exercising error paths.
pub struct FailingReminderPlatform {
    message: String,
}

impl FailingReminderPlatform {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn unavailable(&self) -> NotificationError {
        NotificationError::Unavailable {
            message: self.message.clone(),
        }
    }
}

impl Default for FailingReminderPlatform {
    fn default() -> Self {
        Self::new("platform offline")
    }
}

#[async_trait]
impl ReminderPlatform for FailingReminderPlatform {
    async fn check_permissions(&self) -> Result<PermissionState, NotificationError> {
        Err(self.unavailable())
    }

    async fn request_permissions(&self) -> Result<PermissionState, NotificationError> {
        Err(NotificationError::Permission {
            message: self.message.clone(),
        })
    }

    async fn schedule(
        &self,
        reminder: ScheduledReminder,
    ) -> Result<ScheduleResult, NotificationError> {
        Err(NotificationError::Schedule {
            id: reminder.id,
            message: self.message.clone(),
        })
    }

    async fn pending(&self) -> Result<Vec<ReminderId>, NotificationError> {
        Err(self.unavailable())
    }

    async fn cancel(&self, _ids: &[ReminderId]) -> Result<(), NotificationError> {
        Err(NotificationError::Cancel {
            message: self.message.clone(),
        })
    }
}
