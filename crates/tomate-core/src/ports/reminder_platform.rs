use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ReminderId = u32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("notification platform unavailable: {message}")]
    Unavailable { message: String },

    #[error("failed to schedule reminder {id}: {message}")]
    Schedule { id: ReminderId, message: String },

    #[error("failed to cancel reminders: {message}")]
    Cancel { message: String },

    #[error("permission request failed: {message}")]
    Permission { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Granted,
    Denied,
    /// The user has not been asked yet.
    Prompt,
}

impl PermissionState {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted)
    }
}

/// One-shot reminder handed to the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledReminder {
    pub id: ReminderId,
    pub title: String,
    pub body: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleResult {
    pub ids: Vec<ReminderId>,
}

#[async_trait]
pub trait ReminderPlatform: Send + Sync {
    async fn check_permissions(&self) -> Result<PermissionState, NotificationError>;

    async fn request_permissions(&self) -> Result<PermissionState, NotificationError>;

    async fn schedule(
        &self,
        reminder: ScheduledReminder,
    ) -> Result<ScheduleResult, NotificationError>;

    /// Ids of reminders that have not fired yet.
    async fn pending(&self) -> Result<Vec<ReminderId>, NotificationError>;

    async fn cancel(&self, ids: &[ReminderId]) -> Result<(), NotificationError>;
}
