//! Reminder scheduling on top of a `ReminderPlatform`.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::ports::{
    NotificationError, ReminderId, ReminderPlatform, ScheduleResult, ScheduledReminder,
};

pub struct NotificationService {
    platform: Arc<dyn ReminderPlatform>,
    next_id: AtomicU32,
    permission_checked: AtomicBool,
}

impl NotificationService {
    pub fn new(platform: Arc<dyn ReminderPlatform>) -> Self {
        Self {
            platform,
            next_id: AtomicU32::new(0),
            permission_checked: AtomicBool::new(false),
        }
    }

    /// Checks the display permission once and asks for it when missing.
    ///
    /// Best effort: denials and platform errors are logged, never returned.
    pub async fn ensure_permission(&self) {
        if self.permission_checked.swap(true, Ordering::SeqCst) {
            return;
        }

        match self.platform.check_permissions().await {
            Ok(state) if state.is_granted() => {
                debug!("notification permission already granted");
            }
            Ok(state) => {
                info!(?state, "requesting notification permission");
                match self.platform.request_permissions().await {
                    Ok(state) if state.is_granted() => info!("notification permission granted"),
                    Ok(state) => warn!(?state, "notification permission not granted"),
                    Err(error) => warn!(%error, "failed to request notification permission"),
                }
            }
            Err(error) => {
                warn!(%error, "failed to check notification permission");
            }
        }
    }

    pub async fn schedule(
        &self,
        title: &str,
        body: &str,
        at: DateTime<Utc>,
    ) -> Result<ScheduleResult, NotificationError> {
        self.ensure_permission().await;

        let reminder = ScheduledReminder {
            id: self.next_id(),
            title: title.to_string(),
            body: body.to_string(),
            at,
        };
        debug!(id = reminder.id, %at, "scheduling reminder");

        self.platform.schedule(reminder).await
    }

    pub async fn pending_ids(&self) -> Result<Vec<ReminderId>, NotificationError> {
        self.ensure_permission().await;
        self.platform.pending().await
    }

    pub async fn cancel(&self, ids: &[ReminderId]) -> Result<(), NotificationError> {
        self.ensure_permission().await;
        debug!(?ids, "cancelling reminders");
        self.platform.cancel(ids).await
    }

    fn next_id(&self) -> ReminderId {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

