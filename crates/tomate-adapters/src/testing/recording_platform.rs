use async_trait::async_trait;
use std::sync::Mutex;
use tomate_core::{
    NotificationError, PermissionState, ReminderId, ReminderPlatform, ScheduleResult,
    ScheduledReminder,
};

/// In-memory platform that keeps every reminder it is given until cancelled.
pub struct RecordingReminderPlatform {
    permission: Mutex<PermissionState>,
    permission_requests: Mutex<u32>,
    scheduled: Mutex<Vec<ScheduledReminder>>,
    pending: Mutex<Vec<ReminderId>>,
    cancelled: Mutex<Vec<ReminderId>>,
}

impl RecordingReminderPlatform {
    pub fn new() -> Self {
        Self::with_permission(PermissionState::Granted)
    }

    pub fn with_permission(permission: PermissionState) -> Self {
        Self {
            permission: Mutex::new(permission),
            permission_requests: Mutex::new(0),
            scheduled: Mutex::new(Vec::new()),
            pending: Mutex::new(Vec::new()),
            cancelled: Mutex::new(Vec::new()),
        }
    }

    pub fn scheduled(&self) -> Vec<ScheduledReminder> {
        self.scheduled.lock().unwrap().clone()
    }

    pub fn cancelled(&self) -> Vec<ReminderId> {
        self.cancelled.lock().unwrap().clone()
    }

    pub fn permission_requests(&self) -> u32 {
        *self.permission_requests.lock().unwrap()
    }
}

impl Default for RecordingReminderPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReminderPlatform for RecordingReminderPlatform {
    async fn check_permissions(&self) -> Result<PermissionState, NotificationError> {
        Ok(*self.permission.lock().unwrap())
    }

    async fn request_permissions(&self) -> Result<PermissionState, NotificationError> {
        *self.permission_requests.lock().unwrap() += 1;
        let mut permission = self.permission.lock().unwrap();
        *permission = PermissionState::Granted;
        Ok(*permission)
    }

    async fn schedule(
        &self,
        reminder: ScheduledReminder,
    ) -> Result<ScheduleResult, NotificationError> {
        let id = reminder.id;
        self.pending.lock().unwrap().push(id);
        self.scheduled.lock().unwrap().push(reminder);
        Ok(ScheduleResult { ids: vec![id] })
    }

    async fn pending(&self) -> Result<Vec<ReminderId>, NotificationError> {
        Ok(self.pending.lock().unwrap().clone())
    }

    async fn cancel(&self, ids: &[ReminderId]) -> Result<(), NotificationError> {
        self.pending
            .lock()
            .unwrap()
            .retain(|pending| !ids.contains(pending));
        self.cancelled.lock().unwrap().extend_from_slice(ids);
        Ok(())
    }
}
