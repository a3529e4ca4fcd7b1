use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use notify_rust::{Notification, Urgency};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use tomate_core::{
    Clock, NotificationError, NotificationUrgency, PermissionState, ReminderId, ReminderPlatform,
    ScheduleResult, ScheduledReminder,
};

pub enum NotifierMessage {
    Schedule {
        reminder: ScheduledReminder,
        reply: oneshot::Sender<ScheduleResult>,
    },
    Pending {
        reply: oneshot::Sender<Vec<ReminderId>>,
    },
    Cancel {
        ids: Vec<ReminderId>,
        reply: oneshot::Sender<()>,
    },
}

/// Desktop reminder platform backed by the notifier actor.
#[derive(Clone)]
pub struct NotifierHandle {
    sender: mpsc::Sender<NotifierMessage>,
}

impl NotifierHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> NotifierMessage,
    ) -> Result<T, NotificationError> {
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender
            .send(build(reply_sender))
            .await
            .map_err(|_| notifier_stopped())?;
        reply_receiver.await.map_err(|_| notifier_stopped())
    }
}

fn notifier_stopped() -> NotificationError {
    NotificationError::Unavailable {
        message: "notifier actor stopped".to_string(),
    }
}

#[async_trait]
impl ReminderPlatform for NotifierHandle {
    async fn check_permissions(&self) -> Result<PermissionState, NotificationError> {
        // Desktop notification servers do not gate on a permission.
        Ok(PermissionState::Granted)
    }

    async fn request_permissions(&self) -> Result<PermissionState, NotificationError> {
        Ok(PermissionState::Granted)
    }

    async fn schedule(
        &self,
        reminder: ScheduledReminder,
    ) -> Result<ScheduleResult, NotificationError> {
        self.request(|reply| NotifierMessage::Schedule { reminder, reply })
            .await
    }

    async fn pending(&self) -> Result<Vec<ReminderId>, NotificationError> {
        self.request(|reply| NotifierMessage::Pending { reply }).await
    }

    async fn cancel(&self, ids: &[ReminderId]) -> Result<(), NotificationError> {
        let ids = ids.to_vec();
        self.request(|reply| NotifierMessage::Cancel { ids, reply })
            .await
    }
}

struct PendingReminder {
    title: String,
    body: String,
    countdown: JoinHandle<()>,
}

pub struct NotifierActor {
    receiver: mpsc::Receiver<NotifierMessage>,
    fired_sender: mpsc::UnboundedSender<ReminderId>,
    fired_receiver: mpsc::UnboundedReceiver<ReminderId>,
    pending: HashMap<ReminderId, PendingReminder>,
    clock: Arc<dyn Clock>,
    urgency: Urgency,
    sound_enabled: bool,
}

impl NotifierActor {
    pub fn new(
        clock: Arc<dyn Clock>,
        urgency: NotificationUrgency,
        sound_enabled: bool,
    ) -> (Self, NotifierHandle) {
        let (sender, receiver) = mpsc::channel(32);
        let (fired_sender, fired_receiver) = mpsc::unbounded_channel();

        let urgency = match urgency {
            NotificationUrgency::Low => Urgency::Low,
            NotificationUrgency::Normal => Urgency::Normal,
            NotificationUrgency::Critical => Urgency::Critical,
        };

        let actor = Self {
            receiver,
            fired_sender,
            fired_receiver,
            pending: HashMap::new(),
            clock,
            urgency,
            sound_enabled,
        };

        let handle = NotifierHandle { sender };

        (actor, handle)
    }

    pub async fn run(mut self) {
        info!("notifier actor started");

        loop {
            tokio::select! {
                message = self.receiver.recv() => {
                    match message {
                        Some(message) => self.handle_message(message),
                        None => break,
                    }
                }
                Some(id) = self.fired_receiver.recv() => {
                    self.deliver(id);
                }
            }
        }

        for (_, reminder) in self.pending.drain() {
            reminder.countdown.abort();
        }
        debug!("notifier actor stopped");
    }

    fn handle_message(&mut self, message: NotifierMessage) {
        match message {
            NotifierMessage::Schedule { reminder, reply } => {
                let id = reminder.id;
                self.schedule(reminder);
                let _ = reply.send(ScheduleResult { ids: vec![id] });
            }
            NotifierMessage::Pending { reply } => {
                let mut ids: Vec<ReminderId> = self.pending.keys().copied().collect();
                ids.sort_unstable();
                let _ = reply.send(ids);
            }
            NotifierMessage::Cancel { ids, reply } => {
                for id in ids {
                    if let Some(reminder) = self.pending.remove(&id) {
                        reminder.countdown.abort();
                        debug!(id, "reminder cancelled");
                    }
                }
                let _ = reply.send(());
            }
        }
    }

    fn schedule(&mut self, reminder: ScheduledReminder) {
        // Reminders already due fire right away.
        let delay = (reminder.at - self.clock.now())
            .to_std()
            .unwrap_or_default();

        let id = reminder.id;
        let fired_sender = self.fired_sender.clone();
        let countdown = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = fired_sender.send(id);
        });

        debug!(id, delay_seconds = delay.as_secs(), "reminder scheduled");

        let previous = self.pending.insert(
            id,
            PendingReminder {
                title: reminder.title,
                body: reminder.body,
                countdown,
            },
        );
        if let Some(previous) = previous {
            previous.countdown.abort();
        }
    }

    fn deliver(&mut self, id: ReminderId) {
        let Some(reminder) = self.pending.remove(&id) else {
            return;
        };

        match self.build_notification(&reminder.title, &reminder.body).show() {
            Ok(_) => {
                debug!(id, "reminder notification sent");
            }
            Err(error) => {
                warn!(%error, id, "failed to show reminder notification");
            }
        }
    }

    fn build_notification(&self, summary: &str, body: &str) -> Notification {
        let mut notification = Notification::new();
        notification
            .summary(summary)
            .body(body)
            .urgency(self.urgency)
            .appname("Tomate");

        if self.sound_enabled {
            notification.sound_name("message-new-instant");
        }

        notification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use std::time::Duration;
    use tomate_adapters::ManualClock;

    fn create_test_actor() -> (NotifierHandle, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let (actor, handle) = NotifierActor::new(clock.clone(), NotificationUrgency::Normal, false);
        tokio::spawn(actor.run());
        (handle, clock)
    }

    fn reminder(id: ReminderId, clock: &ManualClock, in_minutes: i64) -> ScheduledReminder {
        ScheduledReminder {
            id,
            title: "Pomodoro".to_string(),
            body: "Time to have a break".to_string(),
            at: clock.now() + ChronoDuration::minutes(in_minutes),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn scheduled_reminders_stay_pending_until_due() {
        let (handle, clock) = create_test_actor();

        let result = handle.schedule(reminder(0, &clock, 5)).await.unwrap();
        handle.schedule(reminder(1, &clock, 25)).await.unwrap();

        assert_eq!(result.ids, vec![0]);
        assert_eq!(handle.pending().await.unwrap(), vec![0, 1]);

        tokio::time::sleep(Duration::from_secs(6 * 60)).await;

        assert_eq!(handle.pending().await.unwrap(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn overdue_reminder_fires_immediately() {
        let (handle, clock) = create_test_actor();

        handle.schedule(reminder(3, &clock, -2)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(handle.pending().await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_reminders() {
        let (handle, clock) = create_test_actor();
        handle.schedule(reminder(0, &clock, 5)).await.unwrap();
        handle.schedule(reminder(1, &clock, 5)).await.unwrap();

        handle.cancel(&[0, 1, 42]).await.unwrap();

        assert!(handle.pending().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn desktop_permission_is_always_granted() {
        let (handle, _clock) = create_test_actor();

        assert_eq!(
            handle.check_permissions().await.unwrap(),
            PermissionState::Granted
        );
    }

    #[tokio::test]
    async fn stopped_actor_reports_unavailable() {
        let clock = Arc::new(ManualClock::new());
        let (actor, handle) = NotifierActor::new(clock, NotificationUrgency::Low, false);
        drop(actor);

        let result = handle.pending().await;

        assert!(matches!(result, Err(NotificationError::Unavailable { .. })));
    }
}
