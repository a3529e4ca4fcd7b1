//! Keeps desktop reminders in step with the timer.
//!
//! A stage change or a switch to running schedules one reminder at the end
//! of the current stage, after a short debounce so bursts of transitions
//! collapse into a single reminder. Pausing or resetting cancels whatever
//! is still pending.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::time::Instant;
use tracing::{debug, warn};

use tomate_core::{Clock, NotificationService, Stage, TimerEvent, TimerStatus, Translator};

use super::TimerHandle;

pub const REMINDER_DEBOUNCE: Duration = Duration::from_millis(100);

pub struct ReminderCoordinator {
    timer: TimerHandle,
    notifications: Arc<NotificationService>,
    translator: Translator,
    clock: Arc<dyn Clock>,
}

impl ReminderCoordinator {
    pub fn new(
        timer: TimerHandle,
        notifications: Arc<NotificationService>,
        translator: Translator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            timer,
            notifications,
            translator,
            clock,
        }
    }

    pub async fn run(self) {
        let mut events = self.timer.subscribe_events();
        let mut status = self.timer.watch_status();

        let debounce = tokio::time::sleep(REMINDER_DEBOUNCE);
        tokio::pin!(debounce);
        let mut armed = false;

        loop {
            tokio::select! {
                event = events.recv() => {
                    match event {
                        Ok(event) => {
                            if let TimerEvent::StageChanged(_) = event {
                                debounce.as_mut().reset(Instant::now() + REMINDER_DEBOUNCE);
                                armed = true;
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "reminder coordinator lagged behind timer events");
                            debounce.as_mut().reset(Instant::now() + REMINDER_DEBOUNCE);
                            armed = true;
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
                changed = status.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let current = *status.borrow_and_update();
                    match current {
                        TimerStatus::Running => {
                            debounce.as_mut().reset(Instant::now() + REMINDER_DEBOUNCE);
                            armed = true;
                        }
                        TimerStatus::Paused | TimerStatus::Ready => {
                            armed = false;
                            self.cancel_pending().await;
                        }
                    }
                }
                () = &mut debounce, if armed => {
                    armed = false;
                    self.schedule_stage_end().await;
                }
            }
        }

        debug!("reminder coordinator stopped");
    }

    async fn schedule_stage_end(&self) {
        let Some(view) = self.timer.get_view().await else {
            return;
        };
        // A paused stage change is picked up again on resume.
        if view.status != TimerStatus::Running {
            return;
        }

        let remaining = view.timing.delta_seconds.max(0);
        let at = self.clock.now() + chrono::Duration::seconds(remaining);
        let body = match view.timing.stage {
            Stage::Break => self.translator.get("reminder.task_next"),
            Stage::Task => self.translator.get("reminder.break_next"),
        };

        match self
            .notifications
            .schedule(&self.translator.get("reminder.title"), &body, at)
            .await
        {
            Ok(result) => debug!(ids = ?result.ids, %at, "stage end reminder scheduled"),
            Err(error) => warn!(%error, "failed to schedule stage end reminder"),
        }
    }

    async fn cancel_pending(&self) {
        let ids = match self.notifications.pending_ids().await {
            Ok(ids) => ids,
            Err(error) => {
                warn!(%error, "failed to list pending reminders");
                return;
            }
        };
        if ids.is_empty() {
            return;
        }

        if let Err(error) = self.notifications.cancel(&ids).await {
            warn!(%error, "failed to cancel pending reminders");
        }
    }
}
