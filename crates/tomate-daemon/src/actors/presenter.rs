use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tracing::{debug, warn};

use tomate_core::TimerView;

use super::TimerHandle;

/// Maintains the latest `TimerView` from the tick, status and transition streams.
pub struct Presenter {
    timer: TimerHandle,
    view_sender: watch::Sender<TimerView>,
}

impl Presenter {
    pub async fn new(timer: TimerHandle) -> Option<(Self, watch::Receiver<TimerView>)> {
        let initial = timer.get_view().await?;
        let (view_sender, view_receiver) = watch::channel(initial);

        Some((Self { timer, view_sender }, view_receiver))
    }

    pub async fn run(self) {
        let mut ticks = self.timer.subscribe_ticks();
        let mut events = self.timer.subscribe_events();
        let mut status = self.timer.watch_status();

        loop {
            tokio::select! {
                tick = ticks.recv() => {
                    match tick {
                        Ok(timing) => {
                            let view = TimerView::new(timing, *status.borrow());
                            self.view_sender.send_replace(view);
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "presenter skipped ticks");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
                event = events.recv() => {
                    if let Err(RecvError::Closed) = event {
                        break;
                    }
                    if !self.refresh().await {
                        break;
                    }
                }
                changed = status.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let _ = status.borrow_and_update();
                    if !self.refresh().await {
                        break;
                    }
                }
            }
        }

        debug!("presenter stopped");
    }

    async fn refresh(&self) -> bool {
        match self.timer.get_view().await {
            Some(view) => {
                self.view_sender.send_replace(view);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::TimerActor;
    use crate::settings::SettingsHandle;
    use chrono::Duration as ChronoDuration;
    use std::sync::Arc;
    use std::time::Duration;
    use tomate_adapters::ManualClock;
    use tomate_core::{PomodoroSettings, Stage, TimerStatus};

    async fn spawn_presenter() -> (TimerHandle, watch::Receiver<TimerView>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let (_settings, settings_receiver) = SettingsHandle::new(PomodoroSettings::new(1, 1).unwrap());
        let (actor, timer) = TimerActor::new(settings_receiver, clock.clone());
        tokio::spawn(actor.run());

        let (presenter, view) = Presenter::new(timer.clone()).await.unwrap();
        tokio::spawn(presenter.run());
        (timer, view, clock)
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(600)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn initial_view_is_ready_first_task() {
        let (_timer, view, _clock) = spawn_presenter().await;

        let view = view.borrow().clone();
        assert_eq!(view.status, TimerStatus::Ready);
        assert_eq!(view.formatted, "01:00");
        assert!(!view.overflow);
    }

    #[tokio::test(start_paused = true)]
    async fn view_follows_running_countdown_into_overflow() {
        let (timer, view, clock) = spawn_presenter().await;

        timer.start().await.unwrap();
        timer.get_view().await.unwrap();
        clock.advance(ChronoDuration::seconds(65 + 60));
        settle().await;

        let current = view.borrow().clone();
        assert_eq!(current.status, TimerStatus::Running);
        assert_eq!(current.timing.delta_seconds, -65);
        assert_eq!(current.formatted, "01:05");
        assert!(current.overflow);
    }

    #[tokio::test(start_paused = true)]
    async fn view_refreshes_on_stage_change() {
        let (timer, view, clock) = spawn_presenter().await;
        timer.start().await.unwrap();
        timer.get_view().await.unwrap();
        clock.advance(ChronoDuration::minutes(1));
        timer.pause().await.unwrap();

        timer.advance_stage().await.unwrap();
        settle().await;

        let current = view.borrow().clone();
        assert_eq!(current.status, TimerStatus::Paused);
        assert_eq!(current.timing.stage, Stage::Break);
        assert_eq!(current.formatted, "01:00");
    }
}
