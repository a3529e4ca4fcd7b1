use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use tomate_core::{
    Clock, PomodoroSettings, PomodoroTimer, TimerEvent, TimerStatus, TimerView, TimingInfo,
};

pub const TICK_PERIOD: Duration = Duration::from_millis(250);

const TICK_CAPACITY: usize = 16;
const EVENT_CAPACITY: usize = 32;

pub enum TimerMessage {
    Start,
    Pause,
    Resume,
    Stop,
    AdvanceStage,
    GetView { reply: oneshot::Sender<TimerView> },
}

pub struct TimerActor {
    receiver: mpsc::Receiver<TimerMessage>,
    timer: PomodoroTimer,
    settings: watch::Receiver<PomodoroSettings>,
    status_sender: watch::Sender<TimerStatus>,
    tick_sender: broadcast::Sender<TimingInfo>,
    event_sender: broadcast::Sender<TimerEvent>,
}

/// Command side and stream side of the timer.
///
/// Ticks and transition events are not replayed to late subscribers; the
/// status stream always holds the latest value.
#[derive(Clone)]
pub struct TimerHandle {
    sender: mpsc::Sender<TimerMessage>,
    status: watch::Receiver<TimerStatus>,
    tick_sender: broadcast::Sender<TimingInfo>,
    event_sender: broadcast::Sender<TimerEvent>,
}

impl TimerHandle {
    pub async fn start(&self) -> Result<(), mpsc::error::SendError<TimerMessage>> {
        self.sender.send(TimerMessage::Start).await
    }

    pub async fn pause(&self) -> Result<(), mpsc::error::SendError<TimerMessage>> {
        self.sender.send(TimerMessage::Pause).await
    }

    pub async fn resume(&self) -> Result<(), mpsc::error::SendError<TimerMessage>> {
        self.sender.send(TimerMessage::Resume).await
    }

    pub async fn stop(&self) -> Result<(), mpsc::error::SendError<TimerMessage>> {
        self.sender.send(TimerMessage::Stop).await
    }

    pub async fn advance_stage(&self) -> Result<(), mpsc::error::SendError<TimerMessage>> {
        self.sender.send(TimerMessage::AdvanceStage).await
    }

    pub async fn get_view(&self) -> Option<TimerView> {
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender
            .send(TimerMessage::GetView {
                reply: reply_sender,
            })
            .await
            .ok()?;
        reply_receiver.await.ok()
    }

    pub fn status(&self) -> TimerStatus {
        *self.status.borrow()
    }

    pub fn watch_status(&self) -> watch::Receiver<TimerStatus> {
        self.status.clone()
    }

    pub fn subscribe_ticks(&self) -> broadcast::Receiver<TimingInfo> {
        self.tick_sender.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_sender.subscribe()
    }
}

impl TimerActor {
    pub fn new(
        mut settings: watch::Receiver<PomodoroSettings>,
        clock: Arc<dyn Clock>,
    ) -> (Self, TimerHandle) {
        let (sender, receiver) = mpsc::channel(32);
        let (status_sender, status) = watch::channel(TimerStatus::Ready);
        let (tick_sender, _) = broadcast::channel(TICK_CAPACITY);
        let (event_sender, _) = broadcast::channel(EVENT_CAPACITY);

        let initial = *settings.borrow_and_update();
        let timer = PomodoroTimer::new(initial, clock);

        let handle = TimerHandle {
            sender,
            status,
            tick_sender: tick_sender.clone(),
            event_sender: event_sender.clone(),
        };

        let actor = Self {
            receiver,
            timer,
            settings,
            status_sender,
            tick_sender,
            event_sender,
        };

        (actor, handle)
    }

    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(TICK_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut settings_open = true;

        loop {
            tokio::select! {
                message = self.receiver.recv() => {
                    match message {
                        Some(message) => self.handle_message(message),
                        None => break,
                    }
                }
                changed = self.settings.changed(), if settings_open => {
                    if changed.is_ok() {
                        let settings = *self.settings.borrow_and_update();
                        self.apply_settings(settings);
                    } else {
                        debug!("settings source dropped, keeping applied settings");
                        settings_open = false;
                    }
                }
                _ = ticker.tick() => {
                    self.publish_tick();
                }
            }
        }

        debug!("timer actor stopped");
    }

    fn handle_message(&mut self, message: TimerMessage) {
        match message {
            TimerMessage::Start => {
                if self.timer.start().is_applied() {
                    info!(task_minutes = self.timer.settings().task_time_minutes, "timer started");
                    self.publish_status();
                }
            }
            TimerMessage::Pause => {
                if self.timer.pause().is_applied() {
                    info!(remaining = self.timer.delta_seconds(), "timer paused");
                    self.publish_status();
                }
            }
            TimerMessage::Resume => {
                if self.timer.resume().is_applied() {
                    info!(remaining = self.timer.delta_seconds(), "timer resumed");
                    self.publish_status();
                }
            }
            TimerMessage::Stop => {
                if self.timer.stop().is_applied() {
                    info!("timer stopped");
                    self.publish_status();
                }
            }
            TimerMessage::AdvanceStage => {
                let events = self.timer.advance_stage();
                if events.is_empty() {
                    debug!(status = %self.timer.status(), "advance ignored");
                    return;
                }

                info!(
                    stage = %self.timer.stage(),
                    sprint = %self.timer.sprint(),
                    "stage advanced"
                );
                for event in events {
                    debug!(?event, overrun_seconds = -event.timing().delta_seconds, "timer event");
                    if let TimerEvent::LoopFinished(_) = event {
                        info!("pomodoro loop finished");
                    }
                    let _ = self.event_sender.send(event);
                }
            }
            TimerMessage::GetView { reply } => {
                let _ = reply.send(self.current_view());
            }
        }
    }

    fn apply_settings(&mut self, settings: PomodoroSettings) {
        let outcome = self.timer.apply_settings(settings);
        info!(
            task_minutes = settings.task_time_minutes,
            break_minutes = settings.break_time_minutes,
            "settings applied, timer reset"
        );
        if outcome.is_applied() {
            self.publish_status();
        }
    }

    fn publish_status(&self) {
        self.status_sender.send_replace(self.timer.status());
    }

    fn publish_tick(&self) {
        if self.timer.status() != TimerStatus::Running {
            return;
        }
        // No subscriber is not an error.
        let _ = self.tick_sender.send(self.timer.timing_info());
    }

    fn current_view(&self) -> TimerView {
        TimerView::new(self.timer.timing_info(), self.timer.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsHandle;
    use chrono::Duration as ChronoDuration;
    use tomate_adapters::ManualClock;
    use tomate_core::{Sprint, Stage};

    fn create_test_actor() -> (TimerHandle, SettingsHandle, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let (settings, settings_receiver) = SettingsHandle::new(PomodoroSettings::default());
        let (actor, handle) = TimerActor::new(settings_receiver, clock.clone());
        tokio::spawn(actor.run());
        (handle, settings, clock)
    }

    #[tokio::test(start_paused = true)]
    async fn start_publishes_running_status() {
        let (handle, _settings, _clock) = create_test_actor();
        let mut status = handle.watch_status();

        handle.start().await.unwrap();
        status.changed().await.unwrap();

        assert_eq!(*status.borrow(), TimerStatus::Running);
        let view = handle.get_view().await.unwrap();
        assert_eq!(view.timing.delta_seconds, 25 * 60);
        assert_eq!(view.formatted, "25:00");
    }

    #[tokio::test(start_paused = true)]
    async fn ignored_commands_do_not_publish_status() {
        let (handle, _settings, _clock) = create_test_actor();
        let status = handle.watch_status();

        handle.pause().await.unwrap();
        handle.resume().await.unwrap();
        handle.stop().await.unwrap();
        handle.get_view().await.unwrap();

        assert!(!status.has_changed().unwrap());
        assert_eq!(handle.status(), TimerStatus::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_only_while_running() {
        let (handle, _settings, clock) = create_test_actor();
        let mut ticks = handle.subscribe_ticks();

        tokio::time::sleep(TICK_PERIOD * 4).await;
        assert!(ticks.try_recv().is_err());

        handle.start().await.unwrap();
        handle.get_view().await.unwrap();
        while ticks.try_recv().is_ok() {}
        clock.advance(ChronoDuration::seconds(3));
        let tick = ticks.recv().await.unwrap();
        assert_eq!(tick.delta_seconds, 25 * 60 - 3);

        handle.pause().await.unwrap();
        handle.get_view().await.unwrap();
        while ticks.try_recv().is_ok() {}

        tokio::time::sleep(TICK_PERIOD * 4).await;
        assert!(ticks.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn advance_publishes_transition_events() {
        let (handle, _settings, clock) = create_test_actor();
        let mut events = handle.subscribe_events();

        handle.start().await.unwrap();
        handle.get_view().await.unwrap();
        clock.advance(ChronoDuration::minutes(25));
        handle.advance_stage().await.unwrap();

        let event = events.recv().await.unwrap();
        assert!(matches!(event, TimerEvent::StageChanged(info) if info.stage == Stage::Task));

        let view = handle.get_view().await.unwrap();
        assert_eq!(view.timing.stage, Stage::Break);
        assert_eq!(view.timing.delta_seconds, 5 * 60);

        clock.advance(ChronoDuration::minutes(5));
        handle.advance_stage().await.unwrap();

        assert!(matches!(events.recv().await.unwrap(), TimerEvent::StageChanged(_)));
        assert!(matches!(
            events.recv().await.unwrap(),
            TimerEvent::SprintChanged(info) if info.sprint == Sprint::FIRST
        ));
        assert_eq!(handle.get_view().await.unwrap().timing.sprint.index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn early_advance_emits_nothing() {
        let (handle, _settings, clock) = create_test_actor();
        let mut events = handle.subscribe_events();

        handle.start().await.unwrap();
        handle.get_view().await.unwrap();
        clock.advance(ChronoDuration::minutes(10));
        handle.advance_stage().await.unwrap();
        handle.get_view().await.unwrap();

        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn settings_change_resets_running_timer() {
        let (handle, settings, clock) = create_test_actor();
        let mut status = handle.watch_status();

        handle.start().await.unwrap();
        status.changed().await.unwrap();
        clock.advance(ChronoDuration::minutes(7));

        settings
            .update(PomodoroSettings::new(50, 10).unwrap())
            .unwrap();
        status.changed().await.unwrap();

        assert_eq!(*status.borrow(), TimerStatus::Ready);
        let view = handle.get_view().await.unwrap();
        assert_eq!(view.timing.delta_seconds, 50 * 60);
        assert_eq!(view.timing.sprint, Sprint::FIRST);
        assert_eq!(view.timing.stage, Stage::Task);
    }
}
