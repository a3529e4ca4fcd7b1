use std::sync::Arc;

use tokio::sync::watch;
use tomate_core::{PomodoroSettings, SettingsError};

/// Shared, observable pomodoro settings owned by the composition root.
#[derive(Clone)]
pub struct SettingsHandle {
    sender: Arc<watch::Sender<PomodoroSettings>>,
}

impl SettingsHandle {
    pub fn new(initial: PomodoroSettings) -> (Self, watch::Receiver<PomodoroSettings>) {
        let (sender, receiver) = watch::channel(initial);
        (
            Self {
                sender: Arc::new(sender),
            },
            receiver,
        )
    }

    pub fn current(&self) -> PomodoroSettings {
        *self.sender.borrow()
    }

    /// Publishes new settings. Returns whether the value actually changed.
    pub fn update(&self, settings: PomodoroSettings) -> Result<bool, SettingsError> {
        settings.validate()?;

        Ok(self.sender.send_if_modified(|current| {
            if *current == settings {
                return false;
            }
            *current = settings;
            true
        }))
    }
}
