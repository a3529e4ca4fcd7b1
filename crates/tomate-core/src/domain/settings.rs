use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("task time must be at least one minute")]
    ZeroTaskTime,

    #[error("break time must be at least one minute")]
    ZeroBreakTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PomodoroSettings {
    pub task_time_minutes: u32,
    pub break_time_minutes: u32,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            task_time_minutes: 25,
            break_time_minutes: 5,
        }
    }
}

impl PomodoroSettings {
    pub fn new(task_time_minutes: u32, break_time_minutes: u32) -> Result<Self, SettingsError> {
        let settings = Self {
            task_time_minutes,
            break_time_minutes,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.task_time_minutes == 0 {
            return Err(SettingsError::ZeroTaskTime);
        }
        if self.break_time_minutes == 0 {
            return Err(SettingsError::ZeroBreakTime);
        }
        Ok(())
    }

    pub fn task_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.task_time_minutes))
    }

    pub fn break_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.break_time_minutes))
    }

    /// Break of the last sprint: break time plus task time.
    pub fn long_break_duration(&self) -> Duration {
        self.break_duration() + self.task_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_classic_pomodoro() {
        let settings = PomodoroSettings::default();

        assert_eq!(settings.task_time_minutes, 25);
        assert_eq!(settings.break_time_minutes, 5);
        assert_eq!(settings.long_break_duration(), Duration::minutes(30));
    }

    #[test]
    fn rejects_zero_durations() {
        assert_eq!(PomodoroSettings::new(0, 5), Err(SettingsError::ZeroTaskTime));
        assert_eq!(PomodoroSettings::new(25, 0), Err(SettingsError::ZeroBreakTime));
        assert!(PomodoroSettings::new(50, 10).is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings: PomodoroSettings = toml::from_str("task_time_minutes = 45").unwrap();

        assert_eq!(settings.task_time_minutes, 45);
        assert_eq!(settings.break_time_minutes, 5);
    }
}
