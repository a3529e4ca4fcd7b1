//! Tomate core library
//!
//! Contains the pomodoro timer state machine, its value types, the reminder
//! scheduling service and the port definitions (traits) it relies on.
//! This crate has no knowledge of infrastructure concerns.

pub mod config;
pub mod domain;
pub mod i18n;
pub mod notification_service;
pub mod ports;

pub use config::{Config, ConfigError, GeneralConfig, NotificationConfig, NotificationUrgency};
pub use domain::{
    format_delta, CommandOutcome, PomodoroSettings, PomodoroTimer, SettingsError, Sprint, Stage,
    TimerEvent, TimerStatus, TimerView, TimingInfo,
};
pub use i18n::{Language, Translator};
pub use notification_service::NotificationService;
pub use ports::{
    Clock, NotificationError, PermissionState, ReminderId, ReminderPlatform, ScheduleResult,
    ScheduledReminder,
};
