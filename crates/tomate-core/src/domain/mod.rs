mod pomodoro_timer;
mod settings;
mod sprint;
mod stage;
mod timer_status;
mod timer_view;
mod timing_info;

pub use pomodoro_timer::{CommandOutcome, PomodoroTimer};
pub use settings::{PomodoroSettings, SettingsError};
pub use sprint::{InvalidSprint, Sprint};
pub use stage::Stage;
pub use timer_status::TimerStatus;
pub use timer_view::{format_delta, TimerView};
pub use timing_info::{TimerEvent, TimingInfo};
