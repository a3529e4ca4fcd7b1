//! Tomate protocol definitions for CLI-daemon communication
//!
//! Messages travel over a local socket as a little-endian `u32` length
//! followed by the bincode payload, one request per connection.

mod framing;

use serde::{Deserialize, Serialize};

pub use framing::{default_socket_path, read_frame, write_frame, FrameError, MAX_FRAME_LENGTH};

pub use tomate_core::{PomodoroSettings, Sprint, Stage, TimerStatus, TimerView, TimingInfo};

/// Requests sent from CLI to daemon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Request {
    /// Start the first task of a loop (ready only)
    Start,
    /// Freeze the countdown (running only)
    Pause,
    /// Continue a frozen countdown (paused only)
    Resume,
    /// Reset to a fresh first task
    Stop,
    /// Move to the next stage once the current one has elapsed
    AdvanceStage,
    /// Get the current timer view
    GetStatus,
    /// Get the applied pomodoro settings
    GetSettings,
    /// Replace the pomodoro settings, discarding timing in progress
    UpdateSettings {
        task_time_minutes: u32,
        break_time_minutes: u32,
    },
    /// Ping the daemon to check if it's alive
    Ping,
}

/// Responses sent from daemon to CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Response {
    /// Current timer view
    Status(TimerView),
    /// Applied pomodoro settings
    Settings(PomodoroSettings),
    /// Generic success acknowledgment; ignored commands answer this too
    Ok,
    /// Error response with message
    Error { message: String },
    /// Pong response to ping
    Pong,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_update_settings_serialization() {
        let request = Request::UpdateSettings {
            task_time_minutes: 50,
            break_time_minutes: 10,
        };

        let bytes = bincode::serialize(&request).unwrap();
        let decoded: Request = bincode::deserialize(&bytes).unwrap();

        assert_eq!(request, decoded);
    }

    #[test]
    fn response_status_serialization() {
        let timing = TimingInfo {
            delta_seconds: -65,
            stage: Stage::Break,
            sprint: Sprint::LAST,
        };
        let response = Response::Status(TimerView::new(timing, TimerStatus::Paused));

        let bytes = bincode::serialize(&response).unwrap();
        let decoded: Response = bincode::deserialize(&bytes).unwrap();

        assert_eq!(response, decoded);
        match decoded {
            Response::Status(view) => {
                assert!(view.overflow);
                assert_eq!(view.formatted, "01:05");
                assert_eq!(view.timing.sprint, Sprint::LAST);
            }
            other => panic!("expected status, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_sprint_is_rejected_on_decode() {
        let timing = TimingInfo {
            delta_seconds: 10,
            stage: Stage::Task,
            sprint: Sprint::FIRST,
        };
        let mut bytes = bincode::serialize(&timing).unwrap();
        let sprint_offset = bytes.len() - 1;
        bytes[sprint_offset] = 9;

        let decoded: Result<TimingInfo, _> = bincode::deserialize(&bytes);

        assert!(decoded.is_err());
    }
}
