use serde::{Deserialize, Serialize};

use super::{TimerStatus, TimingInfo};

/// What a front end renders: the timing snapshot plus derived display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerView {
    pub timing: TimingInfo,
    pub status: TimerStatus,
    pub overflow: bool,
    pub formatted: String,
}

impl TimerView {
    pub fn new(timing: TimingInfo, status: TimerStatus) -> Self {
        Self {
            overflow: timing.is_overflow(),
            formatted: format_delta(timing.delta_seconds),
            timing,
            status,
        }
    }
}

/// Formats a countdown as `mm:ss`, dropping the sign.
pub fn format_delta(delta_seconds: i64) -> String {
    let seconds = delta_seconds.unsigned_abs();
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Sprint, Stage};

    #[test]
    fn formats_overflow_without_sign() {
        assert_eq!(format_delta(-65), "01:05");
    }

    #[test]
    fn formats_zero_padded() {
        assert_eq!(format_delta(0), "00:00");
        assert_eq!(format_delta(9), "00:09");
        assert_eq!(format_delta(1500), "25:00");
    }

    #[test]
    fn minutes_are_not_capped() {
        assert_eq!(format_delta(6000), "100:00");
    }

    #[test]
    fn view_flags_overflow() {
        let timing = TimingInfo {
            delta_seconds: -3,
            stage: Stage::Break,
            sprint: Sprint::LAST,
        };

        let view = TimerView::new(timing, TimerStatus::Running);

        assert!(view.overflow);
        assert_eq!(view.formatted, "00:03");
        assert_eq!(view.status, TimerStatus::Running);
    }
}
