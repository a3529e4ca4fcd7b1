use serde::{Deserialize, Serialize};

use super::{Sprint, Stage};

/// Snapshot of the countdown, always derived from the stored timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingInfo {
    /// Seconds until the stage ends. Negative once the stage ran over.
    pub delta_seconds: i64,
    pub stage: Stage,
    pub sprint: Sprint,
}

impl TimingInfo {
    pub fn is_overflow(&self) -> bool {
        self.delta_seconds < 0
    }

    pub fn is_elapsed(&self) -> bool {
        self.delta_seconds <= 0
    }
}

/// Discrete transitions produced by `PomodoroTimer::advance_stage`.
///
/// Every variant carries the timing of the stage that just finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    StageChanged(TimingInfo),
    SprintChanged(TimingInfo),
    LoopFinished(TimingInfo),
}

impl TimerEvent {
    pub fn timing(&self) -> &TimingInfo {
        match self {
            TimerEvent::StageChanged(timing)
            | TimerEvent::SprintChanged(timing)
            | TimerEvent::LoopFinished(timing) => timing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing(delta_seconds: i64) -> TimingInfo {
        TimingInfo {
            delta_seconds,
            stage: Stage::Task,
            sprint: Sprint::FIRST,
        }
    }

    #[test]
    fn zero_delta_is_elapsed_but_not_overflow() {
        assert!(timing(0).is_elapsed());
        assert!(!timing(0).is_overflow());
    }

    #[test]
    fn negative_delta_is_overflow() {
        assert!(timing(-1).is_overflow());
        assert!(!timing(1).is_elapsed());
    }
}
