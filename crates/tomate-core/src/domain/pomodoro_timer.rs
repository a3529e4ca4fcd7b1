//! Pomodoro timer state machine.
//!
//! A loop consists of four sprints. Sprints 0 to 2 are a task followed by a
//! break; sprint 3 is a task followed by a long break lasting task time plus
//! break time. After sprint 3 the loop starts over.
//!
//! ```text
//! Ready --start--> Running --pause--> Paused --resume--> Running
//!   ^                 |                  |
//!   +------stop-------+-------stop-------+
//! ```
//!
//! Only the stage end timestamp and the pause start timestamp are stored; the
//! remaining time is recomputed from the clock on every read. Stages never
//! advance on their own: the driver calls `advance_stage` once the countdown
//! reached zero.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::{PomodoroSettings, Sprint, Stage, TimerEvent, TimerStatus, TimingInfo};
use crate::ports::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// The precondition did not hold and nothing changed.
    Ignored,
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CommandOutcome::Applied)
    }
}

pub struct PomodoroTimer {
    clock: Arc<dyn Clock>,
    settings: PomodoroSettings,
    status: TimerStatus,
    stage: Stage,
    sprint: Sprint,
    stage_end: DateTime<Utc>,
    /// Only read while paused.
    pause_start: Option<DateTime<Utc>>,
}

impl PomodoroTimer {
    pub fn new(settings: PomodoroSettings, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        Self {
            stage_end: now + settings.task_duration(),
            pause_start: Some(now),
            clock,
            settings,
            status: TimerStatus::Ready,
            stage: Stage::Task,
            sprint: Sprint::FIRST,
        }
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn sprint(&self) -> Sprint {
        self.sprint
    }

    pub fn settings(&self) -> &PomodoroSettings {
        &self.settings
    }

    pub fn stage_end(&self) -> DateTime<Utc> {
        self.stage_end
    }

    pub fn timing_info(&self) -> TimingInfo {
        TimingInfo {
            delta_seconds: self.delta_seconds(),
            stage: self.stage,
            sprint: self.sprint,
        }
    }

    /// Seconds until the current stage ends, frozen while paused.
    pub fn delta_seconds(&self) -> i64 {
        let now = self.clock.now();
        let mut remaining = self.stage_end - now;

        if self.status == TimerStatus::Paused {
            if let Some(pause_start) = self.pause_start {
                remaining = remaining + (now - pause_start);
            }
        }

        round_to_seconds(remaining)
    }

    pub fn start(&mut self) -> CommandOutcome {
        if self.status != TimerStatus::Ready {
            return CommandOutcome::Ignored;
        }

        self.stage_end = self.clock.now() + self.settings.task_duration();
        self.pause_start = None;
        self.sprint = Sprint::FIRST;
        self.stage = Stage::Task;
        self.status = TimerStatus::Running;
        CommandOutcome::Applied
    }

    pub fn pause(&mut self) -> CommandOutcome {
        if self.status != TimerStatus::Running {
            return CommandOutcome::Ignored;
        }

        self.pause_start = Some(self.clock.now());
        self.status = TimerStatus::Paused;
        CommandOutcome::Applied
    }

    /// Continues a paused countdown, shifting the stage end by the pause length.
    pub fn resume(&mut self) -> CommandOutcome {
        if self.status != TimerStatus::Paused {
            return CommandOutcome::Ignored;
        }

        let now = self.clock.now();
        let paused_for = now - self.pause_start.take().unwrap_or(now);
        self.stage_end = self.stage_end + paused_for;
        self.status = TimerStatus::Running;
        CommandOutcome::Applied
    }

    pub fn stop(&mut self) -> CommandOutcome {
        if self.status == TimerStatus::Ready {
            return CommandOutcome::Ignored;
        }

        self.reset_to_first_task();
        self.status = TimerStatus::Ready;
        CommandOutcome::Applied
    }

    /// Moves to the next stage once the current one has elapsed.
    ///
    /// Returns the emitted events in order; empty when the command is ignored.
    pub fn advance_stage(&mut self) -> Vec<TimerEvent> {
        let finished = self.timing_info();

        if self.status == TimerStatus::Ready || !finished.is_elapsed() {
            return Vec::new();
        }

        let now = self.clock.now();
        let mut events = vec![TimerEvent::StageChanged(finished)];

        match self.stage {
            Stage::Break => {
                self.stage_end = now + self.settings.task_duration();
                self.sprint = self.sprint.next();

                events.push(TimerEvent::SprintChanged(finished));
                if self.sprint.is_first() {
                    events.push(TimerEvent::LoopFinished(finished));
                }
            }
            Stage::Task => {
                let duration = if self.sprint.is_last() {
                    self.settings.long_break_duration()
                } else {
                    self.settings.break_duration()
                };
                self.stage_end = now + duration;
            }
        }
        self.stage = self.stage.next();

        if self.status == TimerStatus::Paused {
            self.pause_start = Some(now);
        }

        events
    }

    /// Replaces the settings and discards any timing in progress.
    ///
    /// Returns the outcome of the implied `stop`, which tells whether the
    /// status changed.
    pub fn apply_settings(&mut self, settings: PomodoroSettings) -> CommandOutcome {
        let outcome = self.stop();
        self.settings = settings;
        self.reset_to_first_task();
        outcome
    }

    fn reset_to_first_task(&mut self) {
        let now = self.clock.now();
        self.stage_end = now + self.settings.task_duration();
        self.pause_start = Some(now);
        self.sprint = Sprint::FIRST;
        self.stage = Stage::Task;
    }
}

/// Rounds to the nearest second, halves towards positive infinity.
fn round_to_seconds(duration: Duration) -> i64 {
    (duration.num_milliseconds() + 500).div_euclid(1000)
}
