//! Daily trigger state machine.
//!
//! Two latched states per day:
//!
//! ```text
//!            now == target                 now == reset
//!  Pending ─────────────────▶ Triggered ─────────────────▶ Pending
//!            (raise output)               (lower output)
//! ```
//!
//! The state is a plain value owned by whoever runs the loop. [`step`] takes
//! the current state and returns the next one; there is no hidden flag.
//! Comparison is exact-minute, so a poll that skips the target or reset
//! minute entirely misses it for the day.

use crate::clock::TimeOfDay;
use crate::config::ScheduleConfig;

/// Whether today's action has already run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerState {
    /// Not yet triggered since the last reset (or boot).
    #[default]
    Pending,
    /// Triggered; stays here until the reset minute.
    Triggered,
}

impl TriggerState {
    pub fn is_triggered(self) -> bool {
        self == Self::Triggered
    }
}

/// Edge produced by a [`step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// `Pending → Triggered`: run the action.
    Fire,
    /// `Triggered → Pending`: drive the output low.
    Reset,
}

/// Result of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub next: TriggerState,
    pub transition: Option<Transition>,
}

/// The two instants the machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    pub target: TimeOfDay,
    pub reset: TimeOfDay,
}

impl From<&ScheduleConfig> for DailySchedule {
    fn from(c: &ScheduleConfig) -> Self {
        Self { target: c.target, reset: c.reset }
    }
}

/// Evaluate one poll.
pub fn step(state: TriggerState, now: TimeOfDay, schedule: &DailySchedule) -> Step {
    match state {
        TriggerState::Pending if now == schedule.target => Step {
            next: TriggerState::Triggered,
            transition: Some(Transition::Fire),
        },
        TriggerState::Triggered if now == schedule.reset => Step {
            next: TriggerState::Pending,
            transition: Some(Transition::Reset),
        },
        _ => Step { next: state, transition: None },
    }
}
