//! Daily-switch service: the poll loop.
//!
//! [`DailySwitchService`] owns the time source, the output and the delay,
//! but not the daily state: [`TriggerState`] is passed into and returned
//! from every [`poll_once`](DailySwitchService::poll_once).
//!
//! ```text
//!  TimeSource ──▶ ┌──────────────────────┐ ──▶ EventSink
//!                 │  DailySwitchService  │
//!  OutputPort ◀── │  trigger::step       │
//!                 └──────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::info;

use crate::clock::TimeOfDay;
use crate::config::{ActionMode, AppConfig, TimeSettings, TimingConfig};
use crate::trigger::{self, DailySchedule, Transition, TriggerState};
use crate::wait::CancelToken;

use super::events::AppEvent;
use super::ports::{EventSink, OutputPort, TimeSource};
use super::timesync;

/// What one poll did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Clock read, no edge.
    Idle,
    /// Clock read and the action ran.
    Fired,
    /// Clock read and the daily state was cleared.
    Reset,
    /// Clock read failed; resynchronisation ran (successfully or not).
    Resynced { ok: bool },
    /// An output write failed; see [`AppEvent::OutputFailed`].
    OutputFailed,
}

pub struct DailySwitchService<T, O, D> {
    time: T,
    output: O,
    delay: D,
    schedule: DailySchedule,
    action: ActionMode,
    time_settings: TimeSettings,
    timing: TimingConfig,
    cancel: CancelToken,
}

impl<T, O, D> DailySwitchService<T, O, D>
where
    T: TimeSource,
    O: OutputPort,
    D: DelayNs,
{
    pub fn new(config: &AppConfig, time: T, output: O, delay: D, cancel: CancelToken) -> Self {
        Self {
            time,
            output,
            delay,
            schedule: DailySchedule::from(&config.schedule),
            action: config.schedule.action,
            time_settings: config.time.clone(),
            timing: config.timing,
            cancel,
        }
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn time_source_mut(&mut self) -> &mut T {
        &mut self.time
    }

    /// Run one iteration: read the clock, evaluate the trigger, drive the pin.
    ///
    /// A failed clock read resynchronises and leaves `state` untouched. A
    /// failed edge write also leaves `state` untouched, so the edge is
    /// retried on the next poll within the same minute. In pulse mode a
    /// pin left high by a failed trailing write is driven low again on
    /// every following poll until the write succeeds.
    pub fn poll_once<S: EventSink>(
        &mut self,
        state: TriggerState,
        sink: &mut S,
    ) -> (TriggerState, PollOutcome) {
        let Some(now) = self.time.now() else {
            sink.emit(&AppEvent::ClockReadFailed);
            let ok = timesync::synchronize(
                &mut self.time,
                &self.time_settings,
                &self.timing,
                &mut self.delay,
                &self.cancel,
                sink,
            )
            .is_ok();
            return (state, PollOutcome::Resynced { ok });
        };
        sink.emit(&AppEvent::ClockReading(now));

        let at = now.time_of_day();
        let step = trigger::step(state, at, &self.schedule);
        match step.transition {
            Some(Transition::Fire) => self.fire(state, step.next, at, sink),
            Some(Transition::Reset) => match self.output.set_level(false) {
                Ok(()) => {
                    sink.emit(&AppEvent::Reset { at });
                    (step.next, PollOutcome::Reset)
                }
                Err(e) => {
                    sink.emit(&AppEvent::OutputFailed(e));
                    (state, PollOutcome::OutputFailed)
                }
            },
            None if self.pulse_left_high(step.next) => (step.next, self.end_pulse(sink)),
            None => (step.next, PollOutcome::Idle),
        }
    }

    /// Poll every `poll_interval_ms` until cancelled. Returns the last state.
    pub fn run<S: EventSink>(&mut self, initial: TriggerState, sink: &mut S) -> TriggerState {
        let mut state = initial;
        while !self.cancel.is_cancelled() {
            state = self.poll_once(state, sink).0;
            if self.cancel.is_cancelled() {
                break;
            }
            self.delay.delay_ms(self.timing.poll_interval_ms);
        }
        info!("Loop: cancelled in state {:?}", state);
        state
    }

    /// Raise the output and, in pulse mode, drop it again.
    ///
    /// Once the rising edge is written the day counts as triggered, even if
    /// the trailing low write fails; that write is retried by later polls.
    fn fire<S: EventSink>(
        &mut self,
        state: TriggerState,
        next: TriggerState,
        at: TimeOfDay,
        sink: &mut S,
    ) -> (TriggerState, PollOutcome) {
        if let Err(e) = self.output.set_level(true) {
            sink.emit(&AppEvent::OutputFailed(e));
            return (state, PollOutcome::OutputFailed);
        }
        let lowered = match self.action {
            ActionMode::Level => Ok(()),
            ActionMode::Pulse { duration_ms } => {
                self.delay.delay_ms(duration_ms);
                self.output.set_level(false)
            }
        };
        sink.emit(&AppEvent::Triggered { at, mode: self.action });

        match lowered {
            Ok(()) => (next, PollOutcome::Fired),
            Err(e) => {
                sink.emit(&AppEvent::OutputFailed(e));
                (next, PollOutcome::OutputFailed)
            }
        }
    }

    fn pulse_left_high(&self, state: TriggerState) -> bool {
        matches!(self.action, ActionMode::Pulse { .. })
            && state.is_triggered()
            && self.output.is_high()
    }

    fn end_pulse<S: EventSink>(&mut self, sink: &mut S) -> PollOutcome {
        match self.output.set_level(false) {
            Ok(()) => PollOutcome::Idle,
            Err(e) => {
                sink.emit(&AppEvent::OutputFailed(e));
                PollOutcome::OutputFailed
            }
        }
    }
}
