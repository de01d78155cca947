//! Mock adapters for integration tests.
//!
//! Each mock records what the domain asked of it so tests can assert on the
//! full history without a radio, an RTC or a GPIO.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::net::Ipv4Addr;
use std::rc::Rc;

use daily_switch::app::events::AppEvent;
use daily_switch::app::ports::{
    ConnectionState, ConnectivityPort, EventSink, OutputPort, TimeSource,
};
use daily_switch::clock::WallClockTime;
use daily_switch::config::{Credentials, TimeSettings};
use daily_switch::error::{ConnectError, OutputError, TimeSyncError};
use daily_switch::wait::CancelToken;
use embedded_hal::delay::DelayNs;

// ── RecordingDelay ────────────────────────────────────────────

/// Never sleeps; adds up what it was asked to sleep. Clones share the total
/// so a test can keep a handle after moving the delay into a service.
#[derive(Clone, Default)]
pub struct RecordingDelay {
    total_ms: Rc<Cell<u64>>,
    calls: Rc<Cell<u32>>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms.get()
    }

    pub fn calls(&self) -> u32 {
        self.calls.get()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms.set(self.total_ms.get() + u64::from(ns) / 1_000_000);
        self.calls.set(self.calls.get() + 1);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms.set(self.total_ms.get() + u64::from(ms));
        self.calls.set(self.calls.get() + 1);
    }
}

// ── ScriptedStation ───────────────────────────────────────────

pub struct ScriptedStation {
    /// Status poll (0-based) on which the link comes up; `None` never.
    pub connect_on_poll: Option<u32>,
    pub fail_begin: bool,
    pub begin_calls: u32,
    pub status_polls: u32,
    pub ip: Ipv4Addr,
}

impl ScriptedStation {
    pub fn connecting_after(polls: u32) -> Self {
        Self {
            connect_on_poll: Some(polls),
            fail_begin: false,
            begin_calls: 0,
            status_polls: 0,
            ip: Ipv4Addr::new(10, 0, 0, 42),
        }
    }

    pub fn unreachable() -> Self {
        Self { connect_on_poll: None, ..Self::connecting_after(0) }
    }

    fn is_up(&self) -> bool {
        matches!(self.connect_on_poll, Some(n) if self.status_polls > n)
    }
}

impl ConnectivityPort for ScriptedStation {
    fn begin(&mut self, _credentials: &Credentials) -> Result<(), ConnectError> {
        self.begin_calls += 1;
        if self.fail_begin {
            return Err(ConnectError::BeginFailed);
        }
        Ok(())
    }

    fn status(&mut self) -> ConnectionState {
        self.status_polls += 1;
        if self.is_up() {
            ConnectionState::Connected
        } else {
            ConnectionState::Connecting
        }
    }

    fn local_ip(&self) -> Option<Ipv4Addr> {
        self.is_up().then_some(self.ip)
    }
}

// ── ScriptedClock ─────────────────────────────────────────────

/// Hands out queued readings, then `fallback` forever.
pub struct ScriptedClock {
    pub readings: VecDeque<Option<WallClockTime>>,
    pub fallback: Option<WallClockTime>,
    pub configure_calls: u32,
    pub now_calls: u32,
    pub fail_configure: bool,
    /// Fire the token once `now` has been called this many times.
    pub cancel_after: Option<(u32, CancelToken)>,
}

impl ScriptedClock {
    pub fn new(readings: impl IntoIterator<Item = Option<WallClockTime>>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
            fallback: None,
            configure_calls: 0,
            now_calls: 0,
            fail_configure: false,
            cancel_after: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Option<WallClockTime>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn cancelling_after(mut self, calls: u32, token: CancelToken) -> Self {
        self.cancel_after = Some((calls, token));
        self
    }
}

impl TimeSource for ScriptedClock {
    fn configure(&mut self, _settings: &TimeSettings) -> Result<(), TimeSyncError> {
        self.configure_calls += 1;
        if self.fail_configure {
            return Err(TimeSyncError::ServiceUnavailable);
        }
        Ok(())
    }

    fn now(&mut self) -> Option<WallClockTime> {
        self.now_calls += 1;
        if let Some((after, token)) = &self.cancel_after {
            if self.now_calls >= *after {
                token.cancel();
            }
        }
        self.readings.pop_front().unwrap_or(self.fallback)
    }
}

// ── RecordingOutput ───────────────────────────────────────────

#[derive(Default)]
pub struct RecordingOutput {
    pub levels: Vec<bool>,
    pub high: bool,
    /// Remaining writes that should fail.
    pub failures: u32,
    /// Remaining LOW writes that should fail.
    pub low_failures: u32,
}

impl RecordingOutput {
    /// Number of successful HIGH writes.
    pub fn raises(&self) -> usize {
        self.levels.iter().filter(|&&l| l).count()
    }
}

impl OutputPort for RecordingOutput {
    fn set_level(&mut self, high: bool) -> Result<(), OutputError> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(OutputError::GpioWriteFailed);
        }
        if !high && self.low_failures > 0 {
            self.low_failures -= 1;
            return Err(OutputError::GpioWriteFailed);
        }
        self.levels.push(high);
        self.high = high;
        Ok(())
    }

    fn is_high(&self) -> bool {
        self.high
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

pub fn hm(hour: u8, minute: u8) -> Option<WallClockTime> {
    Some(WallClockTime::new(hour, minute, 0))
}

pub fn hms(hour: u8, minute: u8, second: u8) -> Option<WallClockTime> {
    Some(WallClockTime::new(hour, minute, second))
}
