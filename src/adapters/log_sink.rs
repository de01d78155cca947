//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the ESP-IDF
//! logger (UART / USB-CDC in production). Lines are `TAG | detail`, meant
//! for people, not parsers.

use core::fmt;

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::config::ActionMode;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Connecting { ssid } => {
                info!("WIFI  | connecting to '{}'", ssid);
            }
            AppEvent::ConnectProgress { attempt } => {
                info!("WIFI  | . (poll {})", attempt);
            }
            AppEvent::Connected { ip: Some(ip), attempts } => {
                info!("WIFI  | connected, IP address {} (after {} polls)", ip, attempts);
            }
            AppEvent::Connected { ip: None, attempts } => {
                info!("WIFI  | connected, no address yet (after {} polls)", attempts);
            }
            AppEvent::ConnectFailed(e) => {
                warn!("WIFI  | failed to connect: {}", e);
            }
            AppEvent::TimeSyncStarted { server } => {
                info!("SNTP  | synchronising with '{}'", server);
            }
            AppEvent::TimeSynced { now, waited_ms } => {
                info!("SNTP  | synchronised, local time {} ({} ms)", now, waited_ms);
            }
            AppEvent::TimeSyncFailed(e) => {
                warn!("SNTP  | {}", e);
            }
            AppEvent::ClockReading(now) => {
                info!("CLOCK | {}", now);
            }
            AppEvent::ClockReadFailed => {
                warn!("CLOCK | read failed, resynchronising");
            }
            AppEvent::Triggered { at, mode } => {
                info!("SWITCH| triggered at {}, {}", at, OutputAfter(*mode));
            }
            AppEvent::Reset { at } => {
                info!("SWITCH| daily reset at {}, output LOW", at);
            }
            AppEvent::OutputFailed(e) => {
                warn!("SWITCH| {}", e);
            }
        }
    }
}

/// What the action did to the output.
struct OutputAfter(ActionMode);

impl fmt::Display for OutputAfter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ActionMode::Level => write!(f, "output HIGH"),
            ActionMode::Pulse { duration_ms } => write!(f, "pulsed output for {duration_ms} ms"),
        }
    }
}
