//! Outbound application events.
//!
//! Bring-up, time sync and the [`DailySwitchService`](super::service::DailySwitchService)
//! emit these through the [`EventSink`](super::ports::EventSink) port.

use core::net::Ipv4Addr;

use crate::clock::{TimeOfDay, WallClockTime};
use crate::config::ActionMode;
use crate::error::{ConnectError, OutputError, TimeSyncError};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Association requested.
    Connecting { ssid: heapless::String<32> },

    /// One status poll came back not connected.
    ConnectProgress { attempt: u32 },

    /// Link up with a DHCP address (if the driver reported one).
    Connected { ip: Option<Ipv4Addr>, attempts: u32 },

    /// Bring-up gave up. Emitted exactly once per bring-up.
    ConnectFailed(ConnectError),

    /// Time synchronisation started against `server`.
    TimeSyncStarted { server: heapless::String<64> },

    /// A valid wall-clock reading is available.
    TimeSynced { now: WallClockTime, waited_ms: u32 },

    /// Time synchronisation gave up.
    TimeSyncFailed(TimeSyncError),

    /// Per-poll clock report.
    ClockReading(WallClockTime),

    /// The clock could not be read; a resync follows.
    ClockReadFailed,

    /// The daily action fired.
    Triggered { at: TimeOfDay, mode: ActionMode },

    /// The daily state was cleared and the output driven low.
    Reset { at: TimeOfDay },

    /// Writing the output pin failed.
    OutputFailed(OutputError),
}
