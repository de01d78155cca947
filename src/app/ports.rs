//! Port traits, the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ bring-up / time sync / DailySwitchService
//! ```
//!
//! Driven adapters (WiFi station, SNTP clock, GPIO, log) implement these
//! traits. Domain code consumes them via generics, so nothing outside
//! `adapters` touches ESP-IDF directly. Delays go through
//! [`embedded_hal::delay::DelayNs`] rather than a port of our own.

use core::net::Ipv4Addr;

use crate::clock::WallClockTime;
use crate::config::{Credentials, TimeSettings};
use crate::error::{ConnectError, OutputError, TimeSyncError};

// ───────────────────────────────────────────────────────────────
// Connectivity port (domain → WiFi station)
// ───────────────────────────────────────────────────────────────

/// Association status as reported by the network subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// A WiFi station that can be asked to associate and then polled.
pub trait ConnectivityPort {
    /// Request association. Returns once the request is issued, not when
    /// the link is up.
    fn begin(&mut self, credentials: &Credentials) -> Result<(), ConnectError>;

    /// Current association status. Observed, never owned, by the caller.
    fn status(&mut self) -> ConnectionState;

    /// Address assigned by DHCP, once connected.
    fn local_ip(&self) -> Option<Ipv4Addr>;
}

// ───────────────────────────────────────────────────────────────
// Time source port (domain ↔ SNTP + RTC)
// ───────────────────────────────────────────────────────────────

/// Wall-clock provider backed by a network time authority.
pub trait TimeSource {
    /// Point the source at a time authority and fix the local offset.
    /// Calling it again restarts synchronisation.
    fn configure(&mut self, settings: &TimeSettings) -> Result<(), TimeSyncError>;

    /// Current local time, or `None` if the clock is not (yet) valid.
    fn now(&mut self) -> Option<WallClockTime>;
}

// ───────────────────────────────────────────────────────────────
// Output port (domain → single digital pin)
// ───────────────────────────────────────────────────────────────

/// The one digital output the daily action drives.
pub trait OutputPort {
    fn set_level(&mut self, high: bool) -> Result<(), OutputError>;

    /// Last level successfully written.
    fn is_high(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits [`AppEvent`](super::events::AppEvent)s through this
/// port. Adapters decide where they go; on device that is the serial log.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
