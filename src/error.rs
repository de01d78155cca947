//! Unified error types for the daily-switch firmware.
//!
//! Every subsystem has its own small `Copy` enum; all of them convert into
//! the top-level [`Error`] so the binaries can funnel failures through a
//! single type before handing them to `anyhow`.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// WiFi bring-up failed.
    Connect(ConnectError),
    /// Wall-clock synchronisation failed.
    TimeSync(TimeSyncError),
    /// The digital output could not be driven.
    Output(OutputError),
    /// Configuration is invalid or could not be parsed.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect(e) => write!(f, "connect: {e}"),
            Self::TimeSync(e) => write!(f, "time sync: {e}"),
            Self::Output(e) => write!(f, "output: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Bounded wait
// ---------------------------------------------------------------------------

/// Why a [`poll_until`](crate::wait::poll_until) wait ended without success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitError {
    /// The condition never became true within the timeout.
    TimedOut { attempts: u32, waited_ms: u32 },
    /// The cancellation token fired.
    Cancelled { attempts: u32 },
}

impl fmt::Display for WaitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimedOut { attempts, waited_ms } => {
                write!(f, "timed out after {attempts} attempts ({waited_ms} ms)")
            }
            Self::Cancelled { attempts } => write!(f, "cancelled after {attempts} attempts"),
        }
    }
}

// ---------------------------------------------------------------------------
// Connectivity errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectError {
    /// SSID empty, too long or not printable ASCII.
    InvalidSsid,
    /// Password neither empty (open network) nor 8-64 bytes.
    InvalidPassword,
    /// The driver rejected the association request.
    BeginFailed,
    /// Status never reached `Connected` within the attempt bound.
    TimedOut { attempts: u32 },
    /// Bring-up was cancelled from outside.
    Cancelled,
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::BeginFailed => write!(f, "association request rejected by driver"),
            Self::TimedOut { attempts } => write!(f, "not connected after {attempts} attempts"),
            Self::Cancelled => write!(f, "bring-up cancelled"),
        }
    }
}

impl From<ConnectError> for Error {
    fn from(e: ConnectError) -> Self {
        Self::Connect(e)
    }
}

// ---------------------------------------------------------------------------
// Time synchronisation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSyncError {
    /// The platform time service could not be started.
    ServiceUnavailable,
    /// UTC + DST offset is outside ±24 h.
    InvalidOffset,
    /// No valid reading within the configured timeout.
    TimedOut { waited_ms: u32 },
    /// Synchronisation was cancelled from outside.
    Cancelled,
}

impl fmt::Display for TimeSyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServiceUnavailable => write!(f, "time service unavailable"),
            Self::InvalidOffset => write!(f, "UTC offset out of range"),
            Self::TimedOut { waited_ms } => write!(f, "no valid time after {waited_ms} ms"),
            Self::Cancelled => write!(f, "time sync cancelled"),
        }
    }
}

impl From<TimeSyncError> for Error {
    fn from(e: TimeSyncError) -> Self {
        Self::TimeSync(e)
    }
}

// ---------------------------------------------------------------------------
// Output errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputError {
    /// GPIO set failed.
    GpioWriteFailed,
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl From<OutputError> for Error {
    fn from(e: OutputError) -> Self {
        Self::Output(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The JSON override could not be parsed.
    Parse,
    /// A field failed range validation; the message names the field.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "config JSON could not be parsed"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ConnectError> for ConfigError {
    fn from(e: ConnectError) -> Self {
        match e {
            ConnectError::InvalidSsid => Self::ValidationFailed("wifi.ssid"),
            _ => Self::ValidationFailed("wifi.password"),
        }
    }
}
