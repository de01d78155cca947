//! WiFi bring-up.
//!
//! Issue one association request, then poll the station status on a fixed
//! interval until it reports `Connected` or the attempt budget runs out.
//! There is no retry beyond that budget; the caller decides what to do with
//! a failed bring-up.

use core::net::Ipv4Addr;

use embedded_hal::delay::DelayNs;

use crate::config::{Credentials, TimingConfig};
use crate::error::{ConnectError, WaitError};
use crate::wait::{poll_until, CancelToken, WaitPolicy};

use super::events::AppEvent;
use super::ports::{ConnectionState, ConnectivityPort, EventSink};

/// A successful bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub ip: Option<Ipv4Addr>,
    /// Status polls that came back not connected.
    pub attempts: u32,
}

/// Associate with the configured access point.
///
/// Polls every `timing.connect_interval_ms` for at most
/// `timing.connect_max_attempts` intervals. Failure is reported to `sink`
/// exactly once, as [`AppEvent::ConnectFailed`].
pub fn bring_up<C, D, S>(
    station: &mut C,
    credentials: &Credentials,
    timing: &TimingConfig,
    delay: &mut D,
    cancel: &CancelToken,
    sink: &mut S,
) -> Result<Connection, ConnectError>
where
    C: ConnectivityPort,
    D: DelayNs,
    S: EventSink,
{
    let result = associate(station, credentials, timing, delay, cancel, sink);
    match result {
        Ok(conn) => sink.emit(&AppEvent::Connected { ip: conn.ip, attempts: conn.attempts }),
        Err(e) => sink.emit(&AppEvent::ConnectFailed(e)),
    }
    result
}

fn associate<C, D, S>(
    station: &mut C,
    credentials: &Credentials,
    timing: &TimingConfig,
    delay: &mut D,
    cancel: &CancelToken,
    sink: &mut S,
) -> Result<Connection, ConnectError>
where
    C: ConnectivityPort,
    D: DelayNs,
    S: EventSink,
{
    credentials.validate()?;

    sink.emit(&AppEvent::Connecting { ssid: credentials.ssid.clone() });
    station.begin(credentials)?;

    let policy = WaitPolicy::bounded(timing.connect_interval_ms, timing.connect_timeout_ms());
    let stats = poll_until(delay, policy, cancel, |attempt| {
        if station.status() == ConnectionState::Connected {
            return true;
        }
        sink.emit(&AppEvent::ConnectProgress { attempt });
        false
    })
    .map_err(|e| match e {
        WaitError::TimedOut { attempts, .. } => ConnectError::TimedOut { attempts },
        WaitError::Cancelled { .. } => ConnectError::Cancelled,
    })?;

    Ok(Connection { ip: station.local_ip(), attempts: stats.attempts })
}
