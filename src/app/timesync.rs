//! Wall-clock synchronisation.
//!
//! Configure the time source against the time authority, then poll until
//! it yields a valid reading. The wait is bounded by
//! `timing.sync_timeout_ms` when set; `None` keeps polling until a reading
//! arrives or the [`CancelToken`] fires.

use embedded_hal::delay::DelayNs;

use crate::clock::WallClockTime;
use crate::config::{TimeSettings, TimingConfig};
use crate::error::{TimeSyncError, WaitError};
use crate::wait::{poll_until, CancelToken, WaitPolicy};

use super::events::AppEvent;
use super::ports::{EventSink, TimeSource};

/// Block until `source` reports a valid local time.
pub fn synchronize<T, D, S>(
    source: &mut T,
    settings: &TimeSettings,
    timing: &TimingConfig,
    delay: &mut D,
    cancel: &CancelToken,
    sink: &mut S,
) -> Result<WallClockTime, TimeSyncError>
where
    T: TimeSource,
    D: DelayNs,
    S: EventSink,
{
    sink.emit(&AppEvent::TimeSyncStarted { server: settings.server.clone() });

    let result = wait_for_clock(source, settings, timing, delay, cancel);
    match result {
        Ok((now, waited_ms)) => {
            sink.emit(&AppEvent::TimeSynced { now, waited_ms });
            Ok(now)
        }
        Err(e) => {
            sink.emit(&AppEvent::TimeSyncFailed(e));
            Err(e)
        }
    }
}

fn wait_for_clock<T, D>(
    source: &mut T,
    settings: &TimeSettings,
    timing: &TimingConfig,
    delay: &mut D,
    cancel: &CancelToken,
) -> Result<(WallClockTime, u32), TimeSyncError>
where
    T: TimeSource,
    D: DelayNs,
{
    source.configure(settings)?;

    let policy = WaitPolicy {
        interval_ms: timing.sync_interval_ms,
        timeout_ms: timing.sync_timeout_ms,
    };
    let mut reading = None;
    let stats = poll_until(delay, policy, cancel, |_| {
        reading = source.now();
        reading.is_some()
    })
    .map_err(|e| match e {
        WaitError::TimedOut { waited_ms, .. } => TimeSyncError::TimedOut { waited_ms },
        WaitError::Cancelled { .. } => TimeSyncError::Cancelled,
    })?;

    let now = reading.ok_or(TimeSyncError::ServiceUnavailable)?;
    Ok((now, stats.waited_ms))
}
