//! Bounded, cancellable poll-wait.
//!
//! Every blocking wait in the firmware (WiFi association, SNTP sync) is the
//! same shape: check a condition, sleep a fixed interval, repeat. This
//! module is that loop with an explicit timeout and a [`CancelToken`], so
//! no wait can hang the device without somebody having asked for it.
//!
//! Elapsed time is accounted as `attempts × interval`, which is what the
//! single-threaded loop actually sleeps; condition checks are assumed to
//! be cheap relative to the interval.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;

use crate::error::WaitError;

/// Shared flag that stops any in-progress [`poll_until`].
///
/// Cloning shares the flag; cancelling one clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Poll cadence and budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub interval_ms: u32,
    /// `None` waits until the condition holds or the token fires.
    pub timeout_ms: Option<u32>,
}

impl WaitPolicy {
    pub const fn bounded(interval_ms: u32, timeout_ms: u32) -> Self {
        Self { interval_ms, timeout_ms: Some(timeout_ms) }
    }

    pub const fn unbounded(interval_ms: u32) -> Self {
        Self { interval_ms, timeout_ms: None }
    }

    /// Upper bound on sleeps before giving up, if bounded.
    pub fn max_attempts(&self) -> Option<u32> {
        self.timeout_ms.map(|t| t / self.interval_ms.max(1))
    }
}

/// Outcome of a successful wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitStats {
    /// Number of intervals slept before the condition held.
    pub attempts: u32,
    pub waited_ms: u32,
}

/// Block until `ready` returns `true`, the timeout elapses or `cancel` fires.
///
/// `ready` is called once up front, then once after every sleep, and
/// receives the number of sleeps so far. It is therefore called at most
/// `max_attempts + 1` times.
pub fn poll_until<D, F>(
    delay: &mut D,
    policy: WaitPolicy,
    cancel: &CancelToken,
    mut ready: F,
) -> Result<WaitStats, WaitError>
where
    D: DelayNs,
    F: FnMut(u32) -> bool,
{
    let mut attempts: u32 = 0;
    let mut waited_ms: u32 = 0;

    loop {
        if ready(attempts) {
            return Ok(WaitStats { attempts, waited_ms });
        }
        if cancel.is_cancelled() {
            return Err(WaitError::Cancelled { attempts });
        }
        if let Some(timeout) = policy.timeout_ms {
            if waited_ms.saturating_add(policy.interval_ms) > timeout {
                return Err(WaitError::TimedOut { attempts, waited_ms });
            }
        }

        delay.delay_ms(policy.interval_ms);
        attempts = attempts.saturating_add(1);
        waited_ms = waited_ms.saturating_add(policy.interval_ms);
    }
}
