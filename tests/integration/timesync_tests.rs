//! Time synchronisation against a scripted clock.

use daily_switch::app::events::AppEvent;
use daily_switch::app::timesync::synchronize;
use daily_switch::clock::WallClockTime;
use daily_switch::config::{TimeSettings, TimingConfig};
use daily_switch::error::TimeSyncError;
use daily_switch::wait::CancelToken;

use crate::mock_hw::{hm, RecordingDelay, RecordingSink, ScriptedClock};

#[test]
fn waits_until_first_valid_reading() {
    let mut clock = ScriptedClock::new([None, None, None, None, hm(8, 15)]);
    let mut delay = RecordingDelay::new();
    let mut sink = RecordingSink::new();

    let now = synchronize(
        &mut clock,
        &TimeSettings::default(),
        &TimingConfig::default(),
        &mut delay,
        &CancelToken::new(),
        &mut sink,
    )
    .unwrap();

    assert_eq!(now, WallClockTime::new(8, 15, 0));
    assert_eq!(clock.configure_calls, 1);
    assert_eq!(delay.total_ms(), 2_000);
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::TimeSynced { now, waited_ms: 2_000 })
    );
}

#[test]
fn bounded_wait_times_out() {
    let timing = TimingConfig { sync_timeout_ms: Some(3_000), ..TimingConfig::default() };
    let mut clock = ScriptedClock::new([]);
    let mut delay = RecordingDelay::new();
    let mut sink = RecordingSink::new();

    let err = synchronize(
        &mut clock,
        &TimeSettings::default(),
        &timing,
        &mut delay,
        &CancelToken::new(),
        &mut sink,
    )
    .unwrap_err();

    assert_eq!(err, TimeSyncError::TimedOut { waited_ms: 3_000 });
    assert_eq!(delay.total_ms(), 3_000);
    assert_eq!(clock.now_calls, 7);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::TimeSyncFailed(_))), 1);
}

#[test]
fn unbounded_wait_only_ends_on_cancel() {
    let timing = TimingConfig { sync_timeout_ms: None, ..TimingConfig::default() };
    let token = CancelToken::new();
    let mut clock = ScriptedClock::new([]).cancelling_after(1_000, token.clone());
    let mut delay = RecordingDelay::new();
    let mut sink = RecordingSink::new();

    let err = synchronize(
        &mut clock,
        &TimeSettings::default(),
        &timing,
        &mut delay,
        &token,
        &mut sink,
    )
    .unwrap_err();

    assert_eq!(err, TimeSyncError::Cancelled);
    assert_eq!(clock.now_calls, 1_000);
    // Far beyond any bounded budget.
    assert_eq!(delay.total_ms(), 999 * 500);
}

#[test]
fn service_start_failure_is_reported() {
    let mut clock = ScriptedClock::new([hm(8, 15)]);
    clock.fail_configure = true;
    let mut delay = RecordingDelay::new();
    let mut sink = RecordingSink::new();

    let err = synchronize(
        &mut clock,
        &TimeSettings::default(),
        &TimingConfig::default(),
        &mut delay,
        &CancelToken::new(),
        &mut sink,
    )
    .unwrap_err();

    assert_eq!(err, TimeSyncError::ServiceUnavailable);
    assert_eq!(clock.now_calls, 0);
    assert_eq!(delay.calls(), 0);
    assert_eq!(
        sink.events,
        vec![
            AppEvent::TimeSyncStarted { server: TimeSettings::default().server },
            AppEvent::TimeSyncFailed(TimeSyncError::ServiceUnavailable),
        ]
    );
}
