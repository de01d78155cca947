//! WiFi bring-up against scripted stations.

use std::net::Ipv4Addr;

use daily_switch::adapters::wifi::WifiAdapter;
use daily_switch::app::connectivity::{bring_up, Connection};
use daily_switch::app::events::AppEvent;
use daily_switch::config::{Credentials, TimingConfig};
use daily_switch::error::ConnectError;
use daily_switch::wait::CancelToken;

use crate::mock_hw::{RecordingDelay, RecordingSink, ScriptedStation};

fn creds() -> Credentials {
    Credentials::new("HomeWiFi", "mysecret8").unwrap()
}

fn failures(sink: &RecordingSink) -> usize {
    sink.count(|e| matches!(e, AppEvent::ConnectFailed(_)))
}

#[test]
fn connects_and_reports_address() {
    let mut station = ScriptedStation::connecting_after(3);
    let mut delay = RecordingDelay::new();
    let mut sink = RecordingSink::new();

    let conn = bring_up(
        &mut station,
        &creds(),
        &TimingConfig::default(),
        &mut delay,
        &CancelToken::new(),
        &mut sink,
    )
    .unwrap();

    assert_eq!(conn, Connection { ip: Some(Ipv4Addr::new(10, 0, 0, 42)), attempts: 3 });
    assert_eq!(station.begin_calls, 1);
    assert_eq!(delay.total_ms(), 1_500);
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::Connected { ip: Some(Ipv4Addr::new(10, 0, 0, 42)), attempts: 3 })
    );
    assert_eq!(failures(&sink), 0);
}

#[test]
fn gives_up_after_thirty_polls_and_reports_once() {
    let mut station = ScriptedStation::unreachable();
    let mut delay = RecordingDelay::new();
    let mut sink = RecordingSink::new();

    let err = bring_up(
        &mut station,
        &creds(),
        &TimingConfig::default(),
        &mut delay,
        &CancelToken::new(),
        &mut sink,
    )
    .unwrap_err();

    assert_eq!(err, ConnectError::TimedOut { attempts: 30 });
    assert!(delay.total_ms() <= 30 * 500);
    assert_eq!(delay.calls(), 30);
    assert_eq!(failures(&sink), 1);
    assert_eq!(sink.events.last(), Some(&AppEvent::ConnectFailed(err)));
}

#[test]
fn progress_reported_for_every_unsuccessful_poll() {
    let mut station = ScriptedStation::connecting_after(5);
    let mut sink = RecordingSink::new();
    bring_up(
        &mut station,
        &creds(),
        &TimingConfig::default(),
        &mut RecordingDelay::new(),
        &CancelToken::new(),
        &mut sink,
    )
    .unwrap();
    assert_eq!(sink.count(|e| matches!(e, AppEvent::ConnectProgress { .. })), 5);
}

#[test]
fn smaller_attempt_budget_is_honoured() {
    let timing = TimingConfig { connect_max_attempts: 4, ..TimingConfig::default() };
    let mut station = ScriptedStation::unreachable();
    let mut delay = RecordingDelay::new();
    let mut sink = RecordingSink::new();

    let err = bring_up(&mut station, &creds(), &timing, &mut delay, &CancelToken::new(), &mut sink)
        .unwrap_err();

    assert_eq!(err, ConnectError::TimedOut { attempts: 4 });
    assert_eq!(delay.total_ms(), 2_000);
    assert_eq!(station.status_polls, 5);
    assert_eq!(failures(&sink), 1);
}

#[test]
fn invalid_credentials_never_reach_the_driver() {
    let bad = Credentials {
        ssid: heapless::String::new(),
        password: heapless::String::new(),
    };
    let mut station = ScriptedStation::connecting_after(0);
    let mut sink = RecordingSink::new();

    let err = bring_up(
        &mut station,
        &bad,
        &TimingConfig::default(),
        &mut RecordingDelay::new(),
        &CancelToken::new(),
        &mut sink,
    )
    .unwrap_err();

    assert_eq!(err, ConnectError::InvalidSsid);
    assert_eq!(station.begin_calls, 0);
    assert_eq!(failures(&sink), 1);
}

#[test]
fn rejected_association_request_is_reported() {
    let mut station = ScriptedStation { fail_begin: true, ..ScriptedStation::connecting_after(0) };
    let mut delay = RecordingDelay::new();
    let mut sink = RecordingSink::new();

    let err = bring_up(
        &mut station,
        &creds(),
        &TimingConfig::default(),
        &mut delay,
        &CancelToken::new(),
        &mut sink,
    )
    .unwrap_err();

    assert_eq!(err, ConnectError::BeginFailed);
    assert_eq!(station.status_polls, 0);
    assert_eq!(delay.calls(), 0);
    assert_eq!(failures(&sink), 1);
}

#[test]
fn cancelled_bring_up_stops_polling() {
    let token = CancelToken::new();
    token.cancel();
    let mut station = ScriptedStation::unreachable();
    let mut delay = RecordingDelay::new();
    let mut sink = RecordingSink::new();

    let err = bring_up(&mut station, &creds(), &TimingConfig::default(), &mut delay, &token, &mut sink)
        .unwrap_err();

    assert_eq!(err, ConnectError::Cancelled);
    assert_eq!(delay.calls(), 0);
    assert_eq!(failures(&sink), 1);
}

#[test]
fn simulated_adapter_end_to_end() {
    let mut wifi = WifiAdapter::simulated(Some(2));
    let mut sink = RecordingSink::new();
    let conn = bring_up(
        &mut wifi,
        &creds(),
        &TimingConfig::default(),
        &mut RecordingDelay::new(),
        &CancelToken::new(),
        &mut sink,
    )
    .unwrap();
    assert_eq!(conn.attempts, 2);
    assert!(conn.ip.is_some());
}
