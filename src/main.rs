//! Daily-switch firmware: main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  WifiAdapter     SntpTimeSource   DigitalOutput          │
//! │  (Connectivity)  (TimeSource)     (OutputPort)           │
//! │  SystemDelay     LogEventSink                            │
//! │  (DelayNs)       (EventSink)                             │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │  bring_up → synchronize → DailySwitchService::run        │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::gpio::{AnyOutputPin, PinDriver};
use esp_idf_svc::hal::prelude::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::EspWifi;
use log::{info, warn};

use daily_switch::adapters::delay::SystemDelay;
use daily_switch::adapters::gpio::DigitalOutput;
use daily_switch::adapters::log_sink::LogEventSink;
use daily_switch::adapters::sntp::SntpTimeSource;
use daily_switch::adapters::wifi::WifiAdapter;
use daily_switch::app::connectivity::bring_up;
use daily_switch::app::service::DailySwitchService;
use daily_switch::app::timesync::synchronize;
use daily_switch::config::AppConfig;
use daily_switch::error::Error;
use daily_switch::trigger::TriggerState;
use daily_switch::wait::CancelToken;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("daily-switch v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = AppConfig::load().map_err(Error::from)?;
    info!(
        "Config: target {} reset {} mode {:?} on GPIO {}",
        config.schedule.target, config.schedule.reset, config.schedule.action, config.output_gpio
    );

    let mut sink = LogEventSink::new();
    let mut delay = SystemDelay;
    let cancel = CancelToken::new();

    // ── 3. WiFi bring-up ──────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    // Keep the adapter alive for the whole run; dropping it stops WiFi.
    let mut wifi = WifiAdapter::new(EspWifi::new(peripherals.modem, sysloop, Some(nvs))?);

    if let Err(e) = bring_up(&mut wifi, &config.wifi, &config.timing, &mut delay, &cancel, &mut sink) {
        warn!("Continuing without network ({}); time sync will retry from the loop", Error::from(e));
    }

    // ── 4. Time sync ──────────────────────────────────────────
    let mut time = SntpTimeSource::new();
    if let Err(e) = synchronize(&mut time, &config.time, &config.timing, &mut delay, &cancel, &mut sink) {
        warn!("Continuing unsynchronised ({}); the loop will resynchronise", Error::from(e));
    }

    // ── 5. Output ─────────────────────────────────────────────
    // SAFETY: output_gpio was range-checked by AppConfig::validate and no
    // other driver in this program claims it.
    let pin = unsafe { AnyOutputPin::new(config.output_gpio) };
    let output = DigitalOutput::new(PinDriver::output(pin)?).map_err(Error::from)?;

    // ── 6. Daily loop ─────────────────────────────────────────
    info!("System ready. Entering poll loop.");
    let mut service = DailySwitchService::new(&config, time, output, delay, cancel);
    let state = service.run(TriggerState::default(), &mut sink);

    warn!("Poll loop exited in state {:?}", state);
    drop(wifi);
    Ok(())
}
