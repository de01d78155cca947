//! WiFi bring-up firmware.
//!
//! Connects to the configured access point with the bounded retry policy,
//! logs the assigned address and then idles with the link held up.

use anyhow::Result;
use embedded_hal::delay::DelayNs;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::prelude::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::EspWifi;
use log::{error, info};

use daily_switch::adapters::delay::SystemDelay;
use daily_switch::adapters::log_sink::LogEventSink;
use daily_switch::adapters::wifi::WifiAdapter;
use daily_switch::app::connectivity::bring_up;
use daily_switch::config::AppConfig;
use daily_switch::error::Error;
use daily_switch::wait::CancelToken;

const IDLE_MS: u32 = 1_000;

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    let config = AppConfig::load().map_err(Error::from)?;

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    let mut wifi = WifiAdapter::new(EspWifi::new(peripherals.modem, sysloop, Some(nvs))?);

    let mut delay = SystemDelay;
    let mut sink = LogEventSink::new();
    match bring_up(&mut wifi, &config.wifi, &config.timing, &mut delay, &CancelToken::new(), &mut sink) {
        Ok(conn) => match conn.ip {
            Some(ip) => info!("WiFi connected! IP address: {}", ip),
            None => info!("WiFi connected!"),
        },
        Err(e) => error!("Failed to connect to WiFi: {}", Error::from(e)),
    }

    loop {
        delay.delay_ms(IDLE_MS);
    }
}
