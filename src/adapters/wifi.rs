//! WiFi station-mode adapter.
//!
//! Implements [`ConnectivityPort`], the hexagonal boundary for network
//! connectivity.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls via `esp_idf_svc::wifi`.
//! - **all other targets**: simulation station for host-side tests.
//!
//! `begin` only issues the association request (`EspWifi::connect` is
//! non-blocking); progress is observed through `status`.

use core::net::Ipv4Addr;

use log::info;
#[cfg(target_os = "espidf")]
use log::warn;

use crate::app::ports::{ConnectionState, ConnectivityPort};
use crate::config::Credentials;
use crate::error::ConnectError;

// ───────────────────────────────────────────────────────────────
// Simulation station
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
#[derive(Debug)]
struct SimStation {
    /// Status polls before the link comes up; `None` never connects.
    polls_until_connected: Option<u32>,
    polls: u32,
}

#[cfg(not(target_os = "espidf"))]
const SIM_IP: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 50);

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    #[cfg(target_os = "espidf")]
    wifi: esp_idf_svc::wifi::EspWifi<'static>,
    #[cfg(not(target_os = "espidf"))]
    sim: SimStation,
    begun: bool,
}

impl WifiAdapter {
    /// Wrap an already-constructed ESP-IDF WiFi driver.
    #[cfg(target_os = "espidf")]
    pub fn new(wifi: esp_idf_svc::wifi::EspWifi<'static>) -> Self {
        Self { wifi, begun: false }
    }

    /// Simulated station that reports `Connected` on the given poll.
    #[cfg(not(target_os = "espidf"))]
    pub fn simulated(polls_until_connected: Option<u32>) -> Self {
        Self {
            sim: SimStation { polls_until_connected, polls: 0 },
            begun: false,
        }
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_begin(&mut self, credentials: &Credentials) -> Result<(), ConnectError> {
        use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};

        let auth_method = if credentials.is_open() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let conf = Configuration::Client(ClientConfiguration {
            ssid: credentials
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| ConnectError::InvalidSsid)?,
            password: credentials
                .password
                .as_str()
                .try_into()
                .map_err(|_| ConnectError::InvalidPassword)?,
            auth_method,
            ..Default::default()
        });

        self.wifi.set_configuration(&conf).map_err(|e| {
            warn!("WiFi(espidf): set_configuration failed: {}", e);
            ConnectError::BeginFailed
        })?;
        if !self.wifi.is_started().unwrap_or(false) {
            self.wifi.start().map_err(|e| {
                warn!("WiFi(espidf): start failed: {}", e);
                ConnectError::BeginFailed
            })?;
        }
        self.wifi.connect().map_err(|e| {
            warn!("WiFi(espidf): connect request failed: {}", e);
            ConnectError::BeginFailed
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_begin(&mut self, credentials: &Credentials) -> Result<(), ConnectError> {
        info!("WiFi(sim): associating with '{}'", credentials.ssid);
        self.sim.polls = 0;
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_status(&mut self) -> ConnectionState {
        match self.wifi.is_connected() {
            Ok(true) if self.wifi.sta_netif().is_up().unwrap_or(false) => {
                ConnectionState::Connected
            }
            Ok(_) => ConnectionState::Connecting,
            Err(e) => {
                warn!("WiFi(espidf): status query failed: {}", e);
                ConnectionState::Disconnected
            }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_status(&mut self) -> ConnectionState {
        let polls = self.sim.polls;
        self.sim.polls = self.sim.polls.saturating_add(1);
        match self.sim.polls_until_connected {
            Some(n) if polls >= n => ConnectionState::Connected,
            _ => ConnectionState::Connecting,
        }
    }

    #[cfg(target_os = "espidf")]
    fn platform_local_ip(&self) -> Option<Ipv4Addr> {
        self.wifi.sta_netif().get_ip_info().ok().map(|info| info.ip)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_local_ip(&self) -> Option<Ipv4Addr> {
        match self.sim.polls_until_connected {
            Some(n) if self.sim.polls > n => Some(SIM_IP),
            _ => None,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// ConnectivityPort
// ───────────────────────────────────────────────────────────────

impl ConnectivityPort for WifiAdapter {
    fn begin(&mut self, credentials: &Credentials) -> Result<(), ConnectError> {
        info!("WiFi: connecting to '{}'", credentials.ssid);
        self.platform_begin(credentials)?;
        self.begun = true;
        Ok(())
    }

    fn status(&mut self) -> ConnectionState {
        if !self.begun {
            return ConnectionState::Disconnected;
        }
        self.platform_status()
    }

    fn local_ip(&self) -> Option<Ipv4Addr> {
        if !self.begun {
            return None;
        }
        self.platform_local_ip()
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
