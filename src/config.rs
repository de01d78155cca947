//! System configuration parameters
//!
//! All tunable parameters for the daily switch. Defaults are compile-time
//! constants; WiFi credentials come from the `WIFI_SSID` / `WIFI_PASS`
//! build environment, and a JSON document in `DAILY_SWITCH_CONFIG` may
//! override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::clock::{self, TimeOfDay};
use crate::error::{ConfigError, ConnectError};
use crate::pins;

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// WiFi station credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub ssid: heapless::String<32>,
    pub password: heapless::String<64>,
}

impl Credentials {
    /// Build validated credentials.
    pub fn new(ssid: &str, password: &str) -> Result<Self, ConnectError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        Ok(Self {
            ssid: heapless::String::try_from(ssid).map_err(|_| ConnectError::InvalidSsid)?,
            password: heapless::String::try_from(password)
                .map_err(|_| ConnectError::InvalidPassword)?,
        })
    }

    pub fn validate(&self) -> Result<(), ConnectError> {
        validate_ssid(&self.ssid)?;
        validate_password(&self.password)
    }

    /// Open networks carry an empty password.
    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            ssid: heapless::String::try_from(option_env!("WIFI_SSID").unwrap_or("YOUR_SSID"))
                .unwrap_or_default(),
            password: heapless::String::try_from(
                option_env!("WIFI_PASS").unwrap_or("YOUR_PASSWORD"),
            )
            .unwrap_or_default(),
        }
    }
}

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), ConnectError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConnectError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConnectError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectError::InvalidPassword);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Time authority
// ---------------------------------------------------------------------------

/// Which SNTP server to ask and how to turn UTC into local time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSettings {
    /// Time-authority hostname.
    pub server: heapless::String<64>,
    /// Fixed offset east of UTC.
    pub utc_offset_secs: i32,
    /// Extra daylight-saving offset (0 = no DST).
    pub dst_offset_secs: i32,
}

impl TimeSettings {
    /// Offset applied to UTC to get local time.
    pub fn total_offset_secs(&self) -> i32 {
        self.utc_offset_secs.saturating_add(self.dst_offset_secs)
    }
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self {
            server: heapless::String::try_from("pool.ntp.org").unwrap_or_default(),
            utc_offset_secs: 9 * 3600, // JST
            dst_offset_secs: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Daily action
// ---------------------------------------------------------------------------

/// How the output pin reflects the daily action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionMode {
    /// Pin held high from the trigger until the daily reset.
    Level,
    /// Pin pulsed high for `duration_ms`, then returned low.
    Pulse { duration_ms: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Minute at which the action fires.
    pub target: TimeOfDay,
    /// Minute at which the daily state is cleared.
    pub reset: TimeOfDay,
    pub action: ActionMode,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            target: TimeOfDay::new(13, 40),
            reset: TimeOfDay::new(0, 1),
            action: ActionMode::Level,
        }
    }
}

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Connection status poll interval (milliseconds)
    pub connect_interval_ms: u32,
    /// Status polls before bring-up gives up
    pub connect_max_attempts: u32,
    /// Time-sync poll interval (milliseconds)
    pub sync_interval_ms: u32,
    /// Give up on time sync after this long; `None` waits forever
    pub sync_timeout_ms: Option<u32>,
    /// Daily-switch loop cadence (milliseconds)
    pub poll_interval_ms: u32,
}

impl TimingConfig {
    /// Total bring-up budget.
    pub fn connect_timeout_ms(&self) -> u32 {
        self.connect_interval_ms.saturating_mul(self.connect_max_attempts)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            connect_interval_ms: 500,
            connect_max_attempts: 30, // ~15 s
            sync_interval_ms: 500,
            sync_timeout_ms: Some(60_000),
            poll_interval_ms: 5_000,
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub wifi: Credentials,
    pub time: TimeSettings,
    pub schedule: ScheduleConfig,
    /// GPIO number of the switched output.
    pub output_gpio: i32,
    pub timing: TimingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wifi: Credentials::default(),
            time: TimeSettings::default(),
            schedule: ScheduleConfig::default(),
            output_gpio: pins::SWITCH_OUTPUT_GPIO,
            timing: TimingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Defaults with any fields present in `json` overridden.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|_| ConfigError::Parse)
    }

    /// Build-time configuration, validated.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match option_env!("DAILY_SWITCH_CONFIG") {
            Some(json) => Self::from_json(json)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Range-check every field. Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.wifi.validate()?;

        if self.time.server.is_empty() {
            return Err(ConfigError::ValidationFailed("time.server is empty"));
        }
        if !clock::is_valid_offset(self.time.total_offset_secs()) {
            return Err(ConfigError::ValidationFailed("time offset must be within ±24h"));
        }

        if !self.schedule.target.is_valid() {
            return Err(ConfigError::ValidationFailed("schedule.target out of range"));
        }
        if !self.schedule.reset.is_valid() {
            return Err(ConfigError::ValidationFailed("schedule.reset out of range"));
        }
        if self.schedule.target == self.schedule.reset {
            return Err(ConfigError::ValidationFailed(
                "schedule.target and schedule.reset must differ",
            ));
        }
        if let ActionMode::Pulse { duration_ms } = self.schedule.action {
            if duration_ms == 0 {
                return Err(ConfigError::ValidationFailed("pulse duration must be > 0"));
            }
            if duration_ms >= self.timing.poll_interval_ms {
                return Err(ConfigError::ValidationFailed(
                    "pulse duration must be shorter than the poll interval",
                ));
            }
        }

        if !(0..=pins::MAX_OUTPUT_GPIO).contains(&self.output_gpio) {
            return Err(ConfigError::ValidationFailed("output_gpio out of range"));
        }

        let t = &self.timing;
        if t.connect_interval_ms == 0 || t.sync_interval_ms == 0 || t.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("intervals must be > 0"));
        }
        if t.connect_max_attempts == 0 {
            return Err(ConfigError::ValidationFailed("connect_max_attempts must be > 0"));
        }
        if t.sync_timeout_ms == Some(0) {
            return Err(ConfigError::ValidationFailed("sync_timeout_ms must be > 0"));
        }
        Ok(())
    }
}
