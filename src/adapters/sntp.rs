//! SNTP-backed wall clock.
//!
//! Implements [`TimeSource`].
//!
//! - **`target_os = "espidf"`**: starts the ESP-IDF SNTP service against
//!   the configured server; the service sets the RTC in the background.
//! - **`not(target_os = "espidf")`**: the host clock is already
//!   synchronised, so `configure` only records the offset.
//!
//! On both targets the reading comes from `SystemTime`, and anything before
//! 2020-01-01 is treated as "not synchronised yet".

use std::time::{SystemTime, UNIX_EPOCH};

use log::info;

use crate::app::ports::TimeSource;
use crate::clock::{self, WallClockTime};
use crate::config::TimeSettings;
use crate::error::TimeSyncError;

pub struct SntpTimeSource {
    #[cfg(target_os = "espidf")]
    sntp: Option<esp_idf_svc::sntp::EspSntp<'static>>,
    /// Local offset east of UTC; `None` until configured.
    offset_secs: Option<i32>,
}

impl Default for SntpTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SntpTimeSource {
    pub fn new() -> Self {
        Self {
            #[cfg(target_os = "espidf")]
            sntp: None,
            offset_secs: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.offset_secs.is_some()
    }

    #[cfg(target_os = "espidf")]
    fn platform_start(&mut self, server: &str) -> Result<(), TimeSyncError> {
        use esp_idf_svc::sntp::{EspSntp, SntpConf};

        // Only one SNTP instance may exist; drop the old one first.
        self.sntp = None;
        let mut conf = SntpConf::default();
        conf.servers[0] = server;
        let sntp = EspSntp::new(&conf).map_err(|e| {
            log::warn!("SNTP(espidf): start failed: {}", e);
            TimeSyncError::ServiceUnavailable
        })?;
        self.sntp = Some(sntp);
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_start(&mut self, server: &str) -> Result<(), TimeSyncError> {
        info!("SNTP(sim): using host clock instead of '{}'", server);
        Ok(())
    }

    fn unix_now() -> Option<i64> {
        let secs = SystemTime::now().duration_since(UNIX_EPOCH).ok()?.as_secs();
        i64::try_from(secs).ok()
    }
}

impl TimeSource for SntpTimeSource {
    fn configure(&mut self, settings: &TimeSettings) -> Result<(), TimeSyncError> {
        let offset = settings.total_offset_secs();
        if !clock::is_valid_offset(offset) {
            return Err(TimeSyncError::InvalidOffset);
        }
        self.platform_start(&settings.server)?;
        self.offset_secs = Some(offset);
        info!("SNTP: server '{}', UTC offset {} s", settings.server, offset);
        Ok(())
    }

    fn now(&mut self) -> Option<WallClockTime> {
        let offset = self.offset_secs?;
        let secs = Self::unix_now()?;
        if !clock::is_synchronized(secs) {
            return None;
        }
        WallClockTime::from_unix(secs, offset)
    }
}
