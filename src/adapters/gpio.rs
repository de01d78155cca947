//! Digital output adapter.
//!
//! Implements [`OutputPort`] over any `embedded_hal` output pin. On device
//! that is an `esp_idf_hal::gpio::PinDriver`; on host it is
//! [`SimulatedPin`], which only records the level.

use core::convert::Infallible;

use embedded_hal::digital::{Error as _, ErrorType, OutputPin};
use log::{debug, warn};

use crate::app::ports::OutputPort;
use crate::error::OutputError;

pub struct DigitalOutput<P> {
    pin: P,
    high: bool,
}

impl<P: OutputPin> DigitalOutput<P> {
    /// Take ownership of `pin` and drive it low.
    pub fn new(pin: P) -> Result<Self, OutputError> {
        let mut out = Self { pin, high: true };
        out.set_level(false)?;
        Ok(out)
    }
}

impl<P: OutputPin> OutputPort for DigitalOutput<P> {
    fn set_level(&mut self, high: bool) -> Result<(), OutputError> {
        let result = if high { self.pin.set_high() } else { self.pin.set_low() };
        result.map_err(|e| {
            warn!("GPIO: write {} failed ({:?})", if high { "HIGH" } else { "LOW" }, e.kind());
            OutputError::GpioWriteFailed
        })?;
        if self.high != high {
            debug!("GPIO: output {}", if high { "HIGH" } else { "LOW" });
        }
        self.high = high;
        Ok(())
    }

    fn is_high(&self) -> bool {
        self.high
    }
}

/// In-memory pin for host builds.
#[derive(Debug, Default)]
pub struct SimulatedPin {
    pub high: bool,
    pub writes: u32,
}

impl ErrorType for SimulatedPin {
    type Error = Infallible;
}

impl OutputPin for SimulatedPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}
