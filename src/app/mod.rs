//! Application core: pure domain logic, zero I/O.
//!
//! Connectivity bring-up, time synchronisation and the daily-switch loop.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod connectivity;
pub mod events;
pub mod ports;
pub mod service;
pub mod timesync;
