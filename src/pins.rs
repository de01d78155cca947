//! GPIO assignments for the daily-switch board.
//!
//! Single source of truth for pin numbers. The output pin can still be
//! overridden at build time through the JSON config.

/// Digital output driven by the daily action.
/// GPIO 2 is the on-board LED on most ESP32 DevKit boards, so the switch is
/// visible without extra wiring.
pub const SWITCH_OUTPUT_GPIO: i32 = 2;

/// Highest GPIO number that can drive an output on the ESP32 family.
pub const MAX_OUTPUT_GPIO: i32 = 48;
