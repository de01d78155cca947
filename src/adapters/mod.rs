//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to                  |
//! |------------|--------------------|------------------------------|
//! | `delay`    | DelayNs            | FreeRTOS delay / thread sleep|
//! | `gpio`     | OutputPort         | embedded-hal output pin      |
//! | `log_sink` | EventSink          | Serial log output            |
//! | `sntp`     | TimeSource         | ESP-IDF SNTP + system clock  |
//! | `wifi`     | ConnectivityPort   | ESP-IDF WiFi STA             |

pub mod delay;
pub mod gpio;
pub mod log_sink;
pub mod sntp;
pub mod wifi;
