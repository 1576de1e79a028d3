//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                   |
//! |----------------|--------------------|-------------------------------|
//! | `hardware`     | InputPort          | reset, emergency, 4 sensors   |
//! |                | LightPort          | 4 lamp outputs                |
//! | `log_sink`     | EventSink          | Serial log output             |
//! | `time`         | ClockPort          | ESP32 system timer + delay    |

pub mod hardware;
pub mod log_sink;
pub mod time;
