//! Host-facing sink settings.
//!
//! Process-wide knobs the embedding application hands to every alarm sink
//! it creates. These are distinct from the per-sink option string (see
//! [`crate::options`]): the option string names the endpoint and its
//! credentials, the settings bound the resources one sink may use.
//!
//! All fields default, so an empty TOML table is a valid configuration:
//!
//! ```toml
//! [alarm_http]
//! queue_size = 128
//! max_message_size = 16384
//! ```

use std::time::Duration;

use serde::Deserialize;

/// Default delivery queue capacity, in messages.
const DEFAULT_QUEUE_SIZE: usize = 64;

/// Default cap on one alarm message, in bytes. Longer messages are
/// truncated before delivery.
const DEFAULT_MAX_MESSAGE_SIZE: usize = 8192;

/// Default connect/total timeout in seconds, used when the sink's option
/// string sets neither `timeout` nor `conn_timeout`.
const DEFAULT_TIMEOUT_SECS: u64 = 4;

/// Default request body chunk granularity, in bytes.
const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Settings shared by every alarm sink the host creates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SinkSettings {
    /// Delivery queue capacity in messages. A full queue rejects
    /// submissions instead of blocking the caller.
    pub queue_size: usize,

    /// Maximum delivered message size in bytes; longer messages are
    /// truncated.
    pub max_message_size: usize,

    /// Fallback connect and total timeout in seconds for sinks whose
    /// option string does not override them.
    pub default_timeout_secs: u64,

    /// Granularity of the streamed request body in bytes.
    pub chunk_size: usize,
}

impl Default for SinkSettings {
    fn default() -> Self {
        Self {
            queue_size: DEFAULT_QUEUE_SIZE,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            default_timeout_secs: DEFAULT_TIMEOUT_SECS,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SinkSettings {
    /// The fallback timeout as a [`Duration`].
    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs)
    }
}
