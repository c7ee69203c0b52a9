//! alarm-http
//!
//! HTTP/HTTPS delivery backend for an application server's alarm
//! subsystem. When an internal condition fires (log pattern match,
//! threshold breach, custom trigger), the formatted message is handed to
//! a per-sink background worker and delivered to an external endpoint
//! without ever blocking the caller that detected the condition.
//!
//! # Architecture
//!
//! ```text
//! [alarm framework] --submit--> [bounded queue] --> [worker task] --> [endpoint]
//!       any thread     try_send                      one per sink       HTTP(S)
//! ```
//!
//! Each sink gets one worker that compiles its option string once,
//! builds one reusable HTTP client, and performs strictly serialized
//! deliveries: one message, one streaming POST (a leading newline byte,
//! then the message in bounded chunks), one result. Failures are logged
//! and dropped; there is no retry and no persistence; the next fired
//! alarm is independent.
//!
//! # Configuring a sink
//!
//! A sink is described by a single semicolon-delimited option string.
//! The first bare token is the endpoint URL; the rest are `key=value`
//! pairs (`auth_user`, `auth_pass`, `ssl`, `timeout`, `conn_timeout`,
//! `mail_to`, `mail_from`, `url`). Unknown keys are ignored.
//!
//! # Example
//!
//! ```ignore
//! use alarm_http::{spawn, SinkSettings};
//!
//! let handle = spawn(
//!     "https://hook.example/notify;auth_user=bot;auth_pass=secret;timeout=3",
//!     SinkSettings::default(),
//! );
//!
//! // From any alarm-firing thread; never blocks.
//! let accepted = handle.submit(b"disk at 95%")?;
//! # Ok::<(), alarm_http::AlarmError>(())
//! ```

// =============================================================================
// Modules
// =============================================================================

/// Streaming request body (leading marker + bounded chunks)
pub mod body;

/// Host-facing sink settings
pub mod config;

/// Error types
pub mod error;

/// Sink lifecycle adapter (spawn workers, submit messages)
pub mod handle;

/// Sink option-string compiler
pub mod options;

/// The per-sink delivery worker
pub mod sink;

/// Reusable per-sink HTTP transport
pub mod transport;

// =============================================================================
// Public re-exports
// =============================================================================

pub use body::{BODY_MARKER, MessageBody};
pub use config::SinkSettings;
pub use error::AlarmError;
pub use handle::{AlarmHandle, channel, spawn};
pub use options::SinkOptions;
pub use sink::{AlarmSinkMetrics, AlarmSinkMetricsHandle, HttpAlarmSink, MetricsSnapshot};
pub use transport::Transport;
