//! Alarm sink error types.

use thiserror::Error;

/// Errors surfaced by the alarm delivery sink.
///
/// Delivery failures are logged by the worker and never propagated to the
/// submitting side; submitters only ever see the queue errors.
#[derive(Debug, Error)]
pub enum AlarmError {
    /// Sink initialization failed (HTTP client could not be built).
    ///
    /// Fatal to the one sink: its worker exits and no delivery is ever
    /// attempted.
    #[error("failed to initialize alarm sink: {0}")]
    Init(String),

    /// The option string configured no endpoint URL.
    ///
    /// Surfaces per delivery, not at startup: the worker stays alive and
    /// every attempt fails with this error.
    #[error("no endpoint configured")]
    NoEndpoint,

    /// Delivery queue is full (non-blocking submit failed).
    #[error("alarm queue full, message dropped")]
    QueueFull,

    /// Delivery queue is closed (the worker is gone).
    #[error("alarm queue closed")]
    Closed,

    /// Transport-level delivery failure: connect error, timeout, or an
    /// error status, as classified by the HTTP client itself.
    #[error("delivery failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl AlarmError {
    /// Create an initialization error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }
}
