//! HTTP alarm sink - the per-sink delivery worker.
//!
//! One worker per configured sink. The worker compiles its option string
//! and builds its transport exactly once, then loops on the delivery
//! queue: each received message gets exactly one delivery attempt, in
//! submission order, one at a time. A failed delivery is logged with the
//! transport's own error description and dropped; the next alarm is
//! independent.
//!
//! ```text
//! [alarm framework] --submit--> [bounded queue] --> [worker] --streaming POST--> [endpoint]
//! ```
//!
//! # Example
//!
//! ```ignore
//! use alarm_http::{HttpAlarmSink, SinkSettings};
//! use tokio::sync::mpsc;
//!
//! let (tx, rx) = mpsc::channel(64);
//! let sink = HttpAlarmSink::new("https://hook.example/notify;timeout=3",
//!                               SinkSettings::default(), rx);
//! tokio::spawn(sink.run());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::config::SinkSettings;
use crate::options::SinkOptions;
use crate::transport::Transport;

/// Per-sink delivery worker.
///
/// Owns the read side of the delivery queue and, once running, the
/// transport. Consumed by [`HttpAlarmSink::run`].
pub struct HttpAlarmSink {
    /// Queue read side; submissions arrive here.
    receiver: mpsc::Receiver<Bytes>,

    /// Raw option string, compiled once at startup.
    raw_options: String,

    /// Process-wide settings.
    settings: SinkSettings,

    /// Sink name for logging.
    name: String,

    /// Metrics for this sink (Arc for sharing with the metrics handle).
    metrics: Arc<AlarmSinkMetrics>,
}

/// Metrics for one alarm sink.
#[derive(Debug, Default)]
pub struct AlarmSinkMetrics {
    /// Non-empty messages taken off the queue.
    messages_received: AtomicU64,

    /// Deliveries that completed successfully.
    messages_delivered: AtomicU64,

    /// Deliveries that failed (connect error, timeout, error status).
    delivery_failures: AtomicU64,

    /// Body bytes put on the wire, including the leading marker byte.
    bytes_sent: AtomicU64,
}

impl AlarmSinkMetrics {
    /// Create a new metrics instance.
    pub const fn new() -> Self {
        Self {
            messages_received: AtomicU64::new(0),
            messages_delivered: AtomicU64::new(0),
            delivery_failures: AtomicU64::new(0),
            bytes_sent: AtomicU64::new(0),
        }
    }

    /// Record a message taken off the queue.
    #[inline]
    pub fn record_received(&self) {
        self.messages_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed delivery of `bytes` body bytes.
    #[inline]
    pub fn record_delivered(&self, bytes: u64) {
        self.messages_delivered.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Record a failed delivery.
    #[inline]
    pub fn record_failed(&self) {
        self.delivery_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            messages_received: self.messages_received.load(Ordering::Relaxed),
            messages_delivered: self.messages_delivered.load(Ordering::Relaxed),
            delivery_failures: self.delivery_failures.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.messages_received.store(0, Ordering::Relaxed);
        self.messages_delivered.store(0, Ordering::Relaxed);
        self.delivery_failures.store(0, Ordering::Relaxed);
        self.bytes_sent.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time snapshot of sink metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub messages_received: u64,
    pub messages_delivered: u64,
    pub delivery_failures: u64,
    pub bytes_sent: u64,
}

/// Handle for reading a sink's metrics.
///
/// Cheap to clone; stays valid after `run()` consumes the sink.
#[derive(Clone)]
pub struct AlarmSinkMetricsHandle {
    name: String,
    metrics: Arc<AlarmSinkMetrics>,
}

impl AlarmSinkMetricsHandle {
    /// The sink this handle reads.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a snapshot of the sink's counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl HttpAlarmSink {
    /// Create a new sink worker reading from `receiver`.
    pub fn new(
        raw_options: impl Into<String>,
        settings: SinkSettings,
        receiver: mpsc::Receiver<Bytes>,
    ) -> Self {
        Self::with_name(raw_options, settings, receiver, "http")
    }

    /// Create a new sink worker with a custom name.
    pub fn with_name(
        raw_options: impl Into<String>,
        settings: SinkSettings,
        receiver: mpsc::Receiver<Bytes>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            receiver,
            raw_options: raw_options.into(),
            settings,
            name: name.into(),
            metrics: Arc::new(AlarmSinkMetrics::new()),
        }
    }

    /// Get a reference to the sink's metrics.
    pub fn metrics(&self) -> &AlarmSinkMetrics {
        &self.metrics
    }

    /// Get a metrics handle that survives `run()` consuming the sink.
    pub fn metrics_handle(&self) -> AlarmSinkMetricsHandle {
        AlarmSinkMetricsHandle {
            name: self.name.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }

    /// Get the sink name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the delivery loop until every submit handle is dropped.
    ///
    /// Compiles the option string and builds the transport once, then
    /// waits on the queue with no timeout. Returns the final metrics
    /// snapshot.
    pub async fn run(mut self) -> MetricsSnapshot {
        let options = SinkOptions::parse(&self.raw_options);

        tracing::info!(
            sink = %self.name,
            url = options.url.as_deref().unwrap_or("<unset>"),
            "alarm sink starting"
        );

        let transport = match Transport::build(
            &options,
            self.settings.default_timeout(),
            self.settings.chunk_size,
        ) {
            Ok(t) => t,
            Err(e) => {
                // Fatal to this sink only: no delivery will ever happen,
                // and the host sees nothing beyond this line.
                tracing::error!(sink = %self.name, error = %e, "alarm transport init failed");
                return self.metrics.snapshot();
            }
        };

        while let Some(mut message) = self.receiver.recv().await {
            // An empty submission is not an alarm; wait for the next one.
            if message.is_empty() {
                continue;
            }
            self.metrics.record_received();

            if message.len() > self.settings.max_message_size {
                message.truncate(self.settings.max_message_size);
            }
            let body_bytes = message.len() as u64 + 1; // +1 for the marker

            match transport.deliver(message).await {
                Ok(()) => {
                    self.metrics.record_delivered(body_bytes);
                    tracing::trace!(sink = %self.name, bytes = body_bytes, "alarm delivered");
                }
                Err(e) => {
                    tracing::error!(sink = %self.name, error = %e, "alarm delivery failed");
                    self.metrics.record_failed();
                }
            }
        }

        let snapshot = self.metrics.snapshot();
        tracing::info!(
            sink = %self.name,
            received = snapshot.messages_received,
            delivered = snapshot.messages_delivered,
            failed = snapshot.delivery_failures,
            bytes = snapshot.bytes_sent,
            "alarm sink shutting down"
        );

        snapshot
    }
}

#[cfg(test)]
#[path = "sink_test.rs"]
mod sink_test;
