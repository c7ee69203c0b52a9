//! Sink lifecycle adapter.
//!
//! Glue between the host's alarm framework and the delivery worker:
//! [`spawn`] wires a bounded queue to a fresh worker task and returns an
//! [`AlarmHandle`], the opaque write side the framework keeps. Submitting
//! through the handle never blocks; a full queue is an error return, not
//! a wait.
//!
//! Dropping every handle closes the queue; the worker finishes whatever
//! is already queued and exits.

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::config::SinkSettings;
use crate::error::AlarmError;
use crate::sink::HttpAlarmSink;

/// Write side of one sink's delivery queue.
///
/// Cheap to clone; safe to use from any number of alarm-firing threads
/// or tasks concurrently.
#[derive(Clone)]
pub struct AlarmHandle {
    /// Sink name for debugging.
    name: String,

    /// Queue write side.
    sender: mpsc::Sender<Bytes>,
}

impl AlarmHandle {
    /// Create a handle from a sink name and queue sender.
    pub fn new(name: impl Into<String>, sender: mpsc::Sender<Bytes>) -> Self {
        Self {
            name: name.into(),
            sender,
        }
    }

    /// Submit one alarm message for delivery.
    ///
    /// Copies the message into the queue without blocking and returns
    /// the number of bytes accepted.
    ///
    /// # Errors
    ///
    /// [`AlarmError::QueueFull`] when the worker is not draining fast
    /// enough (the message is dropped, submit again or not at all);
    /// [`AlarmError::Closed`] when the worker is gone.
    pub fn submit(&self, message: &[u8]) -> Result<usize, AlarmError> {
        self.sender
            .try_send(Bytes::copy_from_slice(message))
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => AlarmError::QueueFull,
                mpsc::error::TrySendError::Closed(_) => AlarmError::Closed,
            })?;
        Ok(message.len())
    }

    /// Get the sink's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check whether the worker side is gone.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Remaining queue capacity in messages.
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }

    /// Total queue capacity in messages.
    pub fn max_capacity(&self) -> usize {
        self.sender.max_capacity()
    }
}

impl std::fmt::Debug for AlarmHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlarmHandle")
            .field("name", &self.name)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Create the handle/worker pair for one configured sink without
/// spawning the worker.
///
/// For embedders that manage their own tasks, and for tests; most hosts
/// want [`spawn`].
pub fn channel(
    raw_options: impl Into<String>,
    settings: SinkSettings,
) -> (AlarmHandle, HttpAlarmSink) {
    let (tx, rx) = mpsc::channel(settings.queue_size.max(1));
    let sink = HttpAlarmSink::new(raw_options, settings, rx);
    let handle = AlarmHandle::new(sink.name(), tx);
    (handle, sink)
}

/// Spawn one delivery worker for a configured sink.
///
/// The worker compiles `raw_options` at startup and runs until every
/// clone of the returned handle is dropped.
pub fn spawn(raw_options: impl Into<String>, settings: SinkSettings) -> AlarmHandle {
    let (handle, sink) = channel(raw_options, settings);
    tokio::spawn(sink.run());
    handle
}

#[cfg(test)]
#[path = "handle_test.rs"]
mod handle_test;
