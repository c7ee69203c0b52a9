//! Streaming request body.
//!
//! The transport pulls the request body chunk by chunk instead of reading
//! one preassembled buffer: the first pull yields a single newline byte,
//! every pull after that yields a bounded slice of the pending message,
//! and the stream ends once the message is exhausted.
//!
//! The leading newline is a protocol convention: endpoints that append
//! each delivery to a shared stream can split concatenated alarm lines on
//! it.

use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::Stream;

/// Delimiter byte prepended to every delivered body.
pub const BODY_MARKER: u8 = b'\n';

/// Pull-based body source for one delivery.
///
/// Holds the full per-delivery cursor (message, offset, marker state), so
/// nothing outside the current delivery is reachable from the transport's
/// pulls. Created when a delivery starts, dropped when it ends; polled
/// only from the worker task, never concurrently.
#[derive(Debug)]
pub struct MessageBody {
    /// The pending message for this delivery.
    message: Bytes,

    /// How many message bytes have been pulled so far.
    offset: usize,

    /// Whether the leading delimiter has been yielded.
    marker_sent: bool,

    /// Upper bound on the size of one pulled chunk.
    chunk_size: usize,
}

impl MessageBody {
    /// Create the body source for one delivery.
    ///
    /// A `chunk_size` of zero is clamped to one byte so the stream always
    /// makes progress.
    pub fn new(message: Bytes, chunk_size: usize) -> Self {
        Self {
            message,
            offset: 0,
            marker_sent: false,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Message bytes not yet pulled.
    fn remaining(&self) -> usize {
        self.message.len() - self.offset
    }
}

impl Stream for MessageBody {
    type Item = Result<Bytes, Infallible>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        // An exhausted (or empty) message ends the body, marker or not.
        if this.remaining() == 0 {
            return Poll::Ready(None);
        }

        if !this.marker_sent {
            this.marker_sent = true;
            return Poll::Ready(Some(Ok(Bytes::from_static(&[BODY_MARKER]))));
        }

        let take = this.remaining().min(this.chunk_size);
        let chunk = this.message.slice(this.offset..this.offset + take);
        this.offset += take;
        Poll::Ready(Some(Ok(chunk)))
    }
}

#[cfg(test)]
#[path = "body_test.rs"]
mod body_test;
