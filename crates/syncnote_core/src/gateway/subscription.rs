//! Long-lived event stream handles.
//!
//! # Responsibility
//! - Wrap a gateway event stream behind a handle the session can drain
//!   without blocking.
//! - Guarantee release of the server-side listener on every exit path.
//!
//! # Invariants
//! - Cancellation runs exactly once, whether by `cancel()` or by drop.
//! - Each handle observes exactly one event kind; no batching, no
//!   cross-kind ordering.

use std::sync::mpsc::{Receiver, TryRecvError};

/// Handle to one long-lived gateway event stream.
///
/// Dropping the handle releases the listener, so a session that fails
/// mid-setup cannot leak subscriptions.
pub struct Subscription<T> {
    receiver: Receiver<T>,
    canceller: Option<Box<dyn FnOnce() + Send>>,
}

impl<T> Subscription<T> {
    /// Wraps a receiver together with the closure that detaches the
    /// gateway-side listener.
    pub fn new(receiver: Receiver<T>, canceller: impl FnOnce() + Send + 'static) -> Self {
        Self {
            receiver,
            canceller: Some(Box::new(canceller)),
        }
    }

    /// Returns the next pending event without blocking.
    ///
    /// A disconnected stream reads as drained; the session treats a gone
    /// backend the same as a quiet one.
    pub fn try_next(&self) -> Option<T> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drains all currently pending events.
    pub fn drain(&self) -> Vec<T> {
        let mut events = Vec::new();
        while let Some(event) = self.try_next() {
            events.push(event);
        }
        events
    }

    /// Explicitly releases the gateway-side listener.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(canceller) = self.canceller.take() {
            canceller();
        }
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.release();
    }
}
