//! Push sequences.
//!
//! A [`Subscription`] receives zero or more values over time from an
//! [`Emitter`] held by the backend. It ends when the backend drops the
//! emitter or when the subscriber cancels.

use futures::Stream;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

type CancelHook = Box<dyn FnOnce() + Send>;

/// Producing half of a push sequence.
pub struct Emitter<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Emitter<T> {
    /// Pushes a value. Returns `false` once the subscriber is gone, after
    /// which the emitter should be discarded.
    pub fn emit(&self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Consuming half of a push sequence.
///
/// After [`cancel`](Self::cancel), nothing more is delivered, including
/// values already buffered. Cancelling is idempotent and dropping the
/// subscription cancels it.
pub struct Subscription<T> {
    rx: mpsc::UnboundedReceiver<T>,
    on_cancel: Option<CancelHook>,
    cancelled: bool,
}

impl<T> Subscription<T> {
    /// Creates a connected emitter/subscription pair.
    pub fn channel() -> (Emitter<T>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = Self {
            rx,
            on_cancel: None,
            cancelled: false,
        };
        (Emitter { tx }, subscription)
    }

    /// A sequence that emits `value` and completes.
    pub fn once(value: T) -> Self {
        let (emitter, subscription) = Self::channel();
        emitter.emit(value);
        subscription
    }

    /// A sequence that completes without emitting.
    pub fn empty() -> Self {
        Self::channel().1
    }

    /// Registers a hook run exactly once when the subscription is cancelled
    /// or dropped. Backends use it to release whatever feeds the emitter.
    pub fn with_cancel_hook(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_cancel = Some(Box::new(hook));
        self
    }

    /// Waits for the next value. Returns `None` once the sequence completed
    /// or was cancelled.
    pub async fn recv(&mut self) -> Option<T> {
        if self.cancelled {
            return None;
        }
        self.rx.recv().await
    }

    /// Returns an already delivered value without waiting.
    pub fn try_next(&mut self) -> Option<T> {
        if self.cancelled {
            return None;
        }
        self.rx.try_recv().ok()
    }

    /// Drains every value delivered so far.
    pub fn drain(&mut self) -> Vec<T> {
        std::iter::from_fn(|| self.try_next()).collect()
    }

    /// Stops delivery and releases the backend side.
    pub fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        self.cancelled = true;
        self.rx.close();
        while self.rx.try_recv().is_ok() {}
        if let Some(hook) = self.on_cancel.take() {
            hook();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<T> Unpin for Subscription<T> {}

impl<T> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let this = self.get_mut();
        if this.cancelled {
            return Poll::Ready(None);
        }
        this.rx.poll_recv(cx)
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("cancelled", &self.cancelled)
            .finish()
    }
}
