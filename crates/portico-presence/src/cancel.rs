//! Cooperative cancellation for in-flight toggles.
//!
//! The caller owns abandonment: it holds a [`CancelToken`] and fires it when
//! interest is lost (e.g., navigating away from the verification panel).
//! Firing is safe from any state — before the toggle starts, mid-flight, or
//! after resolution — and is a no-op everywhere except the latency window.

use std::sync::Arc;

use tokio::sync::watch;

/// Cancellation handle shared between a caller and the presence controller.
///
/// Cloning is cheap; every clone observes the same cancellation.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self { tx: Arc::new(tx), rx }
    }

    /// Signal abandonment. Idempotent, and a no-op once a toggle has
    /// already resolved.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Whether cancellation has been signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once cancellation is signalled.
    pub(crate) async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        // The sender lives inside `self`, so the channel cannot close while
        // this future is borrowed from the token; if it somehow did, no
        // cancel can ever arrive and the future must never resolve.
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
