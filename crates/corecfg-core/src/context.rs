//! Cancellation and deadlines for store reads
//!
//! A [`Context`] travels with each invocation. The snapshot read is raced
//! against it; whichever of cancellation, deadline or completion comes first
//! decides the outcome.

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Per-invocation cancellation signal and optional deadline
///
/// Cloning shares the cancellation signal.
#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

impl Context {
    /// Context that is never cancelled and has no deadline
    #[inline]
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Context with a cancellation handle
    #[must_use]
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            deadline: None,
            cancel: Some(rx),
        };
        (ctx, CancelHandle { tx })
    }

    /// Same context, expiring at `deadline` or earlier
    #[inline]
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(self.deadline.map_or(deadline, |d| d.min(deadline)));
        self
    }

    /// Same context, expiring after `timeout` or earlier
    ///
    /// A timeout too large to represent as an instant adds no deadline.
    #[inline]
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Deadline, if any
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Check if cancellation was requested
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Check if the deadline has passed
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| d <= Instant::now())
    }

    /// Check the context without waiting
    ///
    /// # Errors
    /// Returns the interruption if the context is already done
    pub fn check(&self) -> Result<(), Interrupted> {
        if self.is_cancelled() {
            Err(Interrupted::Cancelled)
        } else if self.is_expired() {
            Err(Interrupted::DeadlineExceeded)
        } else {
            Ok(())
        }
    }

    /// Run `fut` until it completes or the context is done
    ///
    /// Cancellation wins over the deadline, and both win over a future that
    /// becomes ready in the same poll. An interrupted future is dropped.
    ///
    /// # Errors
    /// Returns the interruption if the context finished first
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Interrupted> {
        self.check()?;

        let mut cancel = self.cancel.clone();
        let cancelled = async move {
            match cancel.as_mut() {
                // A dropped handle can no longer cancel
                Some(rx) => {
                    let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
                    if closed {
                        std::future::pending::<()>().await;
                    }
                }
                None => std::future::pending::<()>().await,
            }
        };

        let deadline = self.deadline;
        let expired = async move {
            match deadline {
                Some(d) => tokio::time::sleep_until(d).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = cancelled => Err(Interrupted::Cancelled),
            () = expired => Err(Interrupted::DeadlineExceeded),
            out = fut => Ok(out),
        }
    }
}

/// Requests cancellation of every clone of a [`Context`]
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Cancel the associated context
    #[inline]
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Why a context stopped an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Interrupted {
    /// Cancellation was requested
    #[error("operation cancelled")]
    Cancelled,

    /// Deadline passed
    #[error("deadline exceeded")]
    DeadlineExceeded,
}
