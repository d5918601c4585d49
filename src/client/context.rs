use std::future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::client::error::CallAborted;

#[derive(Debug, Clone, Default)]
/// Per-call cancellation and deadline.
///
/// The default context never fires. A context that has already fired fails the call before
/// any network I/O; otherwise the in-flight request is dropped as soon as it fires.
pub struct CallContext {
    cancel: Option<CancellationToken>,
    deadline: Option<Instant>,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Abort at `deadline`; an earlier deadline already set wins.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    /// Abort once `timeout` has elapsed from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub(crate) fn check(&self) -> Result<(), CallAborted> {
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Err(CallAborted::Cancelled);
        }
        if self.deadline.is_some_and(|deadline| deadline <= Instant::now()) {
            return Err(CallAborted::DeadlineExceeded);
        }
        Ok(())
    }

    /// Resolves when the context fires; pending forever for the default context.
    pub(crate) async fn aborted(&self) -> CallAborted {
        let cancelled = async {
            match &self.cancel {
                Some(token) => token.cancelled().await,
                None => future::pending().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => future::pending().await,
            }
        };

        tokio::select! {
            () = cancelled => CallAborted::Cancelled,
            () = expired => CallAborted::DeadlineExceeded,
        }
    }
}
