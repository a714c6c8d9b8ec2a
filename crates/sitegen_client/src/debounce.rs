//! Restartable delay timer.
//!
//! Scheduling a task cancels the previously pending one, so only the task
//! scheduled last can fire. A task that has already started running is not
//! interrupted by later scheduling.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<CancellationToken>,
    last: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            last: None,
        }
    }

    /// Runs `task` after the delay unless superseded or cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let token = CancellationToken::new();
        self.pending = Some(token.clone());
        let delay = self.delay;

        self.last = Some(tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => task.await,
            }
        }));
    }

    /// Hands out the handle of the task scheduled last. It resolves once
    /// that task has run to completion or was cancelled.
    pub fn take_last(&mut self) -> Option<JoinHandle<()>> {
        self.last.take()
    }

    /// Cancels the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
