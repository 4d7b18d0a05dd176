use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

/// Shared cancel signal for in-flight lookups.
///
/// Clones observe the same signal. A reset cancels the current token and
/// installs a fresh one, so results of the previous generation are dropped
/// instead of drawn.
#[derive(Clone, Debug, Default)]
pub struct Cancellation {
    inner: Arc<CancellationState>,
}

#[derive(Debug, Default)]
struct CancellationState {
    cancelled: Mutex<bool>,
    notify: Notify,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    fn flag(&self) -> MutexGuard<'_, bool> {
        self.inner
            .cancelled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_cancelled(&self) -> bool {
        *self.flag()
    }

    /// Returns `true` only for the call that actually cancelled.
    ///
    /// Blocks while a [`Cancellation::run_unless_cancelled`] closure is
    /// running, so once this returns no such closure will run again.
    pub fn cancel(&self) -> bool {
        {
            let mut cancelled = self.flag();
            if *cancelled {
                return false;
            }
            *cancelled = true;
        }
        self.inner.notify.notify_waiters();
        true
    }

    /// Runs `f` only if the token is still live, holding off `cancel` meanwhile.
    pub fn run_unless_cancelled<T>(&self, f: impl FnOnce() -> T) -> Option<T> {
        let cancelled = self.flag();
        if *cancelled {
            None
        } else {
            Some(f())
        }
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        // register before checking so a concurrent cancel cannot be missed
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}
