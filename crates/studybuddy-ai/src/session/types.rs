//! Session types and concurrency guards.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::AiError;

/// The outcome of a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Always `true`: replies arrive whole.
    pub done: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The chat handle could not be opened.
    #[error("session could not be established: {0}")]
    Configuration(#[source] AiError),
    /// One exchange failed; the user's message stays in history.
    #[error("message exchange failed: {0}")]
    Send(#[source] AiError),
    #[error("another message is already in flight on this session")]
    Busy,
    #[error("message is empty")]
    EmptyMessage,
}

/// Guard that clears the `busy` flag on drop, ensuring it is always released
/// even if the future is cancelled or an early return occurs.
pub(super) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    /// Attempt to acquire the busy flag. Returns `Err` if already busy.
    pub(super) fn acquire(flag: &'a AtomicBool) -> Result<Self, SessionError> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(SessionError::Busy);
        }
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
