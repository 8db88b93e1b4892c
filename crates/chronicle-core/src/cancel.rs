//! Caller-supplied cancellation/timeout signal for the read path.
//!
//! Every outbound call (store queries, scorer invocations) is bracketed by a
//! [`CancelToken::checkpoint`], and long storage scans poll it, so a fired
//! token fails the overall query instead of letting it hang.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::errors::{ChronicleError, ChronicleResult};

/// Cancellation signal: an optional deadline plus a shared flag.
///
/// Cloning shares the flag, so any clone can cancel all holders.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// A token that never fires.
    pub fn none() -> Self {
        Self::default()
    }

    /// A token that fires once `timeout` has elapsed.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Cancel explicitly. All clones observe it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        if self.cancelled.load(Ordering::Acquire) {
            return true;
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Fail fast at a suspension point.
    pub fn checkpoint(&self) -> ChronicleResult<()> {
        if self.is_cancelled() {
            Err(ChronicleError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_passes_checkpoint() {
        let token = CancelToken::none();
        assert!(token.checkpoint().is_ok());
    }

    #[test]
    fn explicit_cancel_fires_all_clones() {
        let token = CancelToken::none();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
        assert!(matches!(
            token.checkpoint(),
            Err(ChronicleError::Cancelled)
        ));
    }

    #[test]
    fn elapsed_deadline_fires() {
        let token = CancelToken::with_timeout(Duration::ZERO);
        assert!(token.is_cancelled());
    }
}
