//! Cooperative cancellation for long-running derivations

use crate::error::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancellation signal threaded through a key derivation.
///
/// Prime search is CPU-bound and can run for a while on large RSA sizes;
/// the pipeline checks this token at every stream read and at every
/// primality-test boundary. Clones share the same flag, so a frontend can
/// keep one clone and hand another to the derivation.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the active (not cancelled) state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the associated derivation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fail with [`Error::Cancelled`] once cancellation has been requested.
    pub fn ensure_active(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}
