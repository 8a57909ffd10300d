//! Cooperative cancellation.
//!
//! A tokenizer polls its [`Interrupt`] hook at a bounded cadence. The hook
//! decides the policy; the tokenizer only propagates the `Err` out of
//! `next_token()` and refuses further work until the next `reset`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The host asked for the scan to stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("scan interrupted")]
pub struct Interrupted;

/// Cancellation hook polled by the tokenizers.
pub trait Interrupt {
    /// Return `Err(Interrupted)` to abort the scan in progress.
    fn check(&mut self) -> Result<(), Interrupted>;
}

/// Hook that never interrupts.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverInterrupt;

impl Interrupt for NeverInterrupt {
    #[inline]
    fn check(&mut self) -> Result<(), Interrupted> {
        Ok(())
    }
}

impl<F> Interrupt for F
where
    F: FnMut() -> Result<(), Interrupted>,
{
    #[inline]
    fn check(&mut self) -> Result<(), Interrupted> {
        self()
    }
}

/// Shared flag another thread can raise to cancel a scan.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect at the tokenizer's next poll.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl Interrupt for CancelFlag {
    #[inline]
    fn check(&mut self) -> Result<(), Interrupted> {
        if self.is_cancelled() {
            Err(Interrupted)
        } else {
            Ok(())
        }
    }
}
