//! # Atomic reentrancy guard
//!
//! Same contract as [`ReentrancyGuard`](crate::ReentrancyGuard), backed by an
//! atomic register so the guard can be shared between threads.
//!
//! ## Rules
//! - Entry is a single `fetch_or`; whoever sets the bit first runs the body.
//! - A concurrent entry from another thread sees the bit set and is
//!   **skipped**, never queued or waited on.
//! - Release is a `fetch_and(!mask)` in a drop guard, so unwinding clears it.

use std::fmt;
use std::sync::atomic::Ordering;

use tracing::trace;

use crate::error::GuardError;
use crate::guard::register::{mask_for, Register};

/// Thread-safe bit-indexed recursion suppressor over a `W`-wide register.
pub struct AtomicReentrancyGuard<W: Register = u64> {
    bits: W::Atomic,
}

impl<W: Register> AtomicReentrancyGuard<W> {
    /// Creates a guard with every slot clear.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bits: W::atomic_zero(),
        }
    }

    /// Number of slots in this guard.
    pub const fn width() -> u32 {
        W::WIDTH
    }

    /// Runs `body` unless slot `index` is already running anywhere.
    ///
    /// Returns `Ok(Some(value))` when `body` ran and `Ok(None)` when it was
    /// skipped.
    pub fn call<T>(&self, index: u32, body: impl FnOnce() -> T) -> Result<Option<T>, GuardError> {
        let mask = mask_for::<W>(index)?;
        let previous = W::atomic_set(&self.bits, mask, Ordering::AcqRel);
        if previous.has(mask) {
            trace!(index, "reentrant call skipped");
            return Ok(None);
        }
        let _release = Release { guard: self, mask };
        Ok(Some(body()))
    }

    /// Returns `true` while slot `index` is running.
    pub fn is_running(&self, index: u32) -> Result<bool, GuardError> {
        let mask = mask_for::<W>(index)?;
        Ok(W::atomic_load(&self.bits, Ordering::Acquire).has(mask))
    }
}

struct Release<'a, W: Register> {
    guard: &'a AtomicReentrancyGuard<W>,
    mask: W,
}

impl<W: Register> Drop for Release<'_, W> {
    fn drop(&mut self) {
        W::atomic_clear(&self.guard.bits, self.mask, Ordering::Release);
    }
}

impl<W: Register> Default for AtomicReentrancyGuard<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Register + fmt::Binary> fmt::Debug for AtomicReentrancyGuard<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicReentrancyGuard")
            .field(
                "bits",
                &format_args!("{:#b}", W::atomic_load(&self.bits, Ordering::Relaxed)),
            )
            .finish()
    }
}
