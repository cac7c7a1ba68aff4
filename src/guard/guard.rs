//! # Reentrancy guard
//!
//! [`ReentrancyGuard`] suppresses recursive entry into a guarded section on
//! the current call stack. One integer register tracks up to 8/16/32/64
//! independent sections, one per bit index.
//!
//! ## State machine (per bit)
//! ```text
//!            call(i, body)                       body returns / unwinds
//!   Clear ─────────────────► Running ───────────────────────────────► Clear
//!                               │
//!                               └── call(i, ..) while Running ──► Ok(None), body skipped
//! ```
//!
//! It is a flag, not a lock: the register lives in a `Cell`, so the guard is
//! `!Sync` and cannot be shared across threads. Use
//! [`AtomicReentrancyGuard`](crate::AtomicReentrancyGuard) for that.

use std::cell::Cell;
use std::fmt;

use tracing::trace;

use crate::error::GuardError;
use crate::guard::register::{mask_for, Register};

/// Bit-indexed recursion suppressor over a `W`-wide register.
pub struct ReentrancyGuard<W: Register = u64> {
    bits: Cell<W>,
}

/// 8-slot guard.
pub type ReentrancyGuard8 = ReentrancyGuard<u8>;
/// 16-slot guard.
pub type ReentrancyGuard16 = ReentrancyGuard<u16>;
/// 32-slot guard.
pub type ReentrancyGuard32 = ReentrancyGuard<u32>;
/// 64-slot guard.
pub type ReentrancyGuard64 = ReentrancyGuard<u64>;

impl<W: Register> ReentrancyGuard<W> {
    /// Creates a guard with every slot clear.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bits: Cell::new(W::default()),
        }
    }

    /// Number of slots in this guard.
    pub const fn width() -> u32 {
        W::WIDTH
    }

    /// Runs `body` unless slot `index` is already running.
    ///
    /// Returns `Ok(Some(value))` when `body` ran and `Ok(None)` when it was
    /// skipped. The slot is cleared when `body` returns **or unwinds**.
    ///
    /// # Example
    /// ```
    /// use callvisor::ReentrancyGuard8;
    ///
    /// let guard = ReentrancyGuard8::new();
    /// let outer = guard.call(0, || {
    ///     // Re-entering the same slot is a silent no-op.
    ///     guard.call(0, || unreachable!()).unwrap()
    /// });
    /// assert_eq!(outer, Ok(Some(None::<()>)));
    /// ```
    pub fn call<T>(&self, index: u32, body: impl FnOnce() -> T) -> Result<Option<T>, GuardError> {
        let mask = mask_for::<W>(index)?;
        let current = self.bits.get();
        if current.has(mask) {
            trace!(index, "reentrant call skipped");
            return Ok(None);
        }
        self.bits.set(current.with(mask));
        let _release = Release { guard: self, mask };
        Ok(Some(body()))
    }

    /// Returns `true` while slot `index` is running.
    pub fn is_running(&self, index: u32) -> Result<bool, GuardError> {
        let mask = mask_for::<W>(index)?;
        Ok(self.bits.get().has(mask))
    }
}

/// Clears one slot on drop, including during unwinding.
struct Release<'a, W: Register> {
    guard: &'a ReentrancyGuard<W>,
    mask: W,
}

impl<W: Register> Drop for Release<'_, W> {
    fn drop(&mut self) {
        let bits = &self.guard.bits;
        bits.set(bits.get().without(self.mask));
    }
}

impl<W: Register> Default for ReentrancyGuard<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Register + fmt::Binary> fmt::Debug for ReentrancyGuard<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReentrancyGuard")
            .field("bits", &format_args!("{:#b}", self.bits.get()))
            .finish()
    }
}
