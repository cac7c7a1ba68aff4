//! # Short-circuiting multicast (`Delegate`)
//!
//! [`Delegate`] fires an ordered list of same-shaped [`Callable`]s one after
//! another, asking a caller-supplied **interrupt predicate** after each step
//! whether to stop.
//!
//! ## Flow
//! ```text
//! call(isolate, sink, interrupt, args)
//!     │
//!     ├─ empty? ──► Ok(R::zero_value())          (interrupt never called)
//!     │
//!     └─ for c in callables (insertion order):
//!           out = c.call(isolate, sink, args.clone())
//!           interrupt(&out) ── true ──► return out
//!     └─ exhausted ──► return last out
//! ```
//!
//! ## Rules
//! - **Sequential**: no reordering, batching or fan-out; invocation order is
//!   element order.
//! - **Per-call policy**: the predicate is never stored, so one delegate can
//!   serve "run all", "stop at first fault" and "stop at first success".
//! - **Append-only**: [`Delegate::combine`] consumes the delegate and returns
//!   the extended one.
//!
//! ## Example
//! ```rust
//! use callvisor::{interrupt, Callable, Delegate};
//!
//! let hooks: Delegate<(u32,), u32> = Delegate::new().combine([
//!     Callable::new(|x: u32| x + 1),
//!     Callable::new(|x: u32| x + 2),
//!     Callable::new(|x: u32| x + 3),
//! ]);
//!
//! // Run all: the last element's outcome is returned.
//! assert_eq!(hooks.invoke(interrupt::never(), (10,)), Ok(13));
//!
//! // Stop on the first result above 11.
//! assert_eq!(hooks.invoke(|out: &Result<u32, _>| matches!(out, Ok(v) if *v > 11), (10,)), Ok(12));
//! ```

use std::fmt;

use crate::callable::{Callable, ZeroValue};
use crate::error::Faulted;
use crate::fault::FaultSink;

/// Ordered, append-only multicast list of callables of one shape.
pub struct Delegate<A, R> {
    callables: Vec<Callable<A, R>>,
}

impl<A, R> Delegate<A, R> {
    /// Creates an empty delegate.
    #[must_use]
    pub fn new() -> Self {
        Self {
            callables: Vec::new(),
        }
    }

    /// Returns the delegate with `callables` appended after the existing ones.
    #[must_use]
    pub fn combine<I>(mut self, callables: I) -> Self
    where
        I: IntoIterator<Item = Callable<A, R>>,
    {
        self.callables.extend(callables);
        self
    }

    /// Number of elements (duplicates and empty callables included).
    pub fn len(&self) -> usize {
        self.callables.len()
    }

    /// Returns `true` if the delegate has no elements.
    pub fn is_empty(&self) -> bool {
        self.callables.is_empty()
    }

    /// Iterates over the elements in invocation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Callable<A, R>> {
        self.callables.iter()
    }
}

impl<A: Clone, R: ZeroValue> Delegate<A, R> {
    /// Fires all elements without isolation; a panic unwinds to the caller.
    ///
    /// Faults cannot be observed here, so the predicate sees results only.
    pub fn exec<P>(&self, interrupt: P, args: A) -> R
    where
        P: FnMut(&R) -> bool,
    {
        self.fold(args, |c, a| c.exec(a), interrupt, R::zero_value)
    }

    /// Fires all elements with isolation and no sink.
    pub fn invoke<P>(&self, interrupt: P, args: A) -> Result<R, Faulted>
    where
        P: FnMut(&Result<R, Faulted>) -> bool,
    {
        self.call(true, None, interrupt, args)
    }

    /// Fires all elements with explicit control over isolation and reporting.
    ///
    /// Every element is called through [`Callable::call`] with the same
    /// `isolate` and `sink` and its own clone of `args`.
    pub fn call<P>(
        &self,
        isolate: bool,
        sink: Option<&dyn FaultSink>,
        interrupt: P,
        args: A,
    ) -> Result<R, Faulted>
    where
        P: FnMut(&Result<R, Faulted>) -> bool,
    {
        self.fold(
            args,
            |c, a| c.call(isolate, sink, a),
            interrupt,
            || Ok(R::zero_value()),
        )
    }

    /// Left fold with early exit over the elements.
    ///
    /// The last element receives `args` by move; earlier ones get clones.
    fn fold<O>(
        &self,
        args: A,
        mut step: impl FnMut(&Callable<A, R>, A) -> O,
        mut interrupt: impl FnMut(&O) -> bool,
        zero: impl FnOnce() -> O,
    ) -> O {
        let Some((last, init)) = self.callables.split_last() else {
            return zero();
        };
        for c in init {
            let out = step(c, args.clone());
            if interrupt(&out) {
                return out;
            }
        }
        let out = step(last, args);
        // Evaluated for its side effects; the outcome is returned either way.
        interrupt(&out);
        out
    }
}

impl<A, R> Default for Delegate<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, R> Clone for Delegate<A, R> {
    fn clone(&self) -> Self {
        Self {
            callables: self.callables.clone(),
        }
    }
}

impl<A, R> FromIterator<Callable<A, R>> for Delegate<A, R> {
    fn from_iter<I: IntoIterator<Item = Callable<A, R>>>(iter: I) -> Self {
        Self::new().combine(iter)
    }
}

impl<A, R> From<Vec<Callable<A, R>>> for Delegate<A, R> {
    fn from(callables: Vec<Callable<A, R>>) -> Self {
        Self { callables }
    }
}

impl<'a, A, R> IntoIterator for &'a Delegate<A, R> {
    type Item = &'a Callable<A, R>;
    type IntoIter = std::slice::Iter<'a, Callable<A, R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<A, R> fmt::Debug for Delegate<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate")
            .field("len", &self.callables.len())
            .finish()
    }
}
