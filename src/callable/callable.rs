//! # Fault-isolated callable (`Callable`)
//!
//! [`Callable`] wraps a closure of a fixed parameter/return shape behind a
//! uniform, opt-in fault-isolation contract.
//!
//! ## Calling conventions
//! ```text
//! exec(args)                 → R                    panics unwind to the caller
//! invoke(args)               → Result<R, Faulted>   panics contained, no sink
//! call(isolate, sink, args)  → Result<R, Faulted>   explicit control
//! ```
//!
//! ## Rules
//! - `call(false, ..)` behaves exactly like `exec`; the sink is ignored and the
//!   result is always `Ok`.
//! - `call(true, ..)` returns `Err(Faulted)` iff the closure panicked during
//!   this call; the fault is also offered to the sink, if any.
//! - An empty callable returns the zero value of `R` and never faults.
//!
//! ## Example
//! ```rust
//! use callvisor::Callable;
//!
//! let parse: Callable<(&'static str,), Result<u16, std::num::ParseIntError>> =
//!     Callable::new(|s: &'static str| s.parse::<u16>());
//!
//! // Ordinary errors are passed through untouched.
//! assert!(matches!(parse.invoke(("80",)), Ok(Ok(80))));
//! assert!(matches!(parse.invoke(("http",)), Ok(Err(_))));
//!
//! // Panics become `Faulted` only when isolation is requested.
//! let crash: Callable<(), u8> = Callable::new(|| -> u8 { panic!("boom") });
//! assert_eq!(crash.invoke(()).unwrap_err().message(), "boom");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::callable::invocable::Invocable;
use crate::callable::shape::ZeroValue;
use crate::error::Faulted;
use crate::fault::{self, FaultSink};

/// Shared, type-erased closure over an argument tuple.
type CallableFn<A, R> = Arc<dyn Fn(A) -> R + Send + Sync>;

/// Wrapped invocable with a fault-isolation contract.
///
/// `A` is the argument tuple (`()`, `(T0,)`, `(T0, T1)`, ...), `R` the return
/// shape. Cloning is cheap and shares the underlying closure.
pub struct Callable<A, R> {
    f: Option<CallableFn<A, R>>,
}

impl<A: 'static, R: 'static> Callable<A, R> {
    /// Wraps a closure of any supported arity.
    ///
    /// ```rust
    /// use callvisor::Callable;
    ///
    /// let add: Callable<(i32, i32), i32> = Callable::new(|a: i32, b: i32| a + b);
    /// assert_eq!(add.exec((2, 3)), 5);
    /// ```
    pub fn new<F>(f: F) -> Self
    where
        F: Invocable<A, R>,
    {
        Self {
            f: Some(Arc::new(move |args: A| f.invoke_with(args))),
        }
    }
}

impl<A, R> Callable<A, R> {
    /// Creates an empty callable; invoking it is a no-op.
    #[must_use]
    pub fn empty() -> Self {
        Self { f: None }
    }

    /// Returns `true` if no closure is set.
    pub fn is_empty(&self) -> bool {
        self.f.is_none()
    }
}

impl<A, R: ZeroValue> Callable<A, R> {
    /// Calls without isolation: a panic unwinds to the caller unchanged.
    pub fn exec(&self, args: A) -> R {
        match &self.f {
            Some(f) => f(args),
            None => R::zero_value(),
        }
    }

    /// Calls with isolation and no sink.
    pub fn invoke(&self, args: A) -> Result<R, Faulted> {
        self.call(true, None, args)
    }

    /// Calls with explicit control over isolation and fault reporting.
    ///
    /// ### Parameters
    /// - `isolate`: contain a panic and return it as `Err(Faulted)`.
    /// - `sink`: offered a copy of the fault (non-blocking); ignored when
    ///   `isolate` is `false` or nothing panicked.
    /// - `args`: argument tuple.
    pub fn call(&self, isolate: bool, sink: Option<&dyn FaultSink>, args: A) -> Result<R, Faulted> {
        let Some(f) = &self.f else {
            return Ok(R::zero_value());
        };
        if isolate {
            fault::isolate(sink, || f(args))
        } else {
            Ok(f(args))
        }
    }
}

impl<A, R> Clone for Callable<A, R> {
    fn clone(&self) -> Self {
        Self { f: self.f.clone() }
    }
}

impl<A, R> Default for Callable<A, R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<A, R> fmt::Debug for Callable<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("empty", &self.is_empty())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc;

    fn crashing() -> Callable<(u32,), u32> {
        Callable::new(|x: u32| -> u32 {
            if x > 10 {
                panic!("value {x} too large");
            }
            x * 2
        })
    }

    #[test]
    fn test_isolation_off_propagates_panic() {
        let c = crashing();
        let caught = panic::catch_unwind(AssertUnwindSafe(|| c.call(false, None, (11,))));
        assert!(caught.is_err());

        let caught = panic::catch_unwind(AssertUnwindSafe(|| c.exec((11,))));
        assert!(caught.is_err());
    }

    #[test]
    fn test_isolation_on_returns_fault() {
        let c = crashing();
        let fault = c.call(true, None, (11,)).unwrap_err();
        assert_eq!(fault.message(), "value 11 too large");
        assert_eq!(c.invoke((12,)).unwrap_err().message(), "value 12 too large");
    }

    #[test]
    fn test_non_faulting_same_in_both_modes() {
        let c = crashing();
        assert_eq!(c.call(false, None, (4,)), Ok(8));
        assert_eq!(c.call(true, None, (4,)), Ok(8));
        assert_eq!(c.exec((4,)), 8);
    }

    #[test]
    fn test_empty_is_idempotent_noop() {
        let c: Callable<(u32,), (String, u64)> = Callable::empty();
        assert!(c.is_empty());
        for _ in 0..3 {
            assert_eq!(c.exec((1,)), (String::new(), 0));
            assert_eq!(c.call(false, None, (1,)), Ok((String::new(), 0)));
            assert_eq!(c.call(true, None, (1,)), Ok((String::new(), 0)));
        }
    }

    #[test]
    fn test_empty_result_shape_is_ok_zero() {
        let c: Callable<(), Result<u8, String>> = Callable::default();
        assert_eq!(c.invoke(()), Ok(Ok(0)));
    }

    #[test]
    fn test_ordinary_error_passes_through() {
        let c: Callable<(), Result<u8, String>> = Callable::new(|| Err("denied".to_string()));
        assert_eq!(c.invoke(()), Ok(Err("denied".to_string())));
    }

    #[test]
    fn test_sink_receives_fault_only_when_isolated() {
        let (tx, mut rx) = mpsc::channel::<Faulted>(4);
        let c = crashing();

        let res = c.call(true, Some(&tx), (50,));
        let sent = rx.try_recv().expect("fault should be queued");
        assert_eq!(res, Err(sent));

        assert_eq!(c.call(true, Some(&tx), (1,)), Ok(2));
        assert!(rx.try_recv().is_err());

        let caught = panic::catch_unwind(AssertUnwindSafe(|| c.call(false, Some(&tx), (50,))));
        assert!(caught.is_err());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_full_or_closed_sink_keeps_result() {
        let c = crashing();

        let (full, _keep) = mpsc::channel::<Faulted>(1);
        assert!(full.offer(Faulted::new("filler")));
        let (closed, rx) = mpsc::channel::<Faulted>(1);
        drop(rx);

        let baseline = c.call(true, None, (99,)).unwrap_err();
        let via_full = c.call(true, Some(&full), (99,)).unwrap_err();
        let via_closed = c.call(true, Some(&closed), (99,)).unwrap_err();
        assert_eq!(via_full.message(), baseline.message());
        assert_eq!(via_closed.message(), baseline.message());
    }

    #[test]
    fn test_sink_keeps_traced_fault_equal() {
        let _capture = crate::fault::trace::capture_on();
        let c = crashing();
        let (full, _keep) = mpsc::channel::<Faulted>(1);
        assert!(full.offer(Faulted::new("filler")));

        let baseline = c.call(true, None, (99,)).unwrap_err();
        let offered = c.call(true, Some(&full), (99,)).unwrap_err();
        assert!(baseline.trace().is_some());
        assert!(baseline.location().is_some_and(|l| l.contains("callable.rs")));
        assert_eq!(offered, baseline);
    }

    #[test]
    fn test_clone_shares_closure() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let c: Callable<(), ()> = Callable::new(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        let copy = c.clone();
        c.exec(());
        copy.exec(());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_caller_resumes_after_contained_fault() {
        let c = crashing();
        let mut results = Vec::new();
        for x in [1, 20, 3] {
            results.push(c.invoke((x,)).ok());
        }
        assert_eq!(results, vec![Some(2), None, Some(6)]);
    }

    #[test]
    fn test_debug_reports_emptiness() {
        let c: Callable<(), ()> = Callable::empty();
        assert_eq!(format!("{c:?}"), "Callable { empty: true }");
    }
}
