//! # Isolation scopes
//!
//! [`isolate`] runs a closure inside a protected scope: a panic raised while it
//! runs is caught, converted into a [`Faulted`], offered to an optional sink and
//! returned to the caller. [`isolate_future`] does the same for a future,
//! catching panics raised from any of its polls.
//!
//! ## Flow
//! ```text
//! isolate(sink, f)
//!     │
//!     ├─► trace::Scope::enter()          (panic hook may record site)
//!     ├─► catch_unwind(f)
//!     │       ├─ Ok(v)   ──► Ok(v)
//!     │       └─ Err(p)  ──► convert(p, record) ──► sink.offer(fault.clone())
//!     │                                         └──► Err(fault)
//!     └─► scope dropped
//! ```
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state
//! inconsistent if the closure panics while holding a lock or halfway through
//! mutating captured data.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::pin;

use futures::FutureExt;
use tracing::debug;

use crate::error::Faulted;
use crate::fault::convert::convert;
use crate::fault::sink::FaultSink;
use crate::fault::trace::{self, Scope};

/// Runs `f`, converting a panic into `Err(Faulted)`.
///
/// If `sink` is given, the fault is also offered to it (never blocks).
///
/// # Example
/// ```
/// use callvisor::fault::isolate;
///
/// let ok = isolate(None, || 2 + 2);
/// assert_eq!(ok, Ok(4));
///
/// let err = isolate(None, || -> u32 { panic!("boom") }).unwrap_err();
/// assert_eq!(err.message(), "boom");
/// ```
pub fn isolate<T>(sink: Option<&dyn FaultSink>, f: impl FnOnce() -> T) -> Result<T, Faulted> {
    let outcome = {
        let _scope = Scope::enter();
        panic::catch_unwind(AssertUnwindSafe(f))
    };
    // Always drain the slot so a stale record never leaks into a later fault.
    let record = trace::take();
    outcome.map_err(|payload| contain(convert(payload, record), sink))
}

/// Awaits `fut`, converting a panic raised by any poll into `Err(Faulted)`.
///
/// Each poll runs inside its own trace scope, so the thread-local capture
/// stays correct even when the runtime moves the task between threads.
///
/// The sink must be `Sync` so the returned future stays `Send` for any `Send`
/// input future.
pub async fn isolate_future<F>(
    sink: Option<&(dyn FaultSink + Sync)>,
    fut: F,
) -> Result<F::Output, Faulted>
where
    F: Future,
{
    let mut fut = pin!(fut);
    let traced = futures::future::poll_fn(move |cx| {
        let _scope = Scope::enter();
        let poll = fut.as_mut().poll(cx);
        // Poll returned normally: any record on this thread is from a panic
        // the future caught itself.
        trace::take();
        poll
    });
    let outcome = AssertUnwindSafe(traced).catch_unwind().await;
    let record = trace::take();
    let sink = sink.map(|s| s as &dyn FaultSink);
    outcome.map_err(|payload| contain(convert(payload, record), sink))
}

fn contain(fault: Faulted, sink: Option<&dyn FaultSink>) -> Faulted {
    debug!(
        fault = fault.message(),
        location = fault.location().unwrap_or("unknown"),
        "contained fault"
    );
    if let Some(sink) = sink {
        sink.offer(fault.clone());
    }
    fault
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::task::{Context, Poll};
    use tokio::sync::mpsc;

    #[test]
    fn test_value_passes_through() {
        assert_eq!(isolate(None, || "ok"), Ok("ok"));
    }

    #[test]
    fn test_panic_becomes_fault() {
        let res = isolate(None, || -> () { panic!("handler exploded") });
        let fault = res.unwrap_err();
        assert_eq!(fault.message(), "handler exploded");
    }

    #[test]
    fn test_fault_offered_to_sink() {
        let (tx, mut rx) = mpsc::channel::<Faulted>(4);
        let res = isolate(Some(&tx), || -> () { panic!("boom") });
        let sent = rx.try_recv().expect("fault should be queued");
        assert_eq!(Err(sent), res);
    }

    #[test]
    fn test_full_sink_does_not_change_result() {
        let (tx, _rx) = mpsc::channel::<Faulted>(1);
        assert!(tx.offer(Faulted::new("filler")));

        let res = isolate(Some(&tx), || -> () { panic!("boom") });
        assert_eq!(res.unwrap_err().message(), "boom");
    }

    #[test]
    fn test_no_sink_offer_on_success() {
        let (tx, mut rx) = mpsc::channel::<Faulted>(4);
        assert_eq!(isolate(Some(&tx), || 1), Ok(1));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_future_fault_offered_to_sink() {
        let (tx, mut rx) = mpsc::channel::<Faulted>(4);
        let res: Result<(), Faulted> =
            isolate_future(Some(&tx), async { panic!("async boom") }).await;
        assert_eq!(res.unwrap_err().message(), "async boom");

        let sent = rx.recv().await.expect("fault should be queued");
        assert_eq!(sent.message(), "async boom");
    }

    #[test]
    fn test_trace_captured_when_enabled() {
        let _capture = trace::capture_on();
        let fault = isolate(None, || -> () { panic!("traced") }).unwrap_err();
        assert_eq!(fault.message(), "traced");
        assert!(fault.location().is_some_and(|l| l.contains("isolate.rs")));
        assert!(fault.trace().is_some());
    }

    #[tokio::test]
    async fn test_future_value_passes_through() {
        let res = isolate_future(None, async { 7 }).await;
        assert_eq!(res, Ok(7));
    }

    #[tokio::test]
    async fn test_future_panic_after_yield_becomes_fault() {
        let polls = AtomicUsize::new(0);
        let res: Result<(), Faulted> = isolate_future(None, async {
            polls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            panic!("late panic");
        })
        .await;
        assert_eq!(res.unwrap_err().message(), "late panic");
        assert_eq!(polls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panic_caught_inside_future_leaves_no_record() {
        let _capture = trace::capture_on();
        let fut = isolate_future(None, async {
            let _ = panic::catch_unwind(|| panic!("swallowed"));
            futures::pending!();
            5
        });
        let mut fut = pin!(fut);
        let mut cx = Context::from_waker(futures::task::noop_waker_ref());

        assert!(fut.as_mut().poll(&mut cx).is_pending());
        assert!(trace::take().is_none());
        assert_eq!(fut.as_mut().poll(&mut cx), Poll::Ready(Ok(5)));
    }

    #[test]
    fn test_stale_record_not_attached_after_caught_panic() {
        let _capture = trace::capture_on();
        let fut = isolate_future(None, async {
            let _ = panic::catch_unwind(|| panic!("swallowed"));
            futures::pending!();
        });
        let mut fut = pin!(fut);
        let mut cx = Context::from_waker(futures::task::noop_waker_ref());
        assert!(fut.as_mut().poll(&mut cx).is_pending());

        trace::set_enabled(false);
        let fault = isolate(None, || -> () { panic!("unrelated") }).unwrap_err();
        assert_eq!(fault.message(), "unrelated");
        assert_eq!(fault.location(), None);
        assert_eq!(fault.trace(), None);
    }
}
