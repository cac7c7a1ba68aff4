//! # Fault sinks
//!
//! A [`FaultSink`] is a caller-owned hand-off target that observes contained
//! faults asynchronously (central logging, metrics, alerting).
//!
//! ## Contract
//! - [`FaultSink::offer`] **never blocks**: the fault is accepted immediately
//!   or dropped.
//! - Dropping is silent for the caller; the returned fault is unaffected.
//!   A `debug` record notes the reason (`full` / `closed`).
//! - Callables and delegates never create, close, or retain a sink; they only
//!   borrow it for the duration of one call.
//!
//! ## Provided implementations
//! | Sink                                        | Accepts when                |
//! |---------------------------------------------|-----------------------------|
//! | `tokio::sync::mpsc::Sender<Faulted>`        | queue has a free slot       |
//! | `tokio::sync::broadcast::Sender<Faulted>`   | at least one live receiver  |
//! | `std::sync::mpsc::SyncSender<Faulted>`      | queue has a free slot       |

use std::sync::mpsc as std_mpsc;

use tokio::sync::{broadcast, mpsc};
use tracing::debug;

use crate::error::Faulted;

/// Non-blocking observer of contained faults.
pub trait FaultSink {
    /// Offers a fault without blocking.
    ///
    /// Returns `true` if the sink accepted it, `false` if it was dropped.
    fn offer(&self, fault: Faulted) -> bool;
}

impl<S: FaultSink + ?Sized> FaultSink for &S {
    fn offer(&self, fault: Faulted) -> bool {
        (**self).offer(fault)
    }
}

impl FaultSink for mpsc::Sender<Faulted> {
    fn offer(&self, fault: Faulted) -> bool {
        match self.try_send(fault) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(f)) => {
                debug!(reason = "full", fault = f.message(), "fault sink dropped fault");
                false
            }
            Err(mpsc::error::TrySendError::Closed(f)) => {
                debug!(reason = "closed", fault = f.message(), "fault sink dropped fault");
                false
            }
        }
    }
}

impl FaultSink for broadcast::Sender<Faulted> {
    fn offer(&self, fault: Faulted) -> bool {
        match self.send(fault) {
            Ok(_) => true,
            Err(broadcast::error::SendError(f)) => {
                debug!(reason = "closed", fault = f.message(), "fault sink dropped fault");
                false
            }
        }
    }
}

impl FaultSink for std_mpsc::SyncSender<Faulted> {
    fn offer(&self, fault: Faulted) -> bool {
        match self.try_send(fault) {
            Ok(()) => true,
            Err(std_mpsc::TrySendError::Full(f)) => {
                debug!(reason = "full", fault = f.message(), "fault sink dropped fault");
                false
            }
            Err(std_mpsc::TrySendError::Disconnected(f)) => {
                debug!(reason = "closed", fault = f.message(), "fault sink dropped fault");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mpsc_accepts_until_full() {
        let (tx, mut rx) = mpsc::channel::<Faulted>(1);
        assert!(tx.offer(Faulted::new("first")));
        assert!(!tx.offer(Faulted::new("second")));
        let first = rx.try_recv().expect("first fault should be queued");
        assert_eq!(first.message(), "first");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_mpsc_closed_drops() {
        let (tx, rx) = mpsc::channel::<Faulted>(4);
        drop(rx);
        assert!(!tx.offer(Faulted::new("lost")));
    }

    #[test]
    fn test_broadcast_without_receivers_drops() {
        let (tx, rx) = broadcast::channel::<Faulted>(4);
        drop(rx);
        assert!(!tx.offer(Faulted::new("lost")));
    }

    #[test]
    fn test_broadcast_fans_out() {
        let (tx, mut a) = broadcast::channel::<Faulted>(4);
        let mut b = tx.subscribe();
        assert!(tx.offer(Faulted::new("boom")));
        assert_eq!(a.try_recv().ok(), Some(Faulted::new("boom")));
        assert_eq!(b.try_recv().ok(), Some(Faulted::new("boom")));
    }

    #[test]
    fn test_std_sync_sender() {
        let (tx, rx) = std_mpsc::sync_channel::<Faulted>(1);
        assert!(tx.offer(Faulted::new("first")));
        assert!(!tx.offer(Faulted::new("second")));
        drop(rx);
        assert!(!tx.offer(Faulted::new("third")));
    }

    #[test]
    fn test_reference_forwards() {
        let (tx, mut rx) = mpsc::channel::<Faulted>(1);
        let sink: &dyn FaultSink = &tx;
        assert!((&sink).offer(Faulted::new("via ref")));
        assert!(rx.try_recv().is_ok());
    }
}
