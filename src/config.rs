//! # Process-wide configuration.
//!
//! Provides [`Config`], the few knobs that cannot live on an individual call.
//!
//! Config is used in two ways:
//! 1. **Trace capture**: [`Config::apply`] switches panic-site capture on/off.
//! 2. **Fault sinks**: [`Config::fault_channel`] builds a bounded sink/receiver pair.
//!
//! ## Sentinel values
//! - `sink_capacity = 0` → clamped to 1 (a bounded channel needs a slot)

use tokio::sync::mpsc;

use crate::error::Faulted;
use crate::fault::trace;

/// Global configuration for fault isolation.
///
/// ## Field semantics
/// - `capture_trace`: record panic location and backtrace into each [`Faulted`]
/// - `sink_capacity`: queue size of channels built by [`Config::fault_channel`]
///
/// ## Notes
/// All fields are public. Nothing takes effect until [`Config::apply`] is
/// called; callables themselves carry no configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Capture the panic location and a backtrace for every contained fault.
    ///
    /// Installs a process-wide panic hook the first time it is applied as
    /// `true`. Contained panics then skip the previous hook (no stderr
    /// report); all other panics still reach it. Backtraces are forced, so
    /// expect a measurable cost per fault while enabled.
    pub capture_trace: bool,

    /// Capacity of fault channels built by [`Config::fault_channel`].
    ///
    /// When the queue is full, further faults are dropped for that sink only;
    /// the caller still receives every fault as a return value.
    pub sink_capacity: usize,
}

impl Config {
    /// Returns the sink capacity clamped to a minimum of 1.
    #[inline]
    pub fn sink_capacity_clamped(&self) -> usize {
        self.sink_capacity.max(1)
    }

    /// Applies the process-wide parts of this configuration.
    ///
    /// Safe to call repeatedly; the last call wins.
    pub fn apply(&self) {
        trace::set_enabled(self.capture_trace);
    }

    /// Builds a bounded fault channel usable as a [`FaultSink`](crate::FaultSink).
    ///
    /// ```
    /// use callvisor::{Callable, Config, FaultSink};
    ///
    /// let (tx, mut rx) = Config::default().fault_channel();
    /// let hook: Callable<(), ()> = Callable::new(|| panic!("boom"));
    ///
    /// let res = hook.call(true, Some(&tx), ());
    /// assert!(res.is_err());
    /// assert_eq!(rx.try_recv().unwrap().message(), "boom");
    /// ```
    pub fn fault_channel(&self) -> (mpsc::Sender<Faulted>, mpsc::Receiver<Faulted>) {
        mpsc::channel(self.sink_capacity_clamped())
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `capture_trace = false` (message only, no hook installed)
    /// - `sink_capacity = 1024` (good baseline)
    fn default() -> Self {
        Self {
            capture_trace: false,
            sink_capacity: 1024,
        }
    }
}
