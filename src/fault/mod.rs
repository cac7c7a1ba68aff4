//! # Fault isolation
//!
//! Everything needed to turn a panic at a call boundary into a value:
//!
//! - [`isolate`] / [`isolate_future`] run code inside a protected scope.
//! - [`FaultSink`] is the non-blocking observer contract for contained faults.
//! - The converter renders the panic payload (and, when enabled, the
//!   panic-site location and backtrace) into a [`Faulted`](crate::Faulted).
//!
//! ## Which faults are recoverable
//! Only **unwinding** panics are contained. Builds with `panic = "abort"`,
//! stack overflows and explicit aborts terminate the process regardless of
//! isolation.
//!
//! ## Panic reports
//! With [`Config::capture_trace`](crate::Config::capture_trace) on, a contained
//! panic is reported only through the returned fault and the sink. With it
//! off, no hook is involved and Rust's default hook still prints
//! `thread '..' panicked at ..` to stderr for every contained panic.

mod convert;
mod isolate;
#[cfg(feature = "logging")]
mod logger;
mod sink;
pub(crate) mod trace;

pub use isolate::{isolate, isolate_future};
#[cfg(feature = "logging")]
pub use logger::FaultLogger;
pub use sink::FaultSink;
