//! # callvisor
//!
//! **Callvisor** provides fault-isolated, multicast callback dispatch for Rust.
//!
//! It wraps arbitrary closures so that a panic raised while they run can be
//! contained and returned as a value, fires ordered lists of such closures with
//! a caller-controlled stop rule, and guards sections of code against
//! recursive re-entry. The crate is designed as a building block for hook and
//! event systems where one misbehaving listener must not take down the
//! dispatcher or its siblings.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Callable   │   │   Callable   │   │   Callable   │
//!     │  (hook #1)   │   │  (hook #2)   │   │  (hook #3)   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            └──────────────────┼──────────────────┘
//!                               ▼  combine()
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Delegate (ordered, append-only)                                  │
//! │  call(isolate, sink, interrupt, args)                             │
//! │    for each element in order:                                     │
//! │      out = element.call(isolate, sink, args.clone())              │
//! │      interrupt(&out) ? ──► return out                             │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Callable::call                                                   │
//! │    isolate = false ──► plain call, panics unwind to the caller    │
//! │    isolate = true  ──► catch_unwind                               │
//! │                          └─ panic ──► Faulted ──► Err(fault)      │
//! │                                          └──► sink.offer() (opt.) │
//! └───────────────────────────────────────────────────────────────────┘
//!
//!     ReentrancyGuard (independent)
//!     call(bit, body): bit set? ──► skip : set ─► body ─► clear (on drop)
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                         |
//! |-------------------|---------------------------------------------------------------|--------------------------------------------|
//! | **Callables**     | Wrap closures of 0..=12 parameters with opt-in isolation.     | [`Callable`], [`Invocable`], [`ZeroValue`] |
//! | **Delegates**     | Sequential multicast with per-call stop rules.                | [`Delegate`], [`interrupt`]                |
//! | **Faults**        | Panics converted to values, optional non-blocking reporting.  | [`Faulted`], [`FaultSink`], [`fault`]      |
//! | **Guards**        | Bit-indexed suppression of recursive entry.                   | [`ReentrancyGuard`], [`AtomicReentrancyGuard`] |
//! | **Configuration** | Panic-site trace capture and sink sizing.                     | [`Config`]                                 |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`FaultLogger`](fault::FaultLogger) sink _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use callvisor::{interrupt, Callable, Config, Delegate};
//!
//! let cfg = Config::default();
//! let (sink, mut faults) = cfg.fault_channel();
//!
//! let on_shutdown: Delegate<(&'static str,), Result<(), String>> = Delegate::new().combine([
//!     Callable::new(|who: &'static str| -> Result<(), String> {
//!         println!("flushing caches for {who}");
//!         Ok(())
//!     }),
//!     Callable::new(|_: &'static str| -> Result<(), String> { panic!("listener bug") }),
//!     Callable::new(|who: &'static str| -> Result<(), String> {
//!         println!("closing sockets for {who}");
//!         Ok(())
//!     }),
//! ]);
//!
//! // Run every listener; one crashing listener does not stop the others.
//! let last = on_shutdown.call(true, Some(&sink), interrupt::never(), ("node-1",));
//! assert_eq!(last, Ok(Ok(())));
//! assert_eq!(faults.try_recv().unwrap().message(), "listener bug");
//! ```
mod callable;
mod config;
mod delegate;
mod error;
pub mod fault;
mod guard;

// ---- Public re-exports ----

pub use callable::{Callable, Invocable, ZeroValue};
pub use config::Config;
pub use delegate::{interrupt, Delegate};
pub use error::{is_faulted, Faulted, GuardError};
pub use fault::FaultSink;
pub use guard::{
    AtomicReentrancyGuard, ReentrancyGuard, ReentrancyGuard16, ReentrancyGuard32,
    ReentrancyGuard64, ReentrancyGuard8, Register,
};
