//! Reentrancy guards.
//!
//! ## Contents
//! - [`ReentrancyGuard`]       single-thread guard over a `Cell` register
//! - [`AtomicReentrancyGuard`] cross-thread guard over an atomic register
//! - [`Register`]              supported register widths (`u8`..`u64`)

mod atomic;
#[allow(clippy::module_inception)]
mod guard;
mod register;

pub use atomic::AtomicReentrancyGuard;
pub use guard::{
    ReentrancyGuard, ReentrancyGuard16, ReentrancyGuard32, ReentrancyGuard64, ReentrancyGuard8,
};
pub use register::Register;
