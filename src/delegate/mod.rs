//! Multicast delegates.
//!
//! ## Contents
//! - [`Delegate`]  ordered list of callables fired with a per-call stop rule
//! - [`interrupt`] ready-made stop rules

#[allow(clippy::module_inception)]
mod delegate;
pub mod interrupt;

pub use delegate::Delegate;
