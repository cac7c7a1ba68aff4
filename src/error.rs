//! Error types used by callables, delegates and guards.
//!
//! This module defines two error types:
//!
//! - [`Faulted`] — a panic that was captured because isolation was requested.
//! - [`GuardError`] — misuse of a reentrancy guard register.
//!
//! Both types provide `as_label` for logging. Ordinary errors returned by a
//! wrapped callable (`Result<T, E>` return shapes) are never converted; they
//! travel through untouched inside `Ok(..)`.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// # A panic captured at an invocation boundary.
///
/// Produced only when isolation was requested **and** the wrapped callable
/// panicked during that specific call. The type itself is the sentinel: a
/// caller holding `Err(Faulted)` knows the callee crashed and was contained,
/// as opposed to returning an error of its own.
///
/// `location` and `trace` are filled only when trace capture is enabled
/// (see [`Config::capture_trace`](crate::Config::capture_trace)).
///
/// Equality compares `message` and `location` only. The backtrace also holds
/// the frames of whoever caught the panic, so it differs between call sites.
#[derive(Error, Clone)]
#[error("faulted: {message}")]
pub struct Faulted {
    message: String,
    location: Option<String>,
    trace: Option<String>,
}

impl Faulted {
    /// Creates a fault from a panic message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
            trace: None,
        }
    }

    /// Attaches the `file:line:col` the panic was raised at.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Attaches a rendered backtrace.
    #[must_use]
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// The panic payload rendered as text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Source location of the panic, if it was captured.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Rendered backtrace of the panicking thread, if it was captured.
    pub fn trace(&self) -> Option<&str> {
        self.trace.as_deref()
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use callvisor::Faulted;
    ///
    /// assert_eq!(Faulted::new("boom").as_label(), "callable_faulted");
    /// ```
    pub fn as_label(&self) -> &'static str {
        "callable_faulted"
    }
}

// Hand-written so that multi-kilobyte traces do not flood `{:?}` output.
impl fmt::Debug for Faulted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Faulted")
            .field("message", &self.message)
            .field("location", &self.location)
            .field("trace", &self.trace.as_ref().map(|t| t.lines().count()))
            .finish()
    }
}

impl PartialEq for Faulted {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message && self.location == other.location
    }
}

impl Eq for Faulted {}

/// Reports whether `err`, or any error in its source chain, is a [`Faulted`].
///
/// Useful once a fault has been wrapped into a caller's own error type.
///
/// # Example
/// ```
/// use callvisor::{is_faulted, Faulted};
///
/// let err = Faulted::new("boom");
/// assert!(is_faulted(&err));
///
/// let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
/// assert!(!is_faulted(&io));
/// ```
pub fn is_faulted(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<Faulted>() {
            return true;
        }
        current = e.source();
    }
    false
}

/// # Errors produced by reentrancy guards.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardError {
    /// The bit index does not fit in the guard register.
    #[error("bit index {index} out of range for {width}-bit guard register")]
    IndexOutOfRange {
        /// Requested bit index.
        index: u32,
        /// Width of the register in bits.
        width: u32,
    },
}

impl GuardError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            GuardError::IndexOutOfRange { .. } => "guard_index_out_of_range",
        }
    }
}
