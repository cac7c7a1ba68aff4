//! # FaultLogger — log every contained fault
//!
//! A minimal [`FaultSink`] that writes each offered fault as an `error`
//! record through `tracing`. Use it for tests or demos; production setups
//! usually forward faults into a channel drained by their own reporter.
//!
//! ## Example output
//! ```text
//! ERROR callvisor::fault::logger: contained fault sink="lifecycle" label="callable_faulted" fault="boom" location="src/main.rs:12:9"
//! ```

use tracing::error;

use crate::error::Faulted;
use crate::fault::FaultSink;

/// Fault sink that logs instead of queueing.
#[derive(Debug, Clone)]
pub struct FaultLogger {
    name: &'static str,
}

impl FaultLogger {
    /// Construct a new [`FaultLogger`] tagged with `name`.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for FaultLogger {
    fn default() -> Self {
        Self::new("default")
    }
}

impl FaultSink for FaultLogger {
    fn offer(&self, fault: Faulted) -> bool {
        error!(
            sink = self.name,
            label = fault.as_label(),
            fault = fault.message(),
            location = fault.location().unwrap_or("unknown"),
            trace = fault.trace().unwrap_or(""),
            "contained fault"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_always_accepts() {
        let logger = FaultLogger::new("tests");
        assert!(logger.offer(Faulted::new("boom")));
        assert!(FaultLogger::default().offer(Faulted::new("again")));
    }
}
