//! Conversion of a captured panic payload into a [`Faulted`] error.

use std::any::Any;

use crate::error::Faulted;
use crate::fault::trace::PanicRecord;

/// Renders a panic payload as text.
///
/// `panic!("literal")` carries a `&'static str`, formatted panics carry a
/// `String`; anything else (`panic_any`) is reported as unknown.
pub(crate) fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(fault) = payload.downcast_ref::<Faulted>() {
        fault.message().to_string()
    } else {
        "unknown panic".to_string()
    }
}

/// Builds a [`Faulted`] from a panic payload and the optional panic-site record.
pub(crate) fn convert(payload: Box<dyn Any + Send>, record: Option<PanicRecord>) -> Faulted {
    let fault = Faulted::new(payload_message(payload.as_ref()));
    match record {
        Some(PanicRecord { location, trace }) => {
            let fault = fault.with_trace(trace);
            match location {
                Some(location) => fault.with_location(location),
                None => fault,
            }
        }
        None => fault,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_str_payload() {
        let fault = convert(Box::new("boom"), None);
        assert_eq!(fault.message(), "boom");
        assert!(fault.trace().is_none());
    }

    #[test]
    fn test_string_payload() {
        let fault = convert(Box::new(format!("bad index {}", 7)), None);
        assert_eq!(fault.message(), "bad index 7");
    }

    #[test]
    fn test_unknown_payload() {
        let fault = convert(Box::new(42_u32), None);
        assert_eq!(fault.message(), "unknown panic");
    }

    #[test]
    fn test_resumed_fault_payload_keeps_message() {
        let fault = convert(Box::new(Faulted::new("inner")), None);
        assert_eq!(fault.message(), "inner");
    }

    #[test]
    fn test_record_enriches_fault() {
        let record = PanicRecord {
            location: Some("src/hooks.rs:10:5".to_string()),
            trace: "0: hooks::fire".to_string(),
        };
        let fault = convert(Box::new("boom"), Some(record));
        assert_eq!(fault.location(), Some("src/hooks.rs:10:5"));
        assert_eq!(fault.trace(), Some("0: hooks::fire"));
    }
}
