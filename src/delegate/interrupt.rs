//! # Ready-made interrupt predicates
//!
//! A predicate is any `FnMut(&Outcome) -> bool`; returning `true` stops the
//! multicast. These cover the common policies:
//!
//! | Predicate         | Stops at                                   |
//! |-------------------|--------------------------------------------|
//! | [`never`]         | nothing (run all, keep the last outcome)   |
//! | [`on_fault`]      | first contained fault                      |
//! | [`on_completion`] | first element that did not fault           |
//! | [`on_ok`]         | first `Ok(Ok(_))` (first success)          |
//! | [`on_failure`]    | first fault or ordinary `Err`              |

use crate::error::Faulted;

/// Never interrupts; works for `exec` and `call` alike.
pub fn never<T: ?Sized>() -> impl FnMut(&T) -> bool {
    |_| false
}

/// Stops at the first contained fault.
pub fn on_fault<R>() -> impl FnMut(&Result<R, Faulted>) -> bool {
    |out| out.is_err()
}

/// Stops at the first element that completed without faulting.
pub fn on_completion<R>() -> impl FnMut(&Result<R, Faulted>) -> bool {
    |out| out.is_ok()
}

/// Stops at the first element that returned `Ok` without faulting.
pub fn on_ok<T, E>() -> impl FnMut(&Result<Result<T, E>, Faulted>) -> bool {
    |out| matches!(out, Ok(Ok(_)))
}

/// Stops at the first fault or ordinary error.
pub fn on_failure<T, E>() -> impl FnMut(&Result<Result<T, E>, Faulted>) -> bool {
    |out| !matches!(out, Ok(Ok(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_accepts_any_outcome() {
        assert!(!never::<u32>()(&1));
        assert!(!never::<Result<u32, Faulted>>()(&Err(Faulted::new("boom"))));
    }

    #[test]
    fn test_fault_predicates() {
        let fault: Result<u8, Faulted> = Err(Faulted::new("boom"));
        let value: Result<u8, Faulted> = Ok(1);
        assert!(on_fault()(&fault));
        assert!(!on_fault()(&value));
        assert!(on_completion()(&value));
        assert!(!on_completion()(&fault));
    }

    #[test]
    fn test_fallible_predicates() {
        let ok: Result<Result<u8, String>, Faulted> = Ok(Ok(1));
        let err: Result<Result<u8, String>, Faulted> = Ok(Err("no".into()));
        let fault: Result<Result<u8, String>, Faulted> = Err(Faulted::new("boom"));

        assert!(on_ok()(&ok));
        assert!(!on_ok()(&err));
        assert!(!on_ok()(&fault));

        assert!(!on_failure()(&ok));
        assert!(on_failure()(&err));
        assert!(on_failure()(&fault));
    }
}
