//! # Panic-site trace capture.
//!
//! `catch_unwind` hands back only the panic payload; by then the stack that
//! produced it is gone. To enrich a [`Faulted`](crate::Faulted) with a useful
//! location and backtrace, a process-wide panic hook records them at the
//! panic site into a thread-local slot.
//!
//! ## Rules
//! - The hook is installed at most once per process, on the first
//!   [`set_enabled(true)`](set_enabled).
//! - A record is taken only while the current thread is inside an isolation
//!   [`Scope`] and capture is enabled. Such a panic is not forwarded to the
//!   previously installed hook: the fault carries the report instead.
//! - Panics outside a scope, or any panic while capture is off, go to the
//!   previous hook unchanged (default stderr report, test harness, ...).
//! - Disabling capture leaves the hook in place but makes it record nothing.

use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

static ENABLED: AtomicBool = AtomicBool::new(false);
static INSTALL: Once = Once::new();

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
    static LAST: RefCell<Option<PanicRecord>> = const { RefCell::new(None) };
}

/// Location and backtrace recorded by the hook for the latest panic.
#[derive(Debug, Clone)]
pub(crate) struct PanicRecord {
    pub(crate) location: Option<String>,
    pub(crate) trace: String,
}

/// Turns panic-site capture on or off for the whole process.
pub(crate) fn set_enabled(enabled: bool) {
    if enabled {
        INSTALL.call_once(install_hook);
    }
    ENABLED.store(enabled, Ordering::Release);
}

/// Whether panic-site capture is currently on.
pub(crate) fn is_enabled() -> bool {
    ENABLED.load(Ordering::Acquire)
}

fn install_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if !capturing() {
            previous(info);
            return;
        }
        let record = PanicRecord {
            location: info.location().map(|l| l.to_string()),
            trace: Backtrace::force_capture().to_string(),
        };
        LAST.with(|slot| *slot.borrow_mut() = Some(record));
    }));
}

/// Whether a panic on this thread would be recorded (and silenced) right now.
fn capturing() -> bool {
    is_enabled() && DEPTH.with(|d| d.get()) > 0
}

/// Removes and returns the record of the latest panic on this thread.
pub(crate) fn take() -> Option<PanicRecord> {
    LAST.with(|slot| slot.borrow_mut().take())
}

/// Marks the current thread as running inside an isolation boundary.
///
/// Scopes nest; the mark is removed when the outermost scope is dropped.
pub(crate) struct Scope {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl Scope {
    pub(crate) fn enter() -> Self {
        DEPTH.with(|d| d.set(d.get() + 1));
        Self {
            _not_send: std::marker::PhantomData,
        }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Serializes tests that flip the process-wide capture flag.
#[cfg(test)]
static CAPTURE_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Capture switched on for the lifetime of the value, off again on drop.
#[cfg(test)]
pub(crate) struct CaptureOn {
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
pub(crate) fn capture_on() -> CaptureOn {
    let lock = CAPTURE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    set_enabled(true);
    CaptureOn { _lock: lock }
}

#[cfg(test)]
impl Drop for CaptureOn {
    fn drop(&mut self) {
        set_enabled(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_nesting_restores_depth() {
        let before = DEPTH.with(|d| d.get());
        {
            let _outer = Scope::enter();
            {
                let _inner = Scope::enter();
                assert_eq!(DEPTH.with(|d| d.get()), before + 2);
            }
            assert_eq!(DEPTH.with(|d| d.get()), before + 1);
        }
        assert_eq!(DEPTH.with(|d| d.get()), before);
    }

    #[test]
    fn test_take_empties_slot() {
        LAST.with(|slot| {
            *slot.borrow_mut() = Some(PanicRecord {
                location: None,
                trace: String::new(),
            })
        });
        assert!(take().is_some());
        assert!(take().is_none());
    }

    #[test]
    fn test_only_scoped_panics_are_captured() {
        let _capture = capture_on();
        assert!(!capturing());

        let _scope = Scope::enter();
        assert!(capturing());
        set_enabled(false);
        assert!(!capturing());
    }

    #[test]
    fn test_scoped_panic_recorded_with_site() {
        let _capture = capture_on();
        let caught = {
            let _scope = Scope::enter();
            panic::catch_unwind(|| panic!("recorded"))
        };
        assert!(caught.is_err());
        let record = take().expect("panic inside scope should be recorded");
        assert!(record.location.is_some_and(|l| l.contains("trace.rs")));
        assert!(!record.trace.is_empty());
    }
}
