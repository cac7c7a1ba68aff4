//! # Lifecycle Hooks Example
//!
//! Shows how a component can expose fault-isolated lifecycle hooks.
//!
//! The example:
//! - Registers three `on_start` listeners, one of which panics
//! - Fires them with isolation, so the crash is contained and logged
//! - Collects contained faults through a bounded channel
//! - Guards `start` so a nested `start` from inside the section is ignored
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example lifecycle_hooks --features logging
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use callvisor::fault::FaultLogger;
use callvisor::{interrupt, Callable, Config, Delegate, FaultSink, ReentrancyGuard8};
use tracing_subscriber::EnvFilter;

const START_SLOT: u32 = 0;

struct Component {
    name: &'static str,
    on_start: Delegate<(&'static str, u64), Result<(), String>>,
    guard: ReentrancyGuard8,
    generation: AtomicU64,
}

impl Component {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            on_start: Delegate::new(),
            guard: ReentrancyGuard8::new(),
            generation: AtomicU64::new(0),
        }
    }

    fn start(&self, sink: &dyn FaultSink) {
        let ran = self.guard.call(START_SLOT, || {
            let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
            self.on_start.call(
                true,
                Some(sink),
                interrupt::never(),
                (self.name, generation),
            )
        });
        match ran {
            Ok(Some(outcome)) => println!("[start] component={} last={outcome:?}", self.name),
            Ok(None) => println!("[start] component={} skipped (already starting)", self.name),
            Err(e) => println!("[start] component={} guard error: {e}", self.name),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = Config {
        capture_trace: true,
        ..Config::default()
    };
    cfg.apply();
    let (tx, mut rx) = cfg.fault_channel();

    let started = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&started);

    let mut component = Component::new("storage");
    component.on_start = std::mem::take(&mut component.on_start).combine([
        Callable::new(move |name: &'static str, generation: u64| -> Result<(), String> {
            counter.fetch_add(1, Ordering::Relaxed);
            println!("[hook] warming caches for {name} (gen {generation})");
            Ok(())
        }),
        Callable::new(|name: &'static str, _: u64| -> Result<(), String> {
            panic!("listener for {name} dereferenced a dangling handle")
        }),
        Callable::new(|name: &'static str, generation: u64| -> Result<(), String> {
            if generation > 1 {
                return Err(format!("{name} already initialized"));
            }
            println!("[hook] registering {name} with discovery");
            Ok(())
        }),
    ]);

    component.start(&tx);
    component.start(&FaultLogger::new("lifecycle"));

    // Nested start while the section is running: skipped.
    let _ = component
        .guard
        .call(START_SLOT, || component.start(&tx));

    println!();
    println!("Summary:");
    println!(" ├─► Hook runs:  {}", started.load(Ordering::Relaxed));
    while let Ok(fault) = rx.try_recv() {
        println!(
            " ├─► Fault:      {} at {}",
            fault.message(),
            fault.location().unwrap_or("unknown")
        );
    }
    println!(" └─► Done");
}
