//! # Arity adapter
//!
//! [`Invocable`] lets [`Callable::new`](crate::Callable::new) accept ordinary
//! closures of any supported arity while storing them uniformly as
//! `Fn(Args) -> R` over an argument **tuple**.
//!
//! ```text
//! |a: u32, b: &'static str| -> R   ──►  Invocable<(u32, &'static str), R>
//! ||                         -> R   ──►  Invocable<(), R>
//! |head: String, rest: Vec<u8>|     ──►  trailing variadic as a Vec
//! ```
//!
//! Implementations are generated for 0..=12 positional parameters.

/// Closure that can be called with an argument tuple `Args`.
pub trait Invocable<Args, R>: Send + Sync + 'static {
    /// Calls the closure, spreading the tuple into positional parameters.
    fn invoke_with(&self, args: Args) -> R;
}

macro_rules! invocable_arity {
    ($($arg:ident),*) => {
        impl<F, R, $($arg,)*> Invocable<($($arg,)*), R> for F
        where
            F: Fn($($arg),*) -> R + Send + Sync + 'static,
        {
            #[allow(non_snake_case)]
            #[inline]
            fn invoke_with(&self, ($($arg,)*): ($($arg,)*)) -> R {
                (self)($($arg),*)
            }
        }
    };
}

invocable_arity!();
invocable_arity!(T0);
invocable_arity!(T0, T1);
invocable_arity!(T0, T1, T2);
invocable_arity!(T0, T1, T2, T3);
invocable_arity!(T0, T1, T2, T3, T4);
invocable_arity!(T0, T1, T2, T3, T4, T5);
invocable_arity!(T0, T1, T2, T3, T4, T5, T6);
invocable_arity!(T0, T1, T2, T3, T4, T5, T6, T7);
invocable_arity!(T0, T1, T2, T3, T4, T5, T6, T7, T8);
invocable_arity!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9);
invocable_arity!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
invocable_arity!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
