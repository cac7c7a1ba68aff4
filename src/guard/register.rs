//! Fixed-width bit registers backing the reentrancy guards.

use std::sync::atomic::{AtomicU16, AtomicU32, AtomicU64, AtomicU8, Ordering};

use crate::error::GuardError;

mod sealed {
    pub trait Sealed {}
}

/// Unsigned integer usable as a guard register (`u8`, `u16`, `u32`, `u64`).
pub trait Register: sealed::Sealed + Copy + Eq + Default + 'static {
    /// Number of independent slots.
    const WIDTH: u32;

    /// Atomic counterpart of this register.
    type Atomic: Send + Sync;

    /// Single-bit mask for `index`; the caller has checked the range.
    fn bit(index: u32) -> Self;

    /// `self & mask != 0`.
    fn has(self, mask: Self) -> bool;

    /// `self | mask`.
    fn with(self, mask: Self) -> Self;

    /// `self & !mask`.
    fn without(self, mask: Self) -> Self;

    /// A zeroed atomic register.
    fn atomic_zero() -> Self::Atomic;

    /// `fetch_or` on the atomic register, returning the previous value.
    fn atomic_set(atomic: &Self::Atomic, mask: Self, order: Ordering) -> Self;

    /// `fetch_and(!mask)` on the atomic register, returning the previous value.
    fn atomic_clear(atomic: &Self::Atomic, mask: Self, order: Ordering) -> Self;

    /// Loads the atomic register.
    fn atomic_load(atomic: &Self::Atomic, order: Ordering) -> Self;
}

macro_rules! register {
    ($ty:ty, $atomic:ty) => {
        impl sealed::Sealed for $ty {}

        impl Register for $ty {
            const WIDTH: u32 = <$ty>::BITS;

            type Atomic = $atomic;

            #[inline]
            fn bit(index: u32) -> Self {
                1 << index
            }

            #[inline]
            fn has(self, mask: Self) -> bool {
                self & mask != 0
            }

            #[inline]
            fn with(self, mask: Self) -> Self {
                self | mask
            }

            #[inline]
            fn without(self, mask: Self) -> Self {
                self & !mask
            }

            fn atomic_zero() -> Self::Atomic {
                <$atomic>::new(0)
            }

            #[inline]
            fn atomic_set(atomic: &Self::Atomic, mask: Self, order: Ordering) -> Self {
                atomic.fetch_or(mask, order)
            }

            #[inline]
            fn atomic_clear(atomic: &Self::Atomic, mask: Self, order: Ordering) -> Self {
                atomic.fetch_and(!mask, order)
            }

            #[inline]
            fn atomic_load(atomic: &Self::Atomic, order: Ordering) -> Self {
                atomic.load(order)
            }
        }
    };
}

register!(u8, AtomicU8);
register!(u16, AtomicU16);
register!(u32, AtomicU32);
register!(u64, AtomicU64);

/// Validates `index` against the width of `W` and returns its mask.
pub(crate) fn mask_for<W: Register>(index: u32) -> Result<W, GuardError> {
    if index < W::WIDTH {
        Ok(W::bit(index))
    } else {
        Err(GuardError::IndexOutOfRange {
            index,
            width: W::WIDTH,
        })
    }
}
