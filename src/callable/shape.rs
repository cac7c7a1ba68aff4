//! # Return shapes
//!
//! An empty [`Callable`](crate::Callable) (and an empty
//! [`Delegate`](crate::Delegate)) still has to return *something*: the zero
//! value of its return type. [`ZeroValue`] describes that value for every
//! supported return shape.
//!
//! | Shape                | Rust type        | Zero value                 |
//! |----------------------|------------------|----------------------------|
//! | no return value      | `()`             | `()`                       |
//! | one return value     | `T`              | `T::zero_value()`          |
//! | value + error        | `Result<T, E>`   | `Ok(T::zero_value())`      |
//! | two return values    | `(T, U)`         | `(T::zero_value(), ..)`    |
//!
//! Custom return types opt in with [`zero_value_default!`](crate::zero_value_default),
//! which reuses their `Default` impl.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

/// The value an empty callable returns.
pub trait ZeroValue {
    /// Returns the zero value of this type.
    fn zero_value() -> Self;
}

/// Implements [`ZeroValue`] through `Default` for the listed types.
///
/// # Example
/// ```
/// use callvisor::{zero_value_default, ZeroValue};
///
/// #[derive(Default, Debug, PartialEq)]
/// struct Reply { code: u16 }
///
/// zero_value_default!(Reply);
///
/// assert_eq!(Reply::zero_value(), Reply { code: 0 });
/// ```
#[macro_export]
macro_rules! zero_value_default {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::ZeroValue for $ty {
                fn zero_value() -> Self {
                    <$ty as ::std::default::Default>::default()
                }
            }
        )+
    };
}

zero_value_default!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
    Duration,
);

impl<T> ZeroValue for Option<T> {
    fn zero_value() -> Self {
        None
    }
}

impl<T> ZeroValue for Vec<T> {
    fn zero_value() -> Self {
        Vec::new()
    }
}

impl<T> ZeroValue for VecDeque<T> {
    fn zero_value() -> Self {
        VecDeque::new()
    }
}

impl<K, V> ZeroValue for HashMap<K, V> {
    fn zero_value() -> Self {
        HashMap::new()
    }
}

impl<T: Eq + Hash> ZeroValue for HashSet<T> {
    fn zero_value() -> Self {
        HashSet::new()
    }
}

impl<K, V> ZeroValue for BTreeMap<K, V> {
    fn zero_value() -> Self {
        BTreeMap::new()
    }
}

impl<T: ZeroValue> ZeroValue for Box<T> {
    fn zero_value() -> Self {
        Box::new(T::zero_value())
    }
}

impl<T: ZeroValue> ZeroValue for Arc<T> {
    fn zero_value() -> Self {
        Arc::new(T::zero_value())
    }
}

impl<'a, B> ZeroValue for Cow<'a, B>
where
    B: ToOwned + ?Sized,
    B::Owned: ZeroValue,
{
    fn zero_value() -> Self {
        Cow::Owned(B::Owned::zero_value())
    }
}

impl ZeroValue for &str {
    fn zero_value() -> Self {
        ""
    }
}

impl<T: ZeroValue, E> ZeroValue for Result<T, E> {
    fn zero_value() -> Self {
        Ok(T::zero_value())
    }
}

macro_rules! zero_value_tuple {
    ($($name:ident),+) => {
        impl<$($name: ZeroValue),+> ZeroValue for ($($name,)+) {
            fn zero_value() -> Self {
                ($($name::zero_value(),)+)
            }
        }
    };
}

zero_value_tuple!(A);
zero_value_tuple!(A, B);
zero_value_tuple!(A, B, C);
zero_value_tuple!(A, B, C, D);
