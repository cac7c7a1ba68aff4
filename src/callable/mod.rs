//! Callables and their shapes.
//!
//! ## Contents
//! - [`Callable`] wrapped closure with the exec / invoke / call contract
//! - [`Invocable`] arity adapter from plain closures to argument tuples
//! - [`ZeroValue`] what an empty callable returns for each return shape

#[allow(clippy::module_inception)]
mod callable;
mod invocable;
mod shape;

pub use callable::Callable;
pub use invocable::Invocable;
pub use shape::ZeroValue;
