//! Logging shim.
//!
//! With the `log` feature the macros forward to the `log` facade, otherwise
//! they expand to nothing and the arguments are never evaluated.

#[cfg(feature = "log")]
pub(crate) use log::{debug, trace};

#[cfg(not(feature = "log"))]
macro_rules! __debug {
    ($($arg:tt)+) => {};
}

#[cfg(not(feature = "log"))]
macro_rules! __trace {
    ($($arg:tt)+) => {};
}

#[cfg(not(feature = "log"))]
pub(crate) use {__debug as debug, __trace as trace};
