#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![doc = include_str!("../README.md")]

extern crate alloc;

// Lets `#[derive(Reflect)]` output (which names `::tagbind`) work inside this crate.
extern crate self as tagbind;

pub use tagbind_core::*;
pub use tagbind_macros::Reflect;

mod error;
pub use error::*;

mod path;
pub use path::AccessPath;

mod mapper;
pub use mapper::*;

mod coerce;
pub use coerce::{coerce, parse_bool, parse_integer};

mod bind;
pub use bind::*;

mod input;
pub use input::BindInput;

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
/// Forwards to tracing::trace when the tracing feature is enabled
macro_rules! trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
/// Forwards to tracing::debug when the tracing feature is enabled
macro_rules! debug {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
pub(crate) use {debug, trace};
