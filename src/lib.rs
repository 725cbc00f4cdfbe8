//! Layered, gas-metered state transitions for smart-contract execution.
//!
//! A [`executor::State`] applies one top-level message and every internal
//! message its contracts issue. Each application runs in its own copy-on-write
//! layer and is either committed into its parent or discarded as a whole.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use smartstate_gasometer as gasometer;
pub use smartstate_runtime::*;

#[cfg(feature = "tracing")]
pub mod tracing;

#[cfg(feature = "tracing")]
macro_rules! event {
	($x:expr) => {{
		use crate::tracing::Event::*;
		$x.emit();
	}};
}

#[cfg(not(feature = "tracing"))]
macro_rules! event {
	($x:expr) => {};
}

pub mod backend;
pub mod executor;
