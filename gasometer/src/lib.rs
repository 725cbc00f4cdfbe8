//! Gas metering for smart-contract state transitions.

#![cfg_attr(not(feature = "std"), no_std)]

mod costs;

pub use crate::costs::{hash_cost, log_cost, storage_retrieve_cost, storage_save_cost};

use smartstate_core::ExitError;

#[cfg(feature = "force-debug")]
macro_rules! log_gas {
	($self:expr, $($arg:tt)*) => (
		log::trace!(target: "smartstate", "Gasometer {} [Gas used: {}, Gas left: {}]",
			format_args!($($arg)*), $self.consumed, $self.available())
	);
}

#[cfg(not(feature = "force-debug"))]
macro_rules! log_gas {
	($self:expr, $($arg:tt)*) => {};
}

/// Gas spent by one transition scope against its limit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GasMeter {
	limit: u64,
	consumed: u64,
}

impl GasMeter {
	/// Create a new meter with given gas limit.
	pub fn new(limit: u64) -> Self {
		Self { limit, consumed: 0 }
	}

	pub fn limit(&self) -> u64 {
		self.limit
	}

	/// Gas spent so far.
	pub fn consumed(&self) -> u64 {
		self.consumed
	}

	/// Gas left before the limit is reached.
	pub fn available(&self) -> u64 {
		self.limit.saturating_sub(self.consumed)
	}

	/// Record gas unconditionally. Callers compare against the limit at
	/// their own decision points.
	pub fn spend(&mut self, gas: u64) {
		self.consumed = self.consumed.saturating_add(gas);
		log_gas!(self, "Spend: {}", gas);
	}

	/// Record a cost that must fit in the remaining gas. On overrun the
	/// meter is pinned at its limit and `OutOfGas` is returned.
	pub fn record_cost(&mut self, cost: u64) -> Result<(), ExitError> {
		if cost > self.available() {
			self.consumed = core::cmp::max(self.consumed, self.limit);
			log_gas!(self, "Out of gas recording: {}", cost);
			return Err(ExitError::OutOfGas);
		}

		self.consumed += cost;
		log_gas!(self, "Record cost: {}", cost);
		Ok(())
	}

	pub fn is_exhausted(&self) -> bool {
		self.consumed >= self.limit
	}
}

/// Gas schedule and execution limits.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
pub struct Config {
	/// Charged before any contract code runs.
	pub base_cost: u64,
	/// Flat cost of a storage read.
	pub storage_retrieve_base: u64,
	/// Storage read cost per key and value byte.
	pub storage_retrieve_per_byte: u64,
	/// Flat cost of a storage write.
	pub storage_save_base: u64,
	/// Storage write cost per key and value byte.
	pub storage_save_per_byte: u64,
	/// Flat cost of emitting a log.
	pub log_base: u64,
	/// Log cost per topic and data byte.
	pub log_per_byte: u64,
	/// Hashing cost per input byte.
	pub hash_per_byte: u64,
	/// Maximum nesting of internal creates, calls and transfers.
	pub call_stack_limit: usize,
}

impl Config {
	/// Default schedule.
	pub const fn standard() -> Config {
		Config {
			base_cost: 1_000,
			storage_retrieve_base: 10,
			storage_retrieve_per_byte: 1,
			storage_save_base: 20,
			storage_save_per_byte: 20,
			log_base: 30,
			log_per_byte: 1,
			hash_per_byte: 1,
			call_stack_limit: 1024,
		}
	}
}

impl Default for Config {
	fn default() -> Self {
		Config::standard()
	}
}
