//! # Executors
//!
//! The executor drives the virtual machine through nested state
//! transitions. It owns the layer stack, the transaction gas budget, the
//! event log and the internal transfer list.

mod stack;

pub use self::stack::{
	generate_address, BalanceState, ContractFrame, LayerId, LayeredState, LogHolder, State,
};
