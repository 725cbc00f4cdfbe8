//! # Backing store
//!
//! The backend is the committed account store beneath every layer. The
//! executor only reads from it; a finished transaction is written back
//! through [`ApplyBackend`].

mod memory;

pub use self::memory::{MemoryAccount, MemoryBackend, MemoryVicinity};

use crate::{Block, ExitFatal, RawLog, TransferInfo};
use alloc::{collections::BTreeMap, string::String, vec::Vec};
use primitive_types::{H160, U256};

/// Committed account data read by the executor.
#[auto_impl::auto_impl(&, Box)]
pub trait Backend {
	/// Environmental block.
	fn block(&self) -> Block;
	/// Whether an account exists at address.
	fn exists(&self, address: H160) -> bool;
	/// Committed balance of address.
	fn balance(&self, address: H160) -> U256;
	/// Deployed code of address.
	fn code(&self, address: H160) -> Option<Vec<u8>>;
	/// Contract type deployed at address.
	fn contract_type(&self, address: H160) -> Option<String>;
	/// Storage value of address at key.
	fn storage(&self, address: H160, key: &[u8]) -> Option<Vec<u8>>;
}

/// Writes to a single account made by a committed transaction.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
	feature = "with-codec",
	derive(codec::Encode, codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountChange {
	/// Account was created by this transaction.
	pub created: bool,
	pub code: Option<Vec<u8>>,
	pub contract_type: Option<String>,
	/// Storage writes. An empty value deletes the key.
	pub storage: BTreeMap<Vec<u8>, Vec<u8>>,
}

/// Everything a finished transaction leaves behind.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
	feature = "with-codec",
	derive(codec::Encode, codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeSet {
	pub accounts: BTreeMap<H160, AccountChange>,
	pub logs: Vec<RawLog>,
	/// Internal transfers, in the order they were recorded.
	pub transfers: Vec<TransferInfo>,
}

/// Backend that can persist a finished transaction.
pub trait ApplyBackend {
	/// Apply given change set. Nothing is written when a transfer would
	/// drive a balance out of range.
	fn apply(&mut self, changeset: ChangeSet) -> Result<(), ExitFatal>;
}
