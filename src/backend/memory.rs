use super::{ApplyBackend, Backend, ChangeSet};
use crate::{Block, ExitFatal, RawLog};
use alloc::{collections::BTreeMap, string::String, vec::Vec};
use primitive_types::{H160, U256};

/// Block environment served by a memory backend.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
	feature = "with-codec",
	derive(codec::Encode, codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryVicinity {
	/// Environmental block number.
	pub block_number: u64,
	/// Environmental coinbase.
	pub block_coinbase: H160,
}

/// Account information of a memory backend.
#[derive(Default, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
	feature = "with-codec",
	derive(codec::Encode, codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryAccount {
	/// Account balance.
	pub balance: U256,
	/// Account code. Empty for plain accounts.
	pub code: Vec<u8>,
	/// Contract type, if a contract is deployed.
	pub contract_type: Option<String>,
	/// Full account storage.
	pub storage: BTreeMap<Vec<u8>, Vec<u8>>,
}

/// Memory backend, storing all state values in a `BTreeMap` in memory.
#[derive(Clone, Debug)]
pub struct MemoryBackend<'vicinity> {
	vicinity: &'vicinity MemoryVicinity,
	state: BTreeMap<H160, MemoryAccount>,
	logs: Vec<RawLog>,
}

impl<'vicinity> MemoryBackend<'vicinity> {
	/// Create a new memory backend.
	pub fn new(vicinity: &'vicinity MemoryVicinity, state: BTreeMap<H160, MemoryAccount>) -> Self {
		Self {
			vicinity,
			state,
			logs: Vec::new(),
		}
	}

	/// Get the underlying `BTreeMap` storing the state.
	pub fn state(&self) -> &BTreeMap<H160, MemoryAccount> {
		&self.state
	}

	/// Logs persisted by applied transactions.
	pub fn logs(&self) -> &[RawLog] {
		&self.logs
	}
}

impl<'vicinity> Backend for MemoryBackend<'vicinity> {
	fn block(&self) -> Block {
		Block {
			number: self.vicinity.block_number,
			coinbase: self.vicinity.block_coinbase,
		}
	}

	fn exists(&self, address: H160) -> bool {
		self.state.contains_key(&address)
	}

	fn balance(&self, address: H160) -> U256 {
		self.state
			.get(&address)
			.map(|a| a.balance)
			.unwrap_or_default()
	}

	fn code(&self, address: H160) -> Option<Vec<u8>> {
		self.state
			.get(&address)
			.filter(|a| !a.code.is_empty())
			.map(|a| a.code.clone())
	}

	fn contract_type(&self, address: H160) -> Option<String> {
		self.state
			.get(&address)
			.and_then(|a| a.contract_type.clone())
	}

	fn storage(&self, address: H160, key: &[u8]) -> Option<Vec<u8>> {
		self.state
			.get(&address)
			.and_then(|a| a.storage.get(key).cloned())
	}
}

impl<'vicinity> ApplyBackend for MemoryBackend<'vicinity> {
	fn apply(&mut self, changeset: ChangeSet) -> Result<(), ExitFatal> {
		let mut balances = BTreeMap::<H160, U256>::new();
		for transfer in &changeset.transfers {
			let source = balances
				.get(&transfer.from)
				.copied()
				.unwrap_or_else(|| self.balance(transfer.from))
				.checked_sub(transfer.value)
				.ok_or(ExitFatal::BalanceOutOfRange(transfer.from))?;
			balances.insert(transfer.from, source);

			let target = balances
				.get(&transfer.to)
				.copied()
				.unwrap_or_else(|| self.balance(transfer.to))
				.checked_add(transfer.value)
				.ok_or(ExitFatal::BalanceOutOfRange(transfer.to))?;
			balances.insert(transfer.to, target);
		}

		for (address, change) in changeset.accounts {
			let account = self.state.entry(address).or_default();

			if let Some(code) = change.code {
				account.code = code;
			}
			if let Some(contract_type) = change.contract_type {
				account.contract_type = Some(contract_type);
			}
			if change.created {
				account.storage = BTreeMap::new();
			}

			for (key, value) in change.storage {
				if value.is_empty() {
					account.storage.remove(&key);
				} else {
					account.storage.insert(key, value);
				}
			}
		}

		for (address, balance) in balances {
			self.state.entry(address).or_default().balance = balance;
		}

		self.logs.extend(changeset.logs);
		Ok(())
	}
}
