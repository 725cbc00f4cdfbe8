use primitive_types::{H160, U256};

/// Environmental block information.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
	/// Block number.
	pub number: u64,
	/// Block coinbase.
	pub coinbase: H160,
}

/// Message as seen by the executing contract.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageView {
	/// Address of the executing contract.
	pub contract_address: H160,
	/// Caller of the executing contract.
	pub sender: H160,
	/// Value sent with the message.
	pub amount: U256,
	/// Gas limit of the message.
	pub gas_limit: u64,
}
