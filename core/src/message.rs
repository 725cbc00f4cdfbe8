use crate::value::{MethodCall, Value};
use alloc::{string::String, vec::Vec};
use primitive_types::{H160, U256};

/// Deploy new contract code submitted by a transaction.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
	feature = "with-codec",
	derive(scale_codec::Encode, scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExternalCreateMessage {
	pub from: H160,
	pub amount: U256,
	pub gas_limit: u64,
	pub code: Vec<u8>,
	pub parameters: Vec<Value>,
	/// Contract type to construct when the code holds more than one.
	pub type_name: Option<String>,
}

/// Deploy another instance of a type from the sending contract's own code.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
	feature = "with-codec",
	derive(scale_codec::Encode, scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InternalCreateMessage {
	pub from: H160,
	pub amount: U256,
	pub gas_limit: u64,
	pub parameters: Vec<Value>,
	pub type_name: String,
}

/// Invoke a method on a deployed contract from a transaction.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
	feature = "with-codec",
	derive(scale_codec::Encode, scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExternalCallMessage {
	pub to: H160,
	pub from: H160,
	pub amount: U256,
	pub gas_limit: u64,
	pub method: MethodCall,
}

/// Invoke a method on a deployed contract from another contract.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
	feature = "with-codec",
	derive(scale_codec::Encode, scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InternalCallMessage {
	pub to: H160,
	pub from: H160,
	pub amount: U256,
	pub gas_limit: u64,
	pub method: MethodCall,
}

/// Send value from a contract. Reaches the receive handler when the target
/// holds code.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
	feature = "with-codec",
	derive(scale_codec::Encode, scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractTransferMessage {
	pub to: H160,
	pub from: H160,
	pub amount: U256,
	pub gas_limit: u64,
}

/// Requested state transition.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
	feature = "with-codec",
	derive(scale_codec::Encode, scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
	ExternalCreate(ExternalCreateMessage),
	InternalCreate(InternalCreateMessage),
	ExternalCall(ExternalCallMessage),
	InternalCall(InternalCallMessage),
	ContractTransfer(ContractTransferMessage),
}

impl Message {
	pub fn sender(&self) -> H160 {
		match self {
			Message::ExternalCreate(m) => m.from,
			Message::InternalCreate(m) => m.from,
			Message::ExternalCall(m) => m.from,
			Message::InternalCall(m) => m.from,
			Message::ContractTransfer(m) => m.from,
		}
	}

	pub fn amount(&self) -> U256 {
		match self {
			Message::ExternalCreate(m) => m.amount,
			Message::InternalCreate(m) => m.amount,
			Message::ExternalCall(m) => m.amount,
			Message::InternalCall(m) => m.amount,
			Message::ContractTransfer(m) => m.amount,
		}
	}

	pub fn gas_limit(&self) -> u64 {
		match self {
			Message::ExternalCreate(m) => m.gas_limit,
			Message::InternalCreate(m) => m.gas_limit,
			Message::ExternalCall(m) => m.gas_limit,
			Message::InternalCall(m) => m.gas_limit,
			Message::ContractTransfer(m) => m.gas_limit,
		}
	}

	/// Target of a call or transfer. `None` for creates.
	pub fn to(&self) -> Option<H160> {
		match self {
			Message::ExternalCreate(_) | Message::InternalCreate(_) => None,
			Message::ExternalCall(m) => Some(m.to),
			Message::InternalCall(m) => Some(m.to),
			Message::ContractTransfer(m) => Some(m.to),
		}
	}

	/// Whether the message was issued by executing contract code.
	pub fn is_internal(&self) -> bool {
		matches!(
			self,
			Message::InternalCreate(_) | Message::InternalCall(_) | Message::ContractTransfer(_)
		)
	}
}

macro_rules! impl_from_message {
	($variant:ident, $ty:ty) => {
		impl From<$ty> for Message {
			fn from(message: $ty) -> Self {
				Message::$variant(message)
			}
		}
	};
}

impl_from_message!(ExternalCreate, ExternalCreateMessage);
impl_from_message!(InternalCreate, InternalCreateMessage);
impl_from_message!(ExternalCall, ExternalCallMessage);
impl_from_message!(InternalCall, InternalCallMessage);
impl_from_message!(ContractTransfer, ContractTransferMessage);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn common_fields_are_exposed_for_every_variant() {
		let from = H160::repeat_byte(1);
		let to = H160::repeat_byte(2);

		let transfer: Message = ContractTransferMessage {
			to,
			from,
			amount: U256::from(5),
			gas_limit: 100,
		}
		.into();
		assert_eq!(transfer.sender(), from);
		assert_eq!(transfer.to(), Some(to));
		assert_eq!(transfer.amount(), U256::from(5));
		assert_eq!(transfer.gas_limit(), 100);
		assert!(transfer.is_internal());

		let create: Message = ExternalCreateMessage {
			from,
			amount: U256::zero(),
			gas_limit: 50_000,
			code: Vec::new(),
			parameters: Vec::new(),
			type_name: None,
		}
		.into();
		assert_eq!(create.to(), None);
		assert_eq!(create.gas_limit(), 50_000);
		assert!(!create.is_internal());
	}
}
