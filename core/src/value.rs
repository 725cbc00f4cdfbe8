use alloc::{string::String, vec::Vec};
use primitive_types::{H160, U256};

/// Name of the method invoked when value is sent to a contract without an
/// explicit method.
pub const RECEIVE_HANDLER_NAME: &str = "Receive";

/// Argument or return value exchanged with contract code.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
	feature = "with-codec",
	derive(scale_codec::Encode, scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
	Bool(bool),
	U32(u32),
	I32(i32),
	U64(u64),
	I64(i64),
	U256(U256),
	Address(H160),
	String(String),
	Bytes(Vec<u8>),
}

/// Method to invoke on a contract, with its arguments.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
	feature = "with-codec",
	derive(scale_codec::Encode, scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodCall {
	/// Method name. Empty names are rejected before execution.
	pub name: String,
	/// Arguments, in declaration order.
	pub parameters: Vec<Value>,
}

impl MethodCall {
	pub fn new<N: Into<String>>(name: N, parameters: Vec<Value>) -> Self {
		Self {
			name: name.into(),
			parameters,
		}
	}

	/// The call made when value is transferred to a contract.
	pub fn receive() -> Self {
		Self::new(RECEIVE_HANDLER_NAME, Vec::new())
	}

	pub fn is_receive_handler(&self) -> bool {
		self.name == RECEIVE_HANDLER_NAME
	}

	pub fn has_name(&self) -> bool {
		!self.name.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloc::vec;

	#[test]
	fn receive_call_is_named() {
		let call = MethodCall::receive();
		assert!(call.has_name());
		assert!(call.is_receive_handler());
		assert!(call.parameters.is_empty());
	}

	#[test]
	fn empty_name_is_not_a_name() {
		let call = MethodCall::new("", vec![Value::U64(1)]);
		assert!(!call.has_name());
		assert!(!call.is_receive_handler());
	}
}
