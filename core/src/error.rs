use alloc::string::String;
use primitive_types::{H160, U256};

/// Fault raised by executing contract code. The enclosing transition is
/// rolled back and the fault is reported to the caller.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[cfg_attr(
	feature = "with-codec",
	derive(scale_codec::Encode, scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExitError {
	/// Gas meter could not cover a cost.
	#[error("out of gas")]
	OutOfGas,
	/// Contract explicitly reverted.
	#[error("reverted")]
	Reverted,
	/// Contract assertion failed.
	#[error("assertion failed")]
	AssertionFailed,
	/// The requested method does not exist on the contract type.
	#[error("method not found: {0}")]
	MethodNotFound(String),
	/// The requested contract type does not exist in the module.
	#[error("contract type not found: {0}")]
	TypeNotFound(String),
	/// Code or type was written outside of construction.
	#[error("code is immutable once deployed")]
	CodeImmutable,
	/// Other normal errors.
	#[error("{0}")]
	Other(String),
}

/// Unrecoverable condition. Terminates processing of the whole top-level
/// transaction rather than rolling back a single scope.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[cfg_attr(
	feature = "with-codec",
	derive(scale_codec::Encode, scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExitFatal {
	/// An internal create asked to move more value than its sender holds.
	#[error("internal create from {sender:?} requested {amount} with balance {balance}")]
	UnaffordableInternalCreate {
		sender: H160,
		amount: U256,
		balance: U256,
	},
	/// A layer was committed or written while not the top of the arena.
	#[error("layer {0} is not the live top layer")]
	LayerOutOfOrder(usize),
	/// Recorded transfers drive a balance below zero or past `U256::MAX`.
	#[error("balance of {0:?} is out of range")]
	BalanceOutOfRange(H160),
	/// Other fatal errors.
	#[error("{0}")]
	Other(String),
}

/// Error returned by a virtual machine entry point.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum VmError {
	#[error(transparent)]
	Error(#[from] ExitError),
	#[error(transparent)]
	Fatal(#[from] ExitFatal),
}

/// Why a state transition failed.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[cfg_attr(
	feature = "with-codec",
	derive(scale_codec::Encode, scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateTransitionErrorKind {
	/// Remaining gas did not cover the message gas limit or the base cost.
	#[error("insufficient gas")]
	InsufficientGas,
	/// Call carried an empty method name.
	#[error("no method name")]
	NoMethodName,
	/// Target address has no code.
	#[error("no code at target address")]
	NoCode,
	/// Sender's effective balance is lower than the amount.
	#[error("insufficient balance")]
	InsufficientBalance,
	/// Nested call would exceed the configured call stack limit.
	#[error("call too deep")]
	CallTooDeep,
	/// Contract code faulted.
	#[error("vm error: {0}")]
	VmError(ExitError),
}

impl From<ExitError> for StateTransitionErrorKind {
	fn from(error: ExitError) -> Self {
		StateTransitionErrorKind::VmError(error)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloc::string::ToString;

	#[test]
	fn vm_error_converts_from_both_classes() {
		assert_eq!(
			VmError::from(ExitError::OutOfGas),
			VmError::Error(ExitError::OutOfGas)
		);
		assert_eq!(
			VmError::from(ExitFatal::LayerOutOfOrder(3)),
			VmError::Fatal(ExitFatal::LayerOutOfOrder(3))
		);
	}

	#[test]
	fn error_kind_display_includes_fault() {
		let kind = StateTransitionErrorKind::from(ExitError::MethodNotFound("Run".into()));
		assert_eq!(kind.to_string(), "vm error: method not found: Run");
	}
}
