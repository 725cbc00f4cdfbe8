use crate::{error::StateTransitionErrorKind, value::Value};
use primitive_types::H160;

/// Outcome of applying a message. Gas is reported on both arms and is
/// never refunded.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
	feature = "with-codec",
	derive(scale_codec::Encode, scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateTransitionResult {
	Succeed {
		gas_consumed: u64,
		/// Created contract, or the target of a call or transfer.
		contract_address: H160,
		return_value: Option<Value>,
	},
	Fail {
		gas_consumed: u64,
		error: StateTransitionErrorKind,
	},
}

impl StateTransitionResult {
	pub fn succeed(gas_consumed: u64, contract_address: H160, return_value: Option<Value>) -> Self {
		StateTransitionResult::Succeed {
			gas_consumed,
			contract_address,
			return_value,
		}
	}

	pub fn fail<E: Into<StateTransitionErrorKind>>(gas_consumed: u64, error: E) -> Self {
		StateTransitionResult::Fail {
			gas_consumed,
			error: error.into(),
		}
	}

	pub fn is_succeed(&self) -> bool {
		matches!(self, StateTransitionResult::Succeed { .. })
	}

	pub fn gas_consumed(&self) -> u64 {
		match self {
			StateTransitionResult::Succeed { gas_consumed, .. } => *gas_consumed,
			StateTransitionResult::Fail { gas_consumed, .. } => *gas_consumed,
		}
	}

	pub fn contract_address(&self) -> Option<H160> {
		match self {
			StateTransitionResult::Succeed {
				contract_address, ..
			} => Some(*contract_address),
			StateTransitionResult::Fail { .. } => None,
		}
	}

	pub fn return_value(&self) -> Option<&Value> {
		match self {
			StateTransitionResult::Succeed { return_value, .. } => return_value.as_ref(),
			StateTransitionResult::Fail { .. } => None,
		}
	}

	pub fn error(&self) -> Option<&StateTransitionErrorKind> {
		match self {
			StateTransitionResult::Succeed { .. } => None,
			StateTransitionResult::Fail { error, .. } => Some(error),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ExitError;

	#[test]
	fn failure_keeps_gas_and_error() {
		let result = StateTransitionResult::fail(1_200, ExitError::Reverted);
		assert!(!result.is_succeed());
		assert_eq!(result.gas_consumed(), 1_200);
		assert_eq!(result.contract_address(), None);
		assert_eq!(
			result.error(),
			Some(&StateTransitionErrorKind::VmError(ExitError::Reverted))
		);
	}

	#[test]
	fn success_exposes_address_and_value() {
		let address = H160::repeat_byte(9);
		let result = StateTransitionResult::succeed(10, address, Some(Value::Bool(true)));
		assert!(result.is_succeed());
		assert_eq!(result.contract_address(), Some(address));
		assert_eq!(result.return_value(), Some(&Value::Bool(true)));
		assert_eq!(result.error(), None);
	}
}
