use super::{LayerId, State};
use crate::backend::Backend;
use crate::gasometer::{self, GasMeter};
use crate::{
	Block, ContractTransferMessage, ExitError, ExitFatal, Handler, InternalCallMessage,
	InternalCreateMessage, InternalExecutor, MessageView, MethodCall, RawLog,
	StateTransitionErrorKind, StateTransitionResult, Value, Vm, VmError,
};
use alloc::{string::String, vec::Vec};
use core::cmp::min;
use primitive_types::{H160, H256, U256};
use sha3::{Digest, Keccak256};

/// Handler for one executing contract. Borrows the whole [`State`] so that
/// internal messages can re-enter it one layer deeper.
pub struct ContractFrame<'state, 'config, 'vm, B, V> {
	state: &'state mut State<'config, 'vm, B, V>,
	layer: LayerId,
	gas_meter: GasMeter,
	message: MessageView,
	depth: usize,
	constructing: bool,
	nested_gas: u64,
}

impl<'state, 'config, 'vm, B: Backend, V: Vm> ContractFrame<'state, 'config, 'vm, B, V> {
	pub(super) fn new(
		state: &'state mut State<'config, 'vm, B, V>,
		layer: LayerId,
		gas_meter: GasMeter,
		message: MessageView,
		constructing: bool,
	) -> Self {
		let depth = state.layers.depth();

		Self {
			state,
			layer,
			gas_meter,
			message,
			depth,
			constructing,
			nested_gas: 0,
		}
	}

	/// Layer this frame writes into.
	pub fn layer(&self) -> LayerId {
		self.layer
	}

	/// Nesting depth, starting at one for a top-level application.
	pub fn depth(&self) -> usize {
		self.depth
	}

	/// Give back the meter, along with the part of its consumption that
	/// nested applications already debited from the transaction budget.
	pub(super) fn finish(self) -> (GasMeter, u64) {
		(self.gas_meter, self.nested_gas)
	}

	fn too_deep(&self) -> bool {
		self.depth >= self.state.config.call_stack_limit
	}

	fn nested_gas_limit(&self, requested: Option<u64>) -> u64 {
		let available = self.gas_meter.available();
		requested.map_or(available, |gas| min(gas, available))
	}

	fn charge_nested(&mut self, result: &StateTransitionResult) {
		let gas = result.gas_consumed();
		self.gas_meter.spend(gas);
		self.nested_gas = self.nested_gas.saturating_add(gas);
	}
}

impl<'state, 'config, 'vm, B: Backend, V: Vm> InternalExecutor
	for ContractFrame<'state, 'config, 'vm, B, V>
{
	fn create(
		&mut self,
		amount: U256,
		type_name: &str,
		parameters: Vec<Value>,
		gas_limit: Option<u64>,
	) -> Result<StateTransitionResult, ExitFatal> {
		if self.too_deep() {
			return Ok(StateTransitionResult::fail(
				0,
				StateTransitionErrorKind::CallTooDeep,
			));
		}
		if self.state.balance(self.message.contract_address)? < amount {
			return Ok(StateTransitionResult::fail(
				0,
				StateTransitionErrorKind::InsufficientBalance,
			));
		}

		log::trace!(
			target: "smartstate",
			"Internal create of {} from {:?}",
			type_name,
			self.message.contract_address,
		);

		let message = InternalCreateMessage {
			from: self.message.contract_address,
			amount,
			gas_limit: self.nested_gas_limit(gas_limit),
			parameters,
			type_name: type_name.into(),
		};
		let result = self.state.apply(message)?;
		self.charge_nested(&result);

		Ok(result)
	}

	fn call(
		&mut self,
		to: H160,
		amount: U256,
		method: MethodCall,
		gas_limit: Option<u64>,
	) -> Result<StateTransitionResult, ExitFatal> {
		if self.too_deep() {
			return Ok(StateTransitionResult::fail(
				0,
				StateTransitionErrorKind::CallTooDeep,
			));
		}

		log::trace!(
			target: "smartstate",
			"Internal call from {:?} to {:?}",
			self.message.contract_address,
			to,
		);

		let message = InternalCallMessage {
			to,
			from: self.message.contract_address,
			amount,
			gas_limit: self.nested_gas_limit(gas_limit),
			method,
		};
		let result = self.state.apply(message)?;
		self.charge_nested(&result);

		Ok(result)
	}

	fn transfer(&mut self, to: H160, amount: U256) -> Result<StateTransitionResult, ExitFatal> {
		if self.too_deep() {
			return Ok(StateTransitionResult::fail(
				0,
				StateTransitionErrorKind::CallTooDeep,
			));
		}

		let message = ContractTransferMessage {
			to,
			from: self.message.contract_address,
			amount,
			gas_limit: self.gas_meter.available(),
		};
		let result = self.state.apply(message)?;
		self.charge_nested(&result);

		Ok(result)
	}
}

impl<'state, 'config, 'vm, B: Backend, V: Vm> Handler for ContractFrame<'state, 'config, 'vm, B, V> {
	fn message(&self) -> &MessageView {
		&self.message
	}

	fn block(&self) -> &Block {
		&self.state.block
	}

	fn gas_meter(&self) -> &GasMeter {
		&self.gas_meter
	}

	fn record_cost(&mut self, cost: u64) -> Result<(), ExitError> {
		self.gas_meter.record_cost(cost)
	}

	fn balance(&self) -> Result<U256, VmError> {
		Ok(self.state.balance(self.message.contract_address)?)
	}

	fn code(&self, address: H160) -> Option<Vec<u8>> {
		self.state.layers.code(self.layer, address)
	}

	fn contract_type(&self, address: H160) -> Option<String> {
		self.state.layers.contract_type(self.layer, address)
	}

	fn storage(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>, VmError> {
		let value = self
			.state
			.layers
			.storage(self.layer, self.message.contract_address, key);
		let cost = gasometer::storage_retrieve_cost(self.state.config, key, value.as_deref());
		self.gas_meter.record_cost(cost)?;

		Ok(value)
	}

	fn set_storage(&mut self, key: &[u8], value: &[u8]) -> Result<(), VmError> {
		let cost = gasometer::storage_save_cost(self.state.config, key, value);
		self.gas_meter.record_cost(cost)?;

		self.state.layers.set_storage(
			self.layer,
			self.message.contract_address,
			key.to_vec(),
			value.to_vec(),
		)?;
		Ok(())
	}

	fn set_code(&mut self, code: Vec<u8>) -> Result<(), VmError> {
		if !self.constructing {
			return Err(ExitError::CodeImmutable.into());
		}

		self.state
			.layers
			.set_code(self.layer, self.message.contract_address, code)?;
		Ok(())
	}

	fn set_contract_type(&mut self, type_name: String) -> Result<(), VmError> {
		if !self.constructing {
			return Err(ExitError::CodeImmutable.into());
		}

		self.state
			.layers
			.set_contract_type(self.layer, self.message.contract_address, type_name)?;
		Ok(())
	}

	fn log(&mut self, topics: Vec<Vec<u8>>, data: Vec<u8>) -> Result<(), VmError> {
		let log = RawLog {
			address: self.message.contract_address,
			topics,
			data,
		};
		self.gas_meter
			.record_cost(gasometer::log_cost(self.state.config, &log))?;

		self.state.logs.add_raw_logs(core::iter::once(log));
		Ok(())
	}

	fn hash(&mut self, data: &[u8]) -> Result<H256, VmError> {
		self.gas_meter
			.record_cost(gasometer::hash_cost(self.state.config, data.len()))?;

		Ok(H256::from_slice(Keccak256::digest(data).as_slice()))
	}
}
