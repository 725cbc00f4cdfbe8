use crate::{Block, MessageView};
use alloc::{string::String, vec::Vec};
use primitive_types::{H160, H256, U256};
use smartstate_core::{ExitError, ExitFatal, MethodCall, StateTransitionResult, Value, VmError};
use smartstate_gasometer::GasMeter;

/// Result of a virtual machine entry point: the value produced by the
/// constructor or method, or the fault that stopped it.
pub type VmOutcome = Result<Option<Value>, VmError>;

/// Lets executing code issue further transitions on its own behalf. Each
/// call re-enters the executor one layer deeper and charges the consumed
/// gas to the issuing contract.
pub trait InternalExecutor {
	/// Deploy another instance of `type_name` from the executing contract's
	/// code, funded with `amount`.
	fn create(
		&mut self,
		amount: U256,
		type_name: &str,
		parameters: Vec<Value>,
		gas_limit: Option<u64>,
	) -> Result<StateTransitionResult, ExitFatal>;

	/// Invoke `method` on the contract at `to`, sending `amount`.
	fn call(
		&mut self,
		to: H160,
		amount: U256,
		method: MethodCall,
		gas_limit: Option<u64>,
	) -> Result<StateTransitionResult, ExitFatal>;

	/// Send `amount` to `to`. Runs the receive handler when `to` holds code.
	fn transfer(&mut self, to: H160, amount: U256) -> Result<StateTransitionResult, ExitFatal>;
}

/// Execution context handed to the virtual machine for one contract frame.
pub trait Handler: InternalExecutor {
	/// Message that started this frame.
	fn message(&self) -> &MessageView;
	/// Environmental block.
	fn block(&self) -> &Block;
	/// Gas meter of this frame.
	fn gas_meter(&self) -> &GasMeter;
	/// Charge gas for work done by the virtual machine itself.
	fn record_cost(&mut self, cost: u64) -> Result<(), ExitError>;

	/// Effective balance of the executing contract.
	fn balance(&self) -> Result<U256, VmError>;
	/// Code deployed at address.
	fn code(&self, address: H160) -> Option<Vec<u8>>;
	/// Contract type deployed at address.
	fn contract_type(&self, address: H160) -> Option<String>;

	/// Read the executing contract's storage.
	fn storage(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>, VmError>;
	/// Write the executing contract's storage.
	fn set_storage(&mut self, key: &[u8], value: &[u8]) -> Result<(), VmError>;
	/// Install code for the contract under construction.
	fn set_code(&mut self, code: Vec<u8>) -> Result<(), VmError>;
	/// Record the type of the contract under construction.
	fn set_contract_type(&mut self, type_name: String) -> Result<(), VmError>;

	/// Emit an event owned by the executing contract.
	fn log(&mut self, topics: Vec<Vec<u8>>, data: Vec<u8>) -> Result<(), VmError>;
	/// Keccak-256 of data.
	fn hash(&mut self, data: &[u8]) -> Result<H256, VmError>;
}

/// Virtual machine running contract code against a [`Handler`].
#[auto_impl::auto_impl(&, Box)]
pub trait Vm {
	/// Construct a contract: install code and type through the handler and
	/// run the constructor.
	fn create(
		&self,
		handler: &mut dyn Handler,
		code: &[u8],
		parameters: &[Value],
		type_name: Option<&str>,
	) -> VmOutcome;

	/// Run `method` of a deployed contract.
	fn execute_method(
		&self,
		handler: &mut dyn Handler,
		method: &MethodCall,
		code: &[u8],
		type_name: Option<&str>,
	) -> VmOutcome;
}
