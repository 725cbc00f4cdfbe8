extern crate smartstate;

use std::collections::BTreeMap;

use primitive_types::{H160, H256, U256};
use smartstate::backend::{MemoryAccount, MemoryBackend, MemoryVicinity};
use smartstate::{
	ExitError, Handler, InternalExecutor, MethodCall, StateTransitionErrorKind,
	StateTransitionResult, Value, Vm, VmError, VmOutcome,
};

pub const COUNTER_CODE: &[u8] = b"counter";
pub const ROUTER_CODE: &[u8] = b"router";

pub fn transaction_hash() -> H256 {
	H256::repeat_byte(0x5a)
}

/// What the mock VM asks a program to run.
pub enum Entry<'a> {
	Construct {
		type_name: Option<&'a str>,
		parameters: &'a [Value],
	},
	Method(&'a MethodCall),
}

pub type Program = Box<dyn Fn(&mut dyn Handler, Entry<'_>) -> VmOutcome>;

/// Virtual machine dispatching on the raw code bytes to a native program.
#[derive(Default)]
pub struct MockVm {
	programs: BTreeMap<Vec<u8>, Program>,
}

impl MockVm {
	pub fn with<F>(mut self, code: &[u8], program: F) -> Self
	where
		F: Fn(&mut dyn Handler, Entry<'_>) -> VmOutcome + 'static,
	{
		self.programs.insert(code.to_vec(), Box::new(program));
		self
	}

	pub fn standard() -> Self {
		Self::default()
			.with(COUNTER_CODE, counter)
			.with(ROUTER_CODE, router)
	}

	fn program(&self, code: &[u8]) -> Result<&Program, VmError> {
		self.programs
			.get(code)
			.ok_or_else(|| ExitError::Other("unknown code".into()).into())
	}
}

impl Vm for MockVm {
	fn create(
		&self,
		handler: &mut dyn Handler,
		code: &[u8],
		parameters: &[Value],
		type_name: Option<&str>,
	) -> VmOutcome {
		let program = self.program(code)?;
		handler.set_code(code.to_vec())?;
		if let Some(type_name) = type_name {
			handler.set_contract_type(type_name.into())?;
		}

		program(
			handler,
			Entry::Construct {
				type_name,
				parameters,
			},
		)
	}

	fn execute_method(
		&self,
		handler: &mut dyn Handler,
		method: &MethodCall,
		code: &[u8],
		_type_name: Option<&str>,
	) -> VmOutcome {
		let program = self.program(code)?;
		program(handler, Entry::Method(method))
	}
}

pub fn address_param(parameters: &[Value], index: usize) -> Result<H160, VmError> {
	match parameters.get(index) {
		Some(Value::Address(address)) => Ok(*address),
		_ => Err(ExitError::Other("expected address".into()).into()),
	}
}

pub fn amount_param(parameters: &[Value], index: usize) -> Result<U256, VmError> {
	match parameters.get(index) {
		Some(Value::U256(amount)) => Ok(*amount),
		_ => Err(ExitError::Other("expected amount".into()).into()),
	}
}

fn require(result: &StateTransitionResult) -> Result<(), VmError> {
	if result.is_succeed() {
		Ok(())
	} else {
		Err(ExitError::Reverted.into())
	}
}

/// Single-slot counter.
///
/// * constructor: `count = 0`
/// * `increment`: `count += 1`, returns the new count
/// * `fail`: writes storage and logs, then reverts
/// * `rewrite`: tries to replace its own code
/// * `Receive`: records that value arrived
pub fn counter(handler: &mut dyn Handler, entry: Entry<'_>) -> VmOutcome {
	let method = match entry {
		Entry::Construct { .. } => {
			handler.set_storage(b"count", &[0])?;
			return Ok(None);
		}
		Entry::Method(method) => method,
	};

	match method.name.as_str() {
		"increment" => {
			let count = handler
				.storage(b"count")?
				.and_then(|value| value.first().copied())
				.unwrap_or(0);
			handler.set_storage(b"count", &[count + 1])?;
			Ok(Some(Value::U32(u32::from(count) + 1)))
		}
		"fail" => {
			handler.set_storage(b"count", &[9])?;
			handler.log(vec![b"failing".to_vec()], vec![1, 2])?;
			Err(ExitError::Reverted.into())
		}
		"rewrite" => {
			handler.set_code(b"other".to_vec())?;
			Ok(None)
		}
		"Receive" => {
			handler.set_storage(b"paid", &[1])?;
			Ok(None)
		}
		name => Err(ExitError::MethodNotFound(name.into()).into()),
	}
}

/// Contract that moves value around and re-enters the executor.
///
/// * constructor: fails an assertion when the first parameter is `false`
/// * `pay(to, amount)`: plain transfer
/// * `pay_and_spawn(to, amount)`: transfer, write, log, then create another
///   router and return its address
/// * `relay(next, to, amount)`: call `pay_and_spawn` on `next`, then log
/// * `relay_then_fail(next, to, amount)`: `relay`, then fail an assertion
/// * `spawn_funded(amount)`: create another router funded with `amount`
/// * `deep`: call itself until the stack limit, returns the frame count
/// * `call_back(target, to)`: call `drain(to)` on `target`
/// * `drain(to)`: transfer the whole effective balance to `to`
pub fn router(handler: &mut dyn Handler, entry: Entry<'_>) -> VmOutcome {
	let method = match entry {
		Entry::Construct { parameters, .. } => {
			if parameters.first() == Some(&Value::Bool(false)) {
				return Err(ExitError::AssertionFailed.into());
			}
			return Ok(None);
		}
		Entry::Method(method) => method,
	};
	let parameters = &method.parameters;

	match method.name.as_str() {
		"pay" => {
			let result = handler.transfer(address_param(parameters, 0)?, amount_param(parameters, 1)?)?;
			require(&result)?;
			Ok(None)
		}
		"pay_and_spawn" => {
			let result = handler.transfer(address_param(parameters, 0)?, amount_param(parameters, 1)?)?;
			require(&result)?;
			handler.set_storage(b"paid", &[1])?;
			handler.log(vec![b"paid".to_vec()], vec![])?;

			let result = handler.create(U256::zero(), "Router", vec![], None)?;
			require(&result)?;
			Ok(result.contract_address().map(Value::Address))
		}
		"relay" | "relay_then_fail" => {
			let next = address_param(parameters, 0)?;
			let call = MethodCall::new(
				"pay_and_spawn",
				vec![
					Value::Address(address_param(parameters, 1)?),
					Value::U256(amount_param(parameters, 2)?),
				],
			);
			let result = handler.call(next, U256::zero(), call, None)?;
			require(&result)?;
			handler.log(vec![b"relayed".to_vec()], vec![7])?;

			if method.name == "relay_then_fail" {
				Err(ExitError::AssertionFailed.into())
			} else {
				Ok(result.return_value().cloned())
			}
		}
		"spawn_funded" => {
			let result = handler.create(amount_param(parameters, 0)?, "Router", vec![], None)?;
			match result.error() {
				Some(StateTransitionErrorKind::InsufficientBalance) => Ok(Some(Value::Bool(false))),
				_ => Ok(Some(Value::Bool(result.is_succeed()))),
			}
		}
		"deep" => {
			let this = handler.message().contract_address;
			let result = handler.call(this, U256::zero(), MethodCall::new("deep", vec![]), None)?;
			match (result.return_value(), result.error()) {
				(Some(Value::U32(frames)), _) => Ok(Some(Value::U32(frames + 1))),
				(_, Some(StateTransitionErrorKind::CallTooDeep)) => Ok(Some(Value::U32(1))),
				_ => Err(ExitError::Reverted.into()),
			}
		}
		"call_back" => {
			let call = MethodCall::new("drain", vec![Value::Address(address_param(parameters, 1)?)]);
			let result = handler.call(address_param(parameters, 0)?, U256::zero(), call, None)?;
			require(&result)?;
			Ok(None)
		}
		"drain" => {
			let amount = handler.balance()?;
			let result = handler.transfer(address_param(parameters, 0)?, amount)?;
			require(&result)?;
			Ok(None)
		}
		"Receive" => Ok(None),
		name => Err(ExitError::MethodNotFound(name.into()).into()),
	}
}

pub fn account(balance: u64) -> MemoryAccount {
	MemoryAccount {
		balance: U256::from(balance),
		..Default::default()
	}
}

pub fn contract(balance: u64, code: &[u8], type_name: &str) -> MemoryAccount {
	MemoryAccount {
		balance: U256::from(balance),
		code: code.to_vec(),
		contract_type: Some(type_name.into()),
		storage: BTreeMap::new(),
	}
}

pub fn backend<'vicinity>(
	vicinity: &'vicinity MemoryVicinity,
	accounts: Vec<(H160, MemoryAccount)>,
) -> MemoryBackend<'vicinity> {
	MemoryBackend::new(vicinity, accounts.into_iter().collect())
}
