mod address;
mod balance;
mod frame;
mod layer;
mod logs;

pub use self::address::generate_address;
pub use self::balance::BalanceState;
pub use self::frame::ContractFrame;
pub use self::layer::{LayerId, LayeredState};
pub use self::logs::LogHolder;

use crate::backend::{Backend, ChangeSet};
use crate::gasometer::{Config, GasMeter};
use crate::{
	Block, ExitFatal, Message, MessageView, MethodCall, RawLog, StateTransitionErrorKind,
	StateTransitionResult, TransferInfo, Value, Vm, VmError, VmOutcome,
};
use alloc::{string::String, vec::Vec};
use primitive_types::{H160, H256, U256};

/// Everything a rollback restores.
#[derive(Clone, Debug)]
struct StateSnapshot {
	logs: Vec<RawLog>,
	transfers: Vec<TransferInfo>,
	nonce: u64,
	layer: LayerId,
}

/// Executes one top-level transaction and every internal message its
/// contracts issue. Each application runs in its own layer and is committed
/// into its parent on success or discarded as a whole on failure.
pub struct State<'config, 'vm, B, V> {
	config: &'config Config,
	vm: &'vm V,
	layers: LayeredState<B>,
	current: LayerId,
	block: Block,
	transaction_hash: H256,
	gas_remaining: u64,
	nonce: u64,
	logs: LogHolder,
	transfers: Vec<TransferInfo>,
}

impl<'config, 'vm, B: Backend, V: Vm> State<'config, 'vm, B, V> {
	/// Create the executor for one transaction. `gas_limit` is the budget
	/// shared by the whole tree of applications.
	pub fn new(
		config: &'config Config,
		vm: &'vm V,
		backend: B,
		transaction_hash: H256,
		gas_limit: u64,
	) -> Self {
		let block = backend.block();
		let layers = LayeredState::new(backend);
		let current = layers.root();

		Self {
			config,
			vm,
			layers,
			current,
			block,
			transaction_hash,
			gas_remaining: gas_limit,
			nonce: 0,
			logs: LogHolder::new(),
			transfers: Vec::new(),
		}
	}

	pub fn config(&self) -> &'config Config {
		self.config
	}

	pub fn block(&self) -> &Block {
		&self.block
	}

	pub fn transaction_hash(&self) -> H256 {
		self.transaction_hash
	}

	/// Gas left in the transaction budget.
	pub fn gas_remaining(&self) -> u64 {
		self.gas_remaining
	}

	/// Next nonce used for address derivation.
	pub fn nonce(&self) -> u64 {
		self.nonce
	}

	pub fn logs(&self) -> &[RawLog] {
		self.logs.raw_logs()
	}

	pub fn transfers(&self) -> &[TransferInfo] {
		&self.transfers
	}

	pub fn current_layer(&self) -> LayerId {
		self.current
	}

	pub fn layers(&self) -> &LayeredState<B> {
		&self.layers
	}

	/// Effective balance of address.
	pub fn balance(&self, address: H160) -> Result<U256, ExitFatal> {
		BalanceState::new(&self.layers, &self.transfers).balance(address)
	}

	pub fn code(&self, address: H160) -> Option<Vec<u8>> {
		self.layers.code(self.current, address)
	}

	pub fn contract_type(&self, address: H160) -> Option<String> {
		self.layers.contract_type(self.current, address)
	}

	pub fn storage(&self, address: H160, key: &[u8]) -> Option<Vec<u8>> {
		self.layers.storage(self.current, address, key)
	}

	/// Apply a message. Reportable failures come back as
	/// [`StateTransitionResult::Fail`]; `Err` means the whole transaction must
	/// be rejected.
	pub fn apply<M: Into<Message>>(&mut self, message: M) -> Result<StateTransitionResult, ExitFatal> {
		let message = message.into();

		event!(Apply {
			message: &message,
			depth: self.layers.depth(),
			gas_remaining: self.gas_remaining,
		});
		log::debug!(
			target: "smartstate",
			"Applying message from {:?} at depth {} with {} gas remaining",
			message.sender(),
			self.layers.depth(),
			self.gas_remaining,
		);

		match message {
			Message::ExternalCreate(message) => self.apply_create(
				&message.parameters,
				&message.code,
				message.from,
				message.amount,
				message.gas_limit,
				message.type_name.as_deref(),
				false,
			),
			Message::InternalCreate(message) => {
				let balance = self.balance(message.from)?;
				if balance < message.amount {
					return Err(ExitFatal::UnaffordableInternalCreate {
						sender: message.from,
						amount: message.amount,
						balance,
					});
				}

				let code = self.code(message.from).unwrap_or_default();
				self.apply_create(
					&message.parameters,
					&code,
					message.from,
					message.amount,
					message.gas_limit,
					Some(message.type_name.as_str()),
					true,
				)
			}
			Message::ExternalCall(message) => {
				let code = match self.contract_code(message.to) {
					Some(code) => code,
					None => {
						return Ok(StateTransitionResult::fail(
							0,
							StateTransitionErrorKind::NoCode,
						))
					}
				};

				self.apply_call(
					message.to,
					message.from,
					message.amount,
					message.gas_limit,
					&message.method,
					&code,
					false,
				)
			}
			Message::InternalCall(message) => {
				if self.balance(message.from)? < message.amount {
					return Ok(StateTransitionResult::fail(
						0,
						StateTransitionErrorKind::InsufficientBalance,
					));
				}

				let code = match self.contract_code(message.to) {
					Some(code) => code,
					None => {
						return Ok(StateTransitionResult::fail(
							0,
							StateTransitionErrorKind::NoCode,
						))
					}
				};

				self.apply_call(
					message.to,
					message.from,
					message.amount,
					message.gas_limit,
					&message.method,
					&code,
					true,
				)
			}
			Message::ContractTransfer(message) => {
				if self.balance(message.from)? < message.amount {
					return Ok(StateTransitionResult::fail(
						0,
						StateTransitionErrorKind::InsufficientBalance,
					));
				}

				match self.contract_code(message.to) {
					None => {
						self.push_transfer(TransferInfo {
							from: message.from,
							to: message.to,
							value: message.amount,
						});
						Ok(StateTransitionResult::succeed(0, message.to, None))
					}
					Some(code) => self.apply_call(
						message.to,
						message.from,
						message.amount,
						message.gas_limit,
						&MethodCall::receive(),
						&code,
						true,
					),
				}
			}
		}
	}

	/// Finish the transaction and return the backend with everything the
	/// caller must persist.
	pub fn deconstruct(self) -> Result<(B, ChangeSet), ExitFatal> {
		let (backend, accounts) = self.layers.deconstruct()?;

		Ok((
			backend,
			ChangeSet {
				accounts,
				logs: self.logs.into_raw_logs(),
				transfers: self.transfers,
			},
		))
	}

	#[allow(clippy::too_many_arguments)]
	fn apply_create(
		&mut self,
		parameters: &[Value],
		code: &[u8],
		from: H160,
		amount: U256,
		gas_limit: u64,
		type_name: Option<&str>,
		moves_value: bool,
	) -> Result<StateTransitionResult, ExitFatal> {
		if !self.covers(gas_limit) {
			return Ok(StateTransitionResult::fail(
				0,
				StateTransitionErrorKind::InsufficientGas,
			));
		}

		let snapshot = self.take_snapshot();

		let mut gas_meter = GasMeter::new(gas_limit);
		gas_meter.spend(self.config.base_cost);

		let address = self.new_address();

		let layer = self.layers.start_tracking(self.current)?;
		self.current = layer;
		self.layers.create_account(layer, address)?;

		let message = MessageView {
			contract_address: address,
			sender: from,
			amount,
			gas_limit,
		};

		let vm = self.vm;
		let mut frame = ContractFrame::new(self, layer, gas_meter, message, true);
		let outcome = vm.create(&mut frame, code, parameters, type_name);
		let (gas_meter, nested_gas) = frame.finish();

		log::debug!(target: "smartstate", "Create execution using address {:?}: {:?}", address, outcome);

		let transfer = moves_value.then(|| TransferInfo {
			from,
			to: address,
			value: amount,
		});
		self.exit_scope(snapshot, layer, gas_meter, nested_gas, outcome, address, transfer)
	}

	#[allow(clippy::too_many_arguments)]
	fn apply_call(
		&mut self,
		to: H160,
		from: H160,
		amount: U256,
		gas_limit: u64,
		method: &MethodCall,
		code: &[u8],
		moves_value: bool,
	) -> Result<StateTransitionResult, ExitFatal> {
		if !self.covers(gas_limit) {
			return Ok(StateTransitionResult::fail(
				0,
				StateTransitionErrorKind::InsufficientGas,
			));
		}

		let mut gas_meter = GasMeter::new(gas_limit);
		gas_meter.spend(self.config.base_cost);

		if !method.has_name() {
			self.debit_gas(gas_meter.consumed());
			return Ok(StateTransitionResult::fail(
				gas_meter.consumed(),
				StateTransitionErrorKind::NoMethodName,
			));
		}

		let snapshot = self.take_snapshot();

		let layer = self.layers.start_tracking(self.current)?;
		self.current = layer;
		let type_name = self.layers.contract_type(layer, to);

		let message = MessageView {
			contract_address: to,
			sender: from,
			amount,
			gas_limit,
		};

		let vm = self.vm;
		let mut frame = ContractFrame::new(self, layer, gas_meter, message, false);
		let outcome = vm.execute_method(&mut frame, method, code, type_name.as_deref());
		let (gas_meter, nested_gas) = frame.finish();

		log::debug!(target: "smartstate", "Call execution using address {:?}: {:?}", to, outcome);

		let transfer = moves_value.then(|| TransferInfo {
			from,
			to,
			value: amount,
		});
		self.exit_scope(snapshot, layer, gas_meter, nested_gas, outcome, to, transfer)
	}

	/// Commit or roll back a finished scope. The value move of a successful
	/// scope is checked again before its layer is committed: re-entrant
	/// applications may have spent the sender's funds while the recipient
	/// ran, and a sender that can no longer pay fails the whole scope with
	/// `InsufficientBalance`.
	#[allow(clippy::too_many_arguments)]
	fn exit_scope(
		&mut self,
		snapshot: StateSnapshot,
		layer: LayerId,
		gas_meter: GasMeter,
		nested_gas: u64,
		outcome: VmOutcome,
		contract_address: H160,
		transfer: Option<TransferInfo>,
	) -> Result<StateTransitionResult, ExitFatal> {
		let gas_consumed = gas_meter.consumed();
		// Nested applications already debited their own share.
		self.debit_gas(gas_consumed.saturating_sub(nested_gas));

		if let (Ok(_), Some(transfer)) = (&outcome, &transfer) {
			if self.balance(transfer.from)? < transfer.value {
				log::debug!(
					target: "smartstate",
					"Sender {:?} can no longer cover {} after execution",
					transfer.from,
					transfer.value,
				);
				self.rollback(snapshot);
				event!(Rollback {
					layer: layer.index(),
					nonce: self.nonce,
					gas_consumed,
				});

				return Ok(StateTransitionResult::fail(
					gas_consumed,
					StateTransitionErrorKind::InsufficientBalance,
				));
			}
		}

		match outcome {
			Ok(return_value) => {
				self.current = self.layers.commit(layer)?;
				event!(Commit {
					layer: layer.index(),
					gas_consumed,
				});
				if let Some(transfer) = transfer {
					self.push_transfer(transfer);
				}

				Ok(StateTransitionResult::succeed(
					gas_consumed,
					contract_address,
					return_value,
				))
			}
			Err(VmError::Error(error)) => {
				self.rollback(snapshot);
				event!(Rollback {
					layer: layer.index(),
					nonce: self.nonce,
					gas_consumed,
				});

				Ok(StateTransitionResult::fail(gas_consumed, error))
			}
			Err(VmError::Fatal(fatal)) => {
				self.rollback(snapshot);
				log::debug!(target: "smartstate", "Fatal error in layer {}: {}", layer.index(), fatal);

				Err(fatal)
			}
		}
	}

	/// Whether the budget covers a scope with the given gas limit, and the
	/// limit itself covers the base cost. A limit below the base cost is
	/// reported as `InsufficientGas` with nothing consumed rather than as an
	/// out-of-gas fault, since no meter is ever opened for it.
	fn covers(&self, gas_limit: u64) -> bool {
		self.gas_remaining >= gas_limit
			&& self.gas_remaining >= self.config.base_cost
			&& gas_limit >= self.config.base_cost
	}

	fn debit_gas(&mut self, gas: u64) {
		self.gas_remaining = self.gas_remaining.saturating_sub(gas);
	}

	fn new_address(&mut self) -> H160 {
		let address = generate_address(self.transaction_hash, self.nonce);
		self.nonce += 1;
		address
	}

	fn contract_code(&self, address: H160) -> Option<Vec<u8>> {
		self.code(address).filter(|code| !code.is_empty())
	}

	fn push_transfer(&mut self, transfer: TransferInfo) {
		event!(Transfer {
			transfer: &transfer,
		});
		self.transfers.push(transfer);
	}

	fn take_snapshot(&self) -> StateSnapshot {
		StateSnapshot {
			logs: self.logs.raw_logs().to_vec(),
			transfers: self.transfers.clone(),
			nonce: self.nonce,
			layer: self.current,
		}
	}

	fn rollback(&mut self, snapshot: StateSnapshot) {
		log::debug!(
			target: "smartstate",
			"Rolling back to layer {} with nonce {}",
			snapshot.layer.index(),
			snapshot.nonce,
		);

		self.layers.abandon(snapshot.layer);
		self.current = snapshot.layer;
		self.nonce = snapshot.nonce;
		self.logs.clear();
		self.logs.add_raw_logs(snapshot.logs);
		self.transfers = snapshot.transfers;
	}
}
