use super::layer::LayeredState;
use crate::backend::Backend;
use crate::{ExitFatal, TransferInfo};
use primitive_types::{H160, U256};

/// Committed balance adjusted by the internal transfers recorded so far.
/// Computed from the live transfer list on every read, so a rollback that
/// truncates the list is reflected immediately.
pub struct BalanceState<'a, B> {
	layers: &'a LayeredState<B>,
	transfers: &'a [TransferInfo],
}

impl<'a, B: Backend> BalanceState<'a, B> {
	pub fn new(layers: &'a LayeredState<B>, transfers: &'a [TransferInfo]) -> Self {
		Self { layers, transfers }
	}

	/// Effective balance of address. Fails if the recorded transfers take it
	/// below zero at any point.
	pub fn balance(&self, address: H160) -> Result<U256, ExitFatal> {
		self.transfers
			.iter()
			.try_fold(self.layers.balance(address), |balance, transfer| {
				let balance = if transfer.to == address {
					balance.checked_add(transfer.value)
				} else {
					Some(balance)
				};
				let balance = match balance {
					Some(balance) if transfer.from == address => balance.checked_sub(transfer.value),
					balance => balance,
				};
				balance.ok_or(ExitFatal::BalanceOutOfRange(address))
			})
	}
}
