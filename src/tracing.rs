//! Allows to listen to state transition events.

use crate::{Message, TransferInfo};

environmental::environmental!(listener: dyn EventListener + 'static);

pub trait EventListener {
	fn event(&mut self, event: Event);
}

#[derive(Debug, Copy, Clone)]
pub enum Event<'a> {
	Apply {
		message: &'a Message,
		depth: usize,
		gas_remaining: u64,
	},
	Commit {
		layer: usize,
		gas_consumed: u64,
	},
	Rollback {
		layer: usize,
		nonce: u64,
		gas_consumed: u64,
	},
	Transfer {
		transfer: &'a TransferInfo,
	},
}

impl<'a> Event<'a> {
	pub(crate) fn emit(self) {
		listener::with(|listener| listener.event(self));
	}
}

/// Run closure with provided listener.
pub fn using<R, F: FnOnce() -> R>(new: &mut (dyn EventListener + 'static), f: F) -> R {
	listener::using(new, f)
}
