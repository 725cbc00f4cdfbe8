use crate::RawLog;
use alloc::vec::Vec;

/// Ordered, append-only buffer of events raised during one transaction.
#[derive(Clone, Debug, Default)]
pub struct LogHolder {
	logs: Vec<RawLog>,
}

impl LogHolder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_raw_logs<I: IntoIterator<Item = RawLog>>(&mut self, logs: I) {
		self.logs.extend(logs);
	}

	pub fn raw_logs(&self) -> &[RawLog] {
		&self.logs
	}

	pub fn clear(&mut self) {
		self.logs.clear();
	}

	pub fn into_raw_logs(self) -> Vec<RawLog> {
		self.logs
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloc::vec;
	use primitive_types::H160;

	fn log(byte: u8) -> RawLog {
		RawLog {
			address: H160::repeat_byte(byte),
			topics: vec![vec![byte]],
			data: vec![byte; 2],
		}
	}

	#[test]
	fn restore_through_clear_and_add() {
		let mut holder = LogHolder::new();
		holder.add_raw_logs(vec![log(1), log(2)]);
		let saved = holder.raw_logs().to_vec();

		holder.add_raw_logs(vec![log(3)]);
		assert_eq!(holder.raw_logs().len(), 3);

		holder.clear();
		holder.add_raw_logs(saved);
		assert_eq!(holder.raw_logs(), &[log(1), log(2)]);
	}
}
