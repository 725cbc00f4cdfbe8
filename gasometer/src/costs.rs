use crate::Config;
use smartstate_core::RawLog;

fn per_byte(base: u64, per_byte: u64, len: usize) -> u64 {
	base.saturating_add(per_byte.saturating_mul(len as u64))
}

pub fn storage_retrieve_cost(config: &Config, key: &[u8], value: Option<&[u8]>) -> u64 {
	let len = key.len() + value.map(|v| v.len()).unwrap_or(0);
	per_byte(
		config.storage_retrieve_base,
		config.storage_retrieve_per_byte,
		len,
	)
}

pub fn storage_save_cost(config: &Config, key: &[u8], value: &[u8]) -> u64 {
	per_byte(
		config.storage_save_base,
		config.storage_save_per_byte,
		key.len() + value.len(),
	)
}

pub fn log_cost(config: &Config, log: &RawLog) -> u64 {
	per_byte(config.log_base, config.log_per_byte, log.byte_len())
}

pub fn hash_cost(config: &Config, len: usize) -> u64 {
	per_byte(0, config.hash_per_byte, len)
}
