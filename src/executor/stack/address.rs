use primitive_types::{H160, H256};
use sha3::{Digest, Keccak256};

/// Derive the address of a contract created by a transaction: the first
/// 20 bytes of Keccak-256 over the transaction hash followed by the nonce
/// as little-endian `u64`.
pub fn generate_address(transaction_hash: H256, nonce: u64) -> H160 {
	let mut hasher = Keccak256::new();
	hasher.update(transaction_hash.as_bytes());
	hasher.update(nonce.to_le_bytes());
	H160::from_slice(&hasher.finalize()[..20])
}
