use alloc::vec::Vec;
use primitive_types::H160;

/// Event emitted by a contract, kept opaque until receipts are built.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
	feature = "with-codec",
	derive(scale_codec::Encode, scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawLog {
	/// Contract that emitted the event.
	pub address: H160,
	pub topics: Vec<Vec<u8>>,
	pub data: Vec<u8>,
}

impl RawLog {
	/// Number of bytes carried by topics and data together.
	pub fn byte_len(&self) -> usize {
		self.topics.iter().map(|topic| topic.len()).sum::<usize>() + self.data.len()
	}
}
