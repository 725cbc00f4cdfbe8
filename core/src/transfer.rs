use primitive_types::{H160, U256};

/// Value moved between addresses by a successful internal transition.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
	feature = "with-codec",
	derive(scale_codec::Encode, scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferInfo {
	/// Source address.
	pub from: H160,
	/// Target address.
	pub to: H160,
	/// Transfer value.
	pub value: U256,
}
