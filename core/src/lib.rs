//! Core data types for smart-contract state transitions: the messages that
//! request a transition, the values passed to and returned from contracts,
//! and the result and error shapes that cross the executor boundary.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod error;
mod log;
mod message;
mod result;
mod transfer;
mod value;

pub use crate::error::{ExitError, ExitFatal, StateTransitionErrorKind, VmError};
pub use crate::log::RawLog;
pub use crate::message::{
	ContractTransferMessage, ExternalCallMessage, ExternalCreateMessage, InternalCallMessage,
	InternalCreateMessage, Message,
};
pub use crate::result::StateTransitionResult;
pub use crate::transfer::TransferInfo;
pub use crate::value::{MethodCall, Value, RECEIVE_HANDLER_NAME};

pub use primitive_types::{H160, H256, U256};
