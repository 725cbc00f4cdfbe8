//! Interface between the state-transition executor and the virtual machine
//! that runs contract code.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod context;
mod handler;

pub use crate::context::{Block, MessageView};
pub use crate::handler::{Handler, InternalExecutor, Vm, VmOutcome};

pub use smartstate_core::*;
pub use smartstate_gasometer as gasometer;
