//! Ethereum infrastructure - the runtime seam and its alloy implementations

pub(crate) mod codec;
mod provider;
mod runtime;

pub use provider::{create_runtime, AlloyRuntime, ProviderConfig};
pub use runtime::{
    CallOverrides, ContractEvent, ContractRuntime, EventFilter, EventQuery, PreparedWrite,
    ReadRequest, TxHash, WriteRequest,
};
