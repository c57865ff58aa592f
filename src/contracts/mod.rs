//! Typed contract accessors
//!
//! One module per contract, each exposing a client over any
//! [`ContractRuntime`]: generic read/write/prepare/event accessors with the
//! contract's ABI (and resolved address) pre-filled, plus one concrete
//! accessor per ABI entry with the function or event name baked in. The
//! baked-in names cannot be overridden; that is the whole contract this
//! layer adds on top of the runtime.

pub mod attestation_station;
pub mod counter;
pub mod dummy_module;
pub mod module_factory;
pub mod semver;

pub use attestation_station::{Attestation, AttestationStation};
pub use counter::Counter;
pub use dummy_module::DummyModule;
pub use module_factory::ModuleFactory;
pub use semver::Semver;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, U256};
use tokio::sync::mpsc;

use crate::domain::abi::ContractDescriptor;
use crate::error::RuntimeError;
use crate::infrastructure::ethereum::{
    CallOverrides, ContractEvent, ContractRuntime, EventFilter, EventQuery, PreparedWrite,
    ReadRequest, TxHash, WriteRequest,
};

/// Shared forwarding core behind every contract client.
///
/// Builds fully-resolved requests: descriptor pre-filled, the per-call
/// address override folded over the client's resolved address, everything
/// else passed through untouched.
pub(crate) struct Binding<'r, R: ?Sized> {
    runtime: &'r R,
    contract: &'static ContractDescriptor,
    address: Option<Address>,
}

impl<'r, R: ContractRuntime + ?Sized> Binding<'r, R> {
    pub(crate) fn new(
        runtime: &'r R,
        contract: &'static ContractDescriptor,
        address: Option<Address>,
    ) -> Self {
        Self {
            runtime,
            contract,
            address,
        }
    }

    pub(crate) fn address(&self) -> Option<Address> {
        self.address
    }

    fn resolve(&self, overrides: &CallOverrides) -> Option<Address> {
        overrides.address.or(self.address)
    }

    pub(crate) async fn read(
        &self,
        function: &str,
        args: Vec<DynSolValue>,
        overrides: CallOverrides,
    ) -> Result<Vec<DynSolValue>, RuntimeError> {
        let address = self.resolve(&overrides);
        self.runtime
            .read(ReadRequest {
                contract: self.contract,
                address,
                function: function.to_string(),
                args,
                overrides,
            })
            .await
    }

    pub(crate) async fn write(
        &self,
        function: &str,
        args: Vec<DynSolValue>,
        overrides: CallOverrides,
    ) -> Result<TxHash, RuntimeError> {
        let address = self.resolve(&overrides);
        self.runtime
            .write(WriteRequest {
                contract: self.contract,
                address,
                function: function.to_string(),
                args,
                overrides,
            })
            .await
    }

    pub(crate) async fn prepare(
        &self,
        function: &str,
        args: Vec<DynSolValue>,
        overrides: CallOverrides,
    ) -> Result<PreparedWrite, RuntimeError> {
        let address = self.resolve(&overrides);
        self.runtime
            .prepare(WriteRequest {
                contract: self.contract,
                address,
                function: function.to_string(),
                args,
                overrides,
            })
            .await
    }

    pub(crate) async fn submit(&self, prepared: PreparedWrite) -> Result<TxHash, RuntimeError> {
        self.runtime.submit(prepared).await
    }

    pub(crate) async fn events(
        &self,
        event: Option<&str>,
        filter: EventFilter,
    ) -> Result<mpsc::Receiver<ContractEvent>, RuntimeError> {
        self.runtime
            .subscribe(EventQuery {
                contract: self.contract,
                address: self.address,
                event: event.map(|name| name.to_string()),
                filter,
            })
            .await
    }
}

// Output decoding for the typed read accessors. The shapes are fixed by the
// embedded ABIs, so a mismatch means the node returned something the ABI
// does not declare.

pub(crate) fn single_uint(
    outputs: Vec<DynSolValue>,
    function: &'static str,
) -> Result<U256, RuntimeError> {
    match outputs.as_slice() {
        [DynSolValue::Uint(value, _)] => Ok(*value),
        _ => Err(RuntimeError::UnexpectedOutput { function }),
    }
}

pub(crate) fn single_address(
    outputs: Vec<DynSolValue>,
    function: &'static str,
) -> Result<Address, RuntimeError> {
    match outputs.as_slice() {
        [DynSolValue::Address(value)] => Ok(*value),
        _ => Err(RuntimeError::UnexpectedOutput { function }),
    }
}

pub(crate) fn single_string(
    outputs: Vec<DynSolValue>,
    function: &'static str,
) -> Result<String, RuntimeError> {
    if outputs.len() != 1 {
        return Err(RuntimeError::UnexpectedOutput { function });
    }
    match outputs.into_iter().next() {
        Some(DynSolValue::String(value)) => Ok(value),
        _ => Err(RuntimeError::UnexpectedOutput { function }),
    }
}

pub(crate) fn single_bytes(
    outputs: Vec<DynSolValue>,
    function: &'static str,
) -> Result<Bytes, RuntimeError> {
    if outputs.len() != 1 {
        return Err(RuntimeError::UnexpectedOutput { function });
    }
    match outputs.into_iter().next() {
        Some(DynSolValue::Bytes(value)) => Ok(Bytes::from(value)),
        _ => Err(RuntimeError::UnexpectedOutput { function }),
    }
}
