//! Counter accessors

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, U256};
use tokio::sync::mpsc;

use crate::domain::abi::{registry, ContractDescriptor};
use crate::error::RuntimeError;
use crate::infrastructure::ethereum::{
    CallOverrides, ContractEvent, ContractRuntime, EventFilter, PreparedWrite, TxHash,
};

use super::Binding;

/// Client for the Counter contract.
///
/// Counter has no fixed deployments, so the client starts unaddressed;
/// pin a target with [`Counter::at`] or a per-call address override.
pub struct Counter<'r, R: ?Sized> {
    binding: Binding<'r, R>,
}

impl<'r, R: ContractRuntime + ?Sized> Counter<'r, R> {
    /// Unaddressed client; calls forward no target address.
    pub fn new(runtime: &'r R) -> Self {
        Self {
            binding: Binding::new(runtime, Self::descriptor(), None),
        }
    }

    /// Client pinned to a deployed instance.
    pub fn at(runtime: &'r R, address: Address) -> Self {
        Self {
            binding: Binding::new(runtime, Self::descriptor(), Some(address)),
        }
    }

    /// The compiled-in Counter descriptor.
    pub fn descriptor() -> &'static ContractDescriptor {
        &registry::COUNTER
    }

    /// Resolved target address, if any.
    pub fn address(&self) -> Option<Address> {
        self.binding.address()
    }

    /// Read any Counter function by name.
    pub async fn read(
        &self,
        function: &str,
        args: Vec<DynSolValue>,
        overrides: CallOverrides,
    ) -> Result<Vec<DynSolValue>, RuntimeError> {
        self.binding.read(function, args, overrides).await
    }

    /// Submit any Counter function by name.
    pub async fn write(
        &self,
        function: &str,
        args: Vec<DynSolValue>,
        overrides: CallOverrides,
    ) -> Result<TxHash, RuntimeError> {
        self.binding.write(function, args, overrides).await
    }

    /// Simulate and gas-estimate any Counter function by name.
    pub async fn prepare(
        &self,
        function: &str,
        args: Vec<DynSolValue>,
        overrides: CallOverrides,
    ) -> Result<PreparedWrite, RuntimeError> {
        self.binding.prepare(function, args, overrides).await
    }

    /// Submit a previously prepared call.
    pub async fn submit(&self, prepared: PreparedWrite) -> Result<TxHash, RuntimeError> {
        self.binding.submit(prepared).await
    }

    /// Subscribe to every Counter event.
    pub async fn events(
        &self,
        filter: EventFilter,
    ) -> Result<mpsc::Receiver<ContractEvent>, RuntimeError> {
        self.binding.events(None, filter).await
    }

    /// `number() -> uint256`
    pub async fn number(&self, overrides: CallOverrides) -> Result<U256, RuntimeError> {
        let outputs = self.read("number", Vec::new(), overrides).await?;
        super::single_uint(outputs, "number")
    }

    /// `increment()`
    pub async fn increment(&self, overrides: CallOverrides) -> Result<TxHash, RuntimeError> {
        self.write("increment", Vec::new(), overrides).await
    }

    /// Prepared flavor of [`Counter::increment`].
    pub async fn prepare_increment(
        &self,
        overrides: CallOverrides,
    ) -> Result<PreparedWrite, RuntimeError> {
        self.prepare("increment", Vec::new(), overrides).await
    }

    /// `setNumber(uint256)`
    pub async fn set_number(
        &self,
        new_number: U256,
        overrides: CallOverrides,
    ) -> Result<TxHash, RuntimeError> {
        self.write(
            "setNumber",
            vec![DynSolValue::Uint(new_number, 256)],
            overrides,
        )
        .await
    }

    /// Prepared flavor of [`Counter::set_number`].
    pub async fn prepare_set_number(
        &self,
        new_number: U256,
        overrides: CallOverrides,
    ) -> Result<PreparedWrite, RuntimeError> {
        self.prepare(
            "setNumber",
            vec![DynSolValue::Uint(new_number, 256)],
            overrides,
        )
        .await
    }

    /// Subscribe to `Transfer` events only.
    pub async fn transfer_events(
        &self,
        filter: EventFilter,
    ) -> Result<mpsc::Receiver<ContractEvent>, RuntimeError> {
        self.binding.events(Some("Transfer"), filter).await
    }
}
