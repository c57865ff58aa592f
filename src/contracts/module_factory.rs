//! ModuleFactory accessors
//!
//! ModuleFactory is the one contract with a per-chain address table, so
//! its client resolves the target from an explicit chain id at
//! construction. A chain with no table entry leaves the client
//! unaddressed and the runtime reports the missing address on dispatch.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, U256};
use tokio::sync::mpsc;

use crate::domain::abi::{registry, ChainId, ContractDescriptor};
use crate::error::RuntimeError;
use crate::infrastructure::ethereum::{
    CallOverrides, ContractEvent, ContractRuntime, EventFilter, PreparedWrite, TxHash,
};

use super::Binding;

/// Client for the ModuleFactory contract.
pub struct ModuleFactory<'r, R: ?Sized> {
    binding: Binding<'r, R>,
}

impl<'r, R: ContractRuntime + ?Sized> ModuleFactory<'r, R> {
    /// Client for the deployment on the given chain.
    pub fn on_chain(runtime: &'r R, chain: ChainId) -> Self {
        let address = Self::descriptor().address_on(chain);
        Self {
            binding: Binding::new(runtime, Self::descriptor(), address),
        }
    }

    /// Client pinned to an explicit address, bypassing the table.
    pub fn at(runtime: &'r R, address: Address) -> Self {
        Self {
            binding: Binding::new(runtime, Self::descriptor(), Some(address)),
        }
    }

    /// The compiled-in ModuleFactory descriptor.
    pub fn descriptor() -> &'static ContractDescriptor {
        &registry::MODULE_FACTORY
    }

    /// Resolved target address, if the chain had a table entry.
    pub fn address(&self) -> Option<Address> {
        self.binding.address()
    }

    /// Read any ModuleFactory function by name.
    pub async fn read(
        &self,
        function: &str,
        args: Vec<DynSolValue>,
        overrides: CallOverrides,
    ) -> Result<Vec<DynSolValue>, RuntimeError> {
        self.binding.read(function, args, overrides).await
    }

    /// Submit any ModuleFactory function by name.
    pub async fn write(
        &self,
        function: &str,
        args: Vec<DynSolValue>,
        overrides: CallOverrides,
    ) -> Result<TxHash, RuntimeError> {
        self.binding.write(function, args, overrides).await
    }

    /// Simulate and gas-estimate any ModuleFactory function by name.
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

    /// Subscribe to every ModuleFactory event.
    pub async fn events(
        &self,
        filter: EventFilter,
    ) -> Result<mpsc::Receiver<ContractEvent>, RuntimeError> {
        self.binding.events(None, filter).await
    }

    /// `deployedModules(address) -> address`
    pub async fn deployed_modules(
        &self,
        vault: Address,
        overrides: CallOverrides,
    ) -> Result<Address, RuntimeError> {
        let outputs = self
            .read(
                "deployedModules",
                vec![DynSolValue::Address(vault)],
                overrides,
            )
            .await?;
        super::single_address(outputs, "deployedModules")
    }

    /// `createModule(address,uint256)`
    pub async fn create_module(
        &self,
        vault: Address,
        timestamp: U256,
        overrides: CallOverrides,
    ) -> Result<TxHash, RuntimeError> {
        self.write(
            "createModule",
            vec![
                DynSolValue::Address(vault),
                DynSolValue::Uint(timestamp, 256),
            ],
            overrides,
        )
        .await
    }

    /// Prepared flavor of [`ModuleFactory::create_module`].
    pub async fn prepare_create_module(
        &self,
        vault: Address,
        timestamp: U256,
        overrides: CallOverrides,
    ) -> Result<PreparedWrite, RuntimeError> {
        self.prepare(
            "createModule",
            vec![
                DynSolValue::Address(vault),
                DynSolValue::Uint(timestamp, 256),
            ],
            overrides,
        )
        .await
    }

    /// Subscribe to `ModuleDeployed` events only.
    pub async fn module_deployed_events(
        &self,
        filter: EventFilter,
    ) -> Result<mpsc::Receiver<ContractEvent>, RuntimeError> {
        self.binding.events(Some("ModuleDeployed"), filter).await
    }
}
