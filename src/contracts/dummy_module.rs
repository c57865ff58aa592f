//! DummyModule accessors

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, U256};

use crate::domain::abi::{registry, ContractDescriptor};
use crate::error::RuntimeError;
use crate::infrastructure::ethereum::{CallOverrides, ContractRuntime};

use super::Binding;

/// Client for the DummyModule contract (read-only surface).
pub struct DummyModule<'r, R: ?Sized> {
    binding: Binding<'r, R>,
}

impl<'r, R: ContractRuntime + ?Sized> DummyModule<'r, R> {
    pub fn new(runtime: &'r R) -> Self {
        Self {
            binding: Binding::new(runtime, Self::descriptor(), None),
        }
    }

    pub fn at(runtime: &'r R, address: Address) -> Self {
        Self {
            binding: Binding::new(runtime, Self::descriptor(), Some(address)),
        }
    }

    /// The compiled-in DummyModule descriptor.
    pub fn descriptor() -> &'static ContractDescriptor {
        &registry::DUMMY_MODULE
    }

    pub fn address(&self) -> Option<Address> {
        self.binding.address()
    }

    /// Read any DummyModule function by name.
    pub async fn read(
        &self,
        function: &str,
        args: Vec<DynSolValue>,
        overrides: CallOverrides,
    ) -> Result<Vec<DynSolValue>, RuntimeError> {
        self.binding.read(function, args, overrides).await
    }

    /// `cadence() -> uint256`
    pub async fn cadence(&self, overrides: CallOverrides) -> Result<U256, RuntimeError> {
        let outputs = self.read("cadence", Vec::new(), overrides).await?;
        super::single_uint(outputs, "cadence")
    }

    /// `vault() -> address`
    pub async fn vault(&self, overrides: CallOverrides) -> Result<Address, RuntimeError> {
        let outputs = self.read("vault", Vec::new(), overrides).await?;
        super::single_address(outputs, "vault")
    }
}
