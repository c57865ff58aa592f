//! Semver accessors

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::Address;

use crate::domain::abi::{registry, ContractDescriptor};
use crate::error::RuntimeError;
use crate::infrastructure::ethereum::{CallOverrides, ContractRuntime};

use super::Binding;

/// Client for the Semver contract (read-only surface).
pub struct Semver<'r, R: ?Sized> {
    binding: Binding<'r, R>,
}

impl<'r, R: ContractRuntime + ?Sized> Semver<'r, R> {
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

    /// The compiled-in Semver descriptor.
    pub fn descriptor() -> &'static ContractDescriptor {
        &registry::SEMVER
    }

    pub fn address(&self) -> Option<Address> {
        self.binding.address()
    }

    /// Read any Semver function by name.
    pub async fn read(
        &self,
        function: &str,
        args: Vec<DynSolValue>,
        overrides: CallOverrides,
    ) -> Result<Vec<DynSolValue>, RuntimeError> {
        self.binding.read(function, args, overrides).await
    }

    /// `version() -> string`
    pub async fn version(&self, overrides: CallOverrides) -> Result<String, RuntimeError> {
        let outputs = self.read("version", Vec::new(), overrides).await?;
        super::single_string(outputs, "version")
    }
}
