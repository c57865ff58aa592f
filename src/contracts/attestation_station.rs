//! AttestationStation accessors

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, B256};
use tokio::sync::mpsc;

use crate::domain::abi::{registry, ContractDescriptor};
use crate::error::RuntimeError;
use crate::infrastructure::ethereum::{
    CallOverrides, ContractEvent, ContractRuntime, EventFilter, PreparedWrite, TxHash,
};

use super::Binding;

/// One attestation, the `AttestationData` tuple of the contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Attestation {
    pub about: Address,
    pub key: B256,
    pub val: Bytes,
}

impl Attestation {
    fn into_value(self) -> DynSolValue {
        DynSolValue::Tuple(vec![
            DynSolValue::Address(self.about),
            DynSolValue::FixedBytes(self.key, 32),
            DynSolValue::Bytes(self.val.to_vec()),
        ])
    }
}

/// Client for the AttestationStation contract.
pub struct AttestationStation<'r, R: ?Sized> {
    binding: Binding<'r, R>,
}

impl<'r, R: ContractRuntime + ?Sized> AttestationStation<'r, R> {
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

    /// The compiled-in AttestationStation descriptor.
    pub fn descriptor() -> &'static ContractDescriptor {
        &registry::ATTESTATION_STATION
    }

    pub fn address(&self) -> Option<Address> {
        self.binding.address()
    }

    /// Read any AttestationStation function by name.
    pub async fn read(
        &self,
        function: &str,
        args: Vec<DynSolValue>,
        overrides: CallOverrides,
    ) -> Result<Vec<DynSolValue>, RuntimeError> {
        self.binding.read(function, args, overrides).await
    }

    /// Submit any AttestationStation function by name.
    pub async fn write(
        &self,
        function: &str,
        args: Vec<DynSolValue>,
        overrides: CallOverrides,
    ) -> Result<TxHash, RuntimeError> {
        self.binding.write(function, args, overrides).await
    }

    /// Simulate and gas-estimate any AttestationStation function by name.
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

    /// Subscribe to every AttestationStation event.
    pub async fn events(
        &self,
        filter: EventFilter,
    ) -> Result<mpsc::Receiver<ContractEvent>, RuntimeError> {
        self.binding.events(None, filter).await
    }

    /// `attestations(address,address,bytes32) -> bytes`
    pub async fn attestations(
        &self,
        creator: Address,
        about: Address,
        key: B256,
        overrides: CallOverrides,
    ) -> Result<Bytes, RuntimeError> {
        let outputs = self
            .read(
                "attestations",
                vec![
                    DynSolValue::Address(creator),
                    DynSolValue::Address(about),
                    DynSolValue::FixedBytes(key, 32),
                ],
                overrides,
            )
            .await?;
        super::single_bytes(outputs, "attestations")
    }

    /// `version() -> string`
    pub async fn version(&self, overrides: CallOverrides) -> Result<String, RuntimeError> {
        let outputs = self.read("version", Vec::new(), overrides).await?;
        super::single_string(outputs, "version")
    }

    /// `attest(address,bytes32,bytes)` - the single-attestation overload
    pub async fn attest(
        &self,
        about: Address,
        key: B256,
        val: Bytes,
        overrides: CallOverrides,
    ) -> Result<TxHash, RuntimeError> {
        self.write(
            "attest",
            vec![
                DynSolValue::Address(about),
                DynSolValue::FixedBytes(key, 32),
                DynSolValue::Bytes(val.to_vec()),
            ],
            overrides,
        )
        .await
    }

    /// `attest((address,bytes32,bytes)[])` - the batch overload
    pub async fn attest_many(
        &self,
        attestations: Vec<Attestation>,
        overrides: CallOverrides,
    ) -> Result<TxHash, RuntimeError> {
        let values = attestations
            .into_iter()
            .map(Attestation::into_value)
            .collect();
        self.write("attest", vec![DynSolValue::Array(values)], overrides)
            .await
    }

    /// Prepared flavor of [`AttestationStation::attest`].
    pub async fn prepare_attest(
        &self,
        about: Address,
        key: B256,
        val: Bytes,
        overrides: CallOverrides,
    ) -> Result<PreparedWrite, RuntimeError> {
        self.prepare(
            "attest",
            vec![
                DynSolValue::Address(about),
                DynSolValue::FixedBytes(key, 32),
                DynSolValue::Bytes(val.to_vec()),
            ],
            overrides,
        )
        .await
    }

    /// Prepared flavor of [`AttestationStation::attest_many`].
    pub async fn prepare_attest_many(
        &self,
        attestations: Vec<Attestation>,
        overrides: CallOverrides,
    ) -> Result<PreparedWrite, RuntimeError> {
        let values = attestations
            .into_iter()
            .map(Attestation::into_value)
            .collect();
        self.prepare("attest", vec![DynSolValue::Array(values)], overrides)
            .await
    }

    /// Subscribe to `AttestationCreated` events only.
    pub async fn attestation_created_events(
        &self,
        filter: EventFilter,
    ) -> Result<mpsc::Receiver<ContractEvent>, RuntimeError> {
        self.binding.events(Some("AttestationCreated"), filter).await
    }
}
