//! Typed client bindings for the Modulus contracts.
//!
//! One descriptor per contract (ABI plus, where the contract has fixed
//! deployments, a per-chain address table) and one typed accessor per ABI
//! entry, all forwarding to a generic [`ContractRuntime`] with the
//! descriptor pre-filled. Transports, encoding and subscription delivery
//! are alloy's; this crate only guarantees that what reaches the runtime
//! matches the accessor that was called.
//!
//! # Example
//!
//! ```no_run
//! use modulus_contracts::{create_runtime, CallOverrides, ModuleFactory, ProviderConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime =
//!         create_runtime(ProviderConfig::Http("http://localhost:8545".into())).await?;
//!
//!     // Address resolved from the compiled-in table for chain 10
//!     let factory = ModuleFactory::on_chain(runtime.as_ref(), 10);
//!     let vault = "0x36457b93bb12b8e78f7c4db1ae83f641ec4d6018".parse()?;
//!     let module = factory
//!         .deployed_modules(vault, CallOverrides::default())
//!         .await?;
//!     println!("module for vault: {module}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod contracts;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use contracts::{
    Attestation, AttestationStation, Counter, DummyModule, ModuleFactory, Semver,
};
pub use domain::abi::{registry, ChainId, ContractAbi, ContractDescriptor};
pub use error::RuntimeError;
pub use infrastructure::artifacts::ArtifactScanner;
pub use infrastructure::ethereum::{
    create_runtime, CallOverrides, ContractEvent, ContractRuntime, EventFilter, EventQuery,
    PreparedWrite, ProviderConfig, ReadRequest, TxHash, WriteRequest,
};
