//! ABI domain models and the descriptor registry
//!
//! This module holds the artifact-shaped ABI model, the immutable
//! per-contract descriptors, and the compiled-in registry, independent of
//! the alloy-backed runtime that consumes them.

mod descriptor;
mod model;
pub mod registry;

pub use descriptor::{ChainId, ContractDescriptor};
pub use model::{AbiEntry, ContractAbi, Param, StateMutability};
