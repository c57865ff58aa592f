//! Domain layer - ABI model and contract descriptors

pub mod abi;
