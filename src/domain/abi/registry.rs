//! Descriptor registry - the compiled-in contract set
//!
//! One descriptor per contract, parsed once from the artifacts embedded
//! under `abis/`. The address table for ModuleFactory reproduces the
//! deployment records of the build (Optimism, Optimism Goerli, and the
//! local devnet chain).

use alloy_primitives::{address, Address};
use once_cell::sync::Lazy;

use super::descriptor::{ChainId, ContractDescriptor};

static MODULE_FACTORY_ADDRESSES: &[(ChainId, Address)] = &[
    (10, address!("1144460C8D6D36b7eB2A16a7FFf2E84a294C2d96")),
    (420, address!("1144460C8D6D36b7eB2A16a7FFf2E84a294C2d96")),
    (31337, address!("1144460C8D6D36b7eB2A16a7FFf2E84a294C2d96")),
];

pub static ATTESTATION_STATION: Lazy<ContractDescriptor> = Lazy::new(|| {
    ContractDescriptor::parse(
        "AttestationStation",
        include_str!("../../../abis/AttestationStation.json"),
        &[],
    )
    .expect("embedded AttestationStation artifact is valid")
});

pub static COUNTER: Lazy<ContractDescriptor> = Lazy::new(|| {
    ContractDescriptor::parse("Counter", include_str!("../../../abis/Counter.json"), &[])
        .expect("embedded Counter artifact is valid")
});

pub static DUMMY_MODULE: Lazy<ContractDescriptor> = Lazy::new(|| {
    ContractDescriptor::parse(
        "DummyModule",
        include_str!("../../../abis/DummyModule.json"),
        &[],
    )
    .expect("embedded DummyModule artifact is valid")
});

pub static MODULE_FACTORY: Lazy<ContractDescriptor> = Lazy::new(|| {
    ContractDescriptor::parse(
        "ModuleFactory",
        include_str!("../../../abis/ModuleFactory.json"),
        MODULE_FACTORY_ADDRESSES,
    )
    .expect("embedded ModuleFactory artifact is valid")
});

pub static SEMVER: Lazy<ContractDescriptor> = Lazy::new(|| {
    ContractDescriptor::parse("Semver", include_str!("../../../abis/Semver.json"), &[])
        .expect("embedded Semver artifact is valid")
});

/// All compiled-in descriptors, in artifact order.
pub fn contracts() -> [&'static ContractDescriptor; 5] {
    [
        &ATTESTATION_STATION,
        &COUNTER,
        &DUMMY_MODULE,
        &MODULE_FACTORY,
        &SEMVER,
    ]
}

/// Look up a descriptor by contract name.
pub fn lookup(name: &str) -> Option<&'static ContractDescriptor> {
    contracts().into_iter().find(|desc| desc.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_descriptors_parse() {
        for desc in contracts() {
            assert!(!desc.abi.entries.is_empty(), "{} has no entries", desc.name);
            desc.abi.validate().unwrap();
        }
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(lookup("Counter").unwrap().name, "Counter");
        assert_eq!(lookup("ModuleFactory").unwrap().name, "ModuleFactory");
        assert!(lookup("Unknown").is_none());
    }

    #[test]
    fn test_module_factory_address_table() {
        let expected = address!("1144460C8D6D36b7eB2A16a7FFf2E84a294C2d96");
        for chain in [10, 420, 31337] {
            assert_eq!(MODULE_FACTORY.address_on(chain), Some(expected));
        }
        assert_eq!(MODULE_FACTORY.address_on(1), None);
    }

    #[test]
    fn test_only_module_factory_has_addresses() {
        for desc in contracts() {
            assert_eq!(desc.has_address_table(), desc.name == "ModuleFactory");
        }
    }

    #[test]
    fn test_attest_overloads_present() {
        let overloads = ATTESTATION_STATION.abi.function("attest");
        assert_eq!(overloads.len(), 2);
    }
}
