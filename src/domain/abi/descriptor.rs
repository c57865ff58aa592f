//! Contract descriptors - immutable (name, ABI, address table) triples

use alloy_json_abi::JsonAbi;
use alloy_primitives::Address;
use anyhow::{Context, Result};

use super::model::ContractAbi;

/// Numeric chain identifier (EIP-155).
pub type ChainId = u64;

/// Immutable descriptor for one contract: its name, its ABI (both the
/// artifact-shaped model and alloy's codec view of the same entries) and,
/// when the contract has fixed deployments, a per-chain address table.
///
/// Descriptors are process-wide constants parsed once from embedded
/// artifact text; nothing mutates them after startup.
#[derive(Debug, Clone)]
pub struct ContractDescriptor {
    /// Contract name as emitted by the build (e.g. "Counter")
    pub name: &'static str,
    /// ABI entries, artifact order preserved
    pub abi: ContractAbi,
    /// The same entries parsed by alloy, used for encoding and decoding
    pub json_abi: JsonAbi,
    artifact: &'static str,
    addresses: &'static [(ChainId, Address)],
}

impl ContractDescriptor {
    /// Parse a descriptor from embedded artifact JSON.
    pub fn parse(
        name: &'static str,
        artifact: &'static str,
        addresses: &'static [(ChainId, Address)],
    ) -> Result<Self> {
        let abi = ContractAbi::parse(artifact)
            .with_context(|| format!("invalid ABI artifact for {}", name))?;
        abi.validate()
            .with_context(|| format!("ABI invariant violated for {}", name))?;
        let json_abi: JsonAbi = serde_json::from_str(artifact)
            .with_context(|| format!("alloy rejected ABI artifact for {}", name))?;
        Ok(Self {
            name,
            abi,
            json_abi,
            artifact,
            addresses,
        })
    }

    /// The raw artifact text this descriptor was parsed from.
    pub fn artifact_json(&self) -> &'static str {
        self.artifact
    }

    /// Deployed address on the given chain, if the table has an entry.
    ///
    /// An absent chain is not an error here; the missing address is
    /// surfaced by the runtime when a call is actually dispatched.
    pub fn address_on(&self, chain: ChainId) -> Option<Address> {
        self.addresses
            .iter()
            .find(|(id, _)| *id == chain)
            .map(|(_, addr)| *addr)
    }

    /// The full address table (empty for contracts without fixed deployments).
    pub fn addresses(&self) -> &'static [(ChainId, Address)] {
        self.addresses
    }

    /// Whether this contract carries a per-chain address table.
    pub fn has_address_table(&self) -> bool {
        !self.addresses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const ABI: &str = r#"[
        { "type": "function", "name": "number", "stateMutability": "view", "inputs": [],
          "outputs": [{ "name": "", "internalType": "uint256", "type": "uint256" }] }
    ]"#;

    static TEST_ADDRESSES: &[(ChainId, Address)] =
        &[(10, address!("1144460C8D6D36b7eB2A16a7FFf2E84a294C2d96"))];

    #[test]
    fn test_parse_and_lookup() {
        let desc = ContractDescriptor::parse("Test", ABI, TEST_ADDRESSES).unwrap();
        assert_eq!(desc.name, "Test");
        assert_eq!(desc.abi.entries.len(), 1);
        assert_eq!(
            desc.address_on(10),
            Some(address!("1144460C8D6D36b7eB2A16a7FFf2E84a294C2d96"))
        );
        assert_eq!(desc.address_on(1), None);
        assert!(desc.has_address_table());
    }

    #[test]
    fn test_empty_address_table() {
        let desc = ContractDescriptor::parse("Test", ABI, &[]).unwrap();
        assert!(!desc.has_address_table());
        assert_eq!(desc.address_on(10), None);
    }

    #[test]
    fn test_invalid_artifact_rejected() {
        assert!(ContractDescriptor::parse("Broken", "not json", &[]).is_err());
    }
}
