//! ABI data model mirroring the artifact JSON shape
//!
//! The serde representation is field-for-field the JSON emitted by the
//! contract build (camelCase keys, `type`-tagged entries), so an embedded
//! artifact deserializes and reserializes without loss.

use alloy_primitives::{keccak256, B256};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A function, constructor or event parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name (may be empty)
    #[serde(default)]
    pub name: String,
    /// Solidity type (e.g., "address", "uint256", "tuple[]")
    #[serde(rename = "type")]
    pub kind: String,
    /// Source-level type (e.g., "struct AttestationStation.AttestationData[]")
    #[serde(rename = "internalType", default, skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
    /// Whether the parameter is an indexed event topic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
    /// Tuple member parameters, present when `kind` is a tuple type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Param>>,
}

impl Param {
    /// Canonical type string used in signatures.
    ///
    /// Tuple kinds are expanded into their component types, keeping any
    /// array suffix: `tuple[]` over (address, bytes32, bytes) becomes
    /// `(address,bytes32,bytes)[]`.
    pub fn canonical_type(&self) -> String {
        if let Some(suffix) = self.kind.strip_prefix("tuple") {
            let inner = self
                .components
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(Param::canonical_type)
                .collect::<Vec<_>>()
                .join(",");
            format!("({}){}", inner, suffix)
        } else {
            self.kind.clone()
        }
    }

    /// Whether this event parameter is indexed.
    pub fn is_indexed(&self) -> bool {
        self.indexed.unwrap_or(false)
    }
}

/// Function state-mutability class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    Nonpayable,
    Payable,
}

impl StateMutability {
    /// True for `pure` and `view` functions (callable via `eth_call` only).
    pub fn is_read_only(self) -> bool {
        matches!(self, StateMutability::Pure | StateMutability::View)
    }
}

/// One entry of a contract ABI, tagged by the artifact's `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum AbiEntry {
    Constructor {
        state_mutability: StateMutability,
        #[serde(default)]
        inputs: Vec<Param>,
    },
    Function {
        name: String,
        state_mutability: StateMutability,
        #[serde(default)]
        inputs: Vec<Param>,
        #[serde(default)]
        outputs: Vec<Param>,
    },
    Event {
        name: String,
        #[serde(default)]
        anonymous: bool,
        #[serde(default)]
        inputs: Vec<Param>,
    },
    Fallback {
        state_mutability: StateMutability,
    },
    Receive {
        state_mutability: StateMutability,
    },
}

impl AbiEntry {
    /// Canonical signature (`name(type,type)`) for functions and events.
    pub fn signature(&self) -> Option<String> {
        let (name, inputs) = match self {
            AbiEntry::Function { name, inputs, .. } => (name, inputs),
            AbiEntry::Event { name, inputs, .. } => (name, inputs),
            _ => return None,
        };
        let types = inputs
            .iter()
            .map(Param::canonical_type)
            .collect::<Vec<_>>()
            .join(",");
        Some(format!("{}({})", name, types))
    }
}

/// An ordered contract ABI as parsed from a build artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractAbi {
    pub entries: Vec<AbiEntry>,
}

impl ContractAbi {
    /// Parse an ABI from artifact JSON (a raw entry array).
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// All function entries, in artifact order.
    pub fn functions(&self) -> impl Iterator<Item = &AbiEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e, AbiEntry::Function { .. }))
    }

    /// All event entries, in artifact order.
    pub fn events(&self) -> impl Iterator<Item = &AbiEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e, AbiEntry::Event { .. }))
    }

    /// All function overloads with the given name.
    pub fn function(&self, name: &str) -> Vec<&AbiEntry> {
        self.functions()
            .filter(|e| matches!(e, AbiEntry::Function { name: n, .. } if n == name))
            .collect()
    }

    /// The event entry with the given name, if any.
    pub fn event(&self, name: &str) -> Option<&AbiEntry> {
        self.events()
            .find(|e| matches!(e, AbiEntry::Event { name: n, .. } if n == name))
    }

    /// 4-byte selector of a function signature.
    pub fn selector(signature: &str) -> [u8; 4] {
        let hash = keccak256(signature.as_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }

    /// topic0 of an event signature.
    pub fn event_topic(signature: &str) -> B256 {
        keccak256(signature.as_bytes())
    }

    /// Check the overload invariant: no two functions or events share a
    /// canonical (name, parameter-type-list) signature.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if let Some(sig) = entry.signature() {
                if !seen.insert(sig.clone()) {
                    bail!("duplicate ABI signature: {}", sig);
                }
            }
        }
        Ok(())
    }
}
