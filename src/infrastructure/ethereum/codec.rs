//! ABI codec helpers - alloy-backed encode/decode for the runtime
//!
//! Resolution is by (name, arity) so the attest-style overloads pick the
//! right entry; the actual byte-level work is all alloy's.

use alloy_dyn_abi::{DynSolValue, EventExt, FunctionExt, JsonAbiExt};
use alloy_json_abi::{Event, Function};
use alloy_primitives::B256;

use crate::domain::abi::ContractDescriptor;
use crate::error::RuntimeError;
use crate::infrastructure::ethereum::runtime::ContractEvent;

/// Resolve a function entry by name and argument count.
pub(crate) fn resolve_function<'a>(
    contract: &'a ContractDescriptor,
    function: &str,
    arity: usize,
) -> Result<&'a Function, RuntimeError> {
    contract
        .json_abi
        .functions
        .get(function)
        .and_then(|overloads| overloads.iter().find(|f| f.inputs.len() == arity))
        .ok_or_else(|| RuntimeError::UnknownFunction {
            contract: contract.name,
            function: function.to_string(),
            arity,
        })
}

/// Resolve an event entry by name.
pub(crate) fn resolve_event<'a>(
    contract: &'a ContractDescriptor,
    event: &str,
) -> Result<&'a Event, RuntimeError> {
    contract
        .json_abi
        .events
        .get(event)
        .and_then(|overloads| overloads.first())
        .ok_or_else(|| RuntimeError::UnknownEvent {
            contract: contract.name,
            event: event.to_string(),
        })
}

/// ABI-encode a call (selector plus arguments).
pub(crate) fn encode_call(
    function: &Function,
    args: &[DynSolValue],
) -> Result<Vec<u8>, RuntimeError> {
    Ok(function.abi_encode_input(args)?)
}

/// Decode call return data into dynamic values.
pub(crate) fn decode_output(
    function: &Function,
    data: &[u8],
) -> Result<Vec<DynSolValue>, RuntimeError> {
    Ok(function.abi_decode_output(data)?)
}

/// topic0 values to filter on for a query: the named event's signature
/// topic, or every declared event when no name is given.
pub(crate) fn event_topics(
    contract: &ContractDescriptor,
    event: Option<&str>,
) -> Result<Vec<B256>, RuntimeError> {
    match event {
        Some(name) => Ok(vec![resolve_event(contract, name)?.selector()]),
        None => Ok(contract
            .json_abi
            .events
            .values()
            .flatten()
            .map(Event::selector)
            .collect()),
    }
}

/// Find the event entry matching a log's topic0.
pub(crate) fn event_for_topic(contract: &ContractDescriptor, topic0: B256) -> Option<&Event> {
    contract
        .json_abi
        .events
        .values()
        .flatten()
        .find(|event| event.selector() == topic0)
}

/// Decode one raw log into a [`ContractEvent`], parameters in declared
/// order (indexed values come from topics, the rest from the data blob).
pub(crate) fn decode_log(
    event: &Event,
    address: alloy_primitives::Address,
    topics: &[B256],
    data: &[u8],
) -> Result<ContractEvent, RuntimeError> {
    let decoded = event.decode_log_parts(topics.iter().copied(), data)?;

    let mut indexed = decoded.indexed.into_iter();
    let mut body = decoded.body.into_iter();
    let mut params = Vec::with_capacity(event.inputs.len());
    for input in &event.inputs {
        let value = if input.indexed {
            indexed.next()
        } else {
            body.next()
        };
        if let Some(value) = value {
            params.push((input.name.clone(), value));
        }
    }

    Ok(ContractEvent {
        name: event.name.clone(),
        params,
        address,
        block_number: None,
        tx_hash: None,
        log_index: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::abi::registry::{ATTESTATION_STATION, COUNTER};
    use alloy_primitives::{address, keccak256, Address, U256};

    #[test]
    fn test_resolve_overload_by_arity() {
        let single = resolve_function(&ATTESTATION_STATION, "attest", 3).unwrap();
        assert_eq!(single.inputs.len(), 3);

        let batch = resolve_function(&ATTESTATION_STATION, "attest", 1).unwrap();
        assert_eq!(batch.inputs[0].ty, "tuple[]");

        assert!(resolve_function(&ATTESTATION_STATION, "attest", 2).is_err());
        assert!(resolve_function(&COUNTER, "missing", 0).is_err());
    }

    #[test]
    fn test_encode_increment() {
        let function = resolve_function(&COUNTER, "increment", 0).unwrap();
        let data = encode_call(function, &[]).unwrap();
        assert_eq!(data, vec![0xd0, 0x9d, 0xe0, 0x8a]);
    }

    #[test]
    fn test_encode_set_number() {
        let function = resolve_function(&COUNTER, "setNumber", 1).unwrap();
        let data = encode_call(function, &[DynSolValue::Uint(U256::from(42u64), 256)]).unwrap();
        assert_eq!(&data[..4], &[0x3f, 0xb5, 0xc1, 0xcb]);
        assert_eq!(data.len(), 36);
        assert_eq!(data[35], 42);
    }

    #[test]
    fn test_decode_number_output() {
        let function = resolve_function(&COUNTER, "number", 0).unwrap();
        let mut data = [0u8; 32];
        data[31] = 7;
        let out = decode_output(function, &data).unwrap();
        assert_eq!(out, vec![DynSolValue::Uint(U256::from(7u64), 256)]);
    }

    #[test]
    fn test_event_topics_named_and_all() {
        let transfer = keccak256("Transfer(address,address,uint256)".as_bytes());
        assert_eq!(event_topics(&COUNTER, Some("Transfer")).unwrap(), vec![transfer]);
        assert_eq!(event_topics(&COUNTER, None).unwrap(), vec![transfer]);
        assert!(event_topics(&COUNTER, Some("Missing")).is_err());
    }

    #[test]
    fn test_decode_transfer_log() {
        let event = resolve_event(&COUNTER, "Transfer").unwrap();
        let from = address!("0000000000000000000000000000000000000001");
        let to = address!("0000000000000000000000000000000000000002");

        let topics = vec![
            event.selector(),
            B256::left_padding_from(from.as_slice()),
            B256::left_padding_from(to.as_slice()),
        ];
        let mut data = [0u8; 32];
        data[31] = 5;

        let decoded = decode_log(event, Address::ZERO, &topics, &data).unwrap();
        assert_eq!(decoded.name, "Transfer");
        assert_eq!(decoded.params.len(), 3);
        assert_eq!(decoded.params[0].0, "from");
        assert_eq!(decoded.params[0].1, DynSolValue::Address(from));
        assert_eq!(decoded.params[2].1, DynSolValue::Uint(U256::from(5u64), 256));
    }
}
