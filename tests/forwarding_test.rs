//! Forwarding-fidelity tests
//!
//! Every accessor must reach the runtime with the descriptor, the baked-in
//! function or event name, and the resolved address it promises, leaving
//! caller-supplied overrides and filters untouched.

use std::sync::Mutex;

use alloy::rpc::types::{BlockNumberOrTag, TransactionRequest};
use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{address, Address, Bytes, B256, U256};
use tokio::sync::mpsc;

use modulus_contracts::{
    Attestation, AttestationStation, CallOverrides, ContractEvent, ContractRuntime, Counter,
    DummyModule, EventFilter, EventQuery, ModuleFactory, PreparedWrite, ReadRequest,
    RuntimeError, Semver, TxHash, WriteRequest,
};

/// Records every request it receives and answers with canned outputs.
#[derive(Default)]
struct MockRuntime {
    reads: Mutex<Vec<ReadRequest>>,
    writes: Mutex<Vec<WriteRequest>>,
    prepares: Mutex<Vec<WriteRequest>>,
    queries: Mutex<Vec<EventQuery>>,
    read_output: Mutex<Vec<DynSolValue>>,
}

impl MockRuntime {
    fn with_output(output: Vec<DynSolValue>) -> Self {
        Self {
            read_output: Mutex::new(output),
            ..Default::default()
        }
    }

    fn last_read(&self) -> ReadRequest {
        self.reads.lock().unwrap().last().cloned().unwrap()
    }

    fn last_write(&self) -> WriteRequest {
        self.writes.lock().unwrap().last().cloned().unwrap()
    }

    fn last_prepare(&self) -> WriteRequest {
        self.prepares.lock().unwrap().last().cloned().unwrap()
    }

    fn last_query(&self) -> EventQuery {
        self.queries.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait::async_trait]
impl ContractRuntime for MockRuntime {
    async fn read(&self, request: ReadRequest) -> Result<Vec<DynSolValue>, RuntimeError> {
        self.reads.lock().unwrap().push(request);
        Ok(self.read_output.lock().unwrap().clone())
    }

    async fn write(&self, request: WriteRequest) -> Result<TxHash, RuntimeError> {
        self.writes.lock().unwrap().push(request);
        Ok(B256::ZERO)
    }

    async fn prepare(&self, request: WriteRequest) -> Result<PreparedWrite, RuntimeError> {
        self.prepares.lock().unwrap().push(request);
        Ok(PreparedWrite {
            request: TransactionRequest::default(),
            gas: 21_000,
        })
    }

    async fn submit(&self, _prepared: PreparedWrite) -> Result<TxHash, RuntimeError> {
        Ok(B256::ZERO)
    }

    async fn subscribe(
        &self,
        query: EventQuery,
    ) -> Result<mpsc::Receiver<ContractEvent>, RuntimeError> {
        self.queries.lock().unwrap().push(query);
        let (_tx, rx) = mpsc::channel(1);
        Ok(rx)
    }

    fn supports_subscriptions(&self) -> bool {
        true
    }

    fn endpoint_name(&self) -> String {
        "mock".to_string()
    }
}

const FACTORY_ADDRESS: Address = address!("1144460C8D6D36b7eB2A16a7FFf2E84a294C2d96");

#[tokio::test]
async fn counter_number_forwards_descriptor_and_no_address() {
    let runtime = MockRuntime::with_output(vec![DynSolValue::Uint(U256::from(7u64), 256)]);
    let counter = Counter::new(&runtime);

    let number = counter.number(CallOverrides::default()).await.unwrap();
    assert_eq!(number, U256::from(7u64));

    let request = runtime.last_read();
    assert!(std::ptr::eq(request.contract, Counter::<MockRuntime>::descriptor()));
    assert_eq!(request.function, "number");
    assert_eq!(request.address, None);
    assert!(request.args.is_empty());
    assert_eq!(request.overrides, CallOverrides::default());
}

#[tokio::test]
async fn generic_read_passes_overrides_through_unchanged() {
    let runtime = MockRuntime::default();
    let counter = Counter::new(&runtime);

    let overrides = CallOverrides {
        from: Some(address!("0000000000000000000000000000000000000001")),
        block: Some(BlockNumberOrTag::Number(1234)),
        gas: Some(500_000),
        ..Default::default()
    };
    counter
        .read("number", Vec::new(), overrides.clone())
        .await
        .unwrap();

    let request = runtime.last_read();
    assert_eq!(request.overrides, overrides);
}

#[tokio::test]
async fn per_call_address_override_wins() {
    let pinned = address!("00000000000000000000000000000000000000aa");
    let override_addr = address!("00000000000000000000000000000000000000bb");

    let runtime = MockRuntime::default();
    let counter = Counter::at(&runtime, pinned);

    counter
        .number(CallOverrides {
            address: Some(override_addr),
            ..Default::default()
        })
        .await
        .ok();

    assert_eq!(runtime.last_read().address, Some(override_addr));
}

#[tokio::test]
async fn module_factory_resolves_address_for_known_chain() {
    let runtime = MockRuntime::default();
    let factory = ModuleFactory::on_chain(&runtime, 10);

    let vault = address!("0000000000000000000000000000000000000002");
    factory
        .create_module(vault, U256::from(1_700_000_000u64), CallOverrides::default())
        .await
        .unwrap();

    let request = runtime.last_write();
    assert!(std::ptr::eq(request.contract, ModuleFactory::<MockRuntime>::descriptor()));
    assert_eq!(request.function, "createModule");
    assert_eq!(request.address, Some(FACTORY_ADDRESS));
    assert_eq!(request.args.len(), 2);
    assert_eq!(request.args[0], DynSolValue::Address(vault));
}

#[tokio::test]
async fn module_factory_unknown_chain_forwards_no_address() {
    let runtime = MockRuntime::default();
    let factory = ModuleFactory::on_chain(&runtime, 1);
    assert_eq!(factory.address(), None);

    factory
        .create_module(
            Address::ZERO,
            U256::ZERO,
            CallOverrides::default(),
        )
        .await
        .unwrap();

    assert_eq!(runtime.last_write().address, None);
}

#[tokio::test]
async fn prepare_flavor_forwards_the_same_request_shape() {
    let runtime = MockRuntime::default();
    let factory = ModuleFactory::on_chain(&runtime, 420);

    let vault = address!("0000000000000000000000000000000000000003");
    factory
        .prepare_create_module(vault, U256::from(99u64), CallOverrides::default())
        .await
        .unwrap();

    let request = runtime.last_prepare();
    assert_eq!(request.function, "createModule");
    assert_eq!(request.address, Some(FACTORY_ADDRESS));
    assert_eq!(request.args[1], DynSolValue::Uint(U256::from(99u64), 256));
}

#[tokio::test]
async fn attest_overloads_share_the_function_name() {
    let runtime = MockRuntime::default();
    let station = AttestationStation::new(&runtime);

    let about = address!("0000000000000000000000000000000000000004");
    let key = B256::repeat_byte(0x11);

    station
        .attest(about, key, Bytes::from(vec![1, 2, 3]), CallOverrides::default())
        .await
        .unwrap();
    let single = runtime.last_write();
    assert_eq!(single.function, "attest");
    assert_eq!(single.args.len(), 3);

    station
        .attest_many(
            vec![Attestation {
                about,
                key,
                val: Bytes::from(vec![4, 5]),
            }],
            CallOverrides::default(),
        )
        .await
        .unwrap();
    let batch = runtime.last_write();
    assert_eq!(batch.function, "attest");
    assert_eq!(batch.args.len(), 1);
    assert!(matches!(batch.args[0], DynSolValue::Array(_)));
}

#[tokio::test]
async fn event_accessor_forces_name_and_keeps_filter() {
    let runtime = MockRuntime::default();
    let counter = Counter::new(&runtime);

    let filter = EventFilter {
        from_block: Some(BlockNumberOrTag::Number(500)),
        topics: vec![B256::repeat_byte(0x22)],
    };
    counter.transfer_events(filter.clone()).await.unwrap();

    let query = runtime.last_query();
    assert!(std::ptr::eq(query.contract, Counter::<MockRuntime>::descriptor()));
    assert_eq!(query.event.as_deref(), Some("Transfer"));
    assert_eq!(query.filter, filter);
    assert_eq!(query.address, None);
}

#[tokio::test]
async fn contract_level_event_accessor_leaves_name_open() {
    let runtime = MockRuntime::default();
    let station = AttestationStation::new(&runtime);

    station.events(EventFilter::default()).await.unwrap();
    assert_eq!(runtime.last_query().event, None);

    station
        .attestation_created_events(EventFilter::default())
        .await
        .unwrap();
    assert_eq!(
        runtime.last_query().event.as_deref(),
        Some("AttestationCreated")
    );
}

#[tokio::test]
async fn typed_reads_decode_their_output_shapes() {
    let vault = address!("0000000000000000000000000000000000000005");

    let runtime = MockRuntime::with_output(vec![DynSolValue::Uint(U256::from(3600u64), 256)]);
    let module = DummyModule::new(&runtime);
    assert_eq!(
        module.cadence(CallOverrides::default()).await.unwrap(),
        U256::from(3600u64)
    );
    assert_eq!(runtime.last_read().function, "cadence");

    let runtime = MockRuntime::with_output(vec![DynSolValue::Address(vault)]);
    let module = DummyModule::new(&runtime);
    assert_eq!(module.vault(CallOverrides::default()).await.unwrap(), vault);

    let runtime =
        MockRuntime::with_output(vec![DynSolValue::String("2.1.0".to_string())]);
    let semver = Semver::new(&runtime);
    assert_eq!(
        semver.version(CallOverrides::default()).await.unwrap(),
        "2.1.0"
    );
    assert_eq!(runtime.last_read().function, "version");
}

#[tokio::test]
async fn typed_read_rejects_mismatched_output() {
    let runtime = MockRuntime::with_output(vec![DynSolValue::Bool(true)]);
    let counter = Counter::new(&runtime);

    let err = counter.number(CallOverrides::default()).await.unwrap_err();
    assert!(matches!(err, RuntimeError::UnexpectedOutput { .. }));
}

#[tokio::test]
async fn attestations_read_forwards_typed_args() {
    let runtime = MockRuntime::with_output(vec![DynSolValue::Bytes(vec![0xab])]);
    let station = AttestationStation::new(&runtime);

    let creator = address!("0000000000000000000000000000000000000006");
    let about = address!("0000000000000000000000000000000000000007");
    let key = B256::repeat_byte(0x33);

    let val = station
        .attestations(creator, about, key, CallOverrides::default())
        .await
        .unwrap();
    assert_eq!(val, Bytes::from(vec![0xab]));

    let request = runtime.last_read();
    assert_eq!(request.function, "attestations");
    assert_eq!(
        request.args,
        vec![
            DynSolValue::Address(creator),
            DynSolValue::Address(about),
            DynSolValue::FixedBytes(key, 32),
        ]
    );
}
