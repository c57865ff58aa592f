//! The generic read / write / prepare / subscribe seam
//!
//! Accessors in [`crate::contracts`] build the request types below with the
//! contract's descriptor (and resolved address) pre-filled and forward them
//! to a [`ContractRuntime`]. Everything past this trait - transports,
//! encoding, subscription delivery - belongs to the runtime implementation.

use alloy::rpc::types::{BlockNumberOrTag, TransactionRequest};
use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256, U256};
use tokio::sync::mpsc;

use crate::domain::abi::ContractDescriptor;
use crate::error::RuntimeError;

/// Transaction hash returned by the write flavors.
pub type TxHash = B256;

/// Caller-supplied call options, forwarded untouched by the accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallOverrides {
    /// Per-call address override (takes precedence over any resolved address)
    pub address: Option<Address>,
    /// Caller account (`from`); writes without one use the node's first
    /// unlocked account
    pub from: Option<Address>,
    /// Block to read at (reads only)
    pub block: Option<BlockNumberOrTag>,
    /// Ether value attached to a write
    pub value: Option<U256>,
    /// Gas limit
    pub gas: Option<u64>,
    /// Gas price in wei
    pub gas_price: Option<u128>,
    /// Account nonce
    pub nonce: Option<u64>,
}

/// A fully-resolved `eth_call` invocation.
#[derive(Debug, Clone)]
pub struct ReadRequest {
    pub contract: &'static ContractDescriptor,
    /// Resolved target; `None` reaches the runtime as a missing-address error
    pub address: Option<Address>,
    pub function: String,
    pub args: Vec<DynSolValue>,
    pub overrides: CallOverrides,
}

/// A fully-resolved state-changing invocation (direct or prepared flavor).
#[derive(Debug, Clone)]
pub struct WriteRequest {
    pub contract: &'static ContractDescriptor,
    pub address: Option<Address>,
    pub function: String,
    pub args: Vec<DynSolValue>,
    pub overrides: CallOverrides,
}

/// Result of the prepare flavor: the call was simulated and gas estimated,
/// and the populated transaction is ready for submission.
#[derive(Debug, Clone)]
pub struct PreparedWrite {
    pub request: TransactionRequest,
    pub gas: u64,
}

/// Caller-supplied log filter, forwarded untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub from_block: Option<BlockNumberOrTag>,
    /// Additional topic constraints beyond the event signature topic
    pub topics: Vec<B256>,
}

/// A fully-resolved event subscription.
#[derive(Debug, Clone)]
pub struct EventQuery {
    pub contract: &'static ContractDescriptor,
    pub address: Option<Address>,
    /// `None` subscribes to every event the ABI declares
    pub event: Option<String>,
    pub filter: EventFilter,
}

/// One decoded event delivery.
#[derive(Debug, Clone)]
pub struct ContractEvent {
    pub name: String,
    /// Decoded parameters in declared order
    pub params: Vec<(String, DynSolValue)>,
    pub address: Address,
    pub block_number: Option<u64>,
    pub tx_hash: Option<B256>,
    pub log_index: Option<u64>,
}

/// Abstract contract runtime
///
/// This trait defines the primitives the typed accessors forward to,
/// abstracting over the specific alloy transport. The test suite supplies
/// a recording implementation to verify forwarding fidelity.
#[async_trait::async_trait]
pub trait ContractRuntime: Send + Sync + 'static {
    /// Execute a read-only call and decode its outputs.
    async fn read(&self, request: ReadRequest) -> Result<Vec<DynSolValue>, RuntimeError>;

    /// Submit a state-changing call directly.
    async fn write(&self, request: WriteRequest) -> Result<TxHash, RuntimeError>;

    /// Simulate and gas-estimate a state-changing call without submitting.
    async fn prepare(&self, request: WriteRequest) -> Result<PreparedWrite, RuntimeError>;

    /// Submit a previously prepared call.
    async fn submit(&self, prepared: PreparedWrite) -> Result<TxHash, RuntimeError>;

    /// Subscribe to decoded contract events.
    async fn subscribe(
        &self,
        query: EventQuery,
    ) -> Result<mpsc::Receiver<ContractEvent>, RuntimeError>;

    /// Whether the endpoint delivers push subscriptions (HTTP polls instead).
    fn supports_subscriptions(&self) -> bool;

    /// Get endpoint display name
    fn endpoint_name(&self) -> String;
}
