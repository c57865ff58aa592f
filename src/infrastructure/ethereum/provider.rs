//! Alloy-backed [`ContractRuntime`] implementations
//!
//! One enum variant per transport. Reads go through `eth_call`, writes
//! through `eth_sendTransaction` (node-managed accounts), prepared writes
//! simulate and gas-estimate first. Event delivery uses `eth_subscribe`
//! where the transport supports push and falls back to `eth_getLogs`
//! polling over HTTP.

use std::path::PathBuf;
use std::time::Duration;

use alloy::network::Ethereum;
use alloy::providers::{
    fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
    Identity, Provider, ProviderBuilder, RootProvider,
};
use alloy::rpc::types::{Filter, Log, TransactionInput, TransactionRequest};
use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes};
use anyhow::{Context, Result};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::debug;

use crate::domain::abi::ContractDescriptor;
use crate::error::RuntimeError;
use crate::infrastructure::ethereum::codec;
use crate::infrastructure::ethereum::runtime::{
    CallOverrides, ContractEvent, ContractRuntime, EventQuery, PreparedWrite, ReadRequest, TxHash,
    WriteRequest,
};

/// Poll cadence for HTTP log delivery
const LOG_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Runtime endpoint configuration
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    /// HTTP JSON-RPC endpoint
    Http(String),
    /// WebSocket endpoint
    WebSocket(String),
    /// IPC socket path (Unix only)
    #[cfg(unix)]
    Ipc(PathBuf),
}

impl ProviderConfig {
    /// Get display name for this endpoint
    pub fn display(&self) -> String {
        match self {
            ProviderConfig::Http(url) => url.clone(),
            ProviderConfig::WebSocket(url) => url.clone(),
            #[cfg(unix)]
            ProviderConfig::Ipc(path) => path.display().to_string(),
        }
    }

    /// Check if this is a WebSocket endpoint
    pub fn is_websocket(&self) -> bool {
        matches!(self, ProviderConfig::WebSocket(_))
    }
}

// Type aliases for the filled providers
type HttpFillProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider,
    Ethereum,
>;

type WsFillProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider,
    Ethereum,
>;

#[cfg(unix)]
type IpcFillProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider,
    Ethereum,
>;

/// Enum-based runtime that stores concrete types for each transport
pub enum AlloyRuntime {
    Http {
        provider: HttpFillProvider,
        endpoint: String,
    },
    WebSocket {
        provider: WsFillProvider,
        endpoint: String,
    },
    #[cfg(unix)]
    Ipc {
        provider: IpcFillProvider,
        endpoint: String,
    },
}

/// Create a runtime from configuration
pub async fn create_runtime(config: ProviderConfig) -> Result<Box<dyn ContractRuntime>> {
    match config {
        ProviderConfig::Http(url) => {
            let rpc_url = url.parse().context("Invalid HTTP URL")?;
            let provider = ProviderBuilder::new().connect_http(rpc_url);
            debug!(endpoint = %url, "connected http runtime");
            Ok(Box::new(AlloyRuntime::Http {
                provider,
                endpoint: url,
            }))
        }
        ProviderConfig::WebSocket(url) => {
            let provider = ProviderBuilder::new()
                .connect(&url)
                .await
                .context("Failed to create WebSocket provider")?;
            debug!(endpoint = %url, "connected websocket runtime");
            Ok(Box::new(AlloyRuntime::WebSocket {
                provider,
                endpoint: url,
            }))
        }
        #[cfg(unix)]
        ProviderConfig::Ipc(path) => {
            use alloy::providers::IpcConnect;
            let ipc_path = path.to_string_lossy().to_string();
            let ipc = IpcConnect::new(ipc_path);
            let provider = ProviderBuilder::new()
                .connect_ipc(ipc)
                .await
                .context("Failed to create IPC provider")?;
            let endpoint_display = path.display().to_string();
            debug!(endpoint = %endpoint_display, "connected ipc runtime");
            Ok(Box::new(AlloyRuntime::Ipc {
                provider,
                endpoint: endpoint_display,
            }))
        }
    }
}

// Macro to reduce code duplication for per-transport method implementations
macro_rules! with_provider {
    ($self:ident, $provider:ident => $body:expr) => {
        match $self {
            AlloyRuntime::Http {
                provider: $provider,
                ..
            } => $body,
            AlloyRuntime::WebSocket {
                provider: $provider,
                ..
            } => $body,
            #[cfg(unix)]
            AlloyRuntime::Ipc {
                provider: $provider,
                ..
            } => $body,
        }
    };
}

/// Build the transaction request shared by reads and writes.
fn build_transaction(to: Address, data: Vec<u8>, overrides: &CallOverrides) -> TransactionRequest {
    TransactionRequest {
        from: overrides.from,
        to: Some(to.into()),
        input: TransactionInput::new(Bytes::from(data)),
        value: overrides.value,
        gas: overrides.gas,
        gas_price: overrides.gas_price,
        nonce: overrides.nonce,
        ..Default::default()
    }
}

fn require_address(
    contract: &'static ContractDescriptor,
    address: Option<Address>,
) -> Result<Address, RuntimeError> {
    address.ok_or(RuntimeError::MissingAddress {
        contract: contract.name,
    })
}

/// Resolve the sending account: the override if given, otherwise the
/// node's first unlocked account (the dev-node workflow).
async fn sender_account<P: Provider>(
    provider: &P,
    overrides: &CallOverrides,
) -> Result<Address, RuntimeError> {
    if let Some(from) = overrides.from {
        return Ok(from);
    }
    let accounts = provider.get_accounts().await.map_err(RuntimeError::rpc)?;
    accounts
        .first()
        .copied()
        .ok_or_else(|| RuntimeError::rpc(anyhow::anyhow!("node exposes no unlocked accounts")))
}

async fn run_read<P: Provider>(
    provider: &P,
    request: &ReadRequest,
) -> Result<Vec<DynSolValue>, RuntimeError> {
    let function =
        codec::resolve_function(request.contract, &request.function, request.args.len())?;
    let data = codec::encode_call(function, &request.args)?;
    let to = require_address(request.contract, request.address)?;
    let tx = build_transaction(to, data, &request.overrides);

    debug!(
        contract = request.contract.name,
        function = %request.function,
        "eth_call"
    );

    let call = provider.call(tx);
    let output = match request.overrides.block {
        Some(block) => call.block(block.into()).await,
        None => call.await,
    }
    .map_err(RuntimeError::rpc)?;

    codec::decode_output(function, &output)
}

async fn run_write<P: Provider>(
    provider: &P,
    request: &WriteRequest,
) -> Result<TxHash, RuntimeError> {
    let function =
        codec::resolve_function(request.contract, &request.function, request.args.len())?;
    let data = codec::encode_call(function, &request.args)?;
    let to = require_address(request.contract, request.address)?;
    let mut tx = build_transaction(to, data, &request.overrides);
    tx.from = Some(sender_account(provider, &request.overrides).await?);

    debug!(
        contract = request.contract.name,
        function = %request.function,
        "eth_sendTransaction"
    );

    let pending = provider
        .send_transaction(tx)
        .await
        .map_err(RuntimeError::rpc)?;
    Ok(*pending.tx_hash())
}

async fn run_prepare<P: Provider>(
    provider: &P,
    request: &WriteRequest,
) -> Result<PreparedWrite, RuntimeError> {
    let function =
        codec::resolve_function(request.contract, &request.function, request.args.len())?;
    let data = codec::encode_call(function, &request.args)?;
    let to = require_address(request.contract, request.address)?;
    let mut tx = build_transaction(to, data, &request.overrides);
    tx.from = Some(sender_account(provider, &request.overrides).await?);

    debug!(
        contract = request.contract.name,
        function = %request.function,
        "simulating write"
    );

    // Simulation surfaces reverts before anything is submitted
    provider.call(tx.clone()).await.map_err(RuntimeError::rpc)?;
    let gas = match request.overrides.gas {
        Some(gas) => gas,
        None => provider
            .estimate_gas(tx.clone())
            .await
            .map_err(RuntimeError::rpc)?,
    };

    Ok(PreparedWrite { request: tx, gas })
}

async fn run_submit<P: Provider>(
    provider: &P,
    prepared: PreparedWrite,
) -> Result<TxHash, RuntimeError> {
    let mut tx = prepared.request;
    if tx.gas.is_none() {
        tx.gas = Some(prepared.gas);
    }
    let pending = provider
        .send_transaction(tx)
        .await
        .map_err(RuntimeError::rpc)?;
    Ok(*pending.tx_hash())
}

/// Build the log filter for a query.
fn build_filter(query: &EventQuery) -> Result<Filter, RuntimeError> {
    let topic0 = codec::event_topics(query.contract, query.event.as_deref())?;
    let mut filter = Filter::new().event_signature(topic0);
    if let Some(address) = query.address {
        filter = filter.address(address);
    }
    if let Some(from_block) = query.filter.from_block {
        filter = filter.from_block(from_block);
    }
    let mut extra = query.filter.topics.iter().copied();
    if let Some(topic) = extra.next() {
        filter = filter.topic1(topic);
    }
    if let Some(topic) = extra.next() {
        filter = filter.topic2(topic);
    }
    if let Some(topic) = extra.next() {
        filter = filter.topic3(topic);
    }
    Ok(filter)
}

/// Decode a raw log against the query's contract and forward it.
/// Returns false once the receiver is gone.
async fn forward_log(query: &EventQuery, log: &Log, tx: &mpsc::Sender<ContractEvent>) -> bool {
    let Some(topic0) = log.topic0().copied() else {
        return true;
    };
    let Some(event) = codec::event_for_topic(query.contract, topic0) else {
        return true;
    };
    match codec::decode_log(event, log.address(), log.topics(), &log.inner.data.data) {
        Ok(mut decoded) => {
            decoded.block_number = log.block_number;
            decoded.tx_hash = log.transaction_hash;
            decoded.log_index = log.log_index;
            tx.send(decoded).await.is_ok()
        }
        Err(err) => {
            debug!(
                contract = query.contract.name,
                error = %err,
                "skipping undecodable log"
            );
            true
        }
    }
}

/// Push delivery: one `eth_subscribe` stream per query.
async fn subscribe_push<P>(
    provider: P,
    query: EventQuery,
) -> Result<mpsc::Receiver<ContractEvent>, RuntimeError>
where
    P: Provider + Clone + 'static,
{
    let filter = build_filter(&query)?;
    let sub = provider
        .subscribe_logs(&filter)
        .await
        .map_err(RuntimeError::rpc)?;
    let (tx, rx) = mpsc::channel(100);

    tokio::spawn(async move {
        let mut stream = sub.into_stream();
        while let Some(log) = stream.next().await {
            if !forward_log(&query, &log, &tx).await {
                break;
            }
        }
    });

    Ok(rx)
}

/// Poll delivery: `eth_getLogs` on an interval, tracking the head.
async fn subscribe_poll<P>(
    provider: P,
    query: EventQuery,
) -> Result<mpsc::Receiver<ContractEvent>, RuntimeError>
where
    P: Provider + Clone + 'static,
{
    let base_filter = build_filter(&query)?;
    let head = provider
        .get_block_number()
        .await
        .map_err(RuntimeError::rpc)?;
    // Start from the caller's block if it names one, otherwise the next head
    let start = match query.filter.from_block {
        Some(alloy::rpc::types::BlockNumberOrTag::Number(number)) => number,
        _ => head + 1,
    };
    let (tx, rx) = mpsc::channel(100);

    tokio::spawn(async move {
        let mut next_block = start;
        let mut ticker = interval(LOG_POLL_INTERVAL);
        loop {
            ticker.tick().await;
            if tx.is_closed() {
                break;
            }
            let head = match provider.get_block_number().await {
                Ok(head) => head,
                Err(_) => continue,
            };
            if head < next_block {
                continue;
            }
            let filter = base_filter.clone().from_block(next_block).to_block(head);
            let logs = match provider.get_logs(&filter).await {
                Ok(logs) => logs,
                Err(_) => continue,
            };
            for log in &logs {
                if !forward_log(&query, log, &tx).await {
                    return;
                }
            }
            next_block = head + 1;
        }
    });

    Ok(rx)
}

#[async_trait::async_trait]
impl ContractRuntime for AlloyRuntime {
    async fn read(&self, request: ReadRequest) -> Result<Vec<DynSolValue>, RuntimeError> {
        with_provider!(self, provider => run_read(provider, &request).await)
    }

    async fn write(&self, request: WriteRequest) -> Result<TxHash, RuntimeError> {
        with_provider!(self, provider => run_write(provider, &request).await)
    }

    async fn prepare(&self, request: WriteRequest) -> Result<PreparedWrite, RuntimeError> {
        with_provider!(self, provider => run_prepare(provider, &request).await)
    }

    async fn submit(&self, prepared: PreparedWrite) -> Result<TxHash, RuntimeError> {
        with_provider!(self, provider => run_submit(provider, prepared).await)
    }

    async fn subscribe(
        &self,
        query: EventQuery,
    ) -> Result<mpsc::Receiver<ContractEvent>, RuntimeError> {
        debug!(
            contract = query.contract.name,
            event = query.event.as_deref().unwrap_or("*"),
            "subscribing to logs"
        );
        match self {
            AlloyRuntime::Http { provider, .. } => subscribe_poll(provider.clone(), query).await,
            AlloyRuntime::WebSocket { provider, .. } => {
                subscribe_push(provider.clone(), query).await
            }
            #[cfg(unix)]
            AlloyRuntime::Ipc { provider, .. } => subscribe_push(provider.clone(), query).await,
        }
    }

    fn supports_subscriptions(&self) -> bool {
        match self {
            AlloyRuntime::Http { .. } => false,
            AlloyRuntime::WebSocket { .. } => true,
            #[cfg(unix)]
            AlloyRuntime::Ipc { .. } => true,
        }
    }

    fn endpoint_name(&self) -> String {
        match self {
            AlloyRuntime::Http { endpoint, .. } => endpoint.clone(),
            AlloyRuntime::WebSocket { endpoint, .. } => endpoint.clone(),
            #[cfg(unix)]
            AlloyRuntime::Ipc { endpoint, .. } => endpoint.clone(),
        }
    }
}
