//! Error type shared by the runtime seam and the typed accessors

use thiserror::Error;

/// Failures surfaced by a [`ContractRuntime`](crate::infrastructure::ethereum::ContractRuntime)
/// or by request construction.
///
/// Network errors, reverts and decoding mismatches are passed through
/// verbatim from alloy; the only conditions this crate originates are the
/// lookup failures below.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A call was dispatched without an address and the contract has no
    /// entry for the requested chain.
    #[error("no deployed address for {contract}")]
    MissingAddress { contract: &'static str },

    /// The requested function name (or arity) does not exist in the ABI.
    #[error("{contract} has no function {function} with {arity} argument(s)")]
    UnknownFunction {
        contract: &'static str,
        function: String,
        arity: usize,
    },

    /// The requested event name does not exist in the ABI.
    #[error("{contract} has no event {event}")]
    UnknownEvent {
        contract: &'static str,
        event: String,
    },

    /// Argument encoding or output decoding failed.
    #[error("abi codec: {0}")]
    Codec(#[from] alloy_dyn_abi::Error),

    /// A typed accessor received outputs of a shape its ABI does not declare.
    #[error("unexpected output shape from {function}")]
    UnexpectedOutput { function: &'static str },

    /// The endpoint cannot deliver push subscriptions and polling was
    /// disabled.
    #[error("subscriptions unsupported on {endpoint}")]
    SubscriptionsUnsupported { endpoint: String },

    /// Transport or node failure, surfaced unchanged.
    #[error("rpc: {0:#}")]
    Rpc(#[source] anyhow::Error),
}

impl RuntimeError {
    /// Wrap a transport-level failure.
    pub fn rpc(err: impl Into<anyhow::Error>) -> Self {
        RuntimeError::Rpc(err.into())
    }
}
