//! The wallet/chain capability consumed by the payment pipeline.
//!
//! Every suspension point in a `pay_charge` call is a method on
//! [`WalletHandle`]. The trait is deliberately narrow: typed reads for the
//! ERC-20 surface the engine needs, fee sampling, raw hash signing for
//! EIP-712 digests, and a split between fire-and-forget submission and
//! receipt-gated submission. Only the approval step uses the latter.

use alloy_primitives::{Address, B256, Bytes, TxHash, U256};
use alloy_transport::TransportError;
use async_trait::async_trait;
use commerce_core::error::PayChargeError;

use crate::chain::ChainId;

/// A transaction the engine wants executed or simulated.
#[derive(Debug, Clone)]
pub struct MetaTransaction {
    /// Target contract address.
    pub to: Address,
    /// ABI-encoded call data.
    pub calldata: Bytes,
    /// Native value attached to the call (zero for token transfers).
    pub value: U256,
    /// Explicit gas limit; `None` lets the node estimate.
    pub gas_limit: Option<u64>,
}

/// Result of a submission that waited for its receipt.
#[derive(Debug, Clone, Copy)]
pub struct TransactionOutcome {
    /// Hash of the mined transaction.
    pub tx_hash: TxHash,
    /// Whether the transaction executed successfully.
    pub success: bool,
}

/// Errors from the wallet/chain layer.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// RPC transport error.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Pending transaction error.
    #[error(transparent)]
    PendingTransaction(#[from] alloy_provider::PendingTransactionError),
    /// The signer refused or failed to produce a signature.
    #[error("Signer error: {0}")]
    Signer(String),
    /// A contract call failed or returned undecodable data.
    #[error("Contract call failed: {0}")]
    ContractCall(String),
}

impl From<WalletError> for PayChargeError {
    /// Wallet failures with no step-specific meaning surface as `Unknown`.
    /// Steps that can say something more precise (approval, simulation,
    /// submission, signing) map the error themselves before it gets here.
    fn from(value: WalletError) -> Self {
        Self::Unknown(value.to_string())
    }
}

/// Capability interface over a connected payer wallet and its chain.
///
/// All methods that touch the network are suspending; the engine imposes no
/// concurrency of its own and calls them strictly in sequence.
#[async_trait]
pub trait WalletHandle: Send + Sync {
    /// Chain id of the active connection.
    fn chain_id(&self) -> ChainId;

    /// Address of the connected account, or `None` if no account is attached.
    fn address(&self) -> Option<Address>;

    /// Reads the ERC-20 balance of `owner` for `token`.
    async fn erc20_balance_of(&self, token: Address, owner: Address) -> Result<U256, WalletError>;

    /// Reads the ERC-20 allowance granted by `owner` to `spender` on `token`.
    async fn erc20_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, WalletError>;

    /// Reads the native balance of `owner` in wei.
    async fn native_balance(&self, owner: Address) -> Result<U256, WalletError>;

    /// Samples the network's current `maxFeePerGas` in wei.
    async fn estimate_fees_per_gas(&self) -> Result<U256, WalletError>;

    /// Signs a 32-byte digest (typically an EIP-712 signing hash).
    ///
    /// The returned bytes may carry a smart-wallet wrapper (ERC-6492); the
    /// caller is responsible for normalizing before on-chain use.
    async fn sign_hash(&self, hash: B256) -> Result<Bytes, WalletError>;

    /// Dry-runs `tx` without submitting it. A revert is an `Err`.
    async fn call(&self, tx: MetaTransaction) -> Result<Bytes, WalletError>;

    /// Submits `tx` and returns its hash without waiting for inclusion.
    async fn send_transaction(&self, tx: MetaTransaction) -> Result<TxHash, WalletError>;

    /// Submits `tx` and waits for its receipt.
    async fn send_transaction_confirmed(
        &self,
        tx: MetaTransaction,
    ) -> Result<TransactionOutcome, WalletError>;
}
