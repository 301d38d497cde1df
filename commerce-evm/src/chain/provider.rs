//! RPC-backed wallet handle built on alloy.
//!
//! [`Eip155Wallet`] pairs a JSON-RPC provider with a local signing key and
//! implements [`WalletHandle`] for production use. The provider stack uses
//! alloy's recommended fillers, so gas, nonce, and chain id are populated
//! automatically on submission.

use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::{Address, B256, Bytes, TxHash, U256};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use url::Url;

use crate::chain::wallet::{MetaTransaction, TransactionOutcome, WalletError, WalletHandle};
use crate::chain::ChainId;
use crate::pay::contract::IERC20;

/// A payer wallet connected to one EVM chain over HTTP JSON-RPC.
pub struct Eip155Wallet {
    chain_id: ChainId,
    signer: PrivateKeySigner,
    signer_address: Address,
    provider: DynProvider,
}

impl std::fmt::Debug for Eip155Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Eip155Wallet")
            .field("chain_id", &self.chain_id)
            .field("signer_address", &self.signer_address)
            .finish_non_exhaustive()
    }
}

impl Eip155Wallet {
    /// Connects a signing key to an RPC endpoint for `chain_id`.
    ///
    /// The chain id is configuration, not discovery: the engine compares it
    /// against the transfer intent's target chain before doing anything else,
    /// so a wallet pointed at the wrong endpoint fails validation instead of
    /// submitting to the wrong network.
    #[must_use]
    pub fn connect(rpc_url: Url, chain_id: ChainId, signer: PrivateKeySigner) -> Self {
        let signer_address = signer.address();
        let wallet = EthereumWallet::from(signer.clone());
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(rpc_url)
            .erased();
        Self {
            chain_id,
            signer,
            signer_address,
            provider,
        }
    }

    fn request_for(&self, tx: &MetaTransaction) -> TransactionRequest {
        let mut request = TransactionRequest::default()
            .with_from(self.signer_address)
            .with_to(tx.to)
            .with_input(tx.calldata.clone())
            .with_value(tx.value);
        if let Some(gas_limit) = tx.gas_limit {
            request = request.with_gas_limit(gas_limit);
        }
        request
    }

    async fn read_contract<C: SolCall>(&self, to: Address, call: C) -> Result<C::Return, WalletError> {
        let request = TransactionRequest::default()
            .with_from(self.signer_address)
            .with_to(to)
            .with_input(Bytes::from(call.abi_encode()));
        let returned = self.provider.call(request).await?;
        C::abi_decode_returns(&returned).map_err(|e| WalletError::ContractCall(e.to_string()))
    }
}

#[async_trait]
impl WalletHandle for Eip155Wallet {
    fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    fn address(&self) -> Option<Address> {
        Some(self.signer_address)
    }

    async fn erc20_balance_of(&self, token: Address, owner: Address) -> Result<U256, WalletError> {
        self.read_contract(token, IERC20::balanceOfCall { account: owner })
            .await
    }

    async fn erc20_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, WalletError> {
        self.read_contract(token, IERC20::allowanceCall { owner, spender })
            .await
    }

    async fn native_balance(&self, owner: Address) -> Result<U256, WalletError> {
        let balance = self.provider.get_balance(owner).await?;
        Ok(balance)
    }

    async fn estimate_fees_per_gas(&self) -> Result<U256, WalletError> {
        let fees = self.provider.estimate_eip1559_fees().await?;
        Ok(U256::from(fees.max_fee_per_gas))
    }

    async fn sign_hash(&self, hash: B256) -> Result<Bytes, WalletError> {
        let signature = self
            .signer
            .sign_hash(&hash)
            .await
            .map_err(|e| WalletError::Signer(e.to_string()))?;
        Ok(signature.as_bytes().into())
    }

    async fn call(&self, tx: MetaTransaction) -> Result<Bytes, WalletError> {
        let request = self.request_for(&tx);
        let returned = self.provider.call(request).await?;
        Ok(returned)
    }

    async fn send_transaction(&self, tx: MetaTransaction) -> Result<TxHash, WalletError> {
        let request = self.request_for(&tx);
        let pending = self.provider.send_transaction(request).await?;
        Ok(*pending.tx_hash())
    }

    async fn send_transaction_confirmed(
        &self,
        tx: MetaTransaction,
    ) -> Result<TransactionOutcome, WalletError> {
        let request = self.request_for(&tx);
        let pending = self.provider.send_transaction(request).await?;
        let receipt = pending.get_receipt().await?;
        Ok(TransactionOutcome {
            tx_hash: receipt.transaction_hash,
            success: receipt.status(),
        })
    }
}
