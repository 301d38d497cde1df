//! Final calldata assembly, simulation, and submission.
//!
//! The settlement call is dry-run with `eth_call` before it is submitted, so
//! a revert costs nothing and surfaces as a typed error. Submission itself
//! is fire-and-forget: the transaction hash comes back as soon as the node
//! accepts it, and confirmation is the caller's concern.

use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_sol_types::SolCall;
use commerce_core::error::{ExecutionError, PayChargeError};

use crate::chain::{MetaTransaction, WalletError, WalletHandle};
use crate::pay::contract::ITransfers;
use crate::pay::types::{Permit2SignatureTransferData, TransferIntent};

/// Encodes a `transferToken` call for `intent` carried by `permit`.
#[must_use]
pub fn build_transfer_token_call(
    intent: &TransferIntent,
    permit: &Permit2SignatureTransferData,
) -> Bytes {
    let call = ITransfers::transferTokenCall {
        intent: intent.to_sol(),
        signatureTransferData: permit.to_sol(),
    };
    Bytes::from(call.abi_encode())
}

/// Maps a dry-run failure. Only a failure the node itself reported counts
/// as a revert; anything that died in transit (timeout, connection reset)
/// says nothing about the call and stays an infrastructure error.
fn simulation_error(e: WalletError) -> PayChargeError {
    match e {
        WalletError::ContractCall(msg) => ExecutionError::SimulationReverted(msg).into(),
        WalletError::Transport(err) if err.as_error_resp().is_some() => {
            ExecutionError::SimulationReverted(err.to_string()).into()
        }
        other => PayChargeError::Unknown(other.to_string()),
    }
}

/// Simulates and then submits a settlement call.
pub async fn dispatch<W: WalletHandle + ?Sized>(
    wallet: &W,
    contract: Address,
    calldata: Bytes,
    gas_limit: u64,
) -> Result<TxHash, PayChargeError> {
    let tx = MetaTransaction {
        to: contract,
        calldata,
        value: U256::ZERO,
        gas_limit: Some(gas_limit),
    };

    wallet.call(tx.clone()).await.map_err(simulation_error)?;

    let tx_hash = wallet
        .send_transaction(tx)
        .await
        .map_err(|e| ExecutionError::SubmissionFailed(e.to_string()))?;
    Ok(tx_hash)
}
