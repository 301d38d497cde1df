//! Off-chain Permit2 signing.
//!
//! Instead of a second on-chain approval to the settlement contract, the
//! payer signs an EIP-712 `PermitTransferFrom` witness that lets the
//! settlement contract draw the transfer amount through Permit2, single use
//! and deadline bound. The nonce is 128 random bits drawn fresh for every
//! signature, so re-running a payment never reuses a permit.

use alloy_primitives::{Address, U256};
use alloy_sol_types::{SolStruct, eip712_domain};
use commerce_core::error::{ExecutionError, PayChargeError};
use rand::{RngExt, rng};

use crate::chain::{ChainId, WalletHandle};
use crate::pay::contract::{PermitTransferFrom, TokenPermissions};
use crate::pay::signature::normalize_signature;
use crate::pay::types::Permit2SignatureTransferData;

/// What to sign: which token, how much, who may draw it, and until when.
#[derive(Debug, Clone, Copy)]
pub struct PermitRequest {
    /// Token the permit covers.
    pub token: Address,
    /// Contract allowed to draw the permit.
    pub spender: Address,
    /// Amount the permit covers, in token base units.
    pub value: U256,
    /// Permit expiry as seconds since the Unix epoch.
    pub deadline: u64,
    /// Chain the permit is valid on.
    pub chain_id: ChainId,
    /// Permit2 deployment the witness is domain-bound to.
    pub permit2: Address,
}

/// Signs a single-use Permit2 transfer permit with the connected wallet.
///
/// The signature is normalized (ERC-6492 wrapper stripped) before it is
/// returned, so the result is ready to submit as-is.
pub async fn sign_permit<W: WalletHandle + ?Sized>(
    wallet: &W,
    request: PermitRequest,
) -> Result<Permit2SignatureTransferData, PayChargeError> {
    let nonce_bytes: [u8; 16] = rng().random();
    let nonce = U256::from_be_slice(&nonce_bytes);
    let deadline = U256::from(request.deadline);

    let witness = PermitTransferFrom {
        permitted: TokenPermissions {
            token: request.token,
            amount: request.value,
        },
        spender: request.spender,
        nonce,
        deadline,
    };
    let domain = eip712_domain! {
        name: "Permit2",
        chain_id: request.chain_id,
        verifying_contract: request.permit2,
    };
    let digest = witness.eip712_signing_hash(&domain);

    let signature = wallet
        .sign_hash(digest)
        .await
        .map_err(|e| ExecutionError::SignatureRejected(e.to_string()))?;
    let signature = normalize_signature(signature)?;

    Ok(Permit2SignatureTransferData {
        token: request.token,
        amount: request.value,
        spender: request.spender,
        nonce,
        deadline,
        requested_amount: request.value,
        signature,
    })
}
