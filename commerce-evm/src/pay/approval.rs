//! ERC-20 allowance management for Permit2.
//!
//! Permit2 can only move tokens the payer has approved to it. The engine
//! checks the live allowance and, when short, submits an approval for the
//! required amount plus 10% headroom (integer floor), then waits for the
//! receipt. This is the only step in the pipeline that blocks on inclusion:
//! the settlement call would revert if it landed before the approval.

use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_sol_types::SolCall;
use commerce_core::error::{ExecutionError, PayChargeError};

use crate::chain::{MetaTransaction, WalletHandle};
use crate::pay::contract::IERC20;

/// `required` plus 10% headroom, floored. Saturates at the u256 ceiling so a
/// pathological amount degrades to max approval instead of wrapping.
#[must_use]
pub fn approval_amount(required: U256) -> U256 {
    required
        .checked_mul(U256::from(11u64))
        .map_or(U256::MAX, |n| n / U256::from(10u64))
}

/// Ensures `spender` may draw at least `required` of `token` from `owner`.
///
/// Returns the approval transaction hash if one was needed, `None` when the
/// existing allowance already covers the requirement.
pub async fn ensure_allowance<W: WalletHandle + ?Sized>(
    wallet: &W,
    token: Address,
    owner: Address,
    spender: Address,
    required: U256,
) -> Result<Option<TxHash>, PayChargeError> {
    let current = wallet.erc20_allowance(token, owner, spender).await?;
    if current >= required {
        return Ok(None);
    }

    let call = IERC20::approveCall {
        spender,
        amount: approval_amount(required),
    };
    let tx = MetaTransaction {
        to: token,
        calldata: Bytes::from(call.abi_encode()),
        value: U256::ZERO,
        gas_limit: None,
    };
    let outcome = wallet.send_transaction_confirmed(tx).await.map_err(|e| {
        ExecutionError::ApprovalFailed {
            reason: e.to_string(),
            tx_hash: None,
        }
    })?;
    if !outcome.success {
        return Err(ExecutionError::ApprovalFailed {
            reason: "approval transaction reverted".to_owned(),
            tx_hash: Some(outcome.tx_hash),
        }
        .into());
    }
    Ok(Some(outcome.tx_hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headroom_is_ten_percent_floored() {
        assert_eq!(
            approval_amount(U256::from(1_010_000u64)),
            U256::from(1_111_000u64)
        );
        // 15 * 11 / 10 = 16.5, floored.
        assert_eq!(approval_amount(U256::from(15u64)), U256::from(16u64));
        assert_eq!(approval_amount(U256::ZERO), U256::ZERO);
    }

    #[test]
    fn test_headroom_saturates_near_max() {
        assert_eq!(approval_amount(U256::MAX), U256::MAX);
    }
}
