//! Pre-flight validation: everything that can fail before money moves.
//!
//! These checks run in a fixed order inside the pipeline so a caller always
//! sees the most actionable error first. Balance comparisons are inclusive:
//! a balance exactly equal to the requirement passes.

use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};
use commerce_core::charge::Web3Charge;
use commerce_core::error::{PayChargeError, ValidationError};

use crate::chain::{ChainId, WalletHandle};

/// Fails if the wallet is connected to a different chain than the intent
/// targets.
pub fn assert_chain(expected: ChainId, connected: ChainId) -> Result<(), ValidationError> {
    if expected == connected {
        Ok(())
    } else {
        Err(ValidationError::ChainIdMismatch {
            expected,
            connected,
        })
    }
}

/// Fails if the charge's expiry is at or before `now`.
pub fn assert_not_expired(charge: &Web3Charge, now: DateTime<Utc>) -> Result<(), ValidationError> {
    if charge.is_expired_at(now) {
        Err(ValidationError::ChargeExpired)
    } else {
        Ok(())
    }
}

/// Fails unless `owner` holds at least `required` of `token`.
pub async fn assert_enough_token_balance<W: WalletHandle + ?Sized>(
    wallet: &W,
    token: Address,
    owner: Address,
    required: U256,
) -> Result<(), PayChargeError> {
    let available = wallet.erc20_balance_of(token, owner).await?;
    if available < required {
        return Err(ValidationError::InsufficientTokenBalance {
            required,
            available,
        }
        .into());
    }
    Ok(())
}

/// Fails unless `owner` holds at least `required` wei of the native asset.
pub async fn assert_enough_native_balance<W: WalletHandle + ?Sized>(
    wallet: &W,
    owner: Address,
    required: U256,
) -> Result<(), PayChargeError> {
    let available = wallet.native_balance(owner).await?;
    if available < required {
        return Err(ValidationError::InsufficientNativeBalance {
            required,
            available,
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_chain_matching() {
        assert!(assert_chain(8453, 8453).is_ok());
    }

    #[test]
    fn test_assert_chain_mismatch_reports_both_sides() {
        let err = assert_chain(8453, 1).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ChainIdMismatch {
                expected: 8453,
                connected: 1,
            }
        );
    }
}
