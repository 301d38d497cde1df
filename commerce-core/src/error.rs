//! Error taxonomy for payment execution.
//!
//! Every failure a `pay_charge` call can produce falls into one of three
//! kinds, surfaced synchronously to the caller:
//!
//! - [`ValidationError`] — the input is wrong; retrying without changing it
//!   cannot succeed (top up balance, reconnect the wallet, switch chain).
//! - [`ExecutionError`] — a chain-side action failed; possibly transient,
//!   but never retried by the engine itself, since re-submitting a signed
//!   permit risks nonce collisions.
//! - [`PayChargeError::Unknown`] — anything unexpected from the underlying
//!   network layer, wrapped rather than leaked raw.

use alloy_primitives::{TxHash, U256};

/// Top-level error returned by `pay_charge`.
#[derive(Debug, thiserror::Error)]
pub enum PayChargeError {
    /// The caller's input failed a validation step. Not retryable as-is.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A chain-side action was attempted and failed.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    /// An unexpected failure from the chain or network layer.
    #[error("Unexpected failure: {0}")]
    Unknown(String),
}

impl PayChargeError {
    /// Whether this failure occurred before any on-chain write or signature.
    ///
    /// Validation failures always do; everything else may have left an
    /// approval transaction or a signed permit behind (which is safe, but
    /// worth knowing for diagnostics).
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Non-retryable input failures, detected before any irreversible action.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// The charge carries no transfer intent; it was never hydrated.
    #[error("Charge has not been hydrated with a transfer intent")]
    ChargeNotHydrated,
    /// The charge's expiry time has passed.
    #[error("Charge is expired")]
    ChargeExpired,
    /// The wallet handle has no account attached.
    #[error("Wallet not connected")]
    WalletNotConnected,
    /// The wallet is connected to a different chain than the intent targets.
    #[error("Wallet is connected to chain {connected} but the transfer intent targets chain {expected}")]
    ChainIdMismatch {
        /// Chain id the transfer intent was hydrated for.
        expected: u64,
        /// Chain id of the active wallet connection.
        connected: u64,
    },
    /// The requested currency is not supported on the target chain, or it
    /// resolves to a transfer variant this engine cannot execute.
    #[error("Currency {symbol} is not supported on chain {chain_id}")]
    UnsupportedCurrency {
        /// Logical currency symbol requested by the caller.
        symbol: String,
        /// Chain the payment was attempted on.
        chain_id: u64,
    },
    /// No payment contract is deployed on the target chain.
    #[error("No payment contract deployed on chain {chain_id}")]
    NoPaymentContract {
        /// Chain the payment was attempted on.
        chain_id: u64,
    },
    /// Token balance does not cover `recipientAmount + feeAmount`.
    #[error("Insufficient token balance: required {required}, available {available}")]
    InsufficientTokenBalance {
        /// Total transfer amount in token base units.
        required: U256,
        /// Payer's token balance in base units.
        available: U256,
    },
    /// Native balance does not cover the gas budget.
    #[error("Insufficient native balance for gas: required {required} wei, available {available} wei")]
    InsufficientNativeBalance {
        /// Gas budget in wei.
        required: U256,
        /// Payer's native balance in wei.
        available: U256,
    },
    /// A transfer-intent field could not be converted to its numeric form.
    #[error("Malformed transfer intent: {0}")]
    MalformedIntent(String),
}

/// Chain-side failures from actions the engine actually attempted.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExecutionError {
    /// The ERC-20 approval transaction reverted or could not be confirmed.
    #[error("Token approval failed: {reason}")]
    ApprovalFailed {
        /// What went wrong, in the wallet layer's words.
        reason: String,
        /// Hash of the approval transaction, when one was submitted.
        tx_hash: Option<TxHash>,
    },
    /// The wallet refused or failed to produce a permit signature.
    #[error("Permit signature request failed: {0}")]
    SignatureRejected(String),
    /// The dry-run of the transfer call reverted; nothing was submitted.
    #[error("Transfer simulation reverted: {0}")]
    SimulationReverted(String),
    /// Submission of the transfer transaction failed.
    #[error("Transfer submission failed: {0}")]
    SubmissionFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_flagged() {
        let err = PayChargeError::from(ValidationError::ChargeNotHydrated);
        assert!(err.is_validation());
        let err = PayChargeError::from(ExecutionError::SimulationReverted("revert".into()));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_messages_name_the_failed_step() {
        let err = ValidationError::ChainIdMismatch {
            expected: 8453,
            connected: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("8453"));
        assert!(msg.contains('1'));
    }
}
