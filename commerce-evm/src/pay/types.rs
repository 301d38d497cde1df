//! Typed, on-chain forms of the payment pipeline's data.
//!
//! [`TransferIntent`] is the decimal-string wire intent converted to alloy
//! integer and address types exactly once, at the pipeline boundary.
//! Everything downstream works with these types and never re-parses strings.

use alloy_primitives::{Address, Bytes, FixedBytes, TxHash, U256};
use commerce_core::charge::Web3Charge;
use commerce_core::error::ValidationError;
use commerce_core::timestamp::UnixTimestamp;

use crate::chain::{ChainId, WalletHandle};
use crate::networks::{CurrencySymbol, NATIVE_CURRENCY_ADDRESS, PaymentCurrency};
use crate::pay::contract;

/// A transfer intent in its on-chain integer form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferIntent {
    /// Amount owed to the recipient, in the settlement currency's base units.
    pub recipient_amount: U256,
    /// Intent expiry as seconds since the Unix epoch.
    pub deadline: UnixTimestamp,
    /// Recipient of the transfer.
    pub recipient: Address,
    /// Settlement currency contract, or the zero address for the native asset.
    pub recipient_currency: Address,
    /// Where funds return if settlement fails mid-swap.
    pub refund_destination: Address,
    /// Operator fee, in the settlement currency's base units.
    pub fee_amount: U256,
    /// Operator-assigned 128-bit intent id.
    pub id: FixedBytes<16>,
    /// Operator address that signed the intent.
    pub operator: Address,
    /// Operator signature over the intent.
    pub signature: Bytes,
    /// Signature prefix blob forwarded verbatim to the contract.
    pub prefix: Bytes,
    /// Chain the intent settles on.
    pub chain_id: ChainId,
    /// Payer address the intent was issued for.
    pub sender: Address,
}

impl TransferIntent {
    /// Total the payer must cover: recipient amount plus operator fee.
    ///
    /// The two u256 amounts come from an external service, so the sum is
    /// checked rather than assumed to fit.
    pub fn total_amount(&self) -> Result<U256, ValidationError> {
        self.recipient_amount
            .checked_add(self.fee_amount)
            .ok_or_else(|| {
                ValidationError::MalformedIntent(
                    "recipient amount plus fee overflows u256".to_owned(),
                )
            })
    }

    /// Converts to the ABI struct the settlement contract takes.
    #[must_use]
    pub fn to_sol(&self) -> contract::TransferIntent {
        contract::TransferIntent {
            recipientAmount: self.recipient_amount,
            deadline: U256::from(self.deadline.as_secs()),
            recipient: self.recipient,
            recipientCurrency: self.recipient_currency,
            refundDestination: self.refund_destination,
            feeAmount: self.fee_amount,
            id: self.id,
            operator: self.operator,
            signature: self.signature.clone(),
            prefix: self.prefix.clone(),
        }
    }
}

/// The four settlement entry points, keyed by how the payer's currency
/// relates to the intent's settlement currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionVariant {
    /// Payer holds the native asset, intent settles in the native asset.
    TransferNative,
    /// Payer holds the settlement token itself.
    TransferToken,
    /// Payer holds the native asset, intent settles in a token.
    SwapAndTransferUniswapV3Native,
    /// Payer holds a token other than the settlement currency.
    SwapAndTransferUniswapV3Token,
}

impl FunctionVariant {
    /// Picks the entry point for paying `intent` with `currency`.
    ///
    /// The token match is case-insensitive on the address bytes: alloy
    /// addresses compare by value, so two checksummed spellings of the same
    /// address are equal here.
    #[must_use]
    pub fn select(currency: &PaymentCurrency, intent: &TransferIntent) -> Self {
        let settles_native = intent.recipient_currency == NATIVE_CURRENCY_ADDRESS;
        if currency.is_native_asset {
            if settles_native {
                Self::TransferNative
            } else {
                Self::SwapAndTransferUniswapV3Native
            }
        } else if currency.contract_address == Some(intent.recipient_currency) {
            Self::TransferToken
        } else {
            Self::SwapAndTransferUniswapV3Token
        }
    }

    /// ABI name of the contract function.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TransferNative => "transferNative",
            Self::TransferToken => "transferToken",
            Self::SwapAndTransferUniswapV3Native => "swapAndTransferUniswapV3Native",
            Self::SwapAndTransferUniswapV3Token => "swapAndTransferUniswapV3Token",
        }
    }
}

impl std::fmt::Display for FunctionVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed Permit2 material ready to ride along with `transferToken`.
#[derive(Debug, Clone)]
pub struct Permit2SignatureTransferData {
    /// The permitted token and amount.
    pub token: Address,
    /// Maximum amount the permit covers.
    pub amount: U256,
    /// Contract allowed to draw the permit.
    pub spender: Address,
    /// Random 128-bit nonce, widened to u256.
    pub nonce: U256,
    /// Permit expiry as seconds since the Unix epoch.
    pub deadline: U256,
    /// Destination and amount for the draw.
    pub requested_amount: U256,
    /// Payer's EIP-712 signature, unwrapped to its raw form.
    pub signature: Bytes,
}

impl Permit2SignatureTransferData {
    /// Converts to the ABI struct `transferToken` takes.
    #[must_use]
    pub fn to_sol(&self) -> contract::Permit2SignatureTransferData {
        contract::Permit2SignatureTransferData {
            permit: contract::Permit {
                permitted: contract::TokenPermissions {
                    token: self.token,
                    amount: self.amount,
                },
                nonce: self.nonce,
                deadline: self.deadline,
            },
            transferDetails: contract::SignatureTransferDetails {
                to: self.spender,
                requestedAmount: self.requested_amount,
            },
            signature: self.signature.clone(),
        }
    }
}

/// Inputs to [`PaymentEngine::pay_charge`](crate::pay::PaymentEngine::pay_charge).
#[derive(Debug)]
pub struct PayChargeParams<'a, W: WalletHandle + ?Sized> {
    /// The hydrated charge to pay.
    pub charge: &'a Web3Charge,
    /// Connected payer wallet.
    pub wallet: &'a W,
    /// Currency the payer wants to pay with.
    pub currency: CurrencySymbol,
}

/// Successful payment result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayChargeResponse {
    /// Hash of the submitted settlement transaction.
    pub transaction_hash: TxHash,
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    fn intent_settling_in(currency: Address) -> TransferIntent {
        TransferIntent {
            recipient_amount: U256::from(1_000_000u64),
            deadline: UnixTimestamp::from_secs(1_893_456_000),
            recipient: address!("0x1111111111111111111111111111111111111111"),
            recipient_currency: currency,
            refund_destination: address!("0x2222222222222222222222222222222222222222"),
            fee_amount: U256::from(10_000u64),
            id: FixedBytes::from([0xabu8; 16]),
            operator: address!("0x3333333333333333333333333333333333333333"),
            signature: Bytes::from_static(&[0x01, 0x02]),
            prefix: Bytes::new(),
            chain_id: 8453,
            sender: address!("0x4444444444444444444444444444444444444444"),
        }
    }

    fn token_currency(addr: Address) -> PaymentCurrency {
        PaymentCurrency {
            is_native_asset: false,
            contract_address: Some(addr),
            decimals: 6,
            uniswap_fee_tier: None,
        }
    }

    const NATIVE: PaymentCurrency = PaymentCurrency {
        is_native_asset: true,
        contract_address: None,
        decimals: 18,
        uniswap_fee_tier: None,
    };

    #[test]
    fn test_select_native_to_native() {
        let intent = intent_settling_in(Address::ZERO);
        assert_eq!(
            FunctionVariant::select(&NATIVE, &intent),
            FunctionVariant::TransferNative
        );
    }

    #[test]
    fn test_select_native_to_token() {
        let intent = intent_settling_in(address!("0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"));
        assert_eq!(
            FunctionVariant::select(&NATIVE, &intent),
            FunctionVariant::SwapAndTransferUniswapV3Native
        );
    }

    #[test]
    fn test_select_matching_token() {
        let intent = intent_settling_in(address!("0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"));
        let currency = token_currency(address!("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"));
        assert_eq!(
            FunctionVariant::select(&currency, &intent),
            FunctionVariant::TransferToken
        );
    }

    #[test]
    fn test_select_mismatched_token_swaps() {
        let intent = intent_settling_in(address!("0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"));
        let currency = token_currency(address!("0xBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB"));
        assert_eq!(
            FunctionVariant::select(&currency, &intent),
            FunctionVariant::SwapAndTransferUniswapV3Token
        );
    }

    #[test]
    fn test_total_amount_sums_recipient_and_fee() {
        let intent = intent_settling_in(Address::ZERO);
        assert_eq!(intent.total_amount().unwrap(), U256::from(1_010_000u64));
    }

    #[test]
    fn test_total_amount_overflow_is_malformed() {
        let mut intent = intent_settling_in(Address::ZERO);
        intent.recipient_amount = U256::MAX;
        intent.fee_amount = U256::from(1u64);
        assert!(matches!(
            intent.total_amount(),
            Err(ValidationError::MalformedIntent(_))
        ));
    }

    #[test]
    fn test_variant_names_match_abi() {
        assert_eq!(FunctionVariant::TransferToken.to_string(), "transferToken");
        assert_eq!(
            FunctionVariant::SwapAndTransferUniswapV3Native.as_str(),
            "swapAndTransferUniswapV3Native"
        );
    }
}
