//! The payment pipeline.
//!
//! [`PaymentEngine::pay_charge`] runs a strictly sequential pipeline over a
//! hydrated charge:
//!
//! 1. validate the wallet connection, hydration, and charge expiry;
//! 2. resolve the requested currency and convert the intent to typed form;
//! 3. pick the settlement function and verify the wallet's chain;
//! 4. check token balance, sample fees, and check the native gas budget;
//! 5. raise the Permit2 allowance if short (the only receipt-gated step);
//! 6. sign the Permit2 transfer permit off-chain;
//! 7. simulate the settlement call, then submit it.
//!
//! The engine holds no per-payment state: everything is read fresh from the
//! chain on each call, and a failure at any step aborts the rest.

pub mod approval;
pub mod contract;
pub mod dispatch;
pub mod gas;
pub mod intent;
pub mod permit;
pub mod signature;
pub mod types;
pub mod validate;

use alloy_primitives::Address;
use chrono::Utc;
use commerce_core::error::{PayChargeError, ValidationError};

use crate::chain::WalletHandle;
use crate::networks::{CurrencyRegistry, PERMIT2_ADDRESS};

pub use gas::{GasEstimate, GasSchedule};
pub use types::{
    FunctionVariant, PayChargeParams, PayChargeResponse, Permit2SignatureTransferData,
    TransferIntent,
};

/// Executes hydrated charges on EVM chains.
///
/// The engine is cheap to construct and safe to share: it owns only the
/// currency registry, the gas schedule, and the Permit2 address.
#[derive(Debug, Clone)]
pub struct PaymentEngine {
    registry: CurrencyRegistry,
    gas: GasSchedule,
    permit2: Address,
}

impl PaymentEngine {
    /// Builds an engine from explicit parts.
    #[must_use]
    pub fn new(registry: CurrencyRegistry, gas: GasSchedule, permit2: Address) -> Self {
        Self {
            registry,
            gas,
            permit2,
        }
    }

    /// Pays `params.charge` with the connected wallet.
    ///
    /// On success the settlement transaction has been accepted by the node;
    /// confirmation is the caller's concern. On failure nothing needs to be
    /// rolled back: at worst an approval transaction landed and a single-use
    /// permit was signed but never submitted.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(skip_all, fields(charge = %params.charge.id))
    )]
    pub async fn pay_charge<W: WalletHandle + ?Sized>(
        &self,
        params: PayChargeParams<'_, W>,
    ) -> Result<PayChargeResponse, PayChargeError> {
        let PayChargeParams {
            charge,
            wallet,
            currency,
        } = params;

        let payer = wallet
            .address()
            .ok_or(ValidationError::WalletNotConnected)?;
        let intent_data = charge
            .transfer_intent()
            .ok_or(ValidationError::ChargeNotHydrated)?;
        validate::assert_not_expired(charge, Utc::now())?;

        let chain_id = intent_data.metadata.chain_id;
        let payment_currency = self
            .registry
            .resolve(currency, chain_id)
            .ok_or_else(|| ValidationError::UnsupportedCurrency {
                symbol: currency.as_str().to_owned(),
                chain_id,
            })?;

        let transfer_intent = intent::extract_transfer_intent(intent_data)?;
        let variant = FunctionVariant::select(payment_currency, &transfer_intent);
        // Only the direct token path is executable today. The swap and
        // native paths resolve so their absence is reported precisely, but
        // selecting one fails before any chain I/O.
        if variant != FunctionVariant::TransferToken {
            return Err(ValidationError::UnsupportedCurrency {
                symbol: currency.as_str().to_owned(),
                chain_id,
            }
            .into());
        }
        let token = transfer_intent.recipient_currency;

        validate::assert_chain(transfer_intent.chain_id, wallet.chain_id())?;
        let contract = charge
            .contract_address_for(transfer_intent.chain_id)
            .ok_or(ValidationError::NoPaymentContract {
                chain_id: transfer_intent.chain_id,
            })?;

        let total = transfer_intent.total_amount()?;
        validate::assert_enough_token_balance(wallet, token, payer, total).await?;

        let max_fee_per_gas = wallet.estimate_fees_per_gas().await?;
        let gas_estimate = self.gas.estimate(variant, max_fee_per_gas);
        validate::assert_enough_native_balance(wallet, payer, gas_estimate.total_cost).await?;

        #[cfg(feature = "telemetry")]
        tracing::debug!(
            %payer,
            %contract,
            %total,
            gas_limit = gas_estimate.gas_limit,
            "transfer intent validated"
        );

        let approval_tx = approval::ensure_allowance(wallet, token, payer, self.permit2, total)
            .await?;
        #[cfg(feature = "telemetry")]
        if let Some(tx_hash) = approval_tx {
            tracing::info!(%tx_hash, "permit2 allowance raised");
        }
        #[cfg(not(feature = "telemetry"))]
        let _ = approval_tx;

        let permit = permit::sign_permit(
            wallet,
            permit::PermitRequest {
                token,
                spender: contract,
                value: total,
                deadline: transfer_intent.deadline.as_secs(),
                chain_id: transfer_intent.chain_id,
                permit2: self.permit2,
            },
        )
        .await?;

        let calldata = dispatch::build_transfer_token_call(&transfer_intent, &permit);
        let transaction_hash =
            dispatch::dispatch(wallet, contract, calldata, gas_estimate.gas_limit).await?;

        #[cfg(feature = "telemetry")]
        tracing::info!(%transaction_hash, "settlement transaction submitted");

        Ok(PayChargeResponse { transaction_hash })
    }
}

impl Default for PaymentEngine {
    fn default() -> Self {
        Self::new(
            CurrencyRegistry::known(),
            GasSchedule::known(),
            PERMIT2_ADDRESS,
        )
    }
}
