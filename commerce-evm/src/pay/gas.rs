//! Fixed gas limits and upfront cost estimation.
//!
//! The settlement functions have well-characterized gas profiles, so the
//! engine carries a table of raw limits instead of calling `eth_estimateGas`
//! (which would revert before the permit exists). Submitted limits apply a
//! 1.5x buffer over the raw figure, computed in integers with a rounded-up
//! halving so no precision is lost.

use std::collections::HashMap;

use alloy_primitives::U256;

use crate::pay::types::FunctionVariant;

/// Error building a [`GasSchedule`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GasScheduleError {
    /// The table lacks an entry for one of the settlement functions.
    #[error("gas schedule missing entry for `{0}`")]
    MissingVariant(FunctionVariant),
}

/// Raw gas profile for `transferToken`.
pub const TRANSFER_TOKEN_GAS: u64 = 166_862;

/// Raw gas profile for `transferNative`.
pub const TRANSFER_NATIVE_GAS: u64 = 101_465;

/// Raw gas profile for `swapAndTransferUniswapV3Token`.
pub const SWAP_TOKEN_GAS: u64 = 305_590;

/// Raw gas profile for `swapAndTransferUniswapV3Native`.
pub const SWAP_NATIVE_GAS: u64 = 284_949;

/// A buffered gas limit plus the worst-case fee it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasEstimate {
    /// Gas limit to submit with, raw profile times 1.5.
    pub gas_limit: u64,
    /// `gas_limit * max_fee_per_gas`, in wei.
    pub total_cost: U256,
}

/// Raw gas limits, one field per settlement function.
///
/// Exhaustive by construction: there is no lookup that can miss, so every
/// variant always resolves to its characterized limit.
#[derive(Debug, Clone)]
pub struct GasSchedule {
    transfer_native: u64,
    transfer_token: u64,
    swap_native: u64,
    swap_token: u64,
}

impl GasSchedule {
    /// Builds a schedule from explicit limits.
    ///
    /// Every variant must be present; a partial table would turn a missing
    /// entry into a runtime surprise mid-payment.
    pub fn new(limits: HashMap<FunctionVariant, u64>) -> Result<Self, GasScheduleError> {
        let entry = |variant| {
            limits
                .get(&variant)
                .copied()
                .ok_or(GasScheduleError::MissingVariant(variant))
        };
        Ok(Self {
            transfer_native: entry(FunctionVariant::TransferNative)?,
            transfer_token: entry(FunctionVariant::TransferToken)?,
            swap_native: entry(FunctionVariant::SwapAndTransferUniswapV3Native)?,
            swap_token: entry(FunctionVariant::SwapAndTransferUniswapV3Token)?,
        })
    }

    /// The built-in schedule with the characterized mainnet profiles.
    #[must_use]
    pub const fn known() -> Self {
        Self {
            transfer_native: TRANSFER_NATIVE_GAS,
            transfer_token: TRANSFER_TOKEN_GAS,
            swap_native: SWAP_NATIVE_GAS,
            swap_token: SWAP_TOKEN_GAS,
        }
    }

    /// Buffered gas limit for `variant`: raw times 1.5, rounded up.
    #[must_use]
    pub fn gas_limit(&self, variant: FunctionVariant) -> u64 {
        // Every known() entry fits in u64 after *3 with room to spare.
        let raw = match variant {
            FunctionVariant::TransferNative => self.transfer_native,
            FunctionVariant::TransferToken => self.transfer_token,
            FunctionVariant::SwapAndTransferUniswapV3Native => self.swap_native,
            FunctionVariant::SwapAndTransferUniswapV3Token => self.swap_token,
        };
        (raw * 3).div_ceil(2)
    }

    /// Buffered limit plus the worst-case fee at `max_fee_per_gas` wei.
    #[must_use]
    pub fn estimate(&self, variant: FunctionVariant, max_fee_per_gas: U256) -> GasEstimate {
        let gas_limit = self.gas_limit(variant);
        GasEstimate {
            gas_limit,
            total_cost: U256::from(gas_limit) * max_fee_per_gas,
        }
    }
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self::known()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_limit_for_transfer_token() {
        let schedule = GasSchedule::known();
        assert_eq!(schedule.gas_limit(FunctionVariant::TransferToken), 250_293);
    }

    #[test]
    fn test_buffered_limits_round_up() {
        // 101465 * 3 = 304395, odd, so the halving rounds up.
        let schedule = GasSchedule::known();
        assert_eq!(schedule.gas_limit(FunctionVariant::TransferNative), 152_198);
        assert_eq!(
            schedule.gas_limit(FunctionVariant::SwapAndTransferUniswapV3Token),
            458_385
        );
        assert_eq!(
            schedule.gas_limit(FunctionVariant::SwapAndTransferUniswapV3Native),
            427_424
        );
    }

    #[test]
    fn test_every_variant_exceeds_its_raw_profile() {
        let schedule = GasSchedule::known();
        for (variant, raw) in [
            (FunctionVariant::TransferNative, TRANSFER_NATIVE_GAS),
            (FunctionVariant::TransferToken, TRANSFER_TOKEN_GAS),
            (FunctionVariant::SwapAndTransferUniswapV3Native, SWAP_NATIVE_GAS),
            (FunctionVariant::SwapAndTransferUniswapV3Token, SWAP_TOKEN_GAS),
        ] {
            assert!(schedule.gas_limit(variant) > raw);
        }
    }

    #[test]
    fn test_total_cost_is_limit_times_fee() {
        let schedule = GasSchedule::known();
        let estimate = schedule.estimate(FunctionVariant::TransferToken, U256::from(10u64));
        assert_eq!(estimate.gas_limit, 250_293);
        assert_eq!(estimate.total_cost, U256::from(2_502_930u64));
    }

    #[test]
    fn test_new_rejects_partial_table() {
        let partial = HashMap::from([(FunctionVariant::TransferToken, TRANSFER_TOKEN_GAS)]);
        assert!(matches!(
            GasSchedule::new(partial),
            Err(GasScheduleError::MissingVariant(_))
        ));
    }

    #[test]
    fn test_new_accepts_complete_table() {
        let full = HashMap::from([
            (FunctionVariant::TransferToken, 100u64),
            (FunctionVariant::TransferNative, 100),
            (FunctionVariant::SwapAndTransferUniswapV3Token, 100),
            (FunctionVariant::SwapAndTransferUniswapV3Native, 100),
        ]);
        let schedule = GasSchedule::new(full).unwrap();
        assert_eq!(schedule.gas_limit(FunctionVariant::TransferToken), 150);
    }
}
