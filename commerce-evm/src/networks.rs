//! Known EVM currency deployments and the currency registry.
//!
//! The registry maps a logical currency symbol plus a chain id to the
//! on-chain facts the engine needs: contract address, decimals, and whether
//! the currency is the chain's native asset. It is a pure lookup table with
//! no I/O; supporting a new chain or currency is a table edit here, nothing
//! else changes.

use std::collections::HashMap;
use std::fmt;

use alloy_primitives::{Address, address};

/// Ethereum Mainnet chain ID.
pub const ETHEREUM_MAINNET: u64 = 1;

/// Polygon Mainnet chain ID.
pub const POLYGON_MAINNET: u64 = 137;

/// Base Mainnet chain ID.
pub const BASE_MAINNET: u64 = 8453;

/// Canonical Uniswap Permit2 contract address (same on all EVM chains via CREATE2).
pub const PERMIT2_ADDRESS: Address = address!("0x000000000022D473030F116dDEE9F6B43aC78BA3");

/// Sentinel address a transfer intent uses when the recipient settles in the
/// chain's native asset.
pub const NATIVE_CURRENCY_ADDRESS: Address = Address::ZERO;

/// USDC contract address on Ethereum Mainnet.
pub const USDC_ETHEREUM: Address = address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

/// USDC contract address on Polygon Mainnet.
pub const USDC_POLYGON: Address = address!("0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359");

/// USDC contract address on Base Mainnet.
pub const USDC_BASE: Address = address!("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");

/// Default token decimals for USDC.
pub const USDC_DECIMALS: u8 = 6;

/// Default Uniswap V3 pool fee tier (0.05%) used when a currency carries no
/// explicit hint.
pub const DEFAULT_UNISWAP_FEE_TIER: u32 = 500;

/// Logical currency symbols the engine can resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CurrencySymbol {
    /// USD Coin.
    Usdc,
    /// The chain's native asset (e.g. ETH on Ethereum and Base).
    Native,
}

impl CurrencySymbol {
    /// Returns the conventional ticker for the symbol.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Usdc => "USDC",
            Self::Native => "NATIVE",
        }
    }
}

impl fmt::Display for CurrencySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// On-chain facts about one currency on one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentCurrency {
    /// Whether this is the chain's native asset rather than a token.
    pub is_native_asset: bool,
    /// Token contract address. `None` only for the native asset.
    pub contract_address: Option<Address>,
    /// Number of base-unit decimals (e.g. 6 for USDC).
    pub decimals: u8,
    /// Uniswap V3 pool fee tier hint for the swap transfer variants.
    pub uniswap_fee_tier: Option<u32>,
}

impl PaymentCurrency {
    /// Fee tier to use for swap routing, falling back to the default.
    #[must_use]
    pub fn fee_tier(&self) -> u32 {
        self.uniswap_fee_tier.unwrap_or(DEFAULT_UNISWAP_FEE_TIER)
    }
}

/// Immutable lookup table from (symbol, chain id) to [`PaymentCurrency`].
///
/// Constructed once and injected into the engine, so tests can substitute
/// fixture tables.
#[derive(Debug, Clone)]
pub struct CurrencyRegistry {
    entries: HashMap<(CurrencySymbol, u64), PaymentCurrency>,
}

impl CurrencyRegistry {
    /// Builds a registry from explicit entries.
    #[must_use]
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ((CurrencySymbol, u64), PaymentCurrency)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// The built-in table: USDC on Ethereum Mainnet, Polygon, and Base.
    #[must_use]
    pub fn known() -> Self {
        let usdc = |addr: Address| PaymentCurrency {
            is_native_asset: false,
            contract_address: Some(addr),
            decimals: USDC_DECIMALS,
            uniswap_fee_tier: None,
        };
        Self::from_entries([
            ((CurrencySymbol::Usdc, ETHEREUM_MAINNET), usdc(USDC_ETHEREUM)),
            ((CurrencySymbol::Usdc, POLYGON_MAINNET), usdc(USDC_POLYGON)),
            ((CurrencySymbol::Usdc, BASE_MAINNET), usdc(USDC_BASE)),
        ])
    }

    /// Looks up the currency deployed on `chain_id`.
    ///
    /// Returns `None` for any (symbol, chain) pair absent from the table;
    /// this never panics on unknown input.
    #[must_use]
    pub fn resolve(&self, symbol: CurrencySymbol, chain_id: u64) -> Option<&PaymentCurrency> {
        self.entries.get(&(symbol, chain_id))
    }
}

impl Default for CurrencyRegistry {
    fn default() -> Self {
        Self::known()
    }
}
