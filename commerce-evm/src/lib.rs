#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! EVM payment execution engine for Commerce charges.
//!
//! Given a charge that a payment processor has hydrated with a transfer
//! intent, this crate executes the payment on an EVM chain: it resolves the
//! requested currency, converts the intent to its on-chain integer form,
//! picks the transfer function variant, verifies the payer can afford the
//! transfer (token balance plus gas), raises the Permit2 allowance when
//! needed, signs a Permit2 transfer permit off-chain, simulates the transfer
//! call, and submits it.
//!
//! # Architecture
//!
//! - [`chain`] - The [`WalletHandle`](chain::WalletHandle) capability trait
//!   and an RPC-backed implementation
//! - [`networks`] - Known currency deployments and the currency registry
//! - [`pay`] - The payment pipeline and the [`PaymentEngine`](pay::PaymentEngine)
//!
//! The engine is stateless between invocations: each `pay_charge` call is a
//! strictly sequential pipeline that reads everything fresh from the chain.
//! Failures surface as the typed taxonomy in
//! [`commerce_core::error`]; nothing is retried internally.
//!
//! # Feature Flags
//!
//! - `telemetry` - `tracing` instrumentation at chain I/O boundaries

pub mod chain;
pub mod networks;
pub mod pay;

pub use chain::{Eip155Wallet, MetaTransaction, WalletError, WalletHandle};
pub use networks::{CurrencyRegistry, CurrencySymbol, PaymentCurrency};
pub use pay::{PayChargeParams, PayChargeResponse, PaymentEngine};
