//! EVM chain access for the payment engine.
//!
//! The engine talks to the chain exclusively through the
//! [`WalletHandle`](wallet::WalletHandle) capability trait: balance and
//! allowance reads, fee sampling, hash signing, call simulation, and
//! transaction submission. [`provider::Eip155Wallet`] is the RPC-backed
//! implementation; tests substitute scripted handles.

pub mod provider;
pub mod wallet;

pub use provider::Eip155Wallet;
pub use wallet::{MetaTransaction, TransactionOutcome, WalletError, WalletHandle};

/// An EIP-155 chain ID (e.g., 8453 for Base, 137 for Polygon).
pub type ChainId = u64;
