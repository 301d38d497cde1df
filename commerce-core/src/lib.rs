#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for Commerce on-chain payment execution.
//!
//! This crate provides the chain-agnostic foundation shared by the payment
//! execution engine: the hydrated charge wire model, Unix timestamp handling,
//! and the error taxonomy every payment step reports through.
//!
//! # Overview
//!
//! A *charge* is a priced, expiring payment request created by the Commerce
//! resource API. Before it can be paid on-chain, a payment processor
//! *hydrates* it: it attaches a transfer intent (recipient, amounts,
//! deadline, operator signature) and the per-chain payment contract
//! addresses. This crate models that hydrated charge exactly as it appears
//! on the wire; interpreting it — converting string amounts to integers,
//! choosing a transfer mechanism, executing the payment — is the job of the
//! chain-specific engine crates.
//!
//! # Modules
//!
//! - [`charge`] - Hydrated charge wire model (`camelCase` JSON)
//! - [`error`] - Validation / execution / unknown error taxonomy
//! - [`timestamp`] - Unix timestamps and RFC-3339 parsing

pub mod charge;
pub mod error;
pub mod timestamp;

pub use charge::{TransferIntentCallData, TransferIntentData, Web3Charge, Web3Data};
pub use error::{ExecutionError, PayChargeError, ValidationError};
pub use timestamp::UnixTimestamp;
