//! Hydrated charge wire model.
//!
//! These types mirror the JSON the Commerce resource API returns for a
//! Web3 charge, in `camelCase`, restricted to the fields the payment engine
//! consumes. A charge is immutable from the engine's point of view: it is
//! created by the resource API, hydrated once by the payment processor, and
//! read-only thereafter.
//!
//! Amounts and the deadline inside [`TransferIntentCallData`] are kept as
//! the exact strings the processor produced. Converting them to fixed-width
//! integers is the extraction step's job, so that a malformed value surfaces
//! as a typed validation failure instead of a deserialization error.

use std::collections::HashMap;

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A charge that has been hydrated with Web3 transfer data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Web3Charge {
    /// Unique charge identifier assigned by the resource API.
    pub id: String,
    /// Short human-facing charge code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// When the charge was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the charge stops being payable.
    pub expires_at: DateTime<Utc>,
    /// Chain-specific payment data attached by the processor.
    pub web3_data: Web3Data,
}

impl Web3Charge {
    /// Returns the transfer intent if the charge has been hydrated.
    #[must_use]
    pub fn transfer_intent(&self) -> Option<&TransferIntentData> {
        self.web3_data.transfer_intent.as_ref()
    }

    /// Returns the payment contract address deployed on `chain_id`, if any.
    #[must_use]
    pub fn contract_address_for(&self, chain_id: u64) -> Option<Address> {
        self.web3_data
            .contract_addresses
            .get(&chain_id.to_string())
            .copied()
    }

    /// Whether the charge has passed its expiry time as of `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// The `web3Data` envelope of a hydrated charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Web3Data {
    /// The processor-supplied transfer authorization. `None` until the
    /// charge is hydrated.
    #[serde(default)]
    pub transfer_intent: Option<TransferIntentData>,
    /// Payment contract address per chain, keyed by stringified chain id.
    #[serde(default)]
    pub contract_addresses: HashMap<String, Address>,
}

/// A transfer intent as attached by the processor: the call data destined
/// for the payment contract plus routing metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferIntentData {
    /// Fields of the on-chain `TransferIntent` struct, as wire strings.
    pub call_data: TransferIntentCallData,
    /// Where and by whom the intent is meant to be fulfilled.
    pub metadata: TransferIntentMetadata,
}

/// Raw call data for the on-chain transfer, exactly as received.
///
/// All values are strings on the wire; `deadline` is RFC-3339 and the two
/// amounts are base-unit decimal integers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferIntentCallData {
    /// RFC-3339 timestamp after which the intent is no longer valid.
    pub deadline: String,
    /// Operator fee in the recipient currency's base units.
    pub fee_amount: String,
    /// 16-byte intent identifier, hex encoded.
    pub id: String,
    /// Operator address that signed the intent.
    pub operator: String,
    /// Signature prefix bytes, hex encoded.
    pub prefix: String,
    /// Recipient address for the transfer.
    pub recipient: String,
    /// Amount owed to the recipient in base units.
    pub recipient_amount: String,
    /// Currency the recipient settles in (zero address for the native asset).
    pub recipient_currency: String,
    /// Where refunds are sent on failure paths.
    pub refund_destination: String,
    /// Operator signature over the intent, hex encoded.
    pub signature: String,
}

/// Metadata identifying where a transfer intent must be executed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferIntentMetadata {
    /// Chain the intent was hydrated for.
    pub chain_id: u64,
    /// Payer address the processor priced the intent against.
    pub sender: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charge_json() -> serde_json::Value {
        serde_json::json!({
            "id": "11111111-2222-3333-4444-555555555555",
            "expiresAt": "2030-01-01T00:00:00Z",
            "web3Data": {
                "transferIntent": {
                    "callData": {
                        "deadline": "2030-01-01T00:00:00Z",
                        "feeAmount": "10000",
                        "id": "0x2d98c5d6bc69d1f7323f26eb2ff43ca1",
                        "operator": "0x8fccf78dee3b32bcbd4b2c3583f1f19f90e6b379",
                        "prefix": "0x4b3220496e74656e74",
                        "recipient": "0x3dc5e1ac90cec30ba43ba21b5777c1defd74eb65",
                        "recipientAmount": "1000000",
                        "recipientCurrency": "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
                        "refundDestination": "0x89fabea34a3a377916ebf7793f37e11ee98d29fa",
                        "signature": "0x1bc9"
                    },
                    "metadata": {
                        "chainId": 8453,
                        "sender": "0x89fabea34a3a377916ebf7793f37e11ee98d29fa"
                    }
                },
                "contractAddresses": {
                    "8453": "0x03059433BCdB6144624cC2443159D9445C32b7a8"
                }
            }
        })
    }

    #[test]
    fn test_deserialize_hydrated_charge() {
        let charge: Web3Charge = serde_json::from_value(charge_json()).unwrap();
        let intent = charge.transfer_intent().unwrap();
        assert_eq!(intent.metadata.chain_id, 8453);
        assert_eq!(intent.call_data.recipient_amount, "1000000");
        assert!(charge.contract_address_for(8453).is_some());
        assert!(charge.contract_address_for(1).is_none());
    }

    #[test]
    fn test_unhydrated_charge_has_no_intent() {
        let mut json = charge_json();
        json["web3Data"]["transferIntent"] = serde_json::Value::Null;
        let charge: Web3Charge = serde_json::from_value(json).unwrap();
        assert!(charge.transfer_intent().is_none());
    }

    #[test]
    fn test_expiry_boundary() {
        let charge: Web3Charge = serde_json::from_value(charge_json()).unwrap();
        assert!(!charge.is_expired_at(charge.expires_at));
        assert!(charge.is_expired_at(charge.expires_at + chrono::Duration::seconds(1)));
    }
}
