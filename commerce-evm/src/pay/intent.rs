//! Conversion from the wire-format transfer intent to its typed form.
//!
//! The payment processor serializes every numeric intent field as a string,
//! amounts as decimal integers and the deadline as RFC 3339. Parsing happens
//! here, once, with a named-field error for anything that does not parse.
//! The conversion is pure and deterministic: the same wire intent always
//! yields the same typed intent.

use alloy_primitives::{Address, Bytes, FixedBytes, U256};
use commerce_core::charge::TransferIntentData;
use commerce_core::error::ValidationError;
use commerce_core::timestamp::UnixTimestamp;

use crate::pay::types::TransferIntent;

fn malformed(field: &str, value: &str) -> ValidationError {
    ValidationError::MalformedIntent(format!("field `{field}` has unparseable value `{value}`"))
}

fn parse_amount(field: &str, value: &str) -> Result<U256, ValidationError> {
    U256::from_str_radix(value, 10).map_err(|_| malformed(field, value))
}

fn parse_address(field: &str, value: &str) -> Result<Address, ValidationError> {
    value.parse().map_err(|_| malformed(field, value))
}

fn parse_bytes(field: &str, value: &str) -> Result<Bytes, ValidationError> {
    value.parse().map_err(|_| malformed(field, value))
}

/// Parses the decimal-string wire intent into its on-chain integer form.
pub fn extract_transfer_intent(
    data: &TransferIntentData,
) -> Result<TransferIntent, ValidationError> {
    let call_data = &data.call_data;
    let metadata = &data.metadata;

    let deadline = UnixTimestamp::parse_rfc3339(&call_data.deadline)
        .ok_or_else(|| malformed("deadline", &call_data.deadline))?;
    let id: FixedBytes<16> = call_data
        .id
        .parse()
        .map_err(|_| malformed("id", &call_data.id))?;

    Ok(TransferIntent {
        recipient_amount: parse_amount("recipientAmount", &call_data.recipient_amount)?,
        deadline,
        recipient: parse_address("recipient", &call_data.recipient)?,
        recipient_currency: parse_address("recipientCurrency", &call_data.recipient_currency)?,
        refund_destination: parse_address("refundDestination", &call_data.refund_destination)?,
        fee_amount: parse_amount("feeAmount", &call_data.fee_amount)?,
        id,
        operator: parse_address("operator", &call_data.operator)?,
        signature: parse_bytes("signature", &call_data.signature)?,
        prefix: parse_bytes("prefix", &call_data.prefix)?,
        chain_id: metadata.chain_id,
        sender: parse_address("sender", &metadata.sender)?,
    })
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use commerce_core::charge::{TransferIntentCallData, TransferIntentMetadata};

    use super::*;

    fn wire_intent() -> TransferIntentData {
        TransferIntentData {
            call_data: TransferIntentCallData {
                deadline: "2030-01-01T00:00:00Z".to_owned(),
                fee_amount: "10000".to_owned(),
                id: "0x30783132333435363738393061626364".to_owned(),
                operator: "0x3333333333333333333333333333333333333333".to_owned(),
                prefix: "0x".to_owned(),
                recipient: "0x1111111111111111111111111111111111111111".to_owned(),
                recipient_amount: "1000000".to_owned(),
                recipient_currency: "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913".to_owned(),
                refund_destination: "0x2222222222222222222222222222222222222222".to_owned(),
                signature: "0xdeadbeef".to_owned(),
            },
            metadata: TransferIntentMetadata {
                chain_id: 8453,
                sender: "0x4444444444444444444444444444444444444444".to_owned(),
            },
        }
    }

    #[test]
    fn test_extract_well_formed_intent() {
        let intent = extract_transfer_intent(&wire_intent()).unwrap();
        assert_eq!(intent.recipient_amount, U256::from(1_000_000u64));
        assert_eq!(intent.fee_amount, U256::from(10_000u64));
        assert_eq!(intent.deadline.as_secs(), 1_893_456_000);
        assert_eq!(
            intent.recipient_currency,
            address!("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913")
        );
        assert_eq!(intent.chain_id, 8453);
        assert_eq!(intent.signature, Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]));
        assert!(intent.prefix.is_empty());
    }

    #[test]
    fn test_extract_is_deterministic() {
        let wire = wire_intent();
        assert_eq!(
            extract_transfer_intent(&wire).unwrap(),
            extract_transfer_intent(&wire).unwrap()
        );
    }

    #[test]
    fn test_extract_rejects_non_decimal_amount() {
        let mut wire = wire_intent();
        wire.call_data.recipient_amount = "1.5".to_owned();
        let err = extract_transfer_intent(&wire).unwrap_err();
        match err {
            ValidationError::MalformedIntent(msg) => assert!(msg.contains("recipientAmount")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extract_rejects_bad_deadline() {
        let mut wire = wire_intent();
        wire.call_data.deadline = "tomorrow".to_owned();
        let err = extract_transfer_intent(&wire).unwrap_err();
        match err {
            ValidationError::MalformedIntent(msg) => assert!(msg.contains("deadline")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extract_rejects_short_address() {
        let mut wire = wire_intent();
        wire.call_data.recipient = "0x1234".to_owned();
        let err = extract_transfer_intent(&wire).unwrap_err();
        match err {
            ValidationError::MalformedIntent(msg) => assert!(msg.contains("recipient")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extract_rejects_wrong_length_id() {
        let mut wire = wire_intent();
        wire.call_data.id = "0x1234".to_owned();
        assert!(matches!(
            extract_transfer_intent(&wire),
            Err(ValidationError::MalformedIntent(_))
        ));
    }
}
