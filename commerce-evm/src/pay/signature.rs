//! ERC-6492 signature normalization.
//!
//! Smart-contract wallets may return a wrapped signature: the ABI encoding
//! of `(factory, factoryCalldata, innerSig)` followed by a 32-byte magic
//! suffix. Permit2 verifies the inner ECDSA signature directly, so the
//! wrapper is stripped before the permit goes on chain. Plain 65-byte
//! signatures pass through untouched.

use alloy_primitives::{Bytes, hex};
use alloy_sol_types::SolValue;
use commerce_core::error::ExecutionError;

use crate::pay::contract::Sig6492;

/// Magic suffix marking an ERC-6492 wrapped signature.
pub const EIP6492_MAGIC_SUFFIX: [u8; 32] =
    hex!("6492649264926492649264926492649264926492649264926492649264926492");

/// Strips an ERC-6492 wrapper if present, returning the raw inner signature.
pub fn normalize_signature(signature: Bytes) -> Result<Bytes, ExecutionError> {
    let data = signature.as_ref();
    let Some(payload) = data
        .len()
        .checked_sub(EIP6492_MAGIC_SUFFIX.len())
        .filter(|&split| data[split..] == EIP6492_MAGIC_SUFFIX)
        .map(|split| &data[..split])
    else {
        return Ok(signature);
    };

    let wrapper = Sig6492::abi_decode_params(payload).map_err(|e| {
        ExecutionError::SignatureRejected(format!("undecodable ERC-6492 wrapper: {e}"))
    })?;
    Ok(wrapper.innerSig)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    #[test]
    fn test_plain_signature_passes_through() {
        let raw = Bytes::from(vec![0x11u8; 65]);
        assert_eq!(normalize_signature(raw.clone()).unwrap(), raw);
    }

    #[test]
    fn test_short_signature_passes_through() {
        let raw = Bytes::from_static(&[0x01, 0x02]);
        assert_eq!(normalize_signature(raw.clone()).unwrap(), raw);
    }

    #[test]
    fn test_wrapped_signature_unwraps() {
        let inner = Bytes::from(vec![0x22u8; 65]);
        let wrapper = Sig6492 {
            factory: address!("0x5555555555555555555555555555555555555555"),
            factoryCalldata: Bytes::from_static(&[0xaa, 0xbb]),
            innerSig: inner.clone(),
        };
        let mut wrapped = wrapper.abi_encode_params();
        wrapped.extend_from_slice(&EIP6492_MAGIC_SUFFIX);
        assert_eq!(normalize_signature(Bytes::from(wrapped)).unwrap(), inner);
    }

    #[test]
    fn test_garbage_wrapper_is_rejected() {
        let mut wrapped = vec![0xffu8; 10];
        wrapped.extend_from_slice(&EIP6492_MAGIC_SUFFIX);
        let err = normalize_signature(Bytes::from(wrapped)).unwrap_err();
        assert!(matches!(err, ExecutionError::SignatureRejected(_)));
    }
}
