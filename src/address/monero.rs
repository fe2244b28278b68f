//! Monero addresses: `Base58Check'(network_byte || spend_pub || view_pub [|| payment_id])`
//! using Monero's own block-wise Base58 and a Keccak-256 checksum
//! instead of Bitcoin's whole-integer Base58 and double-SHA256. A
//! standard address carries no payment id; an integrated address
//! appends an 8-byte one, which is how the decoder tells them apart.

use curve25519_dalek::edwards::CompressedEdwardsY;

use crate::error::{KeyForgeError, Result};
use crate::networks::MoneroNetwork;

const PAYMENT_ID_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DecodedAddress {
    pub spend_public_key: [u8; 32],
    pub view_public_key: [u8; 32],
    pub payment_id: Option<[u8; 8]>,
}

fn validate_point(bytes: &[u8]) -> Result<[u8; 32]> {
    let arr: [u8; 32] = bytes
        .try_into()
        .map_err(|_| KeyForgeError::InvalidLength)?;
    CompressedEdwardsY(arr)
        .decompress()
        .ok_or_else(|| KeyForgeError::InvalidKey("Monero public key is not a valid curve point".into()))?;
    Ok(arr)
}

pub fn encode_standard(network: MoneroNetwork, spend_public_key: &[u8; 32], view_public_key: &[u8; 32]) -> Result<String> {
    let mut payload = Vec::with_capacity(65);
    payload.push(network.standard);
    payload.extend_from_slice(spend_public_key);
    payload.extend_from_slice(view_public_key);
    crate::codec::base58_monero::encode_check(&payload)
}

pub fn encode_integrated(
    network: MoneroNetwork,
    spend_public_key: &[u8; 32],
    view_public_key: &[u8; 32],
    payment_id: &[u8; 8],
) -> Result<String> {
    let mut payload = Vec::with_capacity(73);
    payload.push(network.integrated);
    payload.extend_from_slice(spend_public_key);
    payload.extend_from_slice(view_public_key);
    payload.extend_from_slice(payment_id);
    crate::codec::base58_monero::encode_check(&payload)
}

/// Decodes either address form, validating the checksum, the network
/// byte, and that both embedded keys are valid ed25519 curve points —
/// the strict reading adopted here, rather than passing through
/// whatever bytes happen to decode.
pub fn decode(network: MoneroNetwork, address: &str) -> Result<DecodedAddress> {
    let payload = crate::codec::base58_monero::decode_check(address)?;
    if payload.is_empty() {
        return Err(KeyForgeError::InvalidLength);
    }
    let network_byte = payload[0];
    let body = &payload[1..];

    let has_payment_id = if network_byte == network.standard {
        false
    } else if network_byte == network.integrated {
        true
    } else {
        return Err(KeyForgeError::InvalidPrefix);
    };

    let expected_len = 64 + if has_payment_id { PAYMENT_ID_LEN } else { 0 };
    if body.len() != expected_len {
        return Err(KeyForgeError::InvalidLength);
    }

    let spend_public_key = validate_point(&body[0..32])?;
    let view_public_key = validate_point(&body[32..64])?;
    let payment_id = if has_payment_id {
        let mut id = [0u8; 8];
        id.copy_from_slice(&body[64..72]);
        Some(id)
    } else {
        None
    };

    Ok(DecodedAddress { spend_public_key, view_public_key, payment_id })
}

/// Confirms a caller-supplied payment id matches the one embedded in a
/// decoded integrated address, rejecting both a standard address (no
/// payment id to check) and a mismatched one with `InvalidPaymentId`.
pub fn verify_payment_id(decoded: &DecodedAddress, expected: &[u8; 8]) -> Result<()> {
    match &decoded.payment_id {
        Some(embedded) if embedded == expected => Ok(()),
        Some(_) => Err(KeyForgeError::InvalidPaymentId),
        None => Err(KeyForgeError::InvalidPaymentId),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networks::MONERO_MAINNET;

    fn sample_keys() -> ([u8; 32], [u8; 32]) {
        let spend_seed = crate::curve::ed25519::private_from_bytes(&[1u8; 32]).unwrap();
        let view_seed = crate::curve::ed25519::private_from_bytes(&[2u8; 32]).unwrap();
        (
            crate::curve::ed25519::public_from_private(&spend_seed),
            crate::curve::ed25519::public_from_private(&view_seed),
        )
    }

    #[test]
    fn standard_address_round_trips() {
        let (spend, view) = sample_keys();
        let address = encode_standard(MONERO_MAINNET, &spend, &view).unwrap();
        let decoded = decode(MONERO_MAINNET, &address).unwrap();
        assert_eq!(decoded.spend_public_key, spend);
        assert_eq!(decoded.view_public_key, view);
        assert!(decoded.payment_id.is_none());
    }

    #[test]
    fn integrated_address_carries_payment_id() {
        let (spend, view) = sample_keys();
        let payment_id = [0xAAu8; 8];
        let address = encode_integrated(MONERO_MAINNET, &spend, &view, &payment_id).unwrap();
        let decoded = decode(MONERO_MAINNET, &address).unwrap();
        assert_eq!(decoded.payment_id, Some(payment_id));
    }

    #[test]
    fn verify_payment_id_rejects_mismatch() {
        let (spend, view) = sample_keys();
        let payment_id = [0x11u8; 8];
        let address = encode_integrated(MONERO_MAINNET, &spend, &view, &payment_id).unwrap();
        let decoded = decode(MONERO_MAINNET, &address).unwrap();

        assert!(verify_payment_id(&decoded, &payment_id).is_ok());
        assert!(verify_payment_id(&decoded, &[0x22u8; 8]).is_err());
    }

    #[test]
    fn verify_payment_id_rejects_standard_address() {
        let (spend, view) = sample_keys();
        let address = encode_standard(MONERO_MAINNET, &spend, &view).unwrap();
        let decoded = decode(MONERO_MAINNET, &address).unwrap();
        assert!(verify_payment_id(&decoded, &[0x11u8; 8]).is_err());
    }
}
