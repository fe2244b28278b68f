//! Monero's Base58 variant: data is encoded in fixed 8-byte blocks that
//! map to fixed 11-character blocks (with a shorter final block for a
//! non-multiple-of-8 tail), unlike Bitcoin's Base58Check which treats
//! the whole payload as one big integer. The block encoding and its
//! Keccak-256-based checksum variant are both handled by the
//! `base58-monero` crate rather than reimplemented here.

use crate::error::{KeyForgeError, Result};

pub fn encode(data: &[u8]) -> Result<String> {
    base58_monero::encode(data).map_err(|e| KeyForgeError::InvalidPayload(format!("monero base58 encode failed: {e}")))
}

pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    base58_monero::decode(encoded).map_err(|e| KeyForgeError::InvalidPayload(format!("monero base58 decode failed: {e}")))
}

/// Encodes with the trailing 4-byte Keccak-256 checksum Monero
/// addresses use.
pub fn encode_check(data: &[u8]) -> Result<String> {
    base58_monero::encode_check(data).map_err(|e| KeyForgeError::InvalidPayload(format!("monero base58 encode failed: {e}")))
}

/// Decodes and validates the trailing Keccak-256 checksum.
pub fn decode_check(encoded: &str) -> Result<Vec<u8>> {
    base58_monero::decode_check(encoded).map_err(|_| KeyForgeError::ChecksumError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_non_block_aligned_payload() {
        let data = b"monero test payload, 37 bytes!!!!!!!";
        let encoded = encode(data).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn checksum_round_trips_and_detects_corruption() {
        let data = [7u8; 69];
        let encoded = encode_check(&data).unwrap();
        let decoded = decode_check(&encoded).unwrap();
        assert_eq!(decoded, data);

        let mut corrupted = encoded.clone();
        corrupted.replace_range(0..1, if corrupted.starts_with('1') { "2" } else { "1" });
        assert!(decode_check(&corrupted).is_err());
    }
}
