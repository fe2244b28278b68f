//! Base58Check: Bitcoin-family Base58 with a 4-byte double-SHA256
//! checksum appended before encoding. Used both by BIP-32 extended
//! keys (`xprv`/`xpub`, no leading version byte beyond the 4-byte
//! extended-key version already baked into the payload) and by
//! Bitcoin-style P2PKH addresses (`version_byte || hash160`).

use crate::error::{KeyForgeError, Result};

fn checksum(payload: &[u8]) -> [u8; 4] {
    let digest = crate::hash::sha256d(payload);
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[0..4]);
    out
}

/// Appends the checksum to an already-assembled payload (version bytes
/// included by the caller) and Base58-encodes it.
pub fn encode_raw(payload: &[u8]) -> String {
    let mut full = Vec::with_capacity(payload.len() + 4);
    full.extend_from_slice(payload);
    full.extend_from_slice(&checksum(payload));
    bs58::encode(full).into_string()
}

/// Decodes and validates the checksum, returning the payload with the
/// checksum stripped (version bytes still included, since `encode_raw`
/// never separates them out).
pub fn decode_raw(encoded: &str) -> Result<Vec<u8>> {
    let full = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| KeyForgeError::InvalidPayload(format!("base58 decode failed: {e}")))?;
    if full.len() < 4 {
        return Err(KeyForgeError::InvalidLength);
    }
    let (payload, given_checksum) = full.split_at(full.len() - 4);
    if given_checksum != checksum(payload) {
        return Err(KeyForgeError::ChecksumError);
    }
    Ok(payload.to_vec())
}

/// Encodes `version || data` and appends the checksum — the shape
/// Bitcoin-family addresses use (one version byte, then a hash160).
pub fn encode_with_version(version: u8, data: &[u8]) -> String {
    let mut payload = Vec::with_capacity(1 + data.len());
    payload.push(version);
    payload.extend_from_slice(data);
    encode_raw(&payload)
}

/// Inverse of [`encode_with_version`]: returns `(version, data)`.
pub fn decode_with_version(encoded: &str) -> Result<(u8, Vec<u8>)> {
    let payload = decode_raw(encoded)?;
    if payload.is_empty() {
        return Err(KeyForgeError::InvalidLength);
    }
    Ok((payload[0], payload[1..].to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_payload() {
        let payload = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let encoded = encode_raw(&payload);
        let decoded = decode_raw(&encoded).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn rejects_corrupted_checksum() {
        let encoded = encode_raw(&[9u8; 20]);
        let mut corrupted = encoded.clone();
        corrupted.push('1');
        assert!(decode_raw(&corrupted).is_err());
    }

    #[test]
    fn version_and_data_round_trip() {
        let encoded = encode_with_version(0x00, &[0xaa; 20]);
        let (version, data) = decode_with_version(&encoded).unwrap();
        assert_eq!(version, 0x00);
        assert_eq!(data, vec![0xaa; 20]);
    }
}
