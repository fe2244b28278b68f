//! Bitcoin-family P2PKH addresses: `Base58Check(version || hash160(pubkey))`.
//! Shared by any chain that reuses this exact scheme with its own
//! version byte (Bitcoin, Litecoin, Dogecoin, ...).

use crate::error::{KeyForgeError, Result};
use crate::networks::AddressVersion;

pub fn encode(version: AddressVersion, public_key_compressed: &[u8]) -> String {
    let hash = crate::hash::hash160(public_key_compressed);
    crate::codec::base58check::encode_with_version(version.0, &hash)
}

/// Decodes and validates the checksum and version byte, returning the
/// 20-byte hash160.
pub fn decode(version: AddressVersion, address: &str) -> Result<[u8; 20]> {
    let (found_version, data) = crate::codec::base58check::decode_with_version(address)?;
    if found_version != version.0 {
        return Err(KeyForgeError::InvalidPrefix);
    }
    if data.len() != 20 {
        return Err(KeyForgeError::InvalidLength);
    }
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&data);
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networks::BITCOIN_P2PKH_MAINNET;

    #[test]
    fn encode_decode_round_trip() {
        let pubkey = crate::curve::secp256k1::public_compressed_from_private(&[4u8; 32]).unwrap();
        let address = encode(BITCOIN_P2PKH_MAINNET, &pubkey);
        assert!(address.starts_with('1'));

        let decoded = decode(BITCOIN_P2PKH_MAINNET, &address).unwrap();
        assert_eq!(decoded, crate::hash::hash160(&pubkey));
    }

    #[test]
    fn rejects_wrong_network_version() {
        let pubkey = crate::curve::secp256k1::public_compressed_from_private(&[4u8; 32]).unwrap();
        let address = encode(BITCOIN_P2PKH_MAINNET, &pubkey);
        assert!(decode(crate::networks::BITCOIN_P2PKH_TESTNET, &address).is_err());
    }
}
