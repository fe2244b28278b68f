//! Hash and MAC primitives used by BIP-32 seed expansion and the address
//! codecs: SHA-256/512, Keccak-256, HMAC-SHA-512, and the hash160
//! (RIPEMD160∘SHA256) fingerprint used in extended-key serialization.

use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

type HmacSha512 = Hmac<Sha512>;

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

pub fn sha512(data: &[u8]) -> [u8; 64] {
    Sha512::digest(data).into()
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    use sha3::{Digest as _, Keccak256};
    Keccak256::digest(data).into()
}

/// RIPEMD160(SHA256(data)), the "hash160" used for BIP-32 parent
/// fingerprints and Bitcoin-family address key hashes.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(sha256(data)).into()
}

/// HMAC-SHA-512, the workhorse of BIP-32/SLIP-10 master and child key
/// derivation. `key` may be any length (chain codes, the literal
/// `b"Bitcoin seed"`, curve-specific constants).
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> [u8; 64] {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC-SHA512 accepts keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        let digest = sha256(b"abc");
        assert_eq!(
            hex::encode(digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn hmac_sha512_deterministic() {
        let a = hmac_sha512(b"Bitcoin seed", b"some seed bytes");
        let b = hmac_sha512(b"Bitcoin seed", b"some seed bytes");
        assert_eq!(a, b);
    }

    #[test]
    fn hash160_length() {
        let h = hash160(b"arbitrary compressed pubkey bytes");
        assert_eq!(h.len(), 20);
    }
}
