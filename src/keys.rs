//! Curve-tagged key wrapper types. A `PrivateKey` carries its
//! `CurveKind` alongside the raw scalar/seed bytes so callers can't
//! accidentally feed a secp256k1 scalar into an ed25519 signer — the
//! curve dispatch happens once, here, and every downstream module
//! (bip32, ecdsa, address) matches on `CurveKind` instead of
//! re-validating key shape.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::curve::CurveKind;
use crate::error::Result;

/// Raw private key material, zeroized on drop. For the Weierstrass
/// curves this is a 32-byte scalar; for SLIP-10 ed25519 it's a 32-byte
/// seed; for the Cardano extended scheme it's the 64-byte `kL || kR`
/// pair plus its own 32-byte chain code carried alongside.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    #[zeroize(skip)]
    kind: CurveKind,
    bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    kind: CurveKind,
    bytes: [u8; 33],
    len: usize,
}

impl PrivateKey {
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[cfg(feature = "secp256k1")]
    pub fn from_secp256k1_bytes(bytes: &[u8]) -> Result<Self> {
        let scalar = crate::curve::secp256k1::private_from_bytes(bytes)?;
        Ok(Self { kind: CurveKind::Secp256k1, bytes: scalar.to_vec() })
    }

    #[cfg(feature = "secp256r1")]
    pub fn from_secp256r1_bytes(bytes: &[u8]) -> Result<Self> {
        let scalar = crate::curve::secp256r1::private_from_bytes(bytes)?;
        Ok(Self { kind: CurveKind::Secp256r1, bytes: scalar.to_vec() })
    }

    #[cfg(feature = "ed25519")]
    pub fn from_ed25519_slip10_bytes(bytes: &[u8]) -> Result<Self> {
        let seed = crate::curve::ed25519::private_from_bytes(bytes)?;
        Ok(Self { kind: CurveKind::Ed25519Slip10, bytes: seed.to_vec() })
    }

    #[cfg(feature = "ed25519")]
    pub fn from_ed25519_kholaw_extended(extended: [u8; 64]) -> Self {
        Self { kind: CurveKind::Ed25519Kholaw, bytes: extended.to_vec() }
    }

    /// Derives the corresponding public key for this curve.
    pub fn public_key(&self) -> Result<PublicKey> {
        match self.kind {
            #[cfg(feature = "secp256k1")]
            CurveKind::Secp256k1 => {
                let scalar: [u8; 32] = self.bytes.as_slice().try_into().unwrap();
                let compressed = crate::curve::secp256k1::public_compressed_from_private(&scalar)?;
                Ok(PublicKey::from_compressed(CurveKind::Secp256k1, &compressed))
            }
            #[cfg(feature = "secp256r1")]
            CurveKind::Secp256r1 => {
                let scalar: [u8; 32] = self.bytes.as_slice().try_into().unwrap();
                let compressed = crate::curve::secp256r1::public_compressed_from_private(&scalar)?;
                Ok(PublicKey::from_compressed(CurveKind::Secp256r1, &compressed))
            }
            #[cfg(feature = "ed25519")]
            CurveKind::Ed25519Slip10 => {
                let seed: [u8; 32] = self.bytes.as_slice().try_into().unwrap();
                let point = crate::curve::ed25519::public_from_private(&seed);
                Ok(PublicKey::from_point32(CurveKind::Ed25519Slip10, &point))
            }
            #[cfg(feature = "ed25519")]
            CurveKind::Ed25519Kholaw => {
                let extended: [u8; 64] = self.bytes.as_slice().try_into().unwrap();
                let point = crate::curve::ed25519_kholaw::public_from_private(&extended);
                Ok(PublicKey::from_point32(CurveKind::Ed25519Kholaw, &point))
            }
        }
    }
}

impl PublicKey {
    fn from_compressed(kind: CurveKind, compressed: &[u8; 33]) -> Self {
        Self { kind, bytes: *compressed, len: 33 }
    }

    fn from_point32(kind: CurveKind, point: &[u8; 32]) -> Self {
        let mut bytes = [0u8; 33];
        bytes[..32].copy_from_slice(point);
        Self { kind, bytes, len: 32 }
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Compressed SEC1 encoding for the Weierstrass curves (33 bytes),
    /// or the raw compressed Edwards point for the ed25519 variants
    /// (32 bytes).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    #[cfg(feature = "secp256k1")]
    pub fn from_secp256k1_bytes(bytes: &[u8]) -> Result<Self> {
        let compressed = crate::curve::secp256k1::public_from_bytes(bytes)?;
        Ok(Self::from_compressed(CurveKind::Secp256k1, &compressed))
    }

    #[cfg(feature = "secp256r1")]
    pub fn from_secp256r1_bytes(bytes: &[u8]) -> Result<Self> {
        let compressed = crate::curve::secp256r1::public_from_bytes(bytes)?;
        Ok(Self::from_compressed(CurveKind::Secp256r1, &compressed))
    }

    #[cfg(feature = "ed25519")]
    pub fn from_ed25519_slip10_bytes(bytes: &[u8]) -> Result<Self> {
        let point = crate::curve::ed25519::public_from_bytes(bytes)?;
        Ok(Self::from_point32(CurveKind::Ed25519Slip10, &point))
    }

    #[cfg(feature = "ed25519")]
    pub fn from_ed25519_kholaw_bytes(bytes: &[u8]) -> Result<Self> {
        let point = crate::curve::ed25519_kholaw::public_from_bytes(bytes)?;
        Ok(Self::from_point32(CurveKind::Ed25519Kholaw, &point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "secp256k1")]
    #[test]
    fn secp256k1_public_key_round_trips() {
        let sk = PrivateKey::from_secp256k1_bytes(&[9u8; 32]).unwrap();
        let pk = sk.public_key().unwrap();
        assert_eq!(pk.kind(), CurveKind::Secp256k1);
        assert_eq!(pk.as_bytes().len(), 33);
    }

    #[cfg(feature = "ed25519")]
    #[test]
    fn ed25519_slip10_public_key_is_32_bytes() {
        let sk = PrivateKey::from_ed25519_slip10_bytes(&[1u8; 32]).unwrap();
        let pk = sk.public_key().unwrap();
        assert_eq!(pk.as_bytes().len(), 32);
    }
}
