//! Per-curve master-key generation and child-key derivation, dispatched
//! on `CurveKind`. This is the one place that has to know all four
//! curves disagree about what "derive a child" means — everything
//! above this module just calls `master_key`/`derive_child` and gets
//! back key material it can serialize uniformly.

use crate::curve::CurveKind;
use crate::error::{KeyForgeError, Result};

/// Private or public key material for whichever curve is in play.
/// Lengths vary: 32 bytes for every private/public field except the
/// Cardano extended private key (64 bytes, `kL || kR`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    Private(Vec<u8>),
    Public(Vec<u8>),
}

impl KeyMaterial {
    pub fn is_private(&self) -> bool {
        matches!(self, KeyMaterial::Private(_))
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            KeyMaterial::Private(b) | KeyMaterial::Public(b) => b,
        }
    }
}

/// The public key bytes for fingerprinting and non-hardened tweak
/// data, regardless of whether `material` is itself private or public.
fn public_bytes(kind: CurveKind, material: &KeyMaterial) -> Result<Vec<u8>> {
    match material {
        KeyMaterial::Public(bytes) => Ok(bytes.clone()),
        KeyMaterial::Private(bytes) => match kind {
            #[cfg(feature = "secp256k1")]
            CurveKind::Secp256k1 => {
                let scalar: [u8; 32] = bytes.as_slice().try_into().unwrap();
                Ok(crate::curve::secp256k1::public_compressed_from_private(&scalar)?.to_vec())
            }
            #[cfg(feature = "secp256r1")]
            CurveKind::Secp256r1 => {
                let scalar: [u8; 32] = bytes.as_slice().try_into().unwrap();
                Ok(crate::curve::secp256r1::public_compressed_from_private(&scalar)?.to_vec())
            }
            #[cfg(feature = "ed25519")]
            CurveKind::Ed25519Slip10 => {
                let seed: [u8; 32] = bytes.as_slice().try_into().unwrap();
                Ok(crate::curve::ed25519::public_from_private(&seed).to_vec())
            }
            #[cfg(feature = "ed25519")]
            CurveKind::Ed25519Kholaw => {
                let extended: [u8; 64] = bytes.as_slice().try_into().unwrap();
                Ok(crate::curve::ed25519_kholaw::public_from_private(&extended).to_vec())
            }
        },
    }
}

/// BIP-32's master-key retry: `IL` must be `∈ [1,n−1]`; when it isn't,
/// the *entire* 64-byte HMAC output `I` becomes the new seed and the
/// derivation repeats, rather than erroring out. `from_bytes` is
/// whichever curve's range/zero check rejects an out-of-range `IL`.
#[cfg(any(feature = "secp256k1", feature = "secp256r1"))]
fn master_weierstrass_retry(
    seed: &[u8],
    hmac_key: &[u8],
    from_bytes: fn(&[u8]) -> Result<[u8; 32]>,
) -> ([u8; 32], [u8; 32]) {
    let mut data = seed.to_vec();
    loop {
        let i = crate::hash::hmac_sha512(hmac_key, &data);
        let (il, ir) = i.split_at(32);
        match from_bytes(il) {
            Ok(scalar) => {
                let mut chain_code = [0u8; 32];
                chain_code.copy_from_slice(ir);
                return (scalar, chain_code);
            }
            Err(_) => {
                log::warn!("master key IL out of range, rehashing with I as the new seed");
                data = i.to_vec();
            }
        }
    }
}

pub fn master_key(kind: CurveKind, seed: &[u8]) -> Result<(KeyMaterial, [u8; 32])> {
    if seed.len() < 16 || seed.len() > 64 {
        return Err(KeyForgeError::InvalidArgument(
            "BIP-32 seed must be between 16 and 64 bytes".into(),
        ));
    }
    match kind {
        #[cfg(feature = "ed25519")]
        CurveKind::Ed25519Kholaw => {
            let (extended, chain_code) = crate::curve::ed25519_kholaw::master_from_seed(seed);
            Ok((KeyMaterial::Private(extended.to_vec()), chain_code))
        }
        #[cfg(feature = "ed25519")]
        CurveKind::Ed25519Slip10 => {
            // SLIP-10 ed25519 has no IL range check to retry against —
            // `ed25519-dalek` clamps any 32-byte seed internally.
            let i = crate::hash::hmac_sha512(kind.descriptor().master_seed_key, seed);
            let (il, ir) = i.split_at(32);
            let mut chain_code = [0u8; 32];
            chain_code.copy_from_slice(ir);
            let seed32 = crate::curve::ed25519::private_from_bytes(il)?;
            Ok((KeyMaterial::Private(seed32.to_vec()), chain_code))
        }
        #[cfg(feature = "secp256k1")]
        CurveKind::Secp256k1 => {
            let (scalar, chain_code) = master_weierstrass_retry(
                seed,
                kind.descriptor().master_seed_key,
                crate::curve::secp256k1::private_from_bytes,
            );
            Ok((KeyMaterial::Private(scalar.to_vec()), chain_code))
        }
        #[cfg(feature = "secp256r1")]
        CurveKind::Secp256r1 => {
            let (scalar, chain_code) = master_weierstrass_retry(
                seed,
                kind.descriptor().master_seed_key,
                crate::curve::secp256r1::private_from_bytes,
            );
            Ok((KeyMaterial::Private(scalar.to_vec()), chain_code))
        }
    }
}

/// `index`'s top bit marks a hardened child, per BIP-32 convention.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

pub fn derive_child(
    kind: CurveKind,
    material: &KeyMaterial,
    chain_code: &[u8; 32],
    index: u32,
) -> Result<(KeyMaterial, [u8; 32])> {
    let hardened = index >= HARDENED_OFFSET;

    if hardened && !material.is_private() {
        return Err(KeyForgeError::DerivationError(
            "hardened derivation requires a private parent key".into(),
        ));
    }
    if !kind.descriptor().supports_public_derivation && !hardened {
        return Err(KeyForgeError::DerivationError(format!(
            "{} defines no non-hardened child derivation",
            kind.descriptor().name
        )));
    }

    match (kind, material) {
        #[cfg(feature = "secp256k1")]
        (CurveKind::Secp256k1, KeyMaterial::Private(bytes)) => {
            let scalar: [u8; 32] = bytes.as_slice().try_into().unwrap();
            let parent_pub: [u8; 33] = public_bytes(kind, material)?.try_into().unwrap();
            let (child, cc) = crate::curve::secp256k1::derive_child_priv(&scalar, &parent_pub, chain_code, index, hardened)?;
            Ok((KeyMaterial::Private(child.to_vec()), cc))
        }
        #[cfg(feature = "secp256k1")]
        (CurveKind::Secp256k1, KeyMaterial::Public(bytes)) => {
            let parent_pub: [u8; 33] = bytes.as_slice().try_into().unwrap();
            let (child, cc) = crate::curve::secp256k1::derive_child_pub(&parent_pub, chain_code, index)?;
            Ok((KeyMaterial::Public(child.to_vec()), cc))
        }
        #[cfg(feature = "secp256r1")]
        (CurveKind::Secp256r1, KeyMaterial::Private(bytes)) => {
            let scalar: [u8; 32] = bytes.as_slice().try_into().unwrap();
            let parent_pub: [u8; 33] = public_bytes(kind, material)?.try_into().unwrap();
            let (child, cc) = crate::curve::secp256r1::derive_child_priv(&scalar, &parent_pub, chain_code, index, hardened)?;
            Ok((KeyMaterial::Private(child.to_vec()), cc))
        }
        #[cfg(feature = "secp256r1")]
        (CurveKind::Secp256r1, KeyMaterial::Public(bytes)) => {
            let parent_pub: [u8; 33] = bytes.as_slice().try_into().unwrap();
            let (child, cc) = crate::curve::secp256r1::derive_child_pub(&parent_pub, chain_code, index)?;
            Ok((KeyMaterial::Public(child.to_vec()), cc))
        }
        #[cfg(feature = "ed25519")]
        (CurveKind::Ed25519Slip10, KeyMaterial::Private(bytes)) => {
            let seed: [u8; 32] = bytes.as_slice().try_into().unwrap();
            let (child, cc) = crate::curve::ed25519::derive_child_priv(&seed, chain_code, index);
            Ok((KeyMaterial::Private(child.to_vec()), cc))
        }
        #[cfg(feature = "ed25519")]
        (CurveKind::Ed25519Slip10, KeyMaterial::Public(_)) => Err(KeyForgeError::DerivationError(
            "SLIP-10 ed25519 defines no public-key derivation".into(),
        )),
        #[cfg(feature = "ed25519")]
        (CurveKind::Ed25519Kholaw, KeyMaterial::Private(bytes)) => {
            let extended: [u8; 64] = bytes.as_slice().try_into().unwrap();
            let (child, cc) = crate::curve::ed25519_kholaw::derive_child_priv(&extended, chain_code, index, hardened);
            Ok((KeyMaterial::Private(child.to_vec()), cc))
        }
        #[cfg(feature = "ed25519")]
        (CurveKind::Ed25519Kholaw, KeyMaterial::Public(_)) => Err(KeyForgeError::DerivationError(
            "non-hardened public derivation for the Cardano extended scheme is not implemented".into(),
        )),
    }
}

pub(crate) fn fingerprint(kind: CurveKind, material: &KeyMaterial) -> Result<[u8; 4]> {
    let public = public_bytes(kind, material)?;
    let hash = crate::hash::hash160(&public);
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash[0..4]);
    Ok(out)
}

pub(crate) fn public_key_bytes(kind: CurveKind, material: &KeyMaterial) -> Result<Vec<u8>> {
    public_bytes(kind, material)
}
