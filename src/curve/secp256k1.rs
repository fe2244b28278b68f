//! secp256k1 curve operations — Bitcoin, Ethereum, and BIP-32's original
//! curve. Built on `k256`, mirroring the teacher's own ECDSA usage in
//! `crypto::derive` and the pack's `Secp256k1Curve` capability struct.

use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::Scalar;

use crate::error::{KeyForgeError, Result};

pub fn private_from_bytes(bytes: &[u8]) -> Result<[u8; 32]> {
    if bytes.len() != 32 {
        return Err(KeyForgeError::InvalidKey(format!(
            "secp256k1 private key must be 32 bytes, got {}",
            bytes.len()
        )));
    }
    let mut arr = [0u8; 32];
    arr.copy_from_slice(bytes);
    SigningKey::from_bytes((&arr).into())
        .map_err(|e| KeyForgeError::InvalidKey(format!("secp256k1 scalar out of range: {e}")))?;
    Ok(arr)
}

pub fn public_compressed_from_private(private_key: &[u8; 32]) -> Result<[u8; 33]> {
    let signing_key = SigningKey::from_bytes(private_key.into())
        .map_err(|e| KeyForgeError::InvalidKey(format!("secp256k1 scalar out of range: {e}")))?;
    let point = signing_key.verifying_key().to_encoded_point(true);
    let mut out = [0u8; 33];
    out.copy_from_slice(point.as_bytes());
    Ok(out)
}

/// Accepts a compressed (33-byte) or uncompressed (65-byte) SEC1 point
/// and validates on-curve membership; returns the compressed encoding.
pub fn public_from_bytes(bytes: &[u8]) -> Result<[u8; 33]> {
    let verifying_key = VerifyingKey::from_sec1_bytes(bytes)
        .map_err(|e| KeyForgeError::InvalidKey(format!("secp256k1 point invalid: {e}")))?;
    let point = verifying_key.to_encoded_point(true);
    let mut out = [0u8; 33];
    out.copy_from_slice(point.as_bytes());
    Ok(out)
}

pub fn public_uncompressed(private_key: &[u8; 32]) -> Result<[u8; 65]> {
    let signing_key = SigningKey::from_bytes(private_key.into())
        .map_err(|e| KeyForgeError::InvalidKey(format!("secp256k1 scalar out of range: {e}")))?;
    let point = signing_key.verifying_key().to_encoded_point(false);
    let mut out = [0u8; 65];
    out.copy_from_slice(point.as_bytes());
    Ok(out)
}

fn scalar_from_il(il: &[u8]) -> Result<Scalar> {
    let il_array: [u8; 32] = il.try_into().expect("HMAC-SHA512 output half is 32 bytes");
    Option::from(<Scalar as k256::elliptic_curve::ff::PrimeField>::from_repr(
        il_array.into(),
    ))
    .ok_or_else(|| {
        log::warn!("secp256k1: IL >= curve order, caller must advance to the next index");
        KeyForgeError::DerivationError("IL >= curve order; advance to next index".into())
    })
}

/// `ckdPriv` for the Weierstrass case: child = (IL + parent) mod n,
/// rejecting IL >= n or a zero result per BIP-32 §"Private parent key
/// to private child key".
pub fn derive_child_priv(
    parent_scalar: &[u8; 32],
    parent_pub_compressed: &[u8; 33],
    chain_code: &[u8; 32],
    index: u32,
    hardened: bool,
) -> Result<([u8; 32], [u8; 32])> {
    let mut data = Vec::with_capacity(37);
    if hardened {
        data.push(0x00);
        data.extend_from_slice(parent_scalar);
    } else {
        data.extend_from_slice(parent_pub_compressed);
    }
    data.extend_from_slice(&index.to_be_bytes());

    let i = crate::hash::hmac_sha512(chain_code, &data);
    let (il, ir) = i.split_at(32);

    // BIP-32 requires IL itself (not its reduction) to be < n.
    let il_scalar = scalar_from_il(il)?;

    let parent_sk = SigningKey::from_bytes(parent_scalar.into())
        .map_err(|e| KeyForgeError::InvalidKey(format!("secp256k1 scalar out of range: {e}")))?;
    let parent_scalar_val = *parent_sk.as_nonzero_scalar().as_ref();
    let child_scalar = parent_scalar_val + il_scalar;

    if bool::from(subtle::ConstantTimeEq::ct_eq(&child_scalar, &Scalar::ZERO)) {
        log::warn!("secp256k1: child scalar reduced to zero at index {index}, caller must advance to the next index");
        return Err(KeyForgeError::DerivationError(
            "child scalar reduced to zero; advance to next index".into(),
        ));
    }

    let mut child_bytes = [0u8; 32];
    child_bytes.copy_from_slice(&child_scalar.to_bytes());
    let mut child_chain_code = [0u8; 32];
    child_chain_code.copy_from_slice(ir);
    Ok((child_bytes, child_chain_code))
}

/// `ckdPub`: child_pub = parent_pub + IL·G. Hardened indices are
/// rejected by the BIP-32 dispatcher before this is ever called.
pub fn derive_child_pub(
    parent_pub_compressed: &[u8; 33],
    chain_code: &[u8; 32],
    index: u32,
) -> Result<([u8; 33], [u8; 32])> {
    let mut data = Vec::with_capacity(37);
    data.extend_from_slice(parent_pub_compressed);
    data.extend_from_slice(&index.to_be_bytes());

    let i = crate::hash::hmac_sha512(chain_code, &data);
    let (il, ir) = i.split_at(32);

    let parent_point = VerifyingKey::from_sec1_bytes(parent_pub_compressed)
        .map_err(|e| KeyForgeError::InvalidKey(format!("secp256k1 point invalid: {e}")))?;
    let il_scalar = scalar_from_il(il)?;
    let tweak_point = k256::ProjectivePoint::GENERATOR * il_scalar;
    let child_point = parent_point.as_affine().to_curve() + tweak_point;

    if bool::from(k256::elliptic_curve::group::Group::is_identity(&child_point)) {
        log::warn!("secp256k1: child point at infinity at index {index}, caller must advance to the next index");
        return Err(KeyForgeError::DerivationError(
            "child point is the point at infinity; advance to next index".into(),
        ));
    }

    let encoded = child_point.to_affine().to_encoded_point(true);
    let mut child_pub = [0u8; 33];
    child_pub.copy_from_slice(encoded.as_bytes());
    let mut child_chain_code = [0u8; 32];
    child_chain_code.copy_from_slice(ir);
    Ok((child_pub, child_chain_code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_from_private_is_deterministic() {
        let sk = private_from_bytes(&[7u8; 32]).unwrap();
        let pk1 = public_compressed_from_private(&sk).unwrap();
        let pk2 = public_compressed_from_private(&sk).unwrap();
        assert_eq!(pk1, pk2);
        assert!(pk1[0] == 0x02 || pk1[0] == 0x03);
    }

    #[test]
    fn rejects_wrong_length_key() {
        assert!(private_from_bytes(&[1u8; 31]).is_err());
    }

    #[test]
    fn soft_derivation_commutes_with_public() {
        let parent_sk = private_from_bytes(&[3u8; 32]).unwrap();
        let parent_pk = public_compressed_from_private(&parent_sk).unwrap();
        let chain_code = [9u8; 32];

        let (child_sk, cc1) = derive_child_priv(&parent_sk, &parent_pk, &chain_code, 0, false).unwrap();
        let child_pub_from_priv = public_compressed_from_private(&child_sk).unwrap();

        let (child_pub_from_pub, cc2) = derive_child_pub(&parent_pk, &chain_code, 0).unwrap();

        assert_eq!(child_pub_from_priv, child_pub_from_pub);
        assert_eq!(cc1, cc2);
    }
}
