//! Pure SLIP-10 ed25519. Unlike the Weierstrass curves, a child's
//! private scalar is not derived by adding a tweak to the parent: `IL`
//! from the HMAC output *is* the child seed, and there is no defined
//! way to derive a child public key from a parent public key alone, so
//! every non-root index here is implicitly hardened.
//!
//! Built on `ed25519-dalek`, which already performs the RFC 8032
//! seed-to-scalar clamping a `SigningKey` needs internally — the same
//! clamping SLIP-10 assumes when it calls a 32-byte `IL` a valid key
//! without any retry loop.

use ed25519_dalek::{SigningKey, VerifyingKey};

use crate::error::{KeyForgeError, Result};

pub fn private_from_bytes(bytes: &[u8]) -> Result<[u8; 32]> {
    if bytes.len() != 32 {
        return Err(KeyForgeError::InvalidKey(format!(
            "ed25519 seed must be 32 bytes, got {}",
            bytes.len()
        )));
    }
    let mut arr = [0u8; 32];
    arr.copy_from_slice(bytes);
    Ok(arr)
}

pub fn public_from_private(seed: &[u8; 32]) -> [u8; 32] {
    SigningKey::from_bytes(seed).verifying_key().to_bytes()
}

pub fn public_from_bytes(bytes: &[u8]) -> Result<[u8; 32]> {
    if bytes.len() != 32 {
        return Err(KeyForgeError::InvalidKey(format!(
            "ed25519 public key must be 32 bytes, got {}",
            bytes.len()
        )));
    }
    let mut arr = [0u8; 32];
    arr.copy_from_slice(bytes);
    VerifyingKey::from_bytes(&arr)
        .map_err(|e| KeyForgeError::InvalidKey(format!("ed25519 point invalid: {e}")))?;
    Ok(arr)
}

/// `ckdPriv`, hardened only — SLIP-10 defines no soft/public derivation
/// for pure ed25519. Callers must reject non-hardened indices before
/// reaching this function; it does not check `hardened` itself because
/// there is nothing else this index could mean.
pub fn derive_child_priv(
    parent_seed: &[u8; 32],
    chain_code: &[u8; 32],
    index: u32,
) -> ([u8; 32], [u8; 32]) {
    let mut data = Vec::with_capacity(37);
    data.push(0x00);
    data.extend_from_slice(parent_seed);
    data.extend_from_slice(&index.to_be_bytes());

    let i = crate::hash::hmac_sha512(chain_code, &data);
    let (il, ir) = i.split_at(32);

    let mut child_seed = [0u8; 32];
    child_seed.copy_from_slice(il);
    let mut child_chain_code = [0u8; 32];
    child_chain_code.copy_from_slice(ir);
    (child_seed, child_chain_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_from_private_is_deterministic() {
        let seed = private_from_bytes(&[4u8; 32]).unwrap();
        let pk1 = public_from_private(&seed);
        let pk2 = public_from_private(&seed);
        assert_eq!(pk1, pk2);
    }

    #[test]
    fn child_derivation_is_deterministic_and_distinct_per_index() {
        let seed = private_from_bytes(&[1u8; 32]).unwrap();
        let chain_code = [2u8; 32];

        let (child0, _) = derive_child_priv(&seed, &chain_code, 0);
        let (child0_again, _) = derive_child_priv(&seed, &chain_code, 0);
        let (child1, _) = derive_child_priv(&seed, &chain_code, 1);

        assert_eq!(child0, child0_again);
        assert_ne!(child0, child1);
    }

    #[test]
    fn rejects_wrong_length_public_key() {
        assert!(public_from_bytes(&[0xffu8; 31]).is_err());
    }
}
