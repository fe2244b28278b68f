//! Cardano Byron/Icarus "extended Ed25519" (Khovratovich & Law, the
//! scheme cardano-crypto calls Kholaw). Unlike SLIP-10 ed25519, this
//! variant supports non-hardened derivation by keeping a 64-byte
//! extended private key (`kL || kR`) and adding the HMAC tweak as a
//! plain 256-bit little-endian integer — no reduction mod the group
//! order at derivation time, only when a scalar is finally multiplied
//! by the base point.
//!
//! Grounded in `curve25519-dalek`'s `Scalar`/`EdwardsPoint` types, used
//! the same raw way Cardano's own VRF-compatibility layer uses them.

use curve25519_dalek::constants::ED25519_BASEPOINT_TABLE;
use curve25519_dalek::scalar::Scalar;

use crate::error::{KeyForgeError, Result};

/// 64-byte extended private key: `kL` (clamped scalar material, 32
/// bytes) followed by `kR` (32 bytes of signing nonce material).
pub type ExtendedPrivateKey = [u8; 64];

fn clamp(kl: &mut [u8; 32]) {
    kl[0] &= 0b1111_1000;
    kl[31] &= 0b0001_1111;
    kl[31] |= 0b0100_0000;
}

/// Master key generation from a seed. Iterates the counter byte until
/// the resulting `kL`'s third-highest bit is clear, exactly as
/// cardano-crypto does, then clamps `kL` and derives the chain code
/// from a differently tagged HMAC.
pub fn master_from_seed(seed: &[u8]) -> (ExtendedPrivateKey, [u8; 32]) {
    let mut counter: u8 = 1;
    let mut block = crate::hash::hmac_sha512(seed, &[counter]);
    while block[31] & 0x20 != 0 {
        log::trace!("ed25519-kholaw: master key counter {counter} rejected, retrying");
        counter += 1;
        block = crate::hash::hmac_sha512(seed, &[counter]);
    }

    let mut kl = [0u8; 32];
    kl.copy_from_slice(&block[0..32]);
    clamp(&mut kl);
    let mut kr = [0u8; 32];
    kr.copy_from_slice(&block[32..64]);

    let mut extended = [0u8; 64];
    extended[0..32].copy_from_slice(&kl);
    extended[32..64].copy_from_slice(&kr);

    let mut chain_code = [0u8; 32];
    let cc_material = crate::hash::hmac_sha512(seed, &[0x01]);
    chain_code.copy_from_slice(&cc_material[0..32]);

    (extended, chain_code)
}

pub fn public_from_private(extended: &ExtendedPrivateKey) -> [u8; 32] {
    let mut kl = [0u8; 32];
    kl.copy_from_slice(&extended[0..32]);
    let scalar = Scalar::from_bytes_mod_order(kl);
    (&scalar * ED25519_BASEPOINT_TABLE).compress().to_bytes()
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
    curve25519_dalek::edwards::CompressedEdwardsY(arr)
        .decompress()
        .ok_or_else(|| KeyForgeError::InvalidKey("ed25519 point not on curve".into()))?;
    Ok(arr)
}

/// Multiply a 256-bit little-endian integer by 8, keeping all 256 bits
/// (any carry out of the top byte is discarded, matching the reference
/// derivation, which only ever needs the low 256 bits of `8*ZL`).
fn mul8(z: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut carry = 0u16;
    for i in 0..32 {
        let v = ((z[i] as u16) << 3) | carry;
        out[i] = (v & 0xff) as u8;
        carry = v >> 8;
    }
    out
}

/// Plain 256-bit little-endian addition, discarding the final carry —
/// this is *not* reduction mod the ed25519 group order. The extended
/// private key format intentionally keeps `kL` as an unreduced integer;
/// only `public_from_private` reduces it, at the point of scalar
/// multiplication.
fn add_256(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut carry = 0u16;
    for i in 0..32 {
        let v = a[i] as u16 + b[i] as u16 + carry;
        out[i] = (v & 0xff) as u8;
        carry = v >> 8;
    }
    out
}

/// `ckdPriv`/`ckdPub` combined: the tweak HMAC is always computable
/// from the extended private key, but which half of the result feeds
/// the private vs. chain-code output is selected by a discriminator
/// byte that also distinguishes hardened from non-hardened indices.
pub fn derive_child_priv(
    parent: &ExtendedPrivateKey,
    parent_chain_code: &[u8; 32],
    index: u32,
    hardened: bool,
) -> (ExtendedPrivateKey, [u8; 32]) {
    let kl: [u8; 32] = parent[0..32].try_into().unwrap();
    let kr: [u8; 32] = parent[32..64].try_into().unwrap();

    let (private_tag, chain_tag): (u8, u8) = if hardened { (0x00, 0x01) } else { (0x02, 0x03) };

    let mut z_data = Vec::with_capacity(69);
    z_data.push(private_tag);
    if hardened {
        z_data.extend_from_slice(&kl);
        z_data.extend_from_slice(&kr);
    } else {
        z_data.extend_from_slice(&public_from_private(parent));
    }
    z_data.extend_from_slice(&index.to_le_bytes());
    let z = crate::hash::hmac_sha512(parent_chain_code, &z_data);
    let zl: [u8; 32] = z[0..32].try_into().unwrap();
    let zr: [u8; 32] = z[32..64].try_into().unwrap();

    let child_kl = add_256(&kl, &mul8(&zl));
    let child_kr = add_256(&kr, &zr);

    let mut cc_data = Vec::with_capacity(69);
    cc_data.push(chain_tag);
    if hardened {
        cc_data.extend_from_slice(&kl);
        cc_data.extend_from_slice(&kr);
    } else {
        cc_data.extend_from_slice(&public_from_private(parent));
    }
    cc_data.extend_from_slice(&index.to_le_bytes());
    let cc_material = crate::hash::hmac_sha512(parent_chain_code, &cc_data);
    let mut child_chain_code = [0u8; 32];
    child_chain_code.copy_from_slice(&cc_material[32..64]);

    let mut child = [0u8; 64];
    child[0..32].copy_from_slice(&child_kl);
    child[32..64].copy_from_slice(&child_kr);
    (child, child_chain_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master_key_is_deterministic() {
        let (ext1, cc1) = master_from_seed(b"some deterministic seed material");
        let (ext2, cc2) = master_from_seed(b"some deterministic seed material");
        assert_eq!(ext1, ext2);
        assert_eq!(cc1, cc2);
    }

    #[test]
    fn master_key_left_half_is_clamped() {
        let (ext, _) = master_from_seed(b"another seed");
        assert_eq!(ext[0] & 0b0000_0111, 0);
        assert_eq!(ext[31] & 0b1000_0000, 0);
        assert_eq!(ext[31] & 0b0100_0000, 0b0100_0000);
    }

    #[test]
    fn hardened_and_soft_children_diverge() {
        let (master, cc) = master_from_seed(b"yet another seed");
        let (hardened_child, _) = derive_child_priv(&master, &cc, 0x8000_0000, true);
        let (soft_child, _) = derive_child_priv(&master, &cc, 0, false);
        assert_ne!(hardened_child, soft_child);
    }

    #[test]
    fn soft_derivation_is_deterministic() {
        let (master, cc) = master_from_seed(b"determinism check seed");
        let (child1, cc1) = derive_child_priv(&master, &cc, 7, false);
        let (child2, cc2) = derive_child_priv(&master, &cc, 7, false);
        assert_eq!(child1, child2);
        assert_eq!(cc1, cc2);
    }
}
