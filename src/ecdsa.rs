//! ECDSA signing and verification over the two Weierstrass curves
//! (secp256k1, secp256r1/NIST P-256), dispatched on `CurveKind` the
//! same way `curve::*` and `keys` do. Nonces are RFC 6979 deterministic
//! by construction (the underlying `k256`/`p256` `ecdsa` crates use it
//! for every `sign_prehash*` call), signatures are normalized to low-S
//! before being handed back, and every signing path self-verifies its
//! own output before returning it — mirroring the defensive pattern the
//! teacher's `crypto::derive` used around its own signing helpers.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::elliptic_curve::sec1::ToEncodedPoint;

use crate::curve::CurveKind;
use crate::error::{KeyForgeError, Result};
use crate::keys::{PrivateKey, PublicKey};

/// Fixed-width `r || s` signature, 64 bytes, low-S normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Signature {
    pub kind: CurveKind,
    #[serde(with = "serde_bytes_array")]
    pub bytes: [u8; 64],
}

/// `serde` has no blanket impl for `[u8; 64]` (only up to 32 via
/// const-generic support varies by version); this is the small
/// hex-free big-array shim used instead of adding a whole
/// `serde-big-array` dependency for one field.
mod serde_bytes_array {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 64], serializer: S) -> Result<S::Ok, S::Error> {
        bytes.as_slice().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 64], D::Error> {
        let vec = Vec::<u8>::deserialize(deserializer)?;
        vec.try_into().map_err(|_| serde::de::Error::custom("expected exactly 64 bytes"))
    }
}

impl Signature {
    pub fn r(&self) -> &[u8] {
        &self.bytes[0..32]
    }

    pub fn s(&self) -> &[u8] {
        &self.bytes[32..64]
    }
}

/// Prepares the 32-byte prehash a Weierstrass signature operates on:
/// optionally SHA-256-hashes `digest` first (spec's `{hash_first}`
/// option), then requires the result be exactly the curve's scalar
/// length — anything else is `InvalidDigest`, not a panic or a silent
/// truncation.
fn prepare_digest(kind: CurveKind, digest: &[u8], hash_first: bool) -> Result<[u8; 32]> {
    let scalar_len = kind.descriptor().scalar_len;
    let hashed;
    let bytes: &[u8] = if hash_first {
        hashed = crate::hash::sha256(digest);
        &hashed
    } else {
        digest
    };
    if bytes.len() != scalar_len {
        return Err(KeyForgeError::InvalidDigest(format!(
            "digest must be {scalar_len} bytes, got {}",
            bytes.len()
        )));
    }
    let mut arr = [0u8; 32];
    arr.copy_from_slice(bytes);
    Ok(arr)
}

#[cfg(feature = "secp256k1")]
fn sign_secp256k1(private_key: &PrivateKey, prehash: &[u8; 32]) -> Result<(Signature, u8)> {
    let scalar: [u8; 32] = private_key.as_bytes().try_into().unwrap();
    let signing_key = k256::ecdsa::SigningKey::from_bytes(scalar.as_slice().into())
        .map_err(|e| KeyForgeError::InvalidKey(format!("secp256k1 scalar out of range: {e}")))?;

    let (sig, recid): (k256::ecdsa::Signature, k256::ecdsa::RecoveryId) = signing_key
        .sign_prehash_recoverable(prehash)
        .map_err(|e| KeyForgeError::InvalidSignature(format!("secp256k1 signing failed: {e}")))?;
    let sig = sig.normalize_s().unwrap_or(sig);

    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&sig.to_bytes());
    let signature = Signature { kind: CurveKind::Secp256k1, bytes };

    let verifying_key = signing_key.verifying_key();
    verifying_key.verify_prehash(prehash, &sig).map_err(|_| {
        log::warn!("secp256k1: freshly produced signature failed self-verification");
        KeyForgeError::SignatureVerificationFailed
    })?;

    Ok((signature, recid.to_byte()))
}

#[cfg(feature = "secp256r1")]
fn sign_secp256r1(private_key: &PrivateKey, prehash: &[u8; 32]) -> Result<Signature> {
    let scalar: [u8; 32] = private_key.as_bytes().try_into().unwrap();
    let signing_key = p256::ecdsa::SigningKey::from_bytes(scalar.as_slice().into())
        .map_err(|e| KeyForgeError::InvalidKey(format!("secp256r1 scalar out of range: {e}")))?;

    let sig: p256::ecdsa::Signature = signing_key
        .sign_prehash(prehash)
        .map_err(|e| KeyForgeError::InvalidSignature(format!("secp256r1 signing failed: {e}")))?;
    let sig = sig.normalize_s().unwrap_or(sig);

    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&sig.to_bytes());
    let signature = Signature { kind: CurveKind::Secp256r1, bytes };

    signing_key.verifying_key().verify_prehash(prehash, &sig).map_err(|_| {
        log::warn!("secp256r1: freshly produced signature failed self-verification");
        KeyForgeError::SignatureVerificationFailed
    })?;

    Ok(signature)
}

/// Signs `digest` (optionally SHA-256-hashed first per `hash_first`).
/// For secp256k1 this also computes the public-key recovery id,
/// discarded here and available through [`sign_recoverable`] when
/// callers need it (Ethereum/Tron-style transaction signing does).
pub fn sign(private_key: &PrivateKey, digest: &[u8], hash_first: bool) -> Result<Signature> {
    let prehash = prepare_digest(private_key.kind(), digest, hash_first)?;
    match private_key.kind() {
        #[cfg(feature = "secp256k1")]
        CurveKind::Secp256k1 => sign_secp256k1(private_key, &prehash).map(|(sig, _)| sig),
        #[cfg(feature = "secp256r1")]
        CurveKind::Secp256r1 => sign_secp256r1(private_key, &prehash),
        #[cfg(feature = "ed25519")]
        CurveKind::Ed25519Slip10 | CurveKind::Ed25519Kholaw => Err(KeyForgeError::InvalidArgument(
            "ECDSA signing is not defined for ed25519 keys".into(),
        )),
    }
}

/// Signs and returns the recovery id needed to reconstruct the public
/// key from `(digest, signature)` alone, as Ethereum/Tron transactions
/// and `personal_sign` both require. Only defined for secp256k1.
#[cfg(feature = "secp256k1")]
pub fn sign_recoverable(private_key: &PrivateKey, digest: &[u8], hash_first: bool) -> Result<(Signature, u8)> {
    if private_key.kind() != CurveKind::Secp256k1 {
        return Err(KeyForgeError::InvalidArgument(
            "recoverable signing is only defined for secp256k1".into(),
        ));
    }
    let prehash = prepare_digest(CurveKind::Secp256k1, digest, hash_first)?;
    sign_secp256k1(private_key, &prehash)
}

/// Verifies `signature` against `digest`. Returns `Ok(false)` for a
/// well-formed signature that simply doesn't verify — only malformed
/// input (wrong digest length, an off-curve public key, or an (r,s)
/// pair out of range) surfaces as `Err`, per the spec's "verify returns
/// a boolean for the equation itself" contract.
pub fn verify(public_key: &PublicKey, digest: &[u8], hash_first: bool, signature: &Signature) -> Result<bool> {
    if public_key.kind() != signature.kind {
        return Err(KeyForgeError::InvalidArgument(
            "public key and signature belong to different curves".into(),
        ));
    }
    let prehash = prepare_digest(public_key.kind(), digest, hash_first)?;
    match public_key.kind() {
        #[cfg(feature = "secp256k1")]
        CurveKind::Secp256k1 => {
            let verifying_key = k256::ecdsa::VerifyingKey::from_sec1_bytes(public_key.as_bytes())
                .map_err(|e| KeyForgeError::InvalidKey(format!("secp256k1 point invalid: {e}")))?;
            let sig = k256::ecdsa::Signature::from_bytes(signature.bytes.as_slice().into())
                .map_err(|e| KeyForgeError::InvalidSignature(format!("malformed signature: {e}")))?;
            Ok(verifying_key.verify_prehash(&prehash, &sig).is_ok())
        }
        #[cfg(feature = "secp256r1")]
        CurveKind::Secp256r1 => {
            let verifying_key = p256::ecdsa::VerifyingKey::from_sec1_bytes(public_key.as_bytes())
                .map_err(|e| KeyForgeError::InvalidKey(format!("secp256r1 point invalid: {e}")))?;
            let sig = p256::ecdsa::Signature::from_bytes(signature.bytes.as_slice().into())
                .map_err(|e| KeyForgeError::InvalidSignature(format!("malformed signature: {e}")))?;
            Ok(verifying_key.verify_prehash(&prehash, &sig).is_ok())
        }
        #[cfg(feature = "ed25519")]
        CurveKind::Ed25519Slip10 | CurveKind::Ed25519Kholaw => Err(KeyForgeError::InvalidArgument(
            "ECDSA verification is not defined for ed25519 keys".into(),
        )),
    }
}

/// Recovers the signer's public key from a secp256k1 signature and
/// recovery id, the way `ecrecover` does on EVM chains.
#[cfg(feature = "secp256k1")]
pub fn recover_public_key(digest: &[u8], hash_first: bool, signature: &Signature, recovery_id: u8) -> Result<PublicKey> {
    if signature.kind != CurveKind::Secp256k1 {
        return Err(KeyForgeError::InvalidArgument(
            "public key recovery is only defined for secp256k1".into(),
        ));
    }
    let prehash = prepare_digest(CurveKind::Secp256k1, digest, hash_first)?;
    let sig = k256::ecdsa::Signature::from_bytes(signature.bytes.as_slice().into())
        .map_err(|e| KeyForgeError::InvalidSignature(format!("malformed signature: {e}")))?;
    let recid = k256::ecdsa::RecoveryId::from_byte(recovery_id)
        .ok_or_else(|| KeyForgeError::InvalidArgument("recovery id must be 0..=3".into()))?;
    let verifying_key = k256::ecdsa::VerifyingKey::recover_from_prehash(&prehash, &sig, recid)
        .map_err(|e| KeyForgeError::InvalidSignature(format!("public key recovery failed: {e}")))?;

    let compressed = verifying_key.to_encoded_point(true);
    PublicKey::from_secp256k1_bytes(compressed.as_bytes())
}

/// DER encoding, kept as a secondary, non-canonical encoding for
/// interop with tooling that expects ASN.1 `SEQUENCE { r, s }` rather
/// than fixed-width `r || s`.
#[cfg(feature = "secp256k1")]
pub fn to_der(signature: &Signature) -> Result<Vec<u8>> {
    if signature.kind != CurveKind::Secp256k1 {
        return Err(KeyForgeError::InvalidArgument("DER encoding requested for a non-secp256k1 signature".into()));
    }
    let sig = k256::ecdsa::Signature::from_bytes(signature.bytes.as_slice().into())
        .map_err(|e| KeyForgeError::InvalidSignature(format!("malformed signature: {e}")))?;
    Ok(sig.to_der().as_bytes().to_vec())
}

#[cfg(feature = "secp256k1")]
pub fn from_der(kind: CurveKind, der: &[u8]) -> Result<Signature> {
    if kind != CurveKind::Secp256k1 {
        return Err(KeyForgeError::InvalidArgument("DER decoding requested for a non-secp256k1 curve".into()));
    }
    let sig = k256::ecdsa::Signature::from_der(der)
        .map_err(|e| KeyForgeError::InvalidSignature(format!("malformed DER signature: {e}")))?;
    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&sig.to_bytes());
    Ok(Signature { kind, bytes })
}

/// EVM/Tron "personal_sign": hashes `"\x19Ethereum Signed Message:\n" ||
/// len(message) || message` with Keccak-256, signs it, and returns the
/// `v` byte (27/28) in the form those chains' transaction encodings
/// expect rather than the raw 0/1 recovery id. The Keccak digest is
/// already the final 32 bytes to sign, so this bypasses the generic
/// SHA-256 `hash_first` option rather than composing with it.
#[cfg(feature = "secp256k1")]
pub fn sign_personal_message(private_key: &PrivateKey, message: &[u8]) -> Result<(Signature, u8)> {
    if private_key.kind() != CurveKind::Secp256k1 {
        return Err(KeyForgeError::InvalidArgument(
            "personal-message signing is only defined for secp256k1".into(),
        ));
    }
    let prefix = format!("\x19Ethereum Signed Message:\n{}", message.len());
    let mut data = Vec::with_capacity(prefix.len() + message.len());
    data.extend_from_slice(prefix.as_bytes());
    data.extend_from_slice(message);
    let digest = crate::hash::keccak256(&data);

    let (signature, recovery_id) = sign_recoverable(private_key, &digest, false)?;
    Ok((signature, recovery_id + 27))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "secp256k1")]
    #[test]
    fn secp256k1_sign_verify_round_trip() {
        let sk = PrivateKey::from_secp256k1_bytes(&[6u8; 32]).unwrap();
        let pk = sk.public_key().unwrap();
        let prehash = crate::hash::sha256(b"message to sign");

        let sig = sign(&sk, &prehash, false).unwrap();
        assert!(verify(&pk, &prehash, false, &sig).unwrap());
    }

    #[cfg(feature = "secp256k1")]
    #[test]
    fn secp256k1_hash_first_hashes_arbitrary_length_input() {
        let sk = PrivateKey::from_secp256k1_bytes(&[10u8; 32]).unwrap();
        let pk = sk.public_key().unwrap();
        let message = b"an arbitrary-length message, not pre-hashed";

        let sig = sign(&sk, message, true).unwrap();
        assert!(verify(&pk, message, true, &sig).unwrap());

        // Feeding the same message through without `hash_first` is a
        // length mismatch, not a verification failure.
        assert!(matches!(sign(&sk, message, false), Err(KeyForgeError::InvalidDigest(_))));
    }

    #[cfg(feature = "secp256k1")]
    #[test]
    fn secp256k1_tampered_signature_does_not_verify() {
        let sk = PrivateKey::from_secp256k1_bytes(&[6u8; 32]).unwrap();
        let pk = sk.public_key().unwrap();
        let prehash = crate::hash::sha256(b"message to sign");

        let mut sig = sign(&sk, &prehash, false).unwrap();
        sig.bytes[0] ^= 0xff;

        assert_eq!(verify(&pk, &prehash, false, &sig).unwrap(), false);
    }

    #[cfg(feature = "secp256k1")]
    #[test]
    fn secp256k1_recovery_reconstructs_public_key() {
        let sk = PrivateKey::from_secp256k1_bytes(&[12u8; 32]).unwrap();
        let pk = sk.public_key().unwrap();
        let prehash = crate::hash::sha256(b"recoverable message");

        let (sig, recid) = sign_recoverable(&sk, &prehash, false).unwrap();
        let recovered = recover_public_key(&prehash, false, &sig, recid).unwrap();
        assert_eq!(recovered.as_bytes(), pk.as_bytes());
    }

    #[cfg(feature = "secp256k1")]
    #[test]
    fn secp256k1_der_round_trips() {
        let sk = PrivateKey::from_secp256k1_bytes(&[1u8; 32]).unwrap();
        let prehash = crate::hash::sha256(b"der round trip");
        let sig = sign(&sk, &prehash, false).unwrap();

        let der = to_der(&sig).unwrap();
        let decoded = from_der(CurveKind::Secp256k1, &der).unwrap();
        assert_eq!(decoded.bytes, sig.bytes);
    }

    #[cfg(feature = "secp256r1")]
    #[test]
    fn secp256r1_sign_verify_round_trip() {
        let sk = PrivateKey::from_secp256r1_bytes(&[8u8; 32]).unwrap();
        let pk = sk.public_key().unwrap();
        let prehash = crate::hash::sha256(b"abc");

        let sig = sign(&sk, &prehash, false).unwrap();
        assert!(verify(&pk, &prehash, false, &sig).unwrap());
    }

    #[cfg(feature = "secp256r1")]
    #[test]
    fn secp256r1_tampered_signature_does_not_verify() {
        let sk = PrivateKey::from_secp256r1_bytes(&[8u8; 32]).unwrap();
        let pk = sk.public_key().unwrap();
        let prehash = crate::hash::sha256(b"abc");

        let mut sig = sign(&sk, &prehash, false).unwrap();
        sig.bytes[63] ^= 0xff;

        assert_eq!(verify(&pk, &prehash, false, &sig).unwrap(), false);
    }

    #[cfg(feature = "secp256k1")]
    #[test]
    fn personal_message_v_byte_is_27_or_28() {
        let sk = PrivateKey::from_secp256k1_bytes(&[3u8; 32]).unwrap();
        let (_, v) = sign_personal_message(&sk, b"hello from Tron").unwrap();
        assert!(v == 27 || v == 28);
    }

    /// Tron `personal_sign` of `"message"` with a known private key.
    #[cfg(feature = "secp256k1")]
    #[test]
    fn tron_personal_message_known_vector() {
        let key_bytes: [u8; 32] =
            hex::decode("43985273a3d94eb753fe6acfd7003e88254effce1eb53e2e97b8522558a98038")
                .unwrap()
                .try_into()
                .unwrap();
        let sk = PrivateKey::from_secp256k1_bytes(&key_bytes).unwrap();

        let (sig, v) = sign_personal_message(&sk, b"message").unwrap();
        let mut expected = [0u8; 64];
        expected.copy_from_slice(
            &hex::decode("fde00bc33d78109bc61de314c1c0526a047e22a2aaae473ca84b32d8aa35ed3e03720e05d614087e3d8c6fae63879755b32aa08818a2d4de66fee1a617a97167")
                .unwrap(),
        );
        assert_eq!(sig.bytes, expected);
        assert_eq!(v, 0x1b);

        let prefix = format!("\x19Ethereum Signed Message:\n{}", b"message".len());
        let mut data = prefix.into_bytes();
        data.extend_from_slice(b"message");
        let digest = crate::hash::keccak256(&data);
        let recovered = recover_public_key(&digest, false, &sig, v - 27).unwrap();
        let pk = sk.public_key().unwrap();
        assert_eq!(recovered.as_bytes(), pk.as_bytes());
    }
}
