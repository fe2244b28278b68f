//! Elliptic-curve primitives and per-curve parameters.
//!
//! The BIP-32 base in spec form used classical OO inheritance (an
//! abstract base with a virtual `curveType`/`keyDerivator`). Here the
//! supported curves are a closed, finite set, so they're modeled as a
//! tagged enum (`CurveKind`) plus one module per curve exposing free
//! functions — no trait objects, no dynamic dispatch, exhaustive
//! matches everywhere a curve is consumed.

#[cfg(feature = "secp256k1")]
pub mod secp256k1;
#[cfg(feature = "secp256r1")]
pub mod secp256r1;
#[cfg(feature = "ed25519")]
pub mod ed25519;
#[cfg(feature = "ed25519")]
pub mod ed25519_kholaw;

#[allow(unused_imports)]
use crate::error::{KeyForgeError, Result};

/// The closed set of curves this crate derives and signs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CurveKind {
    #[cfg(feature = "secp256k1")]
    Secp256k1,
    #[cfg(feature = "secp256r1")]
    Secp256r1,
    #[cfg(feature = "ed25519")]
    Ed25519Slip10,
    #[cfg(feature = "ed25519")]
    Ed25519Kholaw,
}

/// Immutable, per-curve descriptor. One instance per variant, shared by
/// reference, never mutated — the scalar/point byte lengths and HMAC
/// seed key a BIP-32 master-key generator needs.
#[derive(Debug, Clone, Copy)]
pub struct CurveDescriptor {
    pub kind: CurveKind,
    pub name: &'static str,
    pub scalar_len: usize,
    pub compressed_point_len: usize,
    /// HMAC-SHA512 key used to derive the master key from a seed.
    pub master_seed_key: &'static [u8],
    /// Whether `ckdPub` is defined for this curve at all (pure SLIP-10
    /// ed25519 forbids public derivation entirely; hardened indices are
    /// separately forbidden for all curves regardless of this flag).
    pub supports_public_derivation: bool,
}

impl CurveKind {
    pub const fn descriptor(self) -> CurveDescriptor {
        match self {
            #[cfg(feature = "secp256k1")]
            CurveKind::Secp256k1 => CurveDescriptor {
                kind: self,
                name: "secp256k1",
                scalar_len: 32,
                compressed_point_len: 33,
                master_seed_key: b"Bitcoin seed",
                supports_public_derivation: true,
            },
            #[cfg(feature = "secp256r1")]
            CurveKind::Secp256r1 => CurveDescriptor {
                kind: self,
                name: "nist256p1",
                scalar_len: 32,
                compressed_point_len: 33,
                master_seed_key: b"Nist256p1 seed",
                supports_public_derivation: true,
            },
            #[cfg(feature = "ed25519")]
            CurveKind::Ed25519Slip10 => CurveDescriptor {
                kind: self,
                name: "ed25519",
                scalar_len: 32,
                compressed_point_len: 32,
                master_seed_key: b"ed25519 seed",
                supports_public_derivation: false,
            },
            #[cfg(feature = "ed25519")]
            CurveKind::Ed25519Kholaw => CurveDescriptor {
                kind: self,
                name: "ed25519-kholaw",
                scalar_len: 32,
                compressed_point_len: 32,
                master_seed_key: b"ed25519 cardano seed",
                supports_public_derivation: true,
            },
        }
    }
}
