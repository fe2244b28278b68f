//! Curve-polymorphic HD key derivation, ECDSA signing, and address
//! codecs for secp256k1, NIST P-256, SLIP-10 ed25519, and Cardano's
//! extended ed25519 scheme.
//!
//! Module layout mirrors the dependency direction: [`hash`] and
//! [`curve`] are the primitives everything else is built from;
//! [`keys`] wraps curve output into chain-agnostic key types;
//! [`bip32`] and [`ecdsa`] consume those keys; [`codec`] and
//! [`address`] are the wire-format layer on top.

pub mod address;
pub mod bip32;
pub mod codec;
pub mod curve;
#[cfg(feature = "secp256k1")]
pub mod ecdsa;
pub mod error;
pub mod hash;
pub mod keys;
pub mod networks;

pub use curve::CurveKind;
pub use error::{KeyForgeError, Result};
