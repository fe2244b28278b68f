//! Address and extended-key wire encodings.

pub mod base58check;

#[cfg(feature = "ed25519")]
pub mod base58_monero;
