//! Chain address codecs. Each chain gets an `encode`/`decode` pair
//! rather than a shared trait object — the decoded shape differs too
//! much between a single hash160 (Bitcoin-family) and a spend/view key
//! pair plus an optional payment id (Monero) for a one-size trait to
//! be worth more than the match arms it would save.

#[cfg(feature = "secp256k1")]
pub mod bitcoin;

#[cfg(feature = "ed25519")]
pub mod monero;
