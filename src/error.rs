use thiserror::Error;

/// Structured failure taxonomy for the curve, key, derivation, and
/// address-codec subsystems. Every public function returns one of these
/// instead of panicking, except for the documented self-verify guard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyForgeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("checksum mismatch")]
    ChecksumError,

    #[error("unexpected network version prefix")]
    InvalidPrefix,

    #[error("invalid payload length")]
    InvalidLength,

    #[error("malformed address payload: {0}")]
    InvalidPayload(String),

    #[error("payment id does not match embedded value")]
    InvalidPaymentId,

    #[error("derivation error: {0}")]
    DerivationError(String),

    #[error("invalid extended key: {0}")]
    InvalidExtendedKey(String),

    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    /// Self-verification of a freshly produced signature failed. This
    /// indicates a bug in the signing implementation, not bad input, and
    /// is the one variant callers should treat as fatal rather than retry.
    #[error("signature self-verification failed after signing — implementation bug")]
    SignatureVerificationFailed,
}

pub type Result<T> = std::result::Result<T, KeyForgeError>;
