//! Per-chain constants: BIP-32 extended-key version bytes and address
//! version/prefix bytes. Kept as plain data tables rather than a
//! config-file format — there's no daemon here to reload config for,
//! just a closed set of networks callers pick by name.

/// The 4-byte version prefixes that open a serialized extended private
/// or public key (`xprv`/`xpub` and their per-chain analogues).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExtendedKeyVersions {
    pub private: [u8; 4],
    pub public: [u8; 4],
}

pub const BITCOIN_MAINNET: ExtendedKeyVersions = ExtendedKeyVersions {
    private: [0x04, 0x88, 0xAD, 0xE4],
    public: [0x04, 0x88, 0xB2, 0x1E],
};

pub const BITCOIN_TESTNET: ExtendedKeyVersions = ExtendedKeyVersions {
    private: [0x04, 0x35, 0x83, 0x94],
    public: [0x04, 0x35, 0x87, 0xCF],
};

/// Single-byte version used by Bitcoin-family P2PKH addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AddressVersion(pub u8);

pub const BITCOIN_P2PKH_MAINNET: AddressVersion = AddressVersion(0x00);
pub const BITCOIN_P2PKH_TESTNET: AddressVersion = AddressVersion(0x6F);

/// Monero's one-byte network prefixes (standard and integrated
/// addresses reuse the same prefix byte; subaddresses use a third,
/// out of scope here).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MoneroNetwork {
    pub standard: u8,
    pub integrated: u8,
}

pub const MONERO_MAINNET: MoneroNetwork = MoneroNetwork { standard: 18, integrated: 19 };
pub const MONERO_TESTNET: MoneroNetwork = MoneroNetwork { standard: 53, integrated: 54 };
