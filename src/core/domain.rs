use std::fmt;
use std::str::FromStr;

use crate::core::errors::WalletError;

/// Chain families supported by the wallet. Every match over this enum is
/// exhaustive, so adding a chain forces the deriver and the keypair factory
/// to be updated together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainType {
    /// Ed25519 keys, Base58 encoding
    Solana,
    /// secp256k1 keys, EIP-55 addresses
    Ethereum,
}

impl ChainType {
    pub const ALL: [ChainType; 2] = [ChainType::Solana, ChainType::Ethereum];

    /// SLIP-44 coin type used in the second path segment.
    pub fn coin_type(self) -> u32 {
        match self {
            ChainType::Solana => 501,
            ChainType::Ethereum => 60,
        }
    }

    /// Code persisted under the `paths` key.
    pub fn code(self) -> String {
        self.coin_type().to_string()
    }

    /// Parse a persisted chain code (`"501"` or `"60"`).
    pub fn from_code(code: &str) -> Result<Self, WalletError> {
        match code.trim() {
            "501" => Ok(ChainType::Solana),
            "60" => Ok(ChainType::Ethereum),
            other => Err(WalletError::UnsupportedChain(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChainType::Solana => "Solana",
            ChainType::Ethereum => "Ethereum",
        }
    }
}

impl fmt::Display for ChainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts chain names, tickers and coin-type codes, case-insensitively.
impl FromStr for ChainType {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solana" | "sol" | "501" => Ok(ChainType::Solana),
            "ethereum" | "eth" | "60" => Ok(ChainType::Ethereum),
            other => Err(WalletError::UnsupportedChain(other.to_string())),
        }
    }
}
