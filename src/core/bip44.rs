//! BIP44 paths and hierarchical key derivation
//!
//! Path format used by the wallet: m/44'/coin_type'/0'/account'
//!
//! Every segment is hardened. Two curve-specific derivations share the same
//! HMAC-SHA512 data layout `0x00 || key || ser32(index | 2^31)`:
//! - Solana (Ed25519): SLIP-0010, master secret "ed25519 seed", child key = IL
//! - Ethereum (secp256k1): BIP32, master secret "Bitcoin seed",
//!   child key = (IL + parent key) mod n
//!
//! Solana keys match Phantom/Solflare for the same phrase and path. The
//! simplified repeated-hash scheme is not supported and its wallets cannot be
//! recovered with this crate.

use std::fmt;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, Scalar};
use serde::{Deserialize, Serialize};
use sha2::Sha512;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::domain::ChainType;
use crate::core::errors::WalletError;

type HmacSha512 = Hmac<Sha512>;

pub const HARDENED_OFFSET: u32 = 0x8000_0000;
pub const PURPOSE: u32 = 44;

/// 32 bytes of derived private key material.
pub type DerivedKey = Zeroizing<[u8; 32]>;

/// Fully hardened derivation path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DerivationPath {
    /// Segment indices without the hardened bit
    segments: Vec<u32>,
}

impl DerivationPath {
    /// m/44'/coin_type'/0'/account'
    pub fn for_account(chain: ChainType, account: u32) -> Self {
        Self {
            segments: vec![PURPOSE, chain.coin_type(), 0, account],
        }
    }

    pub fn parse(path: &str) -> Result<Self, WalletError> {
        let rest = path
            .strip_prefix("m/")
            .ok_or_else(|| WalletError::InvalidPath(format!("path must start with 'm/': {}", path)))?;

        let mut segments = Vec::new();
        for segment in rest.split('/') {
            let digits = segment.strip_suffix('\'').ok_or_else(|| {
                WalletError::InvalidPath(format!("segment '{}' is not hardened", segment))
            })?;
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(WalletError::InvalidPath(format!(
                    "segment '{}' is not a non-negative integer",
                    segment
                )));
            }
            let index: u32 = digits.parse().map_err(|_| {
                WalletError::InvalidPath(format!("segment '{}' overflows u32", segment))
            })?;
            if index >= HARDENED_OFFSET {
                return Err(WalletError::InvalidPath(format!(
                    "segment '{}' exceeds the hardened index range",
                    segment
                )));
            }
            segments.push(index);
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[u32] {
        &self.segments
    }

    /// Indices with the hardened bit applied, as fed to the HMAC.
    pub fn hardened_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.segments.iter().map(|i| i | HARDENED_OFFSET)
    }

    fn is_wallet_path(&self) -> bool {
        self.segments.len() == 4 && self.segments[0] == PURPOSE && self.segments[2] == 0
    }

    /// Coin type of an m/44'/c'/0'/a' path.
    pub fn coin_type(&self) -> Option<u32> {
        self.is_wallet_path().then(|| self.segments[1])
    }

    /// Account index of an m/44'/c'/0'/a' path.
    pub fn account_index(&self) -> Option<u32> {
        self.is_wallet_path().then(|| self.segments[3])
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for index in &self.segments {
            write!(f, "/{}'", index)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DerivationPath {
    type Error = WalletError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DerivationPath> for String {
    fn from(path: DerivationPath) -> Self {
        path.to_string()
    }
}

/// Private key plus chain code at one node of the tree.
pub struct ExtendedKey {
    chain: ChainType,
    key: DerivedKey,
    chain_code: Zeroizing<[u8; 32]>,
}

impl ExtendedKey {
    /// Master node: HMAC-SHA512(curve secret, seed)
    pub fn master(chain: ChainType, seed: &[u8]) -> Result<Self, WalletError> {
        if seed.len() < 16 || seed.len() > 64 {
            return Err(WalletError::KeyDerivation(format!(
                "seed length must be 16..=64 bytes, got {}",
                seed.len()
            )));
        }

        let secret: &[u8] = match chain {
            ChainType::Solana => b"ed25519 seed",
            ChainType::Ethereum => b"Bitcoin seed",
        };
        let (key, chain_code) = hmac_split(secret, &[seed])?;

        if chain == ChainType::Ethereum {
            parse_scalar(&key)?;
        }

        Ok(Self {
            chain,
            key,
            chain_code,
        })
    }

    /// Hardened child `index'`; `index` must be below 2^31.
    pub fn derive_hardened(&self, index: u32) -> Result<Self, WalletError> {
        if index >= HARDENED_OFFSET {
            return Err(WalletError::InvalidPath(format!(
                "index {} exceeds the hardened index range",
                index
            )));
        }
        let ser_index = (index | HARDENED_OFFSET).to_be_bytes();
        let (il, chain_code) = hmac_split(
            &self.chain_code[..],
            &[&[0x00u8][..], &self.key[..], &ser_index[..]],
        )?;

        let key = match self.chain {
            ChainType::Solana => il,
            ChainType::Ethereum => {
                let child = parse_scalar(&il)? + parse_scalar(&self.key)?;
                if child == Scalar::ZERO {
                    return Err(WalletError::KeyDerivation(
                        "derived secp256k1 key is zero".to_string(),
                    ));
                }
                let mut out = Zeroizing::new([0u8; 32]);
                out.copy_from_slice(&child.to_repr());
                out
            }
        };

        Ok(Self {
            chain: self.chain,
            key,
            chain_code,
        })
    }

    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self, WalletError> {
        let mut segments = path.segments().iter();
        let first = segments
            .next()
            .ok_or_else(|| WalletError::InvalidPath("empty derivation path".to_string()))?;
        let mut current = self.derive_hardened(*first)?;
        for &index in segments {
            current = current.derive_hardened(index)?;
        }
        Ok(current)
    }

    pub fn private_key(&self) -> &[u8; 32] {
        &self.key
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    pub fn into_private_key(self) -> DerivedKey {
        self.key
    }
}

/// Derive the 32-byte key material for `chain` at `path` from a BIP39 seed.
pub fn derive(chain: ChainType, path: &DerivationPath, seed: &[u8]) -> Result<DerivedKey, WalletError> {
    debug!(chain = %chain, path = %path, "deriving key material");
    let master = ExtendedKey::master(chain, seed)?;
    Ok(master.derive_path(path)?.into_private_key())
}

fn hmac_split(key: &[u8], parts: &[&[u8]]) -> Result<(DerivedKey, Zeroizing<[u8; 32]>), WalletError> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| WalletError::KeyDerivation(format!("HMAC initialization failed: {}", e)))?;
    for part in parts {
        mac.update(part);
    }
    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&mac.finalize().into_bytes());

    let mut left = Zeroizing::new([0u8; 32]);
    let mut right = Zeroizing::new([0u8; 32]);
    left.copy_from_slice(&out[..32]);
    right.copy_from_slice(&out[32..]);
    Ok((left, right))
}

/// Parse 32 bytes as a non-zero scalar below the curve order.
fn parse_scalar(bytes: &[u8; 32]) -> Result<Scalar, WalletError> {
    let scalar: Option<Scalar> = Scalar::from_repr(*FieldBytes::from_slice(bytes)).into();
    match scalar {
        Some(s) if s != Scalar::ZERO => Ok(s),
        _ => Err(WalletError::KeyDerivation(
            "key material is not a valid secp256k1 scalar".to_string(),
        )),
    }
}
