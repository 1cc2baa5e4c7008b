//! Chain-specific keypair construction and encoding
//!
//! - Solana: Ed25519 keypair, Base58 public key, Base58 64-byte secret
//!   (seed || public key, the layout `solana-keygen` writes)
//! - Ethereum: secp256k1 key, `0x` lowercase hex secret, EIP-55 address

use ed25519_dalek::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{FieldBytes, SecretKey};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use zeroize::Zeroizing;

use crate::core::domain::ChainType;
use crate::core::errors::WalletError;

/// Encoded keypair ready to be stored in a wallet record.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedKeypair {
    pub public_key: String,
    pub private_key: String,
}

impl std::fmt::Debug for EncodedKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedKeypair")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Build the keypair for `chain` from 32 bytes of derived key material.
pub fn from_derived_key(chain: ChainType, derived_key: &[u8; 32]) -> Result<EncodedKeypair, WalletError> {
    match chain {
        ChainType::Solana => Ok(solana_keypair(derived_key)),
        ChainType::Ethereum => ethereum_keypair(derived_key),
    }
}

fn solana_keypair(derived_key: &[u8; 32]) -> EncodedKeypair {
    let signing_key = SigningKey::from_bytes(derived_key);
    let public = signing_key.verifying_key().to_bytes();
    let secret = Zeroizing::new(signing_key.to_keypair_bytes());

    EncodedKeypair {
        public_key: bs58::encode(public).into_string(),
        private_key: bs58::encode(&secret[..]).into_string(),
    }
}

fn ethereum_keypair(derived_key: &[u8; 32]) -> Result<EncodedKeypair, WalletError> {
    let secret_key = SecretKey::from_bytes(FieldBytes::from_slice(derived_key))
        .map_err(|e| WalletError::KeyDerivation(format!("invalid secp256k1 key: {}", e)))?;
    let uncompressed = secret_key.public_key().to_encoded_point(false);

    // address = keccak256(X || Y)[12..]
    let hash = Keccak256::digest(&uncompressed.as_bytes()[1..]);
    let address = to_checksum_address(&hex::encode(&hash[12..]));
    debug_assert!(is_valid_checksum_address(&address));

    Ok(EncodedKeypair {
        public_key: address,
        private_key: format!("0x{}", hex::encode(derived_key)),
    })
}

/// Apply EIP-55 mixed-case checksum to 40 lowercase hex characters.
pub fn to_checksum_address(lower_hex: &str) -> String {
    let lower = lower_hex.trim_start_matches("0x").to_ascii_lowercase();
    let hash = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, ch) in lower.chars().enumerate() {
        let nibble = (hash[i / 2] >> (4 * (1 - (i % 2)))) & 0x0f;
        if ch.is_ascii_alphabetic() && nibble >= 8 {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// True when `address` is `0x` + 40 hex digits carrying a correct EIP-55 checksum.
pub fn is_valid_checksum_address(address: &str) -> bool {
    let Some(body) = address.strip_prefix("0x") else {
        return false;
    };
    if body.len() != 40 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }
    to_checksum_address(body) == address
}
