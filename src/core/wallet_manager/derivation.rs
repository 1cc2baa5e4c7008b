//! Mnemonic → wallet pipeline
//!
//! seed (PBKDF2) → hardened path derivation → keypair encoding. Every step is
//! pure, so the same phrase, chain and index always give the same wallet.

use tracing::debug;

use crate::core::bip44::{self, DerivationPath};
use crate::core::domain::ChainType;
use crate::core::errors::WalletError;
use crate::core::keypair;
use crate::core::mnemonic::Mnemonic;
use crate::core::wallet_info::Wallet;

/// Derive the wallet for account `account` on `chain`.
pub fn derive_wallet(chain: ChainType, mnemonic: &Mnemonic, account: u32) -> Result<Wallet, WalletError> {
    derive_wallet_at(chain, mnemonic, &DerivationPath::for_account(chain, account))
}

/// Derive the wallet at an explicit path.
pub fn derive_wallet_at(
    chain: ChainType,
    mnemonic: &Mnemonic,
    path: &DerivationPath,
) -> Result<Wallet, WalletError> {
    let seed = mnemonic.to_seed();
    let key = bip44::derive(chain, path, &seed[..])?;
    let encoded = keypair::from_derived_key(chain, &key)?;

    debug!(chain = %chain, path = %path, public_key = %encoded.public_key, "derived wallet");

    Ok(Wallet {
        public_key: encoded.public_key,
        private_key: encoded.private_key,
        mnemonic: mnemonic.phrase().to_string(),
        path: path.clone(),
    })
}
