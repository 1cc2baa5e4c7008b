//! Collection snapshot codec
//!
//! Three keys carry the whole state:
//! - `wallets`   JSON array of wallet records
//! - `mnemonics` JSON array of the phrase's words
//! - `paths`     JSON array holding the chain code (`"501"` / `"60"`),
//!   followed by the next account index to hand out
//!
//! A `paths` array with only the chain code is still accepted; the account
//! counter then resumes one past the highest stored account.
//!
//! A snapshot is only loaded when all three keys are present; any subset is
//! treated as "no saved state".

use tracing::{debug, info, warn};

use super::KeyValueStore;
use crate::core::{
    domain::ChainType, errors::WalletError, mnemonic::Mnemonic, wallet_info::Wallet,
    wallet_manager::WalletCollection,
};

pub const WALLETS_KEY: &str = "wallets";
pub const MNEMONICS_KEY: &str = "mnemonics";
pub const PATHS_KEY: &str = "paths";

const KEYS: [&str; 3] = [WALLETS_KEY, MNEMONICS_KEY, PATHS_KEY];

/// Write `collection` to `store`. If any write fails, the previous values of
/// all three keys are put back before the error is returned.
pub fn save(collection: &WalletCollection, store: &mut dyn KeyValueStore) -> Result<(), WalletError> {
    let mut previous = Vec::with_capacity(KEYS.len());
    for key in KEYS {
        previous.push((key, store.get(key)?));
    }

    if let Err(e) = write(collection, store) {
        warn!(error = %e, "snapshot write failed, restoring previous state");
        for (key, value) in previous {
            let restored = match value {
                Some(v) => store.set(key, &v),
                None => store.remove(key),
            };
            if let Err(restore_err) = restored {
                warn!(key, error = %restore_err, "failed to restore key");
            }
        }
        return Err(e);
    }

    debug!(wallets = collection.len(), "snapshot saved");
    Ok(())
}

fn write(collection: &WalletCollection, store: &mut dyn KeyValueStore) -> Result<(), WalletError> {
    match collection.mnemonic() {
        Some(mnemonic) => {
            store.set(WALLETS_KEY, &serde_json::to_string(collection.wallets())?)?;
            store.set(MNEMONICS_KEY, &serde_json::to_string(&mnemonic.words())?)?;
        }
        None => {
            store.remove(WALLETS_KEY)?;
            store.remove(MNEMONICS_KEY)?;
        }
    }

    match collection.chain() {
        Some(chain) => {
            let paths = [chain.code(), collection.next_account_index().to_string()];
            store.set(PATHS_KEY, &serde_json::to_string(&paths)?)
        }
        None => store.remove(PATHS_KEY),
    }
}

/// Remove everything stored under the snapshot keys.
pub fn discard(store: &mut dyn KeyValueStore) -> Result<(), WalletError> {
    for key in KEYS {
        store.remove(key)?;
    }
    warn!("stored snapshot discarded");
    Ok(())
}

/// Read a snapshot. `Ok(None)` when no complete snapshot exists.
pub fn load(store: &dyn KeyValueStore) -> Result<Option<WalletCollection>, WalletError> {
    let (Some(wallets_json), Some(mnemonics_json), Some(paths_json)) = (
        store.get(WALLETS_KEY)?,
        store.get(MNEMONICS_KEY)?,
        store.get(PATHS_KEY)?,
    ) else {
        debug!("no complete snapshot in store");
        return Ok(None);
    };

    let codes: Vec<String> = serde_json::from_str(&paths_json)?;
    let code = codes
        .first()
        .ok_or_else(|| WalletError::PersistenceFailure("no chain code stored".to_string()))?;
    let chain = ChainType::from_code(code)?;
    let next_account = codes
        .get(1)
        .map(|n| {
            n.parse::<u32>().map_err(|_| {
                WalletError::PersistenceFailure(format!("invalid stored account counter '{}'", n))
            })
        })
        .transpose()?;

    let words: Vec<String> = serde_json::from_str(&mnemonics_json)?;
    let mnemonic = Mnemonic::from_words(&words)
        .map_err(|e| WalletError::PersistenceFailure(format!("stored mnemonic rejected: {}", e)))?;

    let wallets: Vec<Wallet> = serde_json::from_str(&wallets_json)?;
    for wallet in &wallets {
        if wallet.path.coin_type() != Some(chain.coin_type()) {
            return Err(WalletError::PersistenceFailure(format!(
                "wallet path {} does not belong to {}",
                wallet.path, chain
            )));
        }
        if wallet.mnemonic != mnemonic.phrase() {
            warn!(path = %wallet.path, "stored wallet carries a different mnemonic");
        }
    }

    info!(chain = %chain, wallets = wallets.len(), "snapshot loaded");
    Ok(Some(WalletCollection::restore(chain, mnemonic, wallets, next_account)))
}
