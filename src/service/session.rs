//! Hosting layer around a `WalletCollection`
//!
//! The session owns the collection and its collaborators. Mutations run on a
//! copy of the collection, the copy is persisted, and only then does it
//! replace the live state, so a failed derivation or a failed store write
//! leaves both memory and disk as they were. Each operation emits exactly one
//! notification.

use tracing::{info, warn};

use super::clipboard::Clipboard;
use super::notifier::{Notification, NotificationLevel, Notifier};
use crate::core::{
    config::AppConfig, domain::ChainType, errors::WalletError, wallet_info::Wallet,
    wallet_manager::WalletCollection,
};
use crate::storage::{snapshot, KeyValueStore};

pub struct WalletSession {
    collection: WalletCollection,
    store: Box<dyn KeyValueStore>,
    notifier: Box<dyn Notifier>,
    clipboard: Box<dyn Clipboard>,
    config: AppConfig,
}

impl WalletSession {
    /// Load the persisted snapshot. An unreadable snapshot is not fatal: it
    /// is discarded so later writes succeed, and the session starts empty
    /// with no chain chosen and emits a warning.
    pub fn open(
        mut store: Box<dyn KeyValueStore>,
        notifier: Box<dyn Notifier>,
        clipboard: Box<dyn Clipboard>,
        config: AppConfig,
    ) -> Self {
        let collection = match snapshot::load(store.as_ref()) {
            Ok(Some(collection)) => {
                notifier.notify(Notification::new(
                    NotificationLevel::Info,
                    format!("Loaded {} saved wallet(s)", collection.len()),
                ));
                collection
            }
            Ok(None) => {
                notifier.notify(Notification::new(NotificationLevel::Info, "No saved wallets found"));
                WalletCollection::new()
            }
            Err(e) => {
                warn!(error = %e, "saved wallets could not be loaded, starting empty");
                if let Err(discard_err) = snapshot::discard(store.as_mut()) {
                    warn!(error = %discard_err, "failed to discard unreadable snapshot");
                }
                notifier.notify(Notification::new(
                    NotificationLevel::Warning,
                    format!("Saved wallets could not be loaded: {}", e),
                ));
                WalletCollection::new()
            }
        };

        Self {
            collection,
            store,
            notifier,
            clipboard,
            config,
        }
    }

    pub fn collection(&self) -> &WalletCollection {
        &self.collection
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn choose_chain(&mut self, chain: ChainType) -> Result<(), WalletError> {
        self.mutate(|c| c.choose_chain(chain), |_| format!("{} selected", chain))
    }

    /// Blank `input` generates a phrase with the configured word count.
    pub fn create_first_wallet(&mut self, chain: ChainType, input: &str) -> Result<Wallet, WalletError> {
        let word_count = self.config.mnemonic.word_count;
        self.mutate(
            |c| c.create_first_wallet_with_word_count(chain, input, word_count),
            |w| format!("{} wallet created at {}", chain, w.path),
        )
    }

    pub fn add_wallet(&mut self) -> Result<Wallet, WalletError> {
        self.mutate(|c| c.add_wallet(), |w| format!("Wallet added at {}", w.path))
    }

    pub fn delete_wallet(&mut self, index: usize) -> Result<Wallet, WalletError> {
        self.mutate(
            |c| c.delete_wallet(index),
            |w| format!("Wallet {} deleted", w.path),
        )
    }

    pub fn clear_all(&mut self) -> Result<(), WalletError> {
        self.mutate(
            |c| {
                c.clear_all();
                Ok(())
            },
            |_| "All wallets cleared".to_string(),
        )
    }

    /// Display-only; nothing is persisted.
    pub fn toggle_visibility(&mut self, index: usize) -> Result<bool, WalletError> {
        let result = self.collection.toggle_visibility(index);
        self.report(&result, |shown| {
            if *shown {
                format!("Private key {} revealed", index)
            } else {
                format!("Private key {} hidden", index)
            }
        });
        result
    }

    pub fn display_private_key(&self, index: usize) -> Result<String, WalletError> {
        self.collection.display_private_key(index, self.config.display.mask)
    }

    pub fn copy_public_key(&mut self, index: usize) -> Result<(), WalletError> {
        let result = match self.collection.wallet(index) {
            Some(wallet) => self.clipboard.write_text(&wallet.public_key),
            None => Err(WalletError::IndexOutOfRange {
                index,
                len: self.collection.len(),
            }),
        };
        self.report(&result, |_| "Public key copied".to_string());
        result
    }

    /// Only a revealed private key can be copied.
    pub fn copy_private_key(&mut self, index: usize) -> Result<(), WalletError> {
        let result = match self.collection.revealed_private_key(index) {
            Ok(key) => self.clipboard.write_text(key),
            Err(e) => Err(e),
        };
        self.report(&result, |_| "Private key copied".to_string());
        result
    }

    pub fn copy_mnemonic(&mut self) -> Result<(), WalletError> {
        let result = match self.collection.mnemonic() {
            Some(mnemonic) => self.clipboard.write_text(mnemonic.phrase()),
            None => Err(WalletError::NoMnemonic),
        };
        self.report(&result, |_| "Recovery phrase copied".to_string());
        result
    }

    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut WalletCollection) -> Result<T, WalletError>,
        describe: impl FnOnce(&T) -> String,
    ) -> Result<T, WalletError> {
        let mut next = self.collection.clone();
        let result = op(&mut next).and_then(|value| {
            snapshot::save(&next, self.store.as_mut())?;
            Ok(value)
        });

        if result.is_ok() {
            self.collection = next;
            info!(wallets = self.collection.len(), "session state committed");
        }
        self.report(&result, describe);
        result
    }

    fn report<T>(&self, result: &Result<T, WalletError>, describe: impl FnOnce(&T) -> String) {
        let notification = match result {
            Ok(value) => Notification::new(NotificationLevel::Success, describe(value)),
            Err(e) => {
                if !e.is_user_error() {
                    warn!(kind = e.kind(), error = %e, "operation failed");
                }
                Notification::new(NotificationLevel::Error, e.to_string())
            }
        };
        self.notifier.notify(notification);
    }
}
