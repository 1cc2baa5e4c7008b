// tests/util.rs
// Shared test helpers for integration tests

#![allow(dead_code)]

use multichain_wallet::core::config::AppConfig;
use multichain_wallet::service::{MemoryClipboard, RecordingNotifier, WalletSession};
use multichain_wallet::storage::KeyValueStore;

pub const TEST_MNEMONIC: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

pub const TEST_MNEMONIC_24: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";

/// Session over `store` with recording collaborators. The returned handles
/// share state with the ones inside the session.
pub fn open_session(store: Box<dyn KeyValueStore>) -> (WalletSession, RecordingNotifier, MemoryClipboard) {
    let notifier = RecordingNotifier::new();
    let clipboard = MemoryClipboard::new();
    let session = WalletSession::open(
        store,
        Box::new(notifier.clone()),
        Box::new(clipboard.clone()),
        AppConfig::default(),
    );
    (session, notifier, clipboard)
}
