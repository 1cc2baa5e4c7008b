//! Wallet collection management
//!
//! A `WalletCollection` is a plain value: the hosting layer owns it, passes it
//! into each operation and persists it. It holds one chain selection, one
//! mnemonic, the ordered wallets and a display flag per wallet.
//!
//! ## Module Structure
//! - `derivation` - mnemonic → seed → key → wallet pipeline
//! - `lifecycle` - choose chain, create first, add, delete, clear
//! - `visibility` - per-wallet private key display flags

pub mod derivation;
pub mod lifecycle;
pub mod visibility;

pub use derivation::{derive_wallet, derive_wallet_at};

use crate::core::{domain::ChainType, errors::WalletError, mnemonic::Mnemonic, wallet_info::Wallet};

/// Ordered set of wallets derived from a single mnemonic on a single chain.
///
/// Invariant: `visible.len() == wallets.len()`.
#[derive(Debug, Clone, Default)]
pub struct WalletCollection {
    chain: Option<ChainType>,
    mnemonic: Option<Mnemonic>,
    wallets: Vec<Wallet>,
    visible: Vec<bool>,
    /// Next account index to derive; never decreases until the collection is
    /// cleared or re-seeded.
    next_account: u32,
}

impl WalletCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a collection from persisted parts. All flags start hidden.
    ///
    /// The account counter resumes at the persisted `next_account` when one
    /// was stored, and never below one past the highest persisted index.
    pub fn restore(
        chain: ChainType,
        mnemonic: Mnemonic,
        wallets: Vec<Wallet>,
        next_account: Option<u32>,
    ) -> Self {
        let after_highest = wallets
            .iter()
            .filter_map(Wallet::account_index)
            .max()
            .map_or(0, |max| max.saturating_add(1));
        let next_account = next_account.map_or(after_highest, |n| n.max(after_highest));
        let visible = vec![false; wallets.len()];

        Self {
            chain: Some(chain),
            mnemonic: Some(mnemonic),
            wallets,
            visible,
            next_account,
        }
    }

    pub fn chain(&self) -> Option<ChainType> {
        self.chain
    }

    pub fn mnemonic(&self) -> Option<&Mnemonic> {
        self.mnemonic.as_ref()
    }

    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    pub fn wallet(&self, index: usize) -> Option<&Wallet> {
        self.wallets.get(index)
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    /// Account index the next `add_wallet` call will use.
    pub fn next_account_index(&self) -> u32 {
        self.next_account
    }

    fn check_index(&self, index: usize) -> Result<(), WalletError> {
        if index >= self.wallets.len() {
            return Err(WalletError::IndexOutOfRange {
                index,
                len: self.wallets.len(),
            });
        }
        Ok(())
    }
}
