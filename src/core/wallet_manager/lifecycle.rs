//! Wallet lifecycle management
//!
//! Every operation derives first and mutates last, so a failed call leaves
//! the collection exactly as it was.

use tracing::info;

use super::{derive_wallet, WalletCollection};
use crate::core::{
    domain::ChainType, errors::WalletError, mnemonic::Mnemonic, wallet_info::Wallet,
};

impl WalletCollection {
    /// Select the chain for this collection.
    ///
    /// Re-selecting the active chain is a no-op. Switching is only possible
    /// while no wallets exist, and restarts account numbering at 0.
    pub fn choose_chain(&mut self, chain: ChainType) -> Result<(), WalletError> {
        match self.chain {
            Some(current) if current == chain => Ok(()),
            Some(current) if !self.wallets.is_empty() => Err(WalletError::ChainLocked {
                locked: current.to_string(),
                requested: chain.to_string(),
            }),
            _ => {
                info!(chain = %chain, "chain selected");
                self.chain = Some(chain);
                self.next_account = 0;
                Ok(())
            }
        }
    }

    /// Create account 0 from `input`, or from a fresh 12-word phrase when
    /// `input` is blank.
    pub fn create_first_wallet(&mut self, chain: ChainType, input: &str) -> Result<Wallet, WalletError> {
        self.create_first_wallet_with_word_count(chain, input, 12)
    }

    /// As `create_first_wallet`, with the word count used when generating.
    pub fn create_first_wallet_with_word_count(
        &mut self,
        chain: ChainType,
        input: &str,
        word_count: usize,
    ) -> Result<Wallet, WalletError> {
        if !self.wallets.is_empty() {
            return Err(WalletError::AlreadyInitialized(self.wallets.len()));
        }

        let input = input.trim();
        let (mnemonic, imported) = if input.is_empty() {
            (Mnemonic::generate_with_word_count(word_count)?, false)
        } else {
            (Mnemonic::parse(input)?, true)
        };
        let wallet = derive_wallet(chain, &mnemonic, 0)?;

        self.chain = Some(chain);
        self.mnemonic = Some(mnemonic);
        self.wallets.push(wallet.clone());
        self.visible.push(false);
        self.next_account = 1;

        info!(chain = %chain, imported, path = %wallet.path, "first wallet created");
        Ok(wallet)
    }

    /// Derive the next account from the established mnemonic.
    pub fn add_wallet(&mut self) -> Result<Wallet, WalletError> {
        let mnemonic = self.mnemonic.as_ref().ok_or(WalletError::NoMnemonic)?;
        let chain = self.chain.ok_or(WalletError::NoChainSelected)?;

        let account = self.next_account;
        let wallet = derive_wallet(chain, mnemonic, account)?;

        self.wallets.push(wallet.clone());
        self.visible.push(false);
        self.next_account = account + 1;

        info!(chain = %chain, account, "wallet added");
        Ok(wallet)
    }

    /// Remove the wallet at `index`. Later wallets shift down in the list but
    /// keep their derived keys and paths; the removed account index is
    /// never handed out again.
    pub fn delete_wallet(&mut self, index: usize) -> Result<Wallet, WalletError> {
        self.check_index(index)?;
        self.visible.remove(index);
        let removed = self.wallets.remove(index);
        info!(index, path = %removed.path, remaining = self.wallets.len(), "wallet deleted");
        Ok(removed)
    }

    /// Forget everything: wallets, mnemonic and chain selection.
    pub fn clear_all(&mut self) {
        let count = self.wallets.len();
        *self = Self::default();
        info!(count, "wallet collection cleared");
    }
}
