//! Private key display flags
//!
//! A presentation concern only: the wallet record always carries the
//! plaintext private key in memory, and the flag merely chooses what a
//! caller gets to render.

use super::WalletCollection;
use crate::core::errors::WalletError;

pub const DEFAULT_MASK: char = '•';

impl WalletCollection {
    /// Flip the display flag of wallet `index`; returns the new state.
    pub fn toggle_visibility(&mut self, index: usize) -> Result<bool, WalletError> {
        self.check_index(index)?;
        let flag = &mut self.visible[index];
        *flag = !*flag;
        Ok(*flag)
    }

    pub fn is_revealed(&self, index: usize) -> Result<bool, WalletError> {
        self.check_index(index)?;
        Ok(self.visible[index])
    }

    /// Private key text for display: plaintext when revealed, otherwise
    /// `mask` repeated to the key's length.
    pub fn display_private_key(&self, index: usize, mask: char) -> Result<String, WalletError> {
        self.check_index(index)?;
        let key = &self.wallets[index].private_key;
        if self.visible[index] {
            Ok(key.clone())
        } else {
            Ok(std::iter::repeat(mask).take(key.chars().count()).collect())
        }
    }

    /// Plaintext private key, only while revealed.
    pub fn revealed_private_key(&self, index: usize) -> Result<&str, WalletError> {
        self.check_index(index)?;
        if !self.visible[index] {
            return Err(WalletError::PrivateKeyHidden(index));
        }
        Ok(&self.wallets[index].private_key)
    }
}
