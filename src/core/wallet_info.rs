use serde::{Deserialize, Serialize};

use crate::core::bip44::DerivationPath;

/// One derived account. Serialized with the camelCase field names used by
/// the `wallets` store key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub public_key: String,
    pub private_key: String,
    pub mnemonic: String,
    pub path: DerivationPath,
}

impl Wallet {
    pub fn account_index(&self) -> Option<u32> {
        self.path.account_index()
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("public_key", &self.public_key)
            .field("path", &self.path.to_string())
            .finish_non_exhaustive()
    }
}
