use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::errors::WalletError;

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file backing the key-value store
    #[serde(default = "StorageConfig::default_path")]
    pub path: PathBuf,
}

impl StorageConfig {
    fn default_path() -> PathBuf {
        PathBuf::from("./data/wallets.json")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
        }
    }
}

/// Mnemonic generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MnemonicConfig {
    /// Words in generated phrases (12 or 24)
    #[serde(default = "MnemonicConfig::default_word_count")]
    pub word_count: usize,
}

impl MnemonicConfig {
    fn default_word_count() -> usize { 12 }
}

impl Default for MnemonicConfig {
    fn default() -> Self {
        Self {
            word_count: Self::default_word_count(),
        }
    }
}

/// Display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Character used to mask hidden private keys
    #[serde(default = "DisplayConfig::default_mask")]
    pub mask: char,
}

impl DisplayConfig {
    fn default_mask() -> char { crate::core::wallet_manager::visibility::DEFAULT_MASK }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mask: Self::default_mask(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub mnemonic: MnemonicConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, WalletError> {
        let config: AppConfig = toml::from_str(content)
            .map_err(|e| WalletError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, WalletError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::from_toml_str(&content)?;
                info!(path = %path.display(), "loaded configuration");
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(WalletError::Config(format!("{}: {}", path.display(), e))),
        }
    }

    /// `$CONFIG_PATH` (default `wallet.toml`), then `$WALLET_STORE_PATH`
    /// overrides the storage path.
    pub fn from_env() -> Result<Self, WalletError> {
        let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "wallet.toml".to_string());
        let mut config = Self::load(Path::new(&config_path))?;
        if let Ok(store) = std::env::var("WALLET_STORE_PATH") {
            config.storage.path = PathBuf::from(store);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), WalletError> {
        if self.mnemonic.word_count != 12 && self.mnemonic.word_count != 24 {
            return Err(WalletError::Config(format!(
                "word_count must be 12 or 24, got {}",
                self.mnemonic.word_count
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.mnemonic.word_count, 12);
        assert_eq!(config.storage.path, PathBuf::from("./data/wallets.json"));
        assert_eq!(config.display.mask, '•');
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = AppConfig::from_toml_str("[mnemonic]\nword_count = 24\n").unwrap();
        assert_eq!(config.mnemonic.word_count, 24);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_rejects_bad_word_count() {
        assert!(AppConfig::from_toml_str("[mnemonic]\nword_count = 13\n").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.toml");
        std::fs::write(&path, "[storage]\npath = \"/tmp/w.json\"\n[display]\nmask = \"*\"\n").unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.storage.path, PathBuf::from("/tmp/w.json"));
        assert_eq!(config.display.mask, '*');
    }
}
