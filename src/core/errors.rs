use thiserror::Error;

/// Error type shared by every wallet operation.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Bad checksum, unknown word, or wrong word count.
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// Malformed derivation path string.
    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),

    /// Chain code outside the supported set.
    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),

    /// `add_wallet` called before a mnemonic was established.
    #[error("No mnemonic established; create the first wallet before adding more")]
    NoMnemonic,

    /// No chain type has been chosen for the collection.
    #[error("No chain selected")]
    NoChainSelected,

    /// The collection already holds wallets.
    #[error("Collection already initialized with {0} wallet(s)")]
    AlreadyInitialized(usize),

    /// Existing wallets pin the collection to another chain.
    #[error("Collection is locked to {locked}, cannot switch to {requested}")]
    ChainLocked { locked: String, requested: String },

    #[error("Wallet index {index} out of range (collection holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Copying a private key that is currently masked.
    #[error("Private key of wallet {0} is hidden; reveal it first")]
    PrivateKeyHidden(usize),

    /// Derived material rejected by the curve (e.g. scalar out of range).
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Key-value store read/write failed or held unparsable JSON.
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WalletError {
    /// Short stable identifier for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            WalletError::InvalidMnemonic(_) => "InvalidMnemonic",
            WalletError::InvalidPath(_) => "InvalidPath",
            WalletError::UnsupportedChain(_) => "UnsupportedChain",
            WalletError::NoMnemonic => "NoMnemonic",
            WalletError::NoChainSelected => "NoChainSelected",
            WalletError::AlreadyInitialized(_) => "AlreadyInitialized",
            WalletError::ChainLocked { .. } => "ChainLocked",
            WalletError::IndexOutOfRange { .. } => "IndexOutOfRange",
            WalletError::PrivateKeyHidden(_) => "PrivateKeyHidden",
            WalletError::KeyDerivation(_) => "KeyDerivation",
            WalletError::PersistenceFailure(_) => "PersistenceFailure",
            WalletError::Clipboard(_) => "Clipboard",
            WalletError::Config(_) => "Config",
        }
    }

    /// Errors caused by caller input rather than by the environment.
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            WalletError::PersistenceFailure(_)
                | WalletError::KeyDerivation(_)
                | WalletError::Clipboard(_)
                | WalletError::Config(_)
        )
    }
}

impl From<std::io::Error> for WalletError {
    fn from(err: std::io::Error) -> Self {
        WalletError::PersistenceFailure(err.to_string())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::PersistenceFailure(err.to_string())
    }
}
