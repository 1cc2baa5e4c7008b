pub mod bip44;
pub mod config;
pub mod domain;
pub mod errors;
pub mod keypair;
pub mod mnemonic;
pub mod wallet_info;
pub mod wallet_manager;

// Re-export the main types
pub use domain::ChainType;
pub use errors::WalletError;
pub use wallet_info::Wallet;
pub use wallet_manager::WalletCollection;
