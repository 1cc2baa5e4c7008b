// src/lib.rs

pub mod cli;
pub mod core;
pub mod service;
pub mod storage;

pub use crate::core::{ChainType, Wallet, WalletCollection, WalletError};
pub use crate::service::WalletSession;
