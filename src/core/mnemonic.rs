//! BIP39 mnemonic handling
//!
//! Phrases are restricted to the English wordlist and to 12 or 24 words.
//! Seeds are produced with PBKDF2-HMAC-SHA512 (2048 rounds, salt "mnemonic")
//! and no passphrase, which matches `bip39::Mnemonic::to_seed("")`.

use std::fmt;

use bip39::Language;
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::core::errors::WalletError;

pub const SEED_LEN: usize = 64;
const PBKDF2_ROUNDS: u32 = 2048;
const SEED_SALT: &[u8] = b"mnemonic";

/// 64-byte BIP39 seed, zeroed on drop.
pub type Seed = Zeroizing<[u8; SEED_LEN]>;

/// A validated recovery phrase.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    phrase: Zeroizing<String>,
}

impl Mnemonic {
    /// Fresh 12-word phrase from OS randomness.
    pub fn generate() -> Result<Self, WalletError> {
        Self::generate_with_word_count(12)
    }

    pub fn generate_with_word_count(word_count: usize) -> Result<Self, WalletError> {
        let entropy_len = match word_count {
            12 => 16,
            24 => 32,
            other => {
                return Err(WalletError::InvalidMnemonic(format!(
                    "word count must be 12 or 24, got {}",
                    other
                )))
            }
        };

        let mut entropy = Zeroizing::new([0u8; 32]);
        OsRng.fill_bytes(&mut entropy[..entropy_len]);
        let mnemonic = bip39::Mnemonic::from_entropy_in(Language::English, &entropy[..entropy_len])
            .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;

        Ok(Self {
            phrase: Zeroizing::new(mnemonic.to_string()),
        })
    }

    /// Parse a phrase whose words are separated by single spaces.
    pub fn parse(input: &str) -> Result<Self, WalletError> {
        let words: Vec<&str> = input.split(' ').collect();
        if words.iter().any(|w| w.is_empty()) {
            return Err(WalletError::InvalidMnemonic(
                "words must be separated by single spaces".to_string(),
            ));
        }
        if words.len() != 12 && words.len() != 24 {
            return Err(WalletError::InvalidMnemonic(format!(
                "expected 12 or 24 words, got {}",
                words.len()
            )));
        }

        bip39::Mnemonic::parse_in_normalized(Language::English, input)
            .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;

        Ok(Self {
            phrase: Zeroizing::new(input.to_string()),
        })
    }

    /// Rebuild a phrase from its persisted word list.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Result<Self, WalletError> {
        let joined = Zeroizing::new(
            words
                .iter()
                .map(|w| w.as_ref())
                .collect::<Vec<_>>()
                .join(" "),
        );
        Self::parse(&joined)
    }

    pub fn validate(input: &str) -> bool {
        Self::parse(input).is_ok()
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn words(&self) -> Vec<&str> {
        self.phrase.split(' ').collect()
    }

    pub fn word_count(&self) -> usize {
        self.phrase.split(' ').count()
    }

    pub fn to_seed(&self) -> Seed {
        let mut seed = Zeroizing::new([0u8; SEED_LEN]);
        pbkdf2_hmac::<Sha512>(
            self.phrase.as_bytes(),
            SEED_SALT,
            PBKDF2_ROUNDS,
            &mut seed[..],
        );
        seed
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("words", &self.word_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_generate_is_valid_12_words() {
        let m = Mnemonic::generate().unwrap();
        assert_eq!(m.word_count(), 12);
        assert!(Mnemonic::validate(m.phrase()));
    }

    #[test]
    fn test_generate_24_words() {
        let m = Mnemonic::generate_with_word_count(24).unwrap();
        assert_eq!(m.word_count(), 24);
        assert!(Mnemonic::validate(m.phrase()));
    }

    #[test]
    fn test_generate_rejects_other_counts() {
        assert!(Mnemonic::generate_with_word_count(15).is_err());
    }

    #[test]
    fn test_generate_is_random() {
        let a = Mnemonic::generate().unwrap();
        let b = Mnemonic::generate().unwrap();
        assert_ne!(a.phrase(), b.phrase());
    }

    #[test]
    fn test_known_seed_vector() {
        let m = Mnemonic::parse(TEST_MNEMONIC).unwrap();
        assert_eq!(
            hex::encode(&m.to_seed()[..]),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn test_seed_matches_bip39_crate() {
        let m = Mnemonic::generate().unwrap();
        let reference = bip39::Mnemonic::parse(m.phrase()).unwrap().to_seed("");
        assert_eq!(&m.to_seed()[..], &reference[..]);
    }

    #[test_case("abandon abandon abandon" ; "too few words")]
    #[test_case("abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon" ; "bad checksum")]
    #[test_case("abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon notaword" ; "unknown word")]
    #[test_case("abandon  abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about" ; "double space")]
    #[test_case("" ; "empty")]
    fn test_invalid_phrases(input: &str) {
        assert!(!Mnemonic::validate(input));
        assert!(matches!(
            Mnemonic::parse(input),
            Err(WalletError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn test_from_words() {
        let words: Vec<String> = TEST_MNEMONIC.split(' ').map(String::from).collect();
        let m = Mnemonic::from_words(&words).unwrap();
        assert_eq!(m.phrase(), TEST_MNEMONIC);
        assert_eq!(m.words().len(), 12);
    }

    #[test]
    fn test_debug_does_not_leak_words() {
        let m = Mnemonic::parse(TEST_MNEMONIC).unwrap();
        let dbg = format!("{:?}", m);
        assert!(!dbg.contains("abandon"));
    }
}
