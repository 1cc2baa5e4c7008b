use bip39::Language;
use multichain_wallet::core::mnemonic::Mnemonic;
use proptest::prelude::*;
use sha2::{Digest, Sha256};

/// Recompute the BIP39 checksum bits from the word indices.
fn checksum_holds(words: &[&str]) -> bool {
    let list = Language::English.word_list();
    let mut bits = Vec::with_capacity(words.len() * 11);
    for word in words {
        let index = list.iter().position(|w| w == word).unwrap();
        for shift in (0..11).rev() {
            bits.push((index >> shift) & 1 == 1);
        }
    }

    let entropy_bits = bits.len() * 32 / 33;
    let mut entropy = vec![0u8; entropy_bits / 8];
    for (i, bit) in bits[..entropy_bits].iter().enumerate() {
        if *bit {
            entropy[i / 8] |= 0x80 >> (i % 8);
        }
    }

    let hash = Sha256::digest(&entropy);
    bits[entropy_bits..]
        .iter()
        .enumerate()
        .all(|(i, bit)| ((hash[i / 8] >> (7 - i % 8)) & 1 == 1) == *bit)
}

fn entropy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        proptest::collection::vec(any::<u8>(), 16),
        proptest::collection::vec(any::<u8>(), 32),
    ]
}

proptest! {
    #[test]
    fn single_word_swap_is_rejected_when_checksum_breaks(
        entropy in entropy(),
        position in 0usize..24,
        replacement in 0usize..2048,
    ) {
        let phrase = bip39::Mnemonic::from_entropy_in(Language::English, &entropy)
            .unwrap()
            .to_string();
        prop_assert!(Mnemonic::validate(&phrase));

        let mut words: Vec<&str> = phrase.split(' ').collect();
        let position = position % words.len();
        let new_word = Language::English.word_list()[replacement];
        prop_assume!(words[position] != new_word);
        words[position] = new_word;

        let mutated = words.join(" ");
        prop_assert_eq!(Mnemonic::validate(&mutated), checksum_holds(&words));
        if !checksum_holds(&words) {
            prop_assert!(Mnemonic::parse(&mutated).is_err());
        }
    }
}
