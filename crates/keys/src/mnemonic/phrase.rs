//! 24-word mnemonic phrases

use super::error::MnemonicError;
use crate::error::{Error, Result};
use bip39::Language;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Number of words in a mnemonic.
pub const MNEMONIC_WORDS: usize = 24;

/// Entropy bytes encoded by a 24-word phrase.
const ENTROPY_BYTES: usize = 32;

/// Shortest unambiguous word prefix accepted from user input.
const PREFIX_LEN: usize = 4;

/// A 24-word BIP-39 mnemonic in canonical full-lowercase form.
///
/// Construction goes through [`Mnemonic::parse`] or [`Mnemonic::generate`],
/// both of which resolve abbreviated words against the English wordlist, so
/// a value of this type always holds full wordlist entries. Word order is
/// significant. The words are wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic {
    words: Vec<String>,
}

impl Mnemonic {
    /// Parse a whitespace-separated 24-word phrase.
    ///
    /// Each token may be a full wordlist entry or an abbreviation of at
    /// least four letters (the full word when it is shorter than four).
    /// Matching is case-insensitive.
    ///
    /// The BIP-39 checksum is enforced only when every word was typed in
    /// full. Abbreviated input is expanded and accepted even when the
    /// checksum fails, so a restore is never refused over a phrase the
    /// operator can only have obtained from this tool; the mismatch is
    /// reported at debug level.
    pub fn parse(input: &str) -> Result<Self, MnemonicError> {
        let tokens: Vec<&str> = input.split_ascii_whitespace().collect();
        if tokens.len() != MNEMONIC_WORDS {
            return Err(MnemonicError::WordCount { expected: MNEMONIC_WORDS, found: tokens.len() });
        }

        let mut words = Vec::with_capacity(MNEMONIC_WORDS);
        let mut abbreviated = false;
        for token in tokens {
            let full = resolve_word(token)?;
            if !token.eq_ignore_ascii_case(full) {
                abbreviated = true;
            }
            words.push(full.to_string());
        }

        let mnemonic = Self { words };
        if let Err(err) = mnemonic.validate_checksum() {
            if abbreviated {
                tracing::debug!("accepting abbreviated mnemonic despite checksum mismatch");
            } else {
                return Err(err);
            }
        }
        Ok(mnemonic)
    }

    /// Generate a random mnemonic from 256 bits of OS entropy.
    pub fn generate() -> Result<Self> {
        let mut entropy = Zeroizing::new([0u8; ENTROPY_BYTES]);
        OsRng.fill_bytes(entropy.as_mut());

        let encoded = bip39::Mnemonic::from_entropy_in(Language::English, entropy.as_ref())
            .map_err(|e| Error::Internal(format!("BIP-39 encoding failed: {e}")))?;
        let phrase = Zeroizing::new(encoded.to_string());

        Ok(Self::parse(&phrase)?)
    }

    /// Re-resolve every word against the wordlist.
    ///
    /// Idempotent: values produced by [`parse`](Self::parse) are already
    /// canonical and pass through unchanged.
    pub fn normalize(&self) -> Result<Self, MnemonicError> {
        let mut words = Vec::with_capacity(MNEMONIC_WORDS);
        for word in &self.words {
            words.push(resolve_word(word)?.to_string());
        }
        Ok(Self { words })
    }

    /// The words, uppercased and truncated to their first four letters.
    /// Display only.
    pub fn short_form(&self) -> Vec<String> {
        self.words.iter().map(|word| word.chars().take(PREFIX_LEN).collect::<String>().to_uppercase()).collect()
    }

    /// The canonical words, in order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Space-joined full lowercase phrase.
    ///
    /// The returned string holds key-equivalent material; callers should
    /// wrap it in [`Zeroizing`] unless it is about to be displayed.
    pub fn phrase(&self) -> String {
        self.words.join(" ")
    }

    fn validate_checksum(&self) -> Result<(), MnemonicError> {
        let phrase = Zeroizing::new(self.phrase());
        match bip39::Mnemonic::parse_in_normalized(Language::English, &phrase) {
            Ok(_) => Ok(()),
            Err(_) => Err(MnemonicError::Checksum),
        }
    }
}

impl std::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(word)?;
        }
        Ok(())
    }
}

// Custom Debug so the phrase never leaks through logs or error chains.
impl std::fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mnemonic").field("words", &"[REDACTED]").finish()
    }
}

/// Resolve a single token to its full wordlist entry.
///
/// Tokens of four or more letters match by prefix (unique per BIP-39);
/// shorter tokens must match a wordlist entry exactly.
fn resolve_word(token: &str) -> Result<&'static str, MnemonicError> {
    let needle = token.to_lowercase();
    let matches = Language::English.words_by_prefix(&needle);
    let resolved = if needle.chars().count() >= PREFIX_LEN {
        matches.first().copied()
    } else {
        matches.iter().copied().find(|word| *word == needle)
    };
    resolved.ok_or_else(|| MnemonicError::UnknownWord(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Valid phrase for all-zero entropy (checksum word "art").
    const TEST_PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon \
                               abandon abandon abandon abandon abandon abandon abandon abandon \
                               abandon abandon abandon abandon abandon abandon abandon art";

    #[test]
    fn test_parse_full_phrase() {
        let mnemonic = Mnemonic::parse(TEST_PHRASE).unwrap();
        assert_eq!(mnemonic.words().len(), MNEMONIC_WORDS);
        assert_eq!(mnemonic.words()[0], "abandon");
        assert_eq!(mnemonic.words()[23], "art");
    }

    #[test]
    fn test_display_round_trips() {
        let mnemonic = Mnemonic::parse(TEST_PHRASE).unwrap();
        let reparsed = Mnemonic::parse(&mnemonic.to_string()).unwrap();
        assert_eq!(mnemonic, reparsed);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mnemonic = Mnemonic::parse(TEST_PHRASE).unwrap();
        let normalized = mnemonic.normalize().unwrap();
        assert_eq!(normalized, mnemonic);
        assert_eq!(normalized.normalize().unwrap(), mnemonic);
    }

    #[test]
    fn test_short_form_parses_back() {
        let mnemonic = Mnemonic::parse(TEST_PHRASE).unwrap();
        let short = mnemonic.short_form().join(" ");
        assert!(short.starts_with("ABAN ABAN"));

        let restored = Mnemonic::parse(&short).unwrap();
        assert_eq!(restored, mnemonic);
    }

    #[test]
    fn test_mixed_case_and_whitespace() {
        let noisy = format!("  {}  ", TEST_PHRASE.to_uppercase());
        let mnemonic = Mnemonic::parse(&noisy).unwrap();
        assert_eq!(mnemonic.words()[23], "art");
    }

    #[test]
    fn test_short_word_requires_exact_match() {
        // "act" is itself a wordlist entry; three letters resolve exactly.
        let phrase = TEST_PHRASE.replace("art", "act");
        let mnemonic = Mnemonic::parse(&phrase.replace("abandon", "aban")).unwrap();
        assert_eq!(mnemonic.words()[23], "act");

        // "ac" is a prefix of many words but not a word, so it is rejected.
        let bad = TEST_PHRASE.replace("art", "ac");
        assert_eq!(
            Mnemonic::parse(&bad).unwrap_err(),
            MnemonicError::UnknownWord("ac".to_string())
        );
    }

    #[test]
    fn test_unknown_word() {
        let bad = TEST_PHRASE.replace("art", "zzzz");
        assert_eq!(
            Mnemonic::parse(&bad).unwrap_err(),
            MnemonicError::UnknownWord("zzzz".to_string())
        );
    }

    #[test]
    fn test_word_count() {
        assert_eq!(
            Mnemonic::parse("abandon ability").unwrap_err(),
            MnemonicError::WordCount { expected: 24, found: 2 }
        );
    }

    #[test]
    fn test_checksum_enforced_for_full_words() {
        // 24 full copies of "abandon" is word-valid but checksum-invalid.
        let phrase = TEST_PHRASE.replace("art", "abandon");
        assert_eq!(Mnemonic::parse(&phrase).unwrap_err(), MnemonicError::Checksum);
    }

    #[test]
    fn test_checksum_permissive_for_abbreviated_words() {
        // The same checksum-invalid phrase typed as prefixes is accepted.
        let phrase = ["aban"; 24].join(" ");
        let mnemonic = Mnemonic::parse(&phrase).unwrap();
        assert!(mnemonic.words().iter().all(|w| w == "abandon"));
    }

    #[test]
    fn test_generate_produces_valid_mnemonic() {
        let mnemonic = Mnemonic::generate().unwrap();
        assert_eq!(mnemonic.words().len(), MNEMONIC_WORDS);

        // Freshly generated phrases carry a valid checksum, so the strict
        // full-word parse path must accept them.
        let reparsed = Mnemonic::parse(&mnemonic.phrase()).unwrap();
        assert_eq!(reparsed, mnemonic);
    }

    #[test]
    fn test_debug_is_redacted() {
        let mnemonic = Mnemonic::parse(TEST_PHRASE).unwrap();
        let debug = format!("{mnemonic:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("abandon"));
    }
}
