//! Error types for mnemonic operations

use thiserror::Error;

/// Errors that can occur while parsing or normalizing a mnemonic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MnemonicError {
    /// Wrong number of words
    #[error("mnemonic must have {expected} words, found {found}")]
    WordCount { expected: usize, found: usize },

    /// Word (or prefix) not resolvable against the BIP-39 English wordlist
    #[error("word {0:?} not found in the BIP-39 word list")]
    UnknownWord(String),

    /// Words parsed but the BIP-39 checksum does not match
    #[error("mnemonic checksum is invalid")]
    Checksum,
}
