//! BIP-39 mnemonic handling
//!
//! A [`Mnemonic`] is an ordered sequence of exactly 24 words from the BIP-39
//! English wordlist. Operators type words in full or abbreviated to their
//! first four letters (unambiguous per BIP-39); parsing always produces the
//! canonical full-lowercase form, which is what every downstream derivation
//! step consumes.

mod error;
mod phrase;
mod seed;

pub use error::MnemonicError;
pub use phrase::{Mnemonic, MNEMONIC_WORDS};
pub use seed::Seed;
