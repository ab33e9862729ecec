//! Deterministic RSA/ECC private keys from BIP-39 mnemonics
//!
//! This crate derives asymmetric private keys from a 24-word BIP-39 mnemonic
//! and an optional salt, for long-horizon key custody: an operator who keeps
//! only the mnemonic and the salt can reconstruct bit-identical key material
//! on any machine, decades later.
//!
//! Supported kinds:
//! - NIST curves P-256, P-384, P-521 and Ed25519
//! - RSA 2048, 3072, 4096 and 8192
//!
//! The derivation pipeline is a fixed chain of deterministic byte consumers:
//!
//! ```text
//! mnemonic + salt -> BIP-39 seed -> HKDF-SHA256 -> XChaCha20 stream -> sampler -> key
//! ```
//!
//! Every stage is byte-exact; the same `(kind, salt, mnemonic)` always yields
//! the same unencrypted PKCS#8 document. The derivation never touches OS
//! randomness; only mnemonic generation and the PBES2 encryption wrapper do.
//!
//! # Example
//!
//! ```no_run
//! use bipkey_keys::{generate, CancelToken, EccCurve, KeyKind};
//!
//! let cancel = CancelToken::new();
//! let key = generate(KeyKind::Ecc(EccCurve::P256), "my-salt", &cancel)?;
//! println!("{}", key.pem()?.as_str());
//! # Ok::<(), bipkey_keys::Error>(())
//! ```

mod cancel;
mod ecc;
mod error;
mod key;
mod keygen;
mod kind;
pub mod mnemonic;
mod rsa;
pub mod stream;

pub use cancel::CancelToken;
pub use error::{Error, Result};
pub use key::{Key, PrivateKey};
pub use keygen::{generate, restore};
pub use kind::{supported_ecc, supported_kinds, supported_rsa, EccCurve, KeyKind, RsaSize};
pub use mnemonic::{Mnemonic, MnemonicError, Seed, MNEMONIC_WORDS};
pub use stream::EntropyRead;
