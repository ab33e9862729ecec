//! Error types for key derivation

use crate::mnemonic::MnemonicError;
use thiserror::Error;

/// Result type for key derivation operations
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors that can occur while deriving or handling a key
#[derive(Debug, Error)]
pub enum Error {
    /// Mnemonic parsing or validation failed
    #[error(transparent)]
    Mnemonic(#[from] MnemonicError),

    /// Key kind alias not in the supported catalog
    #[error("unsupported key kind: {0}")]
    UnsupportedKind(String),

    /// The HKDF output bound was reached
    ///
    /// The stream-cipher stage only ever consumes 56 HKDF bytes, so this
    /// surfaces as an internal fault rather than a user-visible condition.
    #[error("key derivation stream exhausted")]
    KdfExhausted,

    /// Sampled RSA parameters failed validation
    #[error("invalid RSA key: {0}")]
    InvalidRsaKey(String),

    /// The operation was aborted via its cancellation token
    #[error("operation cancelled")]
    Cancelled,

    /// The key is already PBES2-encrypted
    #[error("key is already encrypted")]
    AlreadyEncrypted,

    /// The key is not PBES2-encrypted
    #[error("key is not encrypted")]
    NotEncrypted,

    /// PBES2 encryption failed
    #[error("failed to encrypt private key: {0}")]
    Encryption(String),

    /// PBES2 decryption failed or produced a different key
    #[error("failed to decrypt private key: {0}")]
    Decryption(String),

    /// A lower-level failure that cannot occur under correct input
    #[error("internal error: {0}")]
    Internal(String),
}
