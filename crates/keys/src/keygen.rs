//! Key derivation pipeline
//!
//! The pipeline is strictly single-threaded per derivation: one stream, one
//! sampler, reads in a fixed order per kind. Independent derivations can run
//! in parallel; nothing here is shared between them.

use crate::cancel::CancelToken;
use crate::ecc::generate_ecc;
use crate::error::Result;
use crate::key::{Key, PrivateKey};
use crate::kind::KeyKind;
use crate::mnemonic::Mnemonic;
use crate::rsa::generate_rsa;
use crate::stream::{ChaChaDrbg, HkdfReader};
use tracing::debug;

/// Derive the private key for `(kind, salt, mnemonic)`.
///
/// Deterministic: the same inputs always produce a byte-identical
/// unencrypted PKCS#8 document. The cancellation token is checked at every
/// stream read and primality test; on cancellation, secret intermediates
/// are wiped before the error is returned.
pub fn restore(kind: KeyKind, salt: &str, mnemonic: Mnemonic, cancel: &CancelToken) -> Result<Key> {
    let mnemonic = mnemonic.normalize()?;
    debug!("normalized mnemonic for key generation");

    let seed = mnemonic.to_seed(salt);
    debug!("derived seed from mnemonic and salt");

    let mut kdf = HkdfReader::new(&seed, salt.as_bytes());
    debug!("initialized HKDF-SHA256 over seed and salt");

    let mut drbg = ChaChaDrbg::new(&mut kdf, cancel.clone())?;

    let private_key = match kind {
        KeyKind::Ecc(curve) => generate_ecc(&mut drbg, curve)?,
        KeyKind::Rsa(size) => PrivateKey::Rsa(generate_rsa(&mut drbg, size, cancel)?),
    };
    debug!(kind = %kind, "sampled private key material");

    let key = Key::new(kind, salt, mnemonic, private_key)?;
    debug!("marshalled private key to PKCS#8");
    Ok(key)
}

/// Roll a fresh mnemonic from OS randomness, then derive.
pub fn generate(kind: KeyKind, salt: &str, cancel: &CancelToken) -> Result<Key> {
    let mnemonic = Mnemonic::generate()?;
    debug!("created a new mnemonic for key generation");
    restore(kind, salt, mnemonic, cancel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::kind::EccCurve;

    const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon \
                          abandon abandon abandon abandon abandon abandon abandon abandon \
                          abandon abandon abandon abandon abandon abandon abandon art";

    #[test]
    fn test_restore_is_deterministic() {
        let cancel = CancelToken::new();
        let mnemonic = Mnemonic::parse(PHRASE).unwrap();

        let a = restore(KeyKind::Ecc(EccCurve::P256), "salt", mnemonic.clone(), &cancel).unwrap();
        let b = restore(KeyKind::Ecc(EccCurve::P256), "salt", mnemonic, &cancel).unwrap();

        assert_eq!(a.der(), b.der());
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }

    #[test]
    fn test_salt_and_kind_change_the_key() {
        let cancel = CancelToken::new();
        let mnemonic = Mnemonic::parse(PHRASE).unwrap();

        let base = restore(KeyKind::Ecc(EccCurve::P256), "salt", mnemonic.clone(), &cancel).unwrap();
        let other_salt = restore(KeyKind::Ecc(EccCurve::P256), "pepper", mnemonic.clone(), &cancel).unwrap();
        let other_kind = restore(KeyKind::Ecc(EccCurve::Ed25519), "salt", mnemonic, &cancel).unwrap();

        assert_ne!(base.der(), other_salt.der());
        assert_ne!(base.der(), other_kind.der());
    }

    #[test]
    fn test_generate_key_restores_from_its_mnemonic() {
        let cancel = CancelToken::new();
        let generated = generate(KeyKind::Ecc(EccCurve::P384), "salt", &cancel).unwrap();

        let restored =
            restore(KeyKind::Ecc(EccCurve::P384), "salt", generated.mnemonic().clone(), &cancel).unwrap();
        assert_eq!(generated.der(), restored.der());
    }

    #[test]
    fn test_cancelled_token_aborts_derivation() {
        let cancel = CancelToken::new();
        cancel.cancel();

        let mnemonic = Mnemonic::parse(PHRASE).unwrap();
        let result = restore(KeyKind::Ecc(EccCurve::P256), "salt", mnemonic, &cancel);
        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
