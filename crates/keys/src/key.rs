//! Derived key container
//!
//! A [`Key`] owns the sampled private key, its PKCS#8 encoding, the
//! canonical mnemonic and the salt that produced it. The unencrypted DER is
//! byte-identical across derivations with the same inputs; the PBES2
//! wrapper produced by [`Key::encrypt`] is intentionally not, since it
//! draws a fresh salt and IV per call.

use crate::error::{Error, Result};
use crate::kind::KeyKind;
use crate::mnemonic::Mnemonic;
use der::asn1::OctetString;
use der::Encode;
use pkcs8::pkcs5::pbes2;
use pkcs8::spki::AlgorithmIdentifierRef;
use pkcs8::{EncodePrivateKey, EncryptedPrivateKeyInfo, LineEnding, ObjectIdentifier, PrivateKeyInfo, SecretDocument};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// RFC 8410 algorithm identifier for Ed25519.
const ED25519_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

/// PBKDF2-SHA256 iteration count for the PBES2 wrapper.
const PBES2_ITERATIONS: u32 = 600_000;

const PEM_LABEL_PLAIN: &str = "PRIVATE KEY";
const PEM_LABEL_ENCRYPTED: &str = "ENCRYPTED PRIVATE KEY";

/// A sampled private key.
pub enum PrivateKey {
    Rsa(rsa::RsaPrivateKey),
    P256(p256::SecretKey),
    P384(p384::SecretKey),
    P521(p521::SecretKey),
    Ed25519(ed25519_consensus::SigningKey),
}

impl PrivateKey {
    /// Encode as an unencrypted PKCS#8 document.
    ///
    /// The layouts match what certificate tooling expects: PKCS#1 under
    /// `rsaEncryption` for RSA, SEC1 with the public point under
    /// `id-ecPublicKey` for the NIST curves, and the bare RFC 8410 v1 seed
    /// for Ed25519.
    pub fn to_pkcs8_der(&self) -> Result<SecretDocument> {
        let doc = match self {
            PrivateKey::Rsa(key) => key.to_pkcs8_der(),
            PrivateKey::P256(key) => key.to_pkcs8_der(),
            PrivateKey::P384(key) => key.to_pkcs8_der(),
            PrivateKey::P521(key) => key.to_pkcs8_der(),
            PrivateKey::Ed25519(key) => return ed25519_pkcs8(key),
        };
        doc.map_err(|e| Error::Internal(format!("PKCS#8 encoding failed: {e}")))
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            PrivateKey::Rsa(_) => "Rsa",
            PrivateKey::P256(_) => "P256",
            PrivateKey::P384(_) => "P384",
            PrivateKey::P521(_) => "P521",
            PrivateKey::Ed25519(_) => "Ed25519",
        };
        f.debug_struct("PrivateKey").field(kind, &"[REDACTED]").finish()
    }
}

/// Ed25519 PKCS#8: version 1, seed only, no public-key attribute.
fn ed25519_pkcs8(key: &ed25519_consensus::SigningKey) -> Result<SecretDocument> {
    let seed = Zeroizing::new(key.to_bytes());
    let curve_private_key = Zeroizing::new(
        OctetString::new(seed.as_slice())
            .and_then(|inner| inner.to_der())
            .map_err(|e| Error::Internal(format!("Ed25519 DER encoding failed: {e}")))?,
    );

    let info = PrivateKeyInfo {
        algorithm: AlgorithmIdentifierRef { oid: ED25519_OID, parameters: None },
        private_key: &curve_private_key,
        public_key: None,
    };
    SecretDocument::encode_msg(&info).map_err(|e| Error::Internal(format!("PKCS#8 encoding failed: {e}")))
}

/// A derived key together with the inputs needed to display and restore it.
pub struct Key {
    kind: KeyKind,
    salt: String,
    mnemonic: Mnemonic,
    private_key: PrivateKey,
    der: SecretDocument,
    encrypted: bool,
}

impl Key {
    pub(crate) fn new(kind: KeyKind, salt: &str, mnemonic: Mnemonic, private_key: PrivateKey) -> Result<Self> {
        let der = private_key.to_pkcs8_der()?;
        Ok(Self { kind, salt: salt.to_string(), mnemonic, private_key, der, encrypted: false })
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// The canonical mnemonic this key derives from.
    pub fn mnemonic(&self) -> &Mnemonic {
        &self.mnemonic
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Current DER encoding (encrypted or plain).
    pub fn der(&self) -> &[u8] {
        self.der.as_bytes()
    }

    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    /// Re-encode the key as a PBES2 `EncryptedPrivateKeyInfo`.
    ///
    /// PBKDF2-SHA256 with a fresh random salt plus AES-256-CBC with a fresh
    /// random IV, so repeated calls produce different ciphertexts for the
    /// same key and password.
    pub fn encrypt(&mut self, password: &str) -> Result<()> {
        if self.encrypted {
            return Err(Error::AlreadyEncrypted);
        }

        let mut kdf_salt = [0u8; 16];
        OsRng.fill_bytes(&mut kdf_salt);
        let mut iv = [0u8; 16];
        OsRng.fill_bytes(&mut iv);

        let params = pbes2::Parameters::pbkdf2_sha256_aes256cbc(PBES2_ITERATIONS, &kdf_salt, &iv)
            .map_err(|e| Error::Encryption(e.to_string()))?;

        let encrypted = PrivateKeyInfo::try_from(self.der.as_bytes())
            .map_err(|e| Error::Internal(format!("PKCS#8 decoding failed: {e}")))?
            .encrypt_with_params(params, password.as_bytes())
            .map_err(|e| Error::Encryption(e.to_string()))?;

        self.der = encrypted;
        self.encrypted = true;
        Ok(())
    }

    /// Decrypt the PBES2 wrapper and restore the plain encoding.
    ///
    /// The decrypted document must match the derived key bit for bit.
    pub fn decrypt(&mut self, password: &str) -> Result<()> {
        if !self.encrypted {
            return Err(Error::NotEncrypted);
        }

        let plain = EncryptedPrivateKeyInfo::try_from(self.der.as_bytes())
            .map_err(|e| Error::Internal(format!("PKCS#8 decoding failed: {e}")))?
            .decrypt(password.as_bytes())
            .map_err(|e| Error::Decryption(e.to_string()))?;

        let expected = self.private_key.to_pkcs8_der()?;
        if plain.as_bytes() != expected.as_bytes() {
            return Err(Error::Decryption("decrypted key does not match the derived key".into()));
        }

        self.der = plain;
        self.encrypted = false;
        Ok(())
    }

    /// PEM encoding of the current DER, 64-column, LF line endings.
    pub fn pem(&self) -> Result<Zeroizing<String>> {
        let label = if self.encrypted { PEM_LABEL_ENCRYPTED } else { PEM_LABEL_PLAIN };
        self.der.to_pem(label, LineEnding::LF).map_err(|e| Error::Internal(format!("PEM encoding failed: {e}")))
    }

    /// Lowercase hex SHA-256 of the PEM text.
    pub fn fingerprint(&self) -> Result<String> {
        let pem = self.pem()?;
        Ok(hex::encode(Sha256::digest(pem.as_bytes())))
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Key").field("kind", &self.kind).field("encrypted", &self.encrypted).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ed25519_pkcs8_layout() {
        // RFC 8410 v1: fixed 16-byte prefix followed by the raw seed.
        let seed: [u8; 32] = core::array::from_fn(|i| i as u8);
        let key = ed25519_consensus::SigningKey::from(seed);

        let doc = ed25519_pkcs8(&key).unwrap();
        let der = doc.as_bytes();

        assert_eq!(der.len(), 48);
        assert_eq!(hex::encode(&der[..16]), "302e020100300506032b657004220420");
        assert_eq!(&der[16..], &seed);
    }

    #[test]
    fn test_nist_pkcs8_includes_public_key() {
        let secret = p256::SecretKey::from_slice(&[7u8; 32]).unwrap();
        let doc = PrivateKey::P256(secret).to_pkcs8_der().unwrap();

        // id-ecPublicKey and prime256v1 OIDs are both present.
        let der = hex::encode(doc.as_bytes());
        assert!(der.contains("2a8648ce3d0201"));
        assert!(der.contains("2a8648ce3d030107"));
        // SEC1 key with a public-key bit string (context tag [1]).
        assert!(der.contains("a144034200"));
    }
}
