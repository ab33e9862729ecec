//! BIP-39 seed derivation

use super::phrase::Mnemonic;
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

/// PBKDF2 rounds fixed by BIP-39.
const PBKDF2_ROUNDS: u32 = 2048;

/// A 64-byte BIP-39 seed.
///
/// Wiped from memory on drop.
pub struct Seed([u8; Seed::SIZE]);

impl Seed {
    /// Seed length in bytes.
    pub const SIZE: usize = 64;

    /// Wrap raw seed bytes.
    pub fn new(bytes: [u8; Seed::SIZE]) -> Self {
        Seed(bytes)
    }

    /// Borrow the seed bytes.
    pub fn as_bytes(&self) -> &[u8; Seed::SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl Mnemonic {
    /// Derive the BIP-39 seed for this mnemonic and salt.
    ///
    /// `PBKDF2-HMAC-SHA512(phrase, "mnemonic" + salt, 2048, 64)` over the
    /// canonical space-joined phrase, exactly as BIP-39 specifies; the salt
    /// takes the place of the passphrase.
    pub fn to_seed(&self, salt: &str) -> Seed {
        let phrase = Zeroizing::new(self.phrase());
        let pbkdf2_salt = Zeroizing::new(format!("mnemonic{salt}"));

        let mut seed = [0u8; Seed::SIZE];
        pbkdf2::pbkdf2_hmac::<Sha512>(phrase.as_bytes(), pbkdf2_salt.as_bytes(), PBKDF2_ROUNDS, &mut seed);
        Seed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_matches_bip39_reference_vector() {
        // Official BIP-39 vector: all-zero 256-bit entropy, passphrase "TREZOR".
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon abandon abandon abandon abandon art";
        let mnemonic = Mnemonic::parse(phrase).unwrap();
        let seed = mnemonic.to_seed("TREZOR");

        assert_eq!(
            hex::encode(seed.as_bytes()),
            "bda85446c68413707090a52022edd26a1c9462295029f2e60cd7c4f2bbd3097170af7a4d73245cafa9c3cca8d561a7c3de6f5d4a10be8ed2a5e608d68f92fcc8"
        );
    }

    #[test]
    fn test_salt_changes_seed() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon abandon abandon abandon abandon art";
        let mnemonic = Mnemonic::parse(phrase).unwrap();

        let plain = mnemonic.to_seed("");
        let salted = mnemonic.to_seed("bipkey");
        assert_ne!(plain.as_bytes(), salted.as_bytes());

        // Same inputs always reproduce the same seed.
        let again = mnemonic.to_seed("bipkey");
        assert_eq!(salted.as_bytes(), again.as_bytes());
    }
}
