//! Streaming HKDF-SHA256 expansion

use super::EntropyRead;
use crate::error::{Error, Result};
use crate::mnemonic::Seed;
use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

const HASH_LEN: usize = 32;

/// HKDF caps its output at 255 hash-length blocks (RFC 5869).
const MAX_BLOCKS: u8 = 255;

/// Sequential reader over the HKDF-SHA256 output stream.
///
/// Extracts a PRK from `(salt, seed)`, then expands with empty info one
/// block at a time as bytes are consumed, transparently crossing block
/// boundaries. HKDF output is bounded at 255 blocks of 32 bytes; reading
/// past that bound fails with [`Error::KdfExhausted`]. In practice only the
/// first 56 bytes are ever read, to key the stream-cipher stage: expanding
/// candidate bytes for large RSA keys directly out of HKDF would blow
/// through the 8160-byte bound as soon as a prime search went long.
pub struct HkdfReader {
    prk: Zeroizing<[u8; HASH_LEN]>,
    block: Zeroizing<[u8; HASH_LEN]>,
    counter: u8,
    offset: usize,
}

impl HkdfReader {
    /// Extract a PRK from the seed, salted with the user salt bytes.
    pub fn new(seed: &Seed, salt: &[u8]) -> Self {
        let (prk, _) = Hkdf::<Sha256>::extract(Some(salt), seed.as_bytes());
        let mut prk_bytes = Zeroizing::new([0u8; HASH_LEN]);
        prk_bytes.copy_from_slice(&prk);

        Self {
            prk: prk_bytes,
            block: Zeroizing::new([0u8; HASH_LEN]),
            counter: 0,
            offset: HASH_LEN,
        }
    }

    /// Compute T(counter + 1) = HMAC(prk, T(counter) || counter + 1).
    fn advance_block(&mut self) -> Result<()> {
        if self.counter == MAX_BLOCKS {
            return Err(Error::KdfExhausted);
        }

        let mut mac = Hmac::<Sha256>::new_from_slice(self.prk.as_ref())
            .map_err(|e| Error::Internal(format!("HMAC init failed: {e}")))?;
        if self.counter > 0 {
            mac.update(self.block.as_ref());
        }
        mac.update(&[self.counter + 1]);
        self.block.copy_from_slice(&mac.finalize().into_bytes());

        self.counter += 1;
        self.offset = 0;
        Ok(())
    }
}

impl EntropyRead for HkdfReader {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut written = 0;
        while written < buf.len() {
            if self.offset == HASH_LEN {
                self.advance_block()?;
            }
            let n = (buf.len() - written).min(HASH_LEN - self.offset);
            buf[written..written + n].copy_from_slice(&self.block[self.offset..self.offset + n]);
            self.offset += n;
            written += n;
        }
        Ok(())
    }
}
