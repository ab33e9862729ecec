//! Deterministic byte sources feeding the samplers
//!
//! The derivation pipeline consumes bytes from a sequential reader: a short
//! HKDF-SHA256 stream keys an XChaCha20 keystream, which then supplies the
//! unbounded byte source the prime and scalar samplers draw from. Samplers
//! are generic over [`EntropyRead`] so tests can substitute a replay source
//! for the cipher.

mod drbg;
mod kdf;

pub use drbg::ChaChaDrbg;
pub use kdf::HkdfReader;

use crate::error::Result;

/// A sequential source of derivation bytes.
pub trait EntropyRead {
    /// Fill `buf` completely, or fail.
    fn fill(&mut self, buf: &mut [u8]) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::EntropyRead;
    use crate::error::{Error, Result};

    /// Replays a fixed byte sequence, for exercising samplers in isolation.
    pub(crate) struct ReplayReader {
        bytes: Vec<u8>,
        offset: usize,
    }

    impl ReplayReader {
        pub(crate) fn new(bytes: impl Into<Vec<u8>>) -> Self {
            Self { bytes: bytes.into(), offset: 0 }
        }
    }

    impl EntropyRead for ReplayReader {
        fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
            let end = self.offset + buf.len();
            if end > self.bytes.len() {
                return Err(Error::Internal("replay source exhausted".into()));
            }
            buf.copy_from_slice(&self.bytes[self.offset..end]);
            self.offset = end;
            Ok(())
        }
    }
}
