//! RSA prime sampling and key assembly

use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use crate::kind::RsaSize;
use crate::stream::EntropyRead;
use num_bigint_dig::prime::probably_prime;
use num_bigint_dig::{BigUint, ModInverse};
use rsa::RsaPrivateKey;
use zeroize::{Zeroize, Zeroizing};

/// Miller-Rabin rounds per primality check.
///
/// Far above cryptographic necessity, so that a false-positive composite is
/// astronomically unlikely even across decades of restorations.
pub(crate) const PRIMALITY_TESTS: usize = 256;

/// Fixed public exponent.
const RSA_EXPONENT: u32 = 65537;

/// Assemble an RSA private key of the given size from the stream.
///
/// Reads one `size/2`-bit block for `p`, then one per attempt at a distinct
/// `q`. Failure of the final validation is fatal rather than retried: a
/// silent resample would diverge from the deterministic contract.
pub(crate) fn generate_rsa<R: EntropyRead>(reader: &mut R, size: RsaSize, cancel: &CancelToken) -> Result<RsaPrivateKey> {
    let half = size.half_bits() as usize;

    let p = derive_prime(reader, half, cancel)?;
    let mut q = p.clone();
    while q == p {
        q = derive_prime(reader, half, cancel)?;
    }

    let one = BigUint::from(1u32);
    let n = &p * &q;
    let mut phi = (&p - &one) * (&q - &one);
    let e = BigUint::from(RSA_EXPONENT);

    let d = (&e)
        .mod_inverse(&phi)
        .and_then(|d| d.to_biguint())
        .ok_or_else(|| Error::InvalidRsaKey("public exponent has no inverse modulo phi".into()))?;
    phi.zeroize();

    let key = RsaPrivateKey::from_components(n, e, d, vec![p, q]).map_err(|e| Error::InvalidRsaKey(e.to_string()))?;
    key.validate().map_err(|e| Error::InvalidRsaKey(e.to_string()))?;
    Ok(key)
}

/// Derive a prime of exactly `bits` bits from the stream.
///
/// Reads a single `(bits+7)/8`-byte block, forces the top bit (full bit
/// length) and the bottom bit (odd), then searches upward in steps of two
/// until a candidate passes the primality test. Rejected candidates never
/// cause another read; re-reading would couple the search to prior
/// rejections and break reproducibility across implementations.
pub(crate) fn derive_prime<R: EntropyRead>(reader: &mut R, bits: usize, cancel: &CancelToken) -> Result<BigUint> {
    let byte_len = (bits + 7) / 8;
    let mut buf = Zeroizing::new(vec![0u8; byte_len]);
    reader.fill(&mut buf)?;

    buf[0] |= 0x80;
    buf[byte_len - 1] |= 0x01;

    let mut k = BigUint::from_bytes_be(&buf);
    let two = BigUint::from(2u32);
    loop {
        cancel.ensure_active()?;
        if probably_prime(&k, PRIMALITY_TESTS) {
            return Ok(k);
        }
        k += &two;
    }
}
