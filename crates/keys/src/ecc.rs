//! Elliptic-curve key sampling
//!
//! NIST curves draw a wide scalar from the derivation stream and reduce it
//! into the group order; Ed25519 takes its RFC 8032 seed verbatim. Either
//! way the stream is read exactly once per key, in one contiguous block.

use crate::error::{Error, Result};
use crate::key::PrivateKey;
use crate::kind::EccCurve;
use crate::stream::EntropyRead;
use elliptic_curve::bigint::Encoding;
use elliptic_curve::{Curve, SecretKey};
use num_bigint_dig::BigUint;
use zeroize::{Zeroize, Zeroizing};

/// Extra bits read past the order length so the modular reduction is
/// statistically indistinguishable from uniform.
const SCALAR_BIAS_BITS: usize = 128;

/// Ed25519 seed length per RFC 8032.
const ED25519_SEED_LEN: usize = 32;

/// Sample an elliptic-curve private key of the given curve from the stream.
pub(crate) fn generate_ecc<R: EntropyRead>(reader: &mut R, curve: EccCurve) -> Result<PrivateKey> {
    match curve {
        EccCurve::P256 => nist_secret_key::<p256::NistP256>(reader).map(PrivateKey::P256),
        EccCurve::P384 => nist_secret_key::<p384::NistP384>(reader).map(PrivateKey::P384),
        EccCurve::P521 => nist_secret_key::<p521::NistP521>(reader).map(PrivateKey::P521),
        EccCurve::Ed25519 => ed25519_key(reader),
    }
}

/// Sample a scalar in `[1, n-1]` and build the curve secret key from it.
fn nist_secret_key<C>(reader: &mut impl EntropyRead) -> Result<SecretKey<C>>
where
    C: Curve,
    C::Uint: Encoding,
{
    let order = BigUint::from_bytes_be(C::ORDER.to_be_bytes().as_ref());
    let scalar = sample_scalar_wide(reader, &order)?;
    SecretKey::from_slice(&scalar).map_err(|e| Error::Internal(format!("curve rejected sampled scalar: {e}")))
}

/// Sample `d = (k mod (n-1)) + 1` from a wide read of the stream.
///
/// Returns the scalar as big-endian bytes, left-padded to the order's byte
/// width (the curve's field width for all NIST curves).
fn sample_scalar_wide<R: EntropyRead>(reader: &mut R, order: &BigUint) -> Result<Zeroizing<Vec<u8>>> {
    let order_bits = order.bits() as usize;
    let scalar_len = (order_bits + 7) / 8;
    let wide_len = (order_bits + SCALAR_BIAS_BITS + 7) / 8;

    let mut buf = Zeroizing::new(vec![0u8; wide_len]);
    reader.fill(&mut buf)?;

    let one = BigUint::from(1u32);
    let mut k = BigUint::from_bytes_be(&buf);
    let mut d = (&k % (order - &one)) + &one;

    let d_bytes = Zeroizing::new(d.to_bytes_be());
    let mut out = Zeroizing::new(vec![0u8; scalar_len]);
    out[scalar_len - d_bytes.len()..].copy_from_slice(&d_bytes);

    k.zeroize();
    d.zeroize();
    Ok(out)
}

/// Read the 32-byte Ed25519 seed and expand it per RFC 8032.
fn ed25519_key<R: EntropyRead>(reader: &mut R) -> Result<PrivateKey> {
    let mut seed = Zeroizing::new([0u8; ED25519_SEED_LEN]);
    reader.fill(seed.as_mut())?;
    Ok(PrivateKey::Ed25519(ed25519_consensus::SigningKey::from(*seed)))
}
