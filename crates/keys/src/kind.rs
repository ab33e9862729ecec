//! Catalog of supported key kinds
//!
//! A single tagged [`KeyKind`] value identifies what to derive, so an invalid
//! combination (both ECC and RSA, or neither) is unrepresentable past the
//! frontend. Aliases are matched case-insensitively after trimming.

use crate::error::{Error, Result};
use std::fmt;

/// Supported elliptic curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EccCurve {
    P256,
    P384,
    P521,
    Ed25519,
}

impl EccCurve {
    /// All supported curves, in display order.
    pub const ALL: [EccCurve; 4] = [EccCurve::P256, EccCurve::P384, EccCurve::P521, EccCurve::Ed25519];

    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            EccCurve::P256 => "P-256",
            EccCurve::P384 => "P-384",
            EccCurve::P521 => "P-521",
            EccCurve::Ed25519 => "Ed25519",
        }
    }

    /// Accepted aliases, all lowercase.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            EccCurve::P256 => &["256", "p-256", "p256", "secp256r1", "prime256v1"],
            EccCurve::P384 => &["384", "p-384", "p384", "secp384r1", "prime384v1"],
            EccCurve::P521 => &["521", "p-521", "p521", "secp521r1", "prime521v1"],
            EccCurve::Ed25519 => &["ed25519"],
        }
    }

    /// Nominal key size in bits.
    pub fn bits(&self) -> u32 {
        match self {
            EccCurve::P256 => 256,
            EccCurve::P384 => 384,
            EccCurve::P521 => 521,
            EccCurve::Ed25519 => 256,
        }
    }

    /// Resolve a user-supplied alias.
    ///
    /// An empty (or all-whitespace) input maps to `None`; an alias outside
    /// the catalog fails with [`Error::UnsupportedKind`].
    pub fn parse(input: &str) -> Result<Option<EccCurve>> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }
        for curve in EccCurve::ALL {
            if curve.aliases().contains(&needle.as_str()) {
                return Ok(Some(curve));
            }
        }
        Err(Error::UnsupportedKind(input.trim().to_string()))
    }
}

impl fmt::Display for EccCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Supported RSA modulus sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RsaSize {
    Rsa2048,
    Rsa3072,
    Rsa4096,
    Rsa8192,
}

impl RsaSize {
    /// All supported sizes, in display order.
    pub const ALL: [RsaSize; 4] = [RsaSize::Rsa2048, RsaSize::Rsa3072, RsaSize::Rsa4096, RsaSize::Rsa8192];

    /// Modulus size in bits.
    pub fn bits(&self) -> u32 {
        match self {
            RsaSize::Rsa2048 => 2048,
            RsaSize::Rsa3072 => 3072,
            RsaSize::Rsa4096 => 4096,
            RsaSize::Rsa8192 => 8192,
        }
    }

    /// Bit length of each prime factor.
    pub fn half_bits(&self) -> u32 {
        self.bits() / 2
    }

    /// Resolve a user-supplied size string (the literal decimal form).
    ///
    /// An empty (or all-whitespace) input maps to `None`; anything else
    /// outside the catalog fails with [`Error::UnsupportedKind`].
    pub fn parse(input: &str) -> Result<Option<RsaSize>> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }
        match needle.as_str() {
            "2048" => Ok(Some(RsaSize::Rsa2048)),
            "3072" => Ok(Some(RsaSize::Rsa3072)),
            "4096" => Ok(Some(RsaSize::Rsa4096)),
            "8192" => Ok(Some(RsaSize::Rsa8192)),
            _ => Err(Error::UnsupportedKind(input.trim().to_string())),
        }
    }
}

impl fmt::Display for RsaSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Kind of key to derive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Ecc(EccCurve),
    Rsa(RsaSize),
}

impl KeyKind {
    /// Key family name ("ECC" or "RSA").
    pub fn family(&self) -> &'static str {
        match self {
            KeyKind::Ecc(_) => "ECC",
            KeyKind::Rsa(_) => "RSA",
        }
    }

    /// Nominal key size in bits.
    pub fn bits(&self) -> u32 {
        match self {
            KeyKind::Ecc(curve) => curve.bits(),
            KeyKind::Rsa(size) => size.bits(),
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Ecc(curve) => write!(f, "ECC {}", curve.name()),
            KeyKind::Rsa(size) => write!(f, "RSA-{}", size.bits()),
        }
    }
}

/// Human-readable listing of the supported ECC curves and their aliases.
pub fn supported_ecc() -> String {
    let mut out = String::from("Supported ECC curves:\n");
    for curve in EccCurve::ALL {
        out.push_str(&format!(" - {} (aliases: {})\n", curve.name(), curve.aliases().join(", ")));
    }
    out
}

/// Human-readable listing of the supported RSA sizes.
pub fn supported_rsa() -> String {
    let mut out = String::from("Supported RSA sizes:\n");
    for size in RsaSize::ALL {
        out.push_str(&format!(" - {}\n", size.bits()));
    }
    out
}

/// Human-readable listing of every supported key kind.
pub fn supported_kinds() -> String {
    format!("{}{}", supported_ecc(), supported_rsa())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ecc_aliases_resolve() {
        for curve in EccCurve::ALL {
            for alias in curve.aliases() {
                assert_eq!(EccCurve::parse(alias).unwrap(), Some(curve), "alias {alias}");
            }
        }
    }

    #[test]
    fn test_ecc_parse_is_case_insensitive_and_trimmed() {
        assert_eq!(EccCurve::parse("  SECP256R1 ").unwrap(), Some(EccCurve::P256));
        assert_eq!(EccCurve::parse("Ed25519").unwrap(), Some(EccCurve::Ed25519));
    }

    #[test]
    fn test_empty_input_maps_to_none() {
        assert_eq!(EccCurve::parse("").unwrap(), None);
        assert_eq!(EccCurve::parse("   ").unwrap(), None);
        assert_eq!(RsaSize::parse("").unwrap(), None);
    }

    #[test]
    fn test_unknown_alias_is_rejected() {
        assert!(matches!(EccCurve::parse("p999"), Err(Error::UnsupportedKind(_))));
        assert!(matches!(RsaSize::parse("1024"), Err(Error::UnsupportedKind(_))));
        assert!(matches!(RsaSize::parse("rsa2048"), Err(Error::UnsupportedKind(_))));
    }

    #[test]
    fn test_rsa_sizes_resolve() {
        assert_eq!(RsaSize::parse("2048").unwrap(), Some(RsaSize::Rsa2048));
        assert_eq!(RsaSize::parse(" 8192 ").unwrap(), Some(RsaSize::Rsa8192));
        assert_eq!(RsaSize::Rsa4096.half_bits(), 2048);
    }

    #[test]
    fn test_listings_enumerate_catalog() {
        let ecc = supported_ecc();
        assert!(ecc.contains("P-521"));
        assert!(ecc.contains("prime256v1"));

        let rsa = supported_rsa();
        assert!(rsa.contains("3072"));

        let all = supported_kinds();
        assert!(all.contains("Ed25519") && all.contains("8192"));
    }
}
