//! Ready-made curve/digest pairings.
//!
//! §6 of the source design calls these out as "named hasher instances"
//! — well-known constants callers reference by name rather than
//! assembling a [`Hasher`] from a curve and digest themselves. Each
//! pairing below is checked once (its byte lengths are compatible by
//! construction, so [`Hasher::new`] cannot fail for them) and exposed
//! two ways:
//!
//! - a plain constructor function, usable under `no_std`;
//! - under `std`, a [`once_cell::sync::Lazy`] static that builds the
//!   hasher once and hands out `Copy` values from then on, matching
//!   the "lazily-initialized immutable singleton" design note in §9.

use crate::Hasher;

/// `secp256k1` + SHA-256, the pairing the source design's test vectors
/// (scenarios 1–5) use throughout.
pub type Secp256k1Sha256 = Hasher<k256::Secp256k1, sha2::Sha256>;

/// `secp256r1` (NIST P-256) + SHA-256.
pub type Secp256r1Sha256 = Hasher<p256::NistP256, sha2::Sha256>;

/// `secp384r1` (NIST P-384) + SHA-384.
pub type Secp384r1Sha384 = Hasher<p384::NistP384, sha2::Sha384>;

/// Build the `secp256k1` + SHA-256 hasher.
///
/// Infallible in practice — both byte lengths are 32 — but returns
/// `Result` rather than panicking, for uniformity with
/// [`Hasher::new`] and so a future curve/digest swap can't silently
/// regress into a panic.
pub fn secp256k1_sha256() -> crate::Result<Secp256k1Sha256> {
    Secp256k1Sha256::new()
}

/// Build the `secp256r1` + SHA-256 hasher.
pub fn secp256r1_sha256() -> crate::Result<Secp256r1Sha256> {
    Secp256r1Sha256::new()
}

/// Build the `secp384r1` + SHA-384 hasher.
pub fn secp384r1_sha384() -> crate::Result<Secp384r1Sha384> {
    Secp384r1Sha384::new()
}

#[cfg(feature = "std")]
mod singletons {
    use super::{Secp256k1Sha256, Secp256r1Sha256, Secp384r1Sha384};
    use once_cell::sync::Lazy;

    /// Process-wide `secp256k1` + SHA-256 hasher.
    pub static SECP256K1_SHA256: Lazy<Secp256k1Sha256> =
        Lazy::new(|| super::secp256k1_sha256().expect("secp256k1/sha256 is always compatible"));

    /// Process-wide `secp256r1` + SHA-256 hasher.
    pub static SECP256R1_SHA256: Lazy<Secp256r1Sha256> =
        Lazy::new(|| super::secp256r1_sha256().expect("secp256r1/sha256 is always compatible"));

    /// Process-wide `secp384r1` + SHA-384 hasher.
    pub static SECP384R1_SHA384: Lazy<Secp384r1Sha384> =
        Lazy::new(|| super::secp384r1_sha384().expect("secp384r1/sha384 is always compatible"));
}

#[cfg(feature = "std")]
pub use singletons::{SECP256K1_SHA256, SECP256R1_SHA256, SECP384R1_SHA384};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_succeed() {
        secp256k1_sha256().unwrap();
        secp256r1_sha256().unwrap();
        secp384r1_sha384().unwrap();
    }

    #[cfg(feature = "std")]
    #[test]
    fn singletons_match_constructors() {
        use crate::Hasher;

        assert!(Hasher::equals(&SECP256K1_SHA256, &secp256k1_sha256().unwrap()));
        assert!(Hasher::equals(&SECP256R1_SHA256, &secp256r1_sha256().unwrap()));
        assert!(Hasher::equals(&SECP384R1_SHA384, &secp384r1_sha384().unwrap()));
    }
}
