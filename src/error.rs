//! Error types

use core::fmt;

/// Result type alias using this crate's [`Error`]
pub type Result<T> = core::result::Result<T, Error>;

/// Errors produced by construction, decoding, or hashing.
///
/// Verification failure is *not* one of these: [`crate::Signature::verify`]
/// reports a mismatched closing challenge as `false`, never as an `Error`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A scalar was zero, or was not less than the group order.
    InvalidScalar,

    /// A [`crate::Hasher`] was constructed from a curve/digest pairing whose
    /// byte lengths disagree, or whose digest range is too small to cover
    /// the group order.
    IncompatibleHasher,

    /// Malformed DER, a wrong ASN.1 tag, an off-curve point, or an
    /// out-of-range integer encountered while decoding.
    InvalidEncoding,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidScalar => write!(f, "lsag: scalar is zero or not less than the group order"),
            Error::IncompatibleHasher => write!(f, "lsag: curve and digest byte lengths are incompatible"),
            Error::InvalidEncoding => write!(f, "lsag: invalid DER encoding"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl From<Error> for signature::Error {
    fn from(err: Error) -> signature::Error {
        signature::Error::from_source(err)
    }
}

#[cfg(not(feature = "std"))]
impl From<Error> for signature::Error {
    fn from(_: Error) -> signature::Error {
        signature::Error::new()
    }
}

impl From<der::Error> for Error {
    fn from(_: der::Error) -> Self {
        Error::InvalidEncoding
    }
}
