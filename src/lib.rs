#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]
#![doc = include_str!("../README.md")]

//! Linkable spontaneous anonymous group (ring) signatures, generic over
//! any prime-order elliptic curve exposed through the [`elliptic_curve`]
//! crate.
//!
//! A holder of one private key in an ad-hoc set of public keys (the
//! "ring") can produce a [`Signature`] proving knowledge of one member's
//! discrete logarithm without revealing which member, while still
//! emitting a deterministic [`PrivateKey::key_image`] that links
//! signatures made with the same key — without identifying the signer.
//!
//! See [`named`] for ready-made curve/digest pairings
//! (`Secp256k1Sha256`, `Secp256r1Sha256`, `Secp384r1Sha384`).

extern crate alloc;

mod error;
mod hasher;
mod private_key;
mod public_key;
mod signature;

pub mod named;

pub use crate::{
    error::{Error, Result},
    hasher::{HashItem, Hasher},
    private_key::PrivateKey,
    public_key::PublicKey,
    signature::Signature,
};

// Re-export the `elliptic-curve` crate so downstream crates can name
// `RingCurve`-bound curve types without an independent dependency.
pub use elliptic_curve;

use elliptic_curve::{
    point::PointCompression,
    sec1::ModulusSize,
    CurveArithmetic, FieldBytesSize, PrimeCurve,
};

/// The bound every curve used with this crate must satisfy: a
/// prime-order group with the arithmetic and SEC1 point-compression
/// support needed to carry out ring signing and verification.
///
/// Blanket-implemented for any curve meeting the bound; there is
/// nothing to implement by hand for a concrete curve such as
/// [`k256::Secp256k1`], [`p256::NistP256`], or [`p384::NistP384`].
pub trait RingCurve: PrimeCurve + CurveArithmetic + PointCompression
where
    FieldBytesSize<Self>: ModulusSize,
{
}

impl<C> RingCurve for C
where
    C: PrimeCurve + CurveArithmetic + PointCompression,
    FieldBytesSize<C>: ModulusSize,
{
}
