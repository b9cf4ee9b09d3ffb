//! A ring member's public point, with canonical compressed SEC1 encoding.

use crate::{Error, Hasher, Result, RingCurve};
use alloc::{string::String, vec::Vec};
use core::fmt;
use digest::Digest;
use elliptic_curve::{
    sec1::{EncodedPoint, FromEncodedPoint, ModulusSize, ToEncodedPoint},
    AffinePoint, FieldBytesSize,
};
use subtle::ConstantTimeEq;

/// A curve point paired with the [`Hasher`] it is meant to be used with.
///
/// The point is guaranteed on-curve and non-identity: the only ways to
/// build a `PublicKey` are [`PublicKey::from_affine`] and
/// [`PublicKey::from_octet`]/[`PublicKey::from_hex`], all of which
/// reject the identity element.
pub struct PublicKey<C, D>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
    point: AffinePoint<C>,
    hasher: Hasher<C, D>,
}

impl<C, D> Clone for PublicKey<C, D>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, D> Copy for PublicKey<C, D>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
}

impl<C, D> fmt::Debug for PublicKey<C, D>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
    AffinePoint<C>: ToEncodedPoint<C>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("point", &self.to_hex())
            .finish()
    }
}

impl<C, D> PublicKey<C, D>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
    /// Build a `PublicKey` from an already-validated, already-non-identity
    /// affine point, without re-checking either property.
    ///
    /// Only used internally, where the point is known valid by
    /// construction (e.g. `scalar * G` for a non-zero scalar on a
    /// prime-order curve).
    pub(crate) fn from_affine_unchecked(point: AffinePoint<C>, hasher: Hasher<C, D>) -> Self {
        Self { point, hasher }
    }

    /// Construct a `PublicKey` from a curve point, rejecting the identity.
    pub fn from_affine(point: AffinePoint<C>, hasher: Hasher<C, D>) -> Result<Self>
    where
        AffinePoint<C>: ToEncodedPoint<C>,
    {
        if bool::from(point.to_encoded_point(true).is_identity()) {
            return Err(Error::InvalidEncoding);
        }

        Ok(Self::from_affine_unchecked(point, hasher))
    }

    /// The underlying curve point.
    pub fn point(&self) -> &AffinePoint<C> {
        &self.point
    }

    /// The [`Hasher`] this key was constructed against.
    pub fn hasher(&self) -> &Hasher<C, D> {
        &self.hasher
    }

    /// Compressed SEC1 octet encoding: `0x02|0x03 || X`.
    pub fn to_octet(&self) -> Vec<u8>
    where
        AffinePoint<C>: ToEncodedPoint<C>,
    {
        self.point.to_encoded_point(true).as_bytes().to_vec()
    }

    /// Lowercase hex of [`PublicKey::to_octet`].
    pub fn to_hex(&self) -> String
    where
        AffinePoint<C>: ToEncodedPoint<C>,
    {
        hex::encode(self.to_octet())
    }

    /// Parse a compressed (or uncompressed) SEC1 octet string.
    pub fn from_octet(bytes: &[u8], hasher: Hasher<C, D>) -> Result<Self>
    where
        AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    {
        let encoded = EncodedPoint::<C>::from_bytes(bytes).map_err(|_| Error::InvalidEncoding)?;
        let point: AffinePoint<C> =
            Option::from(AffinePoint::<C>::from_encoded_point(&encoded))
                .ok_or(Error::InvalidEncoding)?;

        Self::from_affine(point, hasher)
    }

    /// Parse a lowercase (or uppercase) hex encoding of
    /// [`PublicKey::from_octet`].
    pub fn from_hex(hex_str: &str, hasher: Hasher<C, D>) -> Result<Self>
    where
        AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    {
        let bytes = hex::decode(hex_str).map_err(|_| Error::InvalidEncoding)?;
        Self::from_octet(&bytes, hasher)
    }
}

impl<C, D> PartialEq for PublicKey<C, D>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
    AffinePoint<C>: ToEncodedPoint<C>,
{
    fn eq(&self, other: &Self) -> bool {
        let a = self.point.to_encoded_point(true);
        let b = other.point.to_encoded_point(true);
        bool::from(a.as_bytes().ct_eq(b.as_bytes()))
    }
}

impl<C, D> Eq for PublicKey<C, D>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
    AffinePoint<C>: ToEncodedPoint<C>,
{
}
