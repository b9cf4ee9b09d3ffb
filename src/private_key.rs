//! The signer's secret scalar: key derivation, the key image, and ring
//! signing.

use crate::{hasher::HashItem, Error, Hasher, PublicKey, Result, RingCurve, Signature};
use alloc::{string::String, vec, vec::Vec};
use core::fmt;
use digest::Digest;
use elliptic_curve::{
    sec1::{FromEncodedPoint, ModulusSize, ToEncodedPoint},
    AffinePoint, CurveArithmetic, FieldBytes, FieldBytesSize, NonZeroScalar, ProjectivePoint,
    Scalar,
};

/// A private key: a scalar in `[1, n-1]` paired with the [`Hasher`] it
/// signs and derives key material with.
///
/// `scalar` is a [`NonZeroScalar`], so construction alone enforces the
/// `0 < scalar < n` invariant; the `zeroize` feature of this crate's
/// `elliptic-curve` dependency makes [`NonZeroScalar`] clear the secret
/// on drop, with no separate wrapping needed here.
pub struct PrivateKey<C, D>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
    scalar: NonZeroScalar<C>,
    hasher: Hasher<C, D>,
}

impl<C, D> Clone for PrivateKey<C, D>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
    fn clone(&self) -> Self {
        Self {
            scalar: self.scalar,
            hasher: self.hasher,
        }
    }
}

impl<C, D> fmt::Debug for PrivateKey<C, D>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").finish_non_exhaustive()
    }
}

impl<C, D> PrivateKey<C, D>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
    /// Construct a private key from a scalar, rejecting zero.
    ///
    /// `scalar` is already guaranteed `< n` by its type, so the only
    /// remaining check the source design calls for is non-zero-ness.
    pub fn new(scalar: Scalar<C>, hasher: Hasher<C, D>) -> Result<Self> {
        let scalar = Option::from(NonZeroScalar::<C>::new(scalar)).ok_or(Error::InvalidScalar)?;
        Ok(Self { scalar, hasher })
    }

    /// Parse a big-endian, fixed-width (`group.byte_length`-byte)
    /// unsigned integer.
    pub fn from_octet(bytes: &[u8], hasher: Hasher<C, D>) -> Result<Self> {
        if bytes.len() != FieldBytesSize::<C>::USIZE {
            return Err(Error::InvalidScalar);
        }

        let mut repr = FieldBytes::<C>::default();
        repr.copy_from_slice(bytes);

        let scalar =
            Option::from(NonZeroScalar::<C>::from_repr(repr)).ok_or(Error::InvalidScalar)?;

        Ok(Self { scalar, hasher })
    }

    /// Parse the hex encoding of [`PrivateKey::from_octet`].
    pub fn from_hex(hex_str: &str, hasher: Hasher<C, D>) -> Result<Self> {
        let bytes = hex::decode(hex_str).map_err(|_| Error::InvalidScalar)?;
        Self::from_octet(&bytes, hasher)
    }

    /// Big-endian, fixed-width unsigned integer encoding of the scalar.
    pub fn to_octet(&self) -> Vec<u8> {
        self.scalar.to_repr().as_ref().to_vec()
    }

    /// Lowercase hex of [`PrivateKey::to_octet`].
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_octet())
    }

    /// The [`Hasher`] this key signs and derives key material with.
    pub fn hasher(&self) -> &Hasher<C, D> {
        &self.hasher
    }
}

impl<C, D> PrivateKey<C, D>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
    D: Digest,
{
    /// The public point `P = scalar * G`.
    pub fn public_key(&self) -> PublicKey<C, D> {
        let point = (ProjectivePoint::<C>::generator() * *self.scalar).to_affine();
        PublicKey::from_affine_unchecked(point, self.hasher)
    }

    /// The deterministic key image `I = scalar * hash_point(P)`.
    ///
    /// Depends only on the scalar and the hasher — never on a ring —
    /// which is what makes it usable to link signatures across
    /// independently chosen rings.
    pub fn key_image(&self) -> Result<ProjectivePoint<C>>
    where
        AffinePoint<C>: ToEncodedPoint<C> + FromEncodedPoint<C>,
    {
        let public_point = self.public_key().point().to_owned();
        let hashed = self.hasher.hash_point(&public_point)?;
        Ok(hashed * *self.scalar)
    }

    /// Produce a linkable ring signature over `message`, binding this
    /// key to an ad-hoc ring formed from it and `foreign_keys`.
    ///
    /// Returns the signature together with the ring in the (shuffled)
    /// order the signature was produced against — signatures do not
    /// embed the ring, so callers must transmit both.
    pub fn sign(
        &self,
        message: &[u8],
        foreign_keys: &[PublicKey<C, D>],
    ) -> Result<(Signature<C>, Vec<PublicKey<C, D>>)>
    where
        AffinePoint<C>: ToEncodedPoint<C> + FromEncodedPoint<C>,
    {
        let self_public = self.public_key();

        // Step 1 — form and order the ring.
        let foreign_points: Vec<AffinePoint<C>> =
            foreign_keys.iter().map(|k| *k.point()).collect();

        let scalar_bytes = self.scalar.to_repr();
        let mut seed_items = Vec::with_capacity(2 + foreign_points.len());
        seed_items.push(HashItem::Int(scalar_bytes.as_ref()));
        seed_items.push(HashItem::Text(message));
        for point in &foreign_points {
            seed_items.push(HashItem::Point(point));
        }
        let seed = self.hasher.hash_array(&seed_items)?;

        let mut all = Vec::with_capacity(1 + foreign_keys.len());
        all.push(self_public);
        all.extend_from_slice(foreign_keys);

        let ring = self.hasher.shuffle(all, seed);
        let ring_size = ring.len();

        let signer_position = ring
            .iter()
            .position(|key| *key == self_public)
            .expect("the signer's own key is always present in the shuffled ring");

        // Step 2 — ring closure.
        //
        // Domain-separate the closure draws from the shuffle: both
        // `shuffle` and `next_scalar` reduce to the same pure function
        // of `(seed, counter)`, so reusing `seed` verbatim here would
        // make `alpha` collide bit-for-bit with the shuffle's own
        // first draw (and every later `s_i` with a later shuffle
        // draw). Re-hash the seed under a distinct label first.
        let seed_repr = seed.to_repr();
        let closure_seed = self
            .hasher
            .hash_array(&[HashItem::Text(b"close"), HashItem::Int(seed_repr.as_ref())])?;

        let key_image = self.key_image()?;
        let mut counter: u64 = 0;
        let alpha = self.hasher.next_scalar(closure_seed, &mut counter);

        let signer_point = *ring[signer_position].point();
        let l_signer = ProjectivePoint::<C>::generator() * alpha;
        let r_signer = self.hasher.hash_point(&signer_point)? * alpha;

        let l_signer_affine = l_signer.to_affine();
        let r_signer_affine = r_signer.to_affine();

        let mut challenges = vec![Scalar::<C>::ZERO; ring_size];
        let mut responses = vec![Scalar::<C>::ZERO; ring_size];

        let mut running_challenge = self.hasher.hash_array(&[
            HashItem::Text(message),
            HashItem::Point(&l_signer_affine),
            HashItem::Point(&r_signer_affine),
        ])?;

        let mut index = (signer_position + 1) % ring_size;
        while index != signer_position {
            challenges[index] = running_challenge;

            let response = self.hasher.next_scalar(closure_seed, &mut counter);
            responses[index] = response;

            let member_point = *ring[index].point();
            let l = ProjectivePoint::<C>::generator() * response
                + ProjectivePoint::<C>::from(member_point) * running_challenge;
            let r = self.hasher.hash_point(&member_point)? * response
                + key_image * running_challenge;

            let l_affine = l.to_affine();
            let r_affine = r.to_affine();

            running_challenge = self.hasher.hash_array(&[
                HashItem::Text(message),
                HashItem::Point(&l_affine),
                HashItem::Point(&r_affine),
            ])?;

            index = (index + 1) % ring_size;
        }

        // `running_challenge` is now c_signer, the closing challenge.
        challenges[signer_position] = running_challenge;
        responses[signer_position] = alpha - running_challenge * *self.scalar;

        let signature = Signature::from_parts(key_image, challenges[0], responses);
        Ok((signature, ring))
    }
}

impl<C, D> PartialEq for PrivateKey<C, D>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
    fn eq(&self, other: &Self) -> bool {
        self.scalar == other.scalar
    }
}

impl<C, D> Eq for PrivateKey<C, D>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
}
