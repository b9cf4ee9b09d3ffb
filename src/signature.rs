//! The ring-signature value object: canonical DER codec and
//! verification.

use crate::{
    hasher::{der_uint_bytes, HashItem},
    Error, Hasher, PublicKey, Result, RingCurve,
};
use alloc::vec::Vec;
use der::{
    asn1::{OctetStringRef, UintRef},
    Decode, Encode, Reader, Sequence, Tag,
};
use digest::Digest;
use elliptic_curve::{
    sec1::{EncodedPoint, FromEncodedPoint, ModulusSize, ToEncodedPoint},
    AffinePoint, FieldBytes, FieldBytesSize, ProjectivePoint, Scalar,
};

/// `(key_image, challenge_seed, responses)` — a ring signature over a
/// ring of the same size as `responses`.
///
/// Does not embed the ring itself: callers pair a `Signature` with the
/// ring it was produced (or is being checked) against.
pub struct Signature<C>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
    key_image: ProjectivePoint<C>,
    challenge_seed: Scalar<C>,
    responses: Vec<Scalar<C>>,
}

impl<C> Clone for Signature<C>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
    fn clone(&self) -> Self {
        Self {
            key_image: self.key_image,
            challenge_seed: self.challenge_seed,
            responses: self.responses.clone(),
        }
    }
}

impl<C> Signature<C>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
    pub(crate) fn from_parts(
        key_image: ProjectivePoint<C>,
        challenge_seed: Scalar<C>,
        responses: Vec<Scalar<C>>,
    ) -> Self {
        Self {
            key_image,
            challenge_seed,
            responses,
        }
    }

    /// The deterministic per-signer linkability tag.
    pub fn key_image(&self) -> ProjectivePoint<C> {
        self.key_image
    }

    /// The canonical "starting" challenge, `c_0`.
    pub fn challenge_seed(&self) -> Scalar<C> {
        self.challenge_seed
    }

    /// The per-ring-member responses, in ring order.
    pub fn responses(&self) -> &[Scalar<C>] {
        &self.responses
    }

    /// Ring size this signature was produced for.
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// A signature always has at least one response (the signer's own
    /// ring of size one in the degenerate, no-foreign-keys case).
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check that this signature closes the challenge loop over `ring`
    /// for `message`.
    ///
    /// Any arithmetic or shape mismatch (wrong ring length, an
    /// off-curve point having slipped through, …) is reported as `false`,
    /// never as an [`Error`] — only decoding and construction raise
    /// errors.
    pub fn verify<D>(&self, hasher: &Hasher<C, D>, message: &[u8], ring: &[PublicKey<C, D>]) -> bool
    where
        D: Digest,
        AffinePoint<C>: ToEncodedPoint<C> + FromEncodedPoint<C>,
    {
        if ring.is_empty() || ring.len() != self.responses.len() {
            return false;
        }

        let mut challenge = self.challenge_seed;

        for (member, response) in ring.iter().zip(self.responses.iter()) {
            let point = *member.point();

            let hashed_point = match hasher.hash_point(&point) {
                Ok(p) => p,
                Err(_) => return false,
            };

            let l = ProjectivePoint::<C>::generator() * *response
                + ProjectivePoint::<C>::from(point) * challenge;
            let r = hashed_point * *response + self.key_image * challenge;

            let l_affine = l.to_affine();
            let r_affine = r.to_affine();

            challenge = match hasher.hash_array(&[
                HashItem::Text(message),
                HashItem::Point(&l_affine),
                HashItem::Point(&r_affine),
            ]) {
                Ok(c) => c,
                Err(_) => return false,
            };
        }

        challenge == self.challenge_seed
    }

    /// Canonical DER `SEQUENCE { key_image OCTET STRING, c_0 INTEGER,
    /// responses SEQUENCE OF INTEGER }`.
    pub fn to_der(&self) -> Result<Vec<u8>>
    where
        AffinePoint<C>: ToEncodedPoint<C>,
    {
        Encode::to_der(self).map_err(Error::from)
    }

    /// Decode a [`Signature::to_der`] encoding, validating ASN.1 shape,
    /// curve membership of the key image, and non-emptiness of
    /// `responses`.
    pub fn from_der(bytes: &[u8]) -> Result<Self>
    where
        AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    {
        Decode::from_der(bytes).map_err(Error::from)
    }
}

impl<C> PartialEq for Signature<C>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
    fn eq(&self, other: &Self) -> bool {
        self.key_image == other.key_image
            && self.challenge_seed == other.challenge_seed
            && self.responses == other.responses
    }
}

fn scalar_from_be_bytes<C>(bytes: &[u8]) -> Option<Scalar<C>>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
    let width = FieldBytesSize::<C>::USIZE;
    if bytes.len() > width {
        return None;
    }

    let mut repr = FieldBytes::<C>::default();
    let offset = width - bytes.len();
    repr[offset..].copy_from_slice(bytes);

    Option::from(Scalar::<C>::from_repr(repr))
}

fn point_from_octet<C>(bytes: &[u8]) -> Option<AffinePoint<C>>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
    AffinePoint<C>: FromEncodedPoint<C>,
{
    let encoded = EncodedPoint::<C>::from_bytes(bytes).ok()?;
    Option::from(AffinePoint::<C>::from_encoded_point(&encoded))
}

impl<'a, C> Decode<'a> for Signature<C>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
{
    fn decode<R: Reader<'a>>(reader: &mut R) -> der::Result<Self> {
        reader.sequence(|sequence| {
            let key_image_octet = OctetStringRef::decode(sequence)?;
            let challenge_octet = UintRef::decode(sequence)?;
            let response_uints = Vec::<UintRef<'_>>::decode(sequence)?;

            let key_image_point = point_from_octet::<C>(key_image_octet.as_bytes())
                .ok_or_else(|| Tag::OctetString.value_error())?;
            let key_image = ProjectivePoint::<C>::from(key_image_point);

            let challenge_seed = scalar_from_be_bytes::<C>(challenge_octet.as_bytes())
                .ok_or_else(|| Tag::Integer.value_error())?;

            if response_uints.is_empty() {
                return Err(Tag::Sequence.value_error());
            }

            let mut responses = Vec::with_capacity(response_uints.len());
            for uint in &response_uints {
                let response = scalar_from_be_bytes::<C>(uint.as_bytes())
                    .ok_or_else(|| Tag::Integer.value_error())?;
                responses.push(response);
            }

            Ok(Signature {
                key_image,
                challenge_seed,
                responses,
            })
        })
    }
}

impl<'a, C> Sequence<'a> for Signature<C>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
    AffinePoint<C>: ToEncodedPoint<C>,
{
    fn fields<F, T>(&self, encoder: F) -> der::Result<T>
    where
        F: FnOnce(&[&dyn Encode]) -> der::Result<T>,
    {
        let key_image_affine = self.key_image.to_affine();
        let key_image_encoded = key_image_affine.to_encoded_point(true);
        let key_image = OctetStringRef::new(key_image_encoded.as_bytes())?;

        let challenge_repr = self.challenge_seed.to_repr();
        let challenge_bytes = der_uint_bytes(challenge_repr.as_ref());
        let challenge = UintRef::new(&challenge_bytes)?;

        // `UintRef` borrows its minimal-form magnitude, so the owning
        // buffers must outlive the `encoder` call below.
        let response_bytes: Vec<Vec<u8>> = self
            .responses
            .iter()
            .map(|response| der_uint_bytes(response.to_repr().as_ref()))
            .collect();
        let responses = response_bytes
            .iter()
            .map(|bytes| UintRef::new(bytes))
            .collect::<der::Result<Vec<_>>>()?;

        encoder(&[&key_image, &challenge, &responses])
    }
}

