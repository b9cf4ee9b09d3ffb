//! Deterministic hashing: bytes→scalar, heterogeneous tuple→scalar,
//! point→point, and a seeded Fisher–Yates shuffle.

use crate::{Error, Result, RingCurve};
use alloc::vec::Vec;
use core::marker::PhantomData;
use crypto_bigint::{CheckedMul, Encoding, NonZero};
use der::{Any, Encode, Tag};
use digest::Digest;
use elliptic_curve::{
    ops::Reduce,
    sec1::{FromEncodedPoint, ModulusSize, ToEncodedPoint},
    AffinePoint, Curve, FieldBytesSize, ProjectivePoint, Scalar,
};
use subtle::ConstantTimeLess;

/// An item that [`Hasher::hash_array`] can fold into its canonical DER
/// `SEQUENCE`.
///
/// This is the closed variant called for by the source design: a text
/// string, an integer (given as the big-endian magnitude of a
/// non-negative value — this covers private scalars, loop counters,
/// and curve-point coordinates alike), or a curve point. Nothing else
/// is hashable; there is no open dynamic dispatch.
pub enum HashItem<'a, C>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
    /// An ASN.1 `UTF8String` (the caller's raw bytes are tagged as-is;
    /// they need not be validated UTF-8, matching how arbitrary
    /// message bytes are treated by the source implementation).
    Text(&'a [u8]),

    /// An ASN.1 `INTEGER`: the big-endian magnitude of a non-negative
    /// value, possibly with leading zero padding (stripped before
    /// encoding).
    Int(&'a [u8]),

    /// An ASN.1 `OCTET STRING` containing the point's compressed SEC1
    /// encoding.
    Point(&'a AffinePoint<C>),
}

/// Deterministic hash bundle: a `(group, digest algorithm)` pairing,
/// validated for compatibility at construction.
///
/// Cheap to copy and clone — it is little more than a precomputed
/// rejection ceiling and a pair of zero-sized markers — so the named
/// instances in [`crate::named`] hand out owned values rather than
/// references.
pub struct Hasher<C, D>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
    /// `C = floor((2^L - 1) / n) * n`, the rejection-sampling ceiling.
    ceiling: C::Uint,
    _digest: PhantomData<D>,
}

impl<C, D> Clone for Hasher<C, D>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, D> Copy for Hasher<C, D>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
{
}

impl<C, D> Hasher<C, D>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
    D: Digest,
{
    /// Construct a hasher for the given curve/digest pairing, checking
    /// the invariants the source design requires:
    ///
    /// - `group.byte_length == digest.output_byte_length`
    /// - `2^L - 1 >= n`, i.e. the digest's range is not narrower than
    ///   the group order.
    pub fn new() -> Result<Self> {
        if D::output_size() != FieldBytesSize::<C>::USIZE {
            return Err(Error::IncompatibleHasher);
        }

        let order = C::ORDER;
        let max = C::Uint::MAX;
        let n = NonZero::new(order).expect("group order is never zero");
        let (quotient, _remainder) = max.div_rem(&n);
        let ceiling = quotient
            .checked_mul(&order)
            .expect("quotient * order never overflows max");

        if bool::from(ceiling.is_zero()) {
            return Err(Error::IncompatibleHasher);
        }

        Ok(Self {
            ceiling,
            _digest: PhantomData,
        })
    }

    /// Uniform hash of a byte string to `[0, n)` via feedback rejection
    /// sampling: repeatedly re-digest the previous digest (not the
    /// original input) until the big-endian value falls below the
    /// precomputed ceiling, then reduce it modulo the group order.
    pub fn hash_string(&self, bytes: &[u8]) -> Scalar<C> {
        let mut state = D::digest(bytes);

        loop {
            let candidate = C::Uint::from_be_slice(&state);

            if bool::from(candidate.ct_lt(&self.ceiling)) {
                return <Scalar<C> as Reduce<C::Uint>>::reduce(candidate);
            }

            state = D::digest(&state);
        }
    }

    /// Canonical hash of a heterogeneous tuple: DER-encode `items` as
    /// an ASN.1 `SEQUENCE` and feed the result to [`Hasher::hash_string`].
    pub fn hash_array(&self, items: &[HashItem<'_, C>]) -> Result<Scalar<C>>
    where
        AffinePoint<C>: ToEncodedPoint<C>,
    {
        let der_bytes = encode_items(items)?;
        Ok(self.hash_string(&der_bytes))
    }

    /// Point-to-point hash: `k·G` where `k = hash_array([P.x, P.y])`.
    ///
    /// Errors if `point` is the identity (it has no affine coordinates
    /// to hash) — callers are expected to have already rejected
    /// identity points at key construction.
    pub fn hash_point(&self, point: &AffinePoint<C>) -> Result<ProjectivePoint<C>>
    where
        AffinePoint<C>: ToEncodedPoint<C> + FromEncodedPoint<C>,
    {
        let encoded = point.to_encoded_point(false);
        let x = encoded.x().ok_or(Error::InvalidEncoding)?;
        let y = encoded.y().ok_or(Error::InvalidEncoding)?;

        let k = self.hash_array(&[HashItem::Int(x), HashItem::Int(y)])?;
        Ok(ProjectivePoint::<C>::generator() * k)
    }

    /// Deterministic bottom-up Fisher–Yates shuffle seeded by `seed`.
    ///
    /// Threads a single `(seed, counter)` pair through the whole
    /// permutation: `seed` never changes, `counter` increments on
    /// every `next_rand` draw (rejected or accepted). For `i` from
    /// `len - 1` down to `1`, draws `r` uniform over `0..=i` and swaps
    /// positions `i` and `r`.
    pub fn shuffle<T>(&self, mut items: Vec<T>, seed: Scalar<C>) -> Vec<T>
    where
        AffinePoint<C>: ToEncodedPoint<C>,
    {
        let mut counter: u64 = 0;

        for i in (1..items.len()).rev() {
            let r = self.next_rand((i + 1) as u64, seed, &mut counter);
            items.swap(i, r as usize);
        }

        items
    }

    /// Draw `r < m` uniformly, by rejection-sampling
    /// `hash_array([seed, counter])` until the result's integer value
    /// is below `n - (n mod m)`, then reducing modulo `m`. `counter`
    /// advances on every attempt.
    fn next_rand(&self, m: u64, seed: Scalar<C>, counter: &mut u64) -> u64
    where
        AffinePoint<C>: ToEncodedPoint<C>,
    {
        let n_mod_m = uint_mod_u64::<C>(C::ORDER, m);
        let threshold = C::ORDER - C::Uint::from(n_mod_m);
        let seed_bytes = seed.to_repr();

        loop {
            let candidate = self.next_scalar_raw(seed_bytes.as_ref(), counter);
            let candidate_uint = scalar_to_uint::<C>(candidate);

            if bool::from(candidate_uint.ct_lt(&threshold)) {
                return uint_mod_u64::<C>(candidate_uint, m);
            }
        }
    }

    /// Draw the next scalar in `[0, n)` deterministically from a fixed
    /// seed and an advancing counter: `hash_array([Int(seed),
    /// Int(counter)])`, incrementing `counter` unconditionally.
    ///
    /// Used directly (no further rejection against a small modulus)
    /// wherever a uniform *scalar* — not a bounded index — is needed,
    /// such as a ring-closure nonce or non-signer response.
    pub(crate) fn next_scalar(&self, seed: Scalar<C>, counter: &mut u64) -> Scalar<C>
    where
        AffinePoint<C>: ToEncodedPoint<C>,
    {
        let seed_bytes = seed.to_repr();
        self.next_scalar_raw(seed_bytes.as_ref(), counter)
    }

    fn next_scalar_raw(&self, seed_bytes: &[u8], counter: &mut u64) -> Scalar<C>
    where
        AffinePoint<C>: ToEncodedPoint<C>,
    {
        let counter_bytes = counter.to_be_bytes();
        let scalar = self
            .hash_array(&[HashItem::Int(seed_bytes), HashItem::Int(&counter_bytes)])
            .expect("Int items always encode");
        *counter += 1;
        scalar
    }

    /// Structural equality of the underlying group and digest algorithm.
    pub fn equals<D2>(&self, other: &Hasher<C, D2>) -> bool
    where
        D: 'static,
        D2: Digest + 'static,
    {
        self.ceiling == other.ceiling_unchecked()
            && core::any::TypeId::of::<D>() == core::any::TypeId::of::<D2>()
    }

    pub(crate) fn ceiling_unchecked(&self) -> C::Uint {
        self.ceiling
    }
}

/// `n mod m` for a big curve order `n` and a small modulus `m`, via
/// long division over `n`'s big-endian bytes.
fn uint_mod_u64<C: RingCurve>(value: C::Uint, m: u64) -> u64
where
    FieldBytesSize<C>: ModulusSize,
{
    let mut acc: u64 = 0;
    for byte in value.to_be_bytes().as_ref() {
        acc = (acc % m) * 256 % m + (*byte as u64) % m;
        acc %= m;
    }
    acc
}

fn scalar_to_uint<C: RingCurve>(scalar: Scalar<C>) -> C::Uint
where
    FieldBytesSize<C>: ModulusSize,
{
    C::Uint::from_be_slice(scalar.to_repr().as_ref())
}

/// Strip superfluous leading zero bytes, then prefix a single `0x00`
/// if the remaining magnitude's top bit is set — the canonical,
/// minimal-length two's-complement DER encoding of a non-negative
/// integer.
pub(crate) fn der_uint_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut i = 0;
    while i + 1 < bytes.len() && bytes[i] == 0 {
        i += 1;
    }
    let trimmed = &bytes[i..];

    if trimmed.first().copied().unwrap_or(0) & 0x80 != 0 {
        let mut out = Vec::with_capacity(trimmed.len() + 1);
        out.push(0);
        out.extend_from_slice(trimmed);
        out
    } else {
        trimmed.to_vec()
    }
}

pub(crate) fn encode_items<C>(items: &[HashItem<'_, C>]) -> Result<Vec<u8>>
where
    C: RingCurve,
    FieldBytesSize<C>: ModulusSize,
    AffinePoint<C>: ToEncodedPoint<C>,
{
    let mut parts = Vec::with_capacity(items.len());

    for item in items {
        let any = match item {
            HashItem::Text(bytes) => Any::new(Tag::Utf8String, *bytes)?,
            HashItem::Int(bytes) => Any::new(Tag::Integer, der_uint_bytes(bytes))?,
            HashItem::Point(point) => {
                let encoded = point.to_encoded_point(true);
                Any::new(Tag::OctetString, encoded.as_bytes())?
            }
        };
        parts.push(any);
    }

    parts.to_der().map_err(Error::from)
}
