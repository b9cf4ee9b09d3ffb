//! Property-based tests of the invariants/laws from `spec.md` §8.

use elliptic_curve::sec1::ToEncodedPoint;
use lsag::named::Secp256k1Sha256;
use lsag::{PrivateKey, PublicKey, Signature};
use proptest::prelude::*;

/// `ProjectivePoint` doesn't implement `Debug`; compare key images by
/// their compressed encoding instead.
fn key_image_bytes(
    point: k256::ProjectivePoint,
) -> elliptic_curve::sec1::EncodedPoint<k256::Secp256k1> {
    point.to_affine().to_encoded_point(true)
}

fn hasher() -> Secp256k1Sha256 {
    Secp256k1Sha256::new().unwrap()
}

/// A `proptest` strategy over scalar seeds, excluding zero (which
/// `PrivateKey::new` rejects).
fn nonzero_u64() -> impl Strategy<Value = u64> {
    1u64..=u64::MAX
}

fn key_from_u64(n: u64) -> PrivateKey<k256::Secp256k1, sha2::Sha256> {
    PrivateKey::new(k256::Scalar::from(n), hasher()).unwrap()
}

fn foreign_keys(seeds: &[u64]) -> Vec<PublicKey<k256::Secp256k1, sha2::Sha256>> {
    seeds
        .iter()
        .map(|&s| key_from_u64(s).public_key())
        .collect()
}

proptest! {
    #[test]
    fn sign_then_verify_succeeds(
        secret in nonzero_u64(),
        message in any::<Vec<u8>>(),
        foreign in proptest::collection::vec(nonzero_u64(), 0..5),
    ) {
        let key = key_from_u64(secret);
        let h = hasher();
        let foreign_keys = foreign_keys(&foreign);

        let (signature, ring) = key.sign(&message, &foreign_keys).unwrap();
        prop_assert!(signature.verify(&h, &message, &ring));
    }

    #[test]
    fn verify_rejects_a_different_message(
        secret in nonzero_u64(),
        message in any::<Vec<u8>>(),
        other_message in any::<Vec<u8>>(),
        foreign in proptest::collection::vec(nonzero_u64(), 0..5),
    ) {
        prop_assume!(message != other_message);

        let key = key_from_u64(secret);
        let h = hasher();
        let foreign_keys = foreign_keys(&foreign);

        let (signature, ring) = key.sign(&message, &foreign_keys).unwrap();
        prop_assert!(!signature.verify(&h, &other_message, &ring));
    }

    #[test]
    fn verify_rejects_a_reordered_ring(
        secret in nonzero_u64(),
        message in any::<Vec<u8>>(),
        foreign in proptest::collection::vec(nonzero_u64(), 2..5),
    ) {
        let key = key_from_u64(secret);
        let h = hasher();
        let foreign_keys = foreign_keys(&foreign);

        let (signature, ring) = key.sign(&message, &foreign_keys).unwrap();
        let mut reversed = ring.clone();
        reversed.reverse();

        // Reversing a ring of size < 2 is a no-op; only assert rejection
        // when the reversal actually changes the order.
        prop_assume!(reversed != ring);
        prop_assert!(!signature.verify(&h, &message, &reversed));
    }

    #[test]
    fn key_image_is_independent_of_the_ring(
        secret in nonzero_u64(),
        message in any::<Vec<u8>>(),
        foreign_a in proptest::collection::vec(nonzero_u64(), 0..4),
        foreign_b in proptest::collection::vec(nonzero_u64(), 0..4),
    ) {
        let key = key_from_u64(secret);
        let keys_a = foreign_keys(&foreign_a);
        let keys_b = foreign_keys(&foreign_b);

        let (sig_a, _) = key.sign(&message, &keys_a).unwrap();
        let (sig_b, _) = key.sign(&message, &keys_b).unwrap();

        prop_assert_eq!(key_image_bytes(sig_a.key_image()), key_image_bytes(sig_b.key_image()));
        prop_assert_eq!(key_image_bytes(sig_a.key_image()), key_image_bytes(key.key_image().unwrap()));
    }

    #[test]
    fn private_key_octet_round_trips(secret in nonzero_u64()) {
        let key = key_from_u64(secret);
        let h = hasher();

        let hex = key.to_hex();
        let decoded = PrivateKey::from_hex(&hex, h).unwrap();
        prop_assert!(key == decoded);

        let octet = key.to_octet();
        let decoded = PrivateKey::from_octet(&octet, h).unwrap();
        prop_assert!(key == decoded);
    }

    #[test]
    fn public_key_octet_round_trips(secret in nonzero_u64()) {
        let key = key_from_u64(secret);
        let public = key.public_key();
        let h = hasher();

        let hex = public.to_hex();
        let decoded = PublicKey::from_hex(&hex, h).unwrap();
        prop_assert!(public == decoded);

        let octet = public.to_octet();
        let decoded = PublicKey::from_octet(&octet, h).unwrap();
        prop_assert!(public == decoded);
    }

    #[test]
    fn signature_der_round_trips(
        secret in nonzero_u64(),
        message in any::<Vec<u8>>(),
        foreign in proptest::collection::vec(nonzero_u64(), 0..4),
    ) {
        let key = key_from_u64(secret);
        let foreign_keys = foreign_keys(&foreign);

        let (signature, _ring) = key.sign(&message, &foreign_keys).unwrap();
        let der = signature.to_der().unwrap();

        let decoded: Signature<k256::Secp256k1> = Signature::from_der(&der).unwrap();
        let redecoded_der = decoded.to_der().unwrap();

        prop_assert_eq!(der, redecoded_der);
    }
}

#[test]
fn signer_position_is_a_deterministic_function_of_inputs() {
    let key = key_from_u64(7);
    let foreign = foreign_keys(&[1, 2, 3]);

    let (_sig_a, ring_a) = key.sign(b"hello", &foreign).unwrap();
    let (_sig_b, ring_b) = key.sign(b"hello", &foreign).unwrap();

    assert_eq!(ring_a, ring_b);
}
