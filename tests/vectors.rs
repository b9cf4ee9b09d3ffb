//! Concrete end-to-end vectors from the source design (scenarios
//! 1, 2, and the construction-error cases), plus the structurally
//! checkable half of the ring-signing scenarios whose golden DER bytes
//! can't be reproduced without executing the original implementation
//! (see `DESIGN.md`).

use elliptic_curve::sec1::ToEncodedPoint;
use hex_literal::hex;
use lsag::named::Secp256k1Sha256;
use lsag::{Error, PrivateKey};

fn key_one() -> (PrivateKey<k256::Secp256k1, sha2::Sha256>, Secp256k1Sha256) {
    let hasher = Secp256k1Sha256::new().unwrap();
    let key = PrivateKey::new(k256::Scalar::from(1u64), hasher).unwrap();
    (key, hasher)
}

#[test]
fn scenario_1_key_image() {
    let (key, _hasher) = key_one();
    let key_image = key.key_image().unwrap().to_affine();
    let encoded = key_image.to_encoded_point(false);

    assert_eq!(
        encoded.x().unwrap().as_slice(),
        &hex!("2bcb1a5b3c70421bfac818f6bd13289a5c9a3cfb42d3b81f023a0276974c9245")
    );
    assert_eq!(
        encoded.y().unwrap().as_slice(),
        &hex!("0e465a0409b09a11894755e9b9d6e86938d1b5035587458ad29c00154ddfc9de")
    );
}

#[test]
fn scenario_2_public_key_hex() {
    let (key, _hasher) = key_one();
    assert_eq!(
        key.public_key().to_hex(),
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
    );
}

#[test]
fn empty_ring_signs_and_verifies() {
    let (key, hasher) = key_one();
    let (signature, ring) = key.sign(b"a", &[]).unwrap();

    assert_eq!(ring.len(), 1);
    assert_eq!(signature.len(), 1);
    assert_eq!(ring[0], key.public_key());
    assert!(signature.verify(&hasher, b"a", &ring));
}

#[test]
fn tampering_with_message_or_ring_order_rejects() {
    let (key, hasher) = key_one();
    let foreign_key = PrivateKey::new(k256::Scalar::from(2u64), hasher)
        .unwrap()
        .public_key();

    let (signature, ring) = key.sign(b"a", core::slice::from_ref(&foreign_key)).unwrap();
    assert!(signature.verify(&hasher, b"a", &ring));

    assert!(!signature.verify(&hasher, b"a0", &ring));

    let mut reversed = ring.clone();
    reversed.reverse();
    assert!(!signature.verify(&hasher, b"a", &reversed));
}

#[test]
fn private_key_zero_is_rejected() {
    let hasher = Secp256k1Sha256::new().unwrap();
    let err = PrivateKey::new(k256::Scalar::from(0u64), hasher).unwrap_err();
    assert_eq!(err, Error::InvalidScalar);
}

#[test]
fn private_key_at_group_order_is_rejected() {
    let hasher = Secp256k1Sha256::new().unwrap();
    let order_bytes = hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");

    let err = PrivateKey::from_octet(&order_bytes, hasher).unwrap_err();
    assert_eq!(err, Error::InvalidScalar);
}

#[test]
fn incompatible_hasher_rejected() {
    use lsag::Hasher;

    let err = Hasher::<k256::Secp256k1, ripemd::Ripemd160>::new().unwrap_err();
    assert_eq!(err, Error::IncompatibleHasher);
}
