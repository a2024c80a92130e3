//! ECDSA signing and verification tests.

use koblitz256::num_bigint::BigUint;
use koblitz256::{ecdsa, secp256k1, Curve, PublicKey, SecretKey, Signature};
use proptest::prelude::*;
use rand_core::OsRng;
use sha2::{Digest, Sha256};

#[test]
fn generated_key_is_on_curve() {
    let secret_key = SecretKey::random(secp256k1(), &mut OsRng).unwrap();
    let public_key = secret_key.public_key();

    assert!(secp256k1().is_on_curve(public_key.x(), public_key.y()));
}

#[test]
fn sign_and_verify() {
    let secret_key = SecretKey::random(secp256k1(), &mut OsRng).unwrap();

    let mut digest: [u8; 32] = Sha256::digest(b"testing").into();
    let signature = secret_key.sign(&mut OsRng, &digest).unwrap();

    assert!(secret_key.public_key().verify(&digest, &signature));

    // Any change to the digest must invalidate the signature.
    digest[0] = !digest[0];
    assert!(!secret_key.public_key().verify(&digest, &signature));
}

#[test]
fn verify_with_wrong_key_fails() {
    let secret_key = SecretKey::random(secp256k1(), &mut OsRng).unwrap();
    let other = SecretKey::random(secp256k1(), &mut OsRng).unwrap();

    let digest: [u8; 32] = Sha256::digest(b"testing").into();
    let signature = secret_key.sign(&mut OsRng, &digest).unwrap();

    assert!(!other.public_key().verify(&digest, &signature));
}

#[test]
fn zero_digest_signature() {
    let secret_key = SecretKey::random(secp256k1(), &mut OsRng).unwrap();
    let zeros = [0u8; 64];

    let signature = secret_key.sign(&mut OsRng, &zeros).unwrap();
    assert!(secret_key.public_key().verify(&zeros, &signature));
}

#[test]
fn der_round_trip() {
    let secret_key = SecretKey::random(secp256k1(), &mut OsRng).unwrap();

    let digest: [u8; 32] = Sha256::digest(b"Hello World").into();
    let signature = secret_key.sign(&mut OsRng, &digest).unwrap();

    let der = signature.to_der().unwrap();
    let decoded = Signature::from_der(&der).unwrap();

    assert_eq!(decoded, signature);
    assert!(secret_key.public_key().verify(&digest, &decoded));
}

#[test]
fn sign_der_produces_verifiable_signature() {
    let secret_key = SecretKey::random(secp256k1(), &mut OsRng).unwrap();

    let digest: [u8; 32] = Sha256::digest(b"Hello World").into();
    let der = secret_key.sign_der(&mut OsRng, &digest).unwrap();

    let signature = Signature::from_der(&der).unwrap();
    assert!(secret_key.public_key().verify(&digest, &signature));
}

#[test]
fn verify_rejects_out_of_range_scalars() {
    let secret_key = SecretKey::random(secp256k1(), &mut OsRng).unwrap();
    let public_key = secret_key.public_key();

    let digest: [u8; 32] = Sha256::digest(b"testing").into();
    let signature = secret_key.sign(&mut OsRng, &digest).unwrap();

    let n = secp256k1().params().n.clone();
    let zero = BigUint::from(0u32);

    let cases = [
        Signature::from_scalars(zero.clone(), signature.s().clone()),
        Signature::from_scalars(signature.r().clone(), zero),
        Signature::from_scalars(n.clone(), signature.s().clone()),
        Signature::from_scalars(signature.r().clone(), n),
    ];
    for bad in &cases {
        assert!(!public_key.verify(&digest, bad));
    }
}

#[test]
fn secret_key_from_one_gives_base_point() {
    let mut bytes = [0u8; 32];
    bytes[31] = 1;

    let secret_key = SecretKey::from_be_bytes(secp256k1(), &bytes).unwrap();
    let params = secp256k1().params();

    assert_eq!(*secret_key.public_key().x(), params.gx);
    assert_eq!(*secret_key.public_key().y(), params.gy);
    assert_eq!(secret_key.to_be_bytes(), bytes);
}

#[test]
fn secret_key_rejects_out_of_range_scalars() {
    assert!(SecretKey::from_be_bytes(secp256k1(), &[0u8; 32]).is_err());

    let n = secp256k1().params().n.to_bytes_be();
    assert!(SecretKey::from_be_bytes(secp256k1(), &n).is_err());
}

#[test]
fn free_function_interface() {
    let secret_key = SecretKey::random(secp256k1(), &mut OsRng).unwrap();
    let digest: [u8; 32] = Sha256::digest(b"free functions").into();

    let signature = ecdsa::sign(&mut OsRng, &secret_key, &digest).unwrap();
    assert!(ecdsa::verify(secret_key.public_key(), &digest, &signature));
}

prop_compose! {
    /// Keys with scalars reduced into `[1, n-1]`, so every strategy output
    /// is a valid key.
    fn secret_key()(bytes in any::<[u8; 32]>()) -> SecretKey {
        let n = &secp256k1().params().n;
        let d = BigUint::from_bytes_be(&bytes) % (n - 1u32) + 1u32;
        SecretKey::from_be_bytes(secp256k1(), &d.to_bytes_be()).unwrap()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn sign_verify_round_trip(secret_key in secret_key(), digest in any::<[u8; 32]>()) {
        let signature = secret_key.sign(&mut OsRng, &digest).unwrap();
        prop_assert!(secret_key.public_key().verify(&digest, &signature));
    }

    #[test]
    fn parse_inverts_compress(secret_key in secret_key()) {
        let public_key = secret_key.public_key();

        let compressed = PublicKey::parse(secp256k1(), &public_key.to_compressed_bytes()).unwrap();
        prop_assert_eq!(&compressed, public_key);

        let uncompressed =
            PublicKey::parse(secp256k1(), &public_key.to_uncompressed_bytes()).unwrap();
        prop_assert_eq!(&uncompressed, public_key);
    }

    #[test]
    fn scalar_mult_agrees_with_base_mult(k in any::<[u8; 32]>()) {
        let curve = secp256k1();
        let params = curve.params();

        prop_assert_eq!(
            curve.scalar_mult(&params.gx, &params.gy, &k),
            curve.scalar_base_mult(&k)
        );
    }
}
