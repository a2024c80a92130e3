//! Elliptic Curve Digital Signature Algorithm.
//!
//! Signing and verification consume a message digest that has already been
//! produced by a hash function of the caller's choosing, and reach the
//! curve only through the [`Curve`] trait.
//!
//! References:
//! - NSA Suite B implementer's guide to FIPS 186-3
//! - SEC 1: Elliptic Curve Cryptography, <https://www.secg.org/sec1-v2.pdf>

use der::asn1::UintRef;
use der::{Decode, Encode, Sequence};
use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};

use crate::curve::Curve;
use crate::error::Result;

mod signing;
mod verifying;

pub use self::signing::sign;
pub use self::verifying::verify;

/// An ECDSA signature: the scalar pair `(r, s)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

/// Borrowed DER view of a signature, `SEQUENCE { r INTEGER, s INTEGER }`.
#[derive(Sequence)]
struct SignatureRef<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

impl Signature {
    /// Assembles a signature from its two scalars.
    pub fn from_scalars(r: BigUint, s: BigUint) -> Self {
        Signature { r, s }
    }

    /// The `r` scalar.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// The `s` scalar.
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Encodes the signature as an ASN.1 DER `SEQUENCE` of the two
    /// unsigned `INTEGER`s `r` and `s`, in that order.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let r = self.r.to_bytes_be();
        let s = self.s.to_bytes_be();

        let der = SignatureRef {
            r: UintRef::new(&r)?,
            s: UintRef::new(&s)?,
        }
        .to_der()?;

        Ok(der)
    }

    /// Decodes a signature from its ASN.1 DER form.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let sig = SignatureRef::from_der(bytes)?;

        Ok(Signature {
            r: BigUint::from_bytes_be(sig.r.as_bytes()),
            s: BigUint::from_bytes_be(sig.s.as_bytes()),
        })
    }
}

/// Computes `k⁻¹ mod n` for prime `n` as `k^(n-2) mod n`, Fermat's method.
///
/// Exponentiation has somewhat better timing behavior than the extended
/// Euclidean algorithm, though the big-integer arithmetic underneath is
/// still variable-time.
pub(crate) fn fermat_inverse(k: &BigUint, n: &BigUint) -> BigUint {
    let n_minus_two = n - 2u32;
    k.modpow(&n_minus_two, n)
}

/// Converts a digest to an integer the way SEC 1 and OpenSSL do: keep the
/// leading `ceil(orderBits / 8)` bytes, then shift out any bits in excess
/// of the order's bit length.
pub(crate) fn hash_to_int(digest: &[u8], curve: &dyn Curve) -> BigUint {
    let order_bits = curve.params().n.bits() as usize;
    let order_bytes = (order_bits + 7) / 8;

    let digest = if digest.len() > order_bytes {
        &digest[..order_bytes]
    } else {
        digest
    };

    let mut e = BigUint::from_bytes_be(digest);
    if digest.len() * 8 > order_bits {
        e >>= digest.len() * 8 - order_bits;
    }
    e
}

/// Returns a uniformly random scalar in `[1, n-1]`.
///
/// Reads `bit_size/8 + 8` bytes and reduces modulo `n - 1`, which leaves a
/// negligible bias, then shifts into range by adding one.
pub(crate) fn rand_field_element(
    curve: &dyn Curve,
    rng: &mut (impl CryptoRng + RngCore),
) -> Result<BigUint> {
    let params = curve.params();
    let mut bytes = vec![0u8; params.bit_size / 8 + 8];
    rng.try_fill_bytes(&mut bytes)?;

    let n_minus_one = &params.n - 1u32;
    let k = BigUint::from_bytes_be(&bytes) % n_minus_one + 1u32;

    Ok(k)
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::{fermat_inverse, hash_to_int};
    use crate::arithmetic::secp256k1;
    use crate::curve::Curve;

    #[test]
    fn fermat_inverse_matches_modinv() {
        let n = &secp256k1().params().n;
        let k = BigUint::from(0xdeadbeefu32);

        assert_eq!(fermat_inverse(&k, n), k.modinv(n).unwrap());
    }

    #[test]
    fn hash_to_int_truncates_long_digests() {
        let curve = secp256k1();

        // A 64-byte digest keeps only its first 32 bytes.
        let mut digest = [0u8; 64];
        digest[..32].copy_from_slice(&[0xabu8; 32]);
        digest[32..].copy_from_slice(&[0xcdu8; 32]);

        assert_eq!(
            hash_to_int(&digest, curve),
            BigUint::from_bytes_be(&[0xabu8; 32])
        );
    }

    #[test]
    fn hash_to_int_keeps_short_digests() {
        let curve = secp256k1();
        let digest = [0x01u8, 0x02, 0x03];

        assert_eq!(
            hash_to_int(&digest, curve),
            BigUint::from(0x010203u32)
        );
    }
}
