//! Elliptic curve abstraction over prime fields.
//!
//! [`CurveParams`] is a plain container for the domain parameters of a short
//! Weierstrass curve, without any bound arithmetic. A curve implementation
//! embeds a `CurveParams` and implements the [`Curve`] trait on top of it,
//! so further curves can be added without touching the signature layer.

use core::fmt::Debug;

use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};

use crate::error::Result;

/// Domain parameters of a short Weierstrass curve `y² = x³ + ax + b` with
/// `a = 0` over the prime field `GF(P)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveParams {
    /// Field prime.
    pub p: BigUint,
    /// Order of the subgroup generated by `(gx, gy)`.
    pub n: BigUint,
    /// Curve equation constant `b`.
    pub b: BigUint,
    /// X coordinate of the generator.
    pub gx: BigUint,
    /// Y coordinate of the generator.
    pub gy: BigUint,
    /// Bit size of the underlying field.
    pub bit_size: usize,
    /// Canonical name of the curve.
    pub name: &'static str,
}

/// Operations required of an elliptic curve.
///
/// Affine points are passed as bare `(x, y)` coordinate pairs; the pair
/// `(0, 0)` stands for the point at infinity, which is safe because `(0, 0)`
/// does not satisfy the equation of any supported curve.
pub trait Curve: Debug + Send + Sync {
    /// Returns the parameters for the curve.
    fn params(&self) -> &CurveParams;

    /// Reports whether the given `(x, y)` lies on the curve.
    fn is_on_curve(&self, x: &BigUint, y: &BigUint) -> bool;

    /// Returns the sum of `(x1, y1)` and `(x2, y2)`.
    fn add(&self, x1: &BigUint, y1: &BigUint, x2: &BigUint, y2: &BigUint) -> (BigUint, BigUint);

    /// Returns `2 * (x, y)`.
    fn double(&self, x: &BigUint, y: &BigUint) -> (BigUint, BigUint);

    /// Returns `k * (bx, by)` where `k` is a scalar in big-endian form.
    ///
    /// Leading zero bytes of `k` are tolerated and processed like any other
    /// bits.
    fn scalar_mult(&self, bx: &BigUint, by: &BigUint, k: &[u8]) -> (BigUint, BigUint);

    /// Returns `k * G` where `G` is the base point of the group and `k` is a
    /// scalar in big-endian form.
    fn scalar_base_mult(&self, k: &[u8]) -> (BigUint, BigUint);

    /// Recovers the Y coordinate with the given parity for the X coordinate.
    ///
    /// Fails with [`Error::OddnessMismatch`](crate::Error::OddnessMismatch)
    /// when `x` admits no square root of `x³ + b` under the requested
    /// parity. On-curve membership of the result is not verified here;
    /// callers validate.
    fn decompress_point(&self, x: &BigUint, y_odd: bool) -> Result<BigUint>;
}

/// Masks off excess high bits when the field size is not a whole number of
/// bytes, indexed by `bit_size mod 8`.
const MASK: [u8; 8] = [0xff, 0x1, 0x3, 0x7, 0xf, 0x1f, 0x3f, 0x7f];

/// Returns a public/private key pair over the given curve.
///
/// The private scalar is returned as a big-endian byte string of the curve's
/// field size, together with the affine coordinates of the public point. The
/// only error source is the random byte reader.
pub fn generate_key(
    curve: &dyn Curve,
    rng: &mut (impl CryptoRng + RngCore),
) -> Result<(Vec<u8>, BigUint, BigUint)> {
    let n = &curve.params().n;
    let bit_size = n.bits() as usize;
    let byte_len = (bit_size + 7) >> 3;
    let mut secret = vec![0u8; byte_len];

    loop {
        rng.try_fill_bytes(&mut secret)?;
        secret[0] &= MASK[bit_size % 8];
        // An all-zeros test reader would otherwise yield the point at
        // infinity and loop forever.
        secret[1] ^= 0x42;

        // Out-of-range scalars are resampled rather than reduced.
        if BigUint::from_bytes_be(&secret) >= *n {
            continue;
        }

        let (x, y) = curve.scalar_base_mult(&secret);
        return Ok((secret, x, y));
    }
}

#[cfg(test)]
mod tests {
    use rand_core::{CryptoRng, Error as RngError, RngCore};

    use super::generate_key;
    use crate::arithmetic::secp256k1;
    use crate::curve::Curve;
    use crate::error::Error;

    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RngError> {
            dest.fill(0);
            Ok(())
        }
    }

    impl CryptoRng for ZeroRng {}

    struct FailRng;

    impl RngCore for FailRng {
        fn next_u32(&mut self) -> u32 {
            unimplemented!()
        }

        fn next_u64(&mut self) -> u64 {
            unimplemented!()
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unimplemented!()
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), RngError> {
            Err(RngError::new("reader out of entropy"))
        }
    }

    impl CryptoRng for FailRng {}

    #[test]
    fn zero_reader_produces_fixed_scalar() {
        let curve = secp256k1();
        let (secret, x, y) = generate_key(curve, &mut ZeroRng).unwrap();

        let mut expected = [0u8; 32];
        expected[1] = 0x42;
        assert_eq!(secret, expected);
        assert!(curve.is_on_curve(&x, &y));
    }

    #[test]
    fn reader_error_is_propagated() {
        let err = generate_key(secp256k1(), &mut FailRng).unwrap_err();
        assert!(matches!(err, Error::Randomness(_)));
    }
}
