//! Jacobian point arithmetic and the secp256k1 curve instance.
//!
//! Group operations are carried out in Jacobian coordinates: an affine
//! position `(x, y)` maps to `(X, Y, Z)` with `x = X/Z²` and `y = Y/Z³`,
//! which keeps whole scalar multiplications free of field inversions. The
//! formulas are `add-2007-bl` and `dbl-2009-l` from the Explicit-Formulas
//! Database:
//!
//! <http://hyperelliptic.org/EFD/g1p/auto-shortw-jacobian-0.html>
//!
//! All arithmetic is variable-time.

use std::sync::OnceLock;

use hex_literal::hex;
use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::curve::{Curve, CurveParams};
use crate::error::{Error, Result};
use crate::sec1;

/// Projective point used inside the engine. `z = 0` marks the point at
/// infinity.
#[derive(Clone, Debug)]
struct JacobianPoint {
    x: BigUint,
    y: BigUint,
    z: BigUint,
}

impl JacobianPoint {
    fn infinity() -> Self {
        JacobianPoint {
            x: BigUint::zero(),
            y: BigUint::zero(),
            z: BigUint::zero(),
        }
    }
}

/// Returns the Jacobian Z value for the affine point `(x, y)`: zero when
/// both coordinates are zero, since `(0, 0)` stands for the point at
/// infinity, and one otherwise.
fn z_for_affine(x: &BigUint, y: &BigUint) -> BigUint {
    if x.is_zero() && y.is_zero() {
        BigUint::zero()
    } else {
        BigUint::one()
    }
}

/// Computes `(a - b) mod p` for operands already reduced mod `p`.
fn sub_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    ((p + a) - b) % p
}

/// Returns a square root of `a` modulo the odd prime `p`, or `None` when
/// `a` is a quadratic non-residue.
///
/// For `p ≡ 3 (mod 4)` a single exponentiation by `(p + 1) / 4` suffices;
/// other primes take the general Tonelli-Shanks ladder.
fn mod_sqrt(a: &BigUint, p: &BigUint) -> Option<BigUint> {
    if a.is_zero() {
        return Some(BigUint::zero());
    }

    let one = BigUint::one();
    let legendre_exp = (p - &one) >> 1u32;
    if a.modpow(&legendre_exp, p) != one {
        return None;
    }

    if p % 4u32 == BigUint::from(3u32) {
        let exp = (p + &one) >> 2u32;
        return Some(a.modpow(&exp, p));
    }

    // Tonelli-Shanks. Write p - 1 = q * 2^s with q odd.
    let mut q = p - &one;
    let mut s = 0u64;
    while !q.bit(0) {
        q >>= 1u32;
        s += 1;
    }

    // Any quadratic non-residue works as the ladder seed.
    let mut z = BigUint::from(2u32);
    while z.modpow(&legendre_exp, p) == one {
        z += 1u32;
    }

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = a.modpow(&q, p);
    let mut r = a.modpow(&((&q + &one) >> 1u32), p);

    while t != one {
        let mut i = 0u64;
        let mut t2 = t.clone();
        while t2 != one {
            t2 = (&t2 * &t2) % p;
            i += 1;
        }

        let b = c.modpow(&(BigUint::one() << (m - i - 1)), p);
        m = i;
        c = (&b * &b) % p;
        t = (t * &c) % p;
        r = (r * b) % p;
    }

    Some(r)
}

/// Generic short Weierstrass curve with `a = 0`, in the family of the
/// Koblitz curve secp256k1.
///
/// Implements [`Curve`] for any [`CurveParams`] of that shape; secp256k1 is
/// the one instance constructed by this crate, via [`secp256k1`].
#[derive(Clone, Debug)]
pub struct KoblitzCurve {
    params: CurveParams,
}

impl KoblitzCurve {
    /// Builds a curve from its domain parameters.
    pub fn new(params: CurveParams) -> Self {
        KoblitzCurve { params }
    }

    /// Reverses the Jacobian transform, reducing `(X, Y, Z)` to affine
    /// coordinates. The point at infinity comes back as `(0, 0)`.
    fn affine_from_jacobian(&self, point: &JacobianPoint) -> (BigUint, BigUint) {
        let p = &self.params.p;
        if point.z.is_zero() {
            return (BigUint::zero(), BigUint::zero());
        }

        let z_inv = match point.z.modinv(p) {
            Some(inv) => inv,
            // z is nonzero and reduced, so this arm is unreachable for a
            // prime modulus; fold it into the infinity convention.
            None => return (BigUint::zero(), BigUint::zero()),
        };

        let z_inv2 = (&z_inv * &z_inv) % p;
        let x = (&point.x * &z_inv2) % p;
        let z_inv3 = (z_inv2 * z_inv) % p;
        let y = (&point.y * z_inv3) % p;

        (x, y)
    }

    /// Sum of two Jacobian points, `add-2007-bl`.
    ///
    /// Either operand with `Z = 0` passes the other through. Equal operands
    /// degenerate to infinity under this formula; callers needing `P + P`
    /// go through [`KoblitzCurve::double_jacobian`].
    fn add_jacobian(&self, p1: &JacobianPoint, p2: &JacobianPoint) -> JacobianPoint {
        if p1.z.is_zero() {
            return p2.clone();
        }
        if p2.z.is_zero() {
            return p1.clone();
        }

        let p = &self.params.p;

        let z1z1 = (&p1.z * &p1.z) % p;
        let z2z2 = (&p2.z * &p2.z) % p;

        let u1 = (&p1.x * &z2z2) % p;
        let u2 = (&p2.x * &z1z1) % p;
        let s1 = (&p1.y * &z2z2 * &p2.z) % p;
        let s2 = (&p2.y * &z1z1 * &p1.z) % p;

        let h = sub_mod(&u2, &u1, p);
        let h2 = (&h << 1u32) % p;
        let i = (&h2 * &h2) % p;
        let j = (&h * &i) % p;
        let r = (sub_mod(&s2, &s1, p) << 1u32) % p;
        let v = (&u1 * &i) % p;

        // x3 = r² - j - 2v
        let r2 = (&r * &r) % p;
        let x3 = sub_mod(&sub_mod(&sub_mod(&r2, &j, p), &v, p), &v, p);

        // y3 = r*(v - x3) - 2*s1*j
        let s1j = (&s1 * &j) % p;
        let s1j2 = (s1j << 1u32) % p;
        let rv = (&r * &sub_mod(&v, &x3, p)) % p;
        let y3 = sub_mod(&rv, &s1j2, p);

        // z3 = ((z1 + z2)² - z1² - z2²) * h
        let zsum = (&p1.z + &p2.z) % p;
        let zsum2 = (&zsum * &zsum) % p;
        let z3 = (sub_mod(&sub_mod(&zsum2, &z1z1, p), &z2z2, p) * h) % p;

        JacobianPoint {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Double of a Jacobian point, `dbl-2009-l`.
    fn double_jacobian(&self, point: &JacobianPoint) -> JacobianPoint {
        let p = &self.params.p;

        let a = (&point.x * &point.x) % p;
        let b = (&point.y * &point.y) % p;
        let c = (&b * &b) % p;

        // d = 2*((x + b)² - a - c)
        let xb = (&point.x + &b) % p;
        let xb2 = (&xb * &xb) % p;
        let d = (sub_mod(&sub_mod(&xb2, &a, p), &c, p) << 1u32) % p;

        // e = 3a, f = e²
        let e = ((&a << 1u32) + &a) % p;
        let f = (&e * &e) % p;

        // x3 = f - 2d
        let x3 = sub_mod(&sub_mod(&f, &d, p), &d, p);

        // y3 = e*(d - x3) - 8c
        let c8 = (&c << 3u32) % p;
        let ed = (&e * &sub_mod(&d, &x3, p)) % p;
        let y3 = sub_mod(&ed, &c8, p);

        // z3 = 2*y*z
        let z3 = ((&point.y * &point.z) << 1u32) % p;

        JacobianPoint {
            x: x3,
            y: y3,
            z: z3,
        }
    }
}

impl Curve for KoblitzCurve {
    fn params(&self) -> &CurveParams {
        &self.params
    }

    fn is_on_curve(&self, x: &BigUint, y: &BigUint) -> bool {
        let p = &self.params.p;

        // y² = x³ + b
        let y2 = (y * y) % p;
        let rhs = ((x * x % p) * x + &self.params.b) % p;

        y2 == rhs
    }

    fn add(&self, x1: &BigUint, y1: &BigUint, x2: &BigUint, y2: &BigUint) -> (BigUint, BigUint) {
        let z1 = z_for_affine(x1, y1);
        let z2 = z_for_affine(x2, y2);

        // add-2007-bl degenerates to infinity when both operands are the
        // same point; that case belongs to the doubling formula. Opposite
        // points (x1 == x2, y1 != y2) fall through and sum to infinity.
        if !z1.is_zero() && !z2.is_zero() && x1 == x2 && y1 == y2 {
            return self.double(x1, y1);
        }

        let p1 = JacobianPoint {
            x: x1.clone(),
            y: y1.clone(),
            z: z1,
        };
        let p2 = JacobianPoint {
            x: x2.clone(),
            y: y2.clone(),
            z: z2,
        };

        self.affine_from_jacobian(&self.add_jacobian(&p1, &p2))
    }

    fn double(&self, x: &BigUint, y: &BigUint) -> (BigUint, BigUint) {
        let point = JacobianPoint {
            x: x.clone(),
            y: y.clone(),
            z: z_for_affine(x, y),
        };

        self.affine_from_jacobian(&self.double_jacobian(&point))
    }

    fn scalar_mult(&self, bx: &BigUint, by: &BigUint, k: &[u8]) -> (BigUint, BigUint) {
        let base = JacobianPoint {
            x: bx.clone(),
            y: by.clone(),
            z: BigUint::one(),
        };

        // Left-to-right double-and-add over all 8*len(k) bits. Leading zero
        // bits only double the accumulator while it is still infinity.
        let mut acc = JacobianPoint::infinity();
        for byte in k {
            let mut b = *byte;
            for _ in 0..8 {
                acc = self.double_jacobian(&acc);
                if b & 0x80 == 0x80 {
                    acc = self.add_jacobian(&base, &acc);
                }
                b <<= 1;
            }
        }

        self.affine_from_jacobian(&acc)
    }

    fn scalar_base_mult(&self, k: &[u8]) -> (BigUint, BigUint) {
        self.scalar_mult(&self.params.gx, &self.params.gy, k)
    }

    fn decompress_point(&self, x: &BigUint, y_odd: bool) -> Result<BigUint> {
        let p = &self.params.p;

        // y = ±sqrt(x³ + b)
        let t = ((x * x % p) * x + &self.params.b) % p;
        let mut y = mod_sqrt(&t, p).ok_or(Error::OddnessMismatch)?;

        if sec1::is_odd(&y) != y_odd {
            y = (p - &y) % p;
        }
        if sec1::is_odd(&y) != y_odd {
            // y = 0 is its own negation, so no root of the requested
            // parity exists.
            return Err(Error::OddnessMismatch);
        }

        Ok(y)
    }
}

/// Returns the process-wide secp256k1 curve.
///
/// The instance is built on first use; concurrent first calls all observe
/// the fully constructed curve. Parameters are the SEC 2 constants:
/// <https://www.secg.org/sec2-v2.pdf>
pub fn secp256k1() -> &'static KoblitzCurve {
    static SECP256K1: OnceLock<KoblitzCurve> = OnceLock::new();

    SECP256K1.get_or_init(|| {
        KoblitzCurve::new(CurveParams {
            p: BigUint::from_bytes_be(&hex!(
                "FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE FFFFFC2F"
            )),
            n: BigUint::from_bytes_be(&hex!(
                "FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE BAAEDCE6 AF48A03B BFD25E8C D0364141"
            )),
            b: BigUint::from_bytes_be(&hex!(
                "00000000 00000000 00000000 00000000 00000000 00000000 00000000 00000007"
            )),
            gx: BigUint::from_bytes_be(&hex!(
                "79BE667E F9DCBBAC 55A06295 CE870B07 029BFCDB 2DCE28D9 59F2815B 16F81798"
            )),
            gy: BigUint::from_bytes_be(&hex!(
                "483ADA77 26A3C465 5DA4FBFC 0E1108A8 FD17B448 A6855419 9C47D08F FB10D4B8"
            )),
            bit_size: 256,
            name: "secp256k1",
        })
    })
}
