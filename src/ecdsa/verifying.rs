//! ECDSA verification.

use num_traits::Zero;

use super::{hash_to_int, Signature};
use crate::public_key::PublicKey;

/// Verifies a signature over a message digest against a public key.
///
/// Verification is total: structurally invalid signatures, scalars outside
/// `[1, n-1]`, and degenerate curve results all return `false` rather than
/// an error.
pub fn verify(public_key: &PublicKey, digest: &[u8], signature: &Signature) -> bool {
    let curve = public_key.curve();
    let n = &curve.params().n;

    let (r, s) = (signature.r(), signature.s());
    if r.is_zero() || s.is_zero() {
        return false;
    }
    if r >= n || s >= n {
        return false;
    }

    let e = hash_to_int(digest, curve);
    let w = match s.modinv(n) {
        Some(w) => w,
        None => return false,
    };

    let u1 = (e * &w) % n;
    let u2 = (r * &w) % n;

    let (x1, y1) = curve.scalar_base_mult(&u1.to_bytes_be());
    let (x2, y2) = curve.scalar_mult(public_key.x(), public_key.y(), &u2.to_bytes_be());

    let (x, y) = curve.add(&x1, &y1, &x2, &y2);
    if x.is_zero() && y.is_zero() {
        return false;
    }

    x % n == *r
}
