//! ECDSA signing.

use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};

use super::{fermat_inverse, hash_to_int, rand_field_element, Signature};
use crate::error::Result;
use crate::secret_key::SecretKey;

/// Signs a message digest with the given secret key, reading signature
/// randomness from `rng`.
///
/// ```text
/// k  <- random scalar in [1, n-1]     (resampled while r = 0)
/// r  <- x coordinate of k*G, mod n
/// s  <- k⁻¹ * (e + r*d) mod n         (restarted while s = 0)
/// ```
///
/// where `e` is the digest converted to an integer. Digests longer than the
/// bit length of the curve order are truncated. The rejection loops are
/// invisible to the caller; the only error source is the random reader.
pub fn sign(
    rng: &mut (impl CryptoRng + RngCore),
    secret_key: &SecretKey,
    digest: &[u8],
) -> Result<Signature> {
    let curve = secret_key.public_key().curve();
    let n = &curve.params().n;

    loop {
        let (r, k_inv) = loop {
            let k = rand_field_element(curve, rng)?;
            let k_inv = fermat_inverse(&k, n);

            let (rx, _) = curve.scalar_base_mult(&k.to_bytes_be());
            let r = rx % n;
            if !r.is_zero() {
                break (r, k_inv);
            }
        };

        let e = hash_to_int(digest, curve);
        let s = (k_inv * ((e + &r * secret_key.as_scalar()) % n)) % n;

        if !s.is_zero() {
            return Ok(Signature::from_scalars(r, s));
        }
    }
}
