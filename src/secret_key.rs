//! ECDSA secret keys.

use core::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};

use crate::curve::Curve;
use crate::ecdsa::{self, Signature};
use crate::error::{Error, Result};
use crate::public_key::PublicKey;
use crate::sec1;

/// An ECDSA secret key: a scalar `d` in `[1, n-1]` together with the public
/// point `d * G` it determines.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey {
    public_key: PublicKey,
    d: BigUint,
}

impl SecretKey {
    /// Generates a key pair with scalars drawn from the given reader.
    ///
    /// The scalar is sampled uniformly from `[1, n-1]`; the only error
    /// source is the reader itself.
    pub fn random(curve: &'static dyn Curve, rng: &mut (impl CryptoRng + RngCore)) -> Result<Self> {
        let d = ecdsa::rand_field_element(curve, rng)?;
        let (x, y) = curve.scalar_base_mult(&d.to_bytes_be());

        Ok(SecretKey {
            public_key: PublicKey::from_raw_parts(curve, x, y),
            d,
        })
    }

    /// Builds a key from a big-endian scalar, which must lie in `[1, n-1]`.
    pub fn from_be_bytes(curve: &'static dyn Curve, bytes: &[u8]) -> Result<Self> {
        let d = BigUint::from_bytes_be(bytes);
        if d.is_zero() || d >= curve.params().n {
            return Err(Error::InvalidLength);
        }

        let (x, y) = curve.scalar_base_mult(&d.to_bytes_be());
        Ok(SecretKey {
            public_key: PublicKey::from_raw_parts(curve, x, y),
            d,
        })
    }

    /// Serializes the secret scalar as big-endian bytes of the curve's
    /// field size.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; sec1::field_byte_len(self.public_key.curve())];
        sec1::reverse_copy(&mut out, &self.d.to_bytes_be());
        out
    }

    /// The public half of this key pair.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Signs a message digest, reading signature randomness from `rng`.
    pub fn sign(
        &self,
        rng: &mut (impl CryptoRng + RngCore),
        digest: &[u8],
    ) -> Result<Signature> {
        ecdsa::sign(rng, self, digest)
    }

    /// Signs a message digest and encodes the signature as an ASN.1 DER
    /// `SEQUENCE { r INTEGER, s INTEGER }`.
    pub fn sign_der(
        &self,
        rng: &mut (impl CryptoRng + RngCore),
        digest: &[u8],
    ) -> Result<Vec<u8>> {
        self.sign(rng, digest)?.to_der()
    }

    /// The secret scalar.
    pub(crate) fn as_scalar(&self) -> &BigUint {
        &self.d
    }
}

impl fmt::Debug for SecretKey {
    /// Omits the scalar so key material does not leak through logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
