//! ECDSA public keys and their SEC1 serializations.

use core::fmt;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::curve::Curve;
use crate::ecdsa::Signature;
use crate::error::{Error, Result};
use crate::sec1;

/// An ECDSA public key: an affine point on a shared curve.
///
/// Every constructor upholds the key invariant that `(x, y)` lies on the
/// curve and is not the point at infinity.
#[derive(Clone, Debug)]
pub struct PublicKey {
    curve: &'static dyn Curve,
    x: BigUint,
    y: BigUint,
}

impl PublicKey {
    /// Builds a public key from affine coordinates, rejecting the point at
    /// infinity and points off the curve.
    pub fn from_affine(curve: &'static dyn Curve, x: BigUint, y: BigUint) -> Result<Self> {
        if x.is_zero() && y.is_zero() {
            return Err(Error::PointOffCurve);
        }
        if !curve.is_on_curve(&x, &y) {
            return Err(Error::PointOffCurve);
        }

        Ok(PublicKey { curve, x, y })
    }

    /// Wraps coordinates already known to satisfy the key invariant.
    pub(crate) fn from_raw_parts(curve: &'static dyn Curve, x: BigUint, y: BigUint) -> Self {
        PublicKey { curve, x, y }
    }

    /// Parses a key in either SEC1 form, dispatching on the tag byte.
    pub fn parse(curve: &'static dyn Curve, data: &[u8]) -> Result<Self> {
        if data.len() < sec1::compressed_len(curve) {
            return Err(Error::InvalidLength);
        }

        match data[0] & 0xfe {
            sec1::TAG_COMPRESSED => Self::from_compressed_bytes(curve, data),
            sec1::TAG_UNCOMPRESSED => Self::from_uncompressed_bytes(curve, data),
            _ => Err(Error::InvalidFormatTag),
        }
    }

    /// Parses a compressed key, `{0x02|0x03} || X`, recovering the Y
    /// coordinate with the parity encoded in the tag byte.
    pub fn from_compressed_bytes(curve: &'static dyn Curve, data: &[u8]) -> Result<Self> {
        if data.len() != sec1::compressed_len(curve) {
            return Err(Error::InvalidLength);
        }
        if data[0] & 0xfe != sec1::TAG_COMPRESSED {
            return Err(Error::InvalidFormatTag);
        }
        let y_odd = data[0] & 0x01 == 0x01;

        let x = BigUint::from_bytes_be(&data[1..]);
        if x >= curve.params().p {
            return Err(Error::PointOffCurve);
        }

        // The recovered y satisfies the curve equation by construction.
        let y = curve.decompress_point(&x, y_odd)?;
        Ok(PublicKey { curve, x, y })
    }

    /// Parses an uncompressed key, `0x04 || X || Y`.
    pub fn from_uncompressed_bytes(curve: &'static dyn Curve, data: &[u8]) -> Result<Self> {
        let (x, y) = sec1::decode_uncompressed(curve, data)?;
        Ok(PublicKey { curve, x, y })
    }

    /// Serializes the key into the SEC1 compressed form.
    pub fn to_compressed_bytes(&self) -> Vec<u8> {
        let ell = sec1::field_byte_len(self.curve);
        let mut buf = vec![0u8; 1 + ell];

        // Tag byte carries the sign of Y: 0x03 for odd.
        buf[0] = sec1::TAG_COMPRESSED;
        if sec1::is_odd(&self.y) {
            buf[0] |= 0x01;
        }
        sec1::reverse_copy(&mut buf[1..], &self.x.to_bytes_be());

        buf
    }

    /// Serializes the key into the SEC1 uncompressed form.
    pub fn to_uncompressed_bytes(&self) -> Vec<u8> {
        sec1::encode_uncompressed(self.curve, &self.x, &self.y)
    }

    /// Verifies an ECDSA signature over a message digest with this key.
    ///
    /// Never fails with an error: malformed signatures verify as `false`.
    pub fn verify(&self, digest: &[u8], signature: &Signature) -> bool {
        crate::ecdsa::verify(self, digest, signature)
    }

    /// The curve this key lives on.
    pub fn curve(&self) -> &'static dyn Curve {
        self.curve
    }

    /// Affine X coordinate.
    pub fn x(&self) -> &BigUint {
        &self.x
    }

    /// Affine Y coordinate.
    pub fn y(&self) -> &BigUint {
        &self.y
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.curve.params() == other.curve.params() && self.x == other.x && self.y == other.y
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_uncompressed_bytes() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Reports whether a byte sequence looks like a compressed public key for
/// the given curve.
pub fn is_public_key_compressed(curve: &dyn Curve, data: &[u8]) -> bool {
    data.len() == sec1::compressed_len(curve) && data[0] & 0xfe == sec1::TAG_COMPRESSED
}
