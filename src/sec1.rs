//! SEC1 point serialization helpers.
//!
//! Points are serialized with the `Elliptic-Curve-Point-to-Octet-String`
//! encoding of SEC 1: Elliptic Curve Cryptography (Version 2.0), section
//! 2.3.3: <https://www.secg.org/sec1-v2.pdf>

use num_bigint::BigUint;

use crate::curve::Curve;
use crate::error::{Error, Result};

/// Tag byte of a compressed point; `0x03` when the Y coordinate is odd.
pub const TAG_COMPRESSED: u8 = 0x02;

/// Tag byte of an uncompressed point.
pub const TAG_UNCOMPRESSED: u8 = 0x04;

/// Size in bytes of one serialized field element for the given curve.
pub fn field_byte_len(curve: &dyn Curve) -> usize {
    (curve.params().bit_size + 7) >> 3
}

/// Size in bytes of a compressed point, tag byte included.
pub fn compressed_len(curve: &dyn Curve) -> usize {
    1 + field_byte_len(curve)
}

/// Size in bytes of an uncompressed point, tag byte included.
pub fn uncompressed_len(curve: &dyn Curve) -> usize {
    1 + 2 * field_byte_len(curve)
}

/// Reports whether the integer is odd in the SEC1 sense, `n mod 2 == 1`.
pub fn is_odd(n: &BigUint) -> bool {
    n.bit(0)
}

/// Copies `src` into the tail of `dst`, right-justified.
///
/// When `dst` is shorter than `src` only the trailing `dst.len()` bytes of
/// `src` are kept. Leading bytes of a longer `dst` are left untouched.
pub fn reverse_copy(dst: &mut [u8], src: &[u8]) {
    if dst.len() >= src.len() {
        let offset = dst.len() - src.len();
        dst[offset..].copy_from_slice(src);
    } else {
        let offset = src.len() - dst.len();
        dst.copy_from_slice(&src[offset..]);
    }
}

/// Serializes an affine point into the uncompressed form
/// `0x04 || X || Y` with both coordinates left-padded to the field size.
pub fn encode_uncompressed(curve: &dyn Curve, x: &BigUint, y: &BigUint) -> Vec<u8> {
    let ell = field_byte_len(curve);
    let mut out = vec![0u8; 1 + 2 * ell];

    out[0] = TAG_UNCOMPRESSED;
    reverse_copy(&mut out[1..1 + ell], &x.to_bytes_be());
    reverse_copy(&mut out[1 + ell..], &y.to_bytes_be());

    out
}

/// Parses an uncompressed point serialized by [`encode_uncompressed`].
///
/// Rejects data of the wrong length or tag, coordinates outside `[0, P)`,
/// and points which do not satisfy the curve equation.
pub fn decode_uncompressed(curve: &dyn Curve, data: &[u8]) -> Result<(BigUint, BigUint)> {
    if data.len() != uncompressed_len(curve) {
        return Err(Error::InvalidLength);
    }
    if data[0] != TAG_UNCOMPRESSED {
        return Err(Error::InvalidFormatTag);
    }

    let ell = field_byte_len(curve);
    let p = &curve.params().p;

    let x = BigUint::from_bytes_be(&data[1..1 + ell]);
    let y = BigUint::from_bytes_be(&data[1 + ell..]);
    if x >= *p || y >= *p {
        return Err(Error::PointOffCurve);
    }
    if !curve.is_on_curve(&x, &y) {
        return Err(Error::PointOffCurve);
    }

    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::reverse_copy;
    use crate::arithmetic::secp256k1;
    use crate::curve::Curve;
    use crate::error::Error;

    #[test]
    fn reverse_copy_longer_destination() {
        let mut dst = [0xaau8; 6];
        reverse_copy(&mut dst, &[1, 2, 3]);
        assert_eq!(dst, [0xaa, 0xaa, 0xaa, 1, 2, 3]);
    }

    #[test]
    fn reverse_copy_equal_size() {
        let mut dst = [0u8; 4];
        reverse_copy(&mut dst, &[9, 8, 7, 6]);
        assert_eq!(dst, [9, 8, 7, 6]);
    }

    #[test]
    fn reverse_copy_shorter_destination() {
        let mut dst = [0u8; 2];
        reverse_copy(&mut dst, &[1, 2, 3, 4]);
        assert_eq!(dst, [3, 4]);
    }

    #[test]
    fn uncompressed_round_trip() {
        let curve = secp256k1();
        let params = curve.params();

        let data = super::encode_uncompressed(curve, &params.gx, &params.gy);
        assert_eq!(data.len(), 65);
        assert_eq!(data[0], super::TAG_UNCOMPRESSED);

        let (x, y) = super::decode_uncompressed(curve, &data).unwrap();
        assert_eq!(x, params.gx);
        assert_eq!(y, params.gy);
    }

    #[test]
    fn decode_rejects_point_off_curve() {
        let curve = secp256k1();
        let one = BigUint::from(1u32);

        let data = super::encode_uncompressed(curve, &one, &one);
        assert!(matches!(
            super::decode_uncompressed(curve, &data),
            Err(Error::PointOffCurve)
        ));
    }

    #[test]
    fn decode_rejects_bad_length_and_tag() {
        let curve = secp256k1();
        let params = curve.params();

        let mut data = super::encode_uncompressed(curve, &params.gx, &params.gy);
        assert!(matches!(
            super::decode_uncompressed(curve, &data[..64]),
            Err(Error::InvalidLength)
        ));

        data[0] = 0x06;
        assert!(matches!(
            super::decode_uncompressed(curve, &data),
            Err(Error::InvalidFormatTag)
        ));
    }

    #[test]
    fn decode_rejects_coordinate_out_of_range() {
        let curve = secp256k1();
        let params = curve.params();

        // X = P is not a valid field element
        let mut data = vec![super::TAG_UNCOMPRESSED];
        data.extend_from_slice(&params.p.to_bytes_be());
        data.extend_from_slice(&params.gy.to_bytes_be());
        assert!(matches!(
            super::decode_uncompressed(curve, &data),
            Err(Error::PointOffCurve)
        ));
    }
}
