//! Error types.

use core::fmt;

/// Result type with this crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors produced while decoding keys, recovering points, or signing.
///
/// Signature verification never returns an error: malformed input simply
/// fails to verify.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Serialized key data has the wrong size, or a scalar is out of range.
    InvalidLength,

    /// Leading tag byte is none of `0x02`, `0x03`, `0x04`.
    InvalidFormatTag,

    /// No Y coordinate with the requested parity exists for the given X.
    OddnessMismatch,

    /// Decoded coordinates do not satisfy the curve equation.
    PointOffCurve,

    /// The random byte source failed; the inner error is passed through
    /// unchanged.
    Randomness(rand_core::Error),

    /// ASN.1 encoding or decoding failure.
    Asn1(der::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLength => f.write_str("invalid data length"),
            Error::InvalidFormatTag => f.write_str("invalid format tag"),
            Error::OddnessMismatch => f.write_str("oddness of y is wrong"),
            Error::PointOffCurve => f.write_str("point is off the curve"),
            Error::Randomness(e) => write!(f, "randomness source failure: {e}"),
            Error::Asn1(e) => write!(f, "ASN.1 error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Randomness(e) => Some(e),
            Error::Asn1(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rand_core::Error> for Error {
    fn from(err: rand_core::Error) -> Error {
        Error::Randomness(err)
    }
}

impl From<der::Error> for Error {
    fn from(err: der::Error) -> Error {
        Error::Asn1(err)
    }
}
