//! secp256k1 elliptic curve and ECDSA signatures over it.
//!
//! Point arithmetic runs in Jacobian projective coordinates over
//! arbitrary-precision integers, behind the [`Curve`] trait; the signature
//! layer never touches secp256k1 directly, so further short Weierstrass
//! curves with `a = 0` can slot in underneath it. Public keys serialize to
//! the SEC1 compressed and uncompressed forms and signatures to ASN.1 DER,
//! for interoperability with other secp256k1 implementations.
//!
//! ## ⚠️ Security Warning
//!
//! The arithmetic in this crate is **variable-time**: execution time and
//! memory access depend on secret values. Callers handling long-term
//! secret keys on shared hardware must assume side-channel exposure.
//!
//! ## Usage
//!
//! ```
//! use koblitz256::{secp256k1, SecretKey};
//! use rand_core::OsRng;
//!
//! let secret_key = SecretKey::random(secp256k1(), &mut OsRng)?;
//! let digest = [0x42u8; 32]; // output of the message hash of your choice
//!
//! let signature = secret_key.sign(&mut OsRng, &digest)?;
//! assert!(secret_key.public_key().verify(&digest, &signature));
//! # Ok::<(), koblitz256::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod curve;
pub mod ecdsa;
pub mod sec1;

mod arithmetic;
mod error;
mod public_key;
mod secret_key;

pub use crate::arithmetic::{secp256k1, KoblitzCurve};
pub use crate::curve::{generate_key, Curve, CurveParams};
pub use crate::ecdsa::{sign, verify, Signature};
pub use crate::error::{Error, Result};
pub use crate::public_key::{is_public_key_compressed, PublicKey};
pub use crate::secret_key::SecretKey;

pub use num_bigint;
