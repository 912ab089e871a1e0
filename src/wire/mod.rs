//! Fixed-width wire encodings for scalars and curve points.
//!
//! These are the only representations that ever cross a file or process
//! boundary: a scalar is exactly 32 big-endian bytes, a point is exactly 65
//! bytes of SEC1 uncompressed form (`0x04` tag, 32-byte X, 32-byte Y). The
//! group identity has no affine coordinates and is encoded as the tag byte
//! followed by 64 zero bytes.
//!
//! Every conversion is an explicit, bounds-checked copy through these byte
//! layouts; no in-memory representation is ever reinterpreted.

use p256::elliptic_curve::ff::PrimeField;
use p256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use p256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar};

use crate::error::Error;

/// Width of a scalar on the wire.
pub const SCALAR_BYTES: usize = 32;
/// Width of a point on the wire.
pub const POINT_BYTES: usize = 65;
/// SEC1 tag byte marking an uncompressed point.
pub const UNCOMPRESSED_TAG: u8 = 0x04;

/// Encodes a scalar as 32 big-endian bytes.
pub fn scalar_to_wire(s: &Scalar) -> [u8; SCALAR_BYTES] {
    s.to_repr().into()
}

/// Decodes a 32-byte big-endian scalar.
///
/// Rejects a slice of the wrong width with [`Error::InvalidSize`] and a
/// value at or above the group order with [`Error::InvalidFormat`].
pub fn wire_to_scalar(bytes: &[u8]) -> Result<Scalar, Error> {
    if bytes.len() != SCALAR_BYTES {
        return Err(Error::InvalidSize {
            expected: SCALAR_BYTES,
            got: bytes.len(),
        });
    }
    let repr = FieldBytes::clone_from_slice(bytes);
    Option::from(Scalar::from_repr(repr))
        .ok_or(Error::InvalidFormat("non-canonical scalar encoding"))
}

/// Encodes a point as 65 bytes of SEC1 uncompressed form.
///
/// The point is normalized to affine coordinates first; it may arrive in a
/// non-canonical projective form and must be canonicalized before the
/// coordinates are read out.
pub fn point_to_wire(p: &ProjectivePoint) -> [u8; POINT_BYTES] {
    let mut out = [0u8; POINT_BYTES];
    out[0] = UNCOMPRESSED_TAG;
    let affine = p.to_affine();
    if affine == AffinePoint::IDENTITY {
        // Identity has no affine X/Y; all-zero body by convention.
        return out;
    }
    out.copy_from_slice(affine.to_encoded_point(false).as_bytes());
    out
}

/// Decodes a 65-byte SEC1 uncompressed point.
///
/// Length and tag are checked here; whether the coordinates actually name a
/// curve point is decided by the group implementation itself, whose
/// construction is authoritative ([`Error::InvalidPoint`] on rejection).
pub fn wire_to_point(bytes: &[u8]) -> Result<ProjectivePoint, Error> {
    if bytes.len() != POINT_BYTES {
        return Err(Error::InvalidSize {
            expected: POINT_BYTES,
            got: bytes.len(),
        });
    }
    if bytes[0] != UNCOMPRESSED_TAG {
        return Err(Error::InvalidFormat("expected uncompressed point tag 0x04"));
    }
    if bytes[1..].iter().all(|b| *b == 0) {
        return Ok(ProjectivePoint::IDENTITY);
    }
    let encoded =
        EncodedPoint::from_bytes(bytes).map_err(|_| Error::InvalidFormat("malformed SEC1 point"))?;
    Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
        .map(ProjectivePoint::from)
        .ok_or(Error::InvalidPoint)
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
