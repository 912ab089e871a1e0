//! Binary serialization of shuffle proofs.
//!
//! The layout is a fixed field sequence with no framing: points are 65
//! bytes, scalars 32 bytes, and a scalar vector is a little-endian `u64`
//! count followed by that many scalars. Writing and reading are exact
//! inverses field for field; a short read anywhere is a fatal
//! [`Error::TruncatedProof`].
//!
//! The permuted ciphertext batch is the proof's statement, not part of the
//! proof, and lives in the ciphertext file. [`read_proof`] takes it as an
//! argument and reattaches it to the in-memory proof object.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use p256::{ProjectivePoint, Scalar};

use crate::elgamal::Ciphertext;
use crate::error::Error;
use crate::shuffle::{MultiexpProof, ProductProof, ShuffleProof};
use crate::wire;

/// Upper bound on the element count preallocated for a scalar vector; a
/// hostile length field must not drive allocation beyond it. Longer vectors
/// still load, growing as actual bytes arrive.
const MAX_PREALLOC: usize = 1 << 16;

/// Writes `proof` to `path` in the fixed binary layout.
pub fn write_proof(path: &Path, proof: &ShuffleProof) -> Result<(), Error> {
    let file = File::create(path).map_err(|source| Error::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let mut w = BufWriter::new(file);

    write_point(&mut w, &proof.c_a)?;
    write_point(&mut w, &proof.c_b)?;

    write_point(&mut w, &proof.product_proof.commitment_d)?;
    write_point(&mut w, &proof.product_proof.commitment_delta_small)?;
    write_point(&mut w, &proof.product_proof.commitment_delta_capital)?;
    write_scalar_vec(&mut w, &proof.product_proof.a_bar)?;
    write_scalar_vec(&mut w, &proof.product_proof.b_bar)?;
    write_scalar(&mut w, &proof.product_proof.r_bar)?;
    write_scalar(&mut w, &proof.product_proof.s_bar)?;

    write_point(&mut w, &proof.multiexp_proof.commitment_a0)?;
    write_point(&mut w, &proof.multiexp_proof.commitment_b0)?;
    write_point(&mut w, &proof.multiexp_proof.e0.u)?;
    write_point(&mut w, &proof.multiexp_proof.e0.v)?;
    write_scalar_vec(&mut w, &proof.multiexp_proof.a_bar)?;
    write_scalar(&mut w, &proof.multiexp_proof.r_bar)?;
    write_scalar(&mut w, &proof.multiexp_proof.b_bar)?;
    write_scalar(&mut w, &proof.multiexp_proof.s_bar)?;
    write_scalar(&mut w, &proof.multiexp_proof.t_bar)?;

    w.flush()?;
    log::info!("wrote proof to {}", path.display());
    Ok(())
}

/// Reads a proof from `path` and reattaches the permuted batch `outputs` as
/// its statement.
pub fn read_proof(path: &Path, outputs: Vec<Ciphertext>) -> Result<ShuffleProof, Error> {
    let file = File::open(path).map_err(|source| Error::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let mut r = BufReader::new(file);

    let c_a = read_point(&mut r)?;
    let c_b = read_point(&mut r)?;

    let product_proof = ProductProof {
        commitment_d: read_point(&mut r)?,
        commitment_delta_small: read_point(&mut r)?,
        commitment_delta_capital: read_point(&mut r)?,
        a_bar: read_scalar_vec(&mut r)?,
        b_bar: read_scalar_vec(&mut r)?,
        r_bar: read_scalar(&mut r)?,
        s_bar: read_scalar(&mut r)?,
    };

    let multiexp_proof = MultiexpProof {
        commitment_a0: read_point(&mut r)?,
        commitment_b0: read_point(&mut r)?,
        e0: Ciphertext {
            u: read_point(&mut r)?,
            v: read_point(&mut r)?,
        },
        a_bar: read_scalar_vec(&mut r)?,
        r_bar: read_scalar(&mut r)?,
        b_bar: read_scalar(&mut r)?,
        s_bar: read_scalar(&mut r)?,
        t_bar: read_scalar(&mut r)?,
    };

    log::info!("read proof from {}", path.display());
    Ok(ShuffleProof {
        c_a,
        c_b,
        product_proof,
        multiexp_proof,
        outputs,
    })
}

fn write_point<W: Write>(w: &mut W, p: &ProjectivePoint) -> Result<(), Error> {
    w.write_all(&wire::point_to_wire(p))?;
    Ok(())
}

fn write_scalar<W: Write>(w: &mut W, s: &Scalar) -> Result<(), Error> {
    w.write_all(&wire::scalar_to_wire(s))?;
    Ok(())
}

fn write_scalar_vec<W: Write>(w: &mut W, v: &[Scalar]) -> Result<(), Error> {
    w.write_all(&(v.len() as u64).to_le_bytes())?;
    for s in v {
        write_scalar(w, s)?;
    }
    Ok(())
}

fn read_exact_field<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<(), Error> {
    r.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::TruncatedProof
        } else {
            Error::Io(e)
        }
    })
}

fn read_point<R: Read>(r: &mut R) -> Result<ProjectivePoint, Error> {
    let mut buf = [0u8; wire::POINT_BYTES];
    read_exact_field(r, &mut buf)?;
    wire::wire_to_point(&buf)
}

fn read_scalar<R: Read>(r: &mut R) -> Result<Scalar, Error> {
    let mut buf = [0u8; wire::SCALAR_BYTES];
    read_exact_field(r, &mut buf)?;
    wire::wire_to_scalar(&buf)
}

fn read_scalar_vec<R: Read>(r: &mut R) -> Result<Vec<Scalar>, Error> {
    let mut len_bytes = [0u8; 8];
    read_exact_field(r, &mut len_bytes)?;
    let len = u64::from_le_bytes(len_bytes);
    let len = usize::try_from(len)
        .map_err(|_| Error::InvalidFormat("scalar vector length overflows this platform"))?;
    let mut out = Vec::with_capacity(len.min(MAX_PREALLOC));
    for _ in 0..len {
        out.push(read_scalar(r)?);
    }
    Ok(out)
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
