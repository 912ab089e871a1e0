//! Line-oriented exchange files: public keys, ciphertext batches,
//! permutations and randomness vectors.
//!
//! Every reader opens, consumes and releases its file within one call.
//! Ciphertext order is load-bearing: a ciphertext's line position is its
//! index, which is later the domain and range of the permutation.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use p256::{ProjectivePoint, Scalar};

use crate::codec;
use crate::elgamal::Ciphertext;
use crate::error::Error;
use crate::shuffle::Permutation;
use crate::wire;

/// Header line of a ciphertext file.
const CIPHERTEXT_HEADER: &str = "c1_base64,c2_base64";

fn open(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|source| Error::FileNotFound {
        path: path.to_path_buf(),
        source,
    })
}

fn create(path: &Path) -> Result<File, Error> {
    File::create(path).map_err(|source| Error::FileNotFound {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a public key: the first line of the file, base64 of a 65-byte
/// wire point.
pub fn read_public_key(path: &Path) -> Result<ProjectivePoint, Error> {
    let reader = BufReader::new(open(path)?);
    let line = match reader.lines().next() {
        Some(line) => line?,
        None => return Err(Error::InvalidFormat("empty public key file")),
    };
    let pk = wire::wire_to_point(&codec::decode(&line))?;
    log::info!("loaded public key from {}", path.display());
    Ok(pk)
}

/// Reads a ciphertext batch.
///
/// The first line is a header and skipped unconditionally. Every following
/// non-empty line is split on its first comma into two base64 point fields;
/// a line with no comma is skipped, not rejected.
pub fn read_ciphertexts(path: &Path) -> Result<Vec<Ciphertext>, Error> {
    let reader = BufReader::new(open(path)?);
    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if idx == 0 || line.trim().is_empty() {
            continue;
        }
        let (c1, c2) = match line.split_once(',') {
            Some(parts) => parts,
            None => continue,
        };
        out.push(Ciphertext {
            u: wire::wire_to_point(&codec::decode(c1))?,
            v: wire::wire_to_point(&codec::decode(c2))?,
        });
    }
    log::info!("loaded {} ciphertexts from {}", out.len(), path.display());
    Ok(out)
}

/// Writes a ciphertext batch: header line, then one comma-separated base64
/// record per ciphertext, preserving order.
pub fn write_ciphertexts(path: &Path, ciphertexts: &[Ciphertext]) -> Result<(), Error> {
    let mut writer = BufWriter::new(create(path)?);
    writeln!(writer, "{}", CIPHERTEXT_HEADER)?;
    for e in ciphertexts {
        writeln!(
            writer,
            "{},{}",
            codec::encode(&wire::point_to_wire(&e.u)),
            codec::encode(&wire::point_to_wire(&e.v))
        )?;
    }
    writer.flush()?;
    log::info!("wrote {} ciphertexts to {}", ciphertexts.len(), path.display());
    Ok(())
}

/// Reads a permutation: one non-negative integer per non-empty line.
///
/// Bijectivity is validated here, before the sequence can reach the engine.
pub fn read_permutation(path: &Path) -> Result<Permutation, Error> {
    let reader = BufReader::new(open(path)?);
    let mut mapping = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        let index: usize = token
            .parse()
            .map_err(|_| Error::ParseError(format!("invalid permutation index {:?}", token)))?;
        mapping.push(index);
    }
    let pi = Permutation::from_vec(mapping)?;
    log::info!(
        "loaded permutation of {} elements from {}",
        pi.len(),
        path.display()
    );
    Ok(pi)
}

/// Reads a randomness vector: one base64-encoded 32-byte scalar per
/// non-empty line. Length agreement with the batch is checked at the engine
/// call site, not here.
pub fn read_randomness(path: &Path) -> Result<Vec<Scalar>, Error> {
    let reader = BufReader::new(open(path)?);
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        out.push(wire::wire_to_scalar(&codec::decode(&line))?);
    }
    log::info!(
        "loaded {} randomness scalars from {}",
        out.len(),
        path.display()
    );
    Ok(out)
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
