//! Error types shared by the wire converters, the file readers and the
//! shuffle engine.
//!
//! Every failure aborts the whole command: errors propagate unmodified to the
//! command dispatcher, which prints them and exits with status 1. A failed
//! proof verification is *not* an error: the engine reports it as a plain
//! `bool` outcome.

use std::io;
use std::path::PathBuf;

/// Failure modes of the shuffle tool.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file could not be opened for the requested mode.
    #[error("could not open {}: {source}", path.display())]
    FileNotFound {
        /// Path of the file that could not be opened.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An I/O failure after the file was opened.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// A decoded byte string does not have the fixed width the wire format
    /// requires.
    #[error("invalid encoded size: expected {expected} bytes, got {got}")]
    InvalidSize {
        /// Width the wire format requires.
        expected: usize,
        /// Width actually decoded.
        got: usize,
    },

    /// A wire encoding violates a structural invariant (wrong point tag,
    /// non-canonical scalar).
    #[error("invalid wire format: {0}")]
    InvalidFormat(&'static str),

    /// A well-formed 65-byte encoding that is not a point on the curve.
    #[error("encoded point is not on the curve")]
    InvalidPoint,

    /// A token in a line-oriented file could not be parsed.
    #[error("parse error: {0}")]
    ParseError(String),

    /// A permutation file does not describe a bijection on {0,...,n-1}.
    #[error("invalid permutation sequence provided")]
    InvalidPermutation,

    /// A fixed-width proof field ended before the expected number of bytes.
    #[error("proof file truncated")]
    TruncatedProof,

    /// The engine was handed an empty ciphertext batch.
    #[error("empty ciphertext batch")]
    EmptyBatch,

    /// The engine was handed a single-element batch; the product argument
    /// needs at least two elements.
    #[error("shuffle batch must contain at least two ciphertexts")]
    BatchTooSmall,

    /// Two inputs that must be the same length are not.
    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        /// Expected length (the ciphertext count).
        expected: usize,
        /// Length actually supplied.
        got: usize,
    },
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
