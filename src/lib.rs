#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

/// Base64 codec for the line-oriented exchange files.
///
/// Encoding is strict standard base64; decoding is deliberately lenient and
/// skips characters outside the alphabet, absorbing hand-edited input.
pub mod codec;

/// ElGamal encryption over P-256.
///
/// The ciphertext pair type that batches are made of, with the homomorphic
/// operations the shuffle argument relies on.
pub mod elgamal;

/// Error taxonomy shared by every layer of the tool.
pub mod error;

/// On-disk exchange formats: key, ciphertext, permutation and randomness
/// files plus the binary proof layout.
pub mod materials;

/// Vector Pedersen commitments with deterministic generators.
///
/// The commitment key both proof arguments commit under; derived from fixed
/// seeds so every party computes the same generators.
pub mod pedersen;

/// The verifiable shuffle argument.
///
/// Permutation handling, the single value product argument, the
/// multi-exponentiation argument, and the shuffle proof composing them.
pub mod shuffle;

/// Merlin transcript extension for P-256 scalars and points.
pub mod transcript;

/// Fixed-width wire encodings for scalars and curve points.
pub mod wire;

// Re-export commonly used types for convenience
pub use elgamal::Ciphertext;
pub use error::Error;
pub use pedersen::VectorPedersenGens;
pub use shuffle::{Permutation, ShuffleProof, Shuffler};
