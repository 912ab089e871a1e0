//! ElGamal encryption over P-256 for the shuffle tool.
//!
//! Provides the ciphertext pair type that batches are made of, together with
//! the homomorphic operations the shuffle argument relies on.

/// ElGamal ciphertext implementation and API.
pub mod elgamal;

/// Re-export of the [`Ciphertext`] type for convenience.
pub use self::elgamal::{keygen, Ciphertext};
