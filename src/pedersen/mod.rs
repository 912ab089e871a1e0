//! Pedersen vector commitments.
//!
//! The commitment key doubles as the engine's per-batch "commitment key":
//! it is constructed fresh for each command, sized to the ciphertext count.

/// Vector Pedersen commitment key implementation.
pub mod vectorpedersen;

/// Re-export of the [`VectorPedersenGens`] type for convenience.
pub use self::vectorpedersen::VectorPedersenGens;
