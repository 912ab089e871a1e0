//! Verifiable shuffle of ElGamal ciphertext batches.

pub mod multiexp;
pub mod product;
pub mod shuffle;
pub mod vectorutil;

pub use self::multiexp::MultiexpProof;
pub use self::product::ProductProof;
pub use self::shuffle::{Permutation, ShuffleProof, Shuffler};
