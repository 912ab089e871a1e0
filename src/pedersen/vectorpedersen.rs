//! The `vectorpedersen` module contains API for producing a
//! vector commitment.

#![allow(non_snake_case)]

use core::iter;

use p256::elliptic_curve::Group;
use p256::{ProjectivePoint, Scalar};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sha2::{Digest, Sha256};

// Derivation seeds for the deterministic generator chain. Nothing-up-my-sleeve
// in the usual seeded-PRNG sense; both sides of a proof must derive the same
// key for the same capacity.
const H_SEED: &[u8] = b"GROTH-SHUFFLE-H-V1";
const G_VEC_SEED: &[u8] = b"GROTH-SHUFFLE-VECTOR-G-V1";

/// Represents a vector of base points for vector-Pedersen commitments.
///
/// A commitment to values `v_1..v_k` (k at most `gens_capacity`) with
/// blinding `r` is `r*H + sum_i v_i*G_i`. Because the `G_i` sequence is
/// derived deterministically, a key of capacity `n` and a key of capacity
/// `k <= n` agree on the first `k` generators; committing to a shorter
/// vector under a larger key is therefore well-defined.
#[derive(Debug, Clone)]
pub struct VectorPedersenGens {
    /// The total number of generators based on the size of the vector used
    /// for commitment.
    pub gens_capacity: usize,
    /// Precomputed G generators.
    G_vec: Vec<ProjectivePoint>,
    /// Precomputed blinding generator H.
    H: ProjectivePoint,
}

impl VectorPedersenGens {
    /// Creates a key with `gens_capacity` message generators plus the
    /// blinding generator.
    pub fn new(gens_capacity: usize) -> Self {
        let mut h_rng = StdRng::from_seed(Sha256::digest(H_SEED).into());
        let H = ProjectivePoint::random(&mut h_rng);

        let mut g_rng = StdRng::from_seed(Sha256::digest(G_VEC_SEED).into());
        let G_vec = (0..gens_capacity)
            .map(|_| ProjectivePoint::random(&mut g_rng))
            .collect();

        VectorPedersenGens {
            gens_capacity,
            G_vec,
            H,
        }
    }

    /// Creates an extended Pedersen commitment on `values` using a blinding
    /// scalar. `values` may be shorter than the key's capacity; the unused
    /// tail generators are simply not touched.
    pub fn commit(&self, values: &[Scalar], blinding: Scalar) -> ProjectivePoint {
        debug_assert!(values.len() <= self.gens_capacity);
        iter::once(self.H * blinding)
            .chain(values.iter().zip(self.G_vec.iter()).map(|(v, G)| *G * v))
            .sum()
    }

    /// Commitment to the all-ones vector of length `len` with zero blinding;
    /// the verifier needs this to shift a committed vector by a constant.
    pub fn commit_ones(&self, len: usize) -> ProjectivePoint {
        debug_assert!(len <= self.gens_capacity);
        self.G_vec.iter().take(len).copied().sum()
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
