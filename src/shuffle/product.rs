//! The `product` module contains API for producing an argument of knowledge
//! of committed values having a particular product [Groth, Bayer-Groth].
//!
//! The prover holds an opening `d_1..d_n, r_d` of a vector commitment `c_d`
//! and convinces the verifier that `d_1 * ... * d_n = b` for a public `b`.
//! Inside the shuffle argument, `c_d` and `b` are both derived from the
//! permutation commitments and the round challenges.

#![allow(non_snake_case)]

use merlin::Transcript;
use p256::elliptic_curve::ff::Field;
use p256::{ProjectivePoint, Scalar};
use rand::{CryptoRng, RngCore};

use crate::pedersen::VectorPedersenGens;
use crate::transcript::TranscriptProtocol;

/// Single value product proof.
///
/// Field order mirrors the binary proof layout: three announcement
/// commitments, two response vectors, two response scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductProof {
    /// Commitment to the masking vector `d~`.
    pub commitment_d: ProjectivePoint,
    /// Commitment to the lowercase-delta cross terms (length n-1).
    pub commitment_delta_small: ProjectivePoint,
    /// Commitment to the capital-delta cross terms (length n-1).
    pub commitment_delta_capital: ProjectivePoint,
    /// Response vector `a~_i = x*d_i + d~_i`.
    pub a_bar: Vec<Scalar>,
    /// Response vector `b~_i = x*p_i + delta_i` over the partial products.
    pub b_bar: Vec<Scalar>,
    /// Blinding response for the `a~` commitment equation.
    pub r_bar: Scalar,
    /// Blinding response for the cross-term commitment equation.
    pub s_bar: Scalar,
}

impl ProductProof {
    /// Create a single value product argument proof for the committed vector
    /// `d_vec` with commitment blinding `r`.
    pub fn create<R: RngCore + CryptoRng>(
        transcript: &mut Transcript,
        xpc_gens: &VectorPedersenGens,
        d_vec: &[Scalar],
        r: Scalar,
        rng: &mut R,
    ) -> ProductProof {
        let n = d_vec.len();
        transcript.domain_sep(b"SingleValueProductProof");

        // partial products p_1 = d_1, p_i = p_{i-1} * d_i; p_n is the
        // public product.
        let mut pvec = Vec::with_capacity(n);
        let mut prod = Scalar::ONE;
        for di in d_vec.iter() {
            prod *= di;
            pvec.push(prod);
        }

        // Pick d~_1..d~_n and r_d randomly, commit, send to verifier.
        let d_tilde: Vec<_> = (0..n).map(|_| Scalar::random(&mut *rng)).collect();
        let rd = Scalar::random(&mut *rng);
        let commit_d = xpc_gens.commit(&d_tilde, rd);

        // Random delta with delta_1 = d~_1 and delta_n = 0.
        let mut delta_vec: Vec<_> = (0..n).map(|_| Scalar::random(&mut *rng)).collect();
        delta_vec[0] = d_tilde[0];
        delta_vec[n - 1] = Scalar::ZERO;

        let s_1 = Scalar::random(&mut *rng);
        let s_x = Scalar::random(&mut *rng);

        // Cross-term vectors have n-1 entries.
        // delta_small[i] = -delta[i] * d~[i+1]
        let delta_small: Vec<_> = (0..n - 1)
            .map(|i| -delta_vec[i] * d_tilde[i + 1])
            .collect();
        // delta_cap[i] = delta[i+1] - d[i+1]*delta[i] - p[i]*d~[i+1]
        let delta_capital: Vec<_> = (0..n - 1)
            .map(|i| delta_vec[i + 1] - d_vec[i + 1] * delta_vec[i] - pvec[i] * d_tilde[i + 1])
            .collect();

        let commit_delta_small = xpc_gens.commit(&delta_small, s_1);
        let commit_delta_capital = xpc_gens.commit(&delta_capital, s_x);

        // Absorb announcements, derive the round challenge.
        transcript.append_point_var(b"d", &commit_d);
        transcript.append_point_var(b"DeltaSmall", &commit_delta_small);
        transcript.append_point_var(b"DeltaCapital", &commit_delta_capital);
        let x = transcript.get_challenge(b"challenge");

        let a_bar: Vec<_> = d_vec
            .iter()
            .zip(d_tilde.iter())
            .map(|(d, dt)| d * &x + dt)
            .collect();
        let b_bar: Vec<_> = pvec
            .iter()
            .zip(delta_vec.iter())
            .map(|(p, dl)| p * &x + dl)
            .collect();
        let r_bar = r * x + rd;
        let s_bar = s_x * x + s_1;

        ProductProof {
            commitment_d: commit_d,
            commitment_delta_small: commit_delta_small,
            commitment_delta_capital: commit_delta_capital,
            a_bar,
            b_bar,
            r_bar,
            s_bar,
        }
    }

    /// Verifies the proof against the statement commitment `c_d` and the
    /// public product `b`.
    pub fn verify(
        &self,
        transcript: &mut Transcript,
        xpc_gens: &VectorPedersenGens,
        c_d: &ProjectivePoint,
        b: &Scalar,
    ) -> bool {
        let n = self.a_bar.len();
        if n < 2 || self.b_bar.len() != n {
            return false;
        }
        // b~_1 must equal a~_1 (delta_1 = d~_1 by construction).
        if self.a_bar[0] != self.b_bar[0] {
            return false;
        }

        transcript.domain_sep(b"SingleValueProductProof");
        transcript.append_point_var(b"d", &self.commitment_d);
        transcript.append_point_var(b"DeltaSmall", &self.commitment_delta_small);
        transcript.append_point_var(b"DeltaCapital", &self.commitment_delta_capital);
        let x = transcript.get_challenge(b"challenge");

        // b~_n == b * x (delta_n = 0 by construction).
        if self.b_bar[n - 1] != b * &x {
            return false;
        }

        // c_d^x * c_d~ == com(a~; r~)
        let comit_a_bar = xpc_gens.commit(&self.a_bar, self.r_bar);
        if *c_d * x + self.commitment_d != comit_a_bar {
            return false;
        }

        // c_Delta^x * c_delta == com(x*b~_{i+1} - b~_i*a~_{i+1}; s~)
        let comvec: Vec<_> = (0..n - 1)
            .map(|i| self.b_bar[i + 1] * x - self.b_bar[i] * self.a_bar[i + 1])
            .collect();
        let comit_cross = xpc_gens.commit(&comvec, self.s_bar);
        self.commitment_delta_capital * x + self.commitment_delta_small == comit_cross
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::OsRng;

    fn proof_for(d_vec: &[Scalar]) -> (ProductProof, ProjectivePoint, Scalar, VectorPedersenGens) {
        let xpc_gens = VectorPedersenGens::new(d_vec.len());
        let r = Scalar::random(&mut OsRng);
        let c_d = xpc_gens.commit(d_vec, r);
        let b: Scalar = d_vec.iter().copied().product();

        let mut transcript = Transcript::new(b"SingleValue");
        let proof = ProductProof::create(&mut transcript, &xpc_gens, d_vec, r, &mut OsRng);
        (proof, c_d, b, xpc_gens)
    }

    #[test]
    fn product_proof_round_trip() {
        let d_vec: Vec<_> = (0..6).map(|_| Scalar::random(&mut OsRng)).collect();
        let (proof, c_d, b, xpc_gens) = proof_for(&d_vec);

        let mut transcript = Transcript::new(b"SingleValue");
        assert!(proof.verify(&mut transcript, &xpc_gens, &c_d, &b));
    }

    #[test]
    fn wrong_product_rejected() {
        let d_vec: Vec<_> = (0..4).map(|_| Scalar::random(&mut OsRng)).collect();
        let (proof, c_d, b, xpc_gens) = proof_for(&d_vec);

        let mut transcript = Transcript::new(b"SingleValue");
        let wrong = b + Scalar::ONE;
        assert!(!proof.verify(&mut transcript, &xpc_gens, &c_d, &wrong));
    }

    #[test]
    fn wrong_commitment_rejected() {
        let d_vec: Vec<_> = (0..4).map(|_| Scalar::random(&mut OsRng)).collect();
        let (proof, c_d, b, xpc_gens) = proof_for(&d_vec);

        let mut transcript = Transcript::new(b"SingleValue");
        let wrong = c_d + ProjectivePoint::GENERATOR;
        assert!(!proof.verify(&mut transcript, &xpc_gens, &wrong, &b));
    }

    #[test]
    fn tampered_transcript_rejected() {
        let d_vec: Vec<_> = (0..4).map(|_| Scalar::random(&mut OsRng)).collect();
        let (proof, c_d, b, xpc_gens) = proof_for(&d_vec);

        let mut transcript = Transcript::new(b"SomethingElse");
        assert!(!proof.verify(&mut transcript, &xpc_gens, &c_d, &b));
    }
}
