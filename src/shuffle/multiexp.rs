//! The `multiexp` module contains API for producing a multi-exponentiation
//! argument [Bayer-Groth] specialized to a single row (m = 1).
//!
//! The prover holds an opening `b_1..b_n, s` of a vector commitment `c_B`
//! and a randomizer `rho`, and convinces the verifier that
//!
//! ```text
//! C = sum_i b_i * E_i + enc(pk, 0, rho)
//! ```
//!
//! for public ciphertexts `E_1..E_n` and a public target ciphertext `C`.
//! With m = 1 the Bayer-Groth announcement matrix collapses to one masking
//! commitment pair plus one masking ciphertext, and the `b`/`s` responses
//! open the fixed zero slot of the announcement.

#![allow(non_snake_case)]

use merlin::Transcript;
use p256::elliptic_curve::ff::Field;
use p256::{ProjectivePoint, Scalar};
use rand::{CryptoRng, RngCore};

use crate::elgamal::Ciphertext;
use crate::pedersen::VectorPedersenGens;
use crate::transcript::TranscriptProtocol;

/// Multi-exponentiation proof (single-row case).
///
/// Field order mirrors the binary proof layout: two announcement
/// commitments, one announcement ciphertext, one response vector, four
/// response scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiexpProof {
    /// Commitment to the masking vector `a_0`.
    pub commitment_a0: ProjectivePoint,
    /// Commitment to the masking scalar `b_0`.
    pub commitment_b0: ProjectivePoint,
    /// Masking ciphertext `E_0`.
    pub e0: Ciphertext,
    /// Response vector `a_i = x*b_i + a0_i`.
    pub a_bar: Vec<Scalar>,
    /// Blinding response for the vector commitment equation.
    pub r_bar: Scalar,
    /// Opening of the zero message slot.
    pub b_bar: Scalar,
    /// Blinding response for the zero-slot commitment equation.
    pub s_bar: Scalar,
    /// Randomness response for the ciphertext equation.
    pub t_bar: Scalar,
}

impl MultiexpProof {
    /// Create a multi-exponentiation argument for
    /// `C = sum_i b_vec[i] * ciphertexts[i] + enc(pk, 0, rho)`, where
    /// `b_vec, s` opens the commitment the verifier checks against.
    pub fn create<R: RngCore + CryptoRng>(
        transcript: &mut Transcript,
        xpc_gens: &VectorPedersenGens,
        pk: &ProjectivePoint,
        ciphertexts: &[Ciphertext],
        b_vec: &[Scalar],
        s: Scalar,
        rho: Scalar,
        rng: &mut R,
    ) -> MultiexpProof {
        let n = ciphertexts.len();
        transcript.domain_sep(b"MultiexpProof");

        // Masking terms.
        let a0: Vec<_> = (0..n).map(|_| Scalar::random(&mut *rng)).collect();
        let r0 = Scalar::random(&mut *rng);
        let b0 = Scalar::random(&mut *rng);
        let s0 = Scalar::random(&mut *rng);
        let t0 = Scalar::random(&mut *rng);

        let commitment_a0 = xpc_gens.commit(&a0, r0);
        let commitment_b0 = xpc_gens.commit(&[b0], s0);
        // E_0 masks both the multi-exponentiation and the message slot.
        let msg = ProjectivePoint::GENERATOR * b0;
        let e0 = Ciphertext::multiscalar_mul(&a0, ciphertexts) + Ciphertext::encrypt(pk, &msg, &t0);

        transcript.append_point_var(b"A0Commitment", &commitment_a0);
        transcript.append_point_var(b"B0Commitment", &commitment_b0);
        transcript.append_point_var(b"E0U", &e0.u);
        transcript.append_point_var(b"E0V", &e0.v);
        let x = transcript.get_challenge(b"challenge");

        let a_bar: Vec<_> = b_vec
            .iter()
            .zip(a0.iter())
            .map(|(b, a)| b * &x + a)
            .collect();
        let r_bar = s * x + r0;
        // The zero slot: b_1 = 0, so the response degenerates to the mask.
        let b_bar = b0;
        let s_bar = s0;
        let t_bar = rho * x + t0;

        MultiexpProof {
            commitment_a0,
            commitment_b0,
            e0,
            a_bar,
            r_bar,
            b_bar,
            s_bar,
            t_bar,
        }
    }

    /// Verifies the proof against the committed exponent vector `c_B`, the
    /// public ciphertexts, and the target ciphertext `C`.
    pub fn verify(
        &self,
        transcript: &mut Transcript,
        xpc_gens: &VectorPedersenGens,
        pk: &ProjectivePoint,
        ciphertexts: &[Ciphertext],
        c_B: &ProjectivePoint,
        target: &Ciphertext,
    ) -> bool {
        if self.a_bar.len() != ciphertexts.len() {
            return false;
        }

        transcript.domain_sep(b"MultiexpProof");
        transcript.append_point_var(b"A0Commitment", &self.commitment_a0);
        transcript.append_point_var(b"B0Commitment", &self.commitment_b0);
        transcript.append_point_var(b"E0U", &self.e0.u);
        transcript.append_point_var(b"E0V", &self.e0.v);
        let x = transcript.get_challenge(b"challenge");

        // c_A0 * c_B^x == com(a~; r~)
        if self.commitment_a0 + *c_B * x != xpc_gens.commit(&self.a_bar, self.r_bar) {
            return false;
        }
        // The zero slot commits to nothing beyond its mask: c_B0 == com(b~; s~).
        if self.commitment_b0 != xpc_gens.commit(&[self.b_bar], self.s_bar) {
            return false;
        }
        // E_0 + x*C == sum_i a~_i*E_i + enc(pk, b~*G, t~)
        let msg = ProjectivePoint::GENERATOR * self.b_bar;
        let lhs = self.e0 + (target * &x);
        let rhs = Ciphertext::multiscalar_mul(&self.a_bar, ciphertexts)
            + Ciphertext::encrypt(pk, &msg, &self.t_bar);
        lhs == rhs
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
