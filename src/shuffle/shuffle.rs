//! Shuffle engine: permutation handling and the Groth-style shuffle
//! argument over ElGamal ciphertext batches.
//!
//! The argument commits to the permutation and to the challenge powers it
//! induces, then reduces correctness of the shuffle to one single-value
//! product argument (the committed vectors encode a permutation) and one
//! multi-exponentiation argument (the output batch re-encrypts the input
//! batch under that permutation).

#![allow(non_snake_case)]

use merlin::Transcript;
use p256::elliptic_curve::ff::Field;
use p256::{ProjectivePoint, Scalar};
use rand::{CryptoRng, Rng, RngCore};

use crate::elgamal::Ciphertext;
use crate::error::Error;
use crate::pedersen::VectorPedersenGens;
use crate::shuffle::multiexp::MultiexpProof;
use crate::shuffle::product::ProductProof;
use crate::shuffle::vectorutil;
use crate::transcript::TranscriptProtocol;

/// A validated permutation of `{0,...,n-1}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    mapping: Vec<usize>,
}

impl Permutation {
    /// Samples a uniformly random permutation (Fisher-Yates).
    pub fn random<R: Rng + CryptoRng>(rng: &mut R, n: usize) -> Self {
        let mut mapping: Vec<usize> = (0..n).collect();
        for i in (1..mapping.len()).rev() {
            // invariant: elements with index > i have been locked in place.
            mapping.swap(i, rng.gen_range(0..i + 1));
        }
        Permutation { mapping }
    }

    /// Builds a permutation from explicit indices, validating that they form
    /// a bijection on `{0,...,n-1}`: sorted, they must equal the identity
    /// sequence. A malformed permutation never reaches the proof logic.
    pub fn from_vec(mapping: Vec<usize>) -> Result<Self, Error> {
        let mut sorted = mapping.clone();
        sorted.sort_unstable();
        for (i, v) in sorted.iter().enumerate() {
            if *v != i {
                return Err(Error::InvalidPermutation);
            }
        }
        Ok(Permutation { mapping })
    }

    /// Number of elements the permutation acts on.
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// True for the empty permutation.
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// The underlying index sequence; position `i` holds `pi(i)`.
    pub fn as_slice(&self) -> &[usize] {
        &self.mapping
    }

    /// Applies the permutation: output position `i` receives input
    /// `pi(i)`.
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        self.mapping.iter().map(|&j| items[j].clone()).collect()
    }
}

/// Groth-style shuffle proof.
///
/// `outputs` is the permuted ciphertext batch, the statement the proof
/// speaks about. It travels in the ciphertext file, not the proof file, and
/// is reattached after deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleProof {
    /// Commitment to the permutation indices.
    pub c_a: ProjectivePoint,
    /// Commitment to the permuted challenge powers.
    pub c_b: ProjectivePoint,
    /// Product sub-argument: the committed vectors encode a permutation.
    pub product_proof: ProductProof,
    /// Multi-exponentiation sub-argument: the outputs re-encrypt the inputs.
    pub multiexp_proof: MultiexpProof,
    /// The permuted ciphertext batch (statement, not serialized with the
    /// proof).
    pub outputs: Vec<Ciphertext>,
}

/// The shuffle engine: holds the public key ciphertexts are encrypted under
/// and the commitment key sized to the batch, both fixed for the duration of
/// one command.
#[derive(Debug, Clone)]
pub struct Shuffler {
    pk: ProjectivePoint,
    xpc_gens: VectorPedersenGens,
}

impl Shuffler {
    /// Creates an engine for batches of the commitment key's capacity.
    pub fn new(pk: ProjectivePoint, xpc_gens: VectorPedersenGens) -> Self {
        Shuffler { pk, xpc_gens }
    }

    /// Shuffles `inputs` with a freshly sampled permutation and randomness,
    /// producing the permuted batch and its proof in one call.
    pub fn shuffle<R: RngCore + CryptoRng + Rng>(
        &self,
        inputs: &[Ciphertext],
        rng: &mut R,
        transcript: &mut Transcript,
    ) -> Result<ShuffleProof, Error> {
        let n = check_batch(inputs)?;
        let pi = Permutation::random(rng, n);
        let rho: Vec<_> = (0..n).map(|_| Scalar::random(&mut *rng)).collect();
        let outputs: Vec<_> = pi
            .apply(inputs)
            .iter()
            .zip(rho.iter())
            .map(|(e, r)| e.rerandomize(&self.pk, r))
            .collect();
        self.prove(inputs, &outputs, &pi, &rho, rng, transcript)
    }

    /// Proves that `outputs` is a valid shuffle of `inputs` under the given
    /// permutation and re-randomization scalars.
    pub fn prove<R: RngCore + CryptoRng>(
        &self,
        inputs: &[Ciphertext],
        outputs: &[Ciphertext],
        pi: &Permutation,
        rho: &[Scalar],
        rng: &mut R,
        transcript: &mut Transcript,
    ) -> Result<ShuffleProof, Error> {
        let n = check_batch(inputs)?;
        check_length(n, outputs.len())?;
        check_length(n, pi.len())?;
        check_length(n, rho.len())?;

        absorb_statement(transcript, &self.pk, inputs, outputs);

        // Commit to a_i = pi(i).
        let a_vec: Vec<_> = pi
            .as_slice()
            .iter()
            .map(|&j| Scalar::from(j as u64))
            .collect();
        let r_a = Scalar::random(&mut *rng);
        let c_a = self.xpc_gens.commit(&a_vec, r_a);
        transcript.append_point_var(b"ACommitment", &c_a);
        let x = transcript.get_challenge(b"xchallenge");

        // Commit to b_i = x^{pi(i)}.
        let exp_x: Vec<_> = vectorutil::exp_iter(x).take(n).collect();
        let b_vec: Vec<_> = pi.as_slice().iter().map(|&j| exp_x[j]).collect();
        let r_b = Scalar::random(&mut *rng);
        let c_b = self.xpc_gens.commit(&b_vec, r_b);
        transcript.append_point_var(b"BCommitment", &c_b);
        let y = transcript.get_challenge(b"ychallenge");
        let z = transcript.get_challenge(b"zchallenge");

        // d = y*a + b - z*1, committed under y*c_a + c_b - z*com(1;0);
        // its product telescopes over {0..n-1} whenever a, b encode one
        // permutation.
        let d_vec: Vec<_> = a_vec
            .iter()
            .zip(b_vec.iter())
            .map(|(a, b)| y * a + b - z)
            .collect();
        let r_d = y * r_a + r_b;
        let product_proof =
            ProductProof::create(transcript, &self.xpc_gens, &d_vec, r_d, &mut *rng);

        // sum_i b_i*E_i = sum_i x^i*e_i + enc(0, <b, rho>), so the target
        // sum_i x^i*e_i carries witness randomizer -<b, rho>.
        let rho_bar = -vectorutil::inner_product(&b_vec, rho);
        let multiexp_proof = MultiexpProof::create(
            transcript,
            &self.xpc_gens,
            &self.pk,
            outputs,
            &b_vec,
            r_b,
            rho_bar,
            rng,
        );

        Ok(ShuffleProof {
            c_a,
            c_b,
            product_proof,
            multiexp_proof,
            outputs: outputs.to_vec(),
        })
    }

    /// Verifies a shuffle proof against the input batch. The output batch is
    /// the one carried by the proof's statement.
    pub fn verify(
        &self,
        inputs: &[Ciphertext],
        proof: &ShuffleProof,
        transcript: &mut Transcript,
    ) -> bool {
        let n = inputs.len();
        if n < 2 || proof.outputs.len() != n || proof.product_proof.a_bar.len() != n {
            return false;
        }

        absorb_statement(transcript, &self.pk, inputs, &proof.outputs);
        transcript.append_point_var(b"ACommitment", &proof.c_a);
        let x = transcript.get_challenge(b"xchallenge");
        transcript.append_point_var(b"BCommitment", &proof.c_b);
        let y = transcript.get_challenge(b"ychallenge");
        let z = transcript.get_challenge(b"zchallenge");

        // Reconstruct the product statement from the round challenges.
        let exp_x: Vec<_> = vectorutil::exp_iter(x).take(n).collect();
        let c_d = proof.c_a * y + proof.c_b - self.xpc_gens.commit_ones(n) * z;
        let b_value: Scalar = (0..n)
            .map(|i| y * Scalar::from(i as u64) + exp_x[i] - z)
            .product();
        if !proof
            .product_proof
            .verify(transcript, &self.xpc_gens, &c_d, &b_value)
        {
            return false;
        }

        let target = Ciphertext::multiscalar_mul(&exp_x, inputs);
        proof.multiexp_proof.verify(
            transcript,
            &self.xpc_gens,
            &self.pk,
            &proof.outputs,
            &proof.c_b,
            &target,
        )
    }
}

/// Binds the statement (public key, inputs, outputs) into the transcript
/// before any commitment is exchanged.
fn absorb_statement(
    transcript: &mut Transcript,
    pk: &ProjectivePoint,
    inputs: &[Ciphertext],
    outputs: &[Ciphertext],
) {
    transcript.domain_sep(b"GrothShuffle");
    transcript.append_u64(b"n", inputs.len() as u64);
    transcript.append_point_var(b"pk", pk);
    for e in inputs {
        transcript.append_point_var(b"inU", &e.u);
        transcript.append_point_var(b"inV", &e.v);
    }
    for e in outputs {
        transcript.append_point_var(b"outU", &e.u);
        transcript.append_point_var(b"outV", &e.v);
    }
}

fn check_batch(inputs: &[Ciphertext]) -> Result<usize, Error> {
    match inputs.len() {
        0 => Err(Error::EmptyBatch),
        1 => Err(Error::BatchTooSmall),
        n => Ok(n),
    }
}

fn check_length(expected: usize, got: usize) -> Result<(), Error> {
    if expected == got {
        Ok(())
    } else {
        Err(Error::LengthMismatch { expected, got })
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::elgamal::keygen;
    use rand::rngs::OsRng;

    fn sample_batch(pk: &ProjectivePoint, n: usize) -> Vec<Ciphertext> {
        (0..n)
            .map(|i| {
                Ciphertext::encrypt(
                    pk,
                    &(ProjectivePoint::GENERATOR * Scalar::from((i + 1) as u64)),
                    &Scalar::random(&mut OsRng),
                )
            })
            .collect()
    }

    #[test]
    fn permutation_from_vec_accepts_bijection() {
        let pi = Permutation::from_vec(vec![1, 0, 2]).unwrap();
        assert_eq!(pi.apply(&['a', 'b', 'c']), vec!['b', 'a', 'c']);
    }

    #[test]
    fn permutation_from_vec_rejects_duplicate() {
        assert!(matches!(
            Permutation::from_vec(vec![0, 0, 1]),
            Err(Error::InvalidPermutation)
        ));
    }

    #[test]
    fn permutation_from_vec_rejects_out_of_range() {
        assert!(matches!(
            Permutation::from_vec(vec![0, 1, 3]),
            Err(Error::InvalidPermutation)
        ));
    }

    #[test]
    fn random_permutation_is_bijection() {
        let pi = Permutation::random(&mut OsRng, 20);
        assert!(Permutation::from_vec(pi.as_slice().to_vec()).is_ok());
    }

    #[test]
    fn shuffle_proof_test() {
        let (_, pk) = keygen(&mut OsRng);
        let inputs = sample_batch(&pk, 5);
        let shuffler = Shuffler::new(pk, VectorPedersenGens::new(5));

        let mut transcript_p = Transcript::new(b"ShuffleProof");
        let proof = shuffler
            .shuffle(&inputs, &mut OsRng, &mut transcript_p)
            .unwrap();
        assert_eq!(proof.outputs.len(), 5);

        let mut transcript_v = Transcript::new(b"ShuffleProof");
        assert!(shuffler.verify(&inputs, &proof, &mut transcript_v));
    }

    #[test]
    fn prove_with_explicit_witness_test() {
        let (_, pk) = keygen(&mut OsRng);
        let inputs = sample_batch(&pk, 3);
        let pi = Permutation::from_vec(vec![1, 0, 2]).unwrap();
        let rho: Vec<_> = (0..3).map(|_| Scalar::random(&mut OsRng)).collect();
        let outputs: Vec<_> = pi
            .apply(&inputs)
            .iter()
            .zip(rho.iter())
            .map(|(e, r)| e.rerandomize(&pk, r))
            .collect();
        let shuffler = Shuffler::new(pk, VectorPedersenGens::new(3));

        let mut transcript_p = Transcript::new(b"ShuffleProof");
        let proof = shuffler
            .prove(&inputs, &outputs, &pi, &rho, &mut OsRng, &mut transcript_p)
            .unwrap();

        let mut transcript_v = Transcript::new(b"ShuffleProof");
        assert!(shuffler.verify(&inputs, &proof, &mut transcript_v));
    }

    #[test]
    fn tampered_output_fails_verification() {
        let (_, pk) = keygen(&mut OsRng);
        let inputs = sample_batch(&pk, 4);
        let shuffler = Shuffler::new(pk, VectorPedersenGens::new(4));

        let mut transcript_p = Transcript::new(b"ShuffleProof");
        let mut proof = shuffler
            .shuffle(&inputs, &mut OsRng, &mut transcript_p)
            .unwrap();
        // Swap one output for an unrelated encryption.
        proof.outputs[0] = Ciphertext::encrypt(
            &pk,
            &(ProjectivePoint::GENERATOR * Scalar::from(999u64)),
            &Scalar::random(&mut OsRng),
        );

        let mut transcript_v = Transcript::new(b"ShuffleProof");
        assert!(!shuffler.verify(&inputs, &proof, &mut transcript_v));
    }

    #[test]
    fn wrong_witness_produces_rejected_proof() {
        let (_, pk) = keygen(&mut OsRng);
        let inputs = sample_batch(&pk, 3);
        let pi = Permutation::from_vec(vec![1, 0, 2]).unwrap();
        let rho: Vec<_> = (0..3).map(|_| Scalar::random(&mut OsRng)).collect();
        // Outputs built under a different permutation than the one claimed.
        let other = Permutation::from_vec(vec![2, 1, 0]).unwrap();
        let outputs: Vec<_> = other
            .apply(&inputs)
            .iter()
            .zip(rho.iter())
            .map(|(e, r)| e.rerandomize(&pk, r))
            .collect();
        let shuffler = Shuffler::new(pk, VectorPedersenGens::new(3));

        let mut transcript_p = Transcript::new(b"ShuffleProof");
        let proof = shuffler
            .prove(&inputs, &outputs, &pi, &rho, &mut OsRng, &mut transcript_p)
            .unwrap();

        let mut transcript_v = Transcript::new(b"ShuffleProof");
        assert!(!shuffler.verify(&inputs, &proof, &mut transcript_v));
    }

    #[test]
    fn small_batches_rejected() {
        let (_, pk) = keygen(&mut OsRng);
        let shuffler = Shuffler::new(pk, VectorPedersenGens::new(2));
        let mut transcript = Transcript::new(b"ShuffleProof");
        assert!(matches!(
            shuffler.shuffle(&[], &mut OsRng, &mut transcript),
            Err(Error::EmptyBatch)
        ));
        let one = sample_batch(&pk, 1);
        let mut transcript = Transcript::new(b"ShuffleProof");
        assert!(matches!(
            shuffler.shuffle(&one, &mut OsRng, &mut transcript),
            Err(Error::BatchTooSmall)
        ));
    }
}
