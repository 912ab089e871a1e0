//! Durable exchange formats: line-oriented text files for keys,
//! ciphertext batches, permutations and randomness, and the binary proof
//! layout.

pub mod files;
pub mod proof;

pub use self::files::{
    read_ciphertexts, read_permutation, read_public_key, read_randomness, write_ciphertexts,
};
pub use self::proof::{read_proof, write_proof};

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::codec;
    use crate::elgamal::{keygen, Ciphertext};
    use crate::pedersen::VectorPedersenGens;
    use crate::shuffle::Shuffler;
    use crate::wire;
    use merlin::Transcript;
    use p256::elliptic_curve::ff::Field;
    use p256::{ProjectivePoint, Scalar};
    use rand::rngs::OsRng;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("grothshuffle-{}-{}", std::process::id(), name))
    }

    // The full shuffle workflow through the file formats: write key and
    // input files, load them back, shuffle, persist outputs and proof,
    // reload both and verify standalone.
    #[test]
    fn shuffle_workflow_through_files() {
        let (_, pk) = keygen(&mut OsRng);
        let inputs: Vec<_> = (0..3)
            .map(|i| {
                Ciphertext::encrypt(
                    &pk,
                    &(ProjectivePoint::GENERATOR * Scalar::from((i + 1) as u64)),
                    &Scalar::random(&mut OsRng),
                )
            })
            .collect();

        let pk_path = temp_path("e2e-pk");
        let in_path = temp_path("e2e-in");
        let out_path = temp_path("e2e-out");
        let proof_path = temp_path("e2e-proof");
        std::fs::write(&pk_path, codec::encode(&wire::point_to_wire(&pk))).unwrap();
        write_ciphertexts(&in_path, &inputs).unwrap();

        let pk_loaded = read_public_key(&pk_path).unwrap();
        let in_loaded = read_ciphertexts(&in_path).unwrap();
        let shuffler = Shuffler::new(pk_loaded, VectorPedersenGens::new(in_loaded.len()));
        let mut transcript = Transcript::new(b"ShuffleProof");
        let proof = shuffler
            .shuffle(&in_loaded, &mut OsRng, &mut transcript)
            .unwrap();
        write_ciphertexts(&out_path, &proof.outputs).unwrap();
        write_proof(&proof_path, &proof).unwrap();

        let out_loaded = read_ciphertexts(&out_path).unwrap();
        assert_eq!(out_loaded.len(), 3);
        let proof_loaded = read_proof(&proof_path, out_loaded).unwrap();
        let mut transcript = Transcript::new(b"ShuffleProof");
        assert!(shuffler.verify(&in_loaded, &proof_loaded, &mut transcript));

        for p in [&pk_path, &in_path, &out_path, &proof_path] {
            std::fs::remove_file(p).unwrap();
        }
    }
}
