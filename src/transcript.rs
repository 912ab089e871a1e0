//! Merlin transcript extension for P-256 scalars and points.
//!
//! Fiat-Shamir challenges must match exactly between prover and verifier for
//! a given round, so every command constructs a fresh transcript per engine
//! call and never reuses one between prove and verify.

use merlin::Transcript;
use p256::elliptic_curve::ops::Reduce;
use p256::{FieldBytes, ProjectivePoint, Scalar, U256};

use crate::wire;

/// Extension trait to the Merlin transcript API that allows committing
/// scalars and points and generating challenges as scalars.
pub trait TranscriptProtocol {
    /// Appends `label` to the transcript as a domain separator.
    fn domain_sep(&mut self, label: &'static [u8]);

    /// Append the `label` for a scalar variable to the transcript.
    fn append_scalar_var(&mut self, label: &'static [u8], scalar: &Scalar);

    /// Append a point variable to the transcript, in its canonical wire form.
    fn append_point_var(&mut self, label: &'static [u8], point: &ProjectivePoint);

    /// Get a scalar challenge from the transcript.
    fn get_challenge(&mut self, label: &'static [u8]) -> Scalar;
}

impl TranscriptProtocol for Transcript {
    fn domain_sep(&mut self, label: &'static [u8]) {
        self.append_message(b"dom-sep", label);
    }

    fn append_scalar_var(&mut self, label: &'static [u8], scalar: &Scalar) {
        self.append_message(label, &wire::scalar_to_wire(scalar));
    }

    fn append_point_var(&mut self, label: &'static [u8], point: &ProjectivePoint) {
        self.append_message(b"ptvar", label);
        self.append_message(b"val", &wire::point_to_wire(point));
    }

    fn get_challenge(&mut self, label: &'static [u8]) -> Scalar {
        // p256 has no wide-bytes reduction, so fold 512 challenge bits as
        // hi*2^256 + lo with each half reduced mod the group order.
        let mut bytes = [0u8; 64];
        self.challenge_bytes(label, &mut bytes);
        let hi = <Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::clone_from_slice(&bytes[..32]));
        let lo = <Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::clone_from_slice(&bytes[32..]));
        let shift = Scalar::from(2u64).pow_vartime(&[256u64]);
        hi * shift + lo
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
