use core::iter::Sum;
use core::ops::{Add, Mul, Sub};

use p256::elliptic_curve::ff::Field;
use p256::{ProjectivePoint, Scalar};
use rand::{CryptoRng, RngCore};

/// An ElGamal ciphertext: the ordered pair (U, V) of curve points.
///
/// For public key `pk = sk*G`, the encryption of a message point `M` with
/// randomness `r` is `(r*G, M + r*pk)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    /// First component, `r*G`.
    pub u: ProjectivePoint,
    /// Second component, `M + r*pk`.
    pub v: ProjectivePoint,
}

impl Ciphertext {
    /// The identity ciphertext, neutral element for [`Add`].
    pub const IDENTITY: Ciphertext = Ciphertext {
        u: ProjectivePoint::IDENTITY,
        v: ProjectivePoint::IDENTITY,
    };

    /// Encrypts the message point `m` under `pk` with randomness `r`.
    pub fn encrypt(pk: &ProjectivePoint, m: &ProjectivePoint, r: &Scalar) -> Ciphertext {
        Ciphertext {
            u: ProjectivePoint::GENERATOR * r,
            v: *m + *pk * r,
        }
    }

    /// Encrypts the group identity; adding this to a ciphertext
    /// re-randomizes it without changing the plaintext.
    pub fn encrypt_zero(pk: &ProjectivePoint, r: &Scalar) -> Ciphertext {
        Ciphertext::encrypt(pk, &ProjectivePoint::IDENTITY, r)
    }

    /// Re-randomizes `self` under `pk` with fresh randomness `r`.
    pub fn rerandomize(&self, pk: &ProjectivePoint, r: &Scalar) -> Ciphertext {
        *self + Ciphertext::encrypt_zero(pk, r)
    }

    /// Recovers the message point with the secret key.
    pub fn decrypt(&self, sk: &Scalar) -> ProjectivePoint {
        self.v - self.u * sk
    }

    /// Computes `sum_i scalars[i] * ciphertexts[i]` componentwise.
    pub fn multiscalar_mul(scalars: &[Scalar], ciphertexts: &[Ciphertext]) -> Ciphertext {
        scalars
            .iter()
            .zip(ciphertexts.iter())
            .map(|(s, c)| c * s)
            .sum()
    }
}

/// Generates an ElGamal keypair `(sk, pk)` with `pk = sk*G`.
pub fn keygen<R: RngCore + CryptoRng>(rng: &mut R) -> (Scalar, ProjectivePoint) {
    let sk = Scalar::random(rng);
    (sk, ProjectivePoint::GENERATOR * sk)
}

// ------- Ciphertext Add, Sub, Mul, Sum ------- //

impl Add<Ciphertext> for Ciphertext {
    type Output = Ciphertext;

    fn add(self, other: Ciphertext) -> Ciphertext {
        Ciphertext {
            u: self.u + other.u,
            v: self.v + other.v,
        }
    }
}

impl Sub<Ciphertext> for Ciphertext {
    type Output = Ciphertext;

    fn sub(self, other: Ciphertext) -> Ciphertext {
        Ciphertext {
            u: self.u - other.u,
            v: self.v - other.v,
        }
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a Ciphertext {
    type Output = Ciphertext;

    /// Scalar multiplication: compute `scalar * self` componentwise.
    fn mul(self, scalar: &'b Scalar) -> Ciphertext {
        Ciphertext {
            u: self.u * scalar,
            v: self.v * scalar,
        }
    }
}

impl Sum for Ciphertext {
    fn sum<I: Iterator<Item = Ciphertext>>(iter: I) -> Ciphertext {
        iter.fold(Ciphertext::IDENTITY, Add::add)
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn encrypt_decrypt_test() {
        let (sk, pk) = keygen(&mut OsRng);
        let m = ProjectivePoint::GENERATOR * Scalar::from(42u64);
        let ct = Ciphertext::encrypt(&pk, &m, &Scalar::random(&mut OsRng));
        assert_eq!(ct.decrypt(&sk), m);
    }

    #[test]
    fn rerandomize_preserves_plaintext() {
        let (sk, pk) = keygen(&mut OsRng);
        let m = ProjectivePoint::GENERATOR * Scalar::from(7u64);
        let ct = Ciphertext::encrypt(&pk, &m, &Scalar::random(&mut OsRng));
        let ct2 = ct.rerandomize(&pk, &Scalar::random(&mut OsRng));
        assert_ne!(ct, ct2);
        assert_eq!(ct2.decrypt(&sk), m);
    }

    #[test]
    fn homomorphic_add_test() {
        let (sk, pk) = keygen(&mut OsRng);
        let m1 = ProjectivePoint::GENERATOR * Scalar::from(3u64);
        let m2 = ProjectivePoint::GENERATOR * Scalar::from(5u64);
        let c1 = Ciphertext::encrypt(&pk, &m1, &Scalar::random(&mut OsRng));
        let c2 = Ciphertext::encrypt(&pk, &m2, &Scalar::random(&mut OsRng));
        assert_eq!((c1 + c2).decrypt(&sk), m1 + m2);
    }

    #[test]
    fn multiscalar_mul_matches_naive() {
        let (_, pk) = keygen(&mut OsRng);
        let cts: Vec<_> = (0..4)
            .map(|i| {
                Ciphertext::encrypt(
                    &pk,
                    &(ProjectivePoint::GENERATOR * Scalar::from(i as u64)),
                    &Scalar::random(&mut OsRng),
                )
            })
            .collect();
        let scalars: Vec<_> = (0..4).map(|_| Scalar::random(&mut OsRng)).collect();

        let mut naive = Ciphertext::IDENTITY;
        for (s, c) in scalars.iter().zip(cts.iter()) {
            naive = naive + (c * s);
        }
        assert_eq!(Ciphertext::multiscalar_mul(&scalars, &cts), naive);
    }
}
